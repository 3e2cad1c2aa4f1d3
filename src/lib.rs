use std::time::Instant;

use crate::board::Board;
use crate::move_generator::legal_moves;

pub mod attacks;
pub mod board;
pub mod castling;
pub mod cli;
pub mod fen;
pub mod game;
pub mod history;
pub mod move_generator;
pub mod movelist;
pub mod piece;
pub mod r#move;
pub mod square;
pub mod zob_hash;

pub use crate::fen::FenError;
pub use crate::game::{new_game, GameState, GameStatus, MoveError};
pub use crate::r#move::{Move, MoveRequest};

/// Prints node counts for each depth up to the given one
pub fn print_perft(depth: u32, fen: Option<String>) -> Result<(), FenError> {
    let board = match fen {
        None => Board::starting_position(),
        Some(f) => fen::parse(&f)?,
    };
    println!("{}\n", board);
    println!("depth nodes\n--------");
    for d in 0..depth + 1 {
        let start = Instant::now();
        let nodes = perft(&board, d);
        let elapsed = start.elapsed();
        println!(
            "{}     {} ({}s, {} nps)",
            d,
            nodes,
            elapsed.as_secs_f32(),
            nodes as f32 / elapsed.as_secs_f32()
        );
    }
    Ok(())
}

/// Counts the leaf nodes of the legal move tree of the given depth
pub fn perft(board: &Board, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }
    let moves = legal_moves(board, board.side_to_move());
    if depth == 1 {
        return moves.len() as u64;
    }
    moves
        .iter()
        .map(|mv| {
            let mut child = board.clone();
            child.make(*mv);
            perft(&child, depth - 1)
        })
        .sum()
}
