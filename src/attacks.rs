use crate::board::Board;
use crate::piece::{Color, Piece, PieceType};
use crate::square::{offset, Square};

/// Squares a piece standing on `origin` attacks. Pawns attack diagonally whether or not
/// anything stands there, sliders stop on the first occupied square and include it.
pub fn attack_set(board: &Board, origin: Square, piece: Piece) -> Vec<Square> {
    match piece.piece_type {
        PieceType::Pawn => [-1, 1]
            .iter()
            .filter_map(|file_delta| offset(origin, *file_delta, piece.color.pawn_direction()))
            .collect(),
        PieceType::Knight | PieceType::King => piece
            .piece_type
            .geometry()
            .iter()
            .filter_map(|(df, dr)| offset(origin, *df, *dr))
            .collect(),
        PieceType::Bishop | PieceType::Rook | PieceType::Queen => {
            let mut squares = vec![];
            for (df, dr) in piece.piece_type.geometry() {
                let mut current = origin;
                while let Some(next) = offset(current, *df, *dr) {
                    squares.push(next);
                    if !board.is_empty(next) {
                        break;
                    }
                    current = next;
                }
            }
            squares
        }
    }
}

/// Squares holding pieces of `attacking_color` that attack `target`
pub fn attackers_of(board: &Board, target: Square, attacking_color: Color) -> Vec<Square> {
    board
        .pieces_of(attacking_color)
        .filter(|(sq, piece)| attack_set(board, *sq, *piece).contains(&target))
        .map(|(sq, _)| sq)
        .collect()
}

pub fn square_attacked_by(board: &Board, target: Square, attacking_color: Color) -> bool {
    board
        .pieces_of(attacking_color)
        .any(|(sq, piece)| attack_set(board, sq, piece).contains(&target))
}

/// Whether the king of a color is attacked. A side without a king is never in check;
/// callers that require a king check for it themselves.
pub fn in_check(board: &Board, color: Color) -> bool {
    match board.king_square(color) {
        Some(king_square) => square_attacked_by(board, king_square, color.opposite()),
        None => false,
    }
}
