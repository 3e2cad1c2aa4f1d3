use crate::{
    attacks::{in_check, square_attacked_by},
    board::Board,
    castling::CastleSide,
    movelist::MoveList,
    piece::{Color, Piece, PieceType},
    r#move::Move,
    square::{file_of, from_coords, offset, rank_of, Square},
};
use log::trace;

/// Generates every legal move of `side` in the given position
pub fn legal_moves(board: &Board, side: Color) -> MoveList {
    board
        .pieces_of(side)
        .flat_map(|(origin, piece)| pseudo_legal_moves_for_piece(board, origin, piece))
        .filter(|mv| is_legal(board, side, mv))
        .collect()
}

/// Generates the legal moves of the piece standing on `origin`, whatever its color
pub fn legal_moves_for(board: &Board, origin: Square) -> MoveList {
    match board.piece_at(origin) {
        Some(piece) => pseudo_legal_moves_for_piece(board, origin, piece)
            .into_iter()
            .filter(|mv| is_legal(board, piece.color, mv))
            .collect(),
        None => MoveList::default(),
    }
}

/// Moves obeying piece geometry, without regard for the mover's own king
pub fn pseudo_legal_moves(board: &Board, side: Color) -> Vec<Move> {
    board
        .pieces_of(side)
        .flat_map(|(origin, piece)| pseudo_legal_moves_for_piece(board, origin, piece))
        .collect()
}

// Plays the move on a scratch copy, pins and discovered checks fall out of the simulation
fn is_legal(board: &Board, side: Color, mv: &Move) -> bool {
    let mut scratch = board.clone();
    scratch.make(*mv);
    let legal = !in_check(&scratch, side);
    if !legal {
        trace!("{} rejected, it leaves the {:?} king in check", mv, side);
    }
    legal
}

fn pseudo_legal_moves_for_piece(board: &Board, origin: Square, piece: Piece) -> Vec<Move> {
    let mut moves = vec![];
    match piece.piece_type {
        PieceType::Pawn => pawn_moves(board, origin, piece, &mut moves),
        PieceType::Knight => leaper_moves(board, origin, piece, &mut moves),
        PieceType::Bishop | PieceType::Rook | PieceType::Queen => slider_moves(board, origin, piece, &mut moves),
        PieceType::King => {
            leaper_moves(board, origin, piece, &mut moves);
            castling(board, origin, piece, &mut moves);
        }
    }
    moves
}

fn is_enemy(board: &Board, sq: Square, side: Color) -> bool {
    board.color_on(sq) == Some(side.opposite())
}

fn push_pawn_move(origin: Square, target: Square, side: Color, moves: &mut Vec<Move>) {
    if rank_of(target) == side.promotion_rank() {
        moves.extend(Move::all_promotions(origin, target))
    } else {
        moves.push(Move::new_quiet(origin, target))
    }
}

fn pawn_moves(board: &Board, origin: Square, piece: Piece, moves: &mut Vec<Move>) {
    let side = piece.color;
    let direction = side.pawn_direction();

    if let Some(single) = offset(origin, 0, direction).filter(|sq| board.is_empty(*sq)) {
        push_pawn_move(origin, single, side, moves);
        if !piece.moved && rank_of(origin) == side.pawn_home_rank() {
            if let Some(double) = offset(single, 0, direction).filter(|sq| board.is_empty(*sq)) {
                moves.push(Move::new_quiet(origin, double))
            }
        }
    }

    for file_delta in [-1, 1] {
        let target = match offset(origin, file_delta, direction) {
            Some(sq) => sq,
            None => continue,
        };
        if is_enemy(board, target, side) {
            push_pawn_move(origin, target, side, moves)
        } else if en_passant_available(board, origin, target, side) {
            moves.push(Move::new_en_passant(origin, target))
        }
    }
}

// Only the side to move may use the target, and only against the pawn that skipped it
fn en_passant_available(board: &Board, origin: Square, target: Square, side: Color) -> bool {
    if board.en_passant_target() != Some(target) || board.side_to_move() != side {
        return false;
    }
    let skipping_pawn = from_coords(file_of(target), rank_of(origin));
    matches!(
        board.piece_at(skipping_pawn),
        Some(Piece { piece_type: PieceType::Pawn, color, .. }) if color != side
    )
}

fn leaper_moves(board: &Board, origin: Square, piece: Piece, moves: &mut Vec<Move>) {
    for (df, dr) in piece.piece_type.geometry() {
        if let Some(target) = offset(origin, *df, *dr) {
            if board.color_on(target) != Some(piece.color) {
                moves.push(Move::new_quiet(origin, target))
            }
        }
    }
}

fn slider_moves(board: &Board, origin: Square, piece: Piece, moves: &mut Vec<Move>) {
    for (df, dr) in piece.piece_type.geometry() {
        let mut current = origin;
        while let Some(target) = offset(current, *df, *dr) {
            match board.color_on(target) {
                None => moves.push(Move::new_quiet(origin, target)),
                Some(color) => {
                    if color != piece.color {
                        moves.push(Move::new_quiet(origin, target))
                    }
                    break;
                }
            }
            current = target;
        }
    }
}

fn castling(board: &Board, origin: Square, king: Piece, moves: &mut Vec<Move>) {
    let side = king.color;
    if king.moved || origin != CastleSide::king_origin(side) {
        return;
    }
    for castle_side in [CastleSide::Kingside, CastleSide::Queenside] {
        if !board.castling_rights().has(side, castle_side) {
            continue;
        }
        let rook_in_place = matches!(
            board.piece_at(castle_side.rook_origin(side)),
            Some(Piece { piece_type: PieceType::Rook, color, moved: false }) if color == side
        );
        let path_clear = castle_side.empty_squares(side).iter().all(|sq| board.is_empty(*sq));
        let path_safe = castle_side
            .king_path(side)
            .iter()
            .all(|sq| !square_attacked_by(board, *sq, side.opposite()));

        if rook_in_place && path_clear && path_safe {
            moves.push(Move::new_castle(side, castle_side))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fen;
    use crate::piece::Color::{Black, White};

    fn sorted_strings(moves: &MoveList) -> Vec<String> {
        moves.sorted().iter().map(|m| m.to_string()).collect()
    }

    #[test]
    fn twenty_moves_from_the_start() {
        let board = Board::starting_position();
        assert_eq!(legal_moves(&board, White).len(), 20);
        assert_eq!(legal_moves(&board, Black).len(), 20);
        assert_eq!(sorted_strings(&legal_moves_for(&board, 6)), vec!["g1f3", "g1h3"]);
        assert!(legal_moves_for(&board, 28).is_empty());
    }

    #[test]
    fn pinned_piece_cannot_leave_the_line() {
        // the e2 knight is pinned by the e8 rook
        let board = fen::parse("4r1k1/8/8/8/8/8/4N3/4K3 w - - 0 1").unwrap();
        assert!(legal_moves_for(&board, 12).is_empty());
        assert_eq!(pseudo_legal_moves(&board, White).iter().filter(|m| m.from == 12).count(), 6);
    }

    #[test]
    fn promotions_yield_four_moves() {
        let board = fen::parse("7k/4P3/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        assert_eq!(sorted_strings(&legal_moves_for(&board, 52)), vec!["e7e8n", "e7e8b", "e7e8r", "e7e8q"]);
    }

    #[test]
    fn en_passant_only_for_the_side_to_move() {
        let board = fen::parse("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 3").unwrap();
        let moves = legal_moves_for(&board, 36);
        assert!(moves.contains(&Move::new_en_passant(36, 43)));
        assert_eq!(moves.len(), 2);
    }

    #[test]
    fn en_passant_exposing_the_king_is_illegal() {
        // taking on d6 would clear the fifth rank between the a5 rook and the h5 king
        let board = fen::parse("8/8/8/r2pP2K/8/8/8/4k3 w - d6 0 3").unwrap();
        assert!(!legal_moves_for(&board, 36).contains(&Move::new_en_passant(36, 43)));
    }

    #[test]
    fn castling_through_an_attacked_square_is_illegal() {
        // f1 is covered by the f8 rook, the king would pass through it
        let board = fen::parse("4kr2/8/8/8/8/8/8/4K2R w K - 0 1").unwrap();
        assert!(!legal_moves(&board, White).contains(&Move::new_castle(White, CastleSide::Kingside)));

        let board = fen::parse("4k3/8/8/8/8/8/8/4K2R w K - 0 1").unwrap();
        assert!(legal_moves(&board, White).contains(&Move::new_castle(White, CastleSide::Kingside)));
    }

    #[test]
    fn no_castling_out_of_check_or_through_pieces() {
        let board = fen::parse("4r1k1/8/8/8/8/8/8/R3K2R w KQ - 0 1").unwrap();
        assert!(!legal_moves(&board, White).iter().any(|m| m.is_castle.is_some()));

        let board = fen::parse("4k3/8/8/8/8/8/8/RN2K2R w KQ - 0 1").unwrap();
        let castles: Vec<_> = legal_moves(&board, White).iter().filter_map(|m| m.is_castle).collect();
        assert_eq!(castles, vec![CastleSide::Kingside]);
    }

    #[test]
    fn queenside_allows_an_attacked_b_file() {
        // b1 is attacked but the king never crosses it
        let board = fen::parse("1r2k3/8/8/8/8/8/8/R3K3 w Q - 0 1").unwrap();
        assert!(legal_moves(&board, White).contains(&Move::new_castle(White, CastleSide::Queenside)));
    }

    #[test]
    fn king_cannot_capture_a_defended_piece() {
        let board = fen::parse("4k3/8/8/8/8/8/3q4/2b1K3 w - - 0 1").unwrap();
        // d2 is defended by the c1 bishop
        let moves = sorted_strings(&legal_moves(&board, White));
        assert!(!moves.contains(&String::from("e1d2")));
    }
}
