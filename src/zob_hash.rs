use crate::board::Board;
use crate::castling::{CastleSide, CastlingRights};
use crate::piece::{Color, Piece, PieceType};
use crate::square::{file_of, offset, Square};

// ZOBRIST_KEYS, generated by build.rs
include!(concat!(env!("OUT_DIR"), "/zobrist_keys.rs"));

pub type Hash = u64;

/// Position identities for repetition detection. Two boards hash the same when
/// piece placement, side to move, castling rights and capturable en passant file agree.
/// Clocks and per-piece `moved` flags are not part of a position's identity.
pub struct ZobristHasher {}
impl ZobristHasher {
    pub const BLACK_TO_MOVE_INDEX: usize = 768;
    const CASTLING_OFFSET: usize = 769;
    const EP_FILE_OFFSET: usize = 773;

    pub fn hash_for_piece_sq(piece: Piece, sq: Square) -> Hash {
        let piece_type_offset = 64 * (piece.piece_type as usize);
        let color_offset = if piece.color == Color::White { 6 * 64 } else { 0 };
        Self::ZOBRIST_KEYS[piece_type_offset + color_offset + sq]
    }

    pub fn side_to_move_hash(color: Color) -> Hash {
        if color == Color::Black { Self::ZOBRIST_KEYS[Self::BLACK_TO_MOVE_INDEX] } else { 0 }
    }

    pub fn castling_rights_hash(castling_rights: CastlingRights) -> Hash {
        [
            (Color::White, CastleSide::Kingside),
            (Color::White, CastleSide::Queenside),
            (Color::Black, CastleSide::Kingside),
            (Color::Black, CastleSide::Queenside),
        ]
        .iter()
        .enumerate()
        .filter(|(_, (color, side))| castling_rights.has(*color, *side))
        .fold(0, |hash, (i, _)| hash ^ Self::ZOBRIST_KEYS[Self::CASTLING_OFFSET + i])
    }

    pub fn en_passant_hash(ep_target: Option<Square>) -> Hash {
        match ep_target {
            Some(sq) => Self::ZOBRIST_KEYS[Self::EP_FILE_OFFSET + file_of(sq)],
            None => 0,
        }
    }

    pub fn hash_position(board: &Board) -> Hash {
        let mut hash = 0u64;
        for color in [Color::White, Color::Black] {
            for (sq, piece) in board.pieces_of(color) {
                hash ^= Self::hash_for_piece_sq(piece, sq)
            }
        }
        hash ^= Self::side_to_move_hash(board.side_to_move());
        hash ^= Self::castling_rights_hash(board.castling_rights());
        hash ^= Self::en_passant_hash(board.en_passant_target().filter(|ep| Self::ep_capturable(board, *ep)));
        hash
    }

    // An en passant square nobody can capture on does not distinguish positions
    fn ep_capturable(board: &Board, ep: Square) -> bool {
        let side = board.side_to_move();
        [-1, 1].iter().any(|file_delta| {
            offset(ep, *file_delta, -side.pawn_direction())
                .and_then(|sq| board.piece_at(sq))
                .map_or(false, |p| p.piece_type == PieceType::Pawn && p.color == side)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distinct_features_use_distinct_keys() {
        let wp = Piece::new(PieceType::Pawn, Color::White);
        let bp = Piece::new(PieceType::Pawn, Color::Black);
        assert_ne!(ZobristHasher::hash_for_piece_sq(wp, 12), ZobristHasher::hash_for_piece_sq(bp, 12));
        assert_ne!(ZobristHasher::hash_for_piece_sq(wp, 12), ZobristHasher::hash_for_piece_sq(wp, 13));
        assert_eq!(ZobristHasher::side_to_move_hash(Color::White), 0);
        assert_eq!(ZobristHasher::castling_rights_hash(CastlingRights::NONE), 0);
        assert_ne!(ZobristHasher::castling_rights_hash(CastlingRights::new()), 0);
    }

    #[test]
    fn moved_flag_does_not_change_identity() {
        let mut moved = Piece::new(PieceType::Rook, Color::Black);
        moved.moved = true;
        assert_eq!(
            ZobristHasher::hash_for_piece_sq(moved, 63),
            ZobristHasher::hash_for_piece_sq(Piece::new(PieceType::Rook, Color::Black), 63)
        );
    }
}
