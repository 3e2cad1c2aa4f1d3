use crate::castling::{CastleSide, CastlingRights};
use crate::piece::Color::{Black, White};
use crate::piece::PieceType::{Bishop, King, Knight, Pawn, Queen, Rook};
use crate::piece::{Color, Piece, PieceType};
use crate::r#move::Move;
use crate::square::{file_of, from_coords, rank_of, square_representation, Square};
use crate::zob_hash::{Hash, ZobristHasher};
use std::fmt::{Display, Formatter};

/// The full position: 64 cells plus the metadata FEN carries.
/// Cloning a board never shares storage with the original.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    pieces: [Option<Piece>; 64],
    side_to_move: Color,
    castling_rights: CastlingRights,
    ep_target: Option<Square>,
    halfmove_clock: u32,
    fullmove_number: u32,
}

impl Default for Board {
    fn default() -> Self {
        Board::empty()
    }
}

impl Board {
    /// A board without any piece, white to move and no castling rights
    pub fn empty() -> Board {
        Board {
            pieces: [None; 64],
            side_to_move: White,
            castling_rights: CastlingRights::NONE,
            ep_target: None,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }

    pub fn starting_position() -> Board {
        const BACK_RANK: [PieceType; 8] = [Rook, Knight, Bishop, Queen, King, Bishop, Knight, Rook];
        let mut board = Board::empty();
        for (file, piece_type) in BACK_RANK.iter().enumerate() {
            for color in [White, Black] {
                board.set(from_coords(file, color.back_rank()), Some(Piece::new(*piece_type, color)));
                board.set(from_coords(file, color.pawn_home_rank()), Some(Piece::new(Pawn, color)));
            }
        }
        board.castling_rights = CastlingRights::new();
        board
    }

    /*
    CELLS
     */
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.pieces[sq]
    }

    /// Overwrites a cell, returning what stood there
    pub fn set(&mut self, sq: Square, piece: Option<Piece>) -> Option<Piece> {
        std::mem::replace(&mut self.pieces[sq], piece)
    }

    pub fn is_empty(&self, sq: Square) -> bool {
        self.pieces[sq].is_none()
    }

    pub fn color_on(&self, sq: Square) -> Option<Color> {
        self.pieces[sq].map(|p| p.color)
    }

    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.pieces
            .iter()
            .position(|p| matches!(p, Some(Piece { piece_type: King, color: c, .. }) if *c == color))
    }

    /// All pieces of a color along with their squares, in square order
    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.pieces
            .iter()
            .enumerate()
            .filter_map(move |(sq, p)| p.filter(|p| p.color == color).map(|p| (sq, p)))
    }

    pub fn count(&self, piece_type: PieceType, color: Color) -> usize {
        self.pieces_of(color).filter(|(_, p)| p.piece_type == piece_type).count()
    }

    /*
    METADATA
     */
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }
    pub fn castling_rights(&self) -> CastlingRights {
        self.castling_rights
    }
    pub fn en_passant_target(&self) -> Option<Square> {
        self.ep_target
    }
    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }
    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }

    pub fn set_side_to_move(&mut self, color: Color) {
        self.side_to_move = color
    }
    pub fn set_castling_rights(&mut self, rights: CastlingRights) {
        self.castling_rights = rights
    }
    pub fn set_en_passant_target(&mut self, target: Option<Square>) {
        self.ep_target = target
    }
    pub fn set_clocks(&mut self, halfmove_clock: u32, fullmove_number: u32) {
        self.halfmove_clock = halfmove_clock;
        self.fullmove_number = fullmove_number;
    }

    pub fn hash(&self) -> Hash {
        ZobristHasher::hash_position(self)
    }

    /// Plays a move on the board, returning the captured piece if any.
    /// Legality is not checked here: the move is expected to come from the move generator,
    /// an origin square without a piece is a broken invariant and panics.
    pub fn make(&mut self, mv: Move) -> Option<Piece> {
        let mut moved_piece = self.pieces[mv.from]
            .take()
            .unwrap_or_else(|| panic!("no piece to move for {}", mv));
        let side = moved_piece.color;

        let captured = if mv.is_en_passant {
            self.pieces[from_coords(file_of(mv.to), rank_of(mv.from))].take()
        } else {
            self.pieces[mv.to].take()
        };

        if moved_piece.piece_type == King {
            self.castling_rights.uncastle(side);
        }
        for sq in [mv.from, mv.to] {
            if let Some((color, castle_side)) = CastleSide::from_rook_square(sq) {
                self.castling_rights.revoke(color, castle_side);
            }
        }

        if let Some(castle_side) = mv.is_castle {
            let mut rook = self.pieces[castle_side.rook_origin(side)]
                .take()
                .unwrap_or_else(|| panic!("castling without a rook for {}", side));
            rook.moved = true;
            self.pieces[castle_side.rook_target(side)] = Some(rook);
        }

        if let Some(promote_to) = mv.promotion {
            moved_piece.piece_type = promote_to;
        }
        moved_piece.moved = true;

        let is_pawn_move = mv.promotion.is_some() || moved_piece.piece_type == Pawn;
        self.ep_target = if is_pawn_move && rank_of(mv.from).abs_diff(rank_of(mv.to)) == 2 {
            Some((mv.from + mv.to) / 2)
        } else {
            None
        };
        self.pieces[mv.to] = Some(moved_piece);

        if is_pawn_move || captured.is_some() {
            self.halfmove_clock = 0
        } else {
            self.halfmove_clock += 1
        }
        if side == Black {
            self.fullmove_number += 1
        }
        self.side_to_move = side.opposite();

        captured
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let ranks: Vec<String> = (0..8)
            .rev()
            .map(|rank| {
                (0..8)
                    .map(|file| match self.pieces[from_coords(file, rank)] {
                        None => String::from(". "),
                        Some(p) => p.to_string() + " ",
                    })
                    .collect()
            })
            .collect();

        let ep = self.ep_target.and_then(square_representation).unwrap_or_else(|| String::from("-"));
        let side_info = [
            format!("side to move: {}", self.side_to_move),
            format!("castling_rights: {}", self.castling_rights),
            format!("en passant: {}", ep),
            format!("halfmove clock: {}", self.halfmove_clock),
            format!("fullmove number: {}", self.fullmove_number),
            format!("hash: {:#0x}", self.hash()),
        ];

        for (i, rank) in ranks.iter().enumerate() {
            match i.checked_sub(1).and_then(|j| side_info.get(j)) {
                Some(info) => writeln!(f, "{} {}  {}", 8 - i, rank, info)?,
                None => writeln!(f, "{} {}", 8 - i, rank)?,
            }
        }
        write!(f, "  a b c d e f g h")
    }
}
