use crate::piece::Color;
use crate::piece::Color::{Black, White};
use crate::square::Square;
use std::fmt::{Display, Formatter};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum CastleSide {
    Kingside,
    Queenside,
}

impl CastleSide {
    fn rank_offset(color: Color) -> Square {
        if color == White { 0 } else { 56 }
    }

    pub fn king_origin(color: Color) -> Square {
        4 + Self::rank_offset(color)
    }
    pub fn king_target(&self, color: Color) -> Square {
        Self::rank_offset(color) + if *self == CastleSide::Kingside { 6 } else { 2 }
    }
    pub fn rook_origin(&self, color: Color) -> Square {
        Self::rank_offset(color) + if *self == CastleSide::Kingside { 7 } else { 0 }
    }
    pub fn rook_target(&self, color: Color) -> Square {
        Self::rank_offset(color) + if *self == CastleSide::Kingside { 5 } else { 3 }
    }

    /// Squares between king and rook, all of which must be empty
    pub fn empty_squares(&self, color: Color) -> Vec<Square> {
        let offset = Self::rank_offset(color);
        match self {
            CastleSide::Kingside => vec![offset + 5, offset + 6],
            CastleSide::Queenside => vec![offset + 1, offset + 2, offset + 3],
        }
    }

    /// Squares the king stands on or crosses, none of which may be attacked
    pub fn king_path(&self, color: Color) -> [Square; 3] {
        let offset = Self::rank_offset(color);
        match self {
            CastleSide::Kingside => [offset + 4, offset + 5, offset + 6],
            CastleSide::Queenside => [offset + 4, offset + 3, offset + 2],
        }
    }

    /// The castling move a rook standing on its home square is tied to, if any
    pub fn from_rook_square(sq: Square) -> Option<(Color, CastleSide)> {
        match sq {
            0 => Some((White, CastleSide::Queenside)),
            7 => Some((White, CastleSide::Kingside)),
            56 => Some((Black, CastleSide::Queenside)),
            63 => Some((Black, CastleSide::Kingside)),
            _ => None,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialOrd, PartialEq, Eq, Hash)]
pub struct CastlingRights(u8);

impl CastlingRights {
    pub const NONE: CastlingRights = CastlingRights(0);

    pub fn new() -> CastlingRights {
        CastlingRights(0b1111)
    }

    /// Parses the FEN castling field, returning None on anything but
    /// `-` or a non-repeating subset of `KQkq`
    /// Parses the FEN castling field. Letters must appear in `KQkq` order, without repeats.
    pub fn from_str(s: &str) -> Option<CastlingRights> {
        if s == "-" {
            return Some(Self::NONE);
        }
        if s.is_empty() {
            return None;
        }
        let mut res = CastlingRights(0);
        for c in s.chars() {
            let bit = match c {
                'K' => 0b1000,
                'Q' => 0b0100,
                'k' => 0b0010,
                'q' => 0b0001,
                _ => return None,
            };
            // A letter already seen, or one that should have come later
            if res.0 & (bit | (bit - 1)) != 0 {
                return None;
            }
            res.0 |= bit
        }
        Some(res)
    }

    fn bit(side: Color, castle_side: CastleSide) -> u8 {
        match (side, castle_side) {
            (White, CastleSide::Kingside) => 0b1000,
            (White, CastleSide::Queenside) => 0b0100,
            (Black, CastleSide::Kingside) => 0b0010,
            (Black, CastleSide::Queenside) => 0b0001,
        }
    }

    /// Returns the (kingside, queenside) castling rights of a given color
    pub fn get(&self, side: Color) -> (bool, bool) {
        (self.has(side, CastleSide::Kingside), self.has(side, CastleSide::Queenside))
    }
    pub fn has(&self, side: Color, castle_side: CastleSide) -> bool {
        self.0 & Self::bit(side, castle_side) != 0
    }
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }
    /// Marks the given side as unable to castle
    pub fn uncastle(&mut self, side: Color) {
        self.0 &= match side {
            White => 0b0011,
            _ => 0b1100,
        }
    }
    /// Marks the given side as unable to castle on one wing
    pub fn revoke(&mut self, side: Color, castle_side: CastleSide) {
        self.0 &= !Self::bit(side, castle_side)
    }
}

impl Display for CastlingRights {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.is_empty() {
            return write!(f, "-");
        }
        let (wking, wqueen) = self.get(White);
        let (bking, bqueen) = self.get(Black);
        write!(
            f,
            "{}{}{}{}",
            if wking { "K" } else { "" },
            if wqueen { "Q" } else { "" },
            if bking { "k" } else { "" },
            if bqueen { "q" } else { "" }
        )
    }
}

impl Default for CastlingRights {
    fn default() -> Self {
        Self::new()
    }
}
