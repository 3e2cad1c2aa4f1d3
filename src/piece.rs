use crate::piece::Color::{Black, White};
use crate::piece::PieceType::{Bishop, King, Knight, Pawn, Queen, Rook};
use std::fmt::{Display, Formatter};

/// A piece standing on the board. `moved` tracks double push eligibility for pawns
/// and castling eligibility for kings and rooks; it is meaningless for other species.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Piece {
    pub piece_type: PieceType,
    pub color: Color,
    pub moved: bool,
}

#[derive(Debug, Copy, Clone, PartialOrd, Ord, PartialEq, Eq, Hash)]
pub enum PieceType {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

pub const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (1, 2), (2, 1), (2, -1), (1, -2),
    (-1, -2), (-2, -1), (-2, 1), (-1, 2),
];
pub const KING_OFFSETS: [(i8, i8); 8] = [
    (0, 1), (1, 1), (1, 0), (1, -1),
    (0, -1), (-1, -1), (-1, 0), (-1, 1),
];
pub const DIAGONAL_DIRECTIONS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, -1), (-1, 1)];
pub const CARDINAL_DIRECTIONS: [(i8, i8); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];

impl PieceType {
    pub const PROMOTION_TARGETS: [PieceType; 4] = [Knight, Bishop, Rook, Queen];

    /// Single step offsets for leapers, ray directions for sliders.
    /// Pawns are color dependent and have no entry here.
    pub fn geometry(&self) -> &'static [(i8, i8)] {
        match self {
            Pawn => &[],
            Knight => &KNIGHT_OFFSETS,
            Bishop => &DIAGONAL_DIRECTIONS,
            Rook => &CARDINAL_DIRECTIONS,
            Queen | King => &KING_OFFSETS,
        }
    }

    /// Material value of the species, kings are priceless
    pub fn value(&self) -> u32 {
        match self {
            Pawn => 1,
            Knight | Bishop => 3,
            Rook => 5,
            Queen => 9,
            King => 0,
        }
    }

    pub fn from_char(c: char) -> Option<PieceType> {
        match c.to_ascii_lowercase() {
            'p' => Some(Pawn),
            'n' => Some(Knight),
            'b' => Some(Bishop),
            'r' => Some(Rook),
            'q' => Some(Queen),
            'k' => Some(King),
            _ => None,
        }
    }

    pub fn to_char(&self) -> char {
        match self {
            Pawn => 'p',
            Knight => 'n',
            Bishop => 'b',
            Rook => 'r',
            Queen => 'q',
            King => 'k',
        }
    }
}
impl Display for PieceType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

#[derive(Debug, Copy, Clone, PartialOrd, Ord, PartialEq, Eq, Hash)]
pub enum Color {
    Black,
    White,
}
impl Color {
    pub fn opposite(&self) -> Color {
        match self {
            White => Black,
            Black => White,
        }
    }

    /// Rank delta of a single pawn push
    pub fn pawn_direction(&self) -> i8 {
        match self {
            White => 1,
            Black => -1,
        }
    }
    pub fn pawn_home_rank(&self) -> usize {
        match self {
            White => 1,
            Black => 6,
        }
    }
    pub fn back_rank(&self) -> usize {
        match self {
            White => 0,
            Black => 7,
        }
    }
    pub fn promotion_rank(&self) -> usize {
        self.opposite().back_rank()
    }
}
impl Display for Color {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", if self == &Black { "b" } else { "w" })
    }
}

impl Piece {
    pub fn new(piece_type: PieceType, color: Color) -> Piece {
        Piece { piece_type, color, moved: false }
    }

    pub fn from_char(c: char) -> Option<Piece> {
        let piece_type = PieceType::from_char(c)?;
        let color = if c.is_lowercase() { Black } else { White };
        Some(Piece::new(piece_type, color))
    }

    pub fn to_char(&self) -> char {
        let c = self.piece_type.to_char();
        if self.color == White { c.to_ascii_uppercase() } else { c }
    }
}

impl Display for Piece {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letters_encode_color_by_case() {
        let p = Piece::from_char('N').unwrap();
        assert_eq!(p, Piece::new(Knight, White));
        assert_eq!(Piece::from_char('q').unwrap().color, Black);
        assert_eq!(Piece::from_char('x'), None);
        for c in "pnbrqkPNBRQK".chars() {
            assert_eq!(Piece::from_char(c).unwrap().to_char(), c);
        }
    }

    #[test]
    fn pawn_ranks_mirror() {
        assert_eq!(White.pawn_home_rank(), 1);
        assert_eq!(Black.pawn_home_rank(), 6);
        assert_eq!(White.promotion_rank(), 7);
        assert_eq!(Black.promotion_rank(), 0);
    }
}
