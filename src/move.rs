use crate::castling::CastleSide;
use crate::piece::{Color, PieceType};
use crate::square::{parse_square, square_representation, Square};
use regex::Regex;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use std::sync::OnceLock;

/// A fully described move. Moves are plain values and never borrow from a board,
/// so they stay valid (if not necessarily legal) across positions.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<PieceType>,
    pub is_en_passant: bool,
    pub is_castle: Option<CastleSide>,
}

impl Move {
    pub fn new_quiet(from: Square, to: Square) -> Move {
        Move { from, to, promotion: None, is_en_passant: false, is_castle: None }
    }
    pub fn new_en_passant(from: Square, to: Square) -> Move {
        Move { is_en_passant: true, ..Self::new_quiet(from, to) }
    }
    pub fn new_promotion(from: Square, to: Square, promote_to: PieceType) -> Move {
        Move { promotion: Some(promote_to), ..Self::new_quiet(from, to) }
    }
    pub fn all_promotions(from: Square, to: Square) -> [Move; 4] {
        PieceType::PROMOTION_TARGETS.map(|p| Self::new_promotion(from, to, p))
    }
    pub fn new_castle(color: Color, side: CastleSide) -> Move {
        Move {
            is_castle: Some(side),
            ..Self::new_quiet(CastleSide::king_origin(color), side.king_target(color))
        }
    }

    /// Whether this move answers the given request
    pub fn matches(&self, request: &MoveRequest) -> bool {
        self.from == request.from && self.to == request.to && self.promotion == request.promotion
    }

    /// Ordering key for callers needing a deterministic move order
    pub fn sort_key(&self) -> (Square, Square, Option<PieceType>) {
        (self.from, self.to, self.promotion)
    }
}

/// Long algebraic notation, e.g. `e2e4` or `e7e8q`
impl Display for Move {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let o = square_representation(self.from).unwrap_or_else(|| String::from("**"));
        let t = square_representation(self.to).unwrap_or_else(|| String::from("**"));
        if let Some(p) = self.promotion {
            write!(f, "{}{}{}", o, t, p)
        } else {
            write!(f, "{}{}", o, t)
        }
    }
}

/// What a player asks for: origin, destination and, for promotions, the new species.
/// The engine resolves it against the legal moves to recover the special move flags.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct MoveRequest {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<PieceType>,
}

impl MoveRequest {
    pub fn new(from: Square, to: Square, promotion: Option<PieceType>) -> MoveRequest {
        MoveRequest { from, to, promotion }
    }

    /// Parses a move request such as `e2 e4`, `e2e4`, `e7 e8 q` or `e7e8=Q`
    /// ```
    /// use rookery::r#move::MoveRequest;
    /// use rookery::piece::PieceType;
    /// assert_eq!(MoveRequest::parse("e2 e4"), Some(MoveRequest::new(12, 28, None)));
    /// assert_eq!(MoveRequest::parse("E7E8=q"), Some(MoveRequest::new(52, 60, Some(PieceType::Queen))));
    /// assert_eq!(MoveRequest::parse("e2 e9"), None);
    /// assert_eq!(MoveRequest::parse("e7 e8 k"), None);
    /// ```
    pub fn parse(s: &str) -> Option<MoveRequest> {
        let captures = Self::request_regex().captures(s)?;
        let lowered = |i: usize| captures.get(i).map(|m| m.as_str().to_ascii_lowercase());
        let from = parse_square(&lowered(1)?)?;
        let to = parse_square(&lowered(2)?)?;
        let promotion = match lowered(3) {
            Some(p) => Some(PieceType::from_char(p.chars().next()?)?),
            None => None,
        };
        Some(MoveRequest { from, to, promotion })
    }

    fn request_regex() -> &'static Regex {
        static REQUEST_REGEX: OnceLock<Regex> = OnceLock::new();
        REQUEST_REGEX.get_or_init(|| {
            Regex::new(r"^\s*(?i)([a-h][1-8])[\s-]*([a-h][1-8])\s*=?\s*([nbrq])?\s*$").unwrap()
        })
    }
}

impl FromStr for MoveRequest {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MoveRequest::parse(s).ok_or(())
    }
}

impl From<Move> for MoveRequest {
    fn from(mv: Move) -> Self {
        MoveRequest { from: mv.from, to: mv.to, promotion: mv.promotion }
    }
}

impl Display for MoveRequest {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", Move::new_quiet(self.from, self.to))?;
        if let Some(p) = self.promotion {
            write!(f, "{}", p)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::piece::Color::{Black, White};

    #[test]
    fn display_in_long_algebraic() {
        assert_eq!(Move::new_quiet(12, 28).to_string(), "e2e4");
        assert_eq!(Move::new_promotion(52, 60, PieceType::Knight).to_string(), "e7e8n");
        assert_eq!(Move::new_castle(White, CastleSide::Kingside).to_string(), "e1g1");
        assert_eq!(Move::new_castle(Black, CastleSide::Queenside).to_string(), "e8c8");
    }

    #[test]
    fn request_formats() {
        let expected = MoveRequest::new(12, 28, None);
        for s in ["e2 e4", "e2e4", " e2-e4 ", "E2 E4"] {
            assert_eq!(MoveRequest::parse(s), Some(expected), "{}", s);
        }
        assert_eq!(
            MoveRequest::parse("a2 a1 n"),
            Some(MoveRequest::new(8, 0, Some(PieceType::Knight)))
        );
        assert_eq!(MoveRequest::parse("e2"), None);
        assert_eq!(MoveRequest::parse("e2 e4 e5"), None);
        assert_eq!(MoveRequest::parse("i2 e4"), None);
    }

    #[test]
    fn request_matching() {
        let promo = Move::new_promotion(52, 60, PieceType::Rook);
        assert!(promo.matches(&MoveRequest::new(52, 60, Some(PieceType::Rook))));
        assert!(!promo.matches(&MoveRequest::new(52, 60, None)));
        assert_eq!(MoveRequest::from(promo).to_string(), "e7e8r");
    }
}
