use crate::r#move::{Move, MoveRequest};
use crate::square::Square;
use arrayvec::ArrayVec;

// Legal positions top out at 218 moves, pseudo-legal lists stay below this as well
pub const MAX_MOVELIST_CAPACITY: usize = 256;

/// An unordered set of moves, stored inline
#[derive(Clone, Debug)]
pub struct MoveList(ArrayVec<Move, MAX_MOVELIST_CAPACITY>);
impl Default for MoveList {
    fn default() -> Self {
        MoveList(ArrayVec::new())
    }
}
impl MoveList {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn push(&mut self, m: Move) {
        self.0.push(m)
    }
    pub fn contains(&self, m: &Move) -> bool {
        self.0.contains(m)
    }

    /// Moves starting from a given square
    pub fn from_square(&self, sq: Square) -> MoveList {
        self.iter().filter(|m| m.from == sq).copied().collect()
    }

    /// The unique move answering a request, if there is exactly one
    pub fn find_request(&self, request: &MoveRequest) -> Option<Move> {
        let mut candidates = self.iter().filter(|m| m.matches(request));
        match (candidates.next(), candidates.next()) {
            (Some(m), None) => Some(*m),
            _ => None,
        }
    }

    /// The moves sorted by (from, to, promotion)
    pub fn sorted(&self) -> Vec<Move> {
        let mut moves = self.0.to_vec();
        moves.sort_by_key(Move::sort_key);
        moves
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Move> {
        self.0.iter()
    }
}
impl From<Vec<Move>> for MoveList {
    fn from(v: Vec<Move>) -> Self {
        v.into_iter().collect()
    }
}
impl FromIterator<Move> for MoveList {
    fn from_iter<I: IntoIterator<Item = Move>>(iter: I) -> Self {
        let mut mv_list = MoveList::default();
        for m in iter {
            mv_list.push(m)
        }
        mv_list
    }
}
impl std::fmt::Display for MoveList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
        let s = self
            .sorted()
            .iter()
            .map(|m| m.to_string())
            .collect::<Vec<_>>()
            .join(" ");
        write!(f, "{}", s)
    }
}
impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
impl IntoIterator for MoveList {
    type Item = Move;
    type IntoIter = arrayvec::IntoIter<Move, MAX_MOVELIST_CAPACITY>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::piece::PieceType;

    #[test]
    fn sorted_by_origin_target_promotion() {
        let list = MoveList::from(vec![
            Move::new_quiet(12, 28),
            Move::new_promotion(52, 60, PieceType::Queen),
            Move::new_quiet(12, 20),
            Move::new_promotion(52, 60, PieceType::Knight),
        ]);
        assert_eq!(list.to_string(), "e2e3 e2e4 e7e8n e7e8q");
    }

    #[test]
    fn find_request_needs_exact_promotion() {
        let list: MoveList = Move::all_promotions(52, 60).into_iter().collect();
        assert_eq!(list.find_request(&MoveRequest::new(52, 60, None)), None);
        assert_eq!(
            list.find_request(&MoveRequest::new(52, 60, Some(PieceType::Bishop))),
            Some(Move::new_promotion(52, 60, PieceType::Bishop))
        );
        assert_eq!(list.from_square(52).len(), 4);
        assert!(list.from_square(12).is_empty());
    }
}
