/// Board squares are indexed rank-major from a1 (0) to h8 (63)
pub type Square = usize;

pub fn rank_of(sq: Square) -> usize {
    sq / 8
}
pub fn file_of(sq: Square) -> usize {
    sq % 8
}
pub fn from_coords(file: usize, rank: usize) -> Square {
    rank * 8 + file
}

/// Moves a square by the given file and rank deltas, returning None
/// when the result falls off the board
/// ```
/// use rookery::square::offset;
/// assert_eq!(offset(0, 1, 2), Some(17));
/// assert_eq!(offset(7, 1, 0), None);
/// assert_eq!(offset(60, 0, -1), Some(52));
/// ```
pub fn offset(sq: Square, file_delta: i8, rank_delta: i8) -> Option<Square> {
    let file = file_of(sq) as i8 + file_delta;
    let rank = rank_of(sq) as i8 + rank_delta;
    if (0..8).contains(&file) && (0..8).contains(&rank) {
        Some(from_coords(file as usize, rank as usize))
    } else {
        None
    }
}

/// Parses a square from a given string slice,
/// only caring that the first two characters form a valid square representation
/// ```
/// use rookery::square::parse_square;
/// assert_eq!(parse_square("e4"), Some(28));
/// assert_eq!(parse_square("d2someotherstuff"), Some(11));
/// assert_eq!(parse_square("randoma1stuff"), None);
/// assert_eq!(parse_square("k9"), None);
/// ```
pub fn parse_square(s: &str) -> Option<Square> {
    let mut chars_iter = s.chars();
    let file = match chars_iter.next()? {
        c @ 'a'..='h' => c as usize - 'a' as usize,
        _ => return None,
    };
    let rank = match chars_iter.next()?.to_digit(10) {
        Some(i) if (1..=8).contains(&i) => i as usize - 1,
        _ => return None,
    };
    Some(from_coords(file, rank))
}

/// Returns the string representation of a square
/// ```
/// use rookery::square::square_representation;
/// assert_eq!(square_representation(28), Some(String::from("e4")));
/// assert_eq!(square_representation(11), Some(String::from("d2")));
/// assert_eq!(square_representation(65), None);
/// ```
pub fn square_representation(sq: Square) -> Option<String> {
    if !is_valid(sq) {
        return None;
    }
    let rank = ('1'..='8').nth(rank_of(sq))?;
    let file = ('a'..='h').nth(file_of(sq))?;
    let mut repr = file.to_string();
    repr.push(rank);
    Some(repr)
}

/// Checks whether a given square is in bounds (0..64) or not
/// ```
/// use rookery::square::is_valid;
/// assert!(is_valid(12));
/// assert!(!is_valid(64));
/// ```
pub fn is_valid(sq: Square) -> bool {
    sq < 64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corners_round_trip() {
        for (name, sq) in [("a1", 0), ("h1", 7), ("a8", 56), ("h8", 63)] {
            assert_eq!(parse_square(name), Some(sq));
            assert_eq!(square_representation(sq).as_deref(), Some(name));
        }
    }

    #[test]
    fn offsets_do_not_wrap_around_files() {
        assert_eq!(offset(from_coords(0, 3), -1, 0), None);
        assert_eq!(offset(from_coords(7, 3), 1, 1), None);
        assert_eq!(offset(from_coords(6, 0), 1, 2), Some(from_coords(7, 2)));
    }
}
