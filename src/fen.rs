use crate::attacks::in_check;
use crate::board::Board;
use crate::castling::{CastleSide, CastlingRights};
use crate::piece::Color::{Black, White};
use crate::piece::{Color, Piece, PieceType};
use crate::square::{from_coords, offset, parse_square, rank_of, square_representation, Square};
use log::debug;
use thiserror::Error;

pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FenError {
    #[error("expected 6 space separated fields, found {0}")]
    WrongFieldCount(usize),
    #[error("expected 8 ranks in the piece placement, found {0}")]
    WrongRankCount(usize),
    #[error("invalid piece letter '{0}'")]
    InvalidPieceLetter(char),
    #[error("rank {rank} describes {files} files instead of 8")]
    BadRankLength { rank: usize, files: usize },
    #[error("rank {0} has two empty square counts in a row")]
    AdjacentDigits(usize),
    #[error("invalid side to move '{0}', expected 'w' or 'b'")]
    BadSideToMove(String),
    #[error("invalid castling rights '{0}'")]
    BadCastlingRights(String),
    #[error("invalid en passant target '{0}'")]
    BadEnPassant(String),
    #[error("invalid halfmove clock '{0}'")]
    BadHalfmoveClock(String),
    #[error("invalid fullmove number '{0}'")]
    BadFullmoveNumber(String),
    #[error("no {0:?} king on the board")]
    MissingKing(Color),
    #[error("more than one {0:?} king on the board")]
    TooManyKings(Color),
    #[error("{0:?} has more pieces than a game allows")]
    TooManyPieces(Color),
    #[error("pawn on a back rank at {0}")]
    PawnOnBackRank(String),
    #[error("the side not to move is in check")]
    OpponentInCheck,
}

/// Parses a FEN string into a board.
/// Per-piece `moved` flags are derived from the position: pawns off their starting rank
/// have moved, kings and rooks are unmoved only when a castling right still relies on them.
pub fn parse(fen: &str) -> Result<Board, FenError> {
    let fields: Vec<&str> = fen.split(' ').collect();
    let [placement, side, castling, ep, halfmove, fullmove] = fields[..] else {
        return Err(FenError::WrongFieldCount(fields.len()));
    };

    let mut board = Board::empty();
    parse_placement(&mut board, placement)?;

    board.set_side_to_move(match side {
        "w" => White,
        "b" => Black,
        _ => return Err(FenError::BadSideToMove(side.to_owned())),
    });

    let rights = CastlingRights::from_str(castling)
        .ok_or_else(|| FenError::BadCastlingRights(castling.to_owned()))?;
    board.set_castling_rights(rights);

    board.set_en_passant_target(parse_en_passant(&board, ep)?);

    let halfmove_clock = halfmove
        .parse::<u32>()
        .map_err(|_| FenError::BadHalfmoveClock(halfmove.to_owned()))?;
    let fullmove_number = match fullmove.parse::<u32>() {
        Ok(n) if n > 0 => n,
        _ => return Err(FenError::BadFullmoveNumber(fullmove.to_owned())),
    };
    board.set_clocks(halfmove_clock, fullmove_number);

    validate_material(&board)?;
    mark_moved_pieces(&mut board, castling)?;
    if in_check(&board, board.side_to_move().opposite()) {
        return Err(FenError::OpponentInCheck);
    }

    debug!("loaded position {}", fen);
    Ok(board)
}

fn parse_placement(board: &mut Board, placement: &str) -> Result<(), FenError> {
    let ranks: Vec<&str> = placement.split('/').collect();
    if ranks.len() != 8 {
        return Err(FenError::WrongRankCount(ranks.len()));
    }

    for (i, rank_str) in ranks.iter().enumerate() {
        let rank = 7 - i;
        let mut files = 0usize;
        let mut after_digit = false;
        for c in rank_str.chars() {
            match c {
                '1'..='8' if after_digit => return Err(FenError::AdjacentDigits(rank + 1)),
                '1'..='8' => {
                    files += c as usize - '0' as usize;
                    after_digit = true;
                }
                _ => {
                    after_digit = false;
                    let piece = Piece::from_char(c).ok_or(FenError::InvalidPieceLetter(c))?;
                    if files < 8 {
                        board.set(from_coords(files, rank), Some(piece));
                    }
                    files += 1;
                }
            }
        }
        if files != 8 {
            return Err(FenError::BadRankLength { rank: rank + 1, files });
        }
    }
    Ok(())
}

// The target must sit right behind a pawn of the side that just moved,
// on the rank that pawn skipped, with nothing standing on it
fn parse_en_passant(board: &Board, ep: &str) -> Result<Option<Square>, FenError> {
    if ep == "-" {
        return Ok(None);
    }
    let bad = || FenError::BadEnPassant(ep.to_owned());
    if ep.len() != 2 {
        return Err(bad());
    }
    let target = parse_square(ep).ok_or_else(bad)?;

    let pusher = board.side_to_move().opposite();
    let skipped_rank = (pusher.pawn_home_rank() as i8 + pusher.pawn_direction()) as usize;
    let pawn_square = offset(target, 0, pusher.pawn_direction()).ok_or_else(bad)?;
    let pawn_in_place = is_piece(board, pawn_square, PieceType::Pawn, pusher);
    if rank_of(target) != skipped_rank || !board.is_empty(target) || !pawn_in_place {
        return Err(bad());
    }
    Ok(Some(target))
}

fn is_piece(board: &Board, sq: Square, piece_type: PieceType, color: Color) -> bool {
    board.piece_at(sq).map_or(false, |p| p.piece_type == piece_type && p.color == color)
}

fn validate_material(board: &Board) -> Result<(), FenError> {
    for color in [White, Black] {
        match board.count(PieceType::King, color) {
            0 => return Err(FenError::MissingKing(color)),
            1 => (),
            _ => return Err(FenError::TooManyKings(color)),
        }
        if board.pieces_of(color).count() > 16 || board.count(PieceType::Pawn, color) > 8 {
            return Err(FenError::TooManyPieces(color));
        }
    }
    for color in [White, Black] {
        if let Some((sq, _)) = board
            .pieces_of(color)
            .find(|(sq, p)| p.piece_type == PieceType::Pawn && (rank_of(*sq) == 0 || rank_of(*sq) == 7))
        {
            return Err(FenError::PawnOnBackRank(square_representation(sq).unwrap_or_default()));
        }
    }
    Ok(())
}

// Fails when a castling right has no king or rook to back it
fn mark_moved_pieces(board: &mut Board, castling: &str) -> Result<(), FenError> {
    let rights = board.castling_rights();
    for color in [White, Black] {
        let pieces: Vec<(Square, Piece)> = board.pieces_of(color).collect();
        for (sq, mut piece) in pieces {
            piece.moved = match piece.piece_type {
                PieceType::Pawn => rank_of(sq) != color.pawn_home_rank(),
                PieceType::King => {
                    let (kingside, queenside) = rights.get(color);
                    !(sq == CastleSide::king_origin(color) && (kingside || queenside))
                }
                PieceType::Rook => match CastleSide::from_rook_square(sq) {
                    Some((rook_color, side)) if rook_color == color => !rights.has(color, side),
                    _ => true,
                },
                _ => false,
            };
            board.set(sq, Some(piece));
        }

        for side in [CastleSide::Kingside, CastleSide::Queenside] {
            if !rights.has(color, side) {
                continue;
            }
            let king_ok = is_piece(board, CastleSide::king_origin(color), PieceType::King, color);
            let rook_ok = is_piece(board, side.rook_origin(color), PieceType::Rook, color);
            if !king_ok || !rook_ok {
                return Err(FenError::BadCastlingRights(castling.to_owned()));
            }
        }
    }
    Ok(())
}

/// Renders a board as a FEN string
pub fn render(board: &Board) -> String {
    let mut fen = String::new();

    for rank in (0..8).rev() {
        let mut empty_counter = 0;
        for file in 0..8 {
            match board.piece_at(from_coords(file, rank)) {
                Some(p) => {
                    if empty_counter != 0 {
                        fen.push_str(&empty_counter.to_string())
                    }
                    empty_counter = 0;
                    fen.push(p.to_char())
                }
                None => empty_counter += 1,
            }
        }
        if empty_counter != 0 {
            fen.push_str(&empty_counter.to_string())
        }
        if rank != 0 {
            fen.push('/')
        }
    }

    let ep = board
        .en_passant_target()
        .and_then(square_representation)
        .unwrap_or_else(|| String::from("-"));
    format!(
        "{} {} {} {} {} {}",
        fen,
        board.side_to_move(),
        board.castling_rights(),
        ep,
        board.halfmove_clock(),
        board.fullmove_number()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starting_position_round_trips() {
        let board = parse(STARTING_FEN).unwrap();
        assert_eq!(board, Board::starting_position());
        assert_eq!(render(&board), STARTING_FEN);
    }

    #[test]
    fn well_formed_strings_round_trip() {
        for fen in [
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
            "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
            "rnbqkbnr/pppp1ppp/8/4p3/4P3/8/PPPP1PPP/RNBQKBNR w KQkq e6 0 2",
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1",
            "r4rk1/1pp1qppp/p1np1n2/2b1p1B1/2B1P1b1/P1NP1N2/1PP1QPPP/R4RK1 w - - 12 10",
            "4k3/8/8/8/8/8/8/4K2R w K - 99 180",
        ] {
            assert_eq!(render(&parse(fen).unwrap()), fen);
        }
    }

    #[test]
    fn derives_moved_flags() {
        let board = parse("r3k2r/8/8/8/4P3/8/3P4/R3K2R w Kq - 0 1").unwrap();
        // e4 pawn moved, d2 pawn did not
        assert!(board.piece_at(28).unwrap().moved);
        assert!(!board.piece_at(11).unwrap().moved);
        // white keeps kingside only
        assert!(!board.piece_at(4).unwrap().moved);
        assert!(!board.piece_at(7).unwrap().moved);
        assert!(board.piece_at(0).unwrap().moved);
        assert!(!board.piece_at(56).unwrap().moved);
        assert!(board.piece_at(63).unwrap().moved);
    }

    #[test]
    fn malformed_inputs_are_rejected() {
        let cases = [
            ("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0", FenError::WrongFieldCount(5)),
            ("rnbqkbnr/pppppppp/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1", FenError::WrongRankCount(7)),
            ("rnbqkbnr/ppppxppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1", FenError::InvalidPieceLetter('x')),
            (
                "rnbqkbnr/ppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
                FenError::BadRankLength { rank: 7, files: 7 },
            ),
            (
                "rnbqkbnr/pppppppp1/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
                FenError::BadRankLength { rank: 7, files: 9 },
            ),
            ("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR x KQkq - 0 1", FenError::BadSideToMove("x".into())),
            ("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQxq - 0 1", FenError::BadCastlingRights("KQxq".into())),
            ("r3k2r/8/8/8/8/8/8/R3K2R w kqKQ - 0 1", FenError::BadCastlingRights("kqKQ".into())),
            ("rnbqkbnr/pppppppp/44/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1", FenError::AdjacentDigits(6)),
            ("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w  KQkq - 0 1", FenError::WrongFieldCount(7)),
            ("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1 ", FenError::WrongFieldCount(7)),
            ("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq e4 0 1", FenError::BadEnPassant("e4".into())),
            ("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - -1 1", FenError::BadHalfmoveClock("-1".into())),
            ("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 0", FenError::BadFullmoveNumber("0".into())),
            ("rnbq1bnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQ - 0 1", FenError::MissingKing(Black)),
            ("4k3/8/8/8/8/8/8/3KK3 w - - 0 1", FenError::TooManyKings(White)),
            ("4k2P/8/8/8/8/8/8/4K3 w - - 0 1", FenError::PawnOnBackRank("h8".into())),
            ("4k3/8/8/8/8/8/8/4K3 w K - 0 1", FenError::BadCastlingRights("K".into())),
            ("4k3/8/8/8/8/8/8/4K2r b - - 0 1", FenError::OpponentInCheck),
        ];
        for (fen, expected) in cases {
            assert_eq!(parse(fen), Err(expected), "{}", fen);
        }
    }

    #[test]
    fn en_passant_needs_the_skipping_pawn() {
        assert!(parse("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR b KQkq e3 0 1").is_err());
        assert_eq!(
            parse("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1")
                .unwrap()
                .en_passant_target(),
            Some(20)
        );
    }
}
