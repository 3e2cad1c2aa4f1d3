use crate::attacks::in_check;
use crate::board::Board;
use crate::fen::{self, FenError};
use crate::history::RepetitionLedger;
use crate::move_generator::{legal_moves, legal_moves_for};
use crate::movelist::MoveList;
use crate::piece::{Color, Piece, PieceType};
use crate::r#move::{Move, MoveRequest};
use crate::square::{file_of, is_valid, rank_of, square_representation, Square};
use crate::zob_hash::Hash;
use log::{debug, info};
use std::fmt::{Display, Formatter};
use thiserror::Error;

/// Halfmove clock value at which the fifty-move rule draws the game
pub const FIFTY_MOVE_PLIES: u32 = 100;
/// Occurrences of one position that draw the game
pub const REPETITION_COUNT: usize = 3;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    /// Still in progress, the given color is in check
    Check(Color),
    Checkmate { winner: Color },
    Stalemate,
    DrawByFiftyMove,
    DrawByRepetition,
    DrawByInsufficientMaterial,
}

impl GameStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, GameStatus::InProgress | GameStatus::Check(_))
    }
}

impl Display for GameStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            GameStatus::InProgress => write!(f, "in progress"),
            GameStatus::Check(color) => write!(f, "{:?} is in check", color),
            GameStatus::Checkmate { winner } => write!(f, "checkmate, {:?} wins", winner),
            GameStatus::Stalemate => write!(f, "draw by stalemate"),
            GameStatus::DrawByFiftyMove => write!(f, "draw by the fifty-move rule"),
            GameStatus::DrawByRepetition => write!(f, "draw by threefold repetition"),
            GameStatus::DrawByInsufficientMaterial => write!(f, "draw by insufficient material"),
        }
    }
}

fn square_name(sq: &Square) -> String {
    square_representation(*sq).unwrap_or_else(|| sq.to_string())
}

fn promotion_suffix(promotion: &Option<PieceType>) -> String {
    promotion.map(|p| p.to_string()).unwrap_or_default()
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("there is no piece on {}", square_name(.0))]
    NoPieceAtSource(Square),
    #[error("the piece on {} belongs to {found:?}, not to the side to move", square_name(.square))]
    WrongColorPiece { square: Square, found: Color },
    #[error("{}{}{} is not a legal move", square_name(.from), square_name(.to), promotion_suffix(.promotion))]
    IllegalMove { from: Square, to: Square, promotion: Option<PieceType> },
    #[error("the game is over ({0})")]
    GameAlreadyOver(GameStatus),
    #[error("cannot read a move from '{0}'")]
    BadRequest(String),
}

/// Starts a game from a FEN string, or from the standard starting position
pub fn new_game(fen: Option<&str>) -> Result<GameState, FenError> {
    let board = match fen {
        Some(f) => fen::parse(f)?,
        None => Board::starting_position(),
    };
    Ok(GameState::new(board))
}

/// A game in progress: the live board, the positions it went through and its status.
/// The board is only reachable immutably from outside, every mutation goes through `submit_move`.
pub struct GameState {
    board: Board,
    ledger: RepetitionLedger,
    status: GameStatus,
    captured: [Vec<Piece>; 2],
    clock_hook: Option<Box<dyn FnMut(Color)>>,
}

impl std::fmt::Debug for GameState {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameState")
            .field("fen", &self.export_fen())
            .field("status", &self.status)
            .field("positions", &self.ledger.len())
            .finish()
    }
}

impl Default for GameState {
    fn default() -> Self {
        GameState::new(Board::starting_position())
    }
}

impl GameState {
    pub fn new(board: Board) -> GameState {
        let mut ledger = RepetitionLedger::new();
        ledger.record(board.hash());
        let mut game = GameState {
            board,
            ledger,
            status: GameStatus::InProgress,
            captured: [vec![], vec![]],
            clock_hook: None,
        };
        game.status = game.evaluate_status();
        game
    }

    /*
    QUERIES
     */
    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// A copy of the current position, safe to hand to a renderer or an analysis thread
    pub fn snapshot(&self) -> Board {
        self.board.clone()
    }

    pub fn side_to_move(&self) -> Color {
        self.board.side_to_move()
    }

    pub fn export_fen(&self) -> String {
        fen::render(&self.board)
    }

    /// Legal moves of the side to move, empty once the game is over
    pub fn legal_moves(&self) -> MoveList {
        if self.status.is_terminal() {
            return MoveList::default();
        }
        legal_moves(&self.board, self.board.side_to_move())
    }

    /// Legal moves of the piece on a square, if it belongs to the side to move
    pub fn legal_moves_for(&self, sq: Square) -> MoveList {
        if self.status.is_terminal() || !is_valid(sq) || self.board.color_on(sq) != Some(self.board.side_to_move()) {
            return MoveList::default();
        }
        legal_moves_for(&self.board, sq)
    }

    /// Pieces captured by the given color, in capture order
    pub fn captured(&self, capturer: Color) -> &[Piece] {
        &self.captured[capturer as usize]
    }

    /// Material won by the given color
    pub fn material_score(&self, capturer: Color) -> u32 {
        self.captured(capturer).iter().map(|p| p.piece_type.value()).sum()
    }

    pub fn position_history(&self) -> &[Hash] {
        self.ledger.hashes()
    }

    /// Registers a callback run after every applied move with the color now to move,
    /// so that an external clock can switch sides. The engine itself never looks at time.
    pub fn set_clock_hook<F: FnMut(Color) + 'static>(&mut self, hook: F) {
        self.clock_hook = Some(Box::new(hook))
    }

    /*
    MOVES
     */
    /// Parses a request such as `e2 e4` and submits it
    pub fn submit_str(&mut self, request: &str) -> Result<Move, MoveError> {
        let request = MoveRequest::parse(request).ok_or_else(|| MoveError::BadRequest(request.trim().to_owned()))?;
        self.submit_move(request)
    }

    /// Validates and plays a move. Either the whole move is applied or, on error,
    /// the game is left exactly as it was.
    pub fn submit_move(&mut self, request: MoveRequest) -> Result<Move, MoveError> {
        let mv = self.validate(&request)?;
        let side = self.board.side_to_move();

        if let Some(captured) = self.board.make(mv) {
            self.captured[side as usize].push(captured);
        }
        self.ledger.record(self.board.hash());
        debug!("{:?} played {}, now at {}", side, mv, self.export_fen());

        self.status = self.evaluate_status();
        if self.status.is_terminal() {
            info!("game over: {}", self.status);
        }
        if let Some(hook) = self.clock_hook.as_mut() {
            hook(side.opposite())
        }
        Ok(mv)
    }

    fn validate(&self, request: &MoveRequest) -> Result<Move, MoveError> {
        if self.status.is_terminal() {
            return Err(MoveError::GameAlreadyOver(self.status));
        }
        if !is_valid(request.from) || !is_valid(request.to) {
            return Err(MoveError::IllegalMove { from: request.from, to: request.to, promotion: request.promotion });
        }
        let piece = self
            .board
            .piece_at(request.from)
            .ok_or(MoveError::NoPieceAtSource(request.from))?;
        if piece.color != self.board.side_to_move() {
            return Err(MoveError::WrongColorPiece { square: request.from, found: piece.color });
        }
        legal_moves_for(&self.board, request.from)
            .find_request(request)
            .ok_or(MoveError::IllegalMove { from: request.from, to: request.to, promotion: request.promotion })
    }

    fn evaluate_status(&self) -> GameStatus {
        let side = self.board.side_to_move();
        if self.board.king_square(side).is_none() {
            panic!("{:?} has no king on {}", side, self.export_fen());
        }

        let checked = in_check(&self.board, side);
        if legal_moves(&self.board, side).is_empty() {
            return if checked { GameStatus::Checkmate { winner: side.opposite() } } else { GameStatus::Stalemate };
        }
        if self.board.halfmove_clock() >= FIFTY_MOVE_PLIES {
            GameStatus::DrawByFiftyMove
        } else if self.ledger.occurrences(self.board.hash()) >= REPETITION_COUNT {
            GameStatus::DrawByRepetition
        } else if insufficient_material(&self.board) {
            GameStatus::DrawByInsufficientMaterial
        } else if checked {
            GameStatus::Check(side)
        } else {
            GameStatus::InProgress
        }
    }
}

/// Whether neither side can possibly mate: bare kings, a single minor piece,
/// or bishops only, all of them on squares of the same color
pub fn insufficient_material(board: &Board) -> bool {
    let mut minors = vec![];
    for color in [Color::White, Color::Black] {
        for (sq, piece) in board.pieces_of(color) {
            match piece.piece_type {
                PieceType::King => (),
                PieceType::Knight | PieceType::Bishop => minors.push((sq, piece.piece_type)),
                PieceType::Pawn | PieceType::Rook | PieceType::Queen => return false,
            }
        }
    }

    let square_color = |sq: Square| (file_of(sq) + rank_of(sq)) % 2;
    match minors.as_slice() {
        [] | [_] => true,
        [(first, _), ..] => minors
            .iter()
            .all(|(sq, p)| *p == PieceType::Bishop && square_color(*sq) == square_color(*first)),
    }
}
