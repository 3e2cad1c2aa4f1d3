use crate::fen::FenError;
use crate::game::{new_game, GameState, MoveError};
use crate::piece::Color;
use crate::square::parse_square;

use log::warn;
use regex::Regex;
use rustyline::config::Configurer;
use rustyline::Editor;
use std::fmt::{Display, Formatter};

/// A small interactive front end: reads move requests such as `e2 e4`
/// and a handful of commands from the terminal
pub struct Cli {
    game: GameState,
    editor: Editor<()>,
}

impl Cli {
    pub fn new(fen: Option<&str>) -> Result<Cli, FenError> {
        let mut editor = Editor::<()>::new();
        editor.set_auto_add_history(true);
        editor.set_check_cursor_position(true);
        Ok(Cli { game: new_game(fen)?, editor })
    }

    pub fn run(&mut self) {
        println!("{}\n", self.game.board());
        while let Ok(line) = self.editor.readline("move> ") {
            match self.handle_command(&line) {
                Ok(CliOkCode::ShouldQuit) => break,
                Ok(CliOkCode::Played) => {
                    println!("{}\n", self.game.board());
                    println!("{}", self.game.status());
                }
                Ok(CliOkCode::OkCommand) | Err(CliErrCode::NoCommand) => (),
                Err(e) => eprintln!("{}", e),
            }
        }
    }

    fn handle_command(&mut self, line: &str) -> Result<CliOkCode, CliErrCode> {
        let args_regex = Self::args_regex();
        let mut args = args_regex.find_iter(line).map(|m| m.as_str());
        let cmd = args.next().ok_or(CliErrCode::NoCommand)?;

        match cmd {
            "new" => {
                let fen = args.collect::<Vec<_>>().join(" ").replace('"', "");
                let fen = if fen.is_empty() { None } else { Some(fen.as_str()) };
                self.game = new_game(fen).map_err(CliErrCode::BadFen)?;
                println!("{}", self.game.board());
            }
            "moves" => {
                let moves = match args.next() {
                    Some(sq) => {
                        let sq = parse_square(sq).ok_or_else(|| CliErrCode::BadSquare(sq.to_owned()))?;
                        self.game.legal_moves_for(sq)
                    }
                    None => self.game.legal_moves(),
                };
                println!("{}", moves)
            }
            "fen" => println!("{}", self.game.export_fen()),
            "show" => println!("{}", self.game.board()),
            "status" => println!("{}", self.game.status()),
            "captured" => {
                for color in [Color::White, Color::Black] {
                    let pieces: String = self.game.captured(color).iter().map(|p| p.to_char()).collect();
                    println!("{:?}: {} ({})", color, pieces, self.game.material_score(color));
                }
            }
            "quit" | "exit" => return Ok(CliOkCode::ShouldQuit),
            _ => {
                let mv = self.game.submit_str(line).map_err(|e| {
                    warn!("rejected move request '{}': {}", line.trim(), e);
                    CliErrCode::BadMove(e)
                })?;
                println!("played {}", mv);
                return Ok(CliOkCode::Played);
            }
        }

        Ok(CliOkCode::OkCommand)
    }

    fn args_regex() -> Regex {
        Regex::new(r#"(".*?"|[^"\s]+)"#).unwrap()
    }
}

enum CliOkCode {
    OkCommand,
    Played,
    ShouldQuit,
}

enum CliErrCode {
    NoCommand,
    BadFen(FenError),
    BadSquare(String),
    BadMove(MoveError),
}

impl Display for CliErrCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            CliErrCode::NoCommand => write!(f, "Empty command"),
            CliErrCode::BadFen(e) => write!(f, "Badly formed FEN: {}", e),
            CliErrCode::BadSquare(s) => write!(f, "Not a square: {}", s),
            CliErrCode::BadMove(e) => write!(f, "Badly formatted or illegal move: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::GameStatus;

    fn cli() -> Cli {
        Cli::new(None).unwrap()
    }

    #[test]
    fn plays_moves_and_commands() {
        let mut cli = cli();
        assert!(matches!(cli.handle_command("e2 e4"), Ok(CliOkCode::Played)));
        assert!(matches!(cli.handle_command("moves e7"), Ok(CliOkCode::OkCommand)));
        assert!(matches!(cli.handle_command("fen"), Ok(CliOkCode::OkCommand)));
        assert!(matches!(cli.handle_command("e2 e4"), Err(CliErrCode::BadMove(MoveError::NoPieceAtSource(12)))));
        assert!(matches!(cli.handle_command("moves z9"), Err(CliErrCode::BadSquare(_))));
        assert!(matches!(cli.handle_command(""), Err(CliErrCode::NoCommand)));
        assert!(matches!(cli.handle_command("quit"), Ok(CliOkCode::ShouldQuit)));
    }

    #[test]
    fn new_game_from_fen() {
        let mut cli = cli();
        assert!(matches!(
            cli.handle_command("new \"R5k1/5ppp/8/8/8/8/8/6K1 b - - 0 1\""),
            Ok(CliOkCode::OkCommand)
        ));
        assert_eq!(cli.game.status(), GameStatus::Checkmate { winner: Color::White });
        assert!(matches!(cli.handle_command("new 8/8 w"), Err(CliErrCode::BadFen(_))));
        assert!(matches!(cli.handle_command("new"), Ok(CliOkCode::OkCommand)));
        assert_eq!(cli.game.status(), GameStatus::InProgress);
    }
}
