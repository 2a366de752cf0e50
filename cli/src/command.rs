use std::str::FromStr;

use minefield_core::{Coord, Coord2};
use thiserror::Error;

pub const HELP: &str = "\
commands:
  open <row> <column>   open a cell (alias: o)
  restart               new mines, same board size (alias: r)
  show                  print the board again (alias: s)
  help                  this text (aliases: h, ?)
  quit                  leave (alias: q)";

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Open(Coord2),
    Restart,
    Show,
    Help,
    Quit,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseCommandError {
    #[error("Empty command")]
    Empty,
    #[error("Unknown command `{0}`, try `help`")]
    Unknown(String),
    #[error("Expected `open <row> <column>`")]
    MissingCoords,
    #[error("Invalid coordinate `{0}`")]
    InvalidCoord(String),
    #[error("Unexpected argument `{0}`")]
    TrailingInput(String),
}

impl FromStr for Command {
    type Err = ParseCommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let name = words.next().ok_or(ParseCommandError::Empty)?;

        let command = match name.to_ascii_lowercase().as_str() {
            "open" | "o" => {
                let row = parse_coord(words.next())?;
                let column = parse_coord(words.next())?;
                Command::Open((row, column))
            }
            "restart" | "r" => Command::Restart,
            "show" | "s" => Command::Show,
            "help" | "h" | "?" => Command::Help,
            "quit" | "q" | "exit" => Command::Quit,
            _ => return Err(ParseCommandError::Unknown(name.to_string())),
        };

        match words.next() {
            Some(extra) => Err(ParseCommandError::TrailingInput(extra.to_string())),
            None => Ok(command),
        }
    }
}

fn parse_coord(word: Option<&str>) -> Result<Coord, ParseCommandError> {
    let word = word.ok_or(ParseCommandError::MissingCoords)?;
    word.parse()
        .map_err(|_| ParseCommandError::InvalidCoord(word.to_string()))
}
