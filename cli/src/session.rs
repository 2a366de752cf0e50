use std::io::{BufRead, Write};

use minefield_core::{Board, Snapshot};

use crate::command::{Command, HELP};
use crate::render::render_text;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// One player driving one board from line-oriented input.
pub struct Session {
    board: Board,
    format: OutputFormat,
}

impl Session {
    pub fn new(board: Board, format: OutputFormat) -> Self {
        Self { board, format }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Reads commands until `quit` or end of input. Bad commands are reported and skipped.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> anyhow::Result<()> {
        self.print_board(out)?;

        for line in input.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            let command = match line.parse::<Command>() {
                Ok(command) => command,
                Err(err) => {
                    self.print_error(out, &err.to_string())?;
                    continue;
                }
            };
            log::debug!("Command: {:?}", command);

            match command {
                Command::Open(coords) => match self.board.open(coords) {
                    Ok(outcome) => {
                        if !outcome.has_update() {
                            log::info!("Nothing to open at {:?}", coords);
                        }
                        self.print_board(out)?;
                    }
                    Err(err) => self.print_error(out, &format!("{err}: {coords:?}"))?,
                },
                Command::Restart => match self.board.restart() {
                    Ok(()) => self.print_board(out)?,
                    Err(err) => self.print_error(out, &err.to_string())?,
                },
                Command::Show => self.print_board(out)?,
                Command::Help => writeln!(out, "{HELP}")?,
                Command::Quit => break,
            }
        }

        out.flush()?;
        Ok(())
    }

    fn print_board<W: Write>(&self, out: &mut W) -> anyhow::Result<()> {
        let snapshot = Snapshot::from_board(&self.board);
        match self.format {
            OutputFormat::Text => writeln!(out, "{}", render_text(&snapshot))?,
            OutputFormat::Json => {
                serde_json::to_writer(&mut *out, &snapshot)?;
                writeln!(out)?;
            }
        }
        Ok(())
    }

    fn print_error<W: Write>(&self, out: &mut W, message: &str) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Text => writeln!(out, "error: {message}")?,
            OutputFormat::Json => {
                serde_json::to_writer(&mut *out, &serde_json::json!({ "error": message }))?;
                writeln!(out)?;
            }
        }
        Ok(())
    }
}
