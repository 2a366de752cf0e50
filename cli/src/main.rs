use std::io;

use anyhow::Context;
use clap::Parser;
use clap_verbosity_flag::Verbosity;
use minefield_core::{Board, BoardConfig, Coord, DEFAULT_SIZE};

use session::{OutputFormat, Session};

mod command;
mod render;
mod session;

/// Play minesweeper in the terminal. Type `help` once started.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: Verbosity,

    /// Number of rows
    #[arg(long, default_value_t = DEFAULT_SIZE.0, value_parser = clap::value_parser!(Coord).range(1..))]
    rows: Coord,

    /// Number of columns
    #[arg(long, default_value_t = DEFAULT_SIZE.1, value_parser = clap::value_parser!(Coord).range(1..))]
    columns: Coord,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// Print one JSON snapshot per line instead of a text grid
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(args.verbose.tracing_level_filter())
        .with_writer(io::stderr)
        .init();
    log::debug!("{:?}", args);

    let config = BoardConfig::new((args.rows, args.columns)).context("Invalid board size")?;
    let board = match args.seed {
        Some(seed) => Board::with_seed(config, seed),
        None => Board::with_config(config),
    }
    .context("Could not create board")?;

    let format = if args.json {
        OutputFormat::Json
    } else {
        OutputFormat::Text
    };
    let mut session = Session::new(board, format);
    session.run(io::stdin().lock(), &mut io::stdout().lock())
}
