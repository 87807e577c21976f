//! Perftista command-line driver: run perft on a piece-placement FEN.

use std::time::Instant;

use clap::Parser;

use perftista::board::{Board, Color, START_PLACEMENT};
use perftista::error::EngineError;
use perftista::perft::{perft, Mode};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Piece placement field of a FEN string
    #[arg(short, long, default_value_t = String::from(START_PLACEMENT))]
    fen: String,

    /// Search depth in plies
    #[arg(short, long, default_value_t = 4)]
    depth: u32,

    /// Black moves first instead of white
    #[arg(short, long)]
    black: bool,

    /// Count the last ply from the move-list length instead of playing it
    #[arg(long)]
    bulk: bool,

    /// Print per-move leaf counts for the first ply
    #[arg(long)]
    divide: bool,

    /// Print the parsed board before searching
    #[arg(long)]
    show_board: bool,
}

fn main() {
    let args = Args::parse();
    if let Err(e) = run(&args) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), EngineError> {
    let mut board = Board::from_fen(&args.fen)?;
    if args.show_board {
        println!("{board}");
    }
    let side = if args.black { Color::Black } else { Color::White };
    let mode = if args.bulk { Mode::Bulk } else { Mode::NonBulk };

    println!("Running perft on '{}' at depth {}", args.fen, args.depth);
    let start = Instant::now();
    let result = perft(&mut board, args.depth, mode, side)?;
    let duration = start.elapsed();

    if args.divide {
        let mut lines: Vec<(String, u64)> = result
            .divide()
            .iter()
            .map(|(mv, count)| (mv.to_string(), *count))
            .collect();
        lines.sort();
        for (mv, count) in lines {
            println!("{mv}: {count}");
        }
    }

    println!(
        "perft({}) = {} leaf nodes, {} searched ({} ms, {:.2} Mnps)",
        args.depth,
        result.leaf_nodes(),
        result.searched_nodes(),
        duration.as_millis(),
        result.leaf_nodes() as f64 / duration.as_micros().max(1) as f64
    );
    Ok(())
}
