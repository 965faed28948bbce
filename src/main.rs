//! negachess command line: self-play, perft and single-position search

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use negachess::config::EngineConfig;
use negachess::core::attacks;
use negachess::engine::perft::{perft, perft_divide};
use negachess::engine::search::mate_distance;
use negachess::engine::selfplay::play_game;
use negachess::{Board, SearchLimits, Searcher};

#[derive(Parser, Debug)]
#[command(name = "negachess", version, about = "Bitboard chess engine")]
struct Cli {
    /// TOML config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Play one game between the configured agents
    Play {
        /// Start position, overrides the config
        #[arg(long)]
        fen: Option<String>,
        /// Half-move cap, overrides the config
        #[arg(long)]
        max_moves: Option<u32>,
    },
    /// Count leaf nodes of the legal move tree
    Perft {
        depth: u32,
        #[arg(long)]
        fen: Option<String>,
        /// Print counts per root move
        #[arg(long)]
        divide: bool,
    },
    /// Search one position and print the chosen move
    Bestmove {
        #[arg(long)]
        fen: Option<String>,
        #[arg(long)]
        depth: Option<u32>,
        /// Milliseconds
        #[arg(long)]
        movetime: Option<u64>,
    },
}

fn board_from(fen: Option<&str>) -> Result<Board> {
    match fen {
        Some(fen) => Board::from_fen(fen).with_context(|| format!("loading position {fen}")),
        None => Ok(Board::start_position()),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    attacks::init();
    let mut config = match &cli.config {
        Some(path) => EngineConfig::load(path).with_context(|| format!("loading {}", path.display()))?,
        None => EngineConfig::default(),
    };

    match cli.command {
        Command::Play { fen, max_moves } => {
            if fen.is_some() {
                config.selfplay.start_fen = fen;
            }
            if let Some(max_moves) = max_moves {
                config.selfplay.max_moves = max_moves;
            }
            config.validate()?;

            let mut board = config.selfplay.start_board()?;
            let mut white = config.selfplay.white.build(&config.search);
            let mut black = config.selfplay.black.build(&config.search);
            let record = play_game(&mut board, white.as_mut(), black.as_mut(), &config.selfplay);

            println!("{}", record.move_text());
            println!("{} ({})", record.outcome.result_tag(), record.outcome);
            println!("{board}");
        }
        Command::Perft { depth, fen, divide } => {
            let mut board = board_from(fen.as_deref())?;
            let start = Instant::now();
            let nodes = if divide {
                let counts = perft_divide(&mut board, depth);
                for (mv, count) in &counts {
                    println!("{mv}: {count}");
                }
                counts.iter().map(|(_, count)| count).sum::<u64>()
            } else {
                perft(&mut board, depth)
            };
            let elapsed = start.elapsed();
            let nps = nodes as f64 / elapsed.as_secs_f64().max(1e-9);
            println!("nodes {nodes} time {}ms nps {:.0}", elapsed.as_millis(), nps);
        }
        Command::Bestmove { fen, depth, movetime } => {
            let mut board = board_from(fen.as_deref())?;
            if let Some(depth) = depth {
                config.search.max_depth = depth;
            }
            config.search.validate()?;

            let mut searcher = Searcher::new(config.search.clone());
            let limits = SearchLimits {
                depth,
                movetime,
                nodes: None,
            };
            let result = searcher.choose_move(&mut board, &limits);
            match result.best_move {
                Some(mv) => {
                    let score = match mate_distance(result.score) {
                        Some(moves) => format!("mate {moves}"),
                        None => format!("cp {}", result.score),
                    };
                    println!(
                        "bestmove {mv} score {score} depth {} nodes {} time {}ms",
                        result.depth,
                        result.nodes,
                        result.elapsed.as_millis()
                    );
                }
                None => println!("bestmove (none) {}", board.outcome()),
            }
        }
    }

    Ok(())
}
