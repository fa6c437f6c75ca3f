use std::process::ExitCode;
use std::time::{Duration, Instant};

use chess_search::agent::player::{GameResult, Player};
use chess_search::agent::NegamaxPlayer;
use chess_search::error::ConfigError;
use chess_search::game_repr::{Position, STARTING_FEN};
use chess_search::{Board, Color, Difficulty, EngineConfig, EngineResult, SearchEngine};
use clap::{Args, Parser, Subcommand};
use log::{error, info};

#[derive(Parser)]
#[command(name = "chess_search", version, about = "Bitboard chess engine with alpha-beta search")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Count leaf nodes of the legal move tree
    Perft {
        #[arg(long, default_value = STARTING_FEN)]
        fen: String,
        #[arg(long)]
        depth: u32,
        /// Print the count below every root move
        #[arg(long)]
        divide: bool,
    },
    /// Search a position and print the engine's move
    Bestmove {
        #[arg(long, default_value = STARTING_FEN)]
        fen: String,
        #[command(flatten)]
        search: SearchArgs,
    },
    /// Let the engine play both sides
    Selfplay {
        #[arg(long, default_value = STARTING_FEN)]
        fen: String,
        #[command(flatten)]
        search: SearchArgs,
        /// Stop after this many half-moves
        #[arg(long, default_value_t = 200)]
        max_plies: usize,
    },
}

#[derive(Args)]
struct SearchArgs {
    /// Maximum search depth in plies
    #[arg(long)]
    depth: Option<u8>,
    /// Time budget per move, in seconds
    #[arg(long)]
    time: Option<f64>,
    /// Preset (easy, medium, hard, expert); --depth and --time override it
    #[arg(long)]
    difficulty: Option<Difficulty>,
}

impl SearchArgs {
    fn config(&self) -> Result<EngineConfig, ConfigError> {
        let base = self.difficulty.map_or_else(EngineConfig::default, |d| d.config());
        let time_limit = match self.time {
            Some(secs) => Duration::try_from_secs_f64(secs).map_err(|_| ConfigError::ZeroTimeBudget)?,
            None => base.time_limit,
        };
        EngineConfig::new(self.depth.unwrap_or(base.max_depth), time_limit)
    }
}

fn run(cli: Cli) -> EngineResult<()> {
    match cli.command {
        Command::Perft { fen, depth, divide } => {
            let mut pos = Position::from_fen(&fen)?;
            let start = Instant::now();
            let nodes = if divide {
                let split = pos.divide(depth);
                for (mv, count) in &split {
                    println!("{}: {}", mv, count);
                }
                split.iter().map(|(_, count)| count).sum()
            } else {
                pos.perft(depth)
            };
            let elapsed = start.elapsed();
            println!("nodes {}", nodes);
            info!(
                "perft({}) = {} in {:.3}s ({:.0} nps)",
                depth,
                nodes,
                elapsed.as_secs_f64(),
                nodes as f64 / elapsed.as_secs_f64().max(1e-9)
            );
        }
        Command::Bestmove { fen, search } => {
            let board = Board::from_fen(&fen)?;
            let mut engine = SearchEngine::new(search.config()?)?;
            let result = board.search(&mut engine)?;
            match result.best_move {
                Some(mv) => {
                    let pv: Vec<String> = result.pv.iter().map(|m| m.to_string()).collect();
                    println!(
                        "bestmove {} score {} depth {} nodes {} pv {}",
                        mv,
                        result.score,
                        result.depth,
                        result.nodes,
                        pv.join(" ")
                    );
                }
                None => println!("bestmove none"),
            }
        }
        Command::Selfplay { fen, search, max_plies } => {
            let mut board = Board::from_fen(&fen)?;
            let config = search.config()?;
            let mut white = NegamaxPlayer::new(config, "White".to_string())?;
            let mut black = NegamaxPlayer::new(config, "Black".to_string())?;

            let mut result = None;
            for ply in 0..max_plies {
                let white_to_move = board.side_to_move() == Color::White;
                let (mover, waiting) = if white_to_move {
                    (&mut white, &mut black)
                } else {
                    (&mut black, &mut white)
                };

                let Some(mv) = mover.get_move(&board) else {
                    break;
                };
                let status = board.apply_move(mv)?;
                waiting.opponent_moved(mv);
                println!("{:>3}. {} {}", ply / 2 + 1, mover.name(), mv);

                if let Some(r) = status.result() {
                    result = Some(r);
                    break;
                }
            }

            let result = result.or_else(|| board.status().result()).unwrap_or(GameResult::Draw);
            white.game_ended(result);
            black.game_ended(result);
            println!("result {:?} after {} plies", result, board.history().len());
            println!("fen {}", board.to_fen());
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{}", err);
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}
