//! Bitboard chess engine with an alpha-beta search.
//!
//! - [`game_repr`]: position, move generation, make/undo, Zobrist hashing
//! - [`agent::ai`]: evaluation and the iterative-deepening search
//! - [`board`]: the live game as a host drives it
//!
//! ```rust
//! use std::time::Duration;
//! use chess_search::{Board, EngineConfig, SearchEngine};
//!
//! let board = Board::new();
//! let config = EngineConfig::new(2, Duration::from_secs(1)).unwrap();
//! let mut engine = SearchEngine::new(config).unwrap();
//! let mv = board.best_move(&mut engine).unwrap();
//! assert!(board.is_legal_move(mv));
//! ```

pub mod agent;
pub mod board;
pub mod error;
pub mod game_repr;

pub use agent::ai::{Difficulty, EngineConfig, SearchEngine, SearchResult};
pub use board::{Board, GameStatus};
pub use error::{EngineError, EngineResult};
pub use game_repr::{Color, Move, Position};
