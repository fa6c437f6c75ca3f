//! NegamaxPlayer - the search engine behind the `Player` trait
//!
//! Difficulty presets map to an [`EngineConfig`]; the player owns one
//! [`SearchEngine`] and asks it for a move whenever it is its turn.
//!
//! # Difficulty Levels
//!
//! - **Easy**: Depth 2, 1 second
//! - **Medium**: Depth 4, 3 seconds
//! - **Hard**: Depth 6, 5 seconds
//! - **Expert**: Depth 8, 10 seconds
//!
//! # Examples
//!
//! ```rust
//! use chess_search::agent::ai::{Difficulty, NegamaxPlayer};
//! use chess_search::agent::player::Player;
//! use chess_search::board::Board;
//!
//! let board = Board::new();
//! let mut ai = NegamaxPlayer::with_difficulty(Difficulty::Easy);
//! let mv = ai.get_move(&board).expect("the start position has moves");
//! assert!(board.is_legal_move(mv));
//! ```

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::agent::player::{GameResult, Player};
use crate::board::Board;
use crate::error::ConfigError;
use crate::game_repr::Move;
use super::config::EngineConfig;
use super::search::SearchEngine;
use log::{debug, info};

/// Strength presets mapping to search depth and time budget
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    Expert,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Easy,
        Difficulty::Medium,
        Difficulty::Hard,
        Difficulty::Expert,
    ];

    /// Maximum search depth in plies (half-moves)
    pub fn max_depth(&self) -> u8 {
        match self {
            Difficulty::Easy => 2,
            Difficulty::Medium => 4,
            Difficulty::Hard => 6,
            Difficulty::Expert => 8,
        }
    }

    pub fn time_limit(&self) -> Duration {
        match self {
            Difficulty::Easy => Duration::from_secs(1),
            Difficulty::Medium => Duration::from_secs(3),
            Difficulty::Hard => Duration::from_secs(5),
            Difficulty::Expert => Duration::from_secs(10),
        }
    }

    pub fn config(&self) -> EngineConfig {
        EngineConfig {
            max_depth: self.max_depth(),
            time_limit: self.time_limit(),
        }
    }

    /// Get a display name for this difficulty level
    pub fn name(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
            Difficulty::Expert => "Expert",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Difficulty {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Difficulty::ALL
            .into_iter()
            .find(|d| d.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ConfigError::UnknownDifficulty(s.to_string()))
    }
}

/// Engine-backed player
pub struct NegamaxPlayer {
    engine: SearchEngine,
    difficulty: Option<Difficulty>,
    name: String,
}

impl NegamaxPlayer {
    /// Player with an explicit engine configuration
    ///
    /// # Errors
    /// Returns `ConfigError` if `config` is out of range.
    pub fn new(config: EngineConfig, name: String) -> Result<Self, ConfigError> {
        Ok(Self {
            engine: SearchEngine::new(config)?,
            difficulty: None,
            name,
        })
    }

    /// Player using a preset; the name is generated as "AI ({difficulty})"
    pub fn with_difficulty(difficulty: Difficulty) -> Self {
        Self {
            engine: SearchEngine::from_difficulty(difficulty),
            difficulty: Some(difficulty),
            name: format!("AI ({})", difficulty),
        }
    }

    /// Preset this player was built from, if any
    pub fn difficulty(&self) -> Option<Difficulty> {
        self.difficulty
    }

    /// Switch to another preset; an auto-generated name follows along
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.engine = SearchEngine::from_difficulty(difficulty);
        self.difficulty = Some(difficulty);
        if self.name.starts_with("AI (") {
            self.name = format!("AI ({})", difficulty);
        }
    }

    pub fn engine(&self) -> &SearchEngine {
        &self.engine
    }
}

impl SearchEngine {
    /// Engine configured from a preset; presets are always in range
    pub fn from_difficulty(difficulty: Difficulty) -> Self {
        match SearchEngine::new(difficulty.config()) {
            Ok(engine) => engine,
            Err(_) => SearchEngine::default(),
        }
    }
}

impl Player for NegamaxPlayer {
    fn get_move(&mut self, board: &Board) -> Option<Move> {
        let result = board.search(&mut self.engine).ok()?;
        debug!(
            "[{}] depth {} nodes {} score {} pv {}",
            self.name,
            result.depth,
            result.nodes,
            result.score,
            result
                .pv
                .iter()
                .map(|mv| mv.to_string())
                .collect::<Vec<_>>()
                .join(" ")
        );
        result.best_move
    }

    fn game_ended(&mut self, result: GameResult) {
        info!("[{}] game over: {:?}", self.name, result);
    }

    fn name(&self) -> &str {
        &self.name
    }
}
