//! Error types surfaced by the host-facing API.
//!
//! The search itself never fails: running out of time unwinds with neutral
//! scores and "no legal move" is reported as `None`. Everything here concerns
//! untrusted input (FEN strings, move text, configuration values).

use thiserror::Error;

/// Errors produced while parsing a FEN string
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FenError {
    #[error("FEN string is empty")]
    Empty,

    #[error("invalid piece character '{0}' in placement field")]
    InvalidPiece(char),

    #[error("rank {rank} describes {files} files, expected 8")]
    BadRankLength { rank: usize, files: usize },

    #[error("placement field has {0} ranks, expected 8")]
    BadRankCount(usize),

    #[error("invalid side to move '{0}'")]
    InvalidSide(String),

    #[error("invalid castling field '{0}'")]
    InvalidCastling(String),

    #[error("invalid en passant square '{0}'")]
    InvalidEnPassant(String),

    #[error("{0:?} king is missing")]
    MissingKing(crate::game_repr::Color),
}

/// Errors produced while reading coordinate notation such as `e7e8q`
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MoveParseError {
    #[error("move '{0}' must be 4 or 5 characters long")]
    BadLength(String),

    #[error("invalid square '{0}'")]
    InvalidSquare(String),

    #[error("invalid promotion piece '{0}'")]
    InvalidPromotion(char),
}

/// Errors returned when the host tries to apply a move
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MoveError {
    #[error("move {0} is not legal in the current position")]
    Illegal(String),

    #[error("game is already over")]
    GameOver,

    #[error(transparent)]
    Parse(#[from] MoveParseError),
}

/// Invalid engine settings
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("search depth must be between 1 and {max}, got {depth}")]
    DepthOutOfRange { depth: u8, max: u8 },

    #[error("time budget must be positive")]
    ZeroTimeBudget,

    #[error("unknown difficulty '{0}'")]
    UnknownDifficulty(String),
}

/// Umbrella error for callers that mix several operations
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("FEN error: {0}")]
    Fen(#[from] FenError),

    #[error("move error: {0}")]
    Move(#[from] MoveError),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl From<MoveParseError> for EngineError {
    fn from(err: MoveParseError) -> Self {
        EngineError::Move(MoveError::Parse(err))
    }
}

/// Result alias for engine operations
pub type EngineResult<T> = Result<T, EngineError>;
