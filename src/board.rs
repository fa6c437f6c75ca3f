use crate::agent::ai::{SearchEngine, SearchResult};
use crate::agent::player::GameResult;
use crate::error::{ConfigError, FenError, MoveError};
use crate::game_repr::{Color, Move, MoveList, Piece, Position};
use log::warn;

/// Where the live game stands after a move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Ongoing,
    Checkmate { winner: Color },
    Stalemate,
}

impl GameStatus {
    pub fn is_over(&self) -> bool {
        !matches!(self, GameStatus::Ongoing)
    }

    /// Final result, or `None` while the game goes on
    pub fn result(&self) -> Option<GameResult> {
        match self {
            GameStatus::Ongoing => None,
            GameStatus::Checkmate { winner } => Some(GameResult::from_winner(*winner)),
            GameStatus::Stalemate => Some(GameResult::Stalemate),
        }
    }
}

/// Board component: the live game as seen by a host.
///
/// The Board owns the current Position and validates every move it is given
/// against the legal move list before touching the position. It also keeps
/// the list of moves played so far; the search never looks at it.
///
/// ```rust
/// use chess_search::board::{Board, GameStatus};
///
/// let mut board = Board::new();
/// assert_eq!(board.apply_uci("e2e4"), Ok(GameStatus::Ongoing));
/// assert!(board.apply_uci("e2e4").is_err());
/// ```
#[derive(Debug, Clone)]
pub struct Board {
    position: Position,
    history: Vec<Move>,
}

impl Board {
    /// Board at the standard starting position
    pub fn new() -> Self {
        Self {
            position: Position::default(),
            history: Vec::new(),
        }
    }

    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        Ok(Self {
            position: Position::from_fen(fen)?,
            history: Vec::new(),
        })
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn side_to_move(&self) -> Color {
        self.position.side_to_move()
    }

    pub fn piece_at(&self, square: usize) -> Option<Piece> {
        self.position.piece_at(square)
    }

    pub fn legal_moves(&self) -> MoveList {
        self.position.legal_moves()
    }

    pub fn is_legal_move(&self, mv: Move) -> bool {
        self.legal_moves().contains(&mv)
    }

    pub fn is_in_check(&self) -> bool {
        self.position.is_in_check(self.side_to_move())
    }

    /// Moves applied through this board, oldest first
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    pub fn to_fen(&self) -> String {
        self.position.to_fen()
    }

    pub fn status(&self) -> GameStatus {
        if self.position.has_legal_move() {
            GameStatus::Ongoing
        } else if self.is_in_check() {
            GameStatus::Checkmate {
                winner: self.side_to_move().opposite(),
            }
        } else {
            GameStatus::Stalemate
        }
    }

    /// Play `mv` if it is legal and report the resulting status.
    ///
    /// # Errors
    /// `MoveError::GameOver` once the game has ended and `MoveError::Illegal`
    /// for anything not in the legal move list. In both cases the position
    /// is left untouched.
    pub fn apply_move(&mut self, mv: Move) -> Result<GameStatus, MoveError> {
        let legal = self.legal_moves();
        if legal.is_empty() {
            return Err(MoveError::GameOver);
        }
        if !legal.contains(&mv) {
            return Err(MoveError::Illegal(mv.to_string()));
        }

        self.position.make_move(mv);
        self.history.push(mv);
        Ok(self.status())
    }

    /// Parse coordinate notation (`e2e4`, `e7e8q`) and apply it
    pub fn apply_uci(&mut self, text: &str) -> Result<GameStatus, MoveError> {
        let mv: Move = text.parse()?;
        self.apply_move(mv)
    }

    /// Full search report for the current position
    pub fn search(&self, engine: &mut SearchEngine) -> Result<SearchResult, ConfigError> {
        engine.search(&self.position)
    }

    /// Engine's choice for the side to move; `None` when the game is over
    pub fn best_move(&self, engine: &mut SearchEngine) -> Option<Move> {
        match engine.search(&self.position) {
            Ok(result) => result.best_move,
            Err(err) => {
                warn!("search refused to run: {}", err);
                None
            }
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
