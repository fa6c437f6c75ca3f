//! Player trait and associated types for game agents.
//!
//! A player is anything that can be asked for a move in the live game held
//! by a [`Board`]. The engine player in `agent::ai` is the implementation
//! shipped with the crate; hosts can plug in their own (a network peer, a
//! recorded game) by implementing the same trait.
//!
//! `get_move` is synchronous: the caller blocks until the player answers.

use crate::board::Board;
use crate::game_repr::{Color, Move};

/// Result of a completed game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameResult {
    /// White player won the game (Black was checkmated)
    WhiteWins,
    /// Black player won the game (White was checkmated)
    BlackWins,
    /// Game ended in a draw for any reason other than stalemate
    Draw,
    /// Player to move has no legal moves but is not in check
    Stalemate,
}

impl GameResult {
    /// Create a GameResult from the winning color
    pub fn from_winner(winner: Color) -> Self {
        match winner {
            Color::White => GameResult::WhiteWins,
            Color::Black => GameResult::BlackWins,
        }
    }

    pub fn winner(&self) -> Option<Color> {
        match self {
            GameResult::WhiteWins => Some(Color::White),
            GameResult::BlackWins => Some(Color::Black),
            GameResult::Draw | GameResult::Stalemate => None,
        }
    }
}

/// Trait for entities that can provide moves.
///
/// Only `get_move()` must be implemented.
pub trait Player {
    /// Request the next move for the side to move on `board`.
    ///
    /// - `Some(Move)`: the move chosen; the caller still validates it
    /// - `None`: the player cannot or will not move (game over, resignation)
    fn get_move(&mut self, board: &Board) -> Option<Move>;

    /// Called after the opponent's move has been applied
    fn opponent_moved(&mut self, _mv: Move) {}

    /// Called once the game reaches a terminal state
    fn game_ended(&mut self, _result: GameResult) {}

    /// Display name used in logs and game records
    fn name(&self) -> &str {
        "Player"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_winner_round_trip() {
        assert_eq!(GameResult::from_winner(Color::White).winner(), Some(Color::White));
        assert_eq!(GameResult::from_winner(Color::Black), GameResult::BlackWins);
        assert_eq!(GameResult::Stalemate.winner(), None);
    }

    /// Plays the first legal move it finds
    struct FirstMovePlayer;

    impl Player for FirstMovePlayer {
        fn get_move(&mut self, board: &Board) -> Option<Move> {
            board.legal_moves().first().copied()
        }
    }

    #[test]
    fn test_default_methods() {
        let mut player = FirstMovePlayer;
        assert_eq!(player.name(), "Player");
        let board = Board::new();
        let mv = player.get_move(&board).expect("start position has moves");
        assert!(board.is_legal_move(mv));
        player.opponent_moved(mv);
        player.game_ended(GameResult::Draw);
    }
}
