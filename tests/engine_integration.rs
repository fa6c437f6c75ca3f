//! End-to-end tests driving the engine through the public `Board` API
//!
//! Covers:
//! - Engine-vs-engine play only ever producing legal moves
//! - Tactical sanity (mate in one, hanging queen)
//! - Rejection of illegal input and moves after the game has ended
//! - Time budgets that are too short to finish a single iteration

use std::time::{Duration, Instant};

use chess_search::agent::player::{GameResult, Player};
use chess_search::error::MoveError;
use chess_search::{Board, Difficulty, EngineConfig, GameStatus, Move, SearchEngine};
use chess_search::agent::ai::MATE_THRESHOLD;
use chess_search::agent::NegamaxPlayer;
use chess_search::Color;

fn engine(depth: u8, time: Duration) -> SearchEngine {
    let config = EngineConfig::new(depth, time).expect("valid config");
    SearchEngine::new(config).expect("valid config")
}

fn mv(s: &str) -> Move {
    s.parse().expect("valid move")
}

#[test]
fn test_selfplay_only_legal_moves() {
    let mut board = Board::new();
    let mut white = NegamaxPlayer::with_difficulty(Difficulty::Easy);
    let mut black = NegamaxPlayer::with_difficulty(Difficulty::Easy);

    for _ in 0..16 {
        let mover = if board.side_to_move() == Color::White {
            &mut white
        } else {
            &mut black
        };
        let Some(mv) = mover.get_move(&board) else {
            break;
        };
        assert!(board.is_legal_move(mv), "{} played illegal {}", mover.name(), mv);
        let status = board.apply_move(mv).expect("legal move applies");
        if status.is_over() {
            break;
        }
    }

    assert!(!board.history().is_empty());
    // Replaying the history from scratch reaches the same position
    let mut replay = Board::new();
    for &step in board.history() {
        replay.apply_move(step).expect("history is legal");
    }
    assert_eq!(replay.to_fen(), board.to_fen());
}

#[test]
fn test_board_finds_back_rank_mate() {
    let mut board = Board::from_fen("6k1/5ppp/8/8/8/8/5PPP/R5K1 w - - 0 1").expect("valid FEN");
    let mut engine = engine(4, Duration::from_secs(30));

    let result = board.search(&mut engine).expect("valid config");
    assert_eq!(result.best_move, Some(mv("a1a8")));
    assert!(result.score >= MATE_THRESHOLD);

    let status = board.apply_move(mv("a1a8")).expect("legal");
    assert_eq!(status, GameStatus::Checkmate { winner: Color::White });
    assert_eq!(status.result(), Some(GameResult::WhiteWins));
    assert_eq!(board.best_move(&mut engine), None);
}

#[test]
fn test_board_grabs_hanging_queen() {
    let board = Board::from_fen("4k3/8/8/3q4/8/8/8/3QK3 w - - 0 1").expect("valid FEN");
    let mut engine = engine(3, Duration::from_secs(30));
    assert_eq!(board.best_move(&mut engine), Some(mv("d1d5")));
}

#[test]
fn test_illegal_moves_rejected() {
    let mut board = Board::new();
    let before = board.to_fen();

    assert!(matches!(board.apply_uci("e2e5"), Err(MoveError::Illegal(_))));
    assert!(matches!(board.apply_uci("e2"), Err(MoveError::Parse(_))));
    assert_eq!(board.to_fen(), before);
    assert!(board.history().is_empty());

    assert_eq!(board.apply_uci("e2e4"), Ok(GameStatus::Ongoing));
    assert_eq!(board.side_to_move(), Color::Black);
}

#[test]
fn test_no_moves_after_mate() {
    let mut board = Board::new();
    for step in ["f2f3", "e7e5", "g2g4", "d8h4"] {
        board.apply_uci(step).expect("legal");
    }
    assert_eq!(board.status(), GameStatus::Checkmate { winner: Color::Black });
    assert_eq!(board.apply_uci("e1f2"), Err(MoveError::GameOver));
}

#[test]
fn test_tiny_budget_returns_quickly() {
    let board = Board::from_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1")
        .expect("valid FEN");
    let mut engine = engine(30, Duration::from_millis(50));

    let start = Instant::now();
    let best = board.best_move(&mut engine).expect("position has moves");
    assert!(start.elapsed() < Duration::from_secs(2), "took {:?}", start.elapsed());
    assert!(board.is_legal_move(best));
}
