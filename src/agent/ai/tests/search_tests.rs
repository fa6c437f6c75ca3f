// Search scenarios: mates, symmetry, time limits and deepening behaviour

use super::fen;
use crate::agent::ai::evaluation::evaluate;
use crate::agent::ai::negamax::{SearchContext, INFINITY, MATE_SCORE, MATE_THRESHOLD};
use crate::agent::ai::quiescence::quiescence;
use crate::agent::ai::{EngineConfig, SearchEngine, SearchResult};
use crate::game_repr::{Move, Position};
use std::time::Duration;

fn engine(depth: u8) -> SearchEngine {
    let config = EngineConfig::new(depth, Duration::from_secs(60)).expect("valid config");
    SearchEngine::new(config).expect("valid config")
}

fn search(pos: &Position, depth: u8) -> SearchResult {
    engine(depth).search(pos).expect("config is valid")
}

fn mv(s: &str) -> Move {
    s.parse().expect("valid move")
}

#[test]
fn test_mate_in_one() {
    let pos = fen("6k1/5ppp/8/8/8/8/5PPP/R5K1 w - - 0 1");
    for depth in [2, 4] {
        let result = search(&pos, depth);
        assert_eq!(result.best_move, Some(mv("a1a8")), "depth {}", depth);
        assert!(result.score >= MATE_THRESHOLD, "score {}", result.score);
        assert!(result.is_mate());
    }
}

#[test]
fn test_mate_found_stops_deepening() {
    let pos = fen("6k1/5ppp/8/8/8/8/5PPP/R5K1 w - - 0 1");
    let result = search(&pos, 8);
    assert_eq!(result.depth, 2);
    assert_eq!(result.score, MATE_SCORE - 1);
}

#[test]
fn test_avoids_being_mated() {
    // Black must cover the back rank; anything else allows Ra8#
    let pos = fen("6k1/5pp1/8/8/8/8/5PPP/R5K1 b - - 0 1");
    let result = search(&pos, 3);
    assert!(result.score > -MATE_THRESHOLD, "score {}", result.score);
}

#[test]
fn test_short_budget_still_returns_legal_move() {
    let pos = Position::default();
    let config = EngineConfig::new(1, Duration::from_millis(1)).expect("valid config");
    let mut engine = SearchEngine::new(config).expect("valid config");
    let result = engine.search(&pos).expect("valid config");
    let best = result.best_move.expect("a move is always returned");
    assert!(pos.legal_moves().contains(&best));
}

#[test]
fn test_deep_search_respects_time_budget() {
    let pos = fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1");
    let config = EngineConfig::new(64, Duration::from_millis(300)).expect("valid config");
    let mut engine = SearchEngine::new(config).expect("valid config");
    let result = engine.search(&pos).expect("valid config");

    assert!(result.best_move.is_some());
    assert!(result.depth < 64);
    assert!(result.elapsed < Duration::from_secs(5), "took {:?}", result.elapsed);
}

#[test]
fn test_no_legal_moves() {
    let mated = fen("R5k1/5ppp/8/8/8/8/5PPP/6K1 b - - 0 1");
    let result = search(&mated, 3);
    assert_eq!(result.best_move, None);
    assert_eq!(result.score, -MATE_SCORE);

    let stalemate = fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1");
    let result = search(&stalemate, 3);
    assert_eq!(result.best_move, None);
    assert_eq!(result.score, 0);
}

#[test]
fn test_scores_negate_under_colour_flip() {
    for f in [
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        "r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3",
        "4k3/8/8/3q4/8/8/8/3QK3 w - - 0 1",
        "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
    ] {
        let pos = fen(f);
        let mirrored = pos.mirrored();
        // Both are scored for their own side to move, so they agree exactly
        assert_eq!(search(&pos, 3).score, search(&mirrored, 3).score, "{}", f);
    }
}

#[test]
fn test_deeper_search_keeps_won_material() {
    // Queen trade offer where only white can capture
    let pos = fen("4k3/8/8/3q4/8/8/8/3QK3 w - - 0 1");
    for depth in 1..=4 {
        let result = search(&pos, depth);
        assert_eq!(result.depth, depth);
        assert_eq!(result.best_move, Some(mv("d1d5")), "depth {}", depth);
        assert!(result.score > 700, "depth {} score {}", depth, result.score);
    }
}

#[test]
fn test_search_is_deterministic() {
    let pos = fen("r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3");
    let mut engine = engine(4);
    let first = engine.search(&pos).expect("valid config");
    let second = engine.search(&pos).expect("valid config");
    assert_eq!(first.best_move, second.best_move);
    assert_eq!(first.score, second.score);
    assert_eq!(first.nodes, second.nodes);
}

#[test]
fn test_principal_variation_is_playable() {
    let pos = fen("r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3");
    let mut engine = engine(4);
    let result = engine.search(&pos).expect("valid config");

    assert!(!result.pv.is_empty());
    assert_eq!(result.pv.first().copied(), result.best_move);
    assert!(result.pv.len() <= 4);

    let mut walk = pos.clone();
    for &step in &result.pv {
        assert!(walk.legal_moves().contains(&step), "{} not legal", step);
        walk.make_move(step);
    }

    let tt = engine.transposition_table();
    assert!(!tt.is_empty());
    assert!(tt.hits + tt.misses > 0);
}

#[test]
fn test_quiescence_stands_pat_over_losing_capture() {
    // The only capture, Qxd5, runs into c6xd5
    let mut pos = fen("4k3/8/2p5/3p4/8/8/8/3QK3 w - - 0 1");
    let mut ctx = SearchContext::new();
    ctx.reset(1, Duration::from_secs(60));
    let score = quiescence(&mut pos, -INFINITY, INFINITY, &mut ctx);
    assert_eq!(score, evaluate(&pos));
}

#[test]
fn test_quiescence_takes_winning_capture() {
    let mut pos = fen("4k3/8/8/3q4/8/8/8/3QK3 w - - 0 1");
    let before = pos.clone();
    let mut ctx = SearchContext::new();
    ctx.reset(1, Duration::from_secs(60));
    let score = quiescence(&mut pos, -INFINITY, INFINITY, &mut ctx);
    assert!(score > evaluate(&pos) + 500, "score {}", score);
    assert_eq!(pos, before);
}

#[test]
fn test_aspiration_fail_high_researches_full_window() {
    // Two rooks mate in two. Depth 3 only sees the material edge, depth 4 sees
    // mate, far above the window centred on the depth 3 score.
    let pos = fen("7k/8/8/8/8/8/1R6/R3K3 w - - 0 1");
    let mut engine = engine(8);
    let result = engine.search(&pos).expect("valid config");

    assert_eq!(result.depth, 4);
    // The exact full-window value, not the window's upper edge
    assert_eq!(result.score, MATE_SCORE - 1);
    assert!(engine.context().aspiration_researches >= 1);

    let shallow = search(&pos, 3);
    assert!(!shallow.is_mate());
    assert!(result.score - shallow.score > 50);
}

#[test]
fn test_stable_score_needs_no_research() {
    let pos = fen("4k3/8/8/8/8/8/8/R3K3 w - - 0 1");
    let mut engine = engine(3);
    engine.search(&pos).expect("valid config");
    // Aspiration windows only start at depth 4
    assert_eq!(engine.context().aspiration_researches, 0);
}
