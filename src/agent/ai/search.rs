// Iterative Deepening Search Orchestrator
//
// Searches depths 1, 2, 3, ... up to the configured maximum, re-using the
// previous iteration's best move and the shared tables to order the next.
// From depth 4 on the search starts with a narrow aspiration window around
// the last score and widens to a full window when the result falls outside.

use crate::error::ConfigError;
use crate::game_repr::{Move, MoveList, Position};
use super::config::EngineConfig;
use super::move_ordering::order_moves;
use super::negamax::{is_mate_score, negamax, SearchContext, INFINITY, MATE_SCORE};
use super::transposition_table::TranspositionTable;
use log::{debug, info, warn};
use std::collections::HashSet;
use std::time::Duration;

/// Half-width of the aspiration window, in centipawns
const ASPIRATION_WINDOW: i32 = 50;
const ASPIRATION_MIN_DEPTH: u8 = 4;

/// Result of a search operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    /// None only when the root has no legal move
    pub best_move: Option<Move>,
    /// Score of `best_move` for the side to move, in centipawns
    pub score: i32,
    /// Deepest iteration that contributed the result
    pub depth: u8,
    pub nodes: u64,
    pub elapsed: Duration,
    /// Expected line of play, rebuilt from the transposition table
    pub pv: Vec<Move>,
}

impl SearchResult {
    /// Create a new search result with no move found
    pub fn new() -> Self {
        Self {
            best_move: None,
            score: 0,
            depth: 0,
            nodes: 0,
            elapsed: Duration::ZERO,
            pv: Vec::new(),
        }
    }

    pub fn is_mate(&self) -> bool {
        is_mate_score(self.score)
    }
}

impl Default for SearchResult {
    fn default() -> Self {
        Self::new()
    }
}

/// Best root move of one iteration
#[derive(Debug, Clone, Copy)]
struct RootOutcome {
    best_move: Option<Move>,
    score: i32,
}

/// Whether an iteration cut short by the clock may replace the last
/// completed one. `exact` is false when the score is only a bound from
/// outside an aspiration window.
fn keep_interrupted(previous: &SearchResult, outcome: &RootOutcome, exact: bool) -> bool {
    match (previous.best_move, outcome.best_move) {
        (_, None) => false,
        (None, Some(_)) => true,
        (Some(_), Some(_)) => exact && outcome.score > previous.score,
    }
}

/// Configured search engine; owns its tables between calls
///
/// All tables are wiped at the start of every `search`, so results depend
/// only on the position and the configuration.
pub struct SearchEngine {
    config: EngineConfig,
    ctx: SearchContext,
}

impl SearchEngine {
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            ctx: SearchContext::new(),
        })
    }

    pub fn config(&self) -> EngineConfig {
        self.config
    }

    /// Table statistics from the most recent search
    pub fn transposition_table(&self) -> &TranspositionTable {
        &self.ctx.tt
    }

    pub(super) fn context(&self) -> &SearchContext {
        &self.ctx
    }

    /// Perform iterative deepening search to find the best move
    ///
    /// # Arguments
    /// * `pos` - Position to search; the caller's copy is never modified
    ///
    /// # Returns
    /// SearchResult containing the best move and search statistics.
    /// `best_move` is `Some` whenever the side to move has a legal move.
    pub fn search(&mut self, pos: &Position) -> Result<SearchResult, ConfigError> {
        self.config.validate()?;
        let max_depth = self.config.max_depth;
        let ctx = &mut self.ctx;
        ctx.reset(max_depth, self.config.time_limit);

        let mut root = pos.clone();
        let mut moves = MoveList::new();
        root.legal_moves_into(&mut moves);

        let mut result = SearchResult::new();
        if moves.is_empty() {
            result.score = if root.is_in_check(root.side_to_move()) { -MATE_SCORE } else { 0 };
            info!("no legal moves in {}", root.to_fen());
            return Ok(result);
        }

        for depth in 1..=max_depth {
            if ctx.check_time() {
                break;
            }
            order_moves(&root, &mut moves, result.best_move, [None; 2], &ctx.history);

            let (outcome, exact) = if depth >= ASPIRATION_MIN_DEPTH {
                let alpha = result.score - ASPIRATION_WINDOW;
                let beta = result.score + ASPIRATION_WINDOW;
                let outcome = search_root(&mut root, &moves, depth as i32, alpha, beta, ctx);
                let inside = outcome.score > alpha && outcome.score < beta;
                if !ctx.stopped() && !inside {
                    debug!(
                        "depth {}: score {} outside aspiration window [{}, {}], re-searching",
                        depth, outcome.score, alpha, beta
                    );
                    ctx.aspiration_researches += 1;
                    let full = search_root(&mut root, &moves, depth as i32, -INFINITY, INFINITY, ctx);
                    (full, true)
                } else {
                    (outcome, inside)
                }
            } else {
                let full = search_root(&mut root, &moves, depth as i32, -INFINITY, INFINITY, ctx);
                (full, true)
            };

            if ctx.stopped() {
                if keep_interrupted(&result, &outcome, exact) {
                    if let Some(mv) = outcome.best_move {
                        debug!("depth {} interrupted, keeping {} ({})", depth, mv, outcome.score);
                    }
                    result.best_move = outcome.best_move;
                    result.score = outcome.score;
                    result.depth = depth;
                }
                break;
            }

            result.best_move = outcome.best_move;
            result.score = outcome.score;
            result.depth = depth;

            info!(
                "depth {} score {} nodes {} time {}ms best {}",
                depth,
                outcome.score,
                ctx.nodes,
                ctx.elapsed().as_millis(),
                outcome.best_move.map_or_else(|| "none".to_string(), |mv| mv.to_string()),
            );

            if is_mate_score(outcome.score) {
                break;
            }
        }

        if result.best_move.is_none() {
            warn!("search found no move in time, falling back to the first legal move");
            result.best_move = moves.first().copied();
        }

        result.nodes = ctx.nodes;
        result.elapsed = ctx.elapsed();
        result.pv = principal_variation(&root, result.best_move, result.depth.max(1), &ctx.tt);
        debug!(
            "transposition table: {} entries, {:.1}% hit rate",
            ctx.tt.len(),
            ctx.tt.hit_rate()
        );

        Ok(result)
    }
}

impl Default for SearchEngine {
    fn default() -> Self {
        Self {
            config: EngineConfig::default(),
            ctx: SearchContext::new(),
        }
    }
}

/// Search every root move at `depth` with principal variation search
///
/// `moves` must all be legal. The clock is read before each move; a move
/// interrupted by the clock never contributes to the outcome.
fn search_root(
    pos: &mut Position,
    moves: &[Move],
    depth: i32,
    mut alpha: i32,
    beta: i32,
    ctx: &mut SearchContext,
) -> RootOutcome {
    let mut best = RootOutcome {
        best_move: None,
        score: -INFINITY,
    };

    for (i, &mv) in moves.iter().enumerate() {
        if ctx.check_time() {
            break;
        }

        let undo = pos.make_move(mv);
        let score = if i == 0 {
            -negamax(pos, depth - 1, -beta, -alpha, 1, true, ctx)
        } else {
            let mut score = -negamax(pos, depth - 1, -alpha - 1, -alpha, 1, true, ctx);
            if score > alpha && score < beta {
                score = -negamax(pos, depth - 1, -beta, -alpha, 1, true, ctx);
            }
            score
        };
        pos.unmake_move(undo);

        if ctx.stopped() {
            break;
        }
        if score > best.score {
            best = RootOutcome {
                best_move: Some(mv),
                score,
            };
        }
        if score > alpha {
            alpha = score;
        }
        if alpha >= beta {
            break;
        }
    }

    best
}

/// Follow stored best moves from the root, stopping at an illegal move,
/// a repeated position or `max_len` moves
fn principal_variation(
    root: &Position,
    first: Option<Move>,
    max_len: u8,
    tt: &TranspositionTable,
) -> Vec<Move> {
    let mut pv = Vec::new();
    let mut pos = root.clone();
    let mut seen = HashSet::new();
    seen.insert(pos.hash());

    let mut next = first;
    while let Some(mv) = next {
        if pv.len() >= max_len as usize || !pos.legal_moves().contains(&mv) {
            break;
        }
        pos.make_move(mv);
        pv.push(mv);
        if !seen.insert(pos.hash()) {
            break;
        }
        next = tt.best_move(pos.hash());
    }

    pv
}
