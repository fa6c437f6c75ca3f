// Negamax Search with Alpha-Beta Pruning
//
// Negamax relies on the zero-sum property of chess: max(a, b) = -min(-a, -b).
// One function searches for both sides and negates the score at each ply.
//
// Alpha-Beta Pruning optimizations:
// - Transposition table for position caching and hash-move ordering
// - Null move pruning for early cutoffs
// - Principal Variation Search (PVS) with zero-window probes
// - Late Move Reductions (LMR) for quiet moves sorted late
// - Killer move and history heuristics for quiet move ordering
// - Quiescence search at the horizon
//
// Scores are from the perspective of the side to move.

use crate::game_repr::{Move, MoveList, Position};
use super::move_ordering::{order_moves, HistoryTable, KillerMoves};
use super::quiescence::quiescence;
use super::transposition_table::{NodeType, TranspositionTable, TranspositionTableEntry};
use log::trace;
use once_cell::sync::Lazy;
use std::time::{Duration, Instant};

/// Checkmate score. Being mated with `d` plies of depth left scores
/// `-(MATE_SCORE - d)`, so mates nearer the root are larger in magnitude.
pub const MATE_SCORE: i32 = 20_000;

/// Any score at least this large in magnitude means a forced mate was found
pub const MATE_THRESHOLD: i32 = 15_000;

/// Bound used for open windows
pub const INFINITY: i32 = MATE_SCORE + 1_000;

/// Null move reduction depth
const NULL_MOVE_REDUCTION: i32 = 2;

/// Minimum depth to attempt null move pruning
const NULL_MOVE_MIN_DEPTH: i32 = 3;

/// Non-king material (both sides) required before passing the turn is trusted
const NULL_MOVE_MIN_MATERIAL: i32 = 1500;

const LMR_MIN_DEPTH: i32 = 3;
/// Moves already searched at this node before reductions kick in
const LMR_MIN_MOVES: usize = 3;

/// Clock is read once per this many nodes
const TIME_CHECK_INTERVAL: u64 = 2048;

/// LMR[depth][move_index] = 0.5 + ln(depth) * ln(move_index) / 2
static LMR: Lazy<[[i32; 33]; 9]> = Lazy::new(|| {
    let mut table = [[0; 33]; 9];
    for (depth, row) in table.iter_mut().enumerate().skip(1) {
        for (index, cell) in row.iter_mut().enumerate().skip(1) {
            *cell = (0.5 + (depth as f64).ln() * (index as f64).ln() / 2.0) as i32;
        }
    }
    table
});

/// Passing the turn is only trusted with enough material on the board, out of
/// check, and deep enough for the reduced search to mean something
#[inline]
fn null_move_allowed(pos: &Position, depth: i32, in_check: bool) -> bool {
    !in_check && depth >= NULL_MOVE_MIN_DEPTH && pos.non_king_material() > NULL_MOVE_MIN_MATERIAL
}

#[inline]
fn lmr_reduction(depth: i32, move_index: usize) -> i32 {
    LMR[(depth as usize).min(8)][move_index.min(32)]
}

/// Everything one top-level search owns: caches, ordering tables and the clock
pub struct SearchContext {
    pub tt: TranspositionTable,
    pub killers: KillerMoves,
    pub history: HistoryTable,
    pub nodes: u64,
    /// Null-move searches tried, for diagnostics
    pub null_searches: u64,
    /// Iterations re-searched with a full window after leaving the aspiration window
    pub aspiration_researches: u32,
    start: Instant,
    time_limit: Duration,
    stopped: bool,
}

impl SearchContext {
    pub fn new() -> Self {
        Self {
            tt: TranspositionTable::new(),
            killers: KillerMoves::new(0),
            history: HistoryTable::new(),
            nodes: 0,
            null_searches: 0,
            aspiration_researches: 0,
            start: Instant::now(),
            time_limit: Duration::MAX,
            stopped: false,
        }
    }

    /// Fresh tables and clock for a new top-level search
    pub fn reset(&mut self, max_depth: u8, time_limit: Duration) {
        self.tt.clear();
        self.killers.reset(max_depth as usize + 16);
        self.history.clear();
        self.nodes = 0;
        self.null_searches = 0;
        self.aspiration_researches = 0;
        self.start = Instant::now();
        self.time_limit = time_limit;
        self.stopped = false;
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    #[inline]
    pub fn stopped(&self) -> bool {
        self.stopped
    }

    /// Read the clock now, regardless of the node count
    pub fn check_time(&mut self) -> bool {
        if !self.stopped && self.start.elapsed() >= self.time_limit {
            trace!("time limit reached after {} nodes", self.nodes);
            self.stopped = true;
        }
        self.stopped
    }

    /// Count a node and, every few thousand nodes, look at the clock.
    /// Returns true once the search must unwind.
    #[inline]
    pub fn tick(&mut self) -> bool {
        self.nodes += 1;
        if self.nodes % TIME_CHECK_INTERVAL == 0 {
            self.check_time();
        }
        self.stopped
    }
}

impl Default for SearchContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Negamax search with alpha-beta pruning
///
/// # Arguments
///
/// * `pos` - Current position, restored before returning
/// * `depth` - Remaining search depth (0 or less = quiescence)
/// * `alpha` - Lower bound the side to move is already guaranteed
/// * `beta` - Upper bound the opponent will allow
/// * `ply` - Distance from the root, indexes the killer table
/// * `null_allowed` - False directly after a null move
/// * `ctx` - Tables and clock shared across the whole search
///
/// # Returns
///
/// Score from the side to move's perspective. Returns 0 after the clock
/// expires; callers must check `ctx.stopped()` before using it.
pub fn negamax(
    pos: &mut Position,
    depth: i32,
    mut alpha: i32,
    mut beta: i32,
    ply: usize,
    null_allowed: bool,
    ctx: &mut SearchContext,
) -> i32 {
    if depth <= 0 {
        return quiescence(pos, alpha, beta, ctx);
    }
    if ctx.tick() {
        return 0;
    }

    let hash = pos.hash();
    let mut tt_move = None;
    if let Some(entry) = ctx.tt.probe(hash) {
        tt_move = entry.best_move;
        if entry.depth >= depth {
            match entry.node_type {
                NodeType::Exact => return entry.score,
                NodeType::LowerBound => alpha = alpha.max(entry.score),
                NodeType::UpperBound => beta = beta.min(entry.score),
            }
            if alpha >= beta {
                return entry.score;
            }
        }
    }

    let us = pos.side_to_move();
    let in_check = pos.is_in_check(us);

    // Null move pruning: if passing still fails high the position is good enough
    if null_allowed && null_move_allowed(pos, depth, in_check) {
        ctx.null_searches += 1;
        let undo = pos.make_null_move();
        let score = -negamax(
            pos,
            depth - 1 - NULL_MOVE_REDUCTION,
            -beta,
            -beta + 1,
            ply + 1,
            false,
            ctx,
        );
        pos.unmake_move(undo);

        if ctx.stopped() {
            return 0;
        }
        if score >= beta {
            return beta;
        }
    }

    let mut moves = MoveList::new();
    pos.pseudo_legal_moves_into(&mut moves);
    let killers = ctx.killers.get(ply);
    order_moves(pos, &mut moves, tt_move, killers, &ctx.history);

    let original_alpha = alpha;
    let mut best_score = -INFINITY;
    let mut best_move: Option<Move> = None;
    let mut searched = 0usize;

    for mv in moves {
        let quiet = !pos.is_capture(mv) && !mv.is_promotion();
        let Some(undo) = pos.make_move_if_legal(mv) else {
            continue;
        };

        let score = if searched == 0 {
            -negamax(pos, depth - 1, -beta, -alpha, ply + 1, true, ctx)
        } else {
            let reduction = if quiet
                && !in_check
                && depth >= LMR_MIN_DEPTH
                && searched >= LMR_MIN_MOVES
                && !killers.contains(&Some(mv))
            {
                lmr_reduction(depth, searched).min(depth - 2)
            } else {
                0
            };

            let mut score = -negamax(pos, depth - 1 - reduction, -alpha - 1, -alpha, ply + 1, true, ctx);
            if reduction > 0 && score > alpha {
                score = -negamax(pos, depth - 1, -alpha - 1, -alpha, ply + 1, true, ctx);
            }
            if score > alpha && score < beta {
                score = -negamax(pos, depth - 1, -beta, -alpha, ply + 1, true, ctx);
            }
            score
        };

        pos.unmake_move(undo);
        if ctx.stopped() {
            return 0;
        }
        searched += 1;

        if score > best_score {
            best_score = score;
            best_move = Some(mv);
        }
        if score > alpha {
            alpha = score;
        }
        if alpha >= beta {
            if quiet {
                ctx.killers.store(ply, mv);
                ctx.history.record(mv, depth);
            }
            break;
        }
    }

    if searched == 0 {
        return if in_check { -(MATE_SCORE - depth) } else { 0 };
    }

    let node_type = if best_score <= original_alpha {
        NodeType::UpperBound
    } else if best_score >= beta {
        NodeType::LowerBound
    } else {
        NodeType::Exact
    };
    ctx.tt.store(TranspositionTableEntry {
        hash,
        depth,
        score: best_score,
        best_move,
        node_type,
    });

    best_score
}

/// True for scores that encode a forced mate for either side
pub fn is_mate_score(score: i32) -> bool {
    score.abs() >= MATE_THRESHOLD
}
