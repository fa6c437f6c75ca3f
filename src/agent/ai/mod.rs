// AI Agent - Negamax with Alpha-Beta Pruning
//
// Classical chess search: iterative deepening over a principal variation
// search with null-move pruning, late move reductions and a transposition
// table, resolving the horizon with a capture-only quiescence search.
//
// Key features:
// - Deterministic (same position and budget always give the same move)
// - Fresh tables for every top-level search
// - Static exchange evaluation for capture ordering and pruning
// - Killer and history heuristics for quiet moves

mod config;
mod evaluation;
mod move_ordering;
mod negamax;
mod negamax_player;
mod piece_square_tables;
mod quiescence;
mod search;
mod see;
mod transposition_table;

#[cfg(test)]
mod tests;

pub use config::{EngineConfig, MAX_SEARCH_DEPTH};
pub use evaluation::{evaluate, evaluate_for, is_endgame, ENDGAME_MATERIAL};
pub use negamax::{is_mate_score, MATE_SCORE, MATE_THRESHOLD};
pub use negamax_player::{Difficulty, NegamaxPlayer};
pub use search::{SearchEngine, SearchResult};
pub use see::see;
pub use transposition_table::{NodeType, TranspositionTable, TranspositionTableEntry};
