// Move ordering for alpha-beta search
//
// Good ordering is what makes alpha-beta prune. Moves are placed in bands:
//   1. the transposition-table move for this node
//   2. captures and promotions, by static exchange gain
//   3. the two killer moves for this ply
//   4. remaining quiet moves, by history score

use crate::game_repr::{Move, MoveList, Position};
use super::see::see;
use smallvec::SmallVec;

const TT_MOVE_SCORE: i32 = i32::MAX;
const TACTICAL_BIAS: i32 = 1_000_000;
const KILLER_SCORE: i32 = 900_000;
/// History scores are clamped below the killer band
const HISTORY_CAP: i32 = KILLER_SCORE - 10;

/// Two quiet moves per ply that recently caused a beta cutoff
pub struct KillerMoves {
    slots: Vec<[Option<Move>; 2]>,
}

impl KillerMoves {
    pub fn new(plies: usize) -> Self {
        Self {
            slots: vec![[None; 2]; plies],
        }
    }

    /// Empty every slot and resize to `plies`
    pub fn reset(&mut self, plies: usize) {
        self.slots.clear();
        self.slots.resize(plies, [None; 2]);
    }

    pub fn get(&self, ply: usize) -> [Option<Move>; 2] {
        self.slots.get(ply).copied().unwrap_or([None; 2])
    }

    /// Newest killer goes first; the older one is kept in the second slot
    pub fn store(&mut self, ply: usize, mv: Move) {
        if let Some(slot) = self.slots.get_mut(ply) {
            if slot[0] != Some(mv) {
                slot[1] = slot[0];
                slot[0] = Some(mv);
            }
        }
    }

    pub fn is_killer(&self, ply: usize, mv: Move) -> bool {
        self.get(ply).contains(&Some(mv))
    }
}

/// Cutoff counts keyed by (from, to), weighted by depth squared
pub struct HistoryTable {
    scores: Box<[[i32; 64]; 64]>,
}

impl HistoryTable {
    pub fn new() -> Self {
        Self {
            scores: Box::new([[0; 64]; 64]),
        }
    }

    pub fn clear(&mut self) {
        for row in self.scores.iter_mut() {
            row.fill(0);
        }
    }

    pub fn record(&mut self, mv: Move, depth: i32) {
        let entry = &mut self.scores[mv.from()][mv.to()];
        *entry = entry.saturating_add(depth * depth).min(HISTORY_CAP);
    }

    #[inline]
    pub fn score(&self, mv: Move) -> i32 {
        self.scores[mv.from()][mv.to()]
    }
}

impl Default for HistoryTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Ordering key for a single move; higher is searched first
pub fn score_move(
    pos: &Position,
    mv: Move,
    tt_move: Option<Move>,
    killers: [Option<Move>; 2],
    history: &HistoryTable,
) -> i32 {
    if tt_move == Some(mv) {
        return TT_MOVE_SCORE;
    }

    if pos.is_capture(mv) || mv.is_promotion() {
        let promo_bonus = mv.promotion().map_or(0, |t| t.value());
        return TACTICAL_BIAS + see(pos, mv) + promo_bonus;
    }

    if killers[0] == Some(mv) {
        return KILLER_SCORE;
    }
    if killers[1] == Some(mv) {
        return KILLER_SCORE - 1;
    }

    history.score(mv)
}

/// Sort `moves` in place, best candidates first
///
/// The sort is stable, so moves with equal keys keep generation order.
pub fn order_moves(
    pos: &Position,
    moves: &mut MoveList,
    tt_move: Option<Move>,
    killers: [Option<Move>; 2],
    history: &HistoryTable,
) {
    let mut scored: SmallVec<[(i32, Move); 64]> = moves
        .iter()
        .map(|&mv| (score_move(pos, mv, tt_move, killers, history), mv))
        .collect();
    scored.sort_by(|a, b| b.0.cmp(&a.0));

    moves.clear();
    moves.extend(scored.into_iter().map(|(_, mv)| mv));
}

/// Captures only, by static exchange gain (used by quiescence)
pub fn order_captures(pos: &Position, moves: &mut MoveList) {
    let mut scored: SmallVec<[(i32, Move); 64]> = moves
        .iter()
        .map(|&mv| {
            let promo_bonus = mv.promotion().map_or(0, |t| t.value());
            (see(pos, mv) + promo_bonus, mv)
        })
        .collect();
    scored.sort_by(|a, b| b.0.cmp(&a.0));

    moves.clear();
    moves.extend(scored.into_iter().map(|(_, mv)| mv));
}
