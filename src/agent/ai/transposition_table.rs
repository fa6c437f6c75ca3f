// Transposition Table
//
// Caches search results keyed by the position's Zobrist hash. The hash is
// maintained incrementally by `Position::make_move`, so lookups never
// recompute it. When the table grows past its capacity it is simply cleared.

use crate::game_repr::Move;
use log::debug;
use std::collections::HashMap;

/// Entries kept before the table is wiped
pub const DEFAULT_CAPACITY: usize = 500_000;

/// How the stored score relates to the true value of the position
///
/// - Exact: every move was searched inside the window
/// - LowerBound: a move failed high, the true score is at least this
/// - UpperBound: every move failed low, the true score is at most this
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeType {
    Exact,
    LowerBound,
    UpperBound,
}

#[derive(Debug, Clone, Copy)]
pub struct TranspositionTableEntry {
    /// Full hash, kept so entries can be sanity-checked after lookup
    pub hash: u64,
    /// Remaining depth the score was computed with
    pub depth: i32,
    pub score: i32,
    /// Best move found at this node, used to seed ordering and the PV
    pub best_move: Option<Move>,
    pub node_type: NodeType,
}

pub struct TranspositionTable {
    table: HashMap<u64, TranspositionTableEntry>,
    max_size: usize,
    /// Successful probes since the last clear
    pub hits: u64,
    /// Failed probes since the last clear
    pub misses: u64,
}

impl TranspositionTable {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// # Arguments
    /// * `max_size` - Number of entries kept before the table is cleared
    pub fn with_capacity(max_size: usize) -> Self {
        Self {
            table: HashMap::with_capacity(max_size.min(65_536)),
            max_size,
            hits: 0,
            misses: 0,
        }
    }

    pub fn probe(&mut self, hash: u64) -> Option<TranspositionTableEntry> {
        match self.table.get(&hash) {
            Some(entry) if entry.hash == hash => {
                self.hits += 1;
                Some(*entry)
            }
            _ => {
                self.misses += 1;
                None
            }
        }
    }

    /// Stored best move for a position, without touching the statistics
    pub fn best_move(&self, hash: u64) -> Option<Move> {
        self.table.get(&hash).and_then(|entry| entry.best_move)
    }

    /// Insert or overwrite the entry for `entry.hash`
    ///
    /// Once the table holds more than `max_size` entries it is wiped in one go.
    pub fn store(&mut self, entry: TranspositionTableEntry) {
        if self.table.len() >= self.max_size && !self.table.contains_key(&entry.hash) {
            debug!("transposition table full ({} entries), clearing", self.table.len());
            self.table.clear();
        }
        self.table.insert(entry.hash, entry);
    }

    pub fn clear(&mut self) {
        self.table.clear();
        self.hits = 0;
        self.misses = 0;
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Percentage of probes that found an entry
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 * 100.0 / total as f64
        }
    }
}

impl Default for TranspositionTable {
    fn default() -> Self {
        Self::new()
    }
}
