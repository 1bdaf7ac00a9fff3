use std::collections::HashMap;

use parking_lot::Mutex;

use crate::{bitboard::BitBoard, move_order::MoveOrder};

/// Initial capacity, enough for a typical decision without rehashing
const TABLE_CAPACITY: usize = 300_000;

/// How a stored value relates to the true value of a position
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Bound {
    /// The search completed inside its window
    Exact,
    /// The search failed high, the true value is at least the stored value
    LowerBound,
    /// The search failed low, the true value is at most the stored value
    UpperBound,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Entry {
    pub bound: Bound,
    pub value: i32,
    /// Ordering rooted at the best move found
    pub order: MoveOrder,
}

impl Entry {
    /// Classifies `value` against the window `[alpha, beta]` it was searched with
    pub fn classify(value: i32, alpha: i32, beta: i32, order: MoveOrder) -> Self {
        let bound = if value <= alpha {
            Bound::UpperBound
        } else if value >= beta {
            Bound::LowerBound
        } else {
            Bound::Exact
        };
        Self {
            bound,
            value,
            order,
        }
    }
}

/// Search results shared between all threads of one decision.
///
/// Entries are only valid for the depth and evaluator they were searched with,
/// so the table must be cleared between decisions.
pub struct TranspositionTable {
    entries: Mutex<HashMap<BitBoard, Entry>>,
}

impl TranspositionTable {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::with_capacity(TABLE_CAPACITY)),
        }
    }

    pub fn get(&self, board: &BitBoard) -> Option<Entry> {
        self.entries.lock().get(board).copied()
    }

    pub fn set(&self, board: BitBoard, entry: Entry) {
        self.entries.lock().insert(board, entry);
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&mut self) {
        self.entries.get_mut().clear();
    }
}

impl Default for TranspositionTable {
    fn default() -> Self {
        Self::new()
    }
}
