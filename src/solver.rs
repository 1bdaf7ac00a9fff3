//! Negascout game tree search

use std::cmp::{max, min};

use crate::{
    bitboard::BitBoard,
    evaluator::{Evaluator, NEG_INFINITY},
    move_order::MoveOrder,
    transposition_table::{Bound, Entry, TranspositionTable},
};

/// A Negascout (principal variation) searcher for one root move
///
/// # Notes
/// The first child of every node is searched with the full window. Every
/// later child is only probed with a null window just above the best score so
/// far, and re-searched with the full window if the probe fails high. With good
/// move ordering most probes fail low, which is much cheaper than a full search.
///
/// Scores follow the negamax convention: a node's score is from the point of
/// view of the player to move there, and is negated when passed to the parent.
pub struct Solver<'a> {
    transposition_table: &'a TranspositionTable,
    evaluator: Evaluator,
    // nodes with at most this much depth left search their children uncached
    max_cache_depth: usize,

    /// The number of nodes searched by this `Solver` so far (for diagnostics only)
    pub node_count: usize,
}

impl<'a> Solver<'a> {
    pub fn new(
        transposition_table: &'a TranspositionTable,
        evaluator: Evaluator,
        max_cache_depth: usize,
    ) -> Self {
        Self {
            transposition_table,
            evaluator,
            max_cache_depth,
            node_count: 0,
        }
    }

    fn is_terminal(node: &BitBoard, depth: usize) -> bool {
        depth == 0 || node.winner().is_some() || node.is_board_full()
    }

    /// Searches `node` to `depth` plies without the transposition table
    ///
    /// Returns the exact score if it lies strictly inside `(alpha, beta)`, an
    /// upper bound if the result is `<= alpha`, and a lower bound if it is `>= beta`.
    pub fn negascout(&mut self, node: &BitBoard, depth: usize, alpha: i32, beta: i32) -> i32 {
        self.node_count += 1;

        if Self::is_terminal(node, depth) {
            return self.evaluator.evaluate(node, depth);
        }

        let mut best = NEG_INFINITY;
        let mut n = beta;
        for &column in MoveOrder::DEFAULT.columns() {
            if node.is_column_full(column) {
                continue;
            }
            let mut child = *node;
            child.drop_chip(column);

            // the search window is flipped for the other player
            let t = -self.negascout(&child, depth - 1, -n, -max(alpha, best));
            if t > best {
                best = if n == beta || t >= beta || t <= alpha {
                    t
                } else {
                    // the probe failed high, find the actual score
                    -self.negascout(&child, depth - 1, -beta, -t)
                };
            }
            // a perfect opponent will not pick this branch
            if best >= beta {
                return best;
            }
            n = max(alpha, best) + 1;
        }
        best
    }

    /// Searches `node` to `depth` plies, reading and updating the transposition table
    ///
    /// Returns the same score as [`Solver::negascout`] would for the window.
    pub fn negascout_cache(
        &mut self,
        node: &BitBoard,
        depth: usize,
        alpha: i32,
        beta: i32,
    ) -> i32 {
        self.node_count += 1;

        let mut best = NEG_INFINITY;
        let mut upper = beta;
        let mut trial_order = MoveOrder::DEFAULT;

        // try to fetch the score or a bound on it from the transposition table
        if let Some(entry) = self.transposition_table.get(node) {
            match entry.bound {
                Bound::Exact => return entry.value,
                Bound::LowerBound => best = max(best, entry.value),
                Bound::UpperBound => upper = min(upper, entry.value),
            }
            // the stored bound already falls outside the window
            if best >= upper || upper <= alpha {
                return entry.value;
            }
            trial_order = entry.order;
        }

        if Self::is_terminal(node, depth) {
            return self.evaluator.evaluate(node, depth);
        }

        let cache_children = depth > self.max_cache_depth;
        let mut best_order = trial_order;
        let mut n = upper;
        for &column in trial_order.columns() {
            if node.is_column_full(column) {
                continue;
            }
            let mut child = *node;
            child.drop_chip(column);

            let t = -self.search(cache_children, &child, depth - 1, -n, -max(alpha, best));
            if t > best {
                best = if n == upper || t >= upper || t <= alpha {
                    t
                } else {
                    -self.search(cache_children, &child, depth - 1, -upper, -t)
                };
                best_order = MoveOrder::rooted_at(column);
            }
            if best >= upper {
                break;
            }
            n = max(alpha, best) + 1;
        }

        // bounds are relative to the caller's window, not the narrowed one
        self.transposition_table
            .set(*node, Entry::classify(best, alpha, beta, best_order));
        best
    }

    fn search(
        &mut self,
        cached: bool,
        node: &BitBoard,
        depth: usize,
        alpha: i32,
        beta: i32,
    ) -> i32 {
        if cached {
            self.negascout_cache(node, depth, alpha, beta)
        } else {
            self.negascout(node, depth, alpha, beta)
        }
    }
}
