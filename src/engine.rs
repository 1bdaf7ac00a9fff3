//! The move-choosing agent: splits each decision into one parallel search per
//! column and keeps track of how deep to search as the game progresses.

use std::time::{Duration, Instant};

use rayon::prelude::*;
use tracing::{debug, info, trace};

use crate::{
    bitboard::BitBoard,
    config::SearchConfig,
    error::{ConfigError, EngineError},
    evaluator::{Evaluator, Outlook, NEG_INFINITY, POS_INFINITY},
    move_order::move_order,
    solver::Solver,
    transposition_table::TranspositionTable,
    WIDTH,
};

/// Search schedule state, advanced once per decision
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchPhase {
    moves_made: usize,
    search_depth: usize,
    evaluator: Evaluator,
    max_cache_depth: usize,
}

impl SearchPhase {
    pub(crate) fn starting(config: &SearchConfig) -> Self {
        Self {
            moves_made: 0,
            search_depth: config.starting_depth,
            evaluator: Evaluator::Tactical,
            max_cache_depth: config.starting_cache_depth,
        }
    }

    /// Decisions made since the start of the game
    pub fn moves_made(&self) -> usize {
        self.moves_made
    }

    pub fn search_depth(&self) -> usize {
        self.search_depth
    }

    pub fn evaluator(&self) -> Evaluator {
        self.evaluator
    }

    pub fn max_cache_depth(&self) -> usize {
        self.max_cache_depth
    }

    pub(crate) fn advance(&mut self, config: &SearchConfig) {
        self.moves_made += 1;
        if self.moves_made == config.exhaustive_after {
            self.search_depth = config.max_depth;
            self.evaluator = Evaluator::Exact;
            self.max_cache_depth = config.max_cache_depth;
            trace!(
                moves_made = self.moves_made,
                depth = self.search_depth,
                "switching to exhaustive search"
            );
        }
        if self.search_depth < config.deepening_limit && self.moves_made % 2 == 0 {
            self.search_depth = (self.search_depth + config.deepening_step).min(config.max_depth);
            trace!(depth = self.search_depth, "deepening search");
        }
    }
}

/// The result of one decision
#[derive(Clone, Debug)]
pub struct Decision {
    /// The chosen column, 0-indexed
    pub column: usize,
    /// Score of the chosen column for the player to move
    pub score: i32,
    /// Score of every column, `None` for full columns
    pub scores: [Option<i32>; WIDTH],
    pub outlook: Outlook,
    /// Nominal search depth used for the decision
    pub search_depth: usize,
    pub evaluator: Evaluator,
    /// Nodes searched across all threads (for diagnostics only)
    pub node_count: usize,
    pub elapsed: Duration,
}

/// A Connect 4 playing agent
///
/// One `Engine` plays one side of one game at a time: its search depth and
/// evaluator change as it makes decisions, and [`Engine::reset`] must be called
/// before starting a new game.
pub struct Engine {
    config: SearchConfig,
    phase: SearchPhase,
    transposition_table: TranspositionTable,
}

impl Engine {
    /// Creates an `Engine` with the default search schedule
    pub fn new() -> Self {
        Self::from_config(SearchConfig::default())
    }

    /// Creates an `Engine` with a custom search schedule
    pub fn with_config(config: SearchConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_config(config))
    }

    fn from_config(config: SearchConfig) -> Self {
        Self {
            phase: SearchPhase::starting(&config),
            config,
            transposition_table: TranspositionTable::new(),
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn phase(&self) -> &SearchPhase {
        &self.phase
    }

    /// Chooses the best column for the player to move
    pub fn best_move(&mut self, board: &BitBoard) -> Result<usize, EngineError> {
        self.analyse(board).map(|decision| decision.column)
    }

    /// Searches every playable column in parallel and chooses the best one
    ///
    /// Every column is searched to completion, even when one of them already
    /// wins. Ties go to the column nearest the middle.
    pub fn analyse(&mut self, board: &BitBoard) -> Result<Decision, EngineError> {
        if board.winner().is_some() {
            return Err(EngineError::GameOver);
        }
        if board.is_board_full() {
            return Err(EngineError::NoLegalMoves);
        }

        let start = Instant::now();
        let depth = self.phase.search_depth;
        let evaluator = self.phase.evaluator;
        let max_cache_depth = self.phase.max_cache_depth;
        let transposition_table = &self.transposition_table;

        let candidates: Vec<usize> = move_order()
            .iter()
            .copied()
            .filter(|&column| !board.is_column_full(column))
            .collect();

        // collected in candidate order, whatever order the searches finish in.
        // a panic in any search is resumed here by rayon once all tasks join
        let results: Vec<(usize, i32, usize)> = candidates
            .par_iter()
            .map(|&column| {
                let mut solver = Solver::new(transposition_table, evaluator, max_cache_depth);
                let mut child = *board;
                child.drop_chip(column);
                let score =
                    -solver.negascout_cache(&child, depth - 1, NEG_INFINITY, POS_INFINITY);
                debug!(column, score, nodes = solver.node_count, "searched root move");
                (column, score, solver.node_count)
            })
            .collect();

        let mut scores = [None; WIDTH];
        let mut best: Option<(usize, i32)> = None;
        let mut node_count = 0;
        for &(column, score, nodes) in results.iter() {
            scores[column] = Some(score);
            node_count += nodes;
            if best.map_or(true, |(_, best_score)| score > best_score) {
                best = Some((column, score));
            }
        }
        let (column, score) = best.ok_or(EngineError::NoLegalMoves)?;

        let decision = Decision {
            column,
            score,
            scores,
            outlook: Outlook::from_score(score),
            search_depth: depth,
            evaluator,
            node_count,
            elapsed: start.elapsed(),
        };
        info!(
            column,
            score,
            depth,
            nodes = node_count,
            table_entries = self.transposition_table.len(),
            elapsed_ms = decision.elapsed.as_millis() as u64,
            "chose move"
        );
        match decision.outlook {
            Outlook::ForcedWin => info!("winning moves found for the player to move"),
            Outlook::ForcedLoss => info!("winning moves found for the opponent"),
            Outlook::Undecided => {}
        }

        // entries are only valid for this decision's depth and evaluator
        self.transposition_table.clear();
        self.phase.advance(&self.config);

        Ok(decision)
    }

    /// Prepares the engine for a new game
    pub fn reset(&mut self) {
        self.phase = SearchPhase::starting(&self.config);
        self.transposition_table.clear();
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}
