//! Search depth and phase scheduling parameters.

use crate::error::ConfigError;
use crate::evaluator::SCORE_DECAY_DEPTH;

/// Configuration of the engine's search schedule.
///
/// Early in the game the engine searches `starting_depth` plies with the
/// tactical heuristic, deepening by `deepening_step` every second decision
/// until `deepening_limit`. After `exhaustive_after` decisions it switches to
/// the exact evaluator at `max_depth`, which is deep enough to reach the end
/// of the game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    /// Nominal search depth of the first decision.
    pub starting_depth: usize,

    /// Search depth once exhaustive search begins. Must not exceed
    /// `SCORE_DECAY_DEPTH`, so that win and loss scores stay distinguishable.
    pub max_depth: usize,

    /// Nodes with at most this many plies left search their children without
    /// the transposition table, until exhaustive search begins.
    pub starting_cache_depth: usize,

    /// Cache bypass depth during exhaustive search.
    pub max_cache_depth: usize,

    /// Number of decisions after which exhaustive search begins.
    pub exhaustive_after: usize,

    /// The nominal depth only grows while it is below this limit.
    pub deepening_limit: usize,

    /// Plies added to the nominal depth every second decision.
    pub deepening_step: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            starting_depth: 9,
            max_depth: 27,
            starting_cache_depth: 3,
            max_cache_depth: 12,
            exhaustive_after: 8,
            deepening_limit: 13,
            deepening_step: 2,
        }
    }
}

impl SearchConfig {
    /// A shallow schedule that keeps every decision fast, for tests.
    pub fn for_testing() -> Self {
        Self {
            starting_depth: 5,
            max_depth: 11,
            starting_cache_depth: 2,
            max_cache_depth: 5,
            exhaustive_after: 4,
            deepening_limit: 7,
            deepening_step: 2,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.starting_depth == 0 {
            return Err(ConfigError::Validation(
                "starting_depth must be > 0".to_string(),
            ));
        }
        if self.max_depth > SCORE_DECAY_DEPTH {
            return Err(ConfigError::Validation(format!(
                "max_depth must be <= {}, got {}",
                SCORE_DECAY_DEPTH, self.max_depth
            )));
        }
        if self.starting_depth > self.max_depth {
            return Err(ConfigError::Validation(format!(
                "starting_depth ({}) must be <= max_depth ({})",
                self.starting_depth, self.max_depth
            )));
        }
        if self.exhaustive_after == 0 {
            return Err(ConfigError::Validation(
                "exhaustive_after must be > 0".to_string(),
            ));
        }
        Ok(())
    }
}
