//! Leaf evaluation for the game tree search
//!
//! # Position Scoring
//! Scores are always from the point of view of the player to move. A won
//! position scores close to [`WINNING_VALUE`], offset by the remaining search
//! depth so that faster wins score higher and slower losses score higher than
//! fast ones. Any position without a winner scores either the threat heuristic
//! ([`Evaluator::Tactical`]) or 0 ([`Evaluator::Exact`]).

use crate::bitboard::BitBoard;

/// Score of a won position before the depth offset
pub const WINNING_VALUE: i32 = 1_000_000;
/// Score of a lost position before the depth offset
pub const LOSING_VALUE: i32 = -1_000_000;
/// The deepest search the depth offset of win and loss scores allows for
pub const SCORE_DECAY_DEPTH: usize = 27;

/// Lower end of the full search window, below any real score
pub const NEG_INFINITY: i32 = LOSING_VALUE - 1;
/// Upper end of the full search window, above any real score
pub const POS_INFINITY: i32 = WINNING_VALUE + 1;

/// Leaf scoring strategy
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Evaluator {
    /// Scores open threats by row parity, used while the search can't reach
    /// the end of the game
    Tactical,
    /// Scores only wins and losses, for exhaustive end-game search
    Exact,
}

impl Evaluator {
    /// Scores `board` for the player to move, with `depth` plies of search left
    pub fn evaluate(self, board: &BitBoard, depth: usize) -> i32 {
        let depth = depth as i32;
        match board.winner() {
            Some(winner) if winner == board.to_move() => {
                WINNING_VALUE - SCORE_DECAY_DEPTH as i32 + depth
            }
            Some(_) => LOSING_VALUE + SCORE_DECAY_DEPTH as i32 - depth,
            None => match self {
                Evaluator::Tactical => board.weighted_open_three_in_a_rows(board.to_move()),
                Evaluator::Exact => 0,
            },
        }
    }
}

/// What a root score says about the outcome of the game
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outlook {
    Undecided,
    /// The player to move can force a win
    ForcedWin,
    /// The opponent can force a win
    ForcedLoss,
}

impl Outlook {
    pub fn from_score(score: i32) -> Self {
        if score >= WINNING_VALUE - SCORE_DECAY_DEPTH as i32 {
            Outlook::ForcedWin
        } else if score <= LOSING_VALUE + SCORE_DECAY_DEPTH as i32 {
            Outlook::ForcedLoss
        } else {
            Outlook::Undecided
        }
    }
}
