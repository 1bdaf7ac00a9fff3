//! A game tree search agent for the board game 'Connect 4'
//!
//! The agent looks a fixed number of moves ahead with a tactical heuristic
//! early in the game, and switches to an exhaustive win/loss/draw search once
//! the remaining game tree is small enough to be searched to the end.
//!
//! # Basic Usage
//!
//! ```no_run
//! use connect4_scout::{bitboard::BitBoard, engine::Engine};
//!
//!# use std::error::Error;
//!# fn main() -> Result<(), Box<dyn Error>> {
//! let mut engine = Engine::new();
//! let mut board = BitBoard::new();
//!
//! let column = engine.best_move(&board)?;
//! board.drop_chip(column);
//!# Ok(())
//!# }
//! ```

use static_assertions::*;
pub use anyhow;

pub mod error;

pub mod config;

pub mod bitboard;

pub mod move_order;

pub mod evaluator;

pub mod transposition_table;

pub mod solver;

pub mod engine;


pub use bitboard::{BitBoard, Player};
pub use config::SearchConfig;
pub use engine::{Decision, Engine};
pub use error::{BoardError, ConfigError, EngineError};

/// The width of the game board in tiles
pub const WIDTH: usize = 7;

/// The height of the game board in tiles
pub const HEIGHT: usize = 6;

/// Distance in bits between vertically adjacent tiles (one padded byte per row)
pub const ROW_STRIDE: usize = 8;

// every row needs at least one padding bit, and all rows must fit in a u64
const_assert!(WIDTH < ROW_STRIDE);
const_assert!(ROW_STRIDE * HEIGHT <= 64);
