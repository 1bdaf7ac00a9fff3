/// Errors produced while building a board from a move list.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("could not parse '{0}' as a valid move")]
    InvalidMove(char),

    #[error("Invalid move, column {0} full")]
    ColumnFull(usize),

    #[error("Invalid position, game is over")]
    GameOver,
}

/// Errors returned by the engine when asked for a move.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("the game is already won, there is no move to make")]
    GameOver,

    #[error("the board is full, there is no move to make")]
    NoLegalMoves,
}

/// Errors raised when validating a search configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("config validation error: {0}")]
    Validation(String),
}
