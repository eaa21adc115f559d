use thiserror::Error;

/// Why a move request was refused. The engine state is untouched in every case.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveError {
    #[error("row/col out of range: ({row}, {col})")]
    OutOfRange { row: u8, col: u8 },

    #[error("square ({row}, {col}) is already occupied")]
    Occupied { row: u8, col: u8 },

    #[error("illegal move: ({row}, {col}) captures nothing")]
    NoCapture { row: u8, col: u8 },

    #[error("pass refused: the side to move has a legal move")]
    PassNotAllowed,

    #[error("game is already over")]
    GameOver,
}

/// Unrecognised difficulty or AI configuration input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown difficulty name: {0:?} (expected easy, normal or hard)")]
    UnknownDifficulty(String),

    #[error("difficulty level out of range: {0} (expected 1-3)")]
    LevelOutOfRange(u8),
}
