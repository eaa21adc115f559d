use serde::{Deserialize, Serialize};

use crate::board::BOARD_SIZE;

pub const PLAYER_BLACK: u8 = 1;
pub const PLAYER_WHITE: u8 = 2;

/// Content of a single board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellState {
    Empty,
    Black,
    White,
}

/// One of the two sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Player {
    Black,
    White,
}

impl Player {
    pub fn opponent(self) -> Self {
        match self {
            Self::Black => Self::White,
            Self::White => Self::Black,
        }
    }

    pub fn cell(self) -> CellState {
        match self {
            Self::Black => CellState::Black,
            Self::White => CellState::White,
        }
    }

    /// Numeric code used across the WASM boundary: 1=black, 2=white.
    pub fn code(self) -> u8 {
        match self {
            Self::Black => PLAYER_BLACK,
            Self::White => PLAYER_WHITE,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            PLAYER_BLACK => Some(Self::Black),
            PLAYER_WHITE => Some(Self::White),
            _ => None,
        }
    }
}

/// Outcome of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Winner {
    Black,
    White,
    Draw,
}

impl Winner {
    /// Strictly more pieces wins; equal counts are a draw.
    pub fn from_counts(black: u8, white: u8) -> Self {
        if black > white {
            Self::Black
        } else if white > black {
            Self::White
        } else {
            Self::Draw
        }
    }
}

/// A board coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub row: u8,
    pub col: u8,
}

impl Position {
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// Position for a row-major square index (0..64).
    pub fn from_index(idx: usize) -> Self {
        Self {
            row: (idx / BOARD_SIZE) as u8,
            col: (idx % BOARD_SIZE) as u8,
        }
    }

    pub fn is_on_board(self) -> bool {
        (self.row as usize) < BOARD_SIZE && (self.col as usize) < BOARD_SIZE
    }

    /// Row-major square index. Only meaningful when `is_on_board()`.
    pub fn index(self) -> usize {
        self.row as usize * BOARD_SIZE + self.col as usize
    }
}

/// Snapshot handed to renderers and other consumers.
///
/// Contract:
/// - `winner` is `None` while the game is in progress.
/// - `valid_moves` are for `current_player`, in row-major order.
/// - `flipped_pieces` belong to `last_move`; both are empty/`None` before the first move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    pub board: [[CellState; BOARD_SIZE]; BOARD_SIZE],
    pub current_player: Player,
    pub is_game_over: bool,
    pub winner: Option<Winner>,
    pub black_score: u8,
    pub white_score: u8,
    pub valid_moves: Vec<Position>,
    pub last_move: Option<Position>,
    pub flipped_pieces: Vec<Position>,
}

/// Reply to a move request. `success == false` means nothing changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveResult {
    pub success: bool,
    pub flipped_pieces: Vec<Position>,
    pub new_state: GameState,
}

/// Final result after game over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameResult {
    pub winner: Winner,
    pub black_score: u8,
    pub white_score: u8,
}
