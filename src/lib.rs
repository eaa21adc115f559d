use wasm_bindgen::prelude::*;

pub mod ai;
pub mod api;
pub mod board;
pub mod config;
pub mod error;
pub mod game;
pub mod types;

pub use ai::{DifficultyPolicy, get_best_move};
pub use board::Board;
pub use config::{AiConfig, Difficulty};
pub use error::{ConfigError, MoveError};
pub use game::{GameEngine, MoveSelector};
pub use types::{CellState, GameResult, GameState, MoveResult, Player, Position, Winner};

#[wasm_bindgen]
pub fn wasm_ready() -> bool {
    true
}
