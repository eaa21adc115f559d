//! WASM surface for the browser front-end.
//!
//! One game session lives per module instance. Every call returns a fresh
//! snapshot; the front-end polls [`get_state`] and never holds engine state.

use std::sync::{Mutex, PoisonError};

use once_cell::sync::Lazy;
use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::ai::DifficultyPolicy;
use crate::config::{AiConfig, Difficulty};
use crate::error::ConfigError;
use crate::game::GameEngine;
use crate::types::{GameState, MoveResult, Player, Position};

/// Engine plus the computer player that moves in it.
#[derive(Debug, Clone)]
pub struct Session {
    engine: GameEngine,
    policy: DifficultyPolicy,
}

impl Session {
    pub fn new(config: &AiConfig) -> Self {
        Self {
            engine: GameEngine::new(),
            policy: DifficultyPolicy::new(config),
        }
    }

    pub fn engine(&self) -> &GameEngine {
        &self.engine
    }

    pub fn policy(&self) -> &DifficultyPolicy {
        &self.policy
    }

    pub fn reset(&mut self) -> GameState {
        self.engine.reset();
        self.engine.state()
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.policy.set_difficulty(difficulty);
    }

    /// Out-of-range coordinates (including negatives from JS) are rejected as a failed move.
    pub fn make_move(&mut self, row: i32, col: i32) -> MoveResult {
        let row = u8::try_from(row).unwrap_or(u8::MAX);
        let col = u8::try_from(col).unwrap_or(u8::MAX);
        self.engine.make_move(row, col)
    }

    pub fn best_move(&mut self, difficulty: Difficulty) -> Option<Position> {
        self.policy.best_move_at(&self.engine, difficulty)
    }

    /// Plays the computer's move for the side to move. `None` when it has no move.
    pub fn ai_move(&mut self) -> Option<MoveResult> {
        self.engine.play_selected(&mut self.policy)
    }
}

static SESSION: Lazy<Mutex<Session>> = Lazy::new(|| Mutex::new(Session::new(&AiConfig::default())));

fn with_session<T>(f: impl FnOnce(&mut Session) -> T) -> T {
    let mut guard = SESSION.lock().unwrap_or_else(PoisonError::into_inner);
    f(&mut guard)
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    // json_compatible turns `None` into `null` rather than `undefined`.
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(JsValue::from)
}

fn config_error(err: ConfigError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Starts a new game. `config` may be `undefined` or `{ difficulty, seed }`.
#[wasm_bindgen]
pub fn new_game(config: JsValue) -> Result<JsValue, JsValue> {
    let config: AiConfig = if config.is_undefined() || config.is_null() {
        AiConfig::default()
    } else {
        serde_wasm_bindgen::from_value(config)?
    };
    let state = with_session(|session| {
        *session = Session::new(&config);
        session.engine().state()
    });
    to_js(&state)
}

#[wasm_bindgen]
pub fn reset() -> Result<JsValue, JsValue> {
    to_js(&with_session(Session::reset))
}

#[wasm_bindgen]
pub fn get_state() -> Result<JsValue, JsValue> {
    to_js(&with_session(|session| session.engine().state()))
}

/// `player`: 1=black, 2=white.
#[wasm_bindgen]
pub fn get_valid_moves(player: u8) -> Result<JsValue, JsValue> {
    let player = Player::from_code(player)
        .ok_or_else(|| JsValue::from_str(&format!("unknown player code: {player}")))?;
    to_js(&with_session(|session| session.engine().valid_moves(player)))
}

#[wasm_bindgen]
pub fn make_move(row: i32, col: i32) -> Result<JsValue, JsValue> {
    to_js(&with_session(|session| session.make_move(row, col)))
}

/// `level`: 1=easy, 2=normal, 3=hard. Resolves to `null` when the side to move must pass.
#[wasm_bindgen]
pub fn get_best_move(level: u8) -> Result<JsValue, JsValue> {
    let difficulty = Difficulty::try_from(level).map_err(config_error)?;
    to_js(&with_session(|session| session.best_move(difficulty)))
}

#[wasm_bindgen]
pub fn set_difficulty(level: u8) -> Result<(), JsValue> {
    let difficulty = Difficulty::try_from(level).map_err(config_error)?;
    with_session(|session| session.set_difficulty(difficulty));
    Ok(())
}

/// Plays the configured computer move. Resolves to `null` when no move was made.
#[wasm_bindgen]
pub fn ai_move() -> Result<JsValue, JsValue> {
    to_js(&with_session(Session::ai_move))
}
