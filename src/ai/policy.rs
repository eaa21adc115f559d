use rand::Rng;
use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;

use crate::ai::eval::SQUARE_WEIGHTS;
use crate::ai::search::{HARD_SEARCH_DEPTH, Searcher};
use crate::config::{AiConfig, Difficulty};
use crate::game::{GameEngine, MoveSelector};
use crate::types::Position;

/// Chance that the easy tier plays a uniformly random move.
pub const EASY_RANDOM_PROBABILITY: f64 = 0.7;
/// Weight of each captured piece in the normal tier's one-ply score.
pub const NORMAL_FLIP_WEIGHT: i32 = 2;

/// Picks a move for the side to move at the given tier.
///
/// Returns `None` only when that side has no legal move; the caller treats it as a pass.
pub fn get_best_move<R: Rng + ?Sized>(
    engine: &GameEngine,
    difficulty: Difficulty,
    rng: &mut R,
) -> Option<Position> {
    if engine.is_game_over() {
        return None;
    }
    let moves = engine.valid_moves(engine.current_player());
    if moves.is_empty() {
        tracing::debug!(player = ?engine.current_player(), "no legal move to choose from");
        return None;
    }

    let choice = match difficulty {
        Difficulty::Easy => easy_move(engine, &moves, rng),
        Difficulty::Normal => normal_move(engine, &moves),
        Difficulty::Hard => hard_move(engine),
    };
    tracing::debug!(%difficulty, player = ?engine.current_player(), ?choice, "ai move selected");
    choice
}

fn easy_move<R: Rng + ?Sized>(
    engine: &GameEngine,
    moves: &[Position],
    rng: &mut R,
) -> Option<Position> {
    if rng.gen_bool(EASY_RANDOM_PROBABILITY) {
        moves.choose(rng).copied()
    } else {
        fewest_flips_move(engine, moves)
    }
}

/// The move capturing the fewest pieces; earliest wins ties.
pub fn fewest_flips_move(engine: &GameEngine, moves: &[Position]) -> Option<Position> {
    let mut best: Option<(Position, usize)> = None;
    for &mv in moves {
        let Some(flips) = flip_count(engine, mv) else {
            continue;
        };
        if best.is_none_or(|(_, fewest)| flips < fewest) {
            best = Some((mv, flips));
        }
    }
    best.map(|(mv, _)| mv)
}

/// One-ply greedy choice: square weight plus two points per captured piece.
pub fn normal_move(engine: &GameEngine, moves: &[Position]) -> Option<Position> {
    let mut best: Option<(Position, i32)> = None;
    for &mv in moves {
        let Some(flips) = flip_count(engine, mv) else {
            continue;
        };
        let score = SQUARE_WEIGHTS[mv.index()] + NORMAL_FLIP_WEIGHT * flips as i32;
        if best.is_none_or(|(_, best_score)| score > best_score) {
            best = Some((mv, score));
        }
    }
    best.map(|(mv, _)| mv)
}

fn hard_move(engine: &GameEngine) -> Option<Position> {
    let mut searcher = Searcher::new(engine.current_player(), HARD_SEARCH_DEPTH);
    let report = searcher.search(engine);
    tracing::debug!(
        best_move = ?report.best_move,
        best_score = report.best_score,
        nodes = report.nodes,
        elapsed_ms = report.elapsed.as_millis() as u64,
        "search finished"
    );
    report.best_move
}

fn flip_count(engine: &GameEngine, mv: Position) -> Option<usize> {
    let mut child = engine.clone();
    child.apply_move(mv).ok().map(|flipped| flipped.len())
}

/// Computer player bound to one tier, owning the randomness the easy tier draws from.
#[derive(Debug, Clone)]
pub struct DifficultyPolicy {
    difficulty: Difficulty,
    rng: ChaCha8Rng,
}

impl DifficultyPolicy {
    pub fn new(config: &AiConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Self {
            difficulty: config.difficulty,
            rng,
        }
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
    }

    pub fn best_move(&mut self, engine: &GameEngine) -> Option<Position> {
        get_best_move(engine, self.difficulty, &mut self.rng)
    }

    /// Like [`DifficultyPolicy::best_move`] but at a one-off tier.
    pub fn best_move_at(&mut self, engine: &GameEngine, difficulty: Difficulty) -> Option<Position> {
        get_best_move(engine, difficulty, &mut self.rng)
    }
}

impl MoveSelector for DifficultyPolicy {
    fn select_move(&mut self, engine: &GameEngine) -> Option<Position> {
        self.best_move(engine)
    }
}
