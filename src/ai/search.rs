use web_time::{Duration, Instant};

use crate::ai::eval::Evaluator;
use crate::game::GameEngine;
use crate::types::{Player, Position};

/// Search depth used by the hard tier.
pub const HARD_SEARCH_DEPTH: u8 = 5;
const MIN_SCORE: i32 = i32::MIN;
const MAX_SCORE: i32 = i32::MAX;

/// Outcome of one root search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchReport {
    /// `None` when the side to move has no legal move.
    pub best_move: Option<Position>,
    pub best_score: i32,
    pub nodes: u64,
    pub elapsed: Duration,
}

/// Fixed-depth minimax with alpha-beta pruning.
///
/// Scores always come from the evaluator's perspective; only the
/// maximizing/minimizing role alternates between plies. Maximizing plies move
/// for the perspective side, minimizing plies for its opponent, and a side
/// without a move passes at the cost of a ply. Children are visited in
/// row-major move order, so results are deterministic for a given position and depth.
pub struct Searcher {
    evaluator: Evaluator,
    depth: u8,
    nodes: u64,
}

impl Searcher {
    pub fn new(perspective: Player, depth: u8) -> Self {
        Self {
            evaluator: Evaluator::new(perspective),
            depth,
            nodes: 0,
        }
    }

    pub fn depth(&self) -> u8 {
        self.depth
    }

    /// Nodes visited since the last call to [`Searcher::search`].
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// Searches the best move for the side to move in `engine`.
    ///
    /// Ties keep the earliest move in row-major order.
    pub fn search(&mut self, engine: &GameEngine) -> SearchReport {
        let start = Instant::now();
        self.nodes = 0;

        let mut best: Option<(Position, i32)> = None;
        for mv in engine.valid_moves(engine.current_player()) {
            let Some(score) = self.score_move(engine, mv) else {
                continue;
            };
            if best.is_none_or(|(_, best_score)| score > best_score) {
                best = Some((mv, score));
            }
        }

        SearchReport {
            best_move: best.map(|(mv, _)| mv),
            best_score: best.map_or(MIN_SCORE, |(_, score)| score),
            nodes: self.nodes,
            elapsed: start.elapsed(),
        }
    }

    /// Score of playing `mv` from `engine`: the move is applied to a copy and
    /// the reply tree is searched `depth - 1` plies deep with the opponent to play.
    /// `None` when `mv` is not legal.
    pub fn score_move(&mut self, engine: &GameEngine, mv: Position) -> Option<i32> {
        let mut child = engine.clone();
        child.apply_move(mv).ok()?;
        Some(self.minimax(
            &child,
            self.depth.saturating_sub(1),
            MIN_SCORE,
            MAX_SCORE,
            false,
        ))
    }

    pub fn minimax(
        &mut self,
        engine: &GameEngine,
        depth: u8,
        mut alpha: i32,
        mut beta: i32,
        maximizing: bool,
    ) -> i32 {
        self.nodes += 1;

        if depth == 0 || engine.is_game_over() {
            return self.evaluator.evaluate(engine);
        }

        // The role picks the mover; after an implicit pass it differs from the engine's turn.
        let perspective = self.evaluator.perspective();
        let side = if maximizing { perspective } else { perspective.opponent() };
        let moves = engine.valid_moves(side);
        if moves.is_empty() {
            // A forced pass still costs a ply.
            return self.minimax(engine, depth - 1, alpha, beta, !maximizing);
        }

        if maximizing {
            let mut best = MIN_SCORE;
            for mv in moves {
                let mut child = engine.clone();
                if child.apply_move_as(mv, side).is_err() {
                    continue;
                }
                let score = self.minimax(&child, depth - 1, alpha, beta, false);
                best = best.max(score);
                alpha = alpha.max(score);
                if beta <= alpha {
                    break;
                }
            }
            best
        } else {
            let mut best = MAX_SCORE;
            for mv in moves {
                let mut child = engine.clone();
                if child.apply_move_as(mv, side).is_err() {
                    continue;
                }
                let score = self.minimax(&child, depth - 1, alpha, beta, true);
                best = best.min(score);
                beta = beta.min(score);
                if beta <= alpha {
                    break;
                }
            }
            best
        }
    }
}
