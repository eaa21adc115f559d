use crate::board::{BOARD_SIZE, NUM_SQUARES, bit};
use crate::game::GameEngine;
use crate::types::{Player, Position};

/// Static square weights, row-major.
#[rustfmt::skip]
pub const SQUARE_WEIGHTS: [i32; NUM_SQUARES] = [
    100, -20,  10,   5,   5,  10, -20, 100,
    -20, -50,  -2,  -2,  -2,  -2, -50, -20,
     10,  -2,   1,   1,   1,   1,  -2,  10,
      5,  -2,   1,   0,   0,   1,  -2,   5,
      5,  -2,   1,   0,   0,   1,  -2,   5,
     10,  -2,   1,   1,   1,   1,  -2,  10,
    -20, -50,  -2,  -2,  -2,  -2, -50, -20,
    100, -20,  10,   5,   5,  10, -20, 100,
];

pub const CORNER_BONUS: i32 = 50;
pub const MOBILITY_WEIGHT: i32 = 5;
pub const STABILITY_WEIGHT: i32 = 10;
/// Per-piece margin on a finished board; dwarfs every in-progress term.
pub const TERMINAL_WEIGHT: i32 = 1000;

pub const CORNERS: [Position; 4] = [
    Position::new(0, 0),
    Position::new(0, 7),
    Position::new(7, 0),
    Position::new(7, 7),
];

/// Heuristic scorer from a fixed side's point of view. Higher is better for `perspective`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Evaluator {
    perspective: Player,
}

impl Evaluator {
    pub fn new(perspective: Player) -> Self {
        Self { perspective }
    }

    pub fn perspective(&self) -> Player {
        self.perspective
    }

    pub fn evaluate(&self, engine: &GameEngine) -> i32 {
        let board = engine.board();
        let me = self.perspective;
        let opp = me.opponent();

        if engine.is_game_over() {
            return (board.count_of(me) as i32 - board.count_of(opp) as i32) * TERMINAL_WEIGHT;
        }

        let positional = self.positional_score(engine);
        let corners = self.corner_score(engine);
        let mobility = (board.valid_moves(me).len() as i32 - board.valid_moves(opp).len() as i32)
            * MOBILITY_WEIGHT;
        let stability = (stable_count(board.bitboard(me)) as i32
            - stable_count(board.bitboard(opp)) as i32)
            * STABILITY_WEIGHT;

        positional + corners + mobility + stability
    }

    /// Sum of square weights, added for own pieces and subtracted for the opponent's.
    pub fn positional_score(&self, engine: &GameEngine) -> i32 {
        let board = engine.board();
        let mine = board.bitboard(self.perspective);
        let theirs = board.bitboard(self.perspective.opponent());

        SQUARE_WEIGHTS
            .iter()
            .enumerate()
            .map(|(pos, &weight)| {
                let square = bit(pos);
                if (mine & square) != 0 {
                    weight
                } else if (theirs & square) != 0 {
                    -weight
                } else {
                    0
                }
            })
            .sum()
    }

    pub fn corner_score(&self, engine: &GameEngine) -> i32 {
        let board = engine.board();
        let me = self.perspective.cell();
        let opp = self.perspective.opponent().cell();

        CORNERS
            .iter()
            .map(|&corner| match board.cell(corner) {
                c if c == me => CORNER_BONUS,
                c if c == opp => -CORNER_BONUS,
                _ => 0,
            })
            .sum()
    }
}

/// Counts pieces of `owned` that are owned corners or sit on an unbroken
/// edge run leading away from an owned corner. Each square counts once.
pub fn stable_count(owned: u64) -> u32 {
    let last = BOARD_SIZE as i32 - 1;
    let mut stable = 0u64;

    for corner in CORNERS {
        let (row, col) = (corner.row as i32, corner.col as i32);
        if (owned & square_bit(row, col)) == 0 {
            continue;
        }
        stable |= square_bit(row, col);

        let dr = if row == 0 { 1 } else { -1 };
        let dc = if col == 0 { 1 } else { -1 };
        for (step_r, step_c) in [(0, dc), (dr, 0)] {
            let mut r = row + step_r;
            let mut c = col + step_c;
            while (0..=last).contains(&r) && (0..=last).contains(&c) {
                let square = square_bit(r, c);
                if (owned & square) == 0 {
                    break;
                }
                stable |= square;
                r += step_r;
                c += step_c;
            }
        }
    }

    stable.count_ones()
}

fn square_bit(row: i32, col: i32) -> u64 {
    bit(row as usize * BOARD_SIZE + col as usize)
}
