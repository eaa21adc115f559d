use std::fmt;

use crate::types::{CellState, Player, Position};

pub const BOARD_SIZE: usize = 8;
pub const NUM_SQUARES: usize = BOARD_SIZE * BOARD_SIZE;
const DIRECTIONS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Reversi board state represented by two bitboards.
///
/// Bit `row * 8 + col` is set in `black` or `white` when that side owns the
/// square; a square is never set in both. The type is `Copy`, so every clone
/// handed to a search branch is independent of its source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    black: u64,
    white: u64,
}

impl Board {
    /// Creates the initial board:
    /// d4=white, e4=black, d5=black, e5=white.
    pub fn new() -> Self {
        Self {
            black: bit(28) | bit(35),
            white: bit(27) | bit(36),
        }
    }

    /// Builds a board from raw masks. Squares set in both masks are given to black.
    pub fn from_bitboards(black: u64, white: u64) -> Self {
        Self {
            black,
            white: white & !black,
        }
    }

    pub fn bitboard(&self, player: Player) -> u64 {
        match player {
            Player::Black => self.black,
            Player::White => self.white,
        }
    }

    pub fn cell(&self, pos: Position) -> CellState {
        if !pos.is_on_board() {
            return CellState::Empty;
        }
        let square = bit(pos.index());
        if (self.black & square) != 0 {
            CellState::Black
        } else if (self.white & square) != 0 {
            CellState::White
        } else {
            CellState::Empty
        }
    }

    /// Returns legal move mask for the given side.
    pub fn legal_moves(&self, player: Player) -> u64 {
        let (me, opp) = self.sides(player);
        let occupied = me | opp;
        let mut legal = 0u64;

        for pos in 0..NUM_SQUARES {
            let move_bit = bit(pos);
            if (occupied & move_bit) != 0 {
                continue;
            }
            if Self::collect_flips(pos, me, opp) != 0 {
                legal |= move_bit;
            }
        }

        legal
    }

    /// Legal moves in row-major order (row 0..8, then col 0..8).
    pub fn valid_moves(&self, player: Player) -> Vec<Position> {
        positions_from_mask(self.legal_moves(player))
    }

    pub fn has_valid_move(&self, player: Player) -> bool {
        self.legal_moves(player) != 0
    }

    pub fn is_valid_move(&self, pos: Position, player: Player) -> bool {
        self.flips_for(pos, player) != 0
    }

    /// Pieces that `player` would capture by playing `pos`. Zero when illegal.
    pub fn flips_for(&self, pos: Position, player: Player) -> u64 {
        if !pos.is_on_board() {
            return 0;
        }
        let (me, opp) = self.sides(player);
        Self::collect_flips(pos.index(), me, opp)
    }

    /// Places one stone and flips captured stones.
    /// Returns flipped bit mask. Returns 0 when move is illegal.
    pub fn place(&mut self, pos: Position, player: Player) -> u64 {
        let flips = self.flips_for(pos, player);
        if flips == 0 {
            return 0;
        }

        let (me, opp) = self.sides(player);
        let next_me = me | bit(pos.index()) | flips;
        let next_opp = opp & !flips;

        match player {
            Player::Black => {
                self.black = next_me;
                self.white = next_opp;
            }
            Player::White => {
                self.white = next_me;
                self.black = next_opp;
            }
        }

        flips
    }

    /// Returns `(black_count, white_count)`.
    pub fn count(&self) -> (u8, u8) {
        (self.black.count_ones() as u8, self.white.count_ones() as u8)
    }

    pub fn count_of(&self, player: Player) -> u8 {
        self.bitboard(player).count_ones() as u8
    }

    /// Returns the number of empty squares.
    pub fn empty_count(&self) -> u8 {
        let (black_count, white_count) = self.count();
        NUM_SQUARES as u8 - black_count - white_count
    }

    /// Copies the board out as a row-major matrix.
    pub fn cells(&self) -> [[CellState; BOARD_SIZE]; BOARD_SIZE] {
        let mut cells = [[CellState::Empty; BOARD_SIZE]; BOARD_SIZE];
        for (row, line) in cells.iter_mut().enumerate() {
            for (col, cell) in line.iter_mut().enumerate() {
                *cell = self.cell(Position::new(row as u8, col as u8));
            }
        }
        cells
    }

    fn sides(&self, player: Player) -> (u64, u64) {
        match player {
            Player::Black => (self.black, self.white),
            Player::White => (self.white, self.black),
        }
    }

    fn collect_flips(pos: usize, me: u64, opp: u64) -> u64 {
        if pos >= NUM_SQUARES {
            return 0;
        }

        let move_bit = bit(pos);
        if ((me | opp) & move_bit) != 0 {
            return 0;
        }

        let (row, col) = pos_to_row_col(pos);
        let mut flips = 0u64;

        for (dr, dc) in DIRECTIONS {
            let mut r = row + dr;
            let mut c = col + dc;
            let mut line = 0u64;

            while in_bounds(r, c) {
                let square = bit((r as usize) * BOARD_SIZE + c as usize);
                if (opp & square) != 0 {
                    line |= square;
                } else {
                    // A run of opponent stones only counts when capped by our own stone.
                    if (me & square) != 0 {
                        flips |= line;
                    }
                    break;
                }

                r += dr;
                c += dc;
            }
        }

        flips
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  0 1 2 3 4 5 6 7")?;
        for (row, line) in self.cells().iter().enumerate() {
            write!(f, "{row}")?;
            for cell in line {
                let glyph = match cell {
                    CellState::Empty => '.',
                    CellState::Black => 'X',
                    CellState::White => 'O',
                };
                write!(f, " {glyph}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Expands a square mask into positions, lowest index first.
pub fn positions_from_mask(mask: u64) -> Vec<Position> {
    let mut bits = mask;
    let mut out = Vec::with_capacity(bits.count_ones() as usize);

    while bits != 0 {
        out.push(Position::from_index(bits.trailing_zeros() as usize));
        bits &= bits - 1;
    }

    out
}

pub(crate) fn bit(pos: usize) -> u64 {
    if pos < NUM_SQUARES { 1u64 << pos } else { 0 }
}

fn pos_to_row_col(pos: usize) -> (i32, i32) {
    ((pos / BOARD_SIZE) as i32, (pos % BOARD_SIZE) as i32)
}

fn in_bounds(row: i32, col: i32) -> bool {
    (0..BOARD_SIZE as i32).contains(&row) && (0..BOARD_SIZE as i32).contains(&col)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn idx(row: usize, col: usize) -> usize {
        row * BOARD_SIZE + col
    }

    #[test]
    fn initial_black_legal_moves_are_four_expected_squares() {
        let board = Board::new();

        let expected = bit(idx(2, 3)) | bit(idx(3, 2)) | bit(idx(4, 5)) | bit(idx(5, 4)); // d3,c4,f5,e6

        assert_eq!(board.legal_moves(Player::Black), expected);
        assert_eq!(
            board.valid_moves(Player::Black),
            vec![
                Position::new(2, 3),
                Position::new(3, 2),
                Position::new(4, 5),
                Position::new(5, 4),
            ]
        );
    }

    #[test]
    fn place_flips_opponent_stones_and_updates_counts() {
        let mut board = Board::new();

        let flips = board.place(Position::new(2, 3), Player::Black); // d3

        assert_eq!(flips, bit(idx(3, 3))); // d4
        assert_eq!(board.count(), (4, 1));
        assert_eq!(board.empty_count(), 59);

        let cells = board.cells();
        assert_eq!(cells[2][3], CellState::Black);
        assert_eq!(cells[3][3], CellState::Black);
        assert_eq!(cells[3][4], CellState::Black);
        assert_eq!(cells[4][3], CellState::Black);
        assert_eq!(cells[4][4], CellState::White);
    }

    #[test]
    fn illegal_place_returns_zero_and_keeps_board_unchanged() {
        let mut board = Board::new();
        let before = board;

        let flips = board.place(Position::new(0, 0), Player::Black);

        assert_eq!(flips, 0);
        assert_eq!(board, before);
    }

    #[test]
    fn off_board_and_occupied_squares_are_never_valid() {
        let board = Board::new();

        assert!(!board.is_valid_move(Position::new(8, 3), Player::Black));
        assert!(!board.is_valid_move(Position::new(3, 200), Player::Black));
        assert!(!board.is_valid_move(Position::new(3, 3), Player::Black));
        assert_eq!(board.cell(Position::new(9, 9)), CellState::Empty);
    }

    #[test]
    fn capture_requires_closing_stone() {
        // Black a1, white b1 c1: d1 captures both, b2 captures nothing.
        let black = bit(idx(0, 0));
        let white = bit(idx(0, 1)) | bit(idx(0, 2));
        let board = Board::from_bitboards(black, white);

        assert_eq!(
            board.flips_for(Position::new(0, 3), Player::Black),
            bit(idx(0, 1)) | bit(idx(0, 2))
        );
        assert_eq!(board.flips_for(Position::new(1, 1), Player::Black), 0);
        assert!(!board.has_valid_move(Player::White));
    }

    #[test]
    fn move_can_flip_several_directions_at_once() {
        // Black closes lines both horizontally and vertically from (2,2).
        let black = bit(idx(2, 0)) | bit(idx(0, 2));
        let white = bit(idx(2, 1)) | bit(idx(1, 2));
        let mut board = Board::from_bitboards(black, white);

        let flips = board.place(Position::new(2, 2), Player::Black);

        assert_eq!(flips, bit(idx(2, 1)) | bit(idx(1, 2)));
        assert_eq!(board.count(), (5, 0));
    }

    #[test]
    fn overlapping_masks_resolve_to_black() {
        let board = Board::from_bitboards(bit(0), bit(0) | bit(1));

        assert_eq!(board.count(), (1, 1));
        assert_eq!(board.cell(Position::new(0, 0)), CellState::Black);
    }

    #[test]
    fn display_renders_grid() {
        let text = Board::new().to_string();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 9);
        assert_eq!(lines[4], "3 . . . O X . . .");
        assert_eq!(lines[5], "4 . . . X O . . .");
    }
}
