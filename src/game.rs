use crate::board::{Board, positions_from_mask};
use crate::error::MoveError;
use crate::types::{CellState, GameResult, GameState, MoveResult, Player, Position, Winner};

/// Picks a move for the side to move in `engine`, or `None` when it has none.
pub trait MoveSelector {
    fn select_move(&mut self, engine: &GameEngine) -> Option<Position>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct FirstLegalMoveSelector;

impl MoveSelector for FirstLegalMoveSelector {
    fn select_move(&mut self, engine: &GameEngine) -> Option<Position> {
        engine.valid_moves(engine.current_player()).first().copied()
    }
}

/// Authoritative game: board plus turn and termination bookkeeping.
///
/// All mutation goes through [`GameEngine::apply_move`] (or the explicit
/// [`GameEngine::pass_turn`] escape hatch); `Clone` yields a fully independent
/// copy, which is how search branches explore positions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameEngine {
    board: Board,
    current_player: Player,
    is_game_over: bool,
    winner: Option<Winner>,
    last_move: Option<Position>,
    flipped: Vec<Position>,
}

impl GameEngine {
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            current_player: Player::Black,
            is_game_over: false,
            winner: None,
            last_move: None,
            flipped: Vec::new(),
        }
    }

    /// Position set up by hand. The game is finished immediately if neither
    /// side can move; otherwise `current_player` keeps the turn even when it
    /// has no legal move (see [`GameEngine::pass_turn`]).
    pub fn from_board(board: Board, current_player: Player) -> Self {
        let mut engine = Self {
            board,
            current_player,
            ..Self::new()
        };
        if !board.has_valid_move(Player::Black) && !board.has_valid_move(Player::White) {
            engine.finish();
        }
        engine
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_player(&self) -> Player {
        self.current_player
    }

    pub fn is_game_over(&self) -> bool {
        self.is_game_over
    }

    pub fn winner(&self) -> Option<Winner> {
        self.winner
    }

    pub fn last_move(&self) -> Option<Position> {
        self.last_move
    }

    pub fn flipped_pieces(&self) -> &[Position] {
        &self.flipped
    }

    pub fn valid_moves(&self, player: Player) -> Vec<Position> {
        self.board.valid_moves(player)
    }

    pub fn is_valid_move(&self, pos: Position, player: Player) -> bool {
        self.board.is_valid_move(pos, player)
    }

    /// Plays `pos` for the side to move and returns the captured pieces.
    ///
    /// On `Err` the engine is left exactly as it was.
    pub fn apply_move(&mut self, pos: Position) -> Result<Vec<Position>, MoveError> {
        let Position { row, col } = pos;
        if self.is_game_over {
            return Err(MoveError::GameOver);
        }
        if !pos.is_on_board() {
            return Err(MoveError::OutOfRange { row, col });
        }
        if self.board.cell(pos) != CellState::Empty {
            return Err(MoveError::Occupied { row, col });
        }

        let mover = self.current_player;
        let flips = self.board.place(pos, mover);
        if flips == 0 {
            return Err(MoveError::NoCapture { row, col });
        }

        self.last_move = Some(pos);
        self.flipped = positions_from_mask(flips);
        self.advance_turn(mover);

        Ok(self.flipped.clone())
    }

    /// Plays `pos` for `player` even when the engine has `player`'s opponent on move.
    /// Search uses this to keep plies tied to the max/min role after a pass.
    ///
    /// On `Err` the engine is left exactly as it was.
    pub fn apply_move_as(&mut self, pos: Position, player: Player) -> Result<Vec<Position>, MoveError> {
        let previous = self.current_player;
        self.current_player = player;
        let result = self.apply_move(pos);
        if result.is_err() {
            self.current_player = previous;
        }
        result
    }

    /// Total form of [`GameEngine::apply_move`] for collaborators.
    pub fn make_move(&mut self, row: u8, col: u8) -> MoveResult {
        match self.apply_move(Position::new(row, col)) {
            Ok(flipped_pieces) => MoveResult {
                success: true,
                flipped_pieces,
                new_state: self.state(),
            },
            Err(err) => {
                tracing::debug!(row, col, player = ?self.current_player, %err, "move rejected");
                MoveResult {
                    success: false,
                    flipped_pieces: Vec::new(),
                    new_state: self.state(),
                }
            }
        }
    }

    /// Hands the turn to the opponent. Only allowed when the side to move
    /// has no legal move, which can only arise from a hand-built position.
    pub fn pass_turn(&mut self) -> Result<(), MoveError> {
        if self.is_game_over {
            return Err(MoveError::GameOver);
        }
        if self.board.has_valid_move(self.current_player) {
            return Err(MoveError::PassNotAllowed);
        }
        tracing::debug!(player = ?self.current_player, "explicit pass");
        self.current_player = self.current_player.opponent();
        self.last_move = None;
        self.flipped.clear();
        Ok(())
    }

    /// Asks `selector` for a move and plays it. `None` when the selector
    /// declines or proposes an illegal move.
    pub fn play_selected(&mut self, selector: &mut dyn MoveSelector) -> Option<MoveResult> {
        if self.is_game_over {
            return None;
        }
        let pos = selector.select_move(self)?;
        let result = self.make_move(pos.row, pos.col);
        result.success.then_some(result)
    }

    pub fn state(&self) -> GameState {
        let (black_score, white_score) = self.board.count();
        GameState {
            board: self.board.cells(),
            current_player: self.current_player,
            is_game_over: self.is_game_over,
            winner: self.winner,
            black_score,
            white_score,
            valid_moves: self.valid_moves(self.current_player),
            last_move: self.last_move,
            flipped_pieces: self.flipped.clone(),
        }
    }

    /// Final result; `None` while the game is still running.
    pub fn result(&self) -> Option<GameResult> {
        let winner = self.winner?;
        let (black_score, white_score) = self.board.count();
        Some(GameResult {
            winner,
            black_score,
            white_score,
        })
    }

    fn advance_turn(&mut self, mover: Player) {
        let opponent = mover.opponent();
        if self.board.has_valid_move(opponent) {
            self.current_player = opponent;
        } else if self.board.has_valid_move(mover) {
            tracing::debug!(passed = ?opponent, "no legal move, turn stays with mover");
            self.current_player = mover;
        } else {
            self.current_player = opponent;
            self.finish();
        }
    }

    fn finish(&mut self) {
        let (black, white) = self.board.count();
        let winner = Winner::from_counts(black, white);
        self.is_game_over = true;
        self.winner = Some(winner);
        tracing::info!(?winner, black, white, "game over");
    }
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::BOARD_SIZE;

    struct FixedMoveSelector {
        mv: Position,
    }

    impl MoveSelector for FixedMoveSelector {
        fn select_move(&mut self, _engine: &GameEngine) -> Option<Position> {
            Some(self.mv)
        }
    }

    fn bit(row: usize, col: usize) -> u64 {
        1u64 << (row * BOARD_SIZE + col)
    }

    #[test]
    fn initial_state_is_correct() {
        let game = GameEngine::new();
        let state = game.state();

        assert_eq!(state.current_player, Player::Black);
        assert_eq!(state.black_score, 2);
        assert_eq!(state.white_score, 2);
        assert!(!state.is_game_over);
        assert_eq!(state.winner, None);
        assert_eq!(state.last_move, None);
        assert!(state.flipped_pieces.is_empty());
        assert_eq!(state.valid_moves.len(), 4);
        assert_eq!(state.board[3][3], CellState::White);
        assert_eq!(state.board[3][4], CellState::Black);
    }

    #[test]
    fn opening_move_flips_one_and_passes_turn() {
        let mut game = GameEngine::new();

        let result = game.make_move(2, 3);

        assert!(result.success);
        assert_eq!(result.flipped_pieces, vec![Position::new(3, 3)]);
        assert_eq!(result.new_state.black_score, 4);
        assert_eq!(result.new_state.white_score, 1);
        assert_eq!(result.new_state.current_player, Player::White);
        assert_eq!(result.new_state.last_move, Some(Position::new(2, 3)));
    }

    #[test]
    fn illegal_moves_report_reason_and_leave_state_untouched() {
        let mut game = GameEngine::new();
        let before = game.clone();

        assert_eq!(
            game.apply_move(Position::new(0, 0)),
            Err(MoveError::NoCapture { row: 0, col: 0 })
        );
        assert_eq!(
            game.apply_move(Position::new(3, 3)),
            Err(MoveError::Occupied { row: 3, col: 3 })
        );
        assert_eq!(
            game.apply_move(Position::new(8, 1)),
            Err(MoveError::OutOfRange { row: 8, col: 1 })
        );
        assert_eq!(game, before);

        let result = game.make_move(7, 7);
        assert!(!result.success);
        assert!(result.flipped_pieces.is_empty());
        assert_eq!(result.new_state, before.state());
    }

    #[test]
    fn turn_stays_with_mover_when_opponent_cannot_reply() {
        let black = bit(0, 0) | bit(7, 0);
        let white = bit(0, 1) | bit(7, 1);
        let mut game = GameEngine::from_board(Board::from_bitboards(black, white), Player::Black);

        let flipped = game.apply_move(Position::new(0, 2)).unwrap();

        assert_eq!(flipped, vec![Position::new(0, 1)]);
        assert_eq!(game.current_player(), Player::Black);
        assert!(!game.is_game_over());
        assert!(game.valid_moves(Player::White).is_empty());
    }

    #[test]
    fn game_ends_when_neither_side_can_move() {
        let black = bit(0, 0) | bit(7, 0);
        let white = bit(0, 1) | bit(7, 1);
        let mut game = GameEngine::from_board(Board::from_bitboards(black, white), Player::Black);

        game.apply_move(Position::new(0, 2)).unwrap();
        game.apply_move(Position::new(7, 2)).unwrap();
        let state = game.state();

        assert!(state.is_game_over);
        assert_eq!(state.winner, Some(Winner::Black));
        assert_eq!((state.black_score, state.white_score), (6, 0));
        assert_eq!(
            game.result(),
            Some(GameResult {
                winner: Winner::Black,
                black_score: 6,
                white_score: 0,
            })
        );
        assert_eq!(
            game.apply_move(Position::new(1, 1)),
            Err(MoveError::GameOver)
        );
    }

    #[test]
    fn equal_piece_counts_end_in_draw() {
        let black = bit(0, 0);
        let white = bit(0, 1) | bit(7, 5) | bit(7, 6) | bit(7, 7);
        let mut game = GameEngine::from_board(Board::from_bitboards(black, white), Player::Black);

        game.apply_move(Position::new(0, 2)).unwrap();

        assert!(game.is_game_over());
        assert_eq!(game.winner(), Some(Winner::Draw));
        assert_eq!(game.board().count(), (3, 3));
    }

    #[test]
    fn from_board_without_moves_is_already_over() {
        let game = GameEngine::from_board(Board::from_bitboards(u64::MAX, 0), Player::White);

        assert!(game.is_game_over());
        assert_eq!(game.winner(), Some(Winner::Black));
    }

    #[test]
    fn pass_turn_only_when_stuck() {
        // White to move but only black can capture.
        let black = bit(0, 0) | bit(7, 0);
        let white = bit(0, 1) | bit(7, 1);
        let mut game = GameEngine::from_board(Board::from_bitboards(black, white), Player::White);

        assert!(game.valid_moves(Player::White).is_empty());
        game.pass_turn().unwrap();
        assert_eq!(game.current_player(), Player::Black);
        assert_eq!(game.pass_turn(), Err(MoveError::PassNotAllowed));
    }

    #[test]
    fn clone_is_independent_of_source() {
        let original = GameEngine::new();
        let mut copy = original.clone();

        copy.make_move(2, 3);

        assert_eq!(original, GameEngine::new());
        assert_ne!(copy.board(), original.board());
    }

    #[test]
    fn reset_restores_start_position() {
        let mut game = GameEngine::new();
        game.make_move(2, 3);

        game.reset();

        assert_eq!(game, GameEngine::new());
    }

    #[test]
    fn play_selected_rejects_illegal_choice() {
        let mut game = GameEngine::new();
        let before = game.clone();

        let outcome = game.play_selected(&mut FixedMoveSelector {
            mv: Position::new(0, 0),
        });

        assert!(outcome.is_none());
        assert_eq!(game, before);

        let outcome = game.play_selected(&mut FirstLegalMoveSelector).unwrap();
        assert_eq!(outcome.new_state.last_move, Some(Position::new(2, 3)));
    }

    #[test]
    fn apply_move_as_plays_for_the_off_turn_side() {
        // White is on move but black captures at (0, 2).
        let black = bit(0, 0) | bit(7, 0);
        let white = bit(0, 1) | bit(7, 1);
        let mut game = GameEngine::from_board(Board::from_bitboards(black, white), Player::White);
        let before = game.clone();

        assert_eq!(
            game.apply_move_as(Position::new(0, 0), Player::Black),
            Err(MoveError::Occupied { row: 0, col: 0 })
        );
        assert_eq!(game, before);

        let flipped = game.apply_move_as(Position::new(0, 2), Player::Black).unwrap();
        assert_eq!(flipped, vec![Position::new(0, 1)]);
        assert_eq!(game.board().cell(Position::new(0, 2)), CellState::Black);
        // White still has no move, black can still take (7, 2).
        assert_eq!(game.current_player(), Player::Black);
        assert!(!game.is_game_over());
    }
}
