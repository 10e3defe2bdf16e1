use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{
    TransitionError,
    core::{
        board::Board,
        piece::Piece,
        render_board::{RenderBoard, RenderCell},
        shape::Shape,
    },
};

use super::{
    config::{ConfigError, GameConfig},
    sequencer::{AnySequencer, Sequencer},
};

/// A player action on the active piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    RotateClockwise,
    RotateCounterclockwise,
    MoveLeft,
    MoveRight,
    SoftDrop,
    HardDrop,
}

impl Command {
    pub const ALL: [Self; 6] = [
        Self::RotateClockwise,
        Self::RotateCounterclockwise,
        Self::MoveLeft,
        Self::MoveRight,
        Self::SoftDrop,
        Self::HardDrop,
    ];
}

/// What happens to the cells above a cleared row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gravity {
    /// Rows above a cleared row move down by exactly one row per cleared row
    /// below them, keeping their shape. Floating cells stay floating.
    #[default]
    Naive,
}

/// Complete state of one game.
///
/// A state is an immutable value: every transition takes `&self` and returns
/// a new state. A rejected action returns an equal copy (or, from the `try_`
/// variants, the reason it was rejected). Once the game is over there is no
/// active piece and every transition returns the state unchanged.
///
/// # Example
///
/// ```
/// use quadris_engine::{Command, FixedSequencer, GameState, Shape};
///
/// let sequencer = FixedSequencer::new(vec![Shape::O])?;
/// let state = GameState::new(sequencer);
///
/// let state = state.apply(Command::MoveLeft).apply(Command::HardDrop);
/// assert_eq!(state.board().len(), 4);
/// assert_eq!(state.locked_pieces(), 1);
/// assert!(!state.is_game_over());
/// # Ok::<(), quadris_engine::SequencerError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState<S = AnySequencer> {
    score: u32,
    board: Board,
    active_piece: Option<Piece>,
    sequencer: S,
    gravity: Gravity,
    locked_pieces: usize,
    cleared_lines: usize,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(AnySequencer::default())
    }
}

impl GameState {
    /// Starts a game described by `config`.
    pub fn from_config(config: &GameConfig) -> Result<Self, ConfigError> {
        let sequencer = AnySequencer::from_config(&config.sequencer)?;
        Ok(Self::with_gravity(sequencer, config.gravity))
    }
}

impl<S> GameState<S>
where
    S: Sequencer,
{
    /// Starts a game on an empty board with naive gravity, spawning the first
    /// shape of `sequencer` right away.
    #[must_use]
    pub fn new(sequencer: S) -> Self {
        Self::with_gravity(sequencer, Gravity::default())
    }

    /// Like [`Self::new`], but with the given gravity.
    #[must_use]
    pub fn with_gravity(sequencer: S, gravity: Gravity) -> Self {
        Self::with_board(Board::EMPTY, sequencer, gravity)
    }

    /// Starts a game on a board that already holds locked cells, such as a
    /// puzzle or a practice layout.
    #[must_use]
    pub fn with_board(board: Board, sequencer: S, gravity: Gravity) -> Self {
        let mut sequencer = sequencer;
        let shape = sequencer.next_shape();
        let empty = Self {
            score: 0,
            board,
            active_piece: None,
            sequencer,
            gravity,
            locked_pieces: 0,
            cleared_lines: 0,
        };
        empty.placed(shape)
    }

    /// Always 0; no rule awards points yet.
    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The falling piece, or `None` once the game is over.
    #[must_use]
    pub fn active_piece(&self) -> Option<Piece> {
        self.active_piece
    }

    #[must_use]
    pub fn sequencer(&self) -> &S {
        &self.sequencer
    }

    #[must_use]
    pub fn gravity(&self) -> Gravity {
        self.gravity
    }

    /// Number of pieces locked into the board so far.
    #[must_use]
    pub fn locked_pieces(&self) -> usize {
        self.locked_pieces
    }

    /// Number of rows cleared so far.
    #[must_use]
    pub fn cleared_lines(&self) -> usize {
        self.cleared_lines
    }

    /// Where the active piece would land if dropped straight down.
    #[must_use]
    pub fn ghost_piece(&self) -> Option<Piece> {
        self.active_piece
            .map(|piece| piece.simulate_drop_position(&self.board))
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.active_piece.is_none()
    }

    /// Puts a fresh `shape` at the spawn position, ending the game if it does
    /// not fit.
    #[must_use]
    pub fn spawned(&self, shape: Shape) -> Self {
        if self.is_game_over() {
            return self.clone();
        }
        self.placed(shape)
    }

    fn placed(&self, shape: Shape) -> Self {
        let piece = Piece::spawn(shape);
        if self.board.intersects(&piece) {
            log::debug!("game over: {shape} cannot spawn at {}", piece.position());
            return self.game_over();
        }
        Self {
            active_piece: Some(piece),
            ..self.clone()
        }
    }

    fn game_over(&self) -> Self {
        Self {
            active_piece: None,
            ..self.clone()
        }
    }

    fn active(&self) -> Result<Piece, TransitionError> {
        self.active_piece.ok_or(TransitionError::GameOver)
    }

    fn with_active(&self, piece: Piece) -> Self {
        Self {
            active_piece: Some(piece),
            ..self.clone()
        }
    }

    fn try_moved(&self, step: impl FnOnce(&Piece) -> Piece) -> Result<Self, TransitionError> {
        let moved = step(&self.active()?);
        if self.board.intersects(&moved) {
            return Err(TransitionError::Collision);
        }
        Ok(self.with_active(moved))
    }

    pub fn try_moved_left(&self) -> Result<Self, TransitionError> {
        self.try_moved(Piece::left)
    }

    pub fn try_moved_right(&self) -> Result<Self, TransitionError> {
        self.try_moved(Piece::right)
    }

    /// Moves the active piece one row down, or locks it if it is already
    /// resting on something.
    pub fn try_moved_down(&self) -> Result<Self, TransitionError> {
        let piece = self.active()?;
        if self.board.intersects(&piece.down()) {
            return Ok(self.locked(piece));
        }
        Ok(self.with_active(piece.down()))
    }

    /// Rotates the active piece, trying each kick offset in turn.
    pub fn try_rotated(&self, clockwise: bool) -> Result<Self, TransitionError> {
        let piece = self.active()?;
        let Some(rotated) = piece.super_rotated(&self.board, clockwise) else {
            log::trace!(
                "rotation rejected: no kick fits {} at {} (clockwise: {clockwise})",
                piece.shape(),
                piece.position()
            );
            return Err(TransitionError::KicksExhausted);
        };
        Ok(self.with_active(rotated))
    }

    /// Drops the active piece to its ghost position and locks it.
    pub fn try_hard_dropped(&self) -> Result<Self, TransitionError> {
        let piece = self.active()?;
        Ok(self.locked(piece.simulate_drop_position(&self.board)))
    }

    #[must_use]
    pub fn moved_left(&self) -> Self {
        self.try_moved_left().unwrap_or_else(|_| self.clone())
    }

    #[must_use]
    pub fn moved_right(&self) -> Self {
        self.try_moved_right().unwrap_or_else(|_| self.clone())
    }

    #[must_use]
    pub fn moved_down(&self) -> Self {
        self.try_moved_down().unwrap_or_else(|_| self.clone())
    }

    #[must_use]
    pub fn rotated(&self, clockwise: bool) -> Self {
        self.try_rotated(clockwise).unwrap_or_else(|_| self.clone())
    }

    #[must_use]
    pub fn hard_dropped(&self) -> Self {
        self.try_hard_dropped().unwrap_or_else(|_| self.clone())
    }

    /// Applies `command`, reporting why the state did not change if it was
    /// rejected.
    pub fn try_apply(&self, command: Command) -> Result<Self, TransitionError> {
        match command {
            Command::RotateClockwise => self.try_rotated(true),
            Command::RotateCounterclockwise => self.try_rotated(false),
            Command::MoveLeft => self.try_moved_left(),
            Command::MoveRight => self.try_moved_right(),
            Command::SoftDrop => self.try_moved_down(),
            Command::HardDrop => self.try_hard_dropped(),
        }
    }

    /// Applies `command`; a rejected command returns an unchanged copy.
    #[must_use]
    pub fn apply(&self, command: Command) -> Self {
        self.try_apply(command).unwrap_or_else(|_| self.clone())
    }

    /// Locks `piece` into the board, clears completed rows and spawns the
    /// next shape.
    ///
    /// A piece locked with any cell above the board ends the game and leaves
    /// the board as it was.
    fn locked(&self, piece: Piece) -> Self {
        if piece.cells().iter().any(|cell| cell.y < 0) {
            log::debug!(
                "game over: {} locked above the board at {}",
                piece.shape(),
                piece.position()
            );
            return self.game_over();
        }

        let board = self.board.baked(&piece);
        let completed = board.completed_rows();
        let board = match self.gravity {
            Gravity::Naive => board.cleared_rows(&completed),
        };
        log::debug!(
            "locked {} at {}, cleared rows {:?}",
            piece.shape(),
            piece.position(),
            completed.as_slice()
        );

        let (shape, sequencer) = self.sequencer.next();
        let next = Self {
            score: self.score,
            board,
            active_piece: None,
            sequencer,
            gravity: self.gravity,
            locked_pieces: self.locked_pieces + 1,
            cleared_lines: self.cleared_lines + completed.len(),
        };
        next.placed(shape)
    }

    /// Builds what a player sees: locked cells, then the ghost, then the
    /// active piece on top.
    #[must_use]
    pub fn render(&self) -> RenderBoard {
        let mut render = RenderBoard::from_board(&self.board);
        if let Some(ghost) = self.ghost_piece() {
            render.fill_piece_as(&ghost, RenderCell::Ghost);
        }
        if let Some(piece) = self.active_piece {
            render.fill_piece(&piece);
        }
        render
    }
}

impl<S> fmt::Display for GameState<S>
where
    S: Sequencer,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render())
    }
}
