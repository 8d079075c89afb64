use std::time::Duration;

use rand::Rng as _;
use serde::{Deserialize, Serialize};

use crate::{
    CommandError,
    core::{
        board::Board,
        piece::Piece,
        shape::PieceKind,
    },
};

use super::{
    GameStats,
    config::GameConfig,
    game_field::GameField,
    piece_queue::PieceSeed,
    snapshot::Snapshot,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, derive_more::IsVariant)]
pub enum SessionState {
    Running,
    GameOver,
}

/// Player commands accepted by [`GameSession::command`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum Command {
    MoveLeft,
    MoveRight,
    Rotate,
    SoftDrop,
}

impl Command {
    pub const ALL: [Command; 4] = [
        Command::MoveLeft,
        Command::MoveRight,
        Command::Rotate,
        Command::SoftDrop,
    ];
}

/// One game from first spawn to game over.
///
/// The session is driven from outside: a scheduler calls [`tick`] every
/// [`tick_interval`], and the input layer calls [`command`]. Every operation
/// takes `&mut self` and finishes synchronously, so ticks and commands are
/// serialized by construction. Once the state is [`SessionState::GameOver`]
/// nothing changes anymore; start a new session to play again.
///
/// [`tick`]: Self::tick
/// [`tick_interval`]: Self::tick_interval
/// [`command`]: Self::command
///
/// # Example
///
/// ```
/// use blockfall_engine::{Command, GameConfig, GameSession, PieceSeed};
///
/// let mut session = GameSession::with_seed(GameConfig::default(), PieceSeed::from(1));
///
/// session.command(Command::MoveLeft).ok();
/// session.command(Command::Rotate).ok();
/// session.tick();
///
/// let snapshot = session.snapshot();
/// assert!(!snapshot.is_game_over());
/// assert_eq!(snapshot.falling_piece().position().y(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct GameSession {
    config: GameConfig,
    seed: PieceSeed,
    field: GameField,
    stats: GameStats,
    session_state: SessionState,
}

impl GameSession {
    /// Starts a session with a random piece seed.
    #[must_use]
    pub fn new(config: GameConfig) -> Self {
        Self::with_seed(config, rand::rng().random())
    }

    /// Like [`Self::new`], but with a specific seed for deterministic piece generation.
    #[must_use]
    pub fn with_seed(config: GameConfig, seed: PieceSeed) -> Self {
        let field = GameField::new(&config, seed);
        let session_state = if field.board().is_colliding(&field.falling_piece()) {
            SessionState::GameOver
        } else {
            SessionState::Running
        };
        Self {
            config,
            seed,
            field,
            stats: GameStats::new(config.initial_interval_ms()),
            session_state,
        }
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn seed(&self) -> PieceSeed {
        self.seed
    }

    #[must_use]
    pub fn field(&self) -> &GameField {
        &self.field
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        self.field.board()
    }

    #[must_use]
    pub fn falling_piece(&self) -> Piece {
        self.field.falling_piece()
    }

    pub fn next_pieces(&self) -> impl Iterator<Item = PieceKind> + '_ {
        self.field.next_pieces()
    }

    #[must_use]
    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    #[must_use]
    pub fn session_state(&self) -> SessionState {
        self.session_state
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.session_state.is_game_over()
    }

    /// How long the scheduler should wait between two [`Self::tick`] calls.
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        self.stats.tick_interval()
    }

    /// Gravity step: the piece falls one row, or locks if it cannot.
    ///
    /// Does nothing after game over.
    pub fn tick(&mut self) {
        if self.session_state.is_running() {
            self.drop_or_lock();
        }
    }

    /// Applies a player command.
    ///
    /// Rejected commands leave the session unchanged.
    pub fn command(&mut self, command: Command) -> Result<(), CommandError> {
        match command {
            Command::MoveLeft => self.try_move_left(),
            Command::MoveRight => self.try_move_right(),
            Command::Rotate => self.try_rotate(),
            Command::SoftDrop => self.soft_drop(),
        }
    }

    pub fn try_move_left(&mut self) -> Result<(), CommandError> {
        self.ensure_running()?;
        let piece = self.field.falling_piece().left();
        Ok(self.field.set_falling_piece(piece)?)
    }

    pub fn try_move_right(&mut self) -> Result<(), CommandError> {
        self.ensure_running()?;
        let piece = self.field.falling_piece().right();
        Ok(self.field.set_falling_piece(piece)?)
    }

    /// Rotates the falling piece clockwise in place, if the rotated geometry fits.
    pub fn try_rotate(&mut self) -> Result<(), CommandError> {
        self.ensure_running()?;
        let piece = self.field.falling_piece().rotated_right();
        Ok(self.field.set_falling_piece(piece)?)
    }

    /// Same transition as a gravity tick, triggered by the player.
    pub fn soft_drop(&mut self) -> Result<(), CommandError> {
        self.ensure_running()?;
        self.drop_or_lock();
        Ok(())
    }

    /// Captures the current state for rendering.
    ///
    /// After game over the falling piece is the spawn that could not be placed,
    /// so [`Snapshot::composed_cells`] shows it overlapping the stack.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        let board = self.field.board();
        Snapshot::new(
            board.rows(),
            board.cols(),
            board.cells().to_vec(),
            self.field.falling_piece(),
            self.field.next_pieces().collect(),
            self.stats.clone(),
            self.session_state,
        )
    }

    fn ensure_running(&self) -> Result<(), CommandError> {
        if self.session_state.is_game_over() {
            return Err(CommandError::GameOver);
        }
        Ok(())
    }

    fn drop_or_lock(&mut self) {
        let piece = self.field.falling_piece().down();
        if self.field.set_falling_piece(piece).is_ok() {
            return;
        }
        self.complete_piece_drop();
    }

    fn complete_piece_drop(&mut self) {
        let (cleared_lines, result) = self.field.complete_piece_drop();
        self.stats.complete_piece_drop(cleared_lines);
        if result.is_err() {
            self.session_state = SessionState::GameOver;
        }
    }
}
