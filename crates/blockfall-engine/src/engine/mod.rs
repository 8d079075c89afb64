//! Game engine logic and state management.
//!
//! This module drives the core data structures through a game:
//!
//! - [`GameConfig`] - Validated board size, initial tick interval and lookahead
//! - [`GameField`] - Board, falling piece and upcoming pieces
//! - [`GameSession`] - Ticks, player commands, scoring and game over
//! - [`GameStats`] - Score, level and the resulting tick interval
//! - [`PieceQueue`] - Seeded FIFO of upcoming piece kinds
//! - [`Snapshot`] - Read-only state handed to renderers
//!
//! # Game Flow
//!
//! 1. Create a [`GameSession`] from a [`GameConfig`]; the first piece spawns at the top
//! 2. Every [`GameSession::tick_interval`], call [`GameSession::tick`]; the piece falls one row
//! 3. Player [`Command`]s move, rotate or soft-drop the piece when the board allows it
//! 4. A piece that cannot fall locks, full lines clear and the next piece spawns
//! 5. The game is over when a freshly spawned piece collides
//!
//! # Example
//!
//! ```
//! use blockfall_engine::{Command, GameConfig, GameSession, PieceSeed};
//!
//! let config = GameConfig::new(12, 6, 300, 2).unwrap();
//! let mut session = GameSession::with_seed(config, PieceSeed::from(7));
//!
//! while !session.is_game_over() {
//!     session.command(Command::MoveRight).ok();
//!     session.tick();
//! }
//!
//! let snapshot = session.snapshot();
//! println!("Game over! Score: {}", snapshot.score());
//! ```

pub use self::{
    config::*, game_field::*, game_session::*, game_stats::*, piece_queue::*, snapshot::*,
};

mod config;
mod game_field;
mod game_session;
mod game_stats;
mod piece_queue;
mod snapshot;
