//! # Sokoterm
//!
//! A terminal Sokoban supporting multiple independently-controlled players
//! on one board.
//!
//! ## Architecture Overview
//!
//! The crate is split into a game-state core and thin I/O glue around it:
//!
//! - **Board Descriptor** ([`GameMap`]): the immutable parsed map (walls,
//!   box destinations, undo quota, initial placements). Parsed once, never
//!   mutated, able to spawn any number of sessions.
//! - **Session State** ([`GameState`]): the mutable per-run state with the
//!   current player and box positions, the undo checkpoint stack and the
//!   remaining undo quota.
//! - **Move Resolver** ([`Action::execute`]): an exhaustive match over action
//!   kinds that checks legality, applies position updates and reports a
//!   structured [`ActionResult`].
//! - **Collaborators** ([`InputEngine`], [`RenderingEngine`]): traits the run
//!   loop ([`SokobanGame`]) drives once per turn. The bundled terminal
//!   implementations read lines from stdin and print a character grid; the
//!   core itself never formats text.
//!
//! Everything is synchronous and single-threaded: one action is fully
//! resolved before the next is accepted.

pub mod game;
pub mod input;
pub mod rendering;

pub use game::{
    Action, ActionResult, Direction, Entity, Failure, GameMap, GameState, MapError, MoveRecord,
    PlayerId, Position, SokobanGame, UndoQuota,
};
pub use input::{InputEngine, TerminalInputEngine};
pub use rendering::{RenderingEngine, TerminalRenderingEngine};

/// Core error type for the Sokoterm engine.
///
/// Gameplay failures (hitting a wall, a blocked push, exhausted undo quota)
/// are *not* errors. They are reported as [`ActionResult::Failed`] values
/// and leave the session untouched. This enum covers the genuinely fatal
/// conditions: I/O problems, malformed maps, and caller contract violations.
#[derive(thiserror::Error, Debug)]
pub enum SokoError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The map text could not be parsed into a board
    #[error(transparent)]
    Map(#[from] MapError),

    /// An action referenced a player id that does not exist on this board.
    /// This indicates caller misuse, not a gameplay outcome.
    #[error("no player '{0}' on this board")]
    PlayerNotFound(PlayerId),

    /// The bundled terminal input engine only maps keys for two players.
    #[error("terminal play supports at most two players, map has {0}")]
    TooManyPlayers(usize),
}

/// Result type used throughout the Sokoterm codebase.
pub type SokoResult<T> = Result<T, SokoError>;

/// Version information for the game.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
