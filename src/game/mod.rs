//! # Game Module
//!
//! The game-state core: board descriptor, per-session state and the action
//! resolver, plus the small value types they share.
//!
//! Entities on the board are *computed values*, not stored objects. Both
//! [`GameMap`] and [`GameState`] answer "what is at this cell?" by looking
//! the position up in their positional maps and materializing an [`Entity`]
//! variant on demand, so there is never a question of which copy of a box is
//! the real one.

pub mod actions;
pub mod board;
pub mod engine;
pub mod state;

pub use actions::{Action, ActionResult, Failure};
pub use board::{GameMap, MapError, UndoQuota};
pub use engine::SokobanGame;
pub use state::{GameState, MoveRecord};

use serde::{Deserialize, Serialize};
use std::fmt;

/// The maximum number of players a board can hold, one per letter `A`-`Z`.
pub const MAX_PLAYERS: u8 = 26;

/// Represents a 2D coordinate on the game board.
///
/// Positions are plain values: compared by coordinates and usable as map or
/// set keys. The origin is the top-left corner of the textual map, with `y`
/// growing downwards.
///
/// # Examples
///
/// ```
/// use sokoterm::Position;
///
/// let pos = Position::new(3, 1);
/// assert_eq!(pos.x, 3);
/// assert_eq!(pos.y, 1);
/// assert_eq!(pos + Position::new(0, 1), Position::new(3, 2));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    /// Creates a new position with the given coordinates.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the neighbouring position one cell away in `direction`.
    ///
    /// # Examples
    ///
    /// ```
    /// use sokoterm::{Direction, Position};
    ///
    /// assert_eq!(Position::new(4, 4).step(Direction::Up), Position::new(4, 3));
    /// ```
    pub fn step(self, direction: Direction) -> Position {
        self + direction.delta()
    }
}

impl std::ops::Add for Position {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }
}

impl std::ops::Sub for Position {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }
}

/// The four directions a player can move in.
///
/// Diagonal movement does not exist in this game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Converts a direction to a position delta in screen coordinates
    /// (`Up` decreases `y`).
    ///
    /// # Examples
    ///
    /// ```
    /// use sokoterm::{Direction, Position};
    ///
    /// assert_eq!(Direction::Up.delta(), Position::new(0, -1));
    /// assert_eq!(Direction::Right.delta(), Position::new(1, 0));
    /// ```
    pub fn delta(self) -> Position {
        match self {
            Direction::Up => Position::new(0, -1),
            Direction::Down => Position::new(0, 1),
            Direction::Left => Position::new(-1, 0),
            Direction::Right => Position::new(1, 0),
        }
    }

    /// Returns all four directions.
    pub fn all() -> [Direction; 4] {
        [
            Direction::Up,
            Direction::Down,
            Direction::Left,
            Direction::Right,
        ]
    }
}

/// Identifies one of the up to 26 players on a board.
///
/// Player ids map onto letters: player 0 is rendered `A` and owns the boxes
/// rendered `a`, player 1 is `B`/`b`, and so on.
///
/// # Examples
///
/// ```
/// use sokoterm::PlayerId;
///
/// let id = PlayerId::from_letter('B').unwrap();
/// assert_eq!(id, PlayerId::new(1));
/// assert_eq!(id.letter(), 'B');
/// assert_eq!(id.box_letter(), 'b');
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct PlayerId(u8);

impl PlayerId {
    /// Creates a player id from a raw index in `[0, 26)`.
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Parses an upper-case player letter (`A`-`Z`).
    pub fn from_letter(c: char) -> Option<Self> {
        c.is_ascii_uppercase().then(|| Self(c as u8 - b'A'))
    }

    /// Parses a lower-case box letter (`a`-`z`) into the owning player's id.
    pub fn from_box_letter(c: char) -> Option<Self> {
        c.is_ascii_lowercase().then(|| Self(c as u8 - b'a'))
    }

    /// The raw index of this player.
    pub const fn index(self) -> u8 {
        self.0
    }

    /// The upper-case letter this player is rendered as.
    pub const fn letter(self) -> char {
        (b'A' + self.0) as char
    }

    /// The lower-case letter this player's boxes are rendered as.
    pub const fn box_letter(self) -> char {
        (b'a' + self.0) as char
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// What occupies a single cell of the board.
///
/// `Empty` means walkable floor inside the map; a cell that is outside the
/// map altogether is represented by `None` at the lookup site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Entity {
    /// Walkable floor with nothing on it
    Empty,
    /// An impassable wall
    Wall,
    /// A player, identified by id
    Player(PlayerId),
    /// A box, tagged with the id of the player that owns it
    Box(PlayerId),
}
