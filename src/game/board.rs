//! # Board Descriptor
//!
//! The immutable game map: dimensions, walls, box destinations, undo quota
//! and the initial placement of players and boxes, together with the text
//! parser that produces it.
//!
//! ## Map format
//!
//! The first line carries the undo quota as an integer; any surrounding
//! non-digit characters are ignored, so `undo: 5` parses as `5`. `-1` means
//! unlimited undo, `0` disables undo, and any other negative value is
//! rejected. The remaining lines are the board, one character per cell:
//!
//! | char | meaning |
//! |------|---------|
//! | `#`  | wall |
//! | `@`  | box destination (the floor underneath stays walkable) |
//! | `A`-`Z` | a player; `A` is player 0 |
//! | `a`-`z` | a box owned by the matching upper-case player |
//! | `.`  | empty floor |
//! | space | structural padding, not part of the map |
//!
//! Rows may be jagged; unlisted cells are outside the map. Space padding
//! never counts towards the board width.

use crate::game::{Entity, PlayerId, Position};
use crate::SokoResult;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::fs;
use std::path::Path;

/// Reasons a map text fails to parse.
///
/// All of these are fatal to map loading; none are recoverable by the game
/// core.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum MapError {
    /// The first line does not contain a parseable integer
    #[error("undo quota line is not a valid integer")]
    InvalidUndoQuota,

    /// The undo quota was a negative number other than the `-1` sentinel
    #[error("undo quota must be -1 or greater, got {0}")]
    NegativeUndoQuota(i32),

    /// The same upper-case player letter appears more than once
    #[error("duplicate player '{0}' in map")]
    DuplicatePlayer(char),

    /// The map contains no player letters at all
    #[error("map contains no players")]
    NoPlayers,

    /// Box and destination counts differ
    #[error("box count ({boxes}) does not match destination count ({destinations})")]
    BoxDestinationMismatch { boxes: usize, destinations: usize },

    /// A lower-case box letter has no matching upper-case player
    #[error("box '{0}' has no matching player '{1}'")]
    OrphanBox(char, char),

    /// A player letter has no box of the matching lower-case letter
    #[error("player '{0}' has no box to push")]
    PlayerWithoutBox(char),
}

/// How many undo actions a session may perform.
///
/// In the textual map format this is written as `-1` (unlimited), `0`
/// (disabled) or a positive count; internally the sentinel disappears.
///
/// # Examples
///
/// ```
/// use sokoterm::UndoQuota;
///
/// let mut quota = UndoQuota::Limited(1);
/// assert!(!quota.is_exhausted());
/// quota.consume();
/// assert!(quota.is_exhausted());
/// assert_eq!(UndoQuota::Unlimited.to_string(), "unlimited");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UndoQuota {
    /// Undo never runs out
    Unlimited,
    /// At most this many undos remain; `Limited(0)` means undo is spent
    /// or was disabled from the start
    Limited(u32),
}

impl UndoQuota {
    fn parse(header: &str) -> Result<Self, MapError> {
        let digits: String = header
            .chars()
            .filter(|c| c.is_ascii_digit() || *c == '-')
            .collect();
        let value: i32 = digits.parse().map_err(|_| MapError::InvalidUndoQuota)?;
        match value {
            -1 => Ok(UndoQuota::Unlimited),
            n if n >= 0 => Ok(UndoQuota::Limited(n as u32)),
            n => Err(MapError::NegativeUndoQuota(n)),
        }
    }

    /// True when no more undos are allowed.
    pub fn is_exhausted(self) -> bool {
        matches!(self, UndoQuota::Limited(0))
    }

    /// Spends one undo. Unlimited quota is never decremented.
    pub fn consume(&mut self) {
        if let UndoQuota::Limited(n) = self {
            *n = n.saturating_sub(1);
        }
    }
}

impl fmt::Display for UndoQuota {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UndoQuota::Unlimited => write!(f, "unlimited"),
            UndoQuota::Limited(n) => write!(f, "{}", n),
        }
    }
}

/// The immutable description of a Sokoban board.
///
/// A `GameMap` is produced once by [`GameMap::parse`] and never mutated
/// afterwards; any number of [`GameState`](crate::GameState) sessions can be
/// spawned from it.
///
/// # Examples
///
/// ```
/// use sokoterm::{GameMap, UndoQuota};
///
/// let map = GameMap::parse("0\n####\n#Aa#\n#.@#\n####\n").unwrap();
/// assert_eq!(map.width(), 4);
/// assert_eq!(map.height(), 4);
/// assert_eq!(map.undo_quota(), UndoQuota::Limited(0));
/// assert_eq!(map.player_count(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameMap {
    width: i32,
    height: i32,
    walls: HashSet<Position>,
    destinations: HashSet<Position>,
    undo_quota: UndoQuota,
    players: BTreeMap<PlayerId, Position>,
    boxes: Vec<(PlayerId, Position)>,
    valid_cells: HashSet<Position>,
}

impl GameMap {
    /// Parses a map from its string representation.
    ///
    /// See the [module documentation](self) for the format. Fails with a
    /// [`MapError`] when the undo quota is invalid, a player letter is
    /// duplicated or missing, box and destination counts differ, or a box
    /// letter matches no player (and vice versa).
    pub fn parse(text: &str) -> Result<GameMap, MapError> {
        let (header, grid) = text.split_once('\n').unwrap_or((text, ""));
        let undo_quota = UndoQuota::parse(header)?;

        let lines: Vec<&str> = grid.lines().collect();
        let height = lines.len() as i32;

        let mut width = 0i32;
        let mut walls = HashSet::new();
        let mut destinations = HashSet::new();
        let mut players: BTreeMap<PlayerId, Position> = BTreeMap::new();
        let mut boxes: Vec<(PlayerId, Position)> = Vec::new();
        let mut valid_cells = HashSet::new();

        for (y, line) in lines.iter().enumerate() {
            let mut counted = 0i32;
            for (x, ch) in line.chars().enumerate() {
                let pos = Position::new(x as i32, y as i32);
                match ch {
                    '#' => {
                        walls.insert(pos);
                        valid_cells.insert(pos);
                    }
                    '@' => {
                        destinations.insert(pos);
                        valid_cells.insert(pos);
                    }
                    '.' => {
                        valid_cells.insert(pos);
                    }
                    ' ' => {}
                    'A'..='Z' => {
                        let id = PlayerId::new(ch as u8 - b'A');
                        if players.insert(id, pos).is_some() {
                            return Err(MapError::DuplicatePlayer(ch));
                        }
                        valid_cells.insert(pos);
                    }
                    'a'..='z' => {
                        let owner = PlayerId::new(ch as u8 - b'a');
                        boxes.push((owner, pos));
                        valid_cells.insert(pos);
                    }
                    // Anything else is treated as padding, like the space.
                    _ => {}
                }
                if ch != ' ' {
                    counted += 1;
                }
            }
            width = width.max(counted);
        }

        for (owner, pos) in &boxes {
            if !players.contains_key(owner) {
                debug!("box {} at ({}, {}) has no owner", owner.box_letter(), pos.x, pos.y);
                return Err(MapError::OrphanBox(owner.box_letter(), owner.letter()));
            }
        }
        if boxes.len() != destinations.len() {
            return Err(MapError::BoxDestinationMismatch {
                boxes: boxes.len(),
                destinations: destinations.len(),
            });
        }
        if players.is_empty() {
            return Err(MapError::NoPlayers);
        }
        for id in players.keys() {
            if !boxes.iter().any(|(owner, _)| owner == id) {
                return Err(MapError::PlayerWithoutBox(id.letter()));
            }
        }

        debug!(
            "parsed map: {}x{}, {} players, {} boxes, undo quota {}",
            width,
            height,
            players.len(),
            boxes.len(),
            undo_quota
        );

        Ok(GameMap {
            width,
            height,
            walls,
            destinations,
            undo_quota,
            players,
            boxes,
            valid_cells,
        })
    }

    /// Reads map text from a file and parses it.
    pub fn from_file(path: &Path) -> SokoResult<GameMap> {
        let text = fs::read_to_string(path)?;
        debug!("read map file {}", path.display());
        Ok(GameMap::parse(&text)?)
    }

    /// The counted board width. Space padding never contributes.
    pub fn width(&self) -> i32 {
        self.width
    }

    /// The board height in rows.
    pub fn height(&self) -> i32 {
        self.height
    }

    /// All box destination positions.
    pub fn destinations(&self) -> &HashSet<Position> {
        &self.destinations
    }

    /// The undo quota this map grants to new sessions.
    pub fn undo_quota(&self) -> UndoQuota {
        self.undo_quota
    }

    /// Initial player placements, in ascending id order.
    pub fn players(&self) -> &BTreeMap<PlayerId, Position> {
        &self.players
    }

    /// The number of players on this map.
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// Initial box placements in box-index order, each tagged with its owner.
    pub fn boxes(&self) -> &[(PlayerId, Position)] {
        &self.boxes
    }

    /// True if the position holds a wall.
    pub fn is_wall(&self, pos: Position) -> bool {
        self.walls.contains(&pos)
    }

    /// True if the position is part of the map at all.
    pub fn is_inside(&self, pos: Position) -> bool {
        self.valid_cells.contains(&pos)
    }

    /// The entity initially at `pos`, or `None` for cells outside the map.
    ///
    /// This reflects the *initial* placements; during play, ask the session
    /// via [`GameState::entity_at`](crate::GameState::entity_at) instead.
    pub fn entity_at(&self, pos: Position) -> Option<Entity> {
        if let Some((owner, _)) = self.boxes.iter().find(|(_, p)| *p == pos) {
            Some(Entity::Box(*owner))
        } else if let Some((id, _)) = self.players.iter().find(|(_, p)| **p == pos) {
            Some(Entity::Player(*id))
        } else if self.walls.contains(&pos) {
            Some(Entity::Wall)
        } else if self.valid_cells.contains(&pos) {
            Some(Entity::Empty)
        } else {
            None
        }
    }
}
