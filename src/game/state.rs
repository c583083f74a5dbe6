//! # Session State
//!
//! The mutable state of one game run: current player and box positions, the
//! pending-move buffer, the undo checkpoint stack and the remaining undo
//! quota. A session is spawned from an immutable [`GameMap`] and never
//! modifies it.

use crate::game::{Entity, GameMap, PlayerId, Position, UndoQuota};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// One entity displacement, the unit recorded in the undo log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub from: Position,
    pub to: Position,
}

/// The state of one ongoing game.
///
/// As the game goes on this changes while the originating [`GameMap`] stays
/// untouched. It is mutated only through [`move_entity`](Self::move_entity),
/// [`commit_checkpoint`](Self::commit_checkpoint) and [`undo`](Self::undo),
/// which the move resolver in [`actions`](crate::game::actions) drives.
///
/// # Examples
///
/// ```
/// use sokoterm::{GameMap, GameState};
///
/// let map = GameMap::parse("0\n####\n#Aa#\n#.@#\n####\n").unwrap();
/// let state = GameState::new(&map);
/// assert!(!state.is_win());
/// assert_eq!(state.player_count(), 1);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    map: GameMap,
    player_positions: BTreeMap<PlayerId, Position>,
    boxes: Vec<(PlayerId, Position)>,
    undo_remaining: UndoQuota,
    pending_moves: Vec<MoveRecord>,
    // Explicit stack; commit_checkpoint keeps it single-level by clearing
    // before the push.
    checkpoints: Vec<Vec<MoveRecord>>,
}

impl GameState {
    /// Creates a running game state from a game map.
    pub fn new(map: &GameMap) -> Self {
        Self {
            player_positions: map.players().clone(),
            boxes: map.boxes().to_vec(),
            undo_remaining: map.undo_quota(),
            pending_moves: Vec::new(),
            checkpoints: Vec::new(),
            map: map.clone(),
        }
    }

    /// The map this session was spawned from.
    pub fn map(&self) -> &GameMap {
        &self.map
    }

    /// The counted board width.
    pub fn width(&self) -> i32 {
        self.map.width()
    }

    /// The board height in rows.
    pub fn height(&self) -> i32 {
        self.map.height()
    }

    /// All box destination positions. Identical to the map's set.
    pub fn destinations(&self) -> &HashSet<Position> {
        self.map.destinations()
    }

    /// The undo quota left from now on.
    pub fn undo_remaining(&self) -> UndoQuota {
        self.undo_remaining
    }

    /// The current position of the player with the given id.
    pub fn player_position(&self, id: PlayerId) -> Option<Position> {
        self.player_positions.get(&id).copied()
    }

    /// Current positions of all players, in ascending id order.
    pub fn player_positions(&self) -> &BTreeMap<PlayerId, Position> {
        &self.player_positions
    }

    /// The number of players in this session.
    pub fn player_count(&self) -> usize {
        self.player_positions.len()
    }

    /// Current box placements in box-index order, each tagged with its
    /// owner. The owner never changes for the lifetime of a box.
    pub fn boxes(&self) -> &[(PlayerId, Position)] {
        &self.boxes
    }

    /// The entity currently at the given position, or `None` for cells
    /// outside the map.
    pub fn entity_at(&self, pos: Position) -> Option<Entity> {
        if let Some((owner, _)) = self.boxes.iter().find(|(_, p)| *p == pos) {
            Some(Entity::Box(*owner))
        } else if let Some((id, _)) = self.player_positions.iter().find(|(_, p)| **p == pos) {
            Some(Entity::Player(*id))
        } else if self.map.is_wall(pos) {
            Some(Entity::Wall)
        } else if self.map.is_inside(pos) {
            Some(Entity::Empty)
        } else {
            None
        }
    }

    /// Whether the game is won: every destination holds some box.
    pub fn is_win(&self) -> bool {
        self.map
            .destinations()
            .iter()
            .all(|dest| self.boxes.iter().any(|(_, pos)| pos == dest))
    }

    /// Moves the entity at `from` to `to` and records the displacement in
    /// the pending-move buffer.
    ///
    /// Validity is the resolver's concern; this method assumes the move has
    /// already been checked.
    pub fn move_entity(&mut self, from: Position, to: Position) {
        if let Some(id) = self.player_id_at(from) {
            self.player_positions.insert(id, to);
        } else if let Some(slot) = self.boxes.iter_mut().find(|(_, p)| *p == from) {
            slot.1 = to;
        }
        self.pending_moves.push(MoveRecord { from, to });
    }

    /// Commits the pending moves as the new checkpoint, replacing any prior
    /// one. The checkpoint is the unit [`undo`](Self::undo) reverts.
    pub fn commit_checkpoint(&mut self) {
        self.checkpoints.clear();
        self.checkpoints.push(std::mem::take(&mut self.pending_moves));
    }

    /// Reverts to the last checkpoint and spends one undo.
    ///
    /// The top checkpoint is popped and replayed in recorded order: an
    /// entity currently sitting at a record's `to` position moves back to
    /// its `from` (players are matched before boxes). With no checkpoint on
    /// the stack nothing moves, but finite quota is still spent. The caller
    /// is responsible for checking the quota beforehand.
    pub fn undo(&mut self) {
        if let Some(moves) = self.checkpoints.pop() {
            debug!("undoing checkpoint of {} moves", moves.len());
            for record in &moves {
                if let Some(id) = self.player_id_at(record.to) {
                    self.player_positions.insert(id, record.from);
                } else if let Some(slot) = self.boxes.iter_mut().find(|(_, p)| *p == record.to) {
                    slot.1 = record.from;
                }
            }
        }
        self.undo_remaining.consume();
    }

    fn player_id_at(&self, pos: Position) -> Option<PlayerId> {
        self.player_positions
            .iter()
            .find(|(_, p)| **p == pos)
            .map(|(id, _)| *id)
    }
}
