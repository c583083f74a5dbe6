//! # Actions
//!
//! The action vocabulary and the move resolver. Each call to
//! [`Action::execute`] resolves exactly one action against a
//! [`GameState`] and returns exactly one [`ActionResult`]; failed actions
//! leave the state untouched.

use crate::game::{Direction, Entity, GameState, PlayerId};
use crate::{SokoError, SokoResult};
use log::debug;
use serde::{Deserialize, Serialize};

/// One turn's worth of user intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    /// Move the given player one cell, pushing a box if one is ahead
    Move {
        player: PlayerId,
        direction: Direction,
    },
    /// Revert to the last checkpoint
    Undo,
    /// Stop the game without altering state
    Exit,
    /// A token the input collaborator could not interpret
    InvalidInput,
}

/// Why an action failed.
///
/// These are gameplay outcomes, not errors; the `Display` text is the
/// message shown to the user.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Failure {
    #[error("You hit a wall.")]
    WallBlocked,
    #[error("Failed to push the box.")]
    PushBlocked,
    #[error("You hit another player.")]
    PlayerCollision,
    #[error("You cannot move off the map.")]
    OutOfBounds,
    #[error("You have run out of your undo quota.")]
    UndoExhausted,
    #[error("Invalid Input.")]
    InvalidInput,
}

/// The outcome of resolving one action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionResult {
    Success,
    Failed(Failure),
}

impl ActionResult {
    /// True for [`ActionResult::Success`].
    pub fn is_success(self) -> bool {
        matches!(self, ActionResult::Success)
    }
}

impl Action {
    /// Resolves this action against the session state.
    ///
    /// Directional moves follow the push rule: a box ahead of the player is
    /// relocated one further cell in the same direction, and the push is
    /// legal whenever that cell holds neither a box, a wall nor a player.
    /// Ownership is never checked; any player may push any box.
    ///
    /// Gameplay failures come back as [`ActionResult::Failed`] with the
    /// state unchanged. A move naming a player that is not on the board is
    /// a caller contract violation and surfaces as
    /// [`SokoError::PlayerNotFound`].
    ///
    /// # Examples
    ///
    /// ```
    /// use sokoterm::{Action, ActionResult, Direction, GameMap, GameState, PlayerId};
    ///
    /// let map = GameMap::parse("0\n#####\n#Aa@#\n#####\n").unwrap();
    /// let mut state = GameState::new(&map);
    /// let push = Action::Move {
    ///     player: PlayerId::new(0),
    ///     direction: Direction::Right,
    /// };
    /// assert_eq!(push.execute(&mut state).unwrap(), ActionResult::Success);
    /// assert!(state.is_win());
    /// ```
    pub fn execute(&self, state: &mut GameState) -> SokoResult<ActionResult> {
        match *self {
            Action::Move { player, direction } => move_player(state, player, direction),
            Action::Undo => Ok(undo(state)),
            Action::Exit => Ok(ActionResult::Success),
            Action::InvalidInput => Ok(ActionResult::Failed(Failure::InvalidInput)),
        }
    }
}

fn move_player(
    state: &mut GameState,
    player: PlayerId,
    direction: Direction,
) -> SokoResult<ActionResult> {
    let from = state
        .player_position(player)
        .ok_or(SokoError::PlayerNotFound(player))?;
    let target = from.step(direction);

    let result = match state.entity_at(target) {
        Some(Entity::Wall) => ActionResult::Failed(Failure::WallBlocked),
        Some(Entity::Box(_)) => {
            let beyond = target.step(direction);
            if matches!(
                state.entity_at(beyond),
                Some(Entity::Box(_) | Entity::Wall | Entity::Player(_))
            ) {
                ActionResult::Failed(Failure::PushBlocked)
            } else {
                state.move_entity(target, beyond);
                state.move_entity(from, target);
                state.commit_checkpoint();
                debug!("player {} pushed a box {:?}", player, direction);
                ActionResult::Success
            }
        }
        Some(Entity::Player(_)) => ActionResult::Failed(Failure::PlayerCollision),
        Some(Entity::Empty) => {
            state.move_entity(from, target);
            state.commit_checkpoint();
            ActionResult::Success
        }
        None => ActionResult::Failed(Failure::OutOfBounds),
    };
    Ok(result)
}

fn undo(state: &mut GameState) -> ActionResult {
    if state.undo_remaining().is_exhausted() {
        ActionResult::Failed(Failure::UndoExhausted)
    } else {
        state.undo();
        ActionResult::Success
    }
}
