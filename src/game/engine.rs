//! # Game Engine
//!
//! The run loop that ties the core to its collaborators: fetch one action,
//! resolve it, surface the outcome through the rendering collaborator, stop
//! on exit or win. One action is fully resolved before the next is fetched;
//! nothing here is concurrent.

use crate::game::{Action, ActionResult, GameState};
use crate::input::InputEngine;
use crate::rendering::RenderingEngine;
use crate::{SokoError, SokoResult};
use log::info;

/// The bundled terminal input engine only maps keys for this many players.
pub const MAX_TERMINAL_PLAYERS: usize = 2;

/// A Sokoban game wired to an input and a rendering collaborator.
///
/// The game owns the session state exclusively; collaborators only ever see
/// it through shared references.
///
/// # Examples
///
/// ```
/// use std::io::Cursor;
/// use sokoterm::{GameMap, GameState, SokobanGame};
/// use sokoterm::{TerminalInputEngine, TerminalRenderingEngine};
///
/// let map = GameMap::parse("0\n#####\n#Aa@#\n#####\n").unwrap();
/// let state = GameState::new(&map);
/// let input = TerminalInputEngine::new(Cursor::new("d\n"));
/// let renderer = TerminalRenderingEngine::new(Vec::new());
///
/// let mut game = SokobanGame::new(state, input, renderer).unwrap();
/// game.run().unwrap();
/// assert!(game.state().is_win());
/// ```
pub struct SokobanGame<I: InputEngine, R: RenderingEngine> {
    state: GameState,
    input: I,
    renderer: R,
}

impl<I: InputEngine, R: RenderingEngine> SokobanGame<I, R> {
    /// Creates a new game around the given session state.
    ///
    /// Fails with [`SokoError::TooManyPlayers`] when the board holds more
    /// players than the terminal key mapping can address.
    pub fn new(state: GameState, input: I, renderer: R) -> SokoResult<Self> {
        let players = state.player_count();
        if players > MAX_TERMINAL_PLAYERS {
            return Err(SokoError::TooManyPlayers(players));
        }
        Ok(Self {
            state,
            input,
            renderer,
        })
    }

    /// The session state this game runs on.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// The rendering collaborator. Mainly useful to inspect captured output
    /// after a scripted run.
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Runs the game to completion.
    ///
    /// Loops fetching and resolving actions until the user exits or the
    /// game is won. Gameplay failures are reported through the renderer's
    /// message channel and the loop continues; genuine errors (I/O, a
    /// caller addressing a player that does not exist) propagate out.
    pub fn run(&mut self) -> SokoResult<()> {
        info!("game starting with {} players", self.state.player_count());
        self.renderer.message("Sokoban game is ready.")?;
        self.render_turn()?;

        loop {
            let action = self.input.fetch_action()?;
            let result = action.execute(&mut self.state)?;
            if let ActionResult::Failed(reason) = result {
                self.renderer.message(&reason.to_string())?;
            }
            self.render_turn()?;

            if matches!(action, Action::Exit) || self.state.is_win() {
                if self.state.is_win() {
                    info!("all destinations covered, game won");
                }
                self.renderer.message("Game exits.")?;
                return Ok(());
            }
        }
    }

    fn render_turn(&mut self) -> SokoResult<()> {
        self.renderer.render(&self.state)?;
        self.renderer
            .message(&format!("Undo Quota: {}", self.state.undo_remaining()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Direction, GameMap, PlayerId, Position};

    /// Replays a fixed list of actions, then exits.
    struct ScriptedInput {
        actions: Vec<Action>,
        next: usize,
    }

    impl ScriptedInput {
        fn new(actions: Vec<Action>) -> Self {
            Self { actions, next: 0 }
        }
    }

    impl InputEngine for ScriptedInput {
        fn fetch_action(&mut self) -> SokoResult<Action> {
            let action = self
                .actions
                .get(self.next)
                .copied()
                .unwrap_or(Action::Exit);
            self.next += 1;
            Ok(action)
        }
    }

    /// Records messages and counts renders instead of drawing anything.
    #[derive(Default)]
    struct RecordingRenderer {
        messages: Vec<String>,
        renders: usize,
    }

    impl RenderingEngine for RecordingRenderer {
        fn render(&mut self, _state: &GameState) -> SokoResult<()> {
            self.renders += 1;
            Ok(())
        }

        fn message(&mut self, text: &str) -> SokoResult<()> {
            self.messages.push(text.to_string());
            Ok(())
        }
    }

    fn mv(player: u8, direction: Direction) -> Action {
        Action::Move {
            player: PlayerId::new(player),
            direction,
        }
    }

    #[test]
    fn test_run_stops_on_win() {
        let map = GameMap::parse("0\n#####\n#Aa@#\n#####\n").unwrap();
        let input = ScriptedInput::new(vec![mv(0, Direction::Right)]);
        let mut game =
            SokobanGame::new(GameState::new(&map), input, RecordingRenderer::default()).unwrap();

        game.run().unwrap();

        assert!(game.state().is_win());
        assert_eq!(
            game.renderer().messages.last().map(String::as_str),
            Some("Game exits.")
        );
        // Initial render plus one per resolved action.
        assert_eq!(game.renderer().renders, 2);
    }

    #[test]
    fn test_run_stops_on_exit_without_win() {
        let map = GameMap::parse("0\n######\n#Aa.@#\n######\n").unwrap();
        let input = ScriptedInput::new(vec![Action::Exit]);
        let mut game =
            SokobanGame::new(GameState::new(&map), input, RecordingRenderer::default()).unwrap();

        game.run().unwrap();

        assert!(!game.state().is_win());
    }

    #[test]
    fn test_failures_are_reported_not_fatal() {
        let map = GameMap::parse("0\n####\n#Aa#\n#.@#\n####\n").unwrap();
        let input = ScriptedInput::new(vec![mv(0, Direction::Up), Action::InvalidInput]);
        let mut game =
            SokobanGame::new(GameState::new(&map), input, RecordingRenderer::default()).unwrap();

        game.run().unwrap();

        let messages = &game.renderer().messages;
        assert!(messages.iter().any(|m| m == "You hit a wall."));
        assert!(messages.iter().any(|m| m == "Invalid Input."));
        assert_eq!(
            game.state().player_position(PlayerId::new(0)),
            Some(Position::new(1, 1))
        );
    }

    #[test]
    fn test_quota_message_follows_every_render() {
        let map = GameMap::parse("3\n######\n#Aa.@#\n######\n").unwrap();
        let input = ScriptedInput::new(vec![mv(0, Direction::Right), Action::Undo]);
        let mut game =
            SokobanGame::new(GameState::new(&map), input, RecordingRenderer::default()).unwrap();

        game.run().unwrap();

        let quota_lines: Vec<&String> = game
            .renderer()
            .messages
            .iter()
            .filter(|m| m.starts_with("Undo Quota: "))
            .collect();
        assert_eq!(quota_lines.len(), game.renderer().renders);
        assert_eq!(quota_lines.last().unwrap().as_str(), "Undo Quota: 2");
    }

    #[test]
    fn test_player_not_found_propagates() {
        let map = GameMap::parse("0\n####\n#Aa#\n#.@#\n####\n").unwrap();
        let input = ScriptedInput::new(vec![mv(1, Direction::Up)]);
        let mut game =
            SokobanGame::new(GameState::new(&map), input, RecordingRenderer::default()).unwrap();

        let err = game.run().unwrap_err();

        assert!(matches!(err, SokoError::PlayerNotFound(_)));
    }

    #[test]
    fn test_more_than_two_players_rejected() {
        let map =
            GameMap::parse("0\n######\n#Aa@.#\n#Bb@.#\n#Cc@.#\n######\n").unwrap();
        let result = SokobanGame::new(
            GameState::new(&map),
            ScriptedInput::new(Vec::new()),
            RecordingRenderer::default(),
        );

        assert!(matches!(result, Err(SokoError::TooManyPlayers(3))));
    }
}
