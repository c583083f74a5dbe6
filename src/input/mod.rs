//! # Input Module
//!
//! Turns raw terminal input into [`Action`] values. The core never sees a
//! keystroke: anything this module cannot interpret becomes
//! [`Action::InvalidInput`] and is resolved (and rejected) like any other
//! action.

use crate::game::{Action, Direction, PlayerId};
use crate::SokoResult;
use log::debug;
use std::io::{self, BufRead, BufReader};

/// Source of one action per turn.
pub trait InputEngine {
    /// Fetches the next action from the user.
    fn fetch_action(&mut self) -> SokoResult<Action>;
}

/// An input engine that fetches actions from terminal lines.
///
/// Player A moves with `w`/`a`/`s`/`d`, player B with `h`/`j`/`k`/`l` in the
/// same up/left/down/right order. `u` undoes, `exit` quits, and any other
/// token is invalid input. Matching is case-insensitive. End of input is
/// treated as `exit` so piped sessions terminate cleanly.
pub struct TerminalInputEngine<R> {
    reader: R,
}

impl TerminalInputEngine<BufReader<io::Stdin>> {
    /// Creates an input engine reading from standard input.
    pub fn from_stdin() -> Self {
        Self::new(BufReader::new(io::stdin()))
    }
}

impl<R: BufRead> TerminalInputEngine<R> {
    /// Creates an input engine reading lines from any buffered reader.
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> InputEngine for TerminalInputEngine<R> {
    fn fetch_action(&mut self) -> SokoResult<Action> {
        let mut line = String::new();
        let bytes = self.reader.read_line(&mut line)?;
        if bytes == 0 {
            debug!("end of input, treating as exit");
            return Ok(Action::Exit);
        }
        Ok(parse_command(line.trim()))
    }
}

/// Maps one input token to an action.
///
/// # Examples
///
/// ```
/// use sokoterm::{input::parse_command, Action, Direction, PlayerId};
///
/// let up = Action::Move {
///     player: PlayerId::new(0),
///     direction: Direction::Up,
/// };
/// assert_eq!(parse_command("w"), up);
/// assert_eq!(parse_command("W"), up);
/// assert_eq!(parse_command("exit"), Action::Exit);
/// assert_eq!(parse_command("wat"), Action::InvalidInput);
/// ```
pub fn parse_command(token: &str) -> Action {
    let first = PlayerId::new(0);
    let second = PlayerId::new(1);
    match token.to_ascii_lowercase().as_str() {
        "w" => player_move(first, Direction::Up),
        "a" => player_move(first, Direction::Left),
        "s" => player_move(first, Direction::Down),
        "d" => player_move(first, Direction::Right),
        "h" => player_move(second, Direction::Up),
        "j" => player_move(second, Direction::Left),
        "k" => player_move(second, Direction::Down),
        "l" => player_move(second, Direction::Right),
        "u" => Action::Undo,
        "exit" => Action::Exit,
        _ => Action::InvalidInput,
    }
}

fn player_move(player: PlayerId, direction: Direction) -> Action {
    Action::Move { player, direction }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_first_player_keys() {
        assert_eq!(
            parse_command("w"),
            player_move(PlayerId::new(0), Direction::Up)
        );
        assert_eq!(
            parse_command("a"),
            player_move(PlayerId::new(0), Direction::Left)
        );
        assert_eq!(
            parse_command("s"),
            player_move(PlayerId::new(0), Direction::Down)
        );
        assert_eq!(
            parse_command("d"),
            player_move(PlayerId::new(0), Direction::Right)
        );
    }

    #[test]
    fn test_second_player_keys_follow_wasd_order() {
        assert_eq!(
            parse_command("h"),
            player_move(PlayerId::new(1), Direction::Up)
        );
        assert_eq!(
            parse_command("j"),
            player_move(PlayerId::new(1), Direction::Left)
        );
        assert_eq!(
            parse_command("k"),
            player_move(PlayerId::new(1), Direction::Down)
        );
        assert_eq!(
            parse_command("l"),
            player_move(PlayerId::new(1), Direction::Right)
        );
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(parse_command("D"), parse_command("d"));
        assert_eq!(parse_command("EXIT"), Action::Exit);
        assert_eq!(parse_command("U"), Action::Undo);
    }

    #[test]
    fn test_unknown_tokens_are_invalid_input() {
        for token in ["", "x", "ww", "up", "quit", "!"] {
            assert_eq!(parse_command(token), Action::InvalidInput, "token {:?}", token);
        }
    }

    #[test]
    fn test_fetch_action_reads_one_line_per_call() {
        let mut engine = TerminalInputEngine::new(Cursor::new("w\nexit\n"));
        assert_eq!(
            engine.fetch_action().unwrap(),
            player_move(PlayerId::new(0), Direction::Up)
        );
        assert_eq!(engine.fetch_action().unwrap(), Action::Exit);
    }

    #[test]
    fn test_fetch_action_trims_whitespace() {
        let mut engine = TerminalInputEngine::new(Cursor::new("  u  \n"));
        assert_eq!(engine.fetch_action().unwrap(), Action::Undo);
    }

    #[test]
    fn test_end_of_input_becomes_exit() {
        let mut engine = TerminalInputEngine::new(Cursor::new(""));
        assert_eq!(engine.fetch_action().unwrap(), Action::Exit);
    }
}
