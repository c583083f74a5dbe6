//! # Rendering Module
//!
//! Text output for the game. The core never formats anything; this module
//! is handed read-only access to the session state and draws the character
//! grid, plus a message channel for one-line notices.

use crate::game::{Entity, GameState, Position};
use crate::SokoResult;
use std::io::{self, Write};

/// Sink for rendered boards and user-facing messages.
pub trait RenderingEngine {
    /// Draws the current board.
    fn render(&mut self, state: &GameState) -> SokoResult<()>;

    /// Prints a one-line message to the user.
    fn message(&mut self, text: &str) -> SokoResult<()>;
}

/// Renders the board as lines of characters to any [`Write`] sink.
///
/// Walls are `#`, players their upper-case letter, boxes their owner's
/// lower-case letter, uncovered destinations `@`, plain floor `.` and cells
/// outside the map blank.
pub struct TerminalRenderingEngine<W: Write> {
    sink: W,
}

impl TerminalRenderingEngine<io::Stdout> {
    /// Creates a rendering engine writing to standard output.
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TerminalRenderingEngine<W> {
    /// Creates a rendering engine writing to the given sink.
    pub fn new(sink: W) -> Self {
        Self { sink }
    }

    /// The underlying sink. Useful to inspect captured output in tests.
    pub fn sink(&self) -> &W {
        &self.sink
    }
}

impl<W: Write> RenderingEngine for TerminalRenderingEngine<W> {
    fn render(&mut self, state: &GameState) -> SokoResult<()> {
        for y in 0..state.height() {
            let mut row = String::with_capacity(state.width() as usize);
            for x in 0..state.width() {
                row.push(cell_symbol(state, Position::new(x, y)));
            }
            writeln!(self.sink, "{}", row.trim_end())?;
        }
        self.sink.flush()?;
        Ok(())
    }

    fn message(&mut self, text: &str) -> SokoResult<()> {
        writeln!(self.sink, "{}", text)?;
        self.sink.flush()?;
        Ok(())
    }
}

fn cell_symbol(state: &GameState, pos: Position) -> char {
    match state.entity_at(pos) {
        Some(Entity::Wall) => '#',
        Some(Entity::Player(id)) => id.letter(),
        Some(Entity::Box(owner)) => owner.box_letter(),
        Some(Entity::Empty) => {
            if state.destinations().contains(&pos) {
                '@'
            } else {
                '.'
            }
        }
        None => ' ',
    }
}
