//! # Sokoterm Main Entry Point
//!
//! Loads a map, wires the terminal collaborators to the game engine, and
//! runs the main game loop.

use clap::Parser;
use log::{error, info};
use sokoterm::{
    GameMap, GameState, SokoResult, SokobanGame, TerminalInputEngine, TerminalRenderingEngine,
};
use std::path::PathBuf;
use std::process::ExitCode;

/// A two-player demo board, used when no map file is given.
const DEFAULT_MAP: &str = include_str!("../maps/two_players.map");

/// Command line arguments for Sokoterm.
#[derive(Parser, Debug)]
#[command(name = "sokoterm")]
#[command(about = "A terminal Sokoban with multiple independently-controlled players")]
#[command(version)]
struct Args {
    /// Path to a map file; a built-in demo map is used when omitted
    map: Option<PathBuf>,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    info!("starting Sokoterm v{}", sokoterm::VERSION);
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> SokoResult<()> {
    let map = match &args.map {
        Some(path) => {
            info!("loading map from {}", path.display());
            GameMap::from_file(path)?
        }
        None => {
            info!("no map file given, using the built-in demo map");
            GameMap::parse(DEFAULT_MAP)?
        }
    };

    let state = GameState::new(&map);
    let mut game = SokobanGame::new(
        state,
        TerminalInputEngine::from_stdin(),
        TerminalRenderingEngine::stdout(),
    )?;
    game.run()
}
