//! Headless AI-vs-AI driver for the arcade board games.

mod selfplay;

use anyhow::{Context, Result};
use arcade_core::engine::config::EngineConfig;
use arcade_core::engine::search::AlphaBetaEngine;
use arcade_core::games::checkers::{self, CheckersEvaluator, CheckersState};
use arcade_core::games::reversi::{self, ReversiEvaluator, ReversiState};
use arcade_core::logic::game::{Difficulty, GameStatus};
use clap::{Parser, ValueEnum};
use rand::rngs::StdRng;
use rand::SeedableRng;
use selfplay::Options;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Game {
    Checkers,
    Reversi,
}

#[derive(Parser, Debug)]
#[command(name = "arcade", version, about = "Let the board game AIs play each other")]
struct Cli {
    #[arg(short, long, value_enum, default_value_t = Game::Checkers)]
    game: Game,

    /// easy, normal or hard
    #[arg(short, long, default_value = "normal")]
    difficulty: Difficulty,

    /// JSON file overriding the game's engine settings
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Stop after this many turns even if the game is still running
    #[arg(long, default_value_t = 200)]
    max_turns: u32,

    /// Seed for the random opening
    #[arg(long)]
    seed: Option<u64>,

    /// Play the first move at random instead of searching it
    #[arg(long)]
    random_opening: bool,
}

fn load_config(preset: EngineConfig, path: Option<&Path>) -> Result<EngineConfig> {
    let Some(path) = path else {
        return Ok(preset);
    };
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    preset
        .merge_json(&json)
        .with_context(|| format!("invalid engine config in {}", path.display()))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let mut rng = cli
        .seed
        .map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);
    let options = Options {
        max_turns: cli.max_turns,
        random_opening: cli.random_opening,
    };

    let status = match cli.game {
        Game::Checkers => {
            let config = load_config(checkers::engine_config(), cli.config.as_deref())?;
            let engine = AlphaBetaEngine::new(Arc::new(config), CheckersEvaluator::default());
            let state = CheckersState::new().with_difficulty(cli.difficulty);
            selfplay::run(state, engine, &options, &mut rng)?
        }
        Game::Reversi => {
            let config = load_config(reversi::engine_config(), cli.config.as_deref())?;
            let engine = AlphaBetaEngine::new(Arc::new(config), ReversiEvaluator::default());
            let state = ReversiState::new().with_difficulty(cli.difficulty);
            selfplay::run(state, engine, &options, &mut rng)?
        }
    };

    match status {
        GameStatus::Won(side) => println!("{side} side wins"),
        GameStatus::Draw => println!("draw"),
        GameStatus::Playing => println!("stopped after {} turns", options.max_turns),
    }
    Ok(())
}
