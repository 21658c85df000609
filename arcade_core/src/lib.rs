//! Adversarial search for two-player board games.
//!
//! The [`engine`] module holds a game-agnostic minimax search with alpha-beta
//! pruning. Games plug into it by implementing [`logic::game::GameState`] and
//! an [`engine::Evaluator`]; [`games`] ships adapters for checkers and reversi
//! and the chess evaluator.

pub mod engine;
pub mod games;
pub mod logic;
