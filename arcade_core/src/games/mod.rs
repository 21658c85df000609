//! Game adapters and evaluators driven by the shared search engine.

pub mod checkers;
pub mod chess;
pub mod reversi;
