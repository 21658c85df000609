use crate::logic::game::GameState;
use serde::{Deserialize, Serialize};

pub mod config;
pub mod eval;
pub mod move_list;
pub mod search;

#[cfg(test)]
mod mate_test;
#[cfg(test)]
mod test_tree;

/// One atomic hop of a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step<P> {
    pub from: P,
    pub to: P,
}

/// A full turn: the steps played and the state they lead to, turn already
/// handed over. Multi-capture chains carry more than one step.
#[derive(Debug, Clone)]
pub struct Move<S: GameState> {
    pub steps: Vec<Step<S::Position>>,
    pub state: S,
}

impl<S: GameState> Move<S> {
    pub fn first_step(&self) -> Option<Step<S::Position>> {
        self.steps.first().copied()
    }

    pub fn last_step(&self) -> Option<Step<S::Position>> {
        self.steps.last().copied()
    }

    pub fn is_chain(&self) -> bool {
        self.steps.len() > 1
    }

    /// Plays the steps against a copy of `root`. Returns `None` if the root
    /// rejects any of them.
    pub fn replay(&self, root: &S) -> Option<S> {
        let mut state = root.clone();
        for step in &self.steps {
            if !state.make_move(step.from, step.to) {
                return None;
            }
        }
        state.next_turn();
        Some(state)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    pub depth: u8,
    pub nodes: u32,
    pub cutoffs: u32,
    pub score: i32,
    pub time_ms: u64,
}

/// Scores a position from the AI side's point of view.
pub trait Evaluator<S> {
    fn evaluate(&self, state: &S) -> i32;
}

pub trait Searcher<S: GameState> {
    /// Picks a move for the side to move. `None` means there is nothing to
    /// play: the game is over or no move exists.
    fn execute(&mut self, root: &S) -> Option<(Move<S>, SearchStats)>;
}
