use crate::logic::board::Side;
use crate::logic::error::ParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    Playing,
    Won(Side),
    Draw,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl FromStr for Difficulty {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "easy" => Ok(Self::Easy),
            "normal" => Ok(Self::Normal),
            "hard" => Ok(Self::Hard),
            _ => Err(ParseError::UnknownDifficulty(s.to_string())),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Easy => write!(f, "easy"),
            Self::Normal => write!(f, "normal"),
            Self::Hard => write!(f, "hard"),
        }
    }
}

/// The contract a game offers to the search engine.
///
/// States are values: the engine clones a state before every speculative
/// step, so `make_move` and `next_turn` may mutate freely. A turn is built
/// from one or more `make_move` calls (more than one for capture chains,
/// signalled by `last_turn_finished` returning `false`) followed by exactly
/// one `next_turn`.
pub trait GameState: Clone {
    /// Identifies a cell or piece; origins and destinations of steps.
    type Position: Copy + Eq + fmt::Debug;

    fn turn(&self) -> Side;

    fn status(&self) -> GameStatus;

    fn game_over(&self) -> bool {
        self.status() != GameStatus::Playing
    }

    fn difficulty(&self) -> Difficulty;

    /// The human side. The engine plays for the other one.
    fn player_side(&self) -> Side;

    fn ai_side(&self) -> Side {
        self.player_side().opposite()
    }

    /// Pieces or cells the side to move may start (or continue) a move from.
    fn candidates(&self) -> Vec<Self::Position>;

    /// Appends every destination reachable from `origin` to `out`.
    fn possible_moves(&self, origin: Self::Position, out: &mut Vec<Self::Position>);

    /// Applies one step. Returns `false`, leaving the state unusable for
    /// this branch, when the step is rejected.
    fn make_move(&mut self, origin: Self::Position, destination: Self::Position) -> bool;

    /// Hands the move to the other side and refreshes status.
    fn next_turn(&mut self);

    /// `false` while the side to move still owes steps of the current turn.
    fn last_turn_finished(&self) -> bool {
        true
    }

    /// Flags a position the search should score instead of expanding.
    fn halts_search(&self) -> bool {
        false
    }

    /// Cheap pre-check: the side to move has already lost whatever it plays.
    fn forced_loss(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_from_str() {
        assert_eq!("easy".parse::<Difficulty>(), Ok(Difficulty::Easy));
        assert_eq!("Hard".parse::<Difficulty>(), Ok(Difficulty::Hard));
        assert_eq!(
            "brutal".parse::<Difficulty>(),
            Err(ParseError::UnknownDifficulty("brutal".to_string()))
        );
    }

    #[test]
    fn test_difficulty_display_round_trip() {
        for d in [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard] {
            assert_eq!(d.to_string().parse::<Difficulty>(), Ok(d));
        }
    }
}
