use anyhow::{bail, Result};
use arcade_core::engine::search::AlphaBetaEngine;
use arcade_core::engine::{Evaluator, Move, Searcher};
use arcade_core::games::checkers::CheckersState;
use arcade_core::games::reversi::ReversiState;
use arcade_core::logic::board::{Coord, Side};
use arcade_core::logic::game::{GameState, GameStatus};
use arcade_core::logic::opening::random_move;
use rand::Rng;
use std::fmt::Display;

pub struct Options {
    pub max_turns: u32,
    pub random_opening: bool,
}

/// States whose human side can be reassigned between turns.
pub trait Seat {
    fn seat_human(&mut self, side: Side);
}

impl Seat for CheckersState {
    fn seat_human(&mut self, side: Side) {
        self.set_player_side(side);
    }
}

impl Seat for ReversiState {
    fn seat_human(&mut self, side: Side) {
        self.set_player_side(side);
    }
}

fn describe<S: GameState<Position = Coord>>(mv: &Move<S>) -> String {
    mv.first_step()
        .map(|step| step.from)
        .into_iter()
        .chain(mv.steps.iter().map(|step| step.to))
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join("->")
}

/// Plays both sides with `engine` until the game ends or `max_turns` runs
/// out, printing every move. Returns the final status.
pub fn run<S, E, R>(
    mut state: S,
    mut engine: AlphaBetaEngine<S, E>,
    options: &Options,
    rng: &mut R,
) -> Result<GameStatus>
where
    S: GameState<Position = Coord> + Seat + Display,
    E: Evaluator<S>,
    R: Rng,
{
    println!("{state}\n");

    for turn in 1..=options.max_turns {
        if state.game_over() {
            break;
        }
        let mover = state.turn();
        state.seat_human(mover.opposite());

        let chosen = if turn == 1 && options.random_opening {
            random_move(&state, rng).map(|mv| (mv, None))
        } else {
            engine.execute(&state).map(|(mv, stats)| (mv, Some(stats)))
        };
        let Some((mv, stats)) = chosen else {
            bail!("{mover} has no move although the game is still running");
        };

        if let Some(stats) = stats {
            tracing::info!(
                turn,
                side = %mover,
                depth = stats.depth,
                nodes = stats.nodes,
                cutoffs = stats.cutoffs,
                score = stats.score,
                time_ms = stats.time_ms,
                "searched"
            );
        } else {
            tracing::info!(turn, side = %mover, "random opening");
        }
        println!("{turn:>3}. {mover}: {}", describe(&mv));
        state = mv.state;
    }

    println!("\n{state}");
    Ok(state.status())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use arcade_core::engine::move_list::generate_moves;
    use arcade_core::games::checkers::{self, CheckersEvaluator};
    use arcade_core::games::reversi::{self, ReversiEvaluator};
    use arcade_core::logic::game::Difficulty;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::sync::Arc;

    #[test]
    fn test_describe_joins_chain_steps() {
        let state = CheckersState::from_text(
            "........
             ........
             ..x.....
             ...o....
             ........
             .....o..
             ........
             .o......",
        )
        .unwrap();
        let moves = generate_moves(&state);
        assert_eq!(describe(moves.first().unwrap()), "(2,2)->(4,4)->(6,6)");
    }

    #[test]
    fn test_describe_placement() {
        let moves = generate_moves(&ReversiState::new());
        assert_eq!(describe(moves.first().unwrap()), "(2,3)->(2,3)");
    }

    #[test]
    fn test_run_stops_at_turn_limit() {
        let engine = AlphaBetaEngine::new(
            Arc::new(checkers::engine_config()),
            CheckersEvaluator::default(),
        );
        let options = Options {
            max_turns: 4,
            random_opening: true,
        };
        let mut rng = StdRng::seed_from_u64(3);
        let status = run(CheckersState::new(), engine, &options, &mut rng).unwrap();
        assert_eq!(status, GameStatus::Playing);
    }

    #[test]
    fn test_run_plays_reversi_to_the_end() {
        let engine = AlphaBetaEngine::new(
            Arc::new(reversi::engine_config()),
            ReversiEvaluator::default(),
        );
        let options = Options {
            max_turns: 100,
            random_opening: false,
        };
        let mut rng = StdRng::seed_from_u64(5);
        let state = ReversiState::new().with_difficulty(Difficulty::Easy);
        let status = run(state, engine, &options, &mut rng).unwrap();
        assert_ne!(status, GameStatus::Playing);
    }
}
