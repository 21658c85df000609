use crate::engine::move_list::{generate_moves, MoveList};
use crate::engine::Move;
use crate::logic::game::GameState;
use rand::seq::SliceRandom;
use rand::Rng;

/// Uniform pick among `moves`. Keeps variety out of the deterministic search.
pub fn pick_opening<'a, S, R>(moves: &'a MoveList<S>, rng: &mut R) -> Option<&'a Move<S>>
where
    S: GameState,
    R: Rng + ?Sized,
{
    moves.as_slice().choose(rng)
}

/// Random legal move for `state`, or `None` when it has none.
pub fn random_move<S, R>(state: &S, rng: &mut R) -> Option<Move<S>>
where
    S: GameState,
    R: Rng + ?Sized,
{
    let moves = generate_moves(state);
    pick_opening(&moves, rng).cloned()
}
