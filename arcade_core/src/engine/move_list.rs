use crate::engine::{Move, Step};
use crate::logic::game::GameState;

/// Moves in generation order. The engine relies on that order for its
/// tie-break, so nothing here reorders.
#[derive(Debug, Clone)]
pub struct MoveList<S: GameState> {
    moves: Vec<Move<S>>,
}

impl<S: GameState> Default for MoveList<S> {
    fn default() -> Self {
        Self { moves: Vec::new() }
    }
}

impl<S: GameState> MoveList<S> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, mv: Move<S>) {
        self.moves.push(mv);
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    pub fn first(&self) -> Option<&Move<S>> {
        self.moves.first()
    }

    pub fn as_slice(&self) -> &[Move<S>] {
        &self.moves
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Move<S>> {
        self.moves.iter()
    }

    /// Removes and returns the move at `index`.
    pub fn take(self, index: usize) -> Option<Move<S>> {
        self.moves.into_iter().nth(index)
    }
}

impl<'a, S: GameState> IntoIterator for &'a MoveList<S> {
    type Item = &'a Move<S>;
    type IntoIter = std::slice::Iter<'a, Move<S>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<S: GameState> IntoIterator for MoveList<S> {
    type Item = Move<S>;
    type IntoIter = std::vec::IntoIter<Move<S>>;

    fn into_iter(self) -> Self::IntoIter {
        self.moves.into_iter()
    }
}

/// Every complete move for the side to move in `state`.
///
/// Steps that leave the turn unfinished are extended from the new
/// position's candidates until the turn closes, so a capture chain comes
/// out as one move. A chain with nowhere left to go is closed as it stands.
pub fn generate_moves<S: GameState>(state: &S) -> MoveList<S> {
    let mut moves = MoveList::new();
    let mut steps = Vec::new();
    extend(state, &mut steps, &mut moves);
    moves
}

fn extend<S: GameState>(state: &S, steps: &mut Vec<Step<S::Position>>, moves: &mut MoveList<S>) {
    let mut destinations = Vec::new();
    for origin in state.candidates() {
        destinations.clear();
        state.possible_moves(origin, &mut destinations);

        for &destination in &destinations {
            let mut next = state.clone();
            if !next.make_move(origin, destination) {
                log::trace!("skipping rejected step {origin:?} -> {destination:?}");
                continue;
            }
            steps.push(Step {
                from: origin,
                to: destination,
            });

            if next.last_turn_finished() {
                close(next, steps, moves);
            } else {
                let before = moves.len();
                extend(&next, steps, moves);
                if moves.len() == before {
                    close(next, steps, moves);
                }
            }

            steps.pop();
        }
    }
}

fn close<S: GameState>(mut state: S, steps: &[Step<S::Position>], moves: &mut MoveList<S>) {
    state.next_turn();
    moves.push(Move {
        steps: steps.to_vec(),
        state,
    });
}
