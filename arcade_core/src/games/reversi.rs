use crate::engine::config::EngineConfig;
use crate::engine::eval::{clamp_heuristic, terminal_score};
use crate::engine::Evaluator;
use crate::logic::board::{parse_grid, render_grid, Coord, Side, SQUARES};
use crate::logic::error::ParseError;
use crate::logic::game::{Difficulty, GameState, GameStatus};
use serde::{Deserialize, Serialize};
use serde_big_array::BigArray;
use std::fmt;

const DIRECTIONS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Square values, corners high and the squares handing them over low.
#[rustfmt::skip]
pub const POSITION_WEIGHTS: [i32; SQUARES] = [
    100, -20,  10,   5,   5,  10, -20, 100,
    -20, -50,  -2,  -2,  -2,  -2, -50, -20,
     10,  -2,  -1,  -1,  -1,  -1,  -2,  10,
      5,  -2,  -1,  -1,  -1,  -1,  -2,   5,
      5,  -2,  -1,  -1,  -1,  -1,  -2,   5,
     10,  -2,  -1,  -1,  -1,  -1,  -2,  10,
    -20, -50,  -2,  -2,  -2,  -2, -50, -20,
    100, -20,  10,   5,   5,  10, -20, 100,
];

const fn glyph(cell: Option<Side>) -> char {
    match cell {
        Some(Side::First) => 'x',
        Some(Side::Second) => 'o',
        None => '.',
    }
}

const fn from_glyph(c: char) -> Option<Option<Side>> {
    match c {
        'x' => Some(Some(Side::First)),
        'o' => Some(Some(Side::Second)),
        '.' | '-' => Some(None),
        _ => None,
    }
}

/// Reversi on 8x8. A move is a single placement, written as a step whose
/// origin and destination are the same square. A side without a placement
/// passes; when neither side can place the game ends on disc count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReversiState {
    #[serde(with = "BigArray")]
    cells: [Option<Side>; SQUARES],
    turn: Side,
    status: GameStatus,
    difficulty: Difficulty,
    player_side: Side,
}

impl Default for ReversiState {
    fn default() -> Self {
        Self::new()
    }
}

impl ReversiState {
    #[must_use]
    pub fn new() -> Self {
        let mut cells = [None; SQUARES];
        for (row, col, side) in [
            (3, 3, Side::Second),
            (3, 4, Side::First),
            (4, 3, Side::First),
            (4, 4, Side::Second),
        ] {
            cells[row * 8 + col] = Some(side);
        }
        Self::from_cells(cells, Side::First)
    }

    /// Parses a board drawn row 0 first: `x` first side, `o` second side,
    /// `.` empty. First side to move, or the second if the first must pass.
    pub fn from_text(text: &str) -> Result<Self, ParseError> {
        let cells = parse_grid(text, None, from_glyph)?;
        Ok(Self::from_cells(cells, Side::First))
    }

    fn from_cells(cells: [Option<Side>; SQUARES], turn: Side) -> Self {
        let mut state = Self {
            cells,
            turn,
            status: GameStatus::Playing,
            difficulty: Difficulty::default(),
            player_side: Side::Second,
        };
        state.settle();
        state
    }

    #[must_use]
    pub fn with_turn(mut self, turn: Side) -> Self {
        self.turn = turn;
        self.settle();
        self
    }

    #[must_use]
    pub const fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    #[must_use]
    pub const fn with_player_side(mut self, side: Side) -> Self {
        self.player_side = side;
        self
    }

    pub fn set_player_side(&mut self, side: Side) {
        self.player_side = side;
    }

    pub fn disc_at(&self, c: Coord) -> Option<Side> {
        self.cells[c.index()]
    }

    pub fn count(&self, side: Side) -> usize {
        self.cells.iter().filter(|&&cell| cell == Some(side)).count()
    }

    /// Discs flipped if `side` placed at `at`; empty when the placement is illegal.
    pub fn flips(&self, at: Coord, side: Side) -> Vec<Coord> {
        let mut flipped = Vec::new();
        if self.disc_at(at).is_some() {
            return flipped;
        }
        for (dr, dc) in DIRECTIONS {
            let mut line = Vec::new();
            let mut cursor = at.offset(dr, dc);
            while let Some(c) = cursor {
                match self.disc_at(c) {
                    Some(disc) if disc == side.opposite() => line.push(c),
                    Some(_) => {
                        flipped.append(&mut line);
                        break;
                    }
                    None => break,
                }
                cursor = c.offset(dr, dc);
            }
        }
        flipped
    }

    pub fn is_legal(&self, at: Coord, side: Side) -> bool {
        !self.flips(at, side).is_empty()
    }

    pub fn legal_moves(&self, side: Side) -> Vec<Coord> {
        Coord::all().filter(|&c| self.is_legal(c, side)).collect()
    }

    fn can_place(&self, side: Side) -> bool {
        Coord::all().any(|c| self.is_legal(c, side))
    }

    /// Passes for a stuck side and ends the game when both are stuck.
    fn settle(&mut self) {
        if self.can_place(self.turn) {
            self.status = GameStatus::Playing;
            return;
        }
        if self.can_place(self.turn.opposite()) {
            log::trace!("{} has no placement and passes", self.turn);
            self.turn = self.turn.opposite();
            self.status = GameStatus::Playing;
            return;
        }

        let first = self.count(Side::First);
        let second = self.count(Side::Second);
        self.status = match first.cmp(&second) {
            std::cmp::Ordering::Greater => GameStatus::Won(Side::First),
            std::cmp::Ordering::Less => GameStatus::Won(Side::Second),
            std::cmp::Ordering::Equal => GameStatus::Draw,
        };
    }
}

impl GameState for ReversiState {
    type Position = Coord;

    fn turn(&self) -> Side {
        self.turn
    }

    fn status(&self) -> GameStatus {
        self.status
    }

    fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    fn player_side(&self) -> Side {
        self.player_side
    }

    fn candidates(&self) -> Vec<Coord> {
        self.legal_moves(self.turn)
    }

    fn possible_moves(&self, origin: Coord, out: &mut Vec<Coord>) {
        if self.is_legal(origin, self.turn) {
            out.push(origin);
        }
    }

    fn make_move(&mut self, origin: Coord, destination: Coord) -> bool {
        if origin != destination || self.game_over() {
            return false;
        }
        let flipped = self.flips(origin, self.turn);
        if flipped.is_empty() {
            return false;
        }
        for c in flipped {
            self.cells[c.index()] = Some(self.turn);
        }
        self.cells[origin.index()] = Some(self.turn);
        true
    }

    fn next_turn(&mut self) {
        self.turn = self.turn.opposite();
        self.settle();
    }
}

impl fmt::Display for ReversiState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let board = render_grid(&self.cells, glyph);
        write!(
            f,
            "{board}{} to move (x {} - o {})",
            self.turn,
            self.count(Side::First),
            self.count(Side::Second)
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReversiWeights {
    /// Per placement of mobility advantage, `Hard` only.
    pub mobility: i32,
}

impl Default for ReversiWeights {
    fn default() -> Self {
        Self { mobility: 5 }
    }
}

/// `Easy` counts discs, `Normal` sums square values, `Hard` adds mobility.
#[derive(Debug, Clone, Default)]
pub struct ReversiEvaluator {
    weights: ReversiWeights,
}

impl ReversiEvaluator {
    pub const fn new(weights: ReversiWeights) -> Self {
        Self { weights }
    }
}

impl Evaluator<ReversiState> for ReversiEvaluator {
    fn evaluate(&self, state: &ReversiState) -> i32 {
        let ai = state.ai_side();
        if let Some(score) = terminal_score(state.status(), ai) {
            return score;
        }

        let discs = state.cells.iter().zip(POSITION_WEIGHTS).filter_map(|(cell, weight)| {
            cell.map(|side| (side.sign_for(ai), weight))
        });
        let score: i32 = match state.difficulty() {
            Difficulty::Easy => discs.map(|(sign, _)| sign).sum(),
            Difficulty::Normal => discs.map(|(sign, weight)| sign * weight).sum(),
            Difficulty::Hard => {
                let positional: i32 = discs.map(|(sign, weight)| sign * weight).sum();
                let own = state.legal_moves(ai).len();
                let theirs = state.legal_moves(ai.opposite()).len();
                let mobility = i32::try_from(own).unwrap_or(i32::MAX)
                    - i32::try_from(theirs).unwrap_or(i32::MAX);
                positional + self.weights.mobility * mobility
            }
        };
        clamp_heuristic(score)
    }
}

/// Depths used by the reversi AI.
pub fn engine_config() -> EngineConfig {
    EngineConfig::default().with_depths(1, 2, 4)
}
