use crate::engine::config::EngineConfig;
use crate::engine::eval::{clamp_heuristic, terminal_score};
use crate::engine::Evaluator;
use crate::logic::board::{parse_grid, render_grid, Coord, Side, SQUARES};
use crate::logic::error::ParseError;
use crate::logic::game::{Difficulty, GameState, GameStatus};
use serde::{Deserialize, Serialize};
use serde_big_array::BigArray;
use std::fmt;

/// Plies without a capture after which the game is drawn.
pub const QUIET_PLY_LIMIT: u16 = 80;

const DIAGONALS: [(i8, i8); 4] = [(1, -1), (1, 1), (-1, -1), (-1, 1)];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rank {
    Man,
    King,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    pub rank: Rank,
    pub side: Side,
}

impl Piece {
    pub const fn man(side: Side) -> Self {
        Self {
            rank: Rank::Man,
            side,
        }
    }

    pub const fn king(side: Side) -> Self {
        Self {
            rank: Rank::King,
            side,
        }
    }

    const fn forward(self) -> i8 {
        match self.side {
            Side::First => 1,
            Side::Second => -1,
        }
    }

    fn directions(self) -> impl Iterator<Item = (i8, i8)> {
        DIAGONALS
            .into_iter()
            .filter(move |&(dr, _)| self.rank == Rank::King || dr == self.forward())
    }

    const fn glyph(self) -> char {
        match (self.side, self.rank) {
            (Side::First, Rank::Man) => 'x',
            (Side::First, Rank::King) => 'X',
            (Side::Second, Rank::Man) => 'o',
            (Side::Second, Rank::King) => 'O',
        }
    }

    const fn from_glyph(c: char) -> Option<Option<Self>> {
        match c {
            'x' => Some(Some(Self::man(Side::First))),
            'X' => Some(Some(Self::king(Side::First))),
            'o' => Some(Some(Self::man(Side::Second))),
            'O' => Some(Some(Self::king(Side::Second))),
            '.' | '-' => Some(None),
            _ => None,
        }
    }
}

const fn promotion_row(side: Side) -> u8 {
    match side {
        Side::First => 7,
        Side::Second => 0,
    }
}

/// Pieces live on the squares where row and column share parity.
pub const fn is_playable(c: Coord) -> bool {
    (c.row + c.col) % 2 == 0
}

/// 8x8 checkers: men step and capture forward, kings both ways, capturing
/// is mandatory and a capturing piece keeps jumping while it can. Reaching
/// the far row crowns a man and ends the turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckersState {
    #[serde(with = "BigArray")]
    cells: [Option<Piece>; SQUARES],
    turn: Side,
    status: GameStatus,
    difficulty: Difficulty,
    player_side: Side,
    /// Piece in the middle of a capture chain.
    chain: Option<Coord>,
    quiet_plies: u16,
    captured_this_turn: bool,
}

impl Default for CheckersState {
    fn default() -> Self {
        Self::new()
    }
}

impl CheckersState {
    #[must_use]
    pub fn new() -> Self {
        let mut cells = [None; SQUARES];
        for c in Coord::all().filter(|&c| is_playable(c)) {
            if c.row < 3 {
                cells[c.index()] = Some(Piece::man(Side::First));
            } else if c.row > 4 {
                cells[c.index()] = Some(Piece::man(Side::Second));
            }
        }
        Self::from_cells(cells)
    }

    /// Parses a board drawn row 0 first: `x`/`X` first side man/king,
    /// `o`/`O` second side, `.` empty. First side to move.
    pub fn from_text(text: &str) -> Result<Self, ParseError> {
        let cells = parse_grid(text, None, Piece::from_glyph)?;
        Ok(Self::from_cells(cells))
    }

    fn from_cells(cells: [Option<Piece>; SQUARES]) -> Self {
        let mut state = Self {
            cells,
            turn: Side::First,
            status: GameStatus::Playing,
            difficulty: Difficulty::default(),
            player_side: Side::Second,
            chain: None,
            quiet_plies: 0,
            captured_this_turn: false,
        };
        state.refresh_status();
        state
    }

    #[must_use]
    pub fn with_turn(mut self, turn: Side) -> Self {
        self.turn = turn;
        self.refresh_status();
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

    pub fn piece_at(&self, c: Coord) -> Option<Piece> {
        self.cells[c.index()]
    }

    pub fn pieces(&self, side: Side) -> impl Iterator<Item = (Coord, Piece)> + '_ {
        self.cells.iter().enumerate().filter_map(move |(i, cell)| {
            cell.filter(|p| p.side == side)
                .map(|p| (Coord::from_index(i), p))
        })
    }

    pub fn count(&self, side: Side, rank: Rank) -> usize {
        self.pieces(side).filter(|(_, p)| p.rank == rank).count()
    }

    pub const fn quiet_plies(&self) -> u16 {
        self.quiet_plies
    }

    fn push_jumps(&self, from: Coord, out: &mut Vec<Coord>) {
        let Some(piece) = self.piece_at(from) else {
            return;
        };
        for (dr, dc) in piece.directions() {
            let Some(over) = from.offset(dr, dc) else {
                continue;
            };
            let Some(landing) = over.offset(dr, dc) else {
                continue;
            };
            let captures_enemy = self
                .piece_at(over)
                .is_some_and(|victim| victim.side != piece.side);
            if captures_enemy && self.piece_at(landing).is_none() {
                out.push(landing);
            }
        }
    }

    fn push_steps(&self, from: Coord, out: &mut Vec<Coord>) {
        let Some(piece) = self.piece_at(from) else {
            return;
        };
        for (dr, dc) in piece.directions() {
            if let Some(to) = from.offset(dr, dc) {
                if self.piece_at(to).is_none() {
                    out.push(to);
                }
            }
        }
    }

    fn can_jump_from(&self, from: Coord) -> bool {
        let mut jumps = Vec::new();
        self.push_jumps(from, &mut jumps);
        !jumps.is_empty()
    }

    fn can_step_from(&self, from: Coord) -> bool {
        let mut steps = Vec::new();
        self.push_steps(from, &mut steps);
        !steps.is_empty()
    }

    pub fn side_can_jump(&self, side: Side) -> bool {
        self.pieces(side).any(|(c, _)| self.can_jump_from(c))
    }

    fn must_capture(&self) -> bool {
        self.chain.is_some() || self.side_can_jump(self.turn)
    }

    fn has_any_move(&self, side: Side) -> bool {
        self.pieces(side)
            .any(|(c, _)| self.can_jump_from(c) || self.can_step_from(c))
    }

    fn refresh_status(&mut self) {
        self.status = if !self.has_any_move(self.turn) {
            GameStatus::Won(self.turn.opposite())
        } else if self.quiet_plies >= QUIET_PLY_LIMIT {
            GameStatus::Draw
        } else {
            GameStatus::Playing
        };
    }
}

impl GameState for CheckersState {
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
        if let Some(c) = self.chain {
            return vec![c];
        }
        let capture = self.side_can_jump(self.turn);
        self.pieces(self.turn)
            .map(|(c, _)| c)
            .filter(|&c| {
                if capture {
                    self.can_jump_from(c)
                } else {
                    self.can_step_from(c)
                }
            })
            .collect()
    }

    fn possible_moves(&self, origin: Coord, out: &mut Vec<Coord>) {
        if self.piece_at(origin).map(|p| p.side) != Some(self.turn) {
            return;
        }
        if self.chain.is_some_and(|c| c != origin) {
            return;
        }
        if self.must_capture() {
            self.push_jumps(origin, out);
        } else {
            self.push_steps(origin, out);
        }
    }

    fn make_move(&mut self, origin: Coord, destination: Coord) -> bool {
        if self.game_over() {
            return false;
        }
        let mut legal = Vec::new();
        self.possible_moves(origin, &mut legal);
        if !legal.contains(&destination) {
            return false;
        }
        let Some(mut piece) = self.cells[origin.index()].take() else {
            return false;
        };

        let is_jump = origin.row.abs_diff(destination.row) == 2;
        if is_jump {
            let over = Coord {
                row: (origin.row + destination.row) / 2,
                col: (origin.col + destination.col) / 2,
            };
            self.cells[over.index()] = None;
            self.captured_this_turn = true;
        }

        let promoted = piece.rank == Rank::Man && destination.row == promotion_row(piece.side);
        if promoted {
            piece.rank = Rank::King;
        }
        self.cells[destination.index()] = Some(piece);

        self.chain = (is_jump && !promoted && self.can_jump_from(destination)).then_some(destination);
        true
    }

    fn next_turn(&mut self) {
        self.chain = None;
        if self.captured_this_turn {
            self.quiet_plies = 0;
        } else {
            self.quiet_plies = self.quiet_plies.saturating_add(1);
        }
        self.captured_this_turn = false;
        self.turn = self.turn.opposite();
        self.refresh_status();
    }

    fn last_turn_finished(&self) -> bool {
        self.chain.is_none()
    }
}

impl fmt::Display for CheckersState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let board = render_grid(&self.cells, |cell| cell.map_or('.', Piece::glyph));
        write!(f, "{board}{} to move", self.turn)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckersWeights {
    pub man: i32,
    /// Only counted at `Hard`; kings are worth a man below that.
    pub king: i32,
}

impl Default for CheckersWeights {
    fn default() -> Self {
        Self { man: 1, king: 2 }
    }
}

/// Material count from the AI side's point of view.
#[derive(Debug, Clone, Default)]
pub struct CheckersEvaluator {
    weights: CheckersWeights,
}

impl CheckersEvaluator {
    pub const fn new(weights: CheckersWeights) -> Self {
        Self { weights }
    }

    const fn piece_value(&self, piece: Piece, difficulty: Difficulty) -> i32 {
        match (piece.rank, difficulty) {
            (Rank::King, Difficulty::Hard) => self.weights.king,
            _ => self.weights.man,
        }
    }
}

impl Evaluator<CheckersState> for CheckersEvaluator {
    fn evaluate(&self, state: &CheckersState) -> i32 {
        let ai = state.ai_side();
        if let Some(score) = terminal_score(state.status(), ai) {
            return score;
        }

        let difficulty = state.difficulty();
        let score: i32 = state
            .cells
            .iter()
            .flatten()
            .map(|&piece| piece.side.sign_for(ai) * self.piece_value(piece, difficulty))
            .sum();
        clamp_heuristic(score)
    }
}

/// Depths used by the checkers AI.
pub fn engine_config() -> EngineConfig {
    EngineConfig::default().with_depths(1, 3, 5)
}
