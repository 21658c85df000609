use crate::engine::eval::{clamp_heuristic, terminal_score};
use crate::engine::Evaluator;
use crate::logic::board::{parse_grid, render_grid, Coord, Side, SQUARES};
use crate::logic::error::ParseError;
use crate::logic::game::{Difficulty, GameState};
use serde::{Deserialize, Serialize};
use serde_big_array::BigArray;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    const fn letter(self) -> char {
        match self {
            Self::Pawn => 'p',
            Self::Knight => 'n',
            Self::Bishop => 'b',
            Self::Rook => 'r',
            Self::Queen => 'q',
            Self::King => 'k',
        }
    }

    const fn from_letter(c: char) -> Option<Self> {
        match c {
            'p' => Some(Self::Pawn),
            'n' => Some(Self::Knight),
            'b' => Some(Self::Bishop),
            'r' => Some(Self::Rook),
            'q' => Some(Self::Queen),
            'k' => Some(Self::King),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChessPiece {
    pub kind: PieceKind,
    pub side: Side,
}

impl ChessPiece {
    pub const fn new(kind: PieceKind, side: Side) -> Self {
        Self { kind, side }
    }

    /// Upper case for the first side, lower case for the second.
    pub const fn glyph(self) -> char {
        let letter = self.kind.letter();
        match self.side {
            Side::First => letter.to_ascii_uppercase(),
            Side::Second => letter,
        }
    }

    fn from_glyph(c: char) -> Option<Option<Self>> {
        if c == '.' || c == '-' {
            return Some(None);
        }
        let side = if c.is_ascii_uppercase() {
            Side::First
        } else {
            Side::Second
        };
        PieceKind::from_letter(c.to_ascii_lowercase()).map(|kind| Some(Self::new(kind, side)))
    }

    /// Row step of a pawn of this side. The first side sits on the low rows.
    const fn forward(self) -> i8 {
        match self.side {
            Side::First => 1,
            Side::Second => -1,
        }
    }
}

/// Piece placement and attack geometry. Knows nothing about whose turn it
/// is or which moves are legal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChessBoard {
    #[serde(with = "BigArray")]
    cells: [Option<ChessPiece>; SQUARES],
}

impl Default for ChessBoard {
    fn default() -> Self {
        Self::empty()
    }
}

impl ChessBoard {
    pub const fn empty() -> Self {
        Self {
            cells: [None; SQUARES],
        }
    }

    /// Row 0 first, `PNBRQK` for the first side, `pnbrqk` for the second.
    pub fn from_text(text: &str) -> Result<Self, ParseError> {
        let cells = parse_grid(text, None, ChessPiece::from_glyph)?;
        Ok(Self { cells })
    }

    pub fn get(&self, c: Coord) -> Option<ChessPiece> {
        self.cells[c.index()]
    }

    pub fn pieces(&self) -> impl Iterator<Item = (Coord, ChessPiece)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter_map(|(i, cell)| cell.map(|piece| (Coord::from_index(i), piece)))
    }

    pub fn king(&self, side: Side) -> Option<Coord> {
        self.pieces()
            .find(|(_, p)| p.side == side && p.kind == PieceKind::King)
            .map(|(c, _)| c)
    }

    /// Only the king is left for `side`.
    pub fn is_bare_king(&self, side: Side) -> bool {
        let mut own = self.pieces().filter(|(_, p)| p.side == side);
        matches!(own.next(), Some((_, p)) if p.kind == PieceKind::King) && own.next().is_none()
    }

    fn path_clear(&self, from: Coord, to: Coord) -> bool {
        let dr = (i16::from(to.row) - i16::from(from.row)).signum();
        let dc = (i16::from(to.col) - i16::from(from.col)).signum();
        #[allow(clippy::cast_possible_truncation)]
        let (dr, dc) = (dr as i8, dc as i8);
        let mut cursor = from.offset(dr, dc);
        while let Some(c) = cursor {
            if c == to {
                return true;
            }
            if self.get(c).is_some() {
                return false;
            }
            cursor = c.offset(dr, dc);
        }
        false
    }

    /// Whether the piece on `from` attacks `target`, whatever stands there.
    pub fn attacks(&self, from: Coord, target: Coord) -> bool {
        let Some(piece) = self.get(from) else {
            return false;
        };
        if from == target {
            return false;
        }
        let dr = from.row.abs_diff(target.row);
        let dc = from.col.abs_diff(target.col);
        let straight = dr == 0 || dc == 0;
        let diagonal = dr == dc;
        match piece.kind {
            PieceKind::Pawn => {
                from.offset(piece.forward(), -1) == Some(target)
                    || from.offset(piece.forward(), 1) == Some(target)
            }
            PieceKind::Knight => (dr == 1 && dc == 2) || (dr == 2 && dc == 1),
            PieceKind::King => from.distance(target) == 1,
            PieceKind::Rook => straight && self.path_clear(from, target),
            PieceKind::Bishop => diagonal && self.path_clear(from, target),
            PieceKind::Queen => (straight || diagonal) && self.path_clear(from, target),
        }
    }

    /// Squares of `side`'s pieces attacking `target`.
    pub fn attackers(&self, target: Coord, side: Side) -> Vec<Coord> {
        self.pieces()
            .filter(|&(c, p)| p.side == side && self.attacks(c, target))
            .map(|(c, _)| c)
            .collect()
    }

    pub fn in_check(&self, side: Side) -> bool {
        self.king(side)
            .is_some_and(|king| !self.attackers(king, side.opposite()).is_empty())
    }
}

impl fmt::Display for ChessBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render_grid(&self.cells, |cell| {
            cell.map_or('.', ChessPiece::glyph)
        }))
    }
}

/// A chess game state the evaluator can read the board from.
pub trait ChessPosition: GameState<Position = Coord> {
    fn board(&self) -> &ChessBoard;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChessWeights {
    pub pawn: i32,
    pub knight: i32,
    pub bishop: i32,
    pub rook: i32,
    pub queen: i32,
    pub king: i32,
    /// King value once either side is down to a bare king.
    pub endgame_king: i32,
    pub easy_queen: i32,
    pub easy_king: i32,

    // Positional terms
    pub threat: i32,
    pub edge_push: i32,
    pub proximity: i32,
}

impl Default for ChessWeights {
    fn default() -> Self {
        Self {
            pawn: 1,
            knight: 3,
            bishop: 3,
            rook: 5,
            queen: 9,
            king: 100,
            endgame_king: 1000,
            easy_queen: 5,
            easy_king: 50,
            threat: 1,
            edge_push: 2,
            proximity: 1,
        }
    }
}

#[derive(Deserialize)]
struct ChessWeightsJson {
    pawn: Option<f32>,
    knight: Option<f32>,
    bishop: Option<f32>,
    rook: Option<f32>,
    queen: Option<f32>,
    king: Option<f32>,
    endgame_king: Option<f32>,
    easy_queen: Option<f32>,
    easy_king: Option<f32>,

    threat: Option<i32>,
    edge_push: Option<i32>,
    proximity: Option<i32>,
}

impl ChessWeights {
    /// Piece values in the JSON are scale factors on the defaults, kept
    /// within `0..=PIECE_VALUE_LIMIT`; the positional terms are absolute.
    pub fn load_from_json(json_str: &str) -> Result<Self, serde_json::Error> {
        let json: ChessWeightsJson = serde_json::from_str(json_str)?;
        let default = Self::default();

        Ok(Self {
            pawn: apply_scale(default.pawn, json.pawn),
            knight: apply_scale(default.knight, json.knight),
            bishop: apply_scale(default.bishop, json.bishop),
            rook: apply_scale(default.rook, json.rook),
            queen: apply_scale(default.queen, json.queen),
            king: apply_scale(default.king, json.king),
            endgame_king: apply_scale(default.endgame_king, json.endgame_king),
            easy_queen: apply_scale(default.easy_queen, json.easy_queen),
            easy_king: apply_scale(default.easy_king, json.easy_king),

            threat: json.threat.unwrap_or(default.threat),
            edge_push: json.edge_push.unwrap_or(default.edge_push),
            proximity: json.proximity.unwrap_or(default.proximity),
        })
    }

    const fn value(&self, kind: PieceKind, difficulty: Difficulty, endgame: bool) -> i32 {
        match (kind, difficulty) {
            (PieceKind::Pawn, _) => self.pawn,
            (PieceKind::Knight, _) => self.knight,
            (PieceKind::Bishop, _) => self.bishop,
            (PieceKind::Rook, _) => self.rook,
            (PieceKind::Queen, Difficulty::Easy) => self.easy_queen,
            (PieceKind::Queen, _) => self.queen,
            (PieceKind::King, Difficulty::Easy) => self.easy_king,
            (PieceKind::King, _) if endgame => self.endgame_king,
            (PieceKind::King, _) => self.king,
        }
    }
}

/// Upper bound on a scaled piece value.
pub const PIECE_VALUE_LIMIT: i32 = 1_000_000;

#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn apply_scale(default_val: i32, scale: Option<f32>) -> i32 {
    scale
        .map_or(default_val, |s| (default_val as f32 * s) as i32)
        .clamp(0, PIECE_VALUE_LIMIT)
}

/// Net material the side to capture wins on a square holding `target`.
/// Both lists hold piece values, cheapest first; either side may stop
/// capturing when going on would lose material, so the result is never
/// negative.
pub fn exchange_gain(target: i32, attackers: &[i32], defenders: &[i32]) -> i32 {
    let Some((&first, rest)) = attackers.split_first() else {
        return 0;
    };
    (target - exchange_gain(first, defenders, rest)).max(0)
}

/// Material, endgame pressure and hanging-piece threats, from the AI side.
#[derive(Debug, Clone, Default)]
pub struct ChessEvaluator {
    weights: ChessWeights,
}

impl ChessEvaluator {
    pub const fn new(weights: ChessWeights) -> Self {
        Self { weights }
    }

    fn material(&self, board: &ChessBoard, ai: Side, difficulty: Difficulty, endgame: bool) -> i32 {
        board
            .pieces()
            .map(|(_, p)| p.side.sign_for(ai) * self.weights.value(p.kind, difficulty, endgame))
            .fold(0, i32::saturating_add)
    }

    /// Pressure `strong` puts on a bare enemy king: the king pushed off the
    /// centre and `strong`'s pieces close to it.
    fn pressure(&self, board: &ChessBoard, strong: Side) -> i32 {
        let Some(king) = board.king(strong.opposite()) else {
            return 0;
        };
        let edge = i32::from(king.centre_distance()).saturating_mul(self.weights.edge_push);
        let near: i32 = board
            .pieces()
            .filter(|(_, p)| p.side == strong)
            .map(|(c, _)| 7 - i32::from(c.distance(king)))
            .sum();
        edge.saturating_add(near.saturating_mul(self.weights.proximity))
    }

    fn threats(&self, board: &ChessBoard, ai: Side, difficulty: Difficulty) -> i32 {
        let value_of = |c: Coord| {
            board
                .get(c)
                .map_or(0, |p| self.weights.value(p.kind, difficulty, false))
        };
        let sorted_values = |squares: Vec<Coord>| {
            let mut values: Vec<i32> = squares.into_iter().map(value_of).collect();
            values.sort_unstable();
            values
        };

        board
            .pieces()
            .filter(|(_, p)| p.kind != PieceKind::King)
            .map(|(c, p)| {
                let attackers = sorted_values(board.attackers(c, p.side.opposite()));
                if attackers.is_empty() {
                    return 0;
                }
                let defenders = sorted_values(board.attackers(c, p.side));
                let target = self.weights.value(p.kind, difficulty, false);
                let gain = exchange_gain(target, &attackers, &defenders);
                (-p.side.sign_for(ai) * gain).saturating_mul(self.weights.threat)
            })
            .fold(0, i32::saturating_add)
    }
}

impl<S: ChessPosition> Evaluator<S> for ChessEvaluator {
    fn evaluate(&self, state: &S) -> i32 {
        let ai = state.ai_side();
        if let Some(score) = terminal_score(state.status(), ai) {
            return score;
        }

        let board = state.board();
        let difficulty = state.difficulty();
        let ai_bare = board.is_bare_king(ai);
        let opponent_bare = board.is_bare_king(ai.opposite());
        let endgame = ai_bare || opponent_bare;

        let mut score = self.material(board, ai, difficulty, endgame);
        if opponent_bare && !ai_bare {
            score = score.saturating_add(self.pressure(board, ai));
        } else if ai_bare && !opponent_bare {
            score = score.saturating_sub(self.pressure(board, ai.opposite()));
        } else if !endgame {
            score = score.saturating_add(self.threats(board, ai, difficulty));
        }
        clamp_heuristic(score)
    }
}
