//! Hand-built game trees for exercising the search without game rules.

use crate::engine::config::EngineConfig;
use crate::engine::eval::terminal_score;
use crate::engine::Evaluator;
use crate::logic::board::Side;
use crate::logic::game::{Difficulty, GameState, GameStatus};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::rc::Rc;
use std::sync::Arc;

#[derive(Debug, Default)]
pub struct Node {
    /// Heuristic value for the first side, used when the search stops here.
    pub score: i32,
    pub status: Option<GameStatus>,
    pub children: Vec<Rc<Node>>,
    /// The turn is not over after stepping into this node.
    pub continues: bool,
    pub halts: bool,
    pub rejected: bool,
}

pub fn leaf(score: i32) -> Rc<Node> {
    Rc::new(Node {
        score,
        ..Node::default()
    })
}

pub fn branch(children: Vec<Rc<Node>>) -> Rc<Node> {
    scored(0, children)
}

pub fn scored(score: i32, children: Vec<Rc<Node>>) -> Rc<Node> {
    Rc::new(Node {
        score,
        children,
        ..Node::default()
    })
}

pub fn won(side: Side) -> Rc<Node> {
    Rc::new(Node {
        status: Some(GameStatus::Won(side)),
        ..Node::default()
    })
}

pub fn halting(score: i32, children: Vec<Rc<Node>>) -> Rc<Node> {
    Rc::new(Node {
        score,
        children,
        halts: true,
        ..Node::default()
    })
}

pub fn continuing(score: i32, children: Vec<Rc<Node>>) -> Rc<Node> {
    Rc::new(Node {
        score,
        children,
        continues: true,
        ..Node::default()
    })
}

pub fn rejected() -> Rc<Node> {
    Rc::new(Node {
        rejected: true,
        ..Node::default()
    })
}

/// Random tree with `levels` levels below the root. Some nodes end the
/// game, some are stuck without children.
pub fn random_tree(rng: &mut StdRng, levels: u8) -> Rc<Node> {
    let score = rng.gen_range(-50..=50);
    if levels == 0 {
        return leaf(score);
    }
    match rng.gen_range(0..20) {
        0 => won(Side::First),
        1 => won(Side::Second),
        2 => leaf(score),
        _ => {
            let width = rng.gen_range(1..=4);
            let children = (0..width).map(|_| random_tree(rng, levels - 1)).collect();
            scored(score, children)
        }
    }
}

pub fn seeded_tree(seed: u64, levels: u8) -> Rc<Node> {
    let mut rng = StdRng::seed_from_u64(seed);
    random_tree(&mut rng, levels)
}

/// A position in a [`Node`] tree. The first side is the AI and moves first;
/// a step's destination is the index of the child it enters.
#[derive(Debug, Clone)]
pub struct TreeState {
    pub node: Rc<Node>,
    turn: Side,
    difficulty: Difficulty,
    forced_loss: bool,
}

impl TreeState {
    pub fn new(node: Rc<Node>) -> Self {
        Self {
            node,
            turn: Side::First,
            difficulty: Difficulty::Normal,
            forced_loss: false,
        }
    }

    pub fn with_forced_loss(mut self) -> Self {
        self.forced_loss = true;
        self
    }

    pub fn same_position(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.node, &other.node) && self.turn == other.turn
    }
}

impl GameState for TreeState {
    type Position = usize;

    fn turn(&self) -> Side {
        self.turn
    }

    fn status(&self) -> GameStatus {
        self.node.status.unwrap_or(GameStatus::Playing)
    }

    fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    fn player_side(&self) -> Side {
        Side::Second
    }

    fn candidates(&self) -> Vec<usize> {
        if self.node.children.is_empty() {
            Vec::new()
        } else {
            vec![0]
        }
    }

    fn possible_moves(&self, _origin: usize, out: &mut Vec<usize>) {
        out.extend(0..self.node.children.len());
    }

    fn make_move(&mut self, _origin: usize, destination: usize) -> bool {
        match self.node.children.get(destination) {
            Some(child) if !child.rejected => {
                self.node = Rc::clone(child);
                true
            }
            _ => false,
        }
    }

    fn next_turn(&mut self) {
        self.turn = self.turn.opposite();
    }

    fn last_turn_finished(&self) -> bool {
        !self.node.continues
    }

    fn halts_search(&self) -> bool {
        self.node.halts
    }

    fn forced_loss(&self) -> bool {
        self.forced_loss
    }
}

pub struct TreeEvaluator;

impl Evaluator<TreeState> for TreeEvaluator {
    fn evaluate(&self, state: &TreeState) -> i32 {
        terminal_score(state.status(), state.ai_side()).unwrap_or(state.node.score)
    }
}

pub fn config(depth: u8, prefer_fast_wins: bool) -> Arc<EngineConfig> {
    let mut config = EngineConfig::default().with_depths(depth, depth, depth);
    config.prefer_fast_wins = prefer_fast_wins;
    Arc::new(config)
}
