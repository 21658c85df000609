use crate::engine::config::EngineConfig;
use crate::engine::eval::{adjust_for_depth, LOSS_SCORE, WIN_SCORE};
use crate::engine::move_list::generate_moves;
use crate::engine::{Evaluator, Move, SearchStats, Searcher};
use crate::logic::game::GameState;
use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Instant;

/// Depth-limited minimax with alpha-beta pruning.
///
/// The root is always a maximizing ply for the AI side. Below it each state
/// cached in a [`Move`] goes to [`Self::maximizer`] when the AI side is to
/// move there and to [`Self::minimizer`] otherwise, so a side that passes
/// keeps its own ply. Nothing survives between `execute` calls except the
/// configuration and evaluator.
pub struct AlphaBetaEngine<S, E> {
    config: Arc<EngineConfig>,
    evaluator: E,
    max_depth: u8,
    nodes_searched: u32,
    cutoffs: u32,
    _state: PhantomData<fn(&S)>,
}

impl<S, E> AlphaBetaEngine<S, E>
where
    S: GameState,
    E: Evaluator<S>,
{
    pub const fn new(config: Arc<EngineConfig>, evaluator: E) -> Self {
        Self {
            config,
            evaluator,
            max_depth: 0,
            nodes_searched: 0,
            cutoffs: 0,
            _state: PhantomData,
        }
    }

    pub fn update_config(&mut self, config: Arc<EngineConfig>) {
        self.config = config;
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub const fn evaluator(&self) -> &E {
        &self.evaluator
    }

    /// Depth used by the last `execute` call.
    pub const fn max_depth(&self) -> u8 {
        self.max_depth
    }

    fn score(&self, state: &S, depth: u8) -> i32 {
        let score = self.evaluator.evaluate(state);
        if self.config.prefer_fast_wins {
            adjust_for_depth(score, depth)
        } else {
            score
        }
    }

    fn check_stop(&self, state: &S, depth: u8) -> bool {
        depth > self.max_depth || state.game_over() || state.halts_search()
    }

    fn descend(&mut self, state: &S, depth: u8, alpha: i32, beta: i32) -> i32 {
        if state.turn() == state.ai_side() {
            self.maximizer(state, depth, alpha, beta)
        } else {
            self.minimizer(state, depth, alpha, beta)
        }
    }

    fn maximizer(&mut self, state: &S, depth: u8, mut alpha: i32, beta: i32) -> i32 {
        self.nodes_searched += 1;

        if self.check_stop(state, depth) {
            return self.score(state, depth);
        }

        let moves = generate_moves(state);
        if moves.is_empty() {
            // Stuck but not over: score it where it stands.
            return self.score(state, depth);
        }

        let mut best = LOSS_SCORE;
        for mv in &moves {
            let value = self.descend(&mv.state, depth + 1, alpha, beta);
            best = best.max(value);
            alpha = alpha.max(value);
            if alpha > beta {
                self.cutoffs += 1;
                break;
            }
        }
        best
    }

    fn minimizer(&mut self, state: &S, depth: u8, alpha: i32, mut beta: i32) -> i32 {
        self.nodes_searched += 1;

        if self.check_stop(state, depth) {
            return self.score(state, depth);
        }

        let moves = generate_moves(state);
        if moves.is_empty() {
            return self.score(state, depth);
        }

        let mut best = WIN_SCORE;
        for mv in &moves {
            let value = self.descend(&mv.state, depth + 1, alpha, beta);
            best = best.min(value);
            beta = beta.min(value);
            if alpha > beta {
                self.cutoffs += 1;
                break;
            }
        }
        best
    }

    fn stats(&self, score: i32, start: Instant) -> SearchStats {
        SearchStats {
            depth: self.max_depth,
            nodes: self.nodes_searched,
            cutoffs: self.cutoffs,
            score,
            #[allow(clippy::cast_possible_truncation)]
            time_ms: start.elapsed().as_millis() as u64,
        }
    }
}

impl<S, E> Searcher<S> for AlphaBetaEngine<S, E>
where
    S: GameState,
    E: Evaluator<S>,
{
    fn execute(&mut self, root: &S) -> Option<(Move<S>, SearchStats)> {
        let start = Instant::now();
        self.nodes_searched = 1;
        self.cutoffs = 0;
        self.max_depth = self.config.depth_for(root.difficulty());

        if root.game_over() {
            log::debug!("search skipped: game already over ({:?})", root.status());
            return None;
        }

        let moves = generate_moves(root);
        if moves.is_empty() {
            log::debug!("search skipped: no legal moves for {}", root.turn());
            return None;
        }

        if self.config.shortcut_forced_losses && root.forced_loss() {
            log::info!(
                "{} cannot avoid losing, playing the first of {} moves",
                root.turn(),
                moves.len()
            );
            let stats = self.stats(LOSS_SCORE, start);
            return moves.take(0).map(|mv| (mv, stats));
        }

        let mut alpha = LOSS_SCORE;
        let beta = WIN_SCORE;
        let mut best_score = LOSS_SCORE;
        let mut best_index = None;

        for (index, mv) in moves.iter().enumerate() {
            let value = self.descend(&mv.state, 1, alpha, beta);
            if value > best_score {
                best_score = value;
                best_index = Some(index);
                alpha = value;
            }
        }

        let stats = self.stats(best_score, start);
        log::debug!(
            "search finished: depth={} moves={} nodes={} cutoffs={} score={} time={}ms",
            stats.depth,
            moves.len(),
            stats.nodes,
            stats.cutoffs,
            stats.score,
            stats.time_ms
        );

        // Nothing beat the loss sentinel: every move loses, play the first.
        moves.take(best_index.unwrap_or(0)).map(|mv| (mv, stats))
    }
}
