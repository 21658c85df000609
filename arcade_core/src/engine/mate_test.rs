use crate::engine::eval::{LOSS_SCORE, WIN_SCORE};
use crate::engine::search::AlphaBetaEngine;
use crate::engine::test_tree::{branch, config, leaf, won, TreeEvaluator, TreeState};
use crate::engine::config::EngineConfig;
use crate::engine::Searcher;
use crate::logic::board::Side;
use std::sync::Arc;

/// Index of the root child played, with the reported score.
fn play(state: &TreeState, config: Arc<EngineConfig>) -> (usize, i32) {
    let mut engine = AlphaBetaEngine::new(config, TreeEvaluator);
    let (mv, stats) = engine.execute(state).unwrap();
    (mv.first_step().unwrap().to, stats.score)
}

/// First move mates after three plies, the second mates at once.
fn mate_in_one_or_three() -> TreeState {
    let slow = branch(vec![branch(vec![won(Side::First)])]);
    TreeState::new(branch(vec![slow, won(Side::First)]))
}

#[test]
fn test_faster_mate_preferred() {
    let (index, score) = play(&mate_in_one_or_three(), config(3, true));
    assert_eq!(index, 1);
    assert_eq!(score, WIN_SCORE - 1);
}

#[test]
fn test_mates_tie_without_depth_scoring() {
    let (index, score) = play(&mate_in_one_or_three(), config(3, false));
    assert_eq!(index, 0);
    assert_eq!(score, WIN_SCORE);
}

#[test]
fn test_slower_loss_preferred() {
    let slow = branch(vec![branch(vec![branch(vec![won(Side::Second)])])]);
    let root = TreeState::new(branch(vec![won(Side::Second), slow]));

    let (index, score) = play(&root, config(3, true));
    assert_eq!(index, 1);
    assert_eq!(score, LOSS_SCORE + 4);

    // Every move is a plain loss: fall back to the first.
    let (index, score) = play(&root, config(3, false));
    assert_eq!(index, 0);
    assert_eq!(score, LOSS_SCORE);
}

#[test]
fn test_mate_beyond_horizon_is_not_seen() {
    let (index, score) = play(&mate_in_one_or_three(), config(0, true));
    // The quick mate is terminal and scored; the slow line is cut at its root.
    assert_eq!(index, 1);
    assert_eq!(score, WIN_SCORE - 1);

    let root = TreeState::new(branch(vec![
        branch(vec![branch(vec![won(Side::First)])]),
        leaf(2),
    ]));
    assert_eq!(play(&root, config(1, true)), (1, 2));
    assert_eq!(play(&root, config(2, true)), (0, WIN_SCORE - 3));
}

#[test]
fn test_forced_loss_shortcut_plays_first_move() {
    let root = TreeState::new(branch(vec![leaf(1), leaf(9)])).with_forced_loss();

    let mut engine = AlphaBetaEngine::new(config(3, true), TreeEvaluator);
    let (mv, stats) = engine.execute(&root).unwrap();
    assert_eq!(mv.first_step().map(|s| s.to), Some(0));
    assert_eq!(stats.score, LOSS_SCORE);
    assert_eq!(stats.nodes, 1);

    let mut no_shortcut = EngineConfig::default().with_depths(3, 3, 3);
    no_shortcut.shortcut_forced_losses = false;
    assert_eq!(play(&root, Arc::new(no_shortcut)), (1, 9));
}
