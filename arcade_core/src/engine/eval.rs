use crate::logic::board::Side;
use crate::logic::game::GameStatus;

/// The AI has won. Nothing heuristic reaches it.
pub const WIN_SCORE: i32 = i32::MAX;
/// The AI has lost.
pub const LOSS_SCORE: i32 = i32::MIN;
pub const DRAW_SCORE: i32 = 0;

/// Bound for non-terminal scores. The gap to the sentinels is where
/// depth-adjusted wins and losses live.
pub const HEURISTIC_LIMIT: i32 = i32::MAX - 1024;

/// Sentinel score for a finished game, `None` while it is still running.
pub const fn terminal_score(status: GameStatus, ai: Side) -> Option<i32> {
    match status {
        GameStatus::Playing => None,
        GameStatus::Draw => Some(DRAW_SCORE),
        GameStatus::Won(winner) => {
            if winner.index() == ai.index() {
                Some(WIN_SCORE)
            } else {
                Some(LOSS_SCORE)
            }
        }
    }
}

/// Pulls a sentinel toward zero by `depth` so a win found sooner outranks a
/// later one and a loss found later outranks a sooner one. Other scores are
/// returned untouched.
pub const fn adjust_for_depth(score: i32, depth: u8) -> i32 {
    let depth = depth as i32;
    if score == WIN_SCORE {
        WIN_SCORE.saturating_sub(depth)
    } else if score == LOSS_SCORE {
        LOSS_SCORE.saturating_add(depth)
    } else {
        score
    }
}

pub const fn clamp_heuristic(score: i32) -> i32 {
    if score > HEURISTIC_LIMIT {
        HEURISTIC_LIMIT
    } else if score < -HEURISTIC_LIMIT {
        -HEURISTIC_LIMIT
    } else {
        score
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_scores() {
        assert_eq!(
            terminal_score(GameStatus::Won(Side::Second), Side::Second),
            Some(i32::MAX)
        );
        assert_eq!(
            terminal_score(GameStatus::Won(Side::First), Side::Second),
            Some(i32::MIN)
        );
        assert_eq!(terminal_score(GameStatus::Draw, Side::First), Some(0));
        assert_eq!(terminal_score(GameStatus::Playing, Side::First), None);
    }

    #[test]
    fn test_depth_adjustment_orders_wins_and_losses() {
        assert!(adjust_for_depth(WIN_SCORE, 1) > adjust_for_depth(WIN_SCORE, 3));
        assert!(adjust_for_depth(LOSS_SCORE, 4) > adjust_for_depth(LOSS_SCORE, 2));
        assert_eq!(adjust_for_depth(42, 5), 42);
        assert_eq!(adjust_for_depth(WIN_SCORE, u8::MAX), i32::MAX - 255);
    }

    #[test]
    fn test_adjusted_sentinels_stay_outside_heuristic_range() {
        assert!(adjust_for_depth(WIN_SCORE, u8::MAX) > clamp_heuristic(i32::MAX - 1));
        assert!(adjust_for_depth(LOSS_SCORE, u8::MAX) < clamp_heuristic(i32::MIN + 1));
    }
}
