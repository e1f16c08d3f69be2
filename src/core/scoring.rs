//! Scoring module - match scores, level thresholds, drop pacing
//!
//! Every cleared block is worth a flat base, specials add a fixed bonus,
//! and every cascade stage past the first adds a small chain bonus.

use crate::types::{
    BASE_DROP_INTERVAL_MS, CASCADE_BONUS, DROP_INTERVAL_FLOOR_MS, LEVEL_STEP, MATCH_BASE_SCORE,
    SPECIAL_BONUS,
};

/// Points for one Clearing stage: `count` matched blocks of which
/// `specials` carry the bonus flag, at cascade depth `chain` (0 for the
/// stage triggered directly by a swap or drop)
pub fn match_points(count: usize, specials: usize, chain: u32) -> u32 {
    let base = (count as u32).saturating_mul(MATCH_BASE_SCORE);
    let bonus = (specials as u32).saturating_mul(SPECIAL_BONUS);
    let cascade = if chain > 0 { CASCADE_BONUS } else { 0 };
    base.saturating_add(bonus).saturating_add(cascade)
}

/// Level for a score: one level per `LEVEL_STEP` points, starting at 1
pub fn level_for_score(score: u32) -> u32 {
    score / LEVEL_STEP + 1
}

/// Auto-drop interval for a difficulty value.
///
/// Difficulty below 1 (or non-finite garbage) clamps to 1; the result
/// never drops below the floor, so timers can never go to zero.
pub fn drop_interval_ms(difficulty: f32) -> u32 {
    let difficulty = if difficulty.is_finite() && difficulty > 1.0 {
        difficulty
    } else {
        1.0
    };
    let interval = (BASE_DROP_INTERVAL_MS as f32 / difficulty) as u32;
    interval.max(DROP_INTERVAL_FLOOR_MS)
}
