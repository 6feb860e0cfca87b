//! Level progression curve
//!
//! XP requirements grow geometrically: advancing from level L to L+1
//! costs floor(100 × 1.5^(L-1)). Level state is always recomputed from
//! the cumulative total, so accumulation order can never change the
//! outcome.

use serde::{Deserialize, Serialize};

/// XP required to advance from level 1 to level 2
pub const BASE_LEVEL_XP: u64 = 100;

/// Geometric growth factor between consecutive level requirements
pub const LEVEL_XP_GROWTH: f64 = 1.5;

/// XP required to advance from `level` to `level + 1`
pub fn xp_required_for_level(level: u32) -> u64 {
    (BASE_LEVEL_XP as f64 * LEVEL_XP_GROWTH.powi(level as i32 - 1)).floor() as u64
}

/// Level position derived from a cumulative XP total
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelState {
    pub level: u32,
    /// XP earned within the current level
    pub current_level_xp: u64,
    /// XP the current level requires to advance
    pub required_level_xp: u64,
}

/// Compute level state from a cumulative XP total
///
/// Total XP is consumed level-by-level until the remainder no longer
/// covers the next requirement; the remainder becomes the progress
/// within the resulting level.
pub fn calculate_level(total_xp: u64) -> LevelState {
    let mut level = 1;
    let mut remaining = total_xp;
    loop {
        let required = xp_required_for_level(level);
        if remaining < required {
            return LevelState {
                level,
                current_level_xp: remaining,
                required_level_xp: required,
            };
        }
        remaining -= required;
        level += 1;
    }
}
