//! Static achievement catalog and streak milestone table

use serde::Serialize;

/// A catalog achievement definition
///
/// Per-user unlock state is membership in the aggregate's achievements
/// set; the catalog itself is static.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Achievement {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    /// One-time XP reward granted on first unlock
    pub xp_reward: u64,
}

/// The full achievement catalog
pub const ACHIEVEMENTS: &[Achievement] = &[
    Achievement {
        id: "first_meal",
        title: "First Bite",
        description: "Log your first meal",
        icon: "🍽️",
        xp_reward: 10,
    },
    Achievement {
        id: "profile_complete",
        title: "Know Thyself",
        description: "Complete your profile",
        icon: "📋",
        xp_reward: 25,
    },
    Achievement {
        id: "first_diet",
        title: "Master Plan",
        description: "Generate your first weekly diet",
        icon: "🗓️",
        xp_reward: 25,
    },
    Achievement {
        id: "streak_3",
        title: "Three-Day Streak",
        description: "Log on 3 consecutive days",
        icon: "🔥",
        xp_reward: 25,
    },
    Achievement {
        id: "streak_7",
        title: "Week Warrior",
        description: "Log on 7 consecutive days",
        icon: "⚡",
        xp_reward: 50,
    },
    Achievement {
        id: "streak_14",
        title: "Fortnight Force",
        description: "Log on 14 consecutive days",
        icon: "💪",
        xp_reward: 100,
    },
    Achievement {
        id: "streak_30",
        title: "Monthly Master",
        description: "Log on 30 consecutive days",
        icon: "🏆",
        xp_reward: 250,
    },
];

/// Look up a catalog achievement by id
pub fn achievement_by_id(id: &str) -> Option<&'static Achievement> {
    ACHIEVEMENTS.iter().find(|a| a.id == id)
}

/// A streak length that pays a bonus every time it is crossed
#[derive(Debug, Clone, Copy)]
pub struct StreakMilestone {
    pub days: u32,
    /// Bonus XP paid on each crossing (the linked achievement's own
    /// reward is additionally paid once, on first unlock)
    pub xp_bonus: u64,
    pub achievement_id: &'static str,
}

/// Streak milestones in ascending order
pub const STREAK_MILESTONES: &[StreakMilestone] = &[
    StreakMilestone {
        days: 3,
        xp_bonus: 50,
        achievement_id: "streak_3",
    },
    StreakMilestone {
        days: 7,
        xp_bonus: 100,
        achievement_id: "streak_7",
    },
    StreakMilestone {
        days: 14,
        xp_bonus: 200,
        achievement_id: "streak_14",
    },
    StreakMilestone {
        days: 30,
        xp_bonus: 500,
        achievement_id: "streak_30",
    },
];

/// Milestone paid when a streak reaches exactly `days`, if any
pub fn streak_milestone_for(days: u32) -> Option<&'static StreakMilestone> {
    STREAK_MILESTONES.iter().find(|m| m.days == days)
}
