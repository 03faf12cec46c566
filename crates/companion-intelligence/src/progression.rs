// ABOUTME: Experience grants, level-up rule, and badge/milestone construction
// ABOUTME: A grant raises the level by at most one when experience reaches level * 100
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitness Companion Contributors

use chrono::{DateTime, Utc};
use companion_core::constants::progression::{
    CHALLENGE_BADGE_CATEGORY, CHALLENGE_BADGE_DETAILS, CHALLENGE_BADGE_ICON, CHALLENGE_BADGE_NAME,
    LEVEL_MILESTONE_CATEGORY, LEVEL_MILESTONE_ICON, XP_PER_LEVEL,
};
use companion_core::models::{Award, AwardKind};

/// Level and experience after a grant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressionOutcome {
    /// Level after the grant
    pub level: u32,
    /// Total experience after the grant (never reset on level-up)
    pub experience: u32,
    /// Whether this grant crossed the level threshold
    pub leveled_up: bool,
}

/// Experience a user at `level` needs to advance
#[must_use]
pub const fn experience_for_next_level(level: u32) -> u32 {
    level.saturating_mul(XP_PER_LEVEL)
}

/// Add `gained` experience and apply a single level-up check
#[must_use]
pub const fn apply_experience(level: u32, experience: u32, gained: u32) -> ProgressionOutcome {
    let experience = experience.saturating_add(gained);
    let leveled_up = experience >= experience_for_next_level(level);
    ProgressionOutcome {
        level: if leveled_up { level.saturating_add(1) } else { level },
        experience,
        leveled_up,
    }
}

/// Badge granted for completing a challenge
#[must_use]
pub fn challenge_badge(awarded_at: DateTime<Utc>) -> Award {
    Award {
        kind: AwardKind::Badge,
        name: CHALLENGE_BADGE_NAME.to_owned(),
        details: CHALLENGE_BADGE_DETAILS.to_owned(),
        icon: CHALLENGE_BADGE_ICON.to_owned(),
        category: CHALLENGE_BADGE_CATEGORY.to_owned(),
        awarded_at,
    }
}

/// Milestone granted on reaching `level`
#[must_use]
pub fn level_milestone(level: u32, awarded_at: DateTime<Utc>) -> Award {
    Award {
        kind: AwardKind::Milestone,
        name: format!("Level {level}"),
        details: format!("Reached level {level}"),
        icon: LEVEL_MILESTONE_ICON.to_owned(),
        category: LEVEL_MILESTONE_CATEGORY.to_owned(),
        awarded_at,
    }
}
