// ABOUTME: Fixed-catalog challenge definition with duration class and difficulty
// ABOUTME: Serialized in the shape clients render on the challenges page
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitness Companion Contributors

use serde::Serialize;

/// Duration class of a challenge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ChallengeKind {
    /// One week
    #[serde(rename = "7-Day")]
    SevenDay,
    /// Two weeks
    #[serde(rename = "14-Day")]
    FourteenDay,
    /// One month
    #[serde(rename = "30-Day")]
    ThirtyDay,
}

impl ChallengeKind {
    /// Display label
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::SevenDay => "7-Day",
            Self::FourteenDay => "14-Day",
            Self::ThirtyDay => "30-Day",
        }
    }

    /// Number of days the challenge runs for
    #[must_use]
    pub const fn duration_days(&self) -> u32 {
        match self {
            Self::SevenDay => 7,
            Self::FourteenDay => 14,
            Self::ThirtyDay => 30,
        }
    }
}

/// Difficulty rating
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ChallengeDifficulty {
    /// Beginner friendly
    Easy,
    /// Some consistency required
    Medium,
    /// Demanding
    Hard,
}

/// A challenge from the fixed catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChallengeDefinition {
    /// Stable catalog identifier
    pub id: &'static str,
    /// Display name
    pub name: &'static str,
    /// Short description
    pub details: &'static str,
    /// Duration class
    #[serde(rename = "type")]
    pub kind: ChallengeKind,
    /// Number of daily check-ins
    #[serde(rename = "duration")]
    pub duration_days: u32,
    /// Difficulty rating
    #[serde(rename = "lvl")]
    pub difficulty: ChallengeDifficulty,
    /// Experience granted on completion
    pub xp: u32,
}
