// ABOUTME: Badge and milestone award records granted by gamification rules
// ABOUTME: Stored per user in award order and listed by the badges/milestones endpoints
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitness Companion Contributors

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Which list an award belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AwardKind {
    /// Achievement badge
    #[default]
    Badge,
    /// Level or progress milestone
    Milestone,
}

impl AwardKind {
    /// Convert to database string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Badge => "badge",
            Self::Milestone => "milestone",
        }
    }

    /// Parse from database string representation
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "badge" => Some(Self::Badge),
            "milestone" => Some(Self::Milestone),
            _ => None,
        }
    }
}

/// A badge or milestone granted to a user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Award {
    /// Badge or milestone
    #[serde(skip)]
    pub kind: AwardKind,
    /// Display name
    pub name: String,
    /// Description
    pub details: String,
    /// Emoji icon
    pub icon: String,
    /// Grouping category
    pub category: String,
    /// When it was granted
    pub awarded_at: DateTime<Utc>,
}
