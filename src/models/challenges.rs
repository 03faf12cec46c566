// ABOUTME: A user's enrollment in a catalog challenge with per-day progress
// ABOUTME: Also defines the catalog and enrollment views returned by the challenge endpoints
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitness Companion Contributors

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use companion_core::models::{ChallengeDefinition, ChallengeKind};
use serde::Serialize;
use uuid::Uuid;

/// Enrollment in a challenge
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserChallenge {
    /// Enrollment identifier
    pub id: Uuid,
    /// Owner
    pub user_id: Uuid,
    /// Catalog challenge id
    pub challenge_id: String,
    /// Join time
    pub start_date: DateTime<Utc>,
    /// Join time plus the challenge duration
    pub end_date: DateTime<Utc>,
    /// `YYYY-MM-DD` day key to done flag
    pub progress: BTreeMap<String, bool>,
    /// Whether every day has been completed
    pub completed: bool,
    /// When the last day was completed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    /// Row creation time
    pub created_at: DateTime<Utc>,
}

/// Catalog entry annotated for the caller
#[derive(Debug, Clone, Serialize)]
pub struct ChallengeStatus {
    /// Catalog definition
    #[serde(flatten)]
    pub challenge: &'static ChallengeDefinition,
    /// Caller has an enrollment for it
    pub joined: bool,
    /// Caller has a completed enrollment for it
    pub completed: bool,
}

/// Enrollment enriched with catalog details
#[derive(Debug, Clone, Serialize)]
pub struct UserChallengeView {
    /// Enrollment
    #[serde(flatten)]
    pub user_challenge: UserChallenge,
    /// Catalog name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub challenge_name: Option<&'static str>,
    /// Catalog description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub challenge_description: Option<&'static str>,
    /// Duration class
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<ChallengeKind>,
}

impl UserChallengeView {
    /// Attach catalog details when the challenge id is known
    #[must_use]
    pub fn new(user_challenge: UserChallenge, challenge: Option<&'static ChallengeDefinition>) -> Self {
        Self {
            challenge_name: challenge.map(|c| c.name),
            challenge_description: challenge.map(|c| c.details),
            kind: challenge.map(|c| c.kind),
            user_challenge,
        }
    }
}
