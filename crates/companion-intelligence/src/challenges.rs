// ABOUTME: Fixed catalog of fitness challenges and per-day progress map construction
// ABOUTME: Progress maps are keyed by consecutive calendar days starting at the join date
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitness Companion Contributors

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};
use companion_core::constants::formats::DAY_FORMAT;
use companion_core::constants::progression::DEFAULT_CHALLENGE_XP;
use companion_core::models::{ChallengeDefinition, ChallengeDifficulty, ChallengeKind};

use ChallengeDifficulty::{Easy, Hard, Medium};
use ChallengeKind::{FourteenDay, SevenDay, ThirtyDay};

const fn challenge(
    id: &'static str,
    name: &'static str,
    details: &'static str,
    kind: ChallengeKind,
    difficulty: ChallengeDifficulty,
    xp: u32,
) -> ChallengeDefinition {
    ChallengeDefinition {
        id,
        name,
        details,
        kind,
        duration_days: kind.duration_days(),
        difficulty,
        xp,
    }
}

/// Every challenge users can join, in display order
pub static CHALLENGES: [ChallengeDefinition; 15] = [
    challenge("1", "7-Day Push-up Power", "Do push-ups daily for a week.", SevenDay, Easy, 50),
    challenge("2", "7-Day Morning Stretch", "Start your day with stretches for 7 days.", SevenDay, Easy, 50),
    challenge("3", "7-Day Hydration Boost", "Drink enough water daily for a week.", SevenDay, Easy, 50),
    challenge("4", "7-Day Step Goal", "Hit your step goal every day for a week.", SevenDay, Medium, 75),
    challenge("5", "7-Day Sugar-Free", "Go sugar-free for a week.", SevenDay, Hard, 100),
    challenge("6", "14-Day Core Strength", "Build core strength over 14 days.", FourteenDay, Medium, 150),
    challenge("7", "14-Day Cardio Blast", "Improve cardio with daily sessions.", FourteenDay, Medium, 150),
    challenge("8", "14-Day Sleep Reset", "Reset your sleep routine in 14 days.", FourteenDay, Easy, 100),
    challenge("9", "14-Day Mindfulness", "Practice mindfulness daily.", FourteenDay, Easy, 100),
    challenge("10", "14-Day Veggie Boost", "Eat more veggies for 14 days.", FourteenDay, Medium, 150),
    challenge("11", "30-Day Full Body Fitness", "A month of full-body workouts.", ThirtyDay, Hard, 300),
    challenge("12", "30-Day Yoga Journey", "Daily yoga for a month.", ThirtyDay, Medium, 250),
    challenge("13", "30-Day Running Challenge", "Run regularly for 30 days.", ThirtyDay, Hard, 300),
    challenge("14", "30-Day Strength Builder", "Build strength over a month.", ThirtyDay, Hard, 300),
    challenge("15", "30-Day Healthy Eating", "Eat healthy for 30 days.", ThirtyDay, Medium, 250),
];

/// Look up a catalog challenge by id
#[must_use]
pub fn find_challenge(id: &str) -> Option<&'static ChallengeDefinition> {
    CHALLENGES.iter().find(|challenge| challenge.id == id)
}

/// Experience granted for completing `id`, with a fallback for ids no longer in the catalog
#[must_use]
pub fn challenge_xp(id: &str) -> u32 {
    find_challenge(id).map_or(DEFAULT_CHALLENGE_XP, |challenge| challenge.xp)
}

/// Day keys for a challenge started at `start`, all marked not done
#[must_use]
pub fn build_progress_map(start: DateTime<Utc>, duration_days: u32) -> BTreeMap<String, bool> {
    (0..duration_days)
        .map(|offset| {
            let day = start + Duration::days(i64::from(offset));
            (day.format(DAY_FORMAT).to_string(), false)
        })
        .collect()
}

/// Whether every day in a non-empty progress map is done
#[must_use]
pub fn is_fully_completed(progress: &BTreeMap<String, bool>) -> bool {
    !progress.is_empty() && progress.values().all(|done| *done)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_ids_are_unique_and_sequential() {
        for (position, challenge) in CHALLENGES.iter().enumerate() {
            assert_eq!(challenge.id, (position + 1).to_string());
        }
    }

    #[test]
    fn test_durations_follow_kind() {
        assert_eq!(find_challenge("1").unwrap().duration_days, 7);
        assert_eq!(find_challenge("6").unwrap().duration_days, 14);
        assert_eq!(find_challenge("15").unwrap().duration_days, 30);
        assert!(find_challenge("16").is_none());
    }

    #[test]
    fn test_unknown_challenge_uses_default_xp() {
        assert_eq!(challenge_xp("11"), 300);
        assert_eq!(challenge_xp("retired"), DEFAULT_CHALLENGE_XP);
    }

    #[test]
    fn test_progress_map_spans_month_boundary() {
        let start = DateTime::parse_from_rfc3339("2025-01-28T23:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let progress = build_progress_map(start, 7);
        let keys: Vec<&str> = progress.keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            [
                "2025-01-28",
                "2025-01-29",
                "2025-01-30",
                "2025-01-31",
                "2025-02-01",
                "2025-02-02",
                "2025-02-03"
            ]
        );
        assert!(!is_fully_completed(&progress));
    }

    #[test]
    fn test_completion_requires_every_day() {
        let mut progress = build_progress_map(Utc::now(), 2);
        let days: Vec<String> = progress.keys().cloned().collect();
        progress.insert(days[0].clone(), true);
        assert!(!is_fully_completed(&progress));
        progress.insert(days[1].clone(), true);
        assert!(is_fully_completed(&progress));
        assert!(!is_fully_completed(&BTreeMap::new()));
    }

    #[test]
    fn test_challenge_serializes_client_shape() {
        let json = serde_json::to_value(find_challenge("4").unwrap()).unwrap();
        assert_eq!(json["type"], "7-Day");
        assert_eq!(json["duration"], 7);
        assert_eq!(json["lvl"], "Medium");
        assert_eq!(json["xp"], 75);
    }
}
