//! Canonical submission payload
//!
//! Derived, never stored: built once when the workflow arrives at the
//! results stage, immutable thereafter. Reconciles the branch-specific
//! genre and interest fields into the flat lists the recommendation
//! service consumes.

use crate::models::profile::{ParentReadingHabit, Profile};
use crate::models::reaction::ReactionSet;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The reconciled, submission-ready profile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionPayload {
    /// Session the answers were collected under (None if contact was never
    /// persisted, which cannot happen on a validated path)
    pub session_id: Option<Uuid>,
    pub name: String,
    pub age: Option<u8>,
    pub parent_email: Option<String>,
    pub parent_phone: Option<String>,
    pub parent_reading_habit: Option<ParentReadingHabit>,
    /// Flattened genre list reconciled across branches
    pub genres: Vec<String>,
    /// Interest list for the reader's age bracket
    pub interests: Vec<String>,
    pub fiction_ratio: Option<u8>,
    /// Full reaction mapping, insertion order preserved
    pub reactions: ReactionSet,
    /// When the payload was assembled
    pub built_at: chrono::DateTime<chrono::Utc>,
}

impl SubmissionPayload {
    /// Assemble the canonical payload from an accumulated profile
    pub fn from_profile(profile: &Profile) -> Self {
        Self {
            session_id: profile.session_id,
            name: profile.name.clone(),
            age: profile.age,
            parent_email: profile.parent_email.clone(),
            parent_phone: profile.parent_phone.clone(),
            parent_reading_habit: profile.parent_reading_habit,
            genres: canonical_genres(profile),
            interests: bracket_interests(profile),
            fiction_ratio: profile.fiction_ratio,
            reactions: profile.reactions.clone(),
            built_at: chrono::Utc::now(),
        }
    }
}

/// Reconcile branch-specific genre fields into one flat list
///
/// Branch selection by age:
/// - 6-10: young picks plus young additional genres
/// - 11+: fiction picks, fiction extras, nonfiction, and catch-all genres
/// - 5 and under, or unset: young interests (no genres are collected there)
///
/// The result is deduplicated in first-seen order with empty strings
/// dropped. An empty result falls back to the combined interest sets when
/// those are non-empty; that fallback is documented behavior, not an error.
pub fn canonical_genres(profile: &Profile) -> Vec<String> {
    let sources: Vec<&[String]> = match profile.age {
        Some(age) if (6..=10).contains(&age) => vec![
            &profile.young_genre_picks,
            &profile.young_additional_genres,
        ],
        Some(age) if age >= 11 => vec![
            &profile.fiction_genre_picks,
            &profile.fiction_extra_genres,
            &profile.nonfiction_genres,
            &profile.extra_genres,
        ],
        _ => vec![&profile.young_interests],
    };

    let genres = dedupe_non_empty(sources);
    if !genres.is_empty() {
        return genres;
    }

    // Documented fallback: interests stand in when no genres were collected
    let interests = dedupe_non_empty(vec![
        &profile.young_interests,
        &profile.nonfiction_interests,
    ]);
    interests
}

/// Interest list for the reader's age bracket
fn bracket_interests(profile: &Profile) -> Vec<String> {
    let sources: Vec<&[String]> = match profile.age {
        Some(age) if age <= 10 => vec![&profile.young_interests],
        _ => vec![&profile.nonfiction_interests],
    };
    dedupe_non_empty(sources)
}

/// Flatten, drop blank entries, deduplicate preserving first-seen order
fn dedupe_non_empty(sources: Vec<&[String]>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    let mut result = Vec::new();
    for source in sources {
        for value in source {
            if value.trim().is_empty() {
                continue;
            }
            if seen.insert(value.clone()) {
                result.push(value.clone());
            }
        }
    }
    result
}
