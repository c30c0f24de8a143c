//! Reader profile accumulated over one questionnaire session
//!
//! The profile is a single mutable aggregate owned exclusively by the
//! workflow engine for the lifetime of one session. It is append/overwrite
//! only until an explicit reset destroys it.

use crate::models::reaction::ReactionSet;
use crate::models::stage::ProfileField;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// How often a parent reads with the child (captured for ages 7 and under)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ParentReadingHabit {
    Daily,
    SeveralTimesAWeek,
    Occasionally,
    Rarely,
}

/// Contact info snapshot passed to session creation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactSnapshot {
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// Partial-save slice: the captured field values of one stage, keyed by
/// their stable field names and snapshotted at capture time
pub type ProfileSlice = serde_json::Map<String, serde_json::Value>;

/// The accumulated answer set for one session
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Profile {
    /// Assigned once contact info is first persisted; never reassigned
    /// within a session
    pub session_id: Option<Uuid>,

    /// Reader name
    pub name: String,

    /// Reader age (4-18); unset age routes branching to the 11+ default
    pub age: Option<u8>,

    /// Parent contact, at least one required before leaving consent
    pub parent_email: Option<String>,
    pub parent_phone: Option<String>,

    /// Branch answer for ages 7 and under
    pub parent_reading_habit: Option<ParentReadingHabit>,

    /// Exactly three picks on the 6-10 branch
    pub young_genre_picks: Vec<String>,
    /// Optional additional genres on the 6-10 branch
    pub young_additional_genres: Vec<String>,
    /// Interest picks on the 5-and-under branch
    pub young_interests: Vec<String>,

    /// One-to-three picks on the 11+ branch
    pub fiction_genre_picks: Vec<String>,
    /// Optional additional fiction genres on the 11+ branch
    pub fiction_extra_genres: Vec<String>,
    /// Nonfiction genres on the 11+ branch
    pub nonfiction_genres: Vec<String>,
    /// Nonfiction interests (legacy stage, still reconciled when present)
    pub nonfiction_interests: Vec<String>,
    /// Catch-all genres on the 11+ branch
    pub extra_genres: Vec<String>,

    /// Fiction/nonfiction balance, 0-100
    pub fiction_ratio: Option<u8>,

    /// Per-series reactions, insertion order preserved
    pub reactions: ReactionSet,
}

impl Profile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Contact info snapshot for session creation
    pub fn contact(&self) -> ContactSnapshot {
        ContactSnapshot {
            email: self.parent_email.clone(),
            phone: self.parent_phone.clone(),
        }
    }

    /// Snapshot the given fields into a partial-save slice
    ///
    /// Values are cloned at call time so a queued save can never observe a
    /// later mutation of the profile.
    pub fn capture(&self, fields: &[ProfileField]) -> ProfileSlice {
        let mut slice = ProfileSlice::new();
        for field in fields {
            slice.insert(field.key().to_string(), self.field_value(*field));
        }
        slice
    }

    fn field_value(&self, field: ProfileField) -> serde_json::Value {
        use serde_json::json;
        match field {
            ProfileField::Name => json!(self.name),
            ProfileField::Age => json!(self.age),
            ProfileField::ParentEmail => json!(self.parent_email),
            ProfileField::ParentPhone => json!(self.parent_phone),
            ProfileField::ParentReadingHabit => json!(self.parent_reading_habit),
            ProfileField::YoungGenrePicks => json!(self.young_genre_picks),
            ProfileField::YoungAdditionalGenres => json!(self.young_additional_genres),
            ProfileField::YoungInterests => json!(self.young_interests),
            ProfileField::FictionGenrePicks => json!(self.fiction_genre_picks),
            ProfileField::FictionExtraGenres => json!(self.fiction_extra_genres),
            ProfileField::NonfictionGenres => json!(self.nonfiction_genres),
            ProfileField::NonfictionInterests => json!(self.nonfiction_interests),
            ProfileField::ExtraGenres => json!(self.extra_genres),
            ProfileField::FictionRatio => json!(self.fiction_ratio),
            ProfileField::Reactions => {
                serde_json::to_value(&self.reactions).unwrap_or(serde_json::Value::Null)
            }
        }
    }
}
