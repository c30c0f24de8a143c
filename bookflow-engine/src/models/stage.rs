//! Stage registry for the questionnaire workflow
//!
//! Stages are immutable identifiers drawn from a fixed, closed enumeration;
//! no instance state belongs to a stage itself. The registry knows the
//! maximal canonical ordering and, per stage, the profile fields the stage
//! is responsible for capturing.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One discrete step in the questionnaire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Stage {
    /// Welcome screen, no data captured
    Start,
    /// Parent contact capture (email and/or phone)
    Consent,
    /// Reader name
    IdentifyName,
    /// Reader age; drives every branch decision after this point
    IdentifyAge,
    /// How often a parent reads with the child (ages 7 and under)
    ParentReadingHabit,
    /// Exactly-three genre picks for ages 6-10
    GenreSelectionYoung,
    /// Nonfiction genres on the 11+ branch
    GenreSelectionNonfiction,
    /// Interest picks for ages 5 and under (no genres on that branch)
    InterestsYoung,
    /// One-to-three fiction picks on the 11+ branch
    GenreSelectionFiction,
    /// Optional additional fiction genres on the 11+ branch
    GenreSelectionFictionExtra,
    /// Optional nonfiction interests (registered but not routed; kept for
    /// saved profiles that still reference it)
    GenreSelectionNonfictionExtra,
    /// Optional catch-all genres on the 11+ branch
    GenreSelectionExtra,
    /// Optional additional genres for ages 6-10
    GenreSelectionExtraYoung,
    /// Fiction/nonfiction balance slider (0-100)
    FictionRatio,
    /// Per-series read/not-read reactions
    SeriesReactions,
    /// Terminal stage; submission payload is assembled on arrival
    Results,
}

/// Profile fields a stage captures, used to slice partial saves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileField {
    Name,
    Age,
    ParentEmail,
    ParentPhone,
    ParentReadingHabit,
    YoungGenrePicks,
    YoungAdditionalGenres,
    YoungInterests,
    FictionGenrePicks,
    FictionExtraGenres,
    NonfictionGenres,
    NonfictionInterests,
    ExtraGenres,
    FictionRatio,
    Reactions,
}

impl ProfileField {
    /// Stable key used when serializing partial-save slices
    pub fn key(&self) -> &'static str {
        match self {
            ProfileField::Name => "name",
            ProfileField::Age => "age",
            ProfileField::ParentEmail => "parent_email",
            ProfileField::ParentPhone => "parent_phone",
            ProfileField::ParentReadingHabit => "parent_reading_habit",
            ProfileField::YoungGenrePicks => "young_genre_picks",
            ProfileField::YoungAdditionalGenres => "young_additional_genres",
            ProfileField::YoungInterests => "young_interests",
            ProfileField::FictionGenrePicks => "fiction_genre_picks",
            ProfileField::FictionExtraGenres => "fiction_extra_genres",
            ProfileField::NonfictionGenres => "nonfiction_genres",
            ProfileField::NonfictionInterests => "nonfiction_interests",
            ProfileField::ExtraGenres => "extra_genres",
            ProfileField::FictionRatio => "fiction_ratio",
            ProfileField::Reactions => "reactions",
        }
    }
}

impl Stage {
    /// Maximal canonical ordering, independent of age
    ///
    /// Listed in traversal order: shared identity stages, the under-6
    /// branch, the 6-10 branch, the 11+ branch, then the shared tail.
    /// Every age-filtered subsequence of this ordering matches the order
    /// the resolver actually visits stages in, which keeps the progress
    /// indicator monotone.
    pub fn in_order() -> &'static [Stage] {
        &[
            Stage::Start,
            Stage::Consent,
            Stage::IdentifyName,
            Stage::IdentifyAge,
            Stage::ParentReadingHabit,
            Stage::InterestsYoung,
            Stage::GenreSelectionYoung,
            Stage::GenreSelectionExtraYoung,
            Stage::GenreSelectionFiction,
            Stage::GenreSelectionFictionExtra,
            Stage::GenreSelectionNonfiction,
            Stage::GenreSelectionNonfictionExtra,
            Stage::GenreSelectionExtra,
            Stage::FictionRatio,
            Stage::SeriesReactions,
            Stage::Results,
        ]
    }

    /// Profile fields this stage is responsible for capturing
    pub fn captured_fields(&self) -> &'static [ProfileField] {
        match self {
            Stage::Start | Stage::Results => &[],
            Stage::Consent => &[ProfileField::ParentEmail, ProfileField::ParentPhone],
            Stage::IdentifyName => &[ProfileField::Name],
            Stage::IdentifyAge => &[ProfileField::Age],
            Stage::ParentReadingHabit => &[ProfileField::ParentReadingHabit],
            Stage::GenreSelectionYoung => &[ProfileField::YoungGenrePicks],
            Stage::GenreSelectionExtraYoung => &[ProfileField::YoungAdditionalGenres],
            Stage::InterestsYoung => &[ProfileField::YoungInterests],
            Stage::GenreSelectionFiction => &[ProfileField::FictionGenrePicks],
            Stage::GenreSelectionFictionExtra => &[ProfileField::FictionExtraGenres],
            Stage::GenreSelectionNonfiction => &[ProfileField::NonfictionGenres],
            Stage::GenreSelectionNonfictionExtra => &[ProfileField::NonfictionInterests],
            Stage::GenreSelectionExtra => &[ProfileField::ExtraGenres],
            Stage::FictionRatio => &[ProfileField::FictionRatio],
            Stage::SeriesReactions => &[ProfileField::Reactions],
        }
    }

    /// Canonical kebab-case name, matching the serde representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Start => "start",
            Stage::Consent => "consent",
            Stage::IdentifyName => "identify-name",
            Stage::IdentifyAge => "identify-age",
            Stage::ParentReadingHabit => "parent-reading-habit",
            Stage::GenreSelectionYoung => "genre-selection-young",
            Stage::GenreSelectionNonfiction => "genre-selection-nonfiction",
            Stage::InterestsYoung => "interests-young",
            Stage::GenreSelectionFiction => "genre-selection-fiction",
            Stage::GenreSelectionFictionExtra => "genre-selection-fiction-extra",
            Stage::GenreSelectionNonfictionExtra => "genre-selection-nonfiction-extra",
            Stage::GenreSelectionExtra => "genre-selection-extra",
            Stage::GenreSelectionExtraYoung => "genre-selection-extra-young",
            Stage::FictionRatio => "fiction-ratio",
            Stage::SeriesReactions => "series-reactions",
            Stage::Results => "results",
        }
    }

    /// Whether this is the terminal stage (restart only via explicit reset)
    pub fn is_terminal(&self) -> bool {
        matches!(self, Stage::Results)
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
