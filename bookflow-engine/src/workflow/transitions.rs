//! Forward/backward stage transition resolver
//!
//! Pure decision tables over (stage, age). Both directions must be called
//! on every navigation action; `previous_stage` is the structural inverse
//! of `next_stage` for every stage reachable on a given age's path.
//!
//! An unset age never blocks navigation: every branch point falls back to
//! the 11+ path.
//!
//! Note the deliberate asymmetry at identify-age: age 7 routes to
//! parent-reading-habit even though the young genre branch nominally covers
//! 6-10. This matches the shipped behavior of the questionnaire and must
//! not be "fixed"; the parent-reading-habit stage then routes 6-7 back onto
//! the young branch.

use crate::models::Stage;

/// Resolve the stage shown after `stage` for the given reader age
pub fn next_stage(stage: Stage, age: Option<u8>) -> Stage {
    match stage {
        Stage::Start => Stage::Consent,
        Stage::Consent => Stage::IdentifyName,
        Stage::IdentifyName => Stage::IdentifyAge,
        Stage::IdentifyAge => match age {
            Some(a) if a <= 7 => Stage::ParentReadingHabit,
            Some(a) if a <= 10 => Stage::GenreSelectionYoung,
            // 11+ and the unknown-age fallback
            _ => Stage::GenreSelectionFiction,
        },
        Stage::ParentReadingHabit => match age {
            Some(a) if a <= 5 => Stage::InterestsYoung,
            Some(a) if a <= 10 => Stage::GenreSelectionYoung,
            _ => Stage::GenreSelectionFiction,
        },
        Stage::GenreSelectionYoung => Stage::GenreSelectionExtraYoung,
        Stage::GenreSelectionExtraYoung => Stage::SeriesReactions,
        Stage::InterestsYoung => Stage::SeriesReactions,
        Stage::GenreSelectionFiction => Stage::GenreSelectionFictionExtra,
        Stage::GenreSelectionFictionExtra => Stage::GenreSelectionNonfiction,
        Stage::GenreSelectionNonfiction => Stage::GenreSelectionExtra,
        // Legacy stage with no inbound edge; defined so the table stays total
        Stage::GenreSelectionNonfictionExtra => Stage::GenreSelectionExtra,
        Stage::GenreSelectionExtra => Stage::FictionRatio,
        Stage::FictionRatio => Stage::SeriesReactions,
        Stage::SeriesReactions => Stage::Results,
        // Terminal: restart happens only through an explicit reset
        Stage::Results => Stage::Results,
    }
}

/// Resolve the stage shown before `stage` for the given reader age
pub fn previous_stage(stage: Stage, age: Option<u8>) -> Stage {
    match stage {
        Stage::Start => Stage::Start,
        Stage::Consent => Stage::Start,
        Stage::IdentifyName => Stage::Consent,
        Stage::IdentifyAge => Stage::IdentifyName,
        Stage::ParentReadingHabit => Stage::IdentifyAge,
        Stage::InterestsYoung => Stage::ParentReadingHabit,
        Stage::GenreSelectionYoung => match age {
            // Ages 6-7 arrived via the parent-reading-habit detour
            Some(a) if a <= 7 => Stage::ParentReadingHabit,
            _ => Stage::IdentifyAge,
        },
        Stage::GenreSelectionExtraYoung => Stage::GenreSelectionYoung,
        Stage::GenreSelectionFiction => Stage::IdentifyAge,
        Stage::GenreSelectionFictionExtra => Stage::GenreSelectionFiction,
        Stage::GenreSelectionNonfiction => Stage::GenreSelectionFictionExtra,
        Stage::GenreSelectionNonfictionExtra => Stage::GenreSelectionNonfiction,
        Stage::GenreSelectionExtra => Stage::GenreSelectionNonfiction,
        Stage::FictionRatio => Stage::GenreSelectionExtra,
        // Multi-way merge inverts to whichever branch terminal the current
        // age implies
        Stage::SeriesReactions => match age {
            Some(a) if a <= 5 => Stage::InterestsYoung,
            Some(a) if a <= 10 => Stage::GenreSelectionExtraYoung,
            _ => Stage::FictionRatio,
        },
        Stage::Results => Stage::SeriesReactions,
    }
}

/// Walk the forward path from start to results for one age
///
/// Used by the progress estimator tests and the integration suite to keep
/// the resolver and estimator in lockstep.
pub fn forward_path(age: Option<u8>) -> Vec<Stage> {
    let mut path = vec![Stage::Start];
    let mut stage = Stage::Start;
    while stage != Stage::Results {
        stage = next_stage(stage, age);
        path.push(stage);
    }
    path
}
