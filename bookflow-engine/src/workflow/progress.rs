//! Completion percentage for a variable-length path
//!
//! The estimator filters the canonical stage order down to the stages that
//! apply to the current reader's age, mirroring the resolver's branch
//! predicates, and reports the current stage's position in that filtered
//! sequence. Display only; it has no control-flow effect.

use crate::models::Stage;

/// Whether a stage appears on the path for the given age
///
/// Must stay in sync with the resolver's branch predicates; the test suite
/// checks the two against each other.
pub fn stage_applies(stage: Stage, age: Option<u8>) -> bool {
    match stage {
        Stage::Start
        | Stage::Consent
        | Stage::IdentifyName
        | Stage::IdentifyAge
        | Stage::SeriesReactions
        | Stage::Results => true,
        Stage::ParentReadingHabit => matches!(age, Some(a) if a <= 7),
        Stage::InterestsYoung => matches!(age, Some(a) if a <= 5),
        Stage::GenreSelectionYoung | Stage::GenreSelectionExtraYoung => {
            matches!(age, Some(a) if (6..=10).contains(&a))
        }
        Stage::GenreSelectionFiction
        | Stage::GenreSelectionFictionExtra
        | Stage::GenreSelectionNonfiction
        | Stage::GenreSelectionExtra
        | Stage::FictionRatio => match age {
            Some(a) => a >= 11,
            // Unknown age walks the 11+ fallback path
            None => true,
        },
        // Not routed into by any forward edge
        Stage::GenreSelectionNonfictionExtra => false,
    }
}

/// The age-filtered subsequence of the canonical stage order
pub fn filtered_stages(age: Option<u8>) -> Vec<Stage> {
    Stage::in_order()
        .iter()
        .copied()
        .filter(|stage| stage_applies(*stage, age))
        .collect()
}

/// Completion percentage in [0, 100] for the given stage and age
///
/// Returns 0.0 when the stage is absent from the filtered sequence; with
/// the resolver and this filter in sync that only happens for stages the
/// current path never visits.
pub fn progress_percent(stage: Stage, age: Option<u8>) -> f64 {
    let stages = filtered_stages(age);
    let Some(index) = stages.iter().position(|s| *s == stage) else {
        return 0.0;
    };
    if stages.len() < 2 {
        return 0.0;
    }
    index as f64 / (stages.len() - 1) as f64 * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflow::transitions::forward_path;

    fn all_ages() -> Vec<Option<u8>> {
        let mut ages: Vec<Option<u8>> = (4..=18).map(Some).collect();
        ages.push(None);
        ages
    }

    #[test]
    fn filtered_sequence_equals_the_walked_path() {
        // The consistency property tying estimator to resolver: the filter
        // over the canonical order reproduces the forward walk exactly.
        for age in all_ages() {
            assert_eq!(filtered_stages(age), forward_path(age), "age {:?}", age);
        }
    }

    #[test]
    fn progress_is_monotone_and_completes_at_results() {
        for age in all_ages() {
            let mut last = -1.0;
            for stage in forward_path(age) {
                let p = progress_percent(stage, age);
                assert!(p > last, "progress regressed at {:?} for age {:?}", stage, age);
                assert!((0.0..=100.0).contains(&p));
                if stage == Stage::Results {
                    assert!((p - 100.0).abs() < f64::EPSILON);
                } else {
                    assert!(p < 100.0, "{:?} reported 100 before results", stage);
                }
                last = p;
            }
        }
    }

    #[test]
    fn start_reports_zero() {
        for age in all_ages() {
            assert_eq!(progress_percent(Stage::Start, age), 0.0);
        }
    }

    #[test]
    fn absent_stage_reports_zero() {
        // Parent-reading-habit never applies to a 12-year-old's path
        assert_eq!(progress_percent(Stage::ParentReadingHabit, Some(12)), 0.0);
        // The young genre stages never apply to the unknown-age fallback
        assert_eq!(progress_percent(Stage::GenreSelectionYoung, None), 0.0);
        // The legacy stage is absent from every path
        for age in all_ages() {
            assert_eq!(progress_percent(Stage::GenreSelectionNonfictionExtra, age), 0.0);
        }
    }

    #[test]
    fn seven_year_old_sees_both_detour_stages_in_the_denominator() {
        let stages = filtered_stages(Some(7));
        assert!(stages.contains(&Stage::ParentReadingHabit));
        assert!(stages.contains(&Stage::GenreSelectionYoung));
        assert_eq!(stages.len(), 9);
    }
}
