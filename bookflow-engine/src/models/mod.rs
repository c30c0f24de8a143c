//! Data model for the questionnaire workflow

mod profile;
mod reaction;
mod stage;
mod submission;

pub use profile::{ContactSnapshot, ParentReadingHabit, Profile, ProfileSlice};
pub use reaction::{ReactionEntry, ReactionResponse, ReactionSet, ReadingSignal};
pub use stage::{ProfileField, Stage};
pub use submission::{canonical_genres, SubmissionPayload};
