//! Bookflow questionnaire engine
//!
//! An in-process library that walks a reader through an adaptive,
//! multi-step questionnaire and folds the branch-specific answers into
//! one canonical profile for a downstream recommendation service.
//!
//! The core pieces:
//! - [`models::Stage`] — the closed stage registry with its canonical order
//! - [`workflow::next_stage`] / [`workflow::previous_stage`] — the pure
//!   age-guarded transition tables
//! - [`workflow::progress_percent`] — completion percentage over the
//!   age-filtered stage subsequence
//! - [`workflow::WorkflowEngine`] — the profile accumulator wrapping the
//!   resolver with validation, fire-and-forget persistence, and events
//! - [`models::ReactionSet`] — per-series reaction upserts and their
//!   downstream classification
//!
//! The engine is single-session and single-threaded by design: all
//! mutations happen in response to discrete user actions, and the only
//! background work is the persistence queue draining partial saves.

pub mod models;
pub mod services;
pub mod validators;
pub mod workflow;

pub use bookflow_common::{EngineConfig, Error, Result};
pub use models::{
    ParentReadingHabit, Profile, ProfileField, ReactionResponse, ReactionSet, ReadingSignal,
    Stage, SubmissionPayload,
};
pub use workflow::WorkflowEngine;
