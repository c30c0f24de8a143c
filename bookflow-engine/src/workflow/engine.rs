//! Workflow engine: one profile, one active stage
//!
//! Owns the profile aggregate exclusively for the lifetime of a session
//! and wraps the pure transition resolver with validation, best-effort
//! persistence, and event emission. The engine is passed explicitly to
//! its callers; there is no ambient/global session lookup.

use crate::models::{
    ParentReadingHabit, Profile, ReactionResponse, ReadingSignal, Stage, SubmissionPayload,
};
use crate::services::{PersistJob, PersistQueueHandle, RecommendationClient, RecommendationPlan};
use crate::validators;
use crate::workflow::progress::progress_percent;
use crate::workflow::transitions::{next_stage, previous_stage};
use bookflow_common::events::{BookflowEvent, EventBus};
use bookflow_common::{EngineConfig, Error, Result};
use std::time::Duration;
use uuid::Uuid;

/// Adaptive questionnaire engine for one user session
pub struct WorkflowEngine {
    config: EngineConfig,
    event_bus: EventBus,
    persist: PersistQueueHandle,
    stage: Stage,
    profile: Profile,
    /// Series items currently shown on the reactions stage, supplied by the
    /// presentation layer
    visible_series: Vec<String>,
    /// Built once on arrival at results, immutable thereafter
    submission: Option<SubmissionPayload>,
}

impl WorkflowEngine {
    /// Create an engine with an empty profile at the start stage
    pub fn new(config: EngineConfig, event_bus: EventBus, persist: PersistQueueHandle) -> Self {
        Self {
            config,
            event_bus,
            persist,
            stage: Stage::Start,
            profile: Profile::new(),
            visible_series: Vec::new(),
            submission: None,
        }
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    /// Completion percentage for the current stage and age
    pub fn progress(&self) -> f64 {
        progress_percent(self.stage, self.profile.age)
    }

    /// The canonical payload, present once the workflow reached results
    pub fn submission(&self) -> Option<&SubmissionPayload> {
        self.submission.as_ref()
    }

    /// Whether any persistence call failed this session (diagnostic only)
    pub fn persistence_degraded(&self) -> bool {
        self.persist.is_degraded()
    }

    /// Classify the reaction set over the currently visible items
    pub fn reading_signal(&self) -> ReadingSignal {
        self.profile.reactions.classify(&self.visible_series)
    }

    /// Auto-advance delay for the encouragement narrative, if any
    pub fn auto_advance_after(&self) -> Option<Duration> {
        self.reading_signal().auto_advance_after(&self.config)
    }

    // ------------------------------------------------------------------
    // Typed mutators (total-replace semantics)
    // ------------------------------------------------------------------

    pub fn set_name(&mut self, name: String) {
        self.profile.name = name;
    }

    pub fn set_age(&mut self, age: Option<u8>) {
        self.profile.age = age;
    }

    pub fn set_parent_email(&mut self, email: Option<String>) {
        self.profile.parent_email = email;
    }

    pub fn set_parent_phone(&mut self, phone: Option<String>) {
        self.profile.parent_phone = phone;
    }

    pub fn set_parent_reading_habit(&mut self, habit: Option<ParentReadingHabit>) {
        self.profile.parent_reading_habit = habit;
    }

    pub fn set_young_genre_picks(&mut self, picks: Vec<String>) {
        self.profile.young_genre_picks = picks;
    }

    pub fn set_young_additional_genres(&mut self, genres: Vec<String>) {
        self.profile.young_additional_genres = genres;
    }

    pub fn set_young_interests(&mut self, interests: Vec<String>) {
        self.profile.young_interests = interests;
    }

    pub fn set_fiction_genre_picks(&mut self, picks: Vec<String>) {
        self.profile.fiction_genre_picks = picks;
    }

    pub fn set_fiction_extra_genres(&mut self, genres: Vec<String>) {
        self.profile.fiction_extra_genres = genres;
    }

    pub fn set_nonfiction_genres(&mut self, genres: Vec<String>) {
        self.profile.nonfiction_genres = genres;
    }

    pub fn set_nonfiction_interests(&mut self, interests: Vec<String>) {
        self.profile.nonfiction_interests = interests;
    }

    pub fn set_extra_genres(&mut self, genres: Vec<String>) {
        self.profile.extra_genres = genres;
    }

    pub fn set_fiction_ratio(&mut self, ratio: Option<u8>) {
        self.profile.fiction_ratio = ratio;
    }

    /// Replace the list of series items shown on the reactions stage
    pub fn set_visible_series(&mut self, items: Vec<String>) {
        self.visible_series = items;
    }

    /// Record or update one series reaction
    pub fn upsert_reaction(
        &mut self,
        item_id: &str,
        has_read: bool,
        response: Option<ReactionResponse>,
    ) {
        self.profile.reactions.upsert(item_id, has_read, response);
    }

    // ------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------

    /// Validate, persist best-effort, and commit the forward transition
    ///
    /// On validation failure the stage does not change and the error is
    /// returned for display. Persistence is fire-and-forget: the slice is
    /// snapshotted here, queued in stage order, and its outcome never
    /// blocks the transition.
    pub fn advance(&mut self) -> Result<Stage> {
        validators::validate_stage(self.stage, &self.profile, &self.visible_series, &self.config)?;

        // Leaving consent assigns the session identity exactly once
        if self.stage == Stage::Consent && self.profile.session_id.is_none() {
            let session_id = Uuid::new_v4();
            self.profile.session_id = Some(session_id);
            self.persist.enqueue(PersistJob::CreateSession {
                session_id,
                contact: self.profile.contact(),
            });
            self.event_bus.emit_lossy(BookflowEvent::SessionStarted {
                session_id,
                timestamp: chrono::Utc::now(),
            });
            tracing::info!(%session_id, "session created");
        }

        if let Some(session_id) = self.profile.session_id {
            let fields = self.profile.capture(self.stage.captured_fields());
            if !fields.is_empty() {
                self.persist.enqueue(PersistJob::Save {
                    session_id,
                    stage: self.stage,
                    fields,
                });
            }
        }

        let old = self.stage;
        let new = next_stage(old, self.profile.age);
        self.commit(old, new);

        if new == Stage::Results && self.submission.is_none() {
            let payload = SubmissionPayload::from_profile(&self.profile);
            self.event_bus.emit_lossy(BookflowEvent::SubmissionReady {
                session_id: payload.session_id,
                genre_count: payload.genres.len(),
                timestamp: chrono::Utc::now(),
            });
            tracing::info!(
                genres = payload.genres.len(),
                reactions = payload.reactions.len(),
                "submission payload assembled"
            );
            self.submission = Some(payload);
        }

        Ok(new)
    }

    /// Commit the backward transition: no validation, no persistence
    pub fn retreat(&mut self) -> Stage {
        let old = self.stage;
        let new = previous_stage(old, self.profile.age);
        self.commit(old, new);
        new
    }

    /// Destroy the profile and return to start
    ///
    /// The old session identity is gone for good; a fresh one is assigned
    /// the next time consent is completed.
    pub fn reset(&mut self) {
        self.profile = Profile::new();
        self.visible_series.clear();
        self.submission = None;
        self.stage = Stage::Start;
        self.event_bus.emit_lossy(BookflowEvent::SessionReset {
            timestamp: chrono::Utc::now(),
        });
        tracing::info!("session reset");
    }

    /// Request the personalized plan for the assembled submission
    ///
    /// Only callable at results; retry on failure is the caller's choice.
    pub async fn request_plan(
        &self,
        client: &dyn RecommendationClient,
    ) -> Result<RecommendationPlan> {
        let payload = self.submission.as_ref().ok_or_else(|| {
            Error::Internal("no submission payload; the workflow has not reached results".into())
        })?;
        client.request_plan(payload).await
    }

    fn commit(&mut self, old: Stage, new: Stage) {
        if old == new {
            return;
        }
        self.stage = new;
        let progress = self.progress();
        tracing::debug!(from = %old, to = %new, progress, "stage transition");
        self.event_bus.emit_lossy(BookflowEvent::StageChanged {
            old_stage: old.as_str().to_string(),
            new_stage: new.as_str().to_string(),
            progress,
            timestamp: chrono::Utc::now(),
        });
    }
}
