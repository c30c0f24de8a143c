//! Integration tests: whole-branch walks of the questionnaire engine
//! against fake persistence and recommendation clients.

use async_trait::async_trait;
use bookflow_common::events::{BookflowEvent, EventBus};
use bookflow_common::{EngineConfig, Error, Result};
use bookflow_engine::models::{ContactSnapshot, ProfileSlice};
use bookflow_engine::services::{
    spawn_persist_worker, BookItem, PersistenceClient, RecommendationClient, RecommendationPlan,
};
use bookflow_engine::{ReactionResponse, ReadingSignal, Stage, SubmissionPayload, WorkflowEngine};
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

/// Records every call with the field values current at enqueue time
#[derive(Default)]
struct RecordingPersistence {
    calls: Mutex<Vec<(String, serde_json::Value)>>,
}

#[async_trait]
impl PersistenceClient for RecordingPersistence {
    async fn create_session(&self, session_id: Uuid, contact: ContactSnapshot) -> Result<()> {
        self.calls.lock().await.push((
            "create_session".to_string(),
            serde_json::json!({ "session_id": session_id, "email": contact.email }),
        ));
        Ok(())
    }

    async fn save(&self, _session_id: Uuid, fields: ProfileSlice) -> Result<()> {
        self.calls
            .lock()
            .await
            .push(("save".to_string(), serde_json::Value::Object(fields)));
        Ok(())
    }
}

/// Rejects every call, simulating an unreachable store
struct UnreachablePersistence;

#[async_trait]
impl PersistenceClient for UnreachablePersistence {
    async fn create_session(&self, _session_id: Uuid, _contact: ContactSnapshot) -> Result<()> {
        Err(Error::Persistence("connection refused".into()))
    }

    async fn save(&self, _session_id: Uuid, _fields: ProfileSlice) -> Result<()> {
        Err(Error::Persistence("connection refused".into()))
    }
}

/// Returns a canned plan and records the payload it was handed
#[derive(Default)]
struct FakeRecommendation {
    last_payload: Mutex<Option<SubmissionPayload>>,
}

#[async_trait]
impl RecommendationClient for FakeRecommendation {
    async fn request_plan(&self, payload: &SubmissionPayload) -> Result<RecommendationPlan> {
        *self.last_payload.lock().await = Some(payload.clone());
        Ok(RecommendationPlan {
            current: vec![BookItem {
                id: "b1".into(),
                title: "The Hobbit".into(),
                author: Some("J.R.R. Tolkien".into()),
            }],
            ..Default::default()
        })
    }
}

fn engine_with(
    client: Arc<dyn PersistenceClient>,
) -> (WorkflowEngine, EventBus, tokio::task::JoinHandle<()>) {
    let config = EngineConfig::default();
    let bus = EventBus::from_config(&config);
    let (persist, worker) = spawn_persist_worker(client, bus.clone());
    let engine = WorkflowEngine::new(config, bus.clone(), persist);
    (engine, bus, worker)
}

/// Drive the engine through the shared identity stages
fn complete_identity(engine: &mut WorkflowEngine, name: &str, age: Option<u8>) {
    assert_eq!(engine.advance().unwrap(), Stage::Consent);
    engine.set_parent_email(Some("parent@example.com".to_string()));
    assert_eq!(engine.advance().unwrap(), Stage::IdentifyName);
    engine.set_name(name.to_string());
    assert_eq!(engine.advance().unwrap(), Stage::IdentifyAge);
    engine.set_age(age);
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

#[tokio::test]
async fn nine_year_old_walks_the_young_branch_to_results() {
    let (mut engine, _bus, _worker) = engine_with(Arc::new(RecordingPersistence::default()));

    complete_identity(&mut engine, "Ada", Some(9));
    assert_eq!(engine.advance().unwrap(), Stage::GenreSelectionYoung);

    // Two picks are rejected and the stage does not move
    engine.set_young_genre_picks(strings(&["Adventure", "Fantasy"]));
    assert!(engine.advance().is_err());
    assert_eq!(engine.stage(), Stage::GenreSelectionYoung);

    engine.set_young_genre_picks(strings(&["Adventure", "Fantasy", "Mystery"]));
    assert_eq!(engine.advance().unwrap(), Stage::GenreSelectionExtraYoung);
    engine.set_young_additional_genres(strings(&["Comedy"]));
    assert_eq!(engine.advance().unwrap(), Stage::SeriesReactions);

    engine.set_visible_series(strings(&["series-1"]));
    engine.upsert_reaction("series-1", true, Some(ReactionResponse::Love));
    assert_eq!(engine.advance().unwrap(), Stage::Results);

    let payload = engine.submission().expect("payload built at results");
    assert_eq!(
        payload.genres,
        strings(&["Adventure", "Fantasy", "Mystery", "Comedy"])
    );
    assert_eq!(payload.session_id, engine.profile().session_id);
    assert_eq!(engine.progress(), 100.0);
}

#[tokio::test]
async fn twelve_year_old_walks_the_full_genre_ladder() {
    let (mut engine, _bus, _worker) = engine_with(Arc::new(RecordingPersistence::default()));

    complete_identity(&mut engine, "Sam", Some(12));
    assert_eq!(engine.advance().unwrap(), Stage::GenreSelectionFiction);
    engine.set_fiction_genre_picks(strings(&["Horror"]));
    assert_eq!(engine.advance().unwrap(), Stage::GenreSelectionFictionExtra);
    // Extra stages accept zero selections
    assert_eq!(engine.advance().unwrap(), Stage::GenreSelectionNonfiction);
    engine.set_nonfiction_genres(strings(&["History"]));
    assert_eq!(engine.advance().unwrap(), Stage::GenreSelectionExtra);
    engine.set_extra_genres(strings(&["Poetry"]));
    assert_eq!(engine.advance().unwrap(), Stage::FictionRatio);
    engine.set_fiction_ratio(Some(70));
    assert_eq!(engine.advance().unwrap(), Stage::SeriesReactions);

    engine.set_visible_series(vec![]);
    assert_eq!(engine.advance().unwrap(), Stage::Results);

    let payload = engine.submission().unwrap();
    assert_eq!(payload.genres, strings(&["Horror", "History", "Poetry"]));
    assert_eq!(payload.fiction_ratio, Some(70));
}

#[tokio::test]
async fn unknown_age_navigates_the_older_branch() {
    let (mut engine, _bus, _worker) = engine_with(Arc::new(RecordingPersistence::default()));

    complete_identity(&mut engine, "Kit", None);
    assert_eq!(engine.advance().unwrap(), Stage::GenreSelectionFiction);
    // Backward navigation works without an age as well
    assert_eq!(engine.retreat(), Stage::IdentifyAge);
}

#[tokio::test]
async fn progress_is_monotone_across_a_whole_walk() {
    let (mut engine, _bus, _worker) = engine_with(Arc::new(RecordingPersistence::default()));

    let mut last = engine.progress();
    complete_identity(&mut engine, "Mia", Some(4));
    let check = |engine: &WorkflowEngine, last: &mut f64| {
        let p = engine.progress();
        assert!(p >= *last, "progress regressed at {:?}", engine.stage());
        *last = p;
    };
    check(&engine, &mut last);

    engine.advance().unwrap(); // -> parent-reading-habit
    check(&engine, &mut last);
    engine.advance().unwrap(); // -> interests-young
    check(&engine, &mut last);
    engine.set_young_interests(strings(&["Animals"]));
    engine.advance().unwrap(); // -> series-reactions
    check(&engine, &mut last);
    engine.set_visible_series(vec![]);
    engine.advance().unwrap(); // -> results
    assert_eq!(engine.progress(), 100.0);
}

#[tokio::test]
async fn unreachable_store_never_blocks_the_workflow() {
    let (mut engine, bus, _worker) = engine_with(Arc::new(UnreachablePersistence));
    let mut rx = bus.subscribe();

    complete_identity(&mut engine, "Ada", Some(4));
    engine.advance().unwrap();
    engine.advance().unwrap();
    engine.set_young_interests(strings(&["Space"]));
    engine.advance().unwrap();
    engine.set_visible_series(vec![]);
    assert_eq!(engine.advance().unwrap(), Stage::Results);
    assert!(engine.submission().is_some());

    // At least one warning is broadcast for the failed saves
    loop {
        match rx.recv().await.expect("bus open") {
            BookflowEvent::PersistenceWarning { .. } => break,
            _ => continue,
        }
    }
    assert!(engine.persistence_degraded());
}

#[tokio::test]
async fn partial_saves_arrive_in_stage_order_with_enqueue_time_values() {
    let client = Arc::new(RecordingPersistence::default());
    let (mut engine, _bus, worker) = engine_with(client.clone());

    complete_identity(&mut engine, "Ada", Some(9));
    engine.advance().unwrap(); // persists age slice
    engine.set_young_genre_picks(strings(&["Adventure", "Fantasy", "Mystery"]));
    engine.advance().unwrap(); // persists young picks

    // Mutating the profile after enqueue must not affect queued snapshots
    engine.set_name("Grace".to_string());

    drop(engine); // closes the queue once all jobs are in
    worker.await.unwrap();

    let calls = client.calls.lock().await;
    let kinds: Vec<&str> = calls.iter().map(|(kind, _)| kind.as_str()).collect();
    assert_eq!(
        kinds,
        vec!["create_session", "save", "save", "save", "save"]
    );

    // consent slice, then name, age, young picks, in stage order
    assert_eq!(calls[1].1["parent_email"], serde_json::json!("parent@example.com"));
    assert_eq!(calls[2].1["name"], serde_json::json!("Ada"), "snapshot, not reference");
    assert_eq!(calls[3].1["age"], serde_json::json!(9));
    assert_eq!(
        calls[4].1["young_genre_picks"],
        serde_json::json!(["Adventure", "Fantasy", "Mystery"])
    );
}

#[tokio::test]
async fn reset_produces_a_brand_new_session_identity() {
    let (mut engine, _bus, _worker) = engine_with(Arc::new(RecordingPersistence::default()));

    engine.advance().unwrap();
    engine.set_parent_phone(Some("5551234567".to_string()));
    engine.advance().unwrap();
    let first = engine.profile().session_id.unwrap();

    engine.reset();
    assert!(engine.profile().session_id.is_none());

    engine.advance().unwrap();
    engine.set_parent_phone(Some("5551234567".to_string()));
    engine.advance().unwrap();
    let second = engine.profile().session_id.unwrap();
    assert_ne!(first, second);
}

#[tokio::test]
async fn reactions_gate_the_auto_advance_timer() {
    let (mut engine, _bus, _worker) = engine_with(Arc::new(RecordingPersistence::default()));

    engine.set_visible_series(strings(&["s1", "s2"]));

    // Nothing read: new reader, timer gated
    engine.upsert_reaction("s1", false, None);
    engine.upsert_reaction("s2", false, None);
    assert_eq!(engine.reading_signal(), ReadingSignal::NewReader);
    assert!(engine.auto_advance_after().is_some());

    // Everything read negatively: mismatched taste, timer gated
    engine.upsert_reaction("s1", true, Some(ReactionResponse::Disliked));
    engine.upsert_reaction("s2", true, Some(ReactionResponse::StopReading));
    assert_eq!(engine.reading_signal(), ReadingSignal::MismatchedTaste);
    assert!(engine.auto_advance_after().is_some());

    // One positive read: mixed, explicit action required
    engine.upsert_reaction("s2", true, Some(ReactionResponse::Love));
    assert_eq!(engine.reading_signal(), ReadingSignal::Mixed);
    assert!(engine.auto_advance_after().is_none());
}

#[tokio::test]
async fn stage_changed_events_carry_the_new_progress() {
    let (mut engine, bus, _worker) = engine_with(Arc::new(RecordingPersistence::default()));
    let mut rx = bus.subscribe();

    engine.set_age(Some(9));
    engine.advance().unwrap();

    match rx.recv().await.unwrap() {
        BookflowEvent::StageChanged {
            old_stage,
            new_stage,
            progress,
            ..
        } => {
            assert_eq!(old_stage, "start");
            assert_eq!(new_stage, "consent");
            assert!((progress - engine.progress()).abs() < f64::EPSILON);
        }
        other => panic!("expected StageChanged, got {:?}", other),
    }
}

#[tokio::test]
async fn plan_request_hands_over_the_canonical_payload() {
    let (mut engine, _bus, _worker) = engine_with(Arc::new(RecordingPersistence::default()));

    complete_identity(&mut engine, "Sam", Some(12));
    engine.advance().unwrap();
    engine.set_fiction_genre_picks(strings(&["Horror"]));
    engine.advance().unwrap();
    engine.advance().unwrap();
    engine.advance().unwrap();
    engine.advance().unwrap();
    engine.set_fiction_ratio(Some(50));
    engine.advance().unwrap();
    engine.set_visible_series(vec![]);
    engine.advance().unwrap();

    let reco = FakeRecommendation::default();
    let plan = engine.request_plan(&reco).await.unwrap();
    assert_eq!(plan.current.len(), 1);

    let seen = reco.last_payload.lock().await;
    assert_eq!(seen.as_ref().unwrap().genres, strings(&["Horror"]));
}

#[tokio::test]
async fn retreat_inverts_the_branch_merge_by_age() {
    let (mut engine, _bus, _worker) = engine_with(Arc::new(RecordingPersistence::default()));

    complete_identity(&mut engine, "Mia", Some(4));
    engine.advance().unwrap(); // -> parent-reading-habit
    engine.advance().unwrap(); // -> interests-young
    engine.advance().unwrap(); // -> series-reactions
    assert_eq!(engine.stage(), Stage::SeriesReactions);

    assert_eq!(engine.retreat(), Stage::InterestsYoung);
    assert_eq!(engine.retreat(), Stage::ParentReadingHabit);
    assert_eq!(engine.retreat(), Stage::IdentifyAge);
}
