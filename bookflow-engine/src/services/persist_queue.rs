//! Fire-and-forget persistence queue
//!
//! Each forward transition enqueues one job carrying the profile slice
//! snapshotted at enqueue time. A single spawned worker owns the
//! persistence client and drains jobs strictly in order, so a later
//! stage's partial save can never overwrite an earlier one with stale
//! data. Failures are logged, flagged, and broadcast as warnings; they
//! never block or reorder stage transitions.

use crate::models::{ContactSnapshot, ProfileSlice, Stage};
use crate::services::persistence::PersistenceClient;
use bookflow_common::events::{BookflowEvent, EventBus};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use uuid::Uuid;

/// One queued persistence action
#[derive(Debug, Clone)]
pub enum PersistJob {
    /// Register the session with its contact snapshot
    CreateSession {
        session_id: Uuid,
        contact: ContactSnapshot,
    },
    /// Upsert one stage's captured fields
    Save {
        session_id: Uuid,
        stage: Stage,
        fields: ProfileSlice,
    },
}

/// Sender half handed to the workflow engine
#[derive(Clone)]
pub struct PersistQueueHandle {
    tx: mpsc::UnboundedSender<PersistJob>,
    degraded: Arc<AtomicBool>,
}

impl PersistQueueHandle {
    /// Enqueue a job without waiting for its outcome
    pub fn enqueue(&self, job: PersistJob) {
        if self.tx.send(job).is_err() {
            // Worker is gone; record the degradation but keep navigating
            tracing::warn!("persistence worker unavailable, dropping partial save");
            self.degraded.store(true, Ordering::Relaxed);
        }
    }

    /// Whether any persistence call has failed this session
    ///
    /// Diagnostic display only; the workflow can complete regardless.
    pub fn is_degraded(&self) -> bool {
        self.degraded.load(Ordering::Relaxed)
    }
}

/// Spawn the drain task for a persistence client
///
/// Returns the engine-side handle plus the worker's join handle. The
/// worker exits once every handle clone has been dropped and the queue is
/// drained, which gives tests a deterministic flush point.
pub fn spawn_persist_worker(
    client: Arc<dyn PersistenceClient>,
    event_bus: EventBus,
) -> (PersistQueueHandle, JoinHandle<()>) {
    let (tx, mut rx) = mpsc::unbounded_channel::<PersistJob>();
    let degraded = Arc::new(AtomicBool::new(false));

    let worker_degraded = Arc::clone(&degraded);
    let worker = tokio::spawn(async move {
        while let Some(job) = rx.recv().await {
            let (stage_name, result) = match job {
                PersistJob::CreateSession { session_id, contact } => (
                    Stage::Consent.as_str(),
                    client.create_session(session_id, contact).await,
                ),
                PersistJob::Save {
                    session_id,
                    stage,
                    fields,
                } => (stage.as_str(), client.save(session_id, fields).await),
            };

            if let Err(e) = result {
                tracing::warn!(stage = stage_name, error = %e, "partial save failed");
                worker_degraded.store(true, Ordering::Relaxed);
                event_bus.emit_lossy(BookflowEvent::PersistenceWarning {
                    stage: stage_name.to_string(),
                    detail: e.to_string(),
                    timestamp: chrono::Utc::now(),
                });
            } else {
                tracing::debug!(stage = stage_name, "partial save acknowledged");
            }
        }
    });

    (PersistQueueHandle { tx, degraded }, worker)
}
