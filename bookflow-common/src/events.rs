//! Event types for the Bookflow event system
//!
//! Provides the shared event definitions and EventBus consumed by the
//! presentation layer (progress bar, diagnostics, auto-advance timers).
//! The engine emits events unconditionally; no subscriber is required.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use uuid::Uuid;

/// Bookflow event types
///
/// Events are broadcast via EventBus and can be serialized for transmission
/// to a UI layer. Stage names are carried as their canonical kebab-case
/// strings so this crate does not depend on the engine's stage enum.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum BookflowEvent {
    /// A session identity was assigned (contact info first persisted)
    SessionStarted {
        /// Session identifier used for all subsequent partial saves
        session_id: Uuid,
        /// When the session was created
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// The workflow moved to a new stage (forward or backward)
    StageChanged {
        /// Stage before the transition
        old_stage: String,
        /// Stage after the transition
        new_stage: String,
        /// Completion percentage for the new stage (0.0 - 100.0)
        progress: f64,
        /// When the transition was committed
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// A best-effort partial save failed
    ///
    /// Diagnostic only: the transition that triggered the save has already
    /// been committed and navigation continues.
    PersistenceWarning {
        /// Stage whose captured fields failed to save
        stage: String,
        /// Failure description from the persistence client
        detail: String,
        /// When the failure was observed
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// The canonical submission payload was assembled at the results stage
    SubmissionReady {
        /// Session the payload belongs to (None if no contact was persisted)
        session_id: Option<Uuid>,
        /// Number of reconciled genres in the payload
        genre_count: usize,
        /// When the payload was built
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// The user explicitly restarted; the old profile was destroyed
    SessionReset {
        /// When the reset happened
        timestamp: chrono::DateTime<chrono::Utc>,
    },
}

/// Central event distribution bus
///
/// Wraps tokio::broadcast, providing:
/// - Non-blocking publish (slow subscribers don't block the engine)
/// - Multiple concurrent subscribers
/// - Automatic cleanup when subscribers drop
#[derive(Clone)]
pub struct EventBus {
    tx: broadcast::Sender<BookflowEvent>,
    capacity: usize,
}

impl EventBus {
    /// Creates a new EventBus with the specified channel capacity
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx, capacity }
    }

    /// Creates an EventBus sized from the engine configuration
    ///
    /// Hosts that load an [`EngineConfig`](crate::EngineConfig) should build
    /// the bus through this so the `event_capacity` key takes effect.
    pub fn from_config(config: &crate::EngineConfig) -> Self {
        Self::new(config.event_capacity)
    }

    /// Subscribe to all future events
    ///
    /// Events emitted before subscription are not received.
    pub fn subscribe(&self) -> broadcast::Receiver<BookflowEvent> {
        self.tx.subscribe()
    }

    /// Emit an event, returning the subscriber count on success
    pub fn emit(
        &self,
        event: BookflowEvent,
    ) -> std::result::Result<usize, broadcast::error::SendError<BookflowEvent>> {
        self.tx.send(event)
    }

    /// Emit an event, ignoring the no-subscribers error
    ///
    /// The engine uses this for all emissions: events are advisory and the
    /// workflow must work identically with zero subscribers attached.
    pub fn emit_lossy(&self, event: BookflowEvent) {
        let _ = self.tx.send(event);
    }

    /// Configured channel capacity
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Current number of active subscribers
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(100)
    }
}
