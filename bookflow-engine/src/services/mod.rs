//! External collaborators and the persistence queue

mod persist_queue;
mod persistence;
mod recommendation;

pub use persist_queue::{spawn_persist_worker, PersistJob, PersistQueueHandle};
pub use persistence::{NullPersistenceClient, PersistenceClient};
pub use recommendation::{BookItem, MonthlyPlan, RecommendationClient, RecommendationPlan};
