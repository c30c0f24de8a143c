//! Shared foundation for the Bookflow questionnaire engine
//!
//! Provides the error taxonomy, event bus, engine configuration, and
//! tracing setup used by `bookflow-engine`.

pub mod config;
pub mod error;
pub mod events;
pub mod logging;

pub use config::EngineConfig;
pub use error::{Error, Result};
