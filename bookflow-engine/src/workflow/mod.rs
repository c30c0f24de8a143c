//! Workflow engine: transition resolver, progress estimator, and the
//! stateful engine wrapping them

mod engine;
pub mod progress;
pub mod transitions;

pub use engine::WorkflowEngine;
pub use progress::{filtered_stages, progress_percent, stage_applies};
pub use transitions::{forward_path, next_stage, previous_stage};
