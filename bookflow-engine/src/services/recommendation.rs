//! Recommendation client contract
//!
//! The engine hands the canonical submission payload to this collaborator
//! on demand and treats it as a black box: no retries, no caching. The
//! caller owns re-invocation on user-initiated refresh.

use crate::models::SubmissionPayload;
use async_trait::async_trait;
use bookflow_common::Result;
use serde::{Deserialize, Serialize};

/// One recommendable item (a book or a series entry point)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookItem {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
}

/// Recommendations scheduled for one future month
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyPlan {
    /// Month label, e.g. "2026-09"
    pub month: String,
    pub items: Vec<BookItem>,
}

/// The downstream service's response to a submission
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecommendationPlan {
    /// Immediate recommendations
    #[serde(default)]
    pub current: Vec<BookItem>,
    /// Month-by-month future plan
    #[serde(default)]
    pub future: Vec<MonthlyPlan>,
    /// Series follow-ons derived from the reaction set
    #[serde(default)]
    pub series_recommendations: Vec<BookItem>,
}

/// Downstream recommendation service
#[async_trait]
pub trait RecommendationClient: Send + Sync {
    /// Request a personalized plan for the reconciled profile
    async fn request_plan(&self, payload: &SubmissionPayload) -> Result<RecommendationPlan>;
}
