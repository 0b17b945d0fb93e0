use serde::{Deserialize, Serialize};
use uuid::Uuid;
use crate::core::error::ValidationError;
use crate::models::domain::{MatchResult, SubScoreField};

/// Response for the rank and find endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankResponse {
    #[serde(rename = "requestId")]
    pub request_id: Uuid,
    pub matches: Vec<MatchResult>,
    pub rejected: Vec<RejectedCandidate>,
    #[serde(rename = "totalCandidates")]
    pub total_candidates: usize,
    #[serde(rename = "generatedAt")]
    pub generated_at: chrono::DateTime<chrono::Utc>,
}

/// A candidate that was skipped because its sub-scores were invalid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RejectedCandidate {
    #[serde(rename = "expertId")]
    pub expert_id: String,
    pub field: SubScoreField,
    pub message: String,
}

impl From<&ValidationError> for RejectedCandidate {
    fn from(err: &ValidationError) -> Self {
        Self {
            expert_id: err.expert_id().to_string(),
            field: err.field(),
            message: err.to_string(),
        }
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
