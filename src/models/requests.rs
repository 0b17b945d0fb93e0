use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::models::domain::{CandidateExpert, ExpertProfile, MatchRequest};

/// Request to rank a pool of candidates with precomputed sub-scores
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RankRequest {
    #[validate(nested)]
    pub request: MatchRequest,
    #[serde(default)]
    pub candidates: Vec<CandidateExpert>,
    #[serde(alias = "min_score", rename = "minScore", default)]
    pub min_score: Option<f64>,
    #[serde(default)]
    pub limit: Option<i64>,
}

/// Request to assess raw expert profiles and rank them
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct FindMatchesRequest {
    #[validate(nested)]
    pub request: MatchRequest,
    #[serde(default)]
    pub experts: Vec<ExpertProfile>,
    #[serde(alias = "min_score", rename = "minScore", default)]
    pub min_score: Option<f64>,
    #[serde(default)]
    pub limit: Option<i64>,
}
