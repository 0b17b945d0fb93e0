//! Provee Match - compatibility scoring for the Provee expert marketplace
//!
//! This library scores service experts against a customer's request from
//! four weighted sub-scores and ranks the pool with a minimum-threshold
//! admission rule and a deterministic tie-break.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;

// Re-export commonly used types
pub use crate::core::{ConfigurationError, Matcher, RankOutcome, SubScoreTuning, ValidationError};
pub use models::{CandidateExpert, ExpertProfile, MatchRequest, MatchResult, ScoreBreakdown, ScoringWeights};
