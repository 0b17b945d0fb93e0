// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    BudgetRange, CandidateExpert, ExpertProfile, GeoPoint, Location, MatchRequest, MatchResult,
    ScoreBreakdown, ScoringWeights, SubScoreField, SubScoreInput, SubScores,
};
pub use requests::{FindMatchesRequest, RankRequest};
pub use responses::{ErrorResponse, HealthResponse, RankResponse, RejectedCandidate};
