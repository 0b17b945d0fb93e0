// Core algorithm exports
pub mod distance;
pub mod error;
pub mod matcher;
pub mod scoring;
pub mod subscores;

pub use distance::{distance_score, haversine_distance};
pub use error::{ConfigurationError, ValidationError};
pub use matcher::{parse_limit, Matcher, RankOutcome, DEFAULT_MIN_SCORE};
pub use scoring::{calculate_match_score, round_score, validate_candidate, validate_weights};
pub use subscores::{assess, SubScoreTuning};
