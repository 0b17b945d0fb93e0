use serde::{Deserialize, Deserializer, Serialize};
use serde_json::value::RawValue;
use std::collections::BTreeSet;
use std::fmt;
use uuid::Uuid;
use validator::Validate;

/// A customer's service request as submitted through the intake form
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MatchRequest {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    #[validate(length(min = 1))]
    pub category: String,
    #[serde(rename = "budgetRange")]
    #[validate(nested)]
    pub budget_range: BudgetRange,
    pub location: Location,
    #[serde(default)]
    pub schedule: BTreeSet<String>,
    #[serde(rename = "maxResults", default = "default_max_results")]
    #[validate(range(min = 1))]
    pub max_results: usize,
}

fn default_max_results() -> usize { 10 }

/// Inclusive price range in KRW
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_budget_bounds"))]
pub struct BudgetRange {
    pub min: u64,
    pub max: u64,
}

impl BudgetRange {
    pub fn new(min: u64, max: u64) -> Self {
        Self { min, max }
    }
}

fn validate_budget_bounds(range: &BudgetRange) -> Result<(), validator::ValidationError> {
    if range.min > range.max {
        let mut err = validator::ValidationError::new("budget_bounds");
        err.message = Some("min must not exceed max".into());
        return Err(err);
    }
    Ok(())
}

/// City/district pair as used by Korean addresses (e.g. 서울특별시 / 강남구)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub city: String,
    pub district: String,
    #[serde(default)]
    pub coordinates: Option<GeoPoint>,
}

impl Location {
    pub fn new(city: impl Into<String>, district: impl Into<String>) -> Self {
        Self {
            city: city.into(),
            district: district.into(),
            coordinates: None,
        }
    }

    pub fn with_coordinates(mut self, latitude: f64, longitude: f64) -> Self {
        self.coordinates = Some(GeoPoint { latitude, longitude });
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

/// Raw expert profile as stored by the retrieval layer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpertProfile {
    #[serde(rename = "expertId")]
    pub expert_id: String,
    /// First entry is the primary category
    pub categories: Vec<String>,
    #[serde(rename = "priceRange")]
    pub price_range: BudgetRange,
    pub location: Location,
    #[serde(rename = "availableSlots", default)]
    pub available_slots: BTreeSet<String>,
    /// Average review rating on a 0-5 scale
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(rename = "reviewCount", default)]
    pub review_count: u32,
    #[serde(rename = "isVerified", default)]
    pub is_verified: Option<bool>,
}

impl ExpertProfile {
    /// Helper to get is_verified as a bool, defaulting to false
    pub fn verified(&self) -> bool {
        self.is_verified.unwrap_or(false)
    }
}

/// An expert with the four precomputed sub-scores, each expected in [0, 100]
///
/// Fields are optional and loosely typed on the wire so that a missing or
/// non-numeric sub-score is reported as a validation error for this
/// candidate instead of failing the batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateExpert {
    #[serde(rename = "expertId")]
    pub expert_id: String,
    #[serde(rename = "serviceCompatibility", default)]
    pub service_compatibility: Option<SubScoreInput>,
    #[serde(rename = "priceCompatibility", default)]
    pub price_compatibility: Option<SubScoreInput>,
    #[serde(rename = "locationTimeCompatibility", default)]
    pub location_time_compatibility: Option<SubScoreInput>,
    #[serde(rename = "reputationIndex", default)]
    pub reputation_index: Option<SubScoreInput>,
}

impl CandidateExpert {
    pub fn new(
        expert_id: impl Into<String>,
        service: f64,
        price: f64,
        location_time: f64,
        reputation: f64,
    ) -> Self {
        Self {
            expert_id: expert_id.into(),
            service_compatibility: Some(service.into()),
            price_compatibility: Some(price.into()),
            location_time_compatibility: Some(location_time.into()),
            reputation_index: Some(reputation.into()),
        }
    }
}

/// A sub-score as received, before validation
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SubScoreInput {
    /// Any JSON number, including ones that overflow to infinity
    Number(f64),
    /// A string, bool, array or object where a number belongs
    NonNumeric(serde_json::Value),
}

impl SubScoreInput {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            SubScoreInput::Number(value) => Some(*value),
            SubScoreInput::NonNumeric(_) => None,
        }
    }
}

impl From<f64> for SubScoreInput {
    fn from(value: f64) -> Self {
        SubScoreInput::Number(value)
    }
}

impl<'de> Deserialize<'de> for SubScoreInput {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // 1e400 survives as raw text and parses to infinity
        let raw = Box::<RawValue>::deserialize(deserializer)?;
        let text = raw.get().trim();

        if let Ok(number) = text.parse::<f64>() {
            return Ok(SubScoreInput::Number(number));
        }

        serde_json::from_str(text)
            .map(SubScoreInput::NonNumeric)
            .map_err(serde::de::Error::custom)
    }
}

/// Identifies one of the four sub-scores
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SubScoreField {
    #[serde(rename = "serviceCompatibility")]
    Service,
    #[serde(rename = "priceCompatibility")]
    Price,
    #[serde(rename = "locationTimeCompatibility")]
    LocationTime,
    #[serde(rename = "reputationIndex")]
    Reputation,
}

impl SubScoreField {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubScoreField::Service => "serviceCompatibility",
            SubScoreField::Price => "priceCompatibility",
            SubScoreField::LocationTime => "locationTimeCompatibility",
            SubScoreField::Reputation => "reputationIndex",
        }
    }
}

impl fmt::Display for SubScoreField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validated sub-scores, all finite and within [0, 100]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SubScores {
    pub service: f64,
    pub price: f64,
    pub location_time: f64,
    pub reputation: f64,
}

/// Weighted contribution of each sub-score to the overall score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub service: f64,
    pub price: f64,
    #[serde(rename = "locationTime")]
    pub location_time: f64,
    pub reputation: f64,
    /// Weighted total before rounding
    pub total: f64,
}

/// Scored candidate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    #[serde(rename = "expertId")]
    pub expert_id: String,
    #[serde(rename = "overallScore")]
    pub overall_score: u8,
    pub breakdown: ScoreBreakdown,
    pub admitted: bool,
}

/// Scoring weights
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringWeights {
    pub service: f64,
    pub price: f64,
    pub location_time: f64,
    pub reputation: f64,
}

impl ScoringWeights {
    pub fn sum(&self) -> f64 {
        self.service + self.price + self.location_time + self.reputation
    }
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            service: 0.50,
            price: 0.20,
            location_time: 0.15,
            reputation: 0.15,
        }
    }
}
