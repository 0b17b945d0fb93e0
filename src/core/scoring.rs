use crate::core::error::{ConfigurationError, ValidationError};
use crate::models::{
    CandidateExpert, ScoreBreakdown, ScoringWeights, SubScoreField, SubScoreInput, SubScores,
};

/// Allowed drift of the weight sum from 1.00
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-9;

/// Decimal places the weighted total is snapped to before rounding
const SNAP_SCALE: f64 = 1e9;

/// Check that every weight is usable and that the vector sums to 1.00
pub fn validate_weights(weights: &ScoringWeights) -> Result<(), ConfigurationError> {
    let named = [
        ("service", weights.service),
        ("price", weights.price),
        ("location_time", weights.location_time),
        ("reputation", weights.reputation),
    ];

    for (name, value) in named {
        if !value.is_finite() || value < 0.0 {
            return Err(ConfigurationError::InvalidWeight { name, value });
        }
    }

    let sum = weights.sum();
    if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
        return Err(ConfigurationError::WeightSum { sum });
    }

    Ok(())
}

/// Check a candidate's four sub-scores
///
/// Each must be present, numeric, finite and within [0, 100]. The first offending
/// field (in service, price, location/time, reputation order) is reported.
pub fn validate_candidate(candidate: &CandidateExpert) -> Result<SubScores, ValidationError> {
    let check = |field: SubScoreField, value: Option<&SubScoreInput>| -> Result<f64, ValidationError> {
        let expert_id = candidate.expert_id.clone();
        match value.map(SubScoreInput::as_f64) {
            None => Err(ValidationError::Missing { expert_id, field }),
            Some(None) => Err(ValidationError::NonNumeric { expert_id, field }),
            Some(Some(v)) if !v.is_finite() => Err(ValidationError::NonFinite { expert_id, field }),
            Some(Some(v)) if !(0.0..=100.0).contains(&v) => {
                Err(ValidationError::OutOfRange { expert_id, field, value: v })
            }
            Some(Some(v)) => Ok(v),
        }
    };

    Ok(SubScores {
        service: check(SubScoreField::Service, candidate.service_compatibility.as_ref())?,
        price: check(SubScoreField::Price, candidate.price_compatibility.as_ref())?,
        location_time: check(SubScoreField::LocationTime, candidate.location_time_compatibility.as_ref())?,
        reputation: check(SubScoreField::Reputation, candidate.reputation_index.as_ref())?,
    })
}

/// Weight each sub-score
///
/// Scoring formula:
/// total = (
///     service * 0.50 +        # category fit
///     price * 0.20 +          # budget overlap
///     location_time * 0.15 +  # distance and schedule
///     reputation * 0.15       # rating history
/// )
pub fn calculate_match_score(scores: &SubScores, weights: &ScoringWeights) -> ScoreBreakdown {
    let service = scores.service * weights.service;
    let price = scores.price * weights.price;
    let location_time = scores.location_time * weights.location_time;
    let reputation = scores.reputation * weights.reputation;

    ScoreBreakdown {
        service,
        price,
        location_time,
        reputation,
        total: service + price + location_time + reputation,
    }
}

/// Round a weighted total to a whole percentage
///
/// Uses round-half-away-from-zero, so 80.5 becomes 81. The total is first
/// snapped to nine decimal places so binary error in the weighted products
/// cannot pull an exact .5 under the boundary.
#[inline]
pub fn round_score(total: f64) -> u8 {
    let snapped = (total * SNAP_SCALE).round() / SNAP_SCALE;
    snapped.round().clamp(0.0, 100.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights_sum_to_one() {
        let weights = ScoringWeights::default();
        assert_eq!(weights.sum(), 1.0);
        assert!(validate_weights(&weights).is_ok());
    }

    #[test]
    fn test_weights_must_sum_to_one() {
        let weights = ScoringWeights {
            service: 0.5,
            price: 0.2,
            location_time: 0.2,
            reputation: 0.2,
        };
        assert!(matches!(
            validate_weights(&weights),
            Err(ConfigurationError::WeightSum { .. })
        ));
    }

    #[test]
    fn test_negative_weight_rejected() {
        let weights = ScoringWeights {
            service: 1.2,
            price: -0.2,
            location_time: 0.0,
            reputation: 0.0,
        };
        assert_eq!(
            validate_weights(&weights),
            Err(ConfigurationError::InvalidWeight { name: "price", value: -0.2 })
        );
    }

    #[test]
    fn test_round_half_away_from_zero() {
        assert_eq!(round_score(80.5), 81);
        assert_eq!(round_score(80.49), 80);
        assert_eq!(round_score(0.5), 1);
        assert_eq!(round_score(99.5), 100);
        assert_eq!(round_score(0.0), 0);
        assert_eq!(round_score(100.0), 100);
    }

    #[test]
    fn test_example_scores_81() {
        let scores = SubScores {
            service: 90.0,
            price: 80.0,
            location_time: 70.0,
            reputation: 60.0,
        };
        let breakdown = calculate_match_score(&scores, &ScoringWeights::default());

        assert!((breakdown.service - 45.0).abs() < 1e-9);
        assert!((breakdown.price - 16.0).abs() < 1e-9);
        assert!((breakdown.location_time - 10.5).abs() < 1e-9);
        assert!((breakdown.reputation - 9.0).abs() < 1e-9);
        assert_eq!(round_score(breakdown.total), 81);
    }

    #[test]
    fn test_validate_candidate_ok() {
        let candidate = CandidateExpert::new("e1", 100.0, 0.0, 50.0, 75.5);
        let scores = validate_candidate(&candidate).unwrap();
        assert_eq!(scores.reputation, 75.5);
    }

    #[test]
    fn test_validate_candidate_missing_field() {
        let mut candidate = CandidateExpert::new("e1", 90.0, 80.0, 70.0, 60.0);
        candidate.price_compatibility = None;

        let err = validate_candidate(&candidate).unwrap_err();
        assert_eq!(err.expert_id(), "e1");
        assert_eq!(err.field(), SubScoreField::Price);
        assert!(matches!(err, ValidationError::Missing { .. }));
    }

    #[test]
    fn test_validate_candidate_non_numeric() {
        let mut candidate = CandidateExpert::new("e4", 90.0, 80.0, 70.0, 60.0);
        candidate.location_time_compatibility = Some(SubScoreInput::NonNumeric("high".into()));

        let err = validate_candidate(&candidate).unwrap_err();
        assert_eq!(
            err,
            ValidationError::NonNumeric {
                expert_id: "e4".to_string(),
                field: SubScoreField::LocationTime,
            }
        );
        assert_eq!(err.to_string(), "candidate e4: locationTimeCompatibility is not a number");
    }

    #[test]
    fn test_overflowing_number_is_non_finite() {
        let candidate: CandidateExpert = serde_json::from_str(
            r#"{"expertId": "e5", "serviceCompatibility": 1e400, "priceCompatibility": 80,
                "locationTimeCompatibility": 70, "reputationIndex": 60}"#,
        )
        .unwrap();

        let err = validate_candidate(&candidate).unwrap_err();
        assert!(matches!(err, ValidationError::NonFinite { field: SubScoreField::Service, .. }));
    }

    #[test]
    fn test_validate_candidate_non_finite() {
        let candidate = CandidateExpert::new("e2", f64::NAN, 80.0, 70.0, 60.0);
        let err = validate_candidate(&candidate).unwrap_err();
        assert!(matches!(err, ValidationError::NonFinite { field: SubScoreField::Service, .. }));
    }

    #[test]
    fn test_validate_candidate_out_of_range() {
        let candidate = CandidateExpert::new("e3", 90.0, 80.0, 70.0, 100.01);
        let err = validate_candidate(&candidate).unwrap_err();
        assert_eq!(
            err,
            ValidationError::OutOfRange {
                expert_id: "e3".to_string(),
                field: SubScoreField::Reputation,
                value: 100.01,
            }
        );
        assert_eq!(err.to_string(), "candidate e3: reputationIndex = 100.01 is outside [0, 100]");
    }
}
