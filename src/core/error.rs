use thiserror::Error;
use crate::models::SubScoreField;

/// A candidate's sub-scores break the [0, 100] contract
///
/// Raised per candidate. During ranking these are collected next to the
/// successful results and never abort the batch.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("candidate {expert_id}: {field} is missing")]
    Missing {
        expert_id: String,
        field: SubScoreField,
    },

    #[error("candidate {expert_id}: {field} is not a number")]
    NonNumeric {
        expert_id: String,
        field: SubScoreField,
    },

    #[error("candidate {expert_id}: {field} is not a finite number")]
    NonFinite {
        expert_id: String,
        field: SubScoreField,
    },

    #[error("candidate {expert_id}: {field} = {value} is outside [0, 100]")]
    OutOfRange {
        expert_id: String,
        field: SubScoreField,
        value: f64,
    },
}

impl ValidationError {
    pub fn expert_id(&self) -> &str {
        match self {
            ValidationError::Missing { expert_id, .. }
            | ValidationError::NonNumeric { expert_id, .. }
            | ValidationError::NonFinite { expert_id, .. }
            | ValidationError::OutOfRange { expert_id, .. } => expert_id,
        }
    }

    pub fn field(&self) -> SubScoreField {
        match self {
            ValidationError::Missing { field, .. }
            | ValidationError::NonNumeric { field, .. }
            | ValidationError::NonFinite { field, .. }
            | ValidationError::OutOfRange { field, .. } => *field,
        }
    }
}

/// Invalid weights or ranking parameters
///
/// These reject a whole call (or startup, for weights).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigurationError {
    #[error("scoring weights must sum to 1.00, got {sum}")]
    WeightSum { sum: f64 },

    #[error("scoring weight {name} must be a finite non-negative number, got {value}")]
    InvalidWeight { name: &'static str, value: f64 },

    #[error("min score must be a finite non-negative number, got {0}")]
    InvalidMinScore(f64),

    #[error("limit must not be negative, got {0}")]
    NegativeLimit(i64),
}
