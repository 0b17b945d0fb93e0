use std::cmp::Ordering;
use crate::core::error::{ConfigurationError, ValidationError};
use crate::core::scoring::{calculate_match_score, round_score, validate_candidate, validate_weights};
use crate::core::subscores::{assess, SubScoreTuning};
use crate::models::{
    CandidateExpert, ExpertProfile, MatchRequest, MatchResult, ScoringWeights, SubScoreInput,
};

/// Product default for the admission threshold
pub const DEFAULT_MIN_SCORE: f64 = 70.0;

/// Result of the ranking process
#[derive(Debug, Clone, PartialEq)]
pub struct RankOutcome {
    /// Admitted results, best first
    pub matches: Vec<MatchResult>,
    /// Candidates skipped for invalid sub-scores
    pub rejected: Vec<ValidationError>,
    pub total_candidates: usize,
}

/// Scores and ranks candidate experts against a request
///
/// # Pipeline Stages
/// 1. Sub-score validation (per candidate, failures collected)
/// 2. Weighted scoring
/// 3. Threshold admission
/// 4. Ordering and truncation
///
/// Holds only validated configuration and no mutable state, so one instance
/// is shared freely across workers.
#[derive(Debug, Clone)]
pub struct Matcher {
    weights: ScoringWeights,
    min_score: f64,
    tuning: SubScoreTuning,
}

impl Matcher {
    /// Build a matcher, rejecting weights that do not sum to 1.00 or an
    /// unusable default threshold
    pub fn new(weights: ScoringWeights, min_score: f64) -> Result<Self, ConfigurationError> {
        validate_weights(&weights)?;
        check_min_score(min_score)?;

        Ok(Self {
            weights,
            min_score,
            tuning: SubScoreTuning::default(),
        })
    }

    /// Matcher with the product weights and threshold
    ///
    /// The defaults always pass the checks in [`Matcher::new`].
    pub fn with_default_weights() -> Self {
        Self {
            weights: ScoringWeights::default(),
            min_score: DEFAULT_MIN_SCORE,
            tuning: SubScoreTuning::default(),
        }
    }

    pub fn with_tuning(mut self, tuning: SubScoreTuning) -> Self {
        self.tuning = tuning;
        self
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    /// Default admission threshold used by [`Matcher::score`]
    pub fn min_score(&self) -> f64 {
        self.min_score
    }

    pub fn tuning(&self) -> &SubScoreTuning {
        &self.tuning
    }

    /// Score a single candidate
    ///
    /// `admitted` is judged against the matcher's configured threshold.
    pub fn score(&self, candidate: &CandidateExpert) -> Result<MatchResult, ValidationError> {
        let scores = validate_candidate(candidate)?;
        let breakdown = calculate_match_score(&scores, &self.weights);
        let overall_score = round_score(breakdown.total);

        Ok(MatchResult {
            expert_id: candidate.expert_id.clone(),
            overall_score,
            breakdown,
            admitted: f64::from(overall_score) >= self.min_score,
        })
    }

    /// Rank a candidate pool for a request
    ///
    /// # Arguments
    /// * `request` - The customer's request
    /// * `candidates` - Experts with precomputed sub-scores
    /// * `min_score` - Admission threshold for this call
    /// * `limit` - Maximum number of matches, `request.max_results` when `None`
    ///
    /// # Returns
    /// RankOutcome with admitted matches ordered by score, then reputation,
    /// then expert id; invalid candidates are listed in `rejected`.
    pub fn rank(
        &self,
        request: &MatchRequest,
        candidates: &[CandidateExpert],
        min_score: f64,
        limit: Option<usize>,
    ) -> Result<RankOutcome, ConfigurationError> {
        check_min_score(min_score)?;
        let limit = limit.unwrap_or(request.max_results);

        let mut rejected = Vec::new();
        let mut admitted: Vec<(MatchResult, f64)> = Vec::with_capacity(candidates.len());

        for candidate in candidates {
            match self.score(candidate) {
                Ok(mut result) => {
                    result.admitted = f64::from(result.overall_score) >= min_score;
                    if result.admitted {
                        // Reputation only breaks ties; validated by score() above
                        let reputation = candidate
                            .reputation_index
                            .as_ref()
                            .and_then(SubScoreInput::as_f64)
                            .unwrap_or_default();
                        admitted.push((result, reputation));
                    }
                }
                Err(e) => {
                    tracing::warn!("Skipping candidate for request {}: {}", request.id, e);
                    rejected.push(e);
                }
            }
        }

        tracing::debug!(
            "Request {}: {} of {} candidates cleared {}",
            request.id,
            admitted.len(),
            candidates.len(),
            min_score
        );

        // Sort by score (descending), reputation (descending), then id (ascending)
        admitted.sort_by(|(a, a_rep), (b, b_rep)| compare_ranked(a, *a_rep, b, *b_rep));
        admitted.truncate(limit);

        Ok(RankOutcome {
            matches: admitted.into_iter().map(|(result, _)| result).collect(),
            rejected,
            total_candidates: candidates.len(),
        })
    }

    /// Assess raw profiles into candidates, then rank them
    pub fn find_matches(
        &self,
        request: &MatchRequest,
        experts: &[ExpertProfile],
        min_score: f64,
        limit: Option<usize>,
    ) -> Result<RankOutcome, ConfigurationError> {
        let candidates: Vec<CandidateExpert> = experts
            .iter()
            .map(|profile| assess(request, profile, &self.tuning))
            .collect();

        self.rank(request, &candidates, min_score, limit)
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::with_default_weights()
    }
}

fn check_min_score(min_score: f64) -> Result<(), ConfigurationError> {
    if !min_score.is_finite() || min_score < 0.0 {
        return Err(ConfigurationError::InvalidMinScore(min_score));
    }
    Ok(())
}

/// Convert a caller-supplied limit, rejecting negative values
pub fn parse_limit(limit: i64) -> Result<usize, ConfigurationError> {
    usize::try_from(limit).map_err(|_| ConfigurationError::NegativeLimit(limit))
}

fn compare_ranked(a: &MatchResult, a_rep: f64, b: &MatchResult, b_rep: f64) -> Ordering {
    b.overall_score
        .cmp(&a.overall_score)
        .then_with(|| b_rep.total_cmp(&a_rep))
        .then_with(|| a.expert_id.cmp(&b.expert_id))
}
