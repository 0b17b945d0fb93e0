//! Sub-score assessors.
//!
//! Each function turns one slice of a request and an expert profile into a
//! value in [0, 100]. They are independent of one another and of the
//! weights, so the ranking stage only ever sees normalized inputs.

use std::collections::BTreeSet;
use crate::core::distance::{distance_score, haversine_distance};
use crate::models::{BudgetRange, CandidateExpert, ExpertProfile, Location, MatchRequest};

/// Tunable constants for the assessors
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SubScoreTuning {
    /// Score when the request category is one of the expert's non-primary categories
    pub secondary_category_score: f64,
    /// Score when city matches but district does not
    pub same_city_score: f64,
    /// Distance at which proximity drops to zero
    pub max_distance_km: f64,
    /// Rating assumed for experts with few reviews (0-5 scale)
    pub rating_prior: f64,
    /// Number of virtual reviews backing the prior
    pub rating_prior_weight: f64,
    /// Points added for verified experts
    pub verified_bonus: f64,
}

impl Default for SubScoreTuning {
    fn default() -> Self {
        Self {
            secondary_category_score: 75.0,
            same_city_score: 70.0,
            max_distance_km: 30.0,
            rating_prior: 3.5,
            rating_prior_weight: 5.0,
            verified_bonus: 5.0,
        }
    }
}

const MAX_RATING: f64 = 5.0;

#[inline]
fn normalize_key(value: &str) -> String {
    value.trim().to_lowercase()
}

/// Category fit between the request and the expert's offered services
///
/// 100 for the primary category, `secondary_category_score` for any other
/// listed category, 0 otherwise.
pub fn service_compatibility(category: &str, expert_categories: &[String], tuning: &SubScoreTuning) -> f64 {
    let wanted = normalize_key(category);
    if wanted.is_empty() {
        return 0.0;
    }

    let mut categories = expert_categories.iter().map(|c| normalize_key(c));
    match categories.next() {
        Some(primary) if primary == wanted => 100.0,
        Some(_) if categories.any(|c| c == wanted) => tuning.secondary_category_score.clamp(0.0, 100.0),
        _ => 0.0,
    }
}

/// Overlap between the customer's budget and the expert's price range (KRW)
pub fn price_compatibility(budget: &BudgetRange, price: &BudgetRange) -> f64 {
    // Fully affordable, including experts cheaper than the budget floor
    if price.max <= budget.max {
        return 100.0;
    }

    if price.min <= budget.max {
        // price.max > budget.max >= price.min, so the span is non-zero
        let span = (price.max - price.min) as f64;
        let affordable = (budget.max - price.min) as f64;
        return 50.0 + 50.0 * (affordable / span);
    }

    if budget.max == 0 {
        return 0.0;
    }

    let overshoot = (price.min - budget.max) as f64 / budget.max as f64;
    (50.0 * (1.0 - overshoot)).max(0.0)
}

/// Proximity between the request location and the expert's base
pub fn location_compatibility(requested: &Location, expert: &Location, tuning: &SubScoreTuning) -> f64 {
    let same_city = normalize_key(&requested.city) == normalize_key(&expert.city);
    if same_city && normalize_key(&requested.district) == normalize_key(&expert.district) {
        return 100.0;
    }

    let by_distance = match (&requested.coordinates, &expert.coordinates) {
        (Some(from), Some(to)) => distance_score(haversine_distance(from, to), tuning.max_distance_km),
        _ => 0.0,
    };

    if same_city {
        by_distance.max(tuning.same_city_score.clamp(0.0, 100.0))
    } else {
        by_distance
    }
}

/// Share of requested time slots the expert is available for
///
/// An empty request schedule means the customer is flexible.
pub fn schedule_compatibility(requested: &BTreeSet<String>, available: &BTreeSet<String>) -> f64 {
    if requested.is_empty() {
        return 100.0;
    }

    let covered = requested.intersection(available).count() as f64;
    100.0 * covered / requested.len() as f64
}

/// Mean of location and schedule fit
pub fn location_time_compatibility(request: &MatchRequest, profile: &ExpertProfile, tuning: &SubScoreTuning) -> f64 {
    let location = location_compatibility(&request.location, &profile.location, tuning);
    let schedule = schedule_compatibility(&request.schedule, &profile.available_slots);
    (location + schedule) / 2.0
}

/// Reputation from rating history
///
/// Bayesian average of the rating against `rating_prior`, scaled to 0-100,
/// plus `verified_bonus` for verified experts.
pub fn reputation_index(rating: Option<f64>, review_count: u32, verified: bool, tuning: &SubScoreTuning) -> f64 {
    let prior = tuning.rating_prior.clamp(0.0, MAX_RATING);
    let prior_weight = tuning.rating_prior_weight.max(0.0);

    let average = match rating.filter(|r| r.is_finite()) {
        Some(r) => {
            let r = r.clamp(0.0, MAX_RATING);
            let n = review_count as f64;
            if n + prior_weight > 0.0 {
                (r * n + prior * prior_weight) / (n + prior_weight)
            } else {
                r
            }
        }
        None => prior,
    };

    let bonus = if verified { tuning.verified_bonus.max(0.0) } else { 0.0 };
    (average / MAX_RATING * 100.0 + bonus).clamp(0.0, 100.0)
}

/// Build a scoring candidate from a raw profile
pub fn assess(request: &MatchRequest, profile: &ExpertProfile, tuning: &SubScoreTuning) -> CandidateExpert {
    CandidateExpert::new(
        profile.expert_id.clone(),
        service_compatibility(&request.category, &profile.categories, tuning),
        price_compatibility(&request.budget_range, &profile.price_range),
        location_time_compatibility(request, profile, tuning),
        reputation_index(profile.rating, profile.review_count, profile.verified(), tuning),
    )
}
