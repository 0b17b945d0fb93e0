use actix_web::{web, HttpResponse, Responder};
use validator::Validate;
use crate::core::{parse_limit, ConfigurationError, Matcher, RankOutcome};
use crate::models::{
    CandidateExpert, ErrorResponse, FindMatchesRequest, HealthResponse, MatchRequest, RankRequest,
    RankResponse, RejectedCandidate,
};

/// Application state shared across all handlers
#[derive(Debug, Clone)]
pub struct AppState {
    pub matcher: Matcher,
    /// Upper bound applied to any caller-supplied or request limit
    pub max_limit: usize,
}

/// Configure all match-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/matches/score", web::post().to(score_candidate))
        .route("/matches/rank", web::post().to(rank_candidates))
        .route("/matches/find", web::post().to(find_matches));
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Score a single candidate
///
/// POST /api/v1/matches/score
///
/// Request body:
/// ```json
/// {
///   "expertId": "string",
///   "serviceCompatibility": 90,
///   "priceCompatibility": 80,
///   "locationTimeCompatibility": 70,
///   "reputationIndex": 60
/// }
/// ```
async fn score_candidate(
    state: web::Data<AppState>,
    req: web::Json<CandidateExpert>,
) -> impl Responder {
    match state.matcher.score(&req) {
        Ok(result) => HttpResponse::Ok().json(result),
        Err(e) => {
            tracing::info!("Rejected candidate {}: {}", e.expert_id(), e);
            HttpResponse::UnprocessableEntity().json(ErrorResponse {
                error: "invalid_candidate".to_string(),
                message: e.to_string(),
                status_code: 422,
            })
        }
    }
}

/// Rank candidates with precomputed sub-scores
///
/// POST /api/v1/matches/rank
///
/// Request body:
/// ```json
/// {
///   "request": { "category": "cleaning", "budgetRange": {"min": 0, "max": 100000}, ... },
///   "candidates": [{ "expertId": "string", "serviceCompatibility": 90, ... }],
///   "minScore": 70,
///   "limit": 10
/// }
/// ```
async fn rank_candidates(
    state: web::Data<AppState>,
    req: web::Json<RankRequest>,
) -> HttpResponse {
    if let Err(errors) = req.validate() {
        return validation_failed(errors);
    }

    let RankRequest { request, candidates, min_score, limit } = req.into_inner();

    tracing::info!(
        "Ranking {} candidates for request {} ({})",
        candidates.len(),
        request.id,
        request.category
    );

    let (min_score, limit) = match resolve_parameters(&state, &request, min_score, limit) {
        Ok(params) => params,
        Err(e) => return invalid_parameters(e),
    };

    let matcher = state.matcher.clone();
    let ranked = web::block(move || {
        let outcome = matcher.rank(&request, &candidates, min_score, Some(limit));
        (request, outcome)
    })
    .await;

    respond_with_outcome(ranked)
}

/// Assess raw expert profiles and rank them
///
/// POST /api/v1/matches/find
///
/// Request body:
/// ```json
/// {
///   "request": { "category": "cleaning", ... },
///   "experts": [{ "expertId": "string", "categories": ["cleaning"], ... }],
///   "minScore": 70,
///   "limit": 10
/// }
/// ```
async fn find_matches(
    state: web::Data<AppState>,
    req: web::Json<FindMatchesRequest>,
) -> HttpResponse {
    if let Err(errors) = req.validate() {
        return validation_failed(errors);
    }

    let FindMatchesRequest { request, experts, min_score, limit } = req.into_inner();

    tracing::info!(
        "Finding matches among {} experts for request {} ({})",
        experts.len(),
        request.id,
        request.category
    );

    let (min_score, limit) = match resolve_parameters(&state, &request, min_score, limit) {
        Ok(params) => params,
        Err(e) => return invalid_parameters(e),
    };

    let matcher = state.matcher.clone();
    let ranked = web::block(move || {
        let outcome = matcher.find_matches(&request, &experts, min_score, Some(limit));
        (request, outcome)
    })
    .await;

    respond_with_outcome(ranked)
}

/// Fill in defaults and cap the limit
fn resolve_parameters(
    state: &AppState,
    request: &MatchRequest,
    min_score: Option<f64>,
    limit: Option<i64>,
) -> Result<(f64, usize), ConfigurationError> {
    let min_score = min_score.unwrap_or_else(|| state.matcher.min_score());
    let limit = match limit {
        Some(limit) => parse_limit(limit)?,
        None => request.max_results,
    };

    Ok((min_score, limit.min(state.max_limit)))
}

fn respond_with_outcome(
    ranked: Result<(MatchRequest, Result<RankOutcome, ConfigurationError>), actix_web::error::BlockingError>,
) -> HttpResponse {
    match ranked {
        Ok((request, Ok(outcome))) => {
            tracing::info!(
                "Returning {} matches for request {} (from {} candidates, {} rejected)",
                outcome.matches.len(),
                request.id,
                outcome.total_candidates,
                outcome.rejected.len()
            );

            HttpResponse::Ok().json(RankResponse {
                request_id: request.id,
                rejected: outcome.rejected.iter().map(RejectedCandidate::from).collect(),
                matches: outcome.matches,
                total_candidates: outcome.total_candidates,
                generated_at: chrono::Utc::now(),
            })
        }
        Ok((_, Err(e))) => invalid_parameters(e),
        Err(e) => {
            tracing::error!("Ranking task failed: {}", e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "ranking_failed".to_string(),
                message: e.to_string(),
                status_code: 500,
            })
        }
    }
}

fn validation_failed(errors: validator::ValidationErrors) -> HttpResponse {
    tracing::info!("Validation failed for match request: field_errors={:?}", errors);
    HttpResponse::BadRequest().json(ErrorResponse {
        error: "validation_failed".to_string(),
        message: errors.to_string(),
        status_code: 400,
    })
}

fn invalid_parameters(err: ConfigurationError) -> HttpResponse {
    tracing::info!("Invalid ranking parameters: {}", err);
    HttpResponse::BadRequest().json(ErrorResponse {
        error: "invalid_parameters".to_string(),
        message: err.to_string(),
        status_code: 400,
    })
}
