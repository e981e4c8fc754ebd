//! API route handlers for the gateway.

use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, Query, State};
use faqdesk_search::Candidate;
use std::sync::Arc;

use super::db::Faq;
use super::error::ApiError;
use super::server::AppState;

type ApiResult<T> = Result<Json<T>, ApiError>;

// Extractor rejections go through ApiError so they keep the `detail` body.
type FaqBody = Result<Json<NewFaq>, JsonRejection>;
type FaqId = Result<Path<i64>, PathRejection>;

/// Create / update payload.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct NewFaq {
    pub question: String,
    pub answer: String,
}

/// `GET /api/search` query string. Everything arrives as text so bad values
/// become 422s with a readable message instead of extractor rejections.
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct SearchParams {
    pub query: Option<String>,
    pub limit: Option<String>,
    pub min_similarity: Option<String>,
}

/// Health check endpoint.
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "service": "faqdesk",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Service information endpoint.
pub async fn system_info(State(state): State<Arc<AppState>>) -> ApiResult<serde_json::Value> {
    let faq_count = state.db.count()?;
    Ok(Json(serde_json::json!({
        "name": "faqdesk",
        "version": env!("CARGO_PKG_VERSION"),
        "uptime_secs": state.start_time.elapsed().as_secs(),
        "faq_count": faq_count,
        "search": {
            "dimensions": state.config.search.dimensions,
            "default_limit": state.config.search.default_limit,
            "max_limit": state.config.search.max_limit,
            "min_similarity": state.config.search.min_similarity,
        },
    })))
}

// ---- FAQ CRUD ----

/// Create a FAQ.
pub async fn create_faq(
    State(state): State<Arc<AppState>>,
    body: FaqBody,
) -> ApiResult<Faq> {
    let Json(body) = body?;
    let faq = state.db.create_faq(&body.question, &body.answer)?;
    tracing::info!("📝 FAQ created: id={} slug={}", faq.id, faq.slug);
    Ok(Json(faq))
}

/// List all FAQs.
pub async fn list_faqs(State(state): State<Arc<AppState>>) -> ApiResult<Vec<Faq>> {
    Ok(Json(state.db.list_faqs()?))
}

/// Get a FAQ by id.
pub async fn get_faq(State(state): State<Arc<AppState>>, id: FaqId) -> ApiResult<Faq> {
    let Path(id) = id?;
    state
        .db
        .get_faq(id)?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("FAQ {id} not found")))
}

/// Get a FAQ by slug.
pub async fn get_faq_by_slug(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> ApiResult<Faq> {
    state
        .db
        .get_faq_by_slug(&slug)?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("FAQ '{slug}' not found")))
}

/// Update a FAQ.
pub async fn update_faq(
    State(state): State<Arc<AppState>>,
    id: FaqId,
    body: FaqBody,
) -> ApiResult<Faq> {
    let Path(id) = id?;
    let Json(body) = body?;
    let faq = state.db.update_faq(id, &body.question, &body.answer)?;
    tracing::info!("✏️ FAQ updated: id={} slug={}", faq.id, faq.slug);
    Ok(Json(faq))
}

/// Delete a FAQ.
pub async fn delete_faq(
    State(state): State<Arc<AppState>>,
    id: FaqId,
) -> ApiResult<serde_json::Value> {
    let Path(id) = id?;
    if !state.db.delete_faq(id)? {
        return Err(ApiError::NotFound(format!("FAQ {id} not found")));
    }
    tracing::info!("🗑️ FAQ deleted: id={id}");
    Ok(Json(serde_json::json!({ "deleted": id })))
}

/// Previous and next FAQ around `id`.
pub async fn faq_neighbors(
    State(state): State<Arc<AppState>>,
    id: FaqId,
) -> ApiResult<serde_json::Value> {
    let Path(id) = id?;
    let (prev, next) = state.db.neighbors(id)?;
    Ok(Json(serde_json::json!({ "prev": prev, "next": next })))
}

// ---- Search ----

fn parse_limit(raw: Option<&str>, default: usize, max: usize) -> Result<usize, ApiError> {
    let Some(raw) = raw else {
        return Ok(default);
    };
    let limit: i64 = raw
        .trim()
        .parse()
        .map_err(|_| ApiError::Unprocessable("limit must be a valid integer".into()))?;
    if limit < 1 {
        return Err(ApiError::Unprocessable(
            "limit must be greater than or equal to 1".into(),
        ));
    }
    if limit as u64 > max as u64 {
        return Err(ApiError::Unprocessable(format!(
            "limit must be less than or equal to {max}"
        )));
    }
    Ok(limit as usize)
}

fn parse_min_similarity(raw: Option<&str>, default: f64) -> Result<f64, ApiError> {
    let Some(raw) = raw else {
        return Ok(default);
    };
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| ApiError::Unprocessable("min_similarity must be a number".into()))?;
    if !(0.0..=1.0).contains(&value) {
        return Err(ApiError::Unprocessable(
            "min_similarity must be within [0.0, 1.0]".into(),
        ));
    }
    Ok(value)
}

/// Search FAQs by free text, best match first.
///
/// 404 only when the store is empty; a store with no match above the
/// threshold answers `[]`.
pub async fn search_faqs(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> ApiResult<Vec<Faq>> {
    let query = params
        .query
        .ok_or_else(|| ApiError::Unprocessable("Field required: query".into()))?;
    let search = &state.config.search;
    let limit = parse_limit(params.limit.as_deref(), search.default_limit, search.max_limit)?;
    let min_similarity =
        parse_min_similarity(params.min_similarity.as_deref(), search.min_similarity)?;

    let faqs = state.db.list_faqs()?;
    if faqs.is_empty() {
        return Err(ApiError::NotFound("No FAQs available".into()));
    }
    let total = faqs.len();

    let ranker = state.ranker.with_limits(limit, min_similarity)?;
    let candidates = faqs.into_iter().map(|faq| {
        let text = faq.search_text();
        Candidate::new(faq, text)
    });
    let results = ranker.rank(&query, candidates)?;

    tracing::debug!(
        "🔎 search '{}' → {}/{} results (limit={}, min_similarity={})",
        query,
        results.len(),
        total,
        limit,
        min_similarity
    );
    Ok(Json(results))
}
