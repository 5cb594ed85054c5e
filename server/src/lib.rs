use anyhow::Result;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use vsm_core::rocchio::{rocchio, RocchioWeights};
use vsm_core::{Corpus, DocId, SparseVector, TfIdfIndex};

/// Shared read-only state. Built once in `build_app` before the listener is
/// bound; request handlers only ever read it.
pub struct AppState {
    pub corpus: Corpus,
    pub index: TfIdfIndex,
}

/// Load the corpus, build the index, and assemble the router. Any failure
/// here is fatal; the service never starts with a partially built index.
pub fn build_app(corpus_path: &str) -> Result<Router> {
    let corpus = Corpus::load(corpus_path)?;
    let index = TfIdfIndex::build(&corpus);
    let state = Arc::new(AppState { corpus, index });

    // CORS: read CORS_ALLOW_ORIGIN (comma-separated) or allow Any by default
    let cors = match std::env::var("CORS_ALLOW_ORIGIN") {
        Ok(val) => {
            let origins: Vec<_> = val
                .split(',')
                .filter_map(|s| s.trim().parse().ok())
                .collect();
            if origins.is_empty() {
                CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
            } else {
                CorsLayer::new()
                    .allow_origin(AllowOrigin::list(origins))
                    .allow_methods(Any)
                    .allow_headers(Any)
            }
        }
        Err(_) => CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any),
    };

    let app = Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/vectorize", post(vectorize_handler))
        .route("/score", post(score_handler))
        .route("/rocchio", post(rocchio_handler))
        .route("/rf_score", post(rf_score_handler))
        .route("/vectors", post(vectors_handler))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors);
    Ok(app)
}

fn default_weight() -> f64 {
    0.3
}

/// The `{title, overview}` field pair a client query arrives as. Field names
/// match the corpus records.
#[derive(Debug, Default, Deserialize)]
pub struct QueryFields {
    #[serde(rename = "Series_Title", default)]
    pub title: String,
    #[serde(rename = "Overview", default)]
    pub overview: String,
}

impl QueryFields {
    fn joined(&self) -> String {
        format!("{} {}", self.title, self.overview)
    }
}

#[derive(Deserialize)]
pub struct ScoreRequest {
    query: SparseVector,
}

#[derive(Deserialize)]
pub struct RocchioRequest {
    query: SparseVector,
    #[serde(default)]
    relevants: Vec<DocId>,
    #[serde(rename = "non-relevants", default)]
    non_relevants: Vec<DocId>,
    #[serde(default = "default_weight")]
    alpha: f64,
    #[serde(default = "default_weight")]
    beta: f64,
    #[serde(default = "default_weight")]
    gamma: f64,
}

#[derive(Deserialize)]
pub struct RfScoreRequest {
    #[serde(default)]
    fields: QueryFields,
    #[serde(default)]
    relevants: Vec<DocId>,
    #[serde(rename = "non-relevants", default)]
    non_relevants: Vec<DocId>,
}

/// Accepts either raw `text/plain` query text or a JSON body carrying
/// `{"query": "..."}` or `{"fields": {...}}`. Anything else is a 400 before
/// any vectorization happens.
async fn vectorize_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<SparseVector>, (StatusCode, String)> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    let text = if content_type.starts_with("application/json") {
        let payload: serde_json::Value = serde_json::from_slice(&body)
            .map_err(|e| (StatusCode::BAD_REQUEST, format!("invalid JSON body: {e}")))?;
        query_text(&payload).ok_or_else(|| {
            (
                StatusCode::BAD_REQUEST,
                "expected {\"query\": \"...\"} or {\"fields\": {...}}".to_string(),
            )
        })?
    } else if content_type.starts_with("text/plain") {
        std::str::from_utf8(&body)
            .map_err(|_| (StatusCode::BAD_REQUEST, "body is not valid UTF-8".to_string()))?
            .to_string()
    } else {
        return Err((
            StatusCode::BAD_REQUEST,
            format!("unsupported content type: {content_type:?}"),
        ));
    };
    Ok(Json(state.index.vectorize_query(&text)))
}

fn query_text(payload: &serde_json::Value) -> Option<String> {
    if let Some(query) = payload.get("query").and_then(|v| v.as_str()) {
        return Some(query.to_string());
    }
    if let Some(fields) = payload.get("fields") {
        let fields: QueryFields = serde_json::from_value(fields.clone()).ok()?;
        return Some(fields.joined());
    }
    None
}

/// Cosine similarity of the supplied query vector against every document in
/// the index. Ranking and truncation are the caller's business.
async fn score_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ScoreRequest>,
) -> Json<HashMap<DocId, f64>> {
    Json(state.index.score(&req.query))
}

/// Reformulate the supplied query vector from relevance judgments. Judged ids
/// unknown to the index are dropped, not rejected.
async fn rocchio_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RocchioRequest>,
) -> Json<SparseVector> {
    let relevant = state.index.vectors_for(&req.relevants);
    let non_relevant = state.index.vectors_for(&req.non_relevants);
    let weights = RocchioWeights { alpha: req.alpha, beta: req.beta, gamma: req.gamma };
    Json(rocchio(&req.query, &relevant, &non_relevant, weights))
}

/// Vectorize the query fields, reformulate, score. The only handler that
/// chains the other operations.
async fn rf_score_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RfScoreRequest>,
) -> Json<HashMap<DocId, f64>> {
    let query = state.index.vectorize_query(&req.fields.joined());
    let relevant = state.index.vectors_for(&req.relevants);
    let non_relevant = state.index.vectors_for(&req.non_relevants);
    let reformulated = rocchio(&query, &relevant, &non_relevant, RocchioWeights::default());
    Json(state.index.score(&reformulated))
}

/// Bulk lookup: stored tf-idf vectors for a list of document ids, unknown ids
/// omitted from the response.
async fn vectors_handler(
    State(state): State<Arc<AppState>>,
    Json(ids): Json<Vec<DocId>>,
) -> Json<HashMap<DocId, SparseVector>> {
    let vectors = ids
        .into_iter()
        .filter_map(|id| state.index.get(id).map(|v| (id, v.clone())))
        .collect();
    Json(vectors)
}
