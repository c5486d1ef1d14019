use axum::{
    extract::{Query, State},
    routing::{get, post},
    Json, Router,
};
use notegrep_core::{SearchEngine, SearchResult};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

#[derive(Deserialize)]
pub struct SearchParams {
    pub q: String,
    #[serde(default = "default_page")]
    pub page: usize,
    #[serde(default = "default_limit")]
    pub limit: usize,
}
fn default_page() -> usize {
    1
}
fn default_limit() -> usize {
    10
}

#[derive(Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub took_s: f64,
    pub total_hits: usize,
    pub page: usize,
    pub limit: usize,
    pub total_pages: usize,
    pub results: Vec<SearchResult>,
}

#[derive(Serialize)]
pub struct StatusResponse {
    pub index_built: bool,
    pub documents: u64,
}

pub fn build_app(engine: Arc<SearchEngine>) -> Router {
    // CORS: read CORS_ALLOW_ORIGIN (comma-separated) or allow Any by default
    let cors = match std::env::var("CORS_ALLOW_ORIGIN") {
        Ok(val) => {
            let origins: Vec<_> = val.split(',').filter_map(|s| s.trim().parse().ok()).collect();
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

    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/search", get(search_handler))
        .route("/status", get(status_handler))
        .route("/reindex", post(reindex_handler))
        .with_state(engine)
        .layer(cors)
}

pub async fn search_handler(
    State(engine): State<Arc<SearchEngine>>,
    Query(params): Query<SearchParams>,
) -> Json<SearchResponse> {
    let start = std::time::Instant::now();
    let page = engine.search_page(&params.q, params.page, params.limit);
    Json(SearchResponse {
        query: params.q,
        took_s: start.elapsed().as_secs_f64(),
        total_hits: page.total_count,
        page: page.page,
        limit: page.limit,
        total_pages: page.total_pages,
        results: page.items,
    })
}

pub async fn status_handler(State(engine): State<Arc<SearchEngine>>) -> Json<StatusResponse> {
    Json(StatusResponse {
        index_built: engine.is_index_built(),
        documents: engine.document_count(),
    })
}

pub async fn reindex_handler(State(engine): State<Arc<SearchEngine>>) -> Json<serde_json::Value> {
    engine.index_all_files();
    Json(serde_json::json!({ "queued": true }))
}
