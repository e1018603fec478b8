//! HTTP server for the listings analytics API.
//!
//! Every endpoint is a GET that runs one query against the shared table.
//!
//! # API Endpoints
//!
//! | Path                    | Description                                  |
//! |-------------------------|----------------------------------------------|
//! | `/health`               | Health check and dataset status              |
//! | `/api/top-domains`      | Top 10 job titles by listing count           |
//! | `/api/salary-insights`  | Top 10 job titles by mean salary             |
//! | `/api/jobs-by-city`     | Top 10 cities by listing count               |
//! | `/api/domains`          | All job titles                               |
//! | `/api/locations`        | All locations                                |
//! | `/api/company-hiring`   | Top 10 companies by listing count            |
//! | `/api/salary-ranges`    | Mean min/max/avg salary per job title        |
//! | `/api/filter-data`      | Listings by `domain`, `location`, `min_salary` |
//! | `/api/compare-domains`  | Compare `domain1` and `domain2`              |
//! | `/api/key-insights`     | Dataset-wide summary                         |
//! | `/api/logs`             | SSE stream of server logs                    |

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::{header, HeaderValue, Method},
    response::{sse::Event, Json, Sse},
    routing::get,
    Router,
};
use futures::stream::Stream;
use std::{convert::Infallible, net::SocketAddr, sync::Arc, time::Duration};
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt as _;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use super::logs::{log_info, LOG_BROADCASTER};
use super::state::AppState;
use super::types::{reject, ApiRejection, CompareParams, HealthResponse};
use crate::config::Config;
use crate::error::{QueryError, ServerResult};
use crate::models::{
    CityCount, CompanyCount, DomainComparison, DomainCount, DomainSalary, KeyInsights, Listing,
    SalaryRange,
};
use crate::query::{self, FilterParams, DEFAULT_LIMIT};

type SharedState = State<Arc<AppState>>;

/// Raw query pairs, repeats included; a rejection is answered as JSON.
type QueryPairs = Result<Query<Vec<(String, String)>>, QueryRejection>;

/// CORS layer for the configured origins; `*` allows any origin.
pub fn cors_layer(config: &Config) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    if config.allows_any_origin() {
        cors.allow_origin(Any)
    } else {
        let allowed: Vec<HeaderValue> = config
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        cors.allow_origin(AllowOrigin::list(allowed))
    }
}

/// Build the router over a loaded state.
pub fn router(state: Arc<AppState>, cors: CorsLayer) -> Router {
    Router::new()
        .route("/", get(health))
        .route("/health", get(health))
        .route("/api/top-domains", get(top_domains))
        .route("/api/salary-insights", get(salary_insights))
        .route("/api/jobs-by-city", get(jobs_by_city))
        .route("/api/domains", get(domains))
        .route("/api/locations", get(locations))
        .route("/api/company-hiring", get(company_hiring))
        .route("/api/salary-ranges", get(salary_ranges))
        .route("/api/filter-data", get(filter_data))
        .route("/api/compare-domains", get(compare_domains))
        .route("/api/key-insights", get(key_insights))
        .route("/api/logs", get(sse_logs))
        .layer(cors)
        .with_state(state)
}

/// Load the dataset and serve until the process is stopped.
pub async fn start_server(config: Config) -> ServerResult<()> {
    let state = Arc::new(AppState::load(&config.data_path));
    let app = router(state, cors_layer(&config));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;

    log_info(format!("DataDash server running on http://localhost:{}", config.port));
    log_info(format!("CORS origins: {}", config.cors_origins.join(", ")));

    axum::serve(listener, app).await?;

    Ok(())
}

/// Health check endpoint
async fn health(State(state): SharedState) -> Json<HealthResponse> {
    Json(HealthResponse::from(state.as_ref()))
}

async fn top_domains(State(state): SharedState) -> Json<Vec<DomainCount>> {
    Json(query::top_domains(&state.table, DEFAULT_LIMIT))
}

async fn salary_insights(State(state): SharedState) -> Json<Vec<DomainSalary>> {
    Json(query::salary_insights(&state.table, DEFAULT_LIMIT))
}

async fn jobs_by_city(State(state): SharedState) -> Json<Vec<CityCount>> {
    Json(query::jobs_by_city(&state.table, DEFAULT_LIMIT))
}

async fn domains(State(state): SharedState) -> Json<Vec<String>> {
    Json(query::all_domains(&state.table))
}

async fn locations(State(state): SharedState) -> Json<Vec<String>> {
    Json(query::all_locations(&state.table))
}

async fn company_hiring(State(state): SharedState) -> Json<Vec<CompanyCount>> {
    Json(query::company_hiring(&state.table, DEFAULT_LIMIT))
}

async fn salary_ranges(State(state): SharedState) -> Json<Vec<SalaryRange>> {
    Json(query::salary_ranges(&state.table))
}

fn query_pairs(endpoint: &str, query: QueryPairs) -> Result<Vec<(String, String)>, ApiRejection> {
    query
        .map(|Query(pairs)| pairs)
        .map_err(|e| reject(endpoint, QueryError::MalformedQuery(e.body_text())))
}

async fn filter_data(
    State(state): SharedState,
    query: QueryPairs,
) -> Result<Json<Vec<Listing>>, ApiRejection> {
    let params = FilterParams::from_pairs(&query_pairs("/api/filter-data", query)?);
    let rows = query::filter_listings(&state.table, &params)
        .map_err(|e| reject("/api/filter-data", e))?;
    Ok(Json(rows.into_iter().cloned().collect()))
}

async fn compare_domains(
    State(state): SharedState,
    query: QueryPairs,
) -> Result<Json<DomainComparison>, ApiRejection> {
    let params = CompareParams::from_pairs(&query_pairs("/api/compare-domains", query)?);
    query::compare_domains(
        &state.table,
        params.domain1.as_deref(),
        params.domain2.as_deref(),
    )
    .map(Json)
    .map_err(|e| reject("/api/compare-domains", e))
}

async fn key_insights(State(state): SharedState) -> Json<KeyInsights> {
    Json(query::key_insights(&state.table))
}

/// SSE endpoint for real-time log streaming
async fn sse_logs() -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let rx = LOG_BROADCASTER.subscribe();

    let stream = BroadcastStream::new(rx).filter_map(|result| match result {
        Ok(entry) => {
            let json = serde_json::to_string(&entry).ok()?;
            Some(Ok(Event::default().data(json)))
        }
        // Lagged receivers skip what they missed
        Err(_) => None,
    });

    Sse::new(stream).keep_alive(
        axum::response::sse::KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("keep-alive"),
    )
}
