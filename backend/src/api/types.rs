//! Request and response types for the HTTP API.

use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::logs::{log_error, log_warning};
use super::state::AppState;
use crate::error::QueryError;
use crate::query::filter::first_value;

/// Error half of every fallible handler.
pub type ApiRejection = (StatusCode, Json<Value>);

/// Query string of `/api/compare-domains`.
#[derive(Debug, Clone, Default)]
pub struct CompareParams {
    pub domain1: Option<String>,
    pub domain2: Option<String>,
}

impl CompareParams {
    /// Domains from decoded query pairs, first value wins.
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        CompareParams {
            domain1: first_value(pairs, "domain1"),
            domain2: first_value(pairs, "domain2"),
        }
    }
}

/// Body of `/health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    pub listings: usize,
    pub data_path: Option<String>,
    pub load_error: Option<String>,
    pub loaded_at: String,
}

impl From<&AppState> for HealthResponse {
    fn from(state: &AppState) -> Self {
        HealthResponse {
            status: if state.load_error.is_none() { "ok" } else { "degraded" }.to_string(),
            service: "datadash".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            listings: state.table.len(),
            data_path: state.data_path.as_ref().map(|p| p.display().to_string()),
            load_error: state.load_error.clone(),
            loaded_at: state.loaded_at.to_rfc3339(),
        }
    }
}

/// Create an error response
pub fn error_response(error: &str) -> Value {
    json!({ "error": error })
}

/// Turn a query error into a logged HTTP rejection.
pub fn reject(endpoint: &str, err: QueryError) -> ApiRejection {
    let status = err.status_code();
    let message = err.to_string();

    if status.is_server_error() {
        log_error(format!("Error in {}: {}", endpoint, message));
    } else {
        log_warning(format!("Rejected {}: {}", endpoint, message));
    }

    (status, Json(error_response(&message)))
}
