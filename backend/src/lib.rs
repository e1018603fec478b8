//! # DataDash - internship listings analytics
//!
//! Loads a CSV of internship/job listings once, cleans it, and answers
//! read-only aggregation queries (counts, salary means, filters) over HTTP.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   CSV File  │────▶│   Parser    │────▶│   Loader    │────▶│    Table    │
//! │  (any enc.) │     │  (auto-enc) │     │  (cleaning) │     │ (Arc, r/o)  │
//! └─────────────┘     └─────────────┘     └─────────────┘     └──────┬──────┘
//!                                                                    │
//!                                         ┌─────────────┐     ┌──────▼──────┐
//!                                         │  HTTP JSON  │◀────│    Query    │
//!                                         │   (axum)    │     │   (pure)    │
//!                                         └─────────────┘     └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use datadash::{load, query};
//!
//! let table = load("data/CleanedData.csv");
//! for row in query::top_domains(&table, 10) {
//!     println!("{}: {}", row.domain, row.count);
//! }
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Error types
//! - [`models`] - Listing, Table and aggregate records
//! - [`parser`] - CSV parsing with auto-detection
//! - [`loader`] - Column mapping and cleaning
//! - [`query`] - Aggregations and filters
//! - [`config`] - Environment configuration
//! - [`api`] - HTTP API server

// Core modules
pub mod error;
pub mod models;

// Loading
pub mod loader;
pub mod parser;

// Queries
pub mod query;

// Configuration
pub mod config;

// HTTP API
pub mod api;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{ConfigError, CsvError, LoadError, QueryError, ServerError};

// =============================================================================
// Re-exports - Models
// =============================================================================

pub use models::{
    CityCount, CompanyCount, DomainComparison, DomainCount, DomainSalary, DomainSummary,
    KeyInsights, Listing, RankedCounts, SalaryRange, Table,
};

// =============================================================================
// Re-exports - Loading
// =============================================================================

pub use loader::{load, load_bytes, load_report, try_load, LoadReport};
pub use parser::{detect_delimiter, detect_encoding, parse_bytes_auto, parse_csv_file_auto, ParseResult};

// =============================================================================
// Re-exports - Queries
// =============================================================================

pub use query::{
    all_domains, all_locations, company_hiring, compare_domains, filter_listings, jobs_by_city,
    key_insights, salary_insights, salary_ranges, top_domains, FilterParams, DEFAULT_LIMIT,
};

// =============================================================================
// Re-exports - Config & Server
// =============================================================================

pub use config::Config;

pub mod server {
    pub use crate::api::server::{cors_layer, router, start_server};
    pub use crate::api::state::AppState;
}
