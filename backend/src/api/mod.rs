//! HTTP API module.
//!
//! This module provides the HTTP server, shared state, and API types.

pub mod logs;
pub mod server;
pub mod state;
pub mod types;

pub use logs::*;
pub use server::{cors_layer, router, start_server};
pub use state::AppState;
pub use types::*;
