//! HTTP API module for the commission engine.
//!
//! This module exposes the single-order and bulk calculations as JSON
//! endpoints and translates engine errors into client-facing bodies.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{BulkCommissionRequest, CommissionRequest};
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
