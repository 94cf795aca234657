//! HTTP request handlers for the commission API.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::EngineResult;

use super::request::{BulkCommissionRequest, CommissionRequest};
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/commission", post(commission_handler))
        .route("/commission/bulk", post(bulk_commission_handler))
        .route("/health", get(health_handler))
        .with_state(state)
}

/// Handler for GET /health.
async fn health_handler() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

/// Handler for POST /commission.
async fn commission_handler(
    State(state): State<AppState>,
    payload: Result<Json<CommissionRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing commission request");

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    let start_time = Instant::now();
    let result = state.engine().calculate(
        &request.order,
        &request.vendor,
        request.evaluation_date(),
    );

    if let Ok(breakdown) = &result {
        info!(
            correlation_id = %correlation_id,
            order_id = %breakdown.order_id,
            vendor_id = %breakdown.vendor_id,
            net_commission = %breakdown.net_commission.normalize(),
            duration_us = start_time.elapsed().as_micros(),
            "Commission calculated"
        );
    }
    json_response(result, correlation_id)
}

/// Handler for POST /commission/bulk.
async fn bulk_commission_handler(
    State(state): State<AppState>,
    payload: Result<Json<BulkCommissionRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing bulk commission request");

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    let start_time = Instant::now();
    let result = state.engine().calculate_bulk(
        &request.orders,
        &request.vendor,
        request.evaluation_date(),
    );

    if let Ok(bulk) = &result {
        info!(
            correlation_id = %correlation_id,
            vendor_id = %bulk.vendor_id,
            order_count = bulk.order_count,
            net_commission = %bulk.totals.net_commission.normalize(),
            duration_us = start_time.elapsed().as_micros(),
            "Bulk commission calculated"
        );
    }
    json_response(result, correlation_id)
}

fn json_response<T: Serialize>(result: EngineResult<T>, correlation_id: Uuid) -> Response {
    match result {
        Ok(body) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/json")],
            Json(body),
        )
            .into_response(),
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Calculation failed"
            );
            ApiErrorResponse::from(err).into_response()
        }
    }
}

fn rejection_response(rejection: JsonRejection, correlation_id: Uuid) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            // A missing top-level section is a validation problem, not bad JSON.
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    ApiErrorResponse::bad_request(error).into_response()
}
