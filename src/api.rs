// 🌐 REST API with Axum
// Routes: POST /receipts/process, GET /receipts/:id/points, GET /receipts/:id, GET /health

use crate::error::ReceiptError;
use crate::receipt::{Receipt, ScoredReceipt};
use crate::store::ReceiptStore;
use crate::{rules, schema};
use axum::{
    body::Bytes,
    extract::{rejection::PathRejection, Path, State},
    http::{StatusCode, Uri},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{debug, info, warn};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<ReceiptStore>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ProcessResponse {
    pub id: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PointsResponse {
    pub points: u64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub receipts: usize,
}

impl IntoResponse for ReceiptError {
    fn into_response(self) -> Response {
        let status = match self {
            ReceiptError::InvalidReceipt => StatusCode::BAD_REQUEST,
            ReceiptError::NotFound => StatusCode::NOT_FOUND,
        };

        (status, self.to_string()).into_response()
    }
}

/// Raw path id, or "" when the segment could not be decoded
fn path_id(path: Result<Path<String>, PathRejection>) -> String {
    match path {
        Ok(Path(id)) => id,
        Err(e) => {
            debug!(error = %e, "receipt id failed to extract");
            String::new()
        }
    }
}

/// Identifiers are lowercase hex and hyphens; anything else is looked up as ""
fn extract_id(raw: &str) -> &str {
    let well_formed = !raw.is_empty()
        && raw
            .chars()
            .all(|c| matches!(c, 'a'..='f' | '0'..='9' | '-'));

    if well_formed {
        raw
    } else {
        ""
    }
}

// ============================================================================
// API Handlers
// ============================================================================

/// POST /receipts/process - Validate, score and store a receipt
async fn process_receipt(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<ProcessResponse>, ReceiptError> {
    let receipt = Receipt::from_json(&body).map_err(|e| {
        debug!(error = %e, "receipt body failed to decode");
        ReceiptError::InvalidReceipt
    })?;

    schema::validate(&receipt)?;

    let breakdown = rules::breakdown(&receipt);
    let points = breakdown.total();
    debug!(?breakdown, "receipt scored");

    let id = state.store.insert(receipt, points);
    info!(%id, points, "receipt accepted");

    Ok(Json(ProcessResponse { id }))
}

/// GET /receipts/:id/points - Points awarded to a stored receipt
async fn get_points(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<PointsResponse>, ReceiptError> {
    let id = path_id(path);
    let points = state
        .store
        .lookup_points(extract_id(&id))
        .inspect_err(|_| warn!(%id, "points lookup missed"))?;

    Ok(Json(PointsResponse { points }))
}

/// GET /receipts/:id - Full stored record
async fn get_receipt(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<ScoredReceipt>, ReceiptError> {
    let id = path_id(path);
    let scored = state
        .store
        .get(extract_id(&id))
        .inspect_err(|_| warn!(%id, "receipt lookup missed"))?;

    Ok(Json(scored))
}

/// Any unmatched path; everything under /receipts/ is an unknown receipt
async fn not_found(uri: Uri) -> Response {
    if uri.path().starts_with("/receipts/") {
        warn!(path = uri.path(), "no receipt route matched");
        ReceiptError::NotFound.into_response()
    } else {
        StatusCode::NOT_FOUND.into_response()
    }
}

/// GET /health - Health check
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        receipts: state.store.len(),
    })
}

// ============================================================================
// Router
// ============================================================================

pub fn router(store: Arc<ReceiptStore>) -> Router {
    let state = AppState { store };

    Router::new()
        .route("/health", get(health_check))
        .route("/receipts/process", post(process_receipt))
        .route("/receipts/:id", get(get_receipt))
        .route("/receipts/:id/points", get(get_points))
        .fallback(not_found)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

// ============================================================================
// TESTS
// ============================================================================
