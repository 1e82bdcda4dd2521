//! Contact inquiry handlers

use crate::error::{ApiError, Result};
use crate::services::PersistOutcome;
use crate::AppState;
use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap},
    Json,
};
use catalog_types::{Inquiry, InquiryReceipt};
use tracing::{info, warn};

/// Serves both `/contact` and `/submit-inquiry`
pub async fn submit(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<InquiryReceipt>> {
    let inquiry = parse_inquiry(&headers, &body)?;

    // The submitter gets a receipt whatever happens to the write
    match state.intake.persist(inquiry).await {
        PersistOutcome::Persisted { id } => info!("Inquiry stored: {}", id),
        PersistOutcome::Failed { reason } => warn!("Inquiry not stored: {}", reason),
        PersistOutcome::Unconfigured => info!("Inquiry accepted without storage"),
    }

    Ok(Json(InquiryReceipt::received()))
}

/// Decode the body as JSON. A missing `Content-Type` is read as JSON; any
/// other non-JSON media type is rejected.
fn parse_inquiry(headers: &HeaderMap, body: &[u8]) -> Result<Inquiry> {
    if let Some(content_type) = headers.get(header::CONTENT_TYPE) {
        let is_json = content_type
            .to_str()
            .map(|ct| ct.to_ascii_lowercase().contains("json"))
            .unwrap_or(false);
        if !is_json {
            return Err(ApiError::Validation(
                "Expected request with `Content-Type: application/json`".to_string(),
            ));
        }
    }

    serde_json::from_slice(body).map_err(|e| ApiError::Validation(e.to_string()))
}
