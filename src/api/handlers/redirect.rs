//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
};

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its original URL and counts the visit.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// Registered with the lowest priority: `/health` and everything under
/// `/api` are matched before this wildcard.
///
/// # Request Flow
///
/// 1. Look up the link by short code
/// 2. Atomically increment `clicks` and set `lastClicked`
/// 3. Return 302 Found with `Location` set to the stored long URL
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let link = state.link_service.follow_link(&code).await?;

    Ok((StatusCode::FOUND, [(header::LOCATION, link.long_url)]))
}
