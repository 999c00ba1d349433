//! Handlers for link management endpoints (create, list, delete).

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::link::{DeleteResponse, LinkResponse, ShortenRequest};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a shortened URL.
///
/// # Endpoint
///
/// `POST /api/shorten`
///
/// # Request Body
///
/// ```json
/// {
///   "longUrl": "https://example.com/a/b/c",
///   "customCode": "my-link"   // optional
/// }
/// ```
///
/// # Response
///
/// `201 Created` with the stored link:
///
/// ```json
/// {
///   "id": 1,
///   "longUrl": "https://example.com/a/b/c",
///   "shortCode": "aZ3kq9x",
///   "clicks": 0,
///   "createdAt": "2025-01-01T00:00:00Z",
///   "lastClicked": null
/// }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request if `longUrl` is missing or invalid, if the custom
/// code is invalid, or if the code is already in use.
pub async fn shorten_handler(
    State(state): State<AppState>,
    payload: Result<Json<ShortenRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<LinkResponse>), AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let long_url = payload.long_url.unwrap_or_default();

    let link = state
        .link_service
        .create_link(&long_url, payload.custom_code.as_deref())
        .await?;

    Ok((StatusCode::CREATED, Json(link.into())))
}

/// Lists every link, newest first.
///
/// # Endpoint
///
/// `GET /api/urls`
///
/// No pagination: the full set is returned as a JSON array.
pub async fn list_links_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<LinkResponse>>, AppError> {
    let links = state.link_service.list_links().await?;

    Ok(Json(links.into_iter().map(LinkResponse::from).collect()))
}

/// Deletes a link by storage id or short code.
///
/// # Endpoint
///
/// `DELETE /api/urls/{identifier}`
///
/// # Behavior
///
/// A positive integer identifier is first tried as an id; on a miss, and for
/// every other identifier, it is tried as a short code. The row is removed
/// permanently.
///
/// # Errors
///
/// Returns 404 Not Found if neither lookup matched.
pub async fn delete_link_handler(
    Path(identifier): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<DeleteResponse>, AppError> {
    state.link_service.delete_link(&identifier).await?;

    Ok(Json(DeleteResponse {
        message: "URL deleted successfully".to_string(),
    }))
}
