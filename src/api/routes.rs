//! API route configuration.

use crate::api::handlers::{delete_link_handler, list_links_handler, shorten_handler};
use crate::state::AppState;
use axum::{
    Router,
    routing::{delete, get, post},
};

/// All REST routes, nested under `/api`.
///
/// # Endpoints
///
/// - `POST   /shorten`            - Create a short link
/// - `GET    /urls`               - List all links, newest first
/// - `DELETE /urls/{identifier}`  - Delete a link by id or short code
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/shorten", post(shorten_handler))
        .route("/urls", get(list_links_handler))
        .route("/urls/{identifier}", delete(delete_link_handler))
}
