//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod health;
pub mod links;
pub mod redirect;

pub use health::health_handler;
pub use links::{delete_link_handler, list_links_handler, shorten_handler};
pub use redirect::redirect_handler;
