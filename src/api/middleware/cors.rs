//! Cross-origin policy for the browser client.

use axum::http::{HeaderValue, Method, header};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

/// Creates the CORS layer.
///
/// `allowed_origin` of `None` or `"*"` allows any origin. Any other value is
/// used as the single allowed origin; an unparsable value falls back to any
/// origin with a warning.
pub fn layer(allowed_origin: Option<&str>) -> CorsLayer {
    let origin = match allowed_origin {
        None | Some("*") => AllowOrigin::from(Any),
        Some(origin) => match HeaderValue::from_str(origin) {
            Ok(value) => AllowOrigin::exact(value),
            Err(_) => {
                tracing::warn!(origin, "Invalid CORS_ALLOWED_ORIGIN, allowing any origin");
                AllowOrigin::from(Any)
            }
        },
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
}
