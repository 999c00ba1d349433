//! HTTP request/response tracing middleware.

use axum::extract::MatchedPath;
use axum::http::Request;
use tower_http::LatencyUnit;
use tower_http::classify::{ServerErrorsAsFailures, SharedClassifier};
use tower_http::trace::{DefaultOnFailure, DefaultOnResponse, MakeSpan, TraceLayer};
use tracing::{Level, Span};

/// Builds one `http_request` span per request.
///
/// The span records the matched route (`/{code}`, `/api/urls/{identifier}`)
/// rather than the raw path so short codes do not explode log cardinality;
/// the raw path is kept in `uri`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RouteSpan;

impl<B> MakeSpan<B> for RouteSpan {
    fn make_span(&mut self, request: &Request<B>) -> Span {
        let route = request
            .extensions()
            .get::<MatchedPath>()
            .map(MatchedPath::as_str)
            .unwrap_or("<unmatched>");

        tracing::info_span!(
            "http_request",
            method = %request.method(),
            route,
            uri = %request.uri(),
        )
    }
}

/// Creates the tracing layer applied to the whole router.
///
/// # Example Logs
///
/// ```text
/// INFO http_request{method=GET route=/{code} uri=/aZ3kq9x}: finished processing request latency=2 ms status=302
/// ERROR http_request{method=GET route=/api/urls uri=/api/urls}: response failed classification=Status code: 500 Internal Server Error latency=4 ms
/// ```
pub fn layer() -> TraceLayer<SharedClassifier<ServerErrorsAsFailures>, RouteSpan> {
    TraceLayer::new_for_http()
        .make_span_with(RouteSpan)
        .on_response(
            DefaultOnResponse::new()
                .level(Level::INFO)
                .latency_unit(LatencyUnit::Millis),
        )
        .on_failure(
            DefaultOnFailure::new()
                .level(Level::ERROR)
                .latency_unit(LatencyUnit::Millis),
        )
}
