//! CORS handling for the admin API.
//!
//! Every response, including errors and preflights, carries the same three
//! permissive headers. Any `OPTIONS` request is answered with `204 No
//! Content` before routing.

use axum::{
    Router,
    extract::Request,
    http::{HeaderValue, Method, StatusCode, header},
    middleware::{self, Next},
    response::{IntoResponse, Response},
};
use tower_http::set_header::SetResponseHeaderLayer;

/// `Access-Control-Allow-Origin` value.
pub const ALLOW_ORIGIN: &str = "*";

/// `Access-Control-Allow-Headers` value.
pub const ALLOW_HEADERS: &str = "Content-Type, Authorization";

/// `Access-Control-Allow-Methods` value.
pub const ALLOW_METHODS: &str = "GET, POST, OPTIONS";

/// Answer any `OPTIONS` request with an empty `204`.
pub async fn preflight(request: Request, next: Next) -> Response {
    if request.method() == Method::OPTIONS {
        return StatusCode::NO_CONTENT.into_response();
    }
    next.run(request).await
}

/// Wrap `router` with the preflight handler and CORS response headers.
///
/// Apply after all routes and fallbacks are registered.
#[must_use]
pub fn with_cors(router: Router) -> Router {
    router
        .layer(middleware::from_fn(preflight))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static(ALLOW_ORIGIN),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static(ALLOW_HEADERS),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(ALLOW_METHODS),
        ))
}
