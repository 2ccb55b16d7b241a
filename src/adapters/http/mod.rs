//! HTTP adapters - REST API implementations.
//!
//! The counseling endpoints are mounted at the root, wrapped in request
//! tracing and CORS.

pub mod counseling;

use axum::http::HeaderValue;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use counseling::{counseling_routes, CounselingHandlers};

/// Builds the application router.
///
/// An empty `cors_origins` list allows any origin.
pub fn app_router(handlers: CounselingHandlers, cors_origins: &[String]) -> Router {
    counseling_routes(handlers)
        .layer(cors_layer(cors_origins))
        .layer(TraceLayer::new_for_http())
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    if allowed.is_empty() {
        layer.allow_origin(Any)
    } else {
        layer.allow_origin(allowed)
    }
}
