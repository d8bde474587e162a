use axum::{http::HeaderValue, middleware, routing::get, Router};
use std::{sync::Arc, time::Duration};
use tower::ServiceBuilder;
use tower_http::{
    catch_panic::CatchPanicLayer,
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{
    config::CorsConfig,
    error,
    middleware::logging,
    routes::{docs, forum, health},
    state::AppState,
};

pub fn build_router(state: Arc<AppState>) -> Router {
    let api_routes = Router::new()
        .route("/forum", get(forum::get_forum_threads))
        .route("/health", get(health::health_check));

    let request_timeout = Duration::from_secs(state.config.server.request_timeout_secs);

    Router::new()
        .nest("/api", api_routes)
        .route("/openapi.json", get(docs::openapi_json))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors_layer(&state.config.cors))
                .layer(CompressionLayer::new())
                .layer(TimeoutLayer::new(request_timeout))
                .layer(middleware::from_fn(logging::log_request))
                .layer(CatchPanicLayer::custom(error::handle_panic)),
        )
        .with_state(state)
}

/// Any method and header; origins from config, `*` meaning any.
///
/// Credentials are never allowed: browsers reject them alongside a wildcard origin.
pub fn build_cors_layer(config: &CorsConfig) -> CorsLayer {
    if !config.enabled {
        return CorsLayer::new();
    }

    let cors = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if config.origins.iter().any(|o| o == "*") {
        cors.allow_origin(Any)
    } else {
        let parsed_origins: Vec<HeaderValue> = config
            .origins
            .iter()
            .filter_map(|o| match o.parse::<HeaderValue>() {
                Ok(origin) => Some(origin),
                Err(_) => {
                    tracing::warn!("Ignoring invalid CORS origin: {}", o);
                    None
                }
            })
            .collect();

        cors.allow_origin(parsed_origins)
    }
}
