//! Axum router wiring.
//!
//! Every route, including the fallback, runs behind the error pipeline.

use axum::{middleware, routing::get, Router};

use crate::{app_state::AppState, handlers, pipeline};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(handlers::healthz))
        .route("/v1/boom", get(handlers::boom))
        .route("/v1/forbidden", get(handlers::forbidden))
        .route("/v1/unauthorized", get(handlers::unauthorized))
        .route("/v1/api/boom", get(handlers::api_boom))
        .fallback(handlers::not_found)
        .layer(middleware::from_fn_with_state(state.clone(), pipeline::error_pipeline))
        .with_state(state)
}
