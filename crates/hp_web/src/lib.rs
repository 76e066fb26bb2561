use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub mod handlers;
pub mod render;
pub mod state;

pub use state::AppState;

pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::show_form).post(handlers::submit_estimate))
        .route("/health", get(handlers::health))
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

pub mod prelude {
    pub use hp_core::{FeatureRecord, Result, Error};
    pub use crate::{create_app, AppState};
}
