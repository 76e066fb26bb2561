use axum::{
    extract::State,
    http::StatusCode,
    response::Html,
    Form,
};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, warn};

use hp_inference::estimate;

use crate::render::{self, Notice};
use crate::AppState;

pub async fn show_form(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(render::page(&state.collector, &HashMap::new(), None))
}

pub async fn submit_estimate(
    State(state): State<Arc<AppState>>,
    Form(raw): Form<HashMap<String, String>>,
) -> (StatusCode, Html<String>) {
    let record = match state.collector.collect(&raw) {
        Ok(record) => record,
        Err(e) => {
            warn!("Rejected form submission: {}", e);
            let notice = Notice::Error(e.to_string());
            return (
                StatusCode::UNPROCESSABLE_ENTITY,
                Html(render::page(&state.collector, &raw, Some(&notice))),
            );
        }
    };

    let notice = match estimate(state.model.as_ref(), &record) {
        Ok(estimate) => {
            info!("💰 {}", estimate.message());
            Notice::Success(estimate.message())
        }
        Err(failure) => Notice::Error(failure.to_string()),
    };
    (StatusCode::OK, Html(render::page(&state.collector, &raw, Some(&notice))))
}

pub async fn health(State(state): State<Arc<AppState>>) -> String {
    format!("ok ({})", state.model.name())
}
