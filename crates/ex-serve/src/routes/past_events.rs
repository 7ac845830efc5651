use crate::middleware::correlation::CorrelationId;
use crate::routes::error::error_response;
use crate::AppState;
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Extension, Json, Router};
use ex_core::format::format_date;
use ex_core::metrics::rounded_percentage;
use ex_core::types::past_event::PastEvent;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct PastEventView {
    pub event: PastEvent,
    pub date_label: String,
    pub attendance_percentage: u32,
}

impl PastEventView {
    fn new(event: &PastEvent) -> Self {
        Self {
            date_label: format_date(event.date),
            attendance_percentage: rounded_percentage(event.attendance_percentage()),
            event: event.clone(),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/past-events", get(list_past_events))
        .route("/past-events/{id}", get(get_past_event))
        .with_state(state)
}

#[utoipa::path(
    get,
    path = "/api/past-events",
    responses((status = 200, body = Vec<PastEventView>))
)]
pub(crate) async fn list_past_events(State(state): State<AppState>) -> Response {
    let views: Vec<PastEventView> = state
        .catalog
        .past_events()
        .iter()
        .map(PastEventView::new)
        .collect();
    Json(views).into_response()
}

#[utoipa::path(
    get,
    path = "/api/past-events/{id}",
    params(("id" = String, Path, description = "Past event ID")),
    responses((status = 200, body = PastEventView), (status = 404))
)]
pub(crate) async fn get_past_event(
    State(state): State<AppState>,
    Extension(correlation): Extension<CorrelationId>,
    Path(id): Path<String>,
) -> Response {
    match state.catalog.find_past_event(&id) {
        Ok(event) => Json(PastEventView::new(event)).into_response(),
        Err(err) => error_response(err, Some(correlation.0)),
    }
}
