use crate::middleware::correlation::CorrelationId;
use crate::routes::error::error_response;
use crate::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Extension, Json, Router};
use ex_core::drafts::draft_event_and_notify;
use ex_core::types::event::EventRecord;
use ex_core::types::io::CreateEventInput;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/drafts", post(create_draft))
        .with_state(state)
}

/// Validates an organizer's new event. The catalog is not modified.
#[utoipa::path(
    post,
    path = "/api/drafts",
    request_body = CreateEventInput,
    responses((status = 201, body = EventRecord), (status = 400), (status = 403))
)]
pub(crate) async fn create_draft(
    State(state): State<AppState>,
    Extension(correlation): Extension<CorrelationId>,
    Json(input): Json<CreateEventInput>,
) -> Response {
    let identity = state.session.lock().await.current().cloned();
    match draft_event_and_notify(
        identity.as_ref(),
        &input,
        &state.notifications,
        Some(correlation.0.clone()),
    ) {
        Ok(draft) => (StatusCode::CREATED, Json(draft)).into_response(),
        Err(err) => error_response(err, Some(correlation.0)),
    }
}
