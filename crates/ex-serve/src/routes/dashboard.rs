use crate::middleware::correlation::CorrelationId;
use crate::routes::error::error_response;
use crate::AppState;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Extension, Json, Router};
use ex_core::dashboard::Dashboard;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/dashboard", get(get_dashboard))
        .with_state(state)
}

#[utoipa::path(
    get,
    path = "/api/dashboard",
    responses((status = 200, body = Dashboard), (status = 401))
)]
pub(crate) async fn get_dashboard(
    State(state): State<AppState>,
    Extension(correlation): Extension<CorrelationId>,
) -> Response {
    let identity = match state.session.lock().await.require_authenticated() {
        Ok(identity) => identity.clone(),
        Err(err) => return error_response(err, Some(correlation.0)),
    };
    let tickets = state.tickets.lock().await;
    Json(Dashboard::build(&identity, &state.catalog, &tickets)).into_response()
}
