use crate::middleware::correlation::CorrelationId;
use crate::routes::error::error_response;
use crate::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Extension, Json, Router};
use ex_core::error::SessionError;
use ex_core::sessions::{has_login_credentials, has_register_fields};
use ex_core::types::identity::SessionIdentity;
use ex_core::types::io::{ChangePasswordInput, LoginInput, RegisterInput, UpdateProfileInput};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct SessionView {
    pub authenticated: bool,
    pub identity: Option<SessionIdentity>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/session", get(get_session))
        .route("/session/login", post(login))
        .route("/session/register", post(register))
        .route("/session/logout", post(logout))
        .route("/session/profile", put(update_profile))
        .route("/session/password", post(change_password))
        .with_state(state)
}

// The simulated auth round trip runs outside the session lock.
async fn wait_for_auth(state: &AppState) {
    let delay = state.session.lock().await.auth_delay();
    tokio::time::sleep(delay).await;
}

fn missing_credentials() -> SessionError {
    SessionError::InvalidInput {
        message: "please fill in all fields".to_string(),
    }
}

#[utoipa::path(
    get,
    path = "/api/session",
    responses((status = 200, body = SessionView))
)]
pub(crate) async fn get_session(State(state): State<AppState>) -> Response {
    let session = state.session.lock().await;
    Json(SessionView {
        authenticated: session.is_authenticated(),
        identity: session.current().cloned(),
    })
    .into_response()
}

#[utoipa::path(
    post,
    path = "/api/session/login",
    request_body = LoginInput,
    responses((status = 200, body = SessionIdentity), (status = 400))
)]
pub(crate) async fn login(
    State(state): State<AppState>,
    Extension(correlation): Extension<CorrelationId>,
    Json(input): Json<LoginInput>,
) -> Response {
    if has_login_credentials(&input.email, &input.password) {
        wait_for_auth(&state).await;
    }
    let result = state
        .session
        .lock()
        .await
        .complete_login(&input.email, &input.password);
    match result {
        Ok(Some(identity)) => Json(identity).into_response(),
        Ok(None) => error_response(missing_credentials(), Some(correlation.0)),
        Err(err) => error_response(err, Some(correlation.0)),
    }
}

#[utoipa::path(
    post,
    path = "/api/session/register",
    request_body = RegisterInput,
    responses((status = 201, body = SessionIdentity), (status = 400))
)]
pub(crate) async fn register(
    State(state): State<AppState>,
    Extension(correlation): Extension<CorrelationId>,
    Json(input): Json<RegisterInput>,
) -> Response {
    if has_register_fields(&input) {
        wait_for_auth(&state).await;
    }
    let result = state.session.lock().await.complete_register(&input);
    match result {
        Ok(Some(identity)) => (StatusCode::CREATED, Json(identity)).into_response(),
        Ok(None) => error_response(missing_credentials(), Some(correlation.0)),
        Err(err) => error_response(err, Some(correlation.0)),
    }
}

#[utoipa::path(
    post,
    path = "/api/session/logout",
    responses((status = 204))
)]
pub(crate) async fn logout(
    State(state): State<AppState>,
    Extension(correlation): Extension<CorrelationId>,
) -> Response {
    match state.session.lock().await.logout() {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => error_response(err, Some(correlation.0)),
    }
}

#[utoipa::path(
    put,
    path = "/api/session/profile",
    request_body = UpdateProfileInput,
    responses((status = 200, body = SessionIdentity), (status = 401))
)]
pub(crate) async fn update_profile(
    State(state): State<AppState>,
    Extension(correlation): Extension<CorrelationId>,
    Json(input): Json<UpdateProfileInput>,
) -> Response {
    match state.session.lock().await.update_profile(&input) {
        Ok(identity) => Json(identity).into_response(),
        Err(err) => error_response(err, Some(correlation.0)),
    }
}

#[utoipa::path(
    post,
    path = "/api/session/password",
    request_body = ChangePasswordInput,
    responses((status = 204), (status = 400), (status = 401))
)]
pub(crate) async fn change_password(
    State(state): State<AppState>,
    Extension(correlation): Extension<CorrelationId>,
    Json(input): Json<ChangePasswordInput>,
) -> Response {
    match state.session.lock().await.change_password(&input) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => error_response(err, Some(correlation.0)),
    }
}
