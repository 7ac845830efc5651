pub mod dashboard;
pub mod drafts;
pub mod error;
pub mod events;
pub mod notifications;
pub mod past_events;
pub mod session;

use crate::middleware::correlation::correlation_middleware;
use crate::{openapi, AppState};
use axum::middleware;
use axum::Router;

pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .merge(events::router(state.clone()))
        .merge(past_events::router(state.clone()))
        .merge(session::router(state.clone()))
        .merge(dashboard::router(state.clone()))
        .merge(drafts::router(state.clone()))
        .merge(notifications::router(state))
        .merge(openapi::router())
        .route_layer(middleware::from_fn(correlation_middleware));

    Router::new().nest("/api", api)
}

#[cfg(test)]
mod tests {
    use crate::middleware::correlation::HEADER_NAME;
    use crate::test_support::state;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_correlation_header_is_echoed() {
        let request = Request::builder()
            .uri("/api/events")
            .header(HEADER_NAME, "corr_fixed")
            .body(Body::empty())
            .unwrap();
        let response = crate::app(state()).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[HEADER_NAME], "corr_fixed");
    }

    #[tokio::test]
    async fn test_correlation_header_is_minted() {
        let request = Request::builder()
            .uri("/api/events/facets")
            .body(Body::empty())
            .unwrap();
        let response = crate::app(state()).oneshot(request).await.unwrap();
        let id = response.headers()[HEADER_NAME].to_str().unwrap();
        assert!(id.starts_with("corr_"));
    }
}
