use crate::AppState;
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::response::{IntoResponse, Response};
use futures::stream::StreamExt;
use tokio_stream::wrappers::BroadcastStream;

pub fn subscribe(state: &AppState) -> Response {
    let stream = BroadcastStream::new(state.notifications.subscribe()).filter_map(|item| async {
        match item {
            Ok(notification) => {
                let json = serde_json::to_string(&notification).unwrap_or_else(|_| "{}".to_string());
                Some(Ok::<Event, std::convert::Infallible>(
                    Event::default().event("notification").data(json),
                ))
            }
            Err(err) => {
                tracing::debug!(error = %err, "notification subscriber lagged");
                None
            }
        }
    });
    Sse::new(stream)
        .keep_alive(KeepAlive::default())
        .into_response()
}
