use crate::AppState;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use ex_events::types::Notification;
use futures::{Sink, SinkExt};
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::RecvError;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/notifications/subscribe", get(subscribe))
        .route("/notifications/stream", get(stream))
        .with_state(state)
}

#[utoipa::path(
    get,
    path = "/api/notifications/subscribe",
    responses((status = 200, description = "Server-sent notification stream"))
)]
pub(crate) async fn subscribe(State(state): State<AppState>) -> Response {
    crate::sse::subscribe(&state)
}

#[utoipa::path(
    get,
    path = "/api/notifications/stream",
    responses((status = 101, description = "WebSocket notification stream"))
)]
pub(crate) async fn stream(ws: WebSocketUpgrade, State(state): State<AppState>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_stream(socket, state))
}

async fn handle_stream(socket: WebSocket, state: AppState) {
    forward(state.notifications.subscribe(), socket).await;
}

// Lagged messages are skipped like the SSE stream; stops when the bus closes
// or the peer goes away.
async fn forward<S>(mut receiver: broadcast::Receiver<Notification>, sink: S)
where
    S: Sink<Message>,
{
    let mut sink = std::pin::pin!(sink);
    loop {
        let notification = match receiver.recv().await {
            Ok(notification) => notification,
            Err(RecvError::Lagged(skipped)) => {
                tracing::debug!(skipped, "notification stream lagged");
                continue;
            }
            Err(RecvError::Closed) => break,
        };
        let json = serde_json::to_string(&notification).unwrap_or_else(|_| "{}".to_string());
        if sink.send(Message::Text(json.into())).await.is_err() {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::forward;
    use crate::test_support::{send_raw, state};
    use axum::http::{Method, StatusCode};
    use ex_events::bus::NotificationBus;
    use ex_events::types::{Notification, NotificationKind};
    use axum::extract::ws::Message;
    use futures::channel::mpsc;
    use futures::StreamExt;
    use serde_json::Value;
    use std::time::Duration;

    #[tokio::test]
    async fn test_subscribe_is_event_stream() {
        let state = state();
        let response = send_raw(&state, Method::GET, "/api/notifications/subscribe", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response.headers()["content-type"].to_str().unwrap();
        assert!(content_type.starts_with("text/event-stream"));
    }

    fn titles(messages: Vec<Message>) -> Vec<String> {
        messages
            .into_iter()
            .map(|message| match message {
                Message::Text(text) => {
                    let value: Value = serde_json::from_str(text.as_str()).unwrap();
                    value["title"].as_str().unwrap().to_string()
                }
                other => panic!("unexpected frame: {other:?}"),
            })
            .collect()
    }

    #[tokio::test]
    async fn test_stream_skips_lagged_messages_until_bus_closes() {
        let bus = NotificationBus::new(2);
        let receiver = bus.subscribe();
        for n in 0..4 {
            bus.publish(Notification::new(NotificationKind::SignedIn, format!("n{n}"), ""))
                .unwrap();
        }
        drop(bus);

        let (tx, rx) = mpsc::unbounded::<Message>();
        forward(receiver, tx).await;
        let received: Vec<Message> = rx.collect().await;
        assert_eq!(titles(received), vec!["n2", "n3"]);
    }

    #[tokio::test]
    async fn test_stream_stops_when_peer_is_gone() {
        let bus = NotificationBus::new(8);
        let receiver = bus.subscribe();
        bus.publish(Notification::new(NotificationKind::SignedOut, "bye", ""))
            .unwrap();
        let (tx, rx) = mpsc::unbounded::<Message>();
        drop(rx);
        let finished = tokio::time::timeout(Duration::from_secs(1), forward(receiver, tx)).await;
        assert!(finished.is_ok());
    }
}
