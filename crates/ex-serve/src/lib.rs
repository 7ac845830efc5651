pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod sse;

use axum::Router;
use ex_core::booking::PaymentGateway;
use ex_core::dashboard::TicketLedger;
use ex_core::{Catalog, SessionStore};
use ex_db::SqliteStorage;
use ex_events::bus::NotificationBus;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Mutex;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub type SharedSession = Arc<Mutex<SessionStore<SqliteStorage>>>;

#[derive(Clone)]
pub struct AppState {
    pub catalog: Catalog,
    pub session: SharedSession,
    pub tickets: Arc<Mutex<TicketLedger>>,
    pub payments: PaymentGateway,
    pub notifications: NotificationBus,
}

impl AppState {
    pub fn new(
        catalog: Catalog,
        session: SessionStore<SqliteStorage>,
        payments: PaymentGateway,
        notifications: NotificationBus,
    ) -> Self {
        Self {
            catalog,
            session: Arc::new(Mutex::new(session)),
            tickets: Arc::new(Mutex::new(TicketLedger::new())),
            payments,
            notifications,
        }
    }
}

pub fn app(state: AppState) -> Router {
    routes::router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

pub async fn serve(state: AppState, addr: std::net::SocketAddr) -> Result<(), std::io::Error> {
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, events = state.catalog.len(), "listening");
    axum::serve(listener, app(state)).await
}
