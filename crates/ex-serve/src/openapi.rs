use utoipa::OpenApi;

use crate::routes::error::ErrorEnvelope;
use crate::routes::events::{BookingRequest, Facets, PriceBucketOption, QuoteQuery, QuoteView};
use crate::routes::past_events::PastEventView;
use crate::routes::session::SessionView;
use axum::response::{Html, IntoResponse};
use axum::routing::get;
use axum::{Json, Router};
use ex_core::dashboard::{
    CreatedEventStats, Dashboard, OrganizerDashboard, StudentDashboard, TicketLine,
};
use ex_core::metrics::{EventListing, EventMetrics, RevenueShare};
use ex_core::types::criteria::RawFilter;
use ex_core::types::enums::{AvailabilityTier, PriceBucket, Role, TicketStatus, TierColor};
use ex_core::types::event::{EventRecord, Seats};
use ex_core::types::identity::SessionIdentity;
use ex_core::types::ids::{EventId, OrganizerId, PastEventId, TicketId, UserId};
use ex_core::types::io::{
    ChangePasswordInput, CreateEventInput, FieldError, LoginInput, RegisterInput,
    RegistrationForm, UpdateProfileInput,
};
use ex_core::types::past_event::{PastEvent, Testimonial};
use ex_core::types::ticket::{BookingQuote, Ticket};
use ex_events::types::{Notification, NotificationKind};

#[derive(OpenApi)]
#[openapi(
    info(title = "EventX API", description = "College event discovery and booking"),
    paths(
        crate::routes::events::list_events,
        crate::routes::events::featured,
        crate::routes::events::facets,
        crate::routes::events::get_event,
        crate::routes::events::get_quote,
        crate::routes::events::book,
        crate::routes::past_events::list_past_events,
        crate::routes::past_events::get_past_event,
        crate::routes::session::get_session,
        crate::routes::session::login,
        crate::routes::session::register,
        crate::routes::session::logout,
        crate::routes::session::update_profile,
        crate::routes::session::change_password,
        crate::routes::dashboard::get_dashboard,
        crate::routes::drafts::create_draft,
        crate::routes::notifications::subscribe,
        crate::routes::notifications::stream
    ),
    components(schemas(
        EventRecord,
        Seats,
        EventListing,
        EventMetrics,
        Facets,
        PriceBucketOption,
        RawFilter,
        QuoteQuery,
        QuoteView,
        BookingQuote,
        BookingRequest,
        RegistrationForm,
        Ticket,
        PastEvent,
        PastEventView,
        Testimonial,
        SessionIdentity,
        SessionView,
        LoginInput,
        RegisterInput,
        UpdateProfileInput,
        ChangePasswordInput,
        CreateEventInput,
        Dashboard,
        StudentDashboard,
        OrganizerDashboard,
        TicketLine,
        CreatedEventStats,
        RevenueShare,
        Notification,
        NotificationKind,
        ErrorEnvelope,
        FieldError,
        EventId,
        PastEventId,
        OrganizerId,
        UserId,
        TicketId,
        Role,
        PriceBucket,
        AvailabilityTier,
        TierColor,
        TicketStatus
    ))
)]
struct ApiDoc;

pub fn generate_spec() -> String {
    ApiDoc::openapi()
        .to_pretty_json()
        .unwrap_or_else(|_| "{}".to_string())
}

pub fn router() -> Router {
    Router::new()
        .route("/openapi.json", get(openapi_json))
        .route("/docs", get(swagger_ui))
}

async fn openapi_json() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}

async fn swagger_ui() -> impl IntoResponse {
    Html(
        r#"<!doctype html>
<html lang="en">
  <head>
    <meta charset="utf-8">
    <title>EventX API Docs</title>
    <link rel="stylesheet" href="https://unpkg.com/swagger-ui-dist@5/swagger-ui.css">
  </head>
  <body>
    <div id="swagger-ui"></div>
    <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-bundle.js"></script>
    <script>
      window.ui = SwaggerUIBundle({ url: '/api/openapi.json', dom_id: '#swagger-ui' });
    </script>
  </body>
</html>
"#,
    )
}
