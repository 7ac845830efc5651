use crate::middleware::correlation::CorrelationId;
use crate::routes::error::error_response;
use crate::AppState;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use ex_core::booking::{payment_prompt, quote};
use ex_core::error::{CatalogError, StorefrontError};
use ex_core::metrics::{listings, EventListing};
use ex_core::types::criteria::{FilterCriteria, RawFilter};
use ex_core::types::enums::PriceBucket;
use ex_core::types::event::EventRecord;
use ex_core::types::io::RegistrationForm;
use ex_core::types::ticket::{BookingQuote, Ticket};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Serialize, ToSchema)]
pub struct PriceBucketOption {
    pub value: PriceBucket,
    pub label: &'static str,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct Facets {
    pub categories: Vec<String>,
    pub colleges: Vec<String>,
    pub price_buckets: Vec<PriceBucketOption>,
}

#[derive(Debug, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct QuoteQuery {
    pub quantity: Option<u32>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct QuoteView {
    pub quote: BookingQuote,
    pub prompt: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct BookingRequest {
    pub form: RegistrationForm,
    pub quantity: u32,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/events", get(list_events))
        .route("/events/featured", get(featured))
        .route("/events/facets", get(facets))
        .route("/events/{id}", get(get_event))
        .route("/events/{id}/quote", get(get_quote))
        .route("/events/{id}/bookings", post(book))
        .with_state(state)
}

fn lookup<'a>(state: &'a AppState, id: &str) -> Result<&'a EventRecord, StorefrontError> {
    state.catalog.find(id).ok_or_else(|| {
        CatalogError::EventNotFound {
            id: id.to_string(),
        }
        .into()
    })
}

#[utoipa::path(
    get,
    path = "/api/events",
    params(RawFilter),
    responses((status = 200, body = Vec<EventListing>))
)]
pub(crate) async fn list_events(
    State(state): State<AppState>,
    Query(query): Query<RawFilter>,
) -> Response {
    let criteria = FilterCriteria::from(query);
    let events = state.catalog.filter(&criteria);
    tracing::debug!(
        matched = events.len(),
        unconstrained = criteria.is_unconstrained(),
        "filtered catalog"
    );
    Json(listings(events)).into_response()
}

#[utoipa::path(
    get,
    path = "/api/events/featured",
    responses((status = 200, body = Vec<EventListing>))
)]
pub(crate) async fn featured(State(state): State<AppState>) -> Response {
    let events = state.catalog.featured().cloned().collect();
    Json(listings(events)).into_response()
}

#[utoipa::path(
    get,
    path = "/api/events/facets",
    responses((status = 200, body = Facets))
)]
pub(crate) async fn facets(State(state): State<AppState>) -> Response {
    let owned = |values: Vec<&str>| values.into_iter().map(str::to_string).collect();
    Json(Facets {
        categories: owned(state.catalog.categories()),
        colleges: owned(state.catalog.colleges()),
        price_buckets: PriceBucket::ALL
            .into_iter()
            .map(|bucket| PriceBucketOption {
                value: bucket,
                label: bucket.label(),
            })
            .collect(),
    })
    .into_response()
}

#[utoipa::path(
    get,
    path = "/api/events/{id}",
    params(("id" = String, Path, description = "Event ID")),
    responses((status = 200, body = EventListing), (status = 404))
)]
pub(crate) async fn get_event(
    State(state): State<AppState>,
    Extension(correlation): Extension<CorrelationId>,
    Path(id): Path<String>,
) -> Response {
    match lookup(&state, &id) {
        Ok(event) => Json(EventListing::new(event.clone())).into_response(),
        Err(err) => error_response(err, Some(correlation.0)),
    }
}

#[utoipa::path(
    get,
    path = "/api/events/{id}/quote",
    params(("id" = String, Path, description = "Event ID"), QuoteQuery),
    responses((status = 200, body = QuoteView), (status = 409))
)]
pub(crate) async fn get_quote(
    State(state): State<AppState>,
    Extension(correlation): Extension<CorrelationId>,
    Path(id): Path<String>,
    Query(query): Query<QuoteQuery>,
) -> Response {
    let result = lookup(&state, &id).and_then(|event| {
        let quote = quote(event, query.quantity.unwrap_or(1))?;
        Ok(QuoteView {
            prompt: payment_prompt(&quote),
            quote,
        })
    });
    match result {
        Ok(view) => Json(view).into_response(),
        Err(err) => error_response(err, Some(correlation.0)),
    }
}

#[utoipa::path(
    post,
    path = "/api/events/{id}/bookings",
    params(("id" = String, Path, description = "Event ID")),
    request_body = BookingRequest,
    responses((status = 201, body = Ticket), (status = 401), (status = 422))
)]
pub(crate) async fn book(
    State(state): State<AppState>,
    Extension(correlation): Extension<CorrelationId>,
    Path(id): Path<String>,
    Json(input): Json<BookingRequest>,
) -> Response {
    let holder = {
        let session = state.session.lock().await;
        match session.require_authenticated() {
            Ok(identity) => identity.clone(),
            Err(err) => return error_response(err, Some(correlation.0)),
        }
    };
    let event = match lookup(&state, &id) {
        Ok(event) => event.clone(),
        Err(err) => return error_response(err, Some(correlation.0)),
    };

    let ticket = match state
        .payments
        .confirm(
            &holder,
            &event,
            &input.form,
            input.quantity,
            Some(correlation.0.clone()),
        )
        .await
    {
        Ok(ticket) => ticket,
        Err(err) => return error_response(err, Some(correlation.0)),
    };
    state.tickets.lock().await.record(ticket.clone());
    (StatusCode::CREATED, Json(ticket)).into_response()
}

#[cfg(test)]
mod tests {
    use crate::test_support::{send, sign_in, state};
    use axum::http::{Method, StatusCode};
    use serde_json::json;

    #[tokio::test]
    async fn test_list_events_with_filters() {
        let state = state();
        let (status, body) = send(&state, Method::GET, "/api/events", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 6);

        let (_, body) = send(
            &state,
            Method::GET,
            "/api/events?category=Technical&college=all&price=500to1000",
            None,
        )
        .await;
        let listings = body.as_array().unwrap();
        assert_eq!(listings.len(), 1);
        assert_eq!(listings[0]["event"]["title"], "Robotics Workshop");
        assert_eq!(listings[0]["metrics"]["tier"], "medium");
        assert_eq!(listings[0]["metrics"]["price_label"], "₹799");
    }

    #[tokio::test]
    async fn test_search_query() {
        let state = state();
        let (_, body) = send(&state, Method::GET, "/api/events?search=TECH", None).await;
        let listings = body.as_array().unwrap();
        assert_eq!(listings.len(), 1);
        assert_eq!(listings[0]["event"]["id"], "event-1");
    }

    #[tokio::test]
    async fn test_get_event_and_missing() {
        let state = state();
        let (status, body) = send(&state, Method::GET, "/api/events/event-1", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["metrics"]["availability_percentage"], 65.0);
        assert_eq!(body["metrics"]["color"], "green");

        let (status, body) = send(&state, Method::GET, "/api/events/event-99", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "not_found");
        assert!(body["correlation_id"].as_str().unwrap().starts_with("corr_"));
    }

    #[tokio::test]
    async fn test_facets() {
        let state = state();
        let (_, body) = send(&state, Method::GET, "/api/events/facets", None).await;
        assert_eq!(body["categories"][0], "Technical");
        assert_eq!(body["price_buckets"].as_array().unwrap().len(), 4);
        assert_eq!(body["price_buckets"][1]["value"], "under500");
    }

    #[tokio::test]
    async fn test_quote_endpoint() {
        let state = state();
        let (status, body) =
            send(&state, Method::GET, "/api/events/event-4/quote?quantity=2", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["quote"]["total"], 1598.0);

        let (status, body) =
            send(&state, Method::GET, "/api/events/event-4/quote?quantity=16", None).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["code"], "conflict");
    }

    #[tokio::test]
    async fn test_booking_requires_sign_in() {
        let state = state();
        let request = json!({
            "form": { "name": "Asha", "email": "asha@college.edu", "phone": "9876543210", "college": "IIT Delhi" },
            "quantity": 1
        });
        let (status, body) =
            send(&state, Method::POST, "/api/events/event-1/bookings", Some(request)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["code"], "unauthenticated");
    }

    #[tokio::test]
    async fn test_booking_records_ticket() {
        let state = state();
        sign_in(&state, "asha@college.edu").await;
        let request = json!({
            "form": { "name": "Asha", "email": "asha@college.edu", "phone": "9876543210", "college": "IIT Delhi" },
            "quantity": 2
        });
        let (status, body) =
            send(&state, Method::POST, "/api/events/event-5/bookings", Some(request)).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["status"], "confirmed");
        assert_eq!(body["quantity"], 2);
        assert_eq!(state.tickets.lock().await.len(), 1);

        let (_, event) = send(&state, Method::GET, "/api/events/event-5", None).await;
        assert_eq!(event["event"]["seats"]["available"], 75);
    }

    #[tokio::test]
    async fn test_booking_rejects_invalid_form() {
        let state = state();
        sign_in(&state, "asha@college.edu").await;
        let request = json!({
            "form": { "name": "", "email": "nope", "phone": "12", "college": "" },
            "quantity": 1
        });
        let (status, body) =
            send(&state, Method::POST, "/api/events/event-5/bookings", Some(request)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["fields"].as_array().unwrap().len(), 4);
        assert!(state.tickets.lock().await.is_empty());
    }
}
