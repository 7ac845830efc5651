use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use ex_core::error::{
    BookingError, CatalogError, EventDraftError, MetricsError, SessionError, StorefrontError,
};
use ex_core::types::io::FieldError;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorEnvelope {
    pub code: &'static str,
    pub message: String,
    pub correlation_id: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FieldError>,
}

pub fn map_error(
    err: &StorefrontError,
    correlation_id: Option<String>,
) -> (StatusCode, Json<ErrorEnvelope>) {
    let (status, code, message) = match err {
        StorefrontError::Catalog(catalog) => map_catalog_error(catalog),
        StorefrontError::Metrics(metrics) => map_metrics_error(metrics),
        StorefrontError::Session(session) => map_session_error(session),
        StorefrontError::Booking(booking) => map_booking_error(booking),
        StorefrontError::Draft(draft) => map_draft_error(draft),
        StorefrontError::Internal { message } => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "internal_error",
            message.clone(),
        ),
    };
    if status.is_server_error() {
        tracing::error!(error = %err, correlation_id = ?correlation_id, "request failed");
    }
    let fields = match err {
        StorefrontError::Booking(BookingError::InvalidForm { errors }) => errors.clone(),
        _ => Vec::new(),
    };

    (
        status,
        Json(ErrorEnvelope {
            code,
            message,
            correlation_id,
            fields,
        }),
    )
}

pub fn error_response(err: impl Into<StorefrontError>, correlation_id: Option<String>) -> Response {
    map_error(&err.into(), correlation_id).into_response()
}

fn map_catalog_error(err: &CatalogError) -> (StatusCode, &'static str, String) {
    match err {
        CatalogError::EventNotFound { .. } => {
            (StatusCode::NOT_FOUND, "not_found", err.to_string())
        }
        CatalogError::DuplicateId { .. }
        | CatalogError::InvalidSeats { .. }
        | CatalogError::InvalidPrice { .. }
        | CatalogError::InvalidFile { .. } => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "internal_error",
            err.to_string(),
        ),
    }
}

fn map_metrics_error(err: &MetricsError) -> (StatusCode, &'static str, String) {
    match err {
        MetricsError::DivisionUndefined => (
            StatusCode::UNPROCESSABLE_ENTITY,
            "invalid_state",
            err.to_string(),
        ),
        MetricsError::InvalidCurrency { .. } => {
            (StatusCode::BAD_REQUEST, "invalid_input", err.to_string())
        }
    }
}

fn map_session_error(err: &SessionError) -> (StatusCode, &'static str, String) {
    match err {
        SessionError::Unauthenticated => {
            (StatusCode::UNAUTHORIZED, "unauthenticated", err.to_string())
        }
        SessionError::Forbidden { .. } => (StatusCode::FORBIDDEN, "forbidden", err.to_string()),
        SessionError::PasswordMismatch | SessionError::InvalidInput { .. } => {
            (StatusCode::BAD_REQUEST, "invalid_input", err.to_string())
        }
        SessionError::Storage { .. } => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "internal_error",
            err.to_string(),
        ),
    }
}

fn map_booking_error(err: &BookingError) -> (StatusCode, &'static str, String) {
    match err {
        BookingError::SoldOut | BookingError::InsufficientSeats { .. } => {
            (StatusCode::CONFLICT, "conflict", err.to_string())
        }
        BookingError::InvalidQuantity => {
            (StatusCode::BAD_REQUEST, "invalid_input", err.to_string())
        }
        BookingError::InvalidForm { .. } => (
            StatusCode::UNPROCESSABLE_ENTITY,
            "invalid_form",
            err.to_string(),
        ),
    }
}

fn map_draft_error(err: &EventDraftError) -> (StatusCode, &'static str, String) {
    match err {
        EventDraftError::MissingFields { .. }
        | EventDraftError::UnknownCategory { .. }
        | EventDraftError::InvalidInput { .. } => {
            (StatusCode::BAD_REQUEST, "invalid_input", err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_errors_carry_fields() {
        let err = StorefrontError::Booking(BookingError::InvalidForm {
            errors: vec![FieldError::new("phone", "Phone number must be 10 digits")],
        });
        let (status, Json(envelope)) = map_error(&err, Some("corr_1".to_string()));
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(envelope.code, "invalid_form");
        assert_eq!(envelope.fields.len(), 1);
    }

    #[test]
    fn test_session_errors() {
        let (status, _) = map_error(&SessionError::Unauthenticated.into(), None);
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        let forbidden = SessionError::Forbidden {
            required: ex_core::types::enums::Role::Organizer,
        };
        let (status, Json(envelope)) = map_error(&forbidden.into(), None);
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(envelope.message, "requires organizer role");
    }
}
