use crate::types::enums::Role;
use crate::types::io::FieldError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("event not found: {id}")]
    EventNotFound { id: String },
    #[error("duplicate event id: {id}")]
    DuplicateId { id: String },
    #[error("inconsistent seats for {id}: {available} available of {total}")]
    InvalidSeats { id: String, total: u32, available: u32 },
    #[error("invalid price for {id}: {price}")]
    InvalidPrice { id: String, price: f64 },
    #[error("invalid catalog file: {message}")]
    InvalidFile { message: String },
}

#[derive(Debug, Error, PartialEq)]
pub enum MetricsError {
    #[error("availability undefined for zero capacity")]
    DivisionUndefined,
    #[error("invalid currency amount: {value}")]
    InvalidCurrency { value: String },
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("not signed in")]
    Unauthenticated,
    #[error("requires {required} role")]
    Forbidden { required: Role },
    #[error("new passwords don't match")]
    PasswordMismatch,
    #[error("invalid input: {message}")]
    InvalidInput { message: String },
    #[error("identity storage failed: {message}")]
    Storage { message: String },
}

#[derive(Debug, Error)]
pub enum BookingError {
    #[error("event is sold out")]
    SoldOut,
    #[error("requested {requested} seats, only {available} available")]
    InsufficientSeats { requested: u32, available: u32 },
    #[error("quantity must be at least 1")]
    InvalidQuantity,
    #[error("registration form invalid")]
    InvalidForm { errors: Vec<FieldError> },
}

#[derive(Debug, Error)]
pub enum EventDraftError {
    #[error("please fill in all required fields: {}", fields.join(", "))]
    MissingFields { fields: Vec<&'static str> },
    #[error("unknown category: {category}")]
    UnknownCategory { category: String },
    #[error("invalid input: {message}")]
    InvalidInput { message: String },
}

#[derive(Debug, Error)]
pub enum StorefrontError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Metrics(#[from] MetricsError),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Booking(#[from] BookingError),
    #[error(transparent)]
    Draft(#[from] EventDraftError),
    #[error("internal error: {message}")]
    Internal { message: String },
}
