use crate::types::enums::TicketStatus;
use crate::types::ids::{EventId, TicketId, UserId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Ticket {
    pub id: TicketId,
    pub holder_id: UserId,
    pub event_id: EventId,
    pub event_title: String,
    pub event_date: NaiveDate,
    pub event_location: String,
    pub event_college: String,
    pub quantity: u32,
    pub unit_price: f64,
    pub purchase_date: NaiveDate,
    pub status: TicketStatus,
}

impl Ticket {
    pub fn total(&self) -> f64 {
        self.unit_price * f64::from(self.quantity)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BookingQuote {
    pub unit_price: f64,
    pub quantity: u32,
    pub total: f64,
}
