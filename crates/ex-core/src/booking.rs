use crate::error::{BookingError, StorefrontError};
use crate::format::pluralize;
use crate::types::enums::TicketStatus;
use crate::types::event::EventRecord;
use crate::types::identity::SessionIdentity;
use crate::types::ids::TicketId;
use crate::types::io::RegistrationForm;
use crate::types::ticket::{BookingQuote, Ticket};
use crate::validation::validate_registration_form;
use chrono::Utc;
use ex_events::bus::NotificationBus;
use ex_events::types::{Notification, NotificationKind};
use std::time::Duration;

pub const DEFAULT_PAYMENT_DELAY: Duration = Duration::from_millis(2000);

const DELIVERY_NOTE: &str =
    "You will receive your e-ticket and event updates on WhatsApp within 24 hours.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TicketQuantity {
    value: u32,
    max: u32,
}

impl TicketQuantity {
    pub fn new(available: u32) -> Self {
        Self::clamp(1, available)
    }

    pub fn clamp(requested: u32, available: u32) -> Self {
        let max = available.max(1);
        Self {
            value: requested.clamp(1, max),
            max,
        }
    }

    pub fn get(&self) -> u32 {
        self.value
    }

    pub fn can_increment(&self) -> bool {
        self.value < self.max
    }

    pub fn can_decrement(&self) -> bool {
        self.value > 1
    }

    pub fn increment(&mut self) {
        if self.can_increment() {
            self.value += 1;
        }
    }

    pub fn decrement(&mut self) {
        if self.can_decrement() {
            self.value -= 1;
        }
    }
}

pub fn quote(event: &EventRecord, quantity: u32) -> Result<BookingQuote, BookingError> {
    if event.seats.available == 0 {
        return Err(BookingError::SoldOut);
    }
    if quantity == 0 {
        return Err(BookingError::InvalidQuantity);
    }
    if quantity > event.seats.available {
        return Err(BookingError::InsufficientSeats {
            requested: quantity,
            available: event.seats.available,
        });
    }
    Ok(BookingQuote {
        unit_price: event.price,
        quantity,
        total: event.price * f64::from(quantity),
    })
}

pub fn payment_prompt(quote: &BookingQuote) -> String {
    format!(
        "Scan the QR code to pay ₹{:.2} for {}.",
        quote.total,
        pluralize(quote.quantity, "ticket")
    )
}

#[derive(Clone)]
pub struct PaymentGateway {
    bus: NotificationBus,
    delay: Duration,
}

impl PaymentGateway {
    pub fn new(bus: NotificationBus) -> Self {
        Self {
            bus,
            delay: DEFAULT_PAYMENT_DELAY,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Catalog seat counts are left untouched.
    pub async fn confirm(
        &self,
        holder: &SessionIdentity,
        event: &EventRecord,
        form: &RegistrationForm,
        quantity: u32,
        correlation_id: Option<String>,
    ) -> Result<Ticket, StorefrontError> {
        validate_registration_form(form)?;
        let quote = quote(event, quantity)?;
        self.publish(
            Notification::new(
                NotificationKind::RegistrationReceived,
                "Registration Successful",
                "Please complete payment to confirm your booking",
            )
            .with_correlation(correlation_id.clone()),
        );

        tokio::time::sleep(self.delay).await;

        let ticket = Ticket {
            id: TicketId::generate(),
            holder_id: holder.id.clone(),
            event_id: event.id.clone(),
            event_title: event.title.clone(),
            event_date: event.date,
            event_location: event.location.clone(),
            event_college: event.college.clone(),
            quantity: quote.quantity,
            unit_price: quote.unit_price,
            purchase_date: Utc::now().date_naive(),
            status: TicketStatus::Confirmed,
        };
        tracing::info!(
            ticket_id = %ticket.id,
            event_id = %ticket.event_id,
            quantity = ticket.quantity,
            total = quote.total,
            "payment confirmed"
        );
        self.publish(
            Notification::new(NotificationKind::PaymentConfirmed, "Payment Confirmed", DELIVERY_NOTE)
                .with_correlation(correlation_id),
        );
        Ok(ticket)
    }

    fn publish(&self, notification: Notification) {
        let _ = self.bus.publish(notification);
    }
}
