use crate::error::MetricsError;
use crate::types::enums::{AvailabilityTier, TierColor};
use crate::types::event::{EventRecord, Seats};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

const CURRENCY_SYMBOL: char = '₹';
const REVENUE_SHARE_THRESHOLD: f64 = 250.0;

pub fn checked_availability_percentage(seats: &Seats) -> Result<f64, MetricsError> {
    if seats.total == 0 {
        return Err(MetricsError::DivisionUndefined);
    }
    let available = seats.available.min(seats.total);
    Ok(100.0 * f64::from(available) / f64::from(seats.total))
}

/// Like [`checked_availability_percentage`] but zero capacity reads as 0%.
pub fn availability_percentage(seats: &Seats) -> f64 {
    checked_availability_percentage(seats).unwrap_or(0.0)
}

pub fn availability_tier(percentage: f64) -> AvailabilityTier {
    if percentage <= 20.0 {
        AvailabilityTier::Low
    } else if percentage <= 50.0 {
        AvailabilityTier::Medium
    } else {
        AvailabilityTier::High
    }
}

// Clamped to 0..=100 first, so the cast neither truncates nor loses a sign.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn rounded_percentage(percentage: f64) -> u32 {
    percentage.round().clamp(0.0, 100.0) as u32
}

pub fn format_currency(amount: f64) -> String {
    let rounded = amount.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    let digits = format!("{:.0}", rounded.abs());
    format!("{sign}{CURRENCY_SYMBOL}{}", group_indian(&digits))
}

pub fn parse_currency(value: &str) -> Result<i64, MetricsError> {
    let invalid = || MetricsError::InvalidCurrency {
        value: value.to_string(),
    };
    let trimmed = value.trim();
    let (negative, rest) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed),
    };
    let rest = rest.strip_prefix(CURRENCY_SYMBOL).unwrap_or(rest);
    let digits: String = rest.chars().filter(|ch| *ch != ',').collect();
    if digits.is_empty() || !digits.chars().all(|ch| ch.is_ascii_digit()) {
        return Err(invalid());
    }
    let magnitude: i64 = digits.parse().map_err(|_| invalid())?;
    Ok(if negative { -magnitude } else { magnitude })
}

// Last three digits form one group, everything before is grouped in pairs.
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();
    format!("{},{tail}", groups.join(","))
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RevenueShare {
    pub share: f64,
    pub percentage: u32,
}

pub fn calculate_revenue_share(revenue: f64) -> RevenueShare {
    let percentage = if revenue > REVENUE_SHARE_THRESHOLD { 5 } else { 10 };
    RevenueShare {
        share: revenue * f64::from(percentage) / 100.0,
        percentage,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct EventMetrics {
    pub availability_percentage: f64,
    pub availability_rounded: u32,
    pub tier: AvailabilityTier,
    pub color: TierColor,
    pub price_label: String,
    pub seats_sold: u32,
}

impl EventMetrics {
    pub fn for_event(event: &EventRecord) -> Self {
        let percentage = availability_percentage(&event.seats);
        let tier = availability_tier(percentage);
        Self {
            availability_percentage: percentage,
            availability_rounded: rounded_percentage(percentage),
            tier,
            color: tier.color(),
            price_label: format_currency(event.price),
            seats_sold: event.seats.sold(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct EventListing {
    pub event: EventRecord,
    pub metrics: EventMetrics,
}

impl EventListing {
    pub fn new(event: EventRecord) -> Self {
        let metrics = EventMetrics::for_event(&event);
        Self { event, metrics }
    }
}

pub fn listings(events: Vec<EventRecord>) -> Vec<EventListing> {
    events.into_iter().map(EventListing::new).collect()
}
