use crate::types::ids::{EventId, OrganizerId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Seats {
    pub total: u32,
    pub available: u32,
}

impl Seats {
    pub fn new(total: u32, available: u32) -> Self {
        Self { total, available }
    }

    pub fn is_consistent(&self) -> bool {
        self.total > 0 && self.available <= self.total
    }

    pub fn sold(&self) -> u32 {
        self.total.saturating_sub(self.available)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct EventRecord {
    pub id: EventId,
    pub title: String,
    pub description: String,
    pub date: NaiveDate,
    pub time: String,
    pub location: String,
    pub college: String,
    pub category: String,
    pub price: f64,
    #[serde(default)]
    pub image: String,
    pub organizer_id: OrganizerId,
    pub organizer_name: String,
    pub seats: Seats,
    #[serde(default)]
    pub featured: bool,
}

impl EventRecord {
    pub fn is_free(&self) -> bool {
        self.price == 0.0
    }
}
