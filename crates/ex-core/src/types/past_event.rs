use crate::types::ids::{OrganizerId, PastEventId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Testimonial {
    pub name: String,
    pub comment: String,
    pub rating: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PastEvent {
    pub id: PastEventId,
    pub title: String,
    pub description: String,
    pub date: NaiveDate,
    pub time: String,
    pub location: String,
    pub college: String,
    pub category: String,
    pub joined_participants: u32,
    pub total_participants: u32,
    pub image: String,
    pub organizer_id: OrganizerId,
    pub organizer_name: String,
    pub feedback_highlight: String,
    pub rating: f32,
    pub benefits: Vec<String>,
    pub testimonials: Vec<Testimonial>,
    pub has_gallery: bool,
}

impl PastEvent {
    /// Joined over invited participants, 0 when nobody was invited.
    pub fn attendance_percentage(&self) -> f64 {
        if self.total_participants == 0 {
            return 0.0;
        }
        100.0 * f64::from(self.joined_participants) / f64::from(self.total_participants)
    }
}
