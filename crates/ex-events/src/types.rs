use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ulid::Ulid;
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Notification {
    pub id: String,
    pub at: DateTime<Utc>,
    pub kind: NotificationKind,
    pub title: String,
    pub description: String,
    pub correlation_id: Option<String>,
}

impl Notification {
    pub fn new(kind: NotificationKind, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: format!("ntf_{}", Ulid::new()),
            at: Utc::now(),
            kind,
            title: title.into(),
            description: description.into(),
            correlation_id: None,
        }
    }

    pub fn with_correlation(mut self, correlation_id: Option<String>) -> Self {
        self.correlation_id = correlation_id;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub enum NotificationKind {
    SignedIn,
    SignedOut,
    RegistrationReceived,
    PaymentConfirmed,
    ProfileUpdated,
    PasswordUpdated,
    EventDrafted,
}
