use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ulid::Ulid;
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, ToSchema)]
#[serde(transparent)]
#[schema(as = String)]
pub struct EventId(String);

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, ToSchema)]
#[serde(transparent)]
#[schema(as = String)]
pub struct PastEventId(String);

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, ToSchema)]
#[serde(transparent)]
#[schema(as = String)]
pub struct OrganizerId(String);

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, ToSchema)]
#[serde(transparent)]
#[schema(as = String)]
pub struct UserId(String);

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, ToSchema)]
#[serde(transparent)]
#[schema(as = String)]
pub struct TicketId(String);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdError {
    InvalidPrefix { expected: &'static str, got: String },
    InvalidFormat { value: String },
}

impl fmt::Display for IdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPrefix { expected, got } => {
                write!(f, "invalid prefix: expected {expected}, got {got}")
            }
            Self::InvalidFormat { value } => write!(f, "invalid id format: {value}"),
        }
    }
}

impl std::error::Error for IdError {}

fn validate_prefixed(value: &str, prefix: &'static str) -> Result<(), IdError> {
    let Some(rest) = value.strip_prefix(prefix) else {
        let got = value.split('-').next().unwrap_or("").to_string();
        return Err(IdError::InvalidPrefix {
            expected: prefix,
            got,
        });
    };
    let well_formed = !rest.is_empty()
        && rest
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || ch == '-' || ch == '_');
    if !well_formed {
        return Err(IdError::InvalidFormat {
            value: value.to_string(),
        });
    }
    Ok(())
}

macro_rules! id_type {
    ($name:ident, $prefix:expr) => {
        impl $name {
            pub const PREFIX: &'static str = $prefix;

            pub fn new(value: String) -> Result<Self, IdError> {
                validate_prefixed(&value, Self::PREFIX)?;
                Ok(Self(value))
            }

            pub fn generate() -> Self {
                Self(format!("{}{}", Self::PREFIX, Ulid::new().to_string().to_lowercase()))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = IdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s.to_string())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let value = String::deserialize(deserializer)?;
                Self::new(value).map_err(serde::de::Error::custom)
            }
        }
    };
}

id_type!(EventId, "event-");
id_type!(PastEventId, "past-event-");
id_type!(OrganizerId, "org-");
id_type!(UserId, "user-");
id_type!(TicketId, "ticket-");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_prefixed_ids() {
        assert_eq!(EventId::from_str("event-1").unwrap().as_str(), "event-1");
        assert_eq!(
            OrganizerId::from_str("org-makers").unwrap().as_str(),
            "org-makers"
        );
    }

    #[test]
    fn test_rejects_wrong_prefix() {
        let err = EventId::from_str("org-1").unwrap_err();
        assert_eq!(
            err,
            IdError::InvalidPrefix {
                expected: "event-",
                got: "org".to_string()
            }
        );
    }

    #[test]
    fn test_rejects_empty_suffix() {
        assert!(matches!(
            UserId::from_str("user-"),
            Err(IdError::InvalidFormat { .. })
        ));
        assert!(matches!(
            UserId::from_str("user-a b"),
            Err(IdError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn test_generated_ids_round_trip() {
        let id = TicketId::generate();
        assert!(id.as_str().starts_with("ticket-"));
        assert_eq!(TicketId::from_str(id.as_str()).unwrap(), id);
    }

    #[test]
    fn test_deserialize_validates() {
        let ok: EventId = serde_json::from_str("\"event-7\"").unwrap();
        assert_eq!(ok.as_str(), "event-7");
        assert!(serde_json::from_str::<EventId>("\"7\"").is_err());
    }
}
