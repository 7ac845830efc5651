use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Organizer,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Organizer => "organizer",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "student" => Some(Self::Student),
            "organizer" => Some(Self::Organizer),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Student => "Student",
            Self::Organizer => "Event Organizer",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum PriceBucket {
    #[serde(rename = "free")]
    Free,
    #[serde(rename = "under500")]
    Under500,
    #[serde(rename = "500to1000")]
    From500To1000,
    #[serde(rename = "above1000")]
    Above1000,
}

impl PriceBucket {
    pub const ALL: [PriceBucket; 4] = [
        Self::Free,
        Self::Under500,
        Self::From500To1000,
        Self::Above1000,
    ];

    /// Unknown or sentinel values carry no constraint and map to `None`.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "free" => Some(Self::Free),
            "under500" => Some(Self::Under500),
            "500to1000" => Some(Self::From500To1000),
            "above1000" => Some(Self::Above1000),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::Under500 => "under500",
            Self::From500To1000 => "500to1000",
            Self::Above1000 => "above1000",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Free => "Free",
            Self::Under500 => "Under ₹500",
            Self::From500To1000 => "₹500 - ₹1000",
            Self::Above1000 => "Above ₹1000",
        }
    }

    pub fn contains(&self, price: f64) -> bool {
        match self {
            Self::Free => price == 0.0,
            Self::Under500 => price > 0.0 && price < 500.0,
            Self::From500To1000 => (500.0..=1000.0).contains(&price),
            Self::Above1000 => price > 1000.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum AvailabilityTier {
    Low,
    Medium,
    High,
}

impl AvailabilityTier {
    pub fn color(&self) -> TierColor {
        match self {
            Self::Low => TierColor::Red,
            Self::Medium => TierColor::Yellow,
            Self::High => TierColor::Green,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TierColor {
    Red,
    Yellow,
    Green,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TicketStatus {
    Pending,
    Confirmed,
    Cancelled,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_bucket_boundaries() {
        assert!(PriceBucket::Free.contains(0.0));
        assert!(!PriceBucket::Under500.contains(0.0));
        assert!(PriceBucket::Under500.contains(499.0));
        assert!(!PriceBucket::Under500.contains(500.0));
        assert!(PriceBucket::From500To1000.contains(500.0));
        assert!(PriceBucket::From500To1000.contains(1000.0));
        assert!(!PriceBucket::Above1000.contains(1000.0));
        assert!(PriceBucket::Above1000.contains(1000.5));
    }

    #[test]
    fn test_price_bucket_parse_treats_unknown_as_none() {
        assert_eq!(PriceBucket::parse("500to1000"), Some(PriceBucket::From500To1000));
        assert_eq!(PriceBucket::parse(""), None);
        assert_eq!(PriceBucket::parse("all"), None);
        assert_eq!(PriceBucket::parse("cheap"), None);
    }

    #[test]
    fn test_price_bucket_serde_names() {
        let json = serde_json::to_string(&PriceBucket::From500To1000).unwrap();
        assert_eq!(json, "\"500to1000\"");
        for bucket in PriceBucket::ALL {
            assert_eq!(PriceBucket::parse(bucket.as_str()), Some(bucket));
        }
    }

    #[test]
    fn test_tier_colors() {
        assert_eq!(AvailabilityTier::Low.color(), TierColor::Red);
        assert_eq!(AvailabilityTier::Medium.color(), TierColor::Yellow);
        assert_eq!(AvailabilityTier::High.color(), TierColor::Green);
    }

    #[test]
    fn test_role_parse() {
        assert_eq!(Role::parse("Organizer"), Some(Role::Organizer));
        assert_eq!(Role::parse("admin"), None);
        assert_eq!(Role::Student.to_string(), "student");
    }
}
