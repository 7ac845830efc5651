use crate::types::enums::PriceBucket;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

const ANY: &str = "all";

/// Active catalog constraints. `None` means the field does not constrain.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FilterCriteria {
    pub search_text: Option<String>,
    pub category: Option<String>,
    pub college: Option<String>,
    pub price_bucket: Option<PriceBucket>,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, text: impl Into<String>) -> Self {
        let text = text.into();
        self.search_text = (!text.is_empty()).then_some(text);
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = normalize(Some(category.into()));
        self
    }

    pub fn college(mut self, college: impl Into<String>) -> Self {
        self.college = normalize(Some(college.into()));
        self
    }

    pub fn price_bucket(mut self, bucket: PriceBucket) -> Self {
        self.price_bucket = Some(bucket);
        self
    }

    pub fn is_unconstrained(&self) -> bool {
        self.search_text.is_none()
            && self.category.is_none()
            && self.college.is_none()
            && self.price_bucket.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RawFilter {
    pub search: Option<String>,
    pub category: Option<String>,
    pub college: Option<String>,
    pub price: Option<String>,
}

impl From<RawFilter> for FilterCriteria {
    fn from(raw: RawFilter) -> Self {
        Self {
            search_text: raw.search.filter(|text| !text.is_empty()),
            category: normalize(raw.category),
            college: normalize(raw.college),
            price_bucket: raw.price.as_deref().and_then(PriceBucket::parse),
        }
    }
}

fn normalize(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.is_empty() && text != ANY)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_filter_sentinels_become_none() {
        let criteria = FilterCriteria::from(RawFilter {
            search: Some(String::new()),
            category: Some("all".to_string()),
            college: Some(String::new()),
            price: Some("all".to_string()),
        });
        assert!(criteria.is_unconstrained());
    }

    #[test]
    fn test_raw_filter_keeps_real_values() {
        let criteria = FilterCriteria::from(RawFilter {
            search: Some("fest".to_string()),
            category: Some("Technical".to_string()),
            college: Some("IIT Delhi".to_string()),
            price: Some("under500".to_string()),
        });
        assert_eq!(criteria.search_text.as_deref(), Some("fest"));
        assert_eq!(criteria.category.as_deref(), Some("Technical"));
        assert_eq!(criteria.college.as_deref(), Some("IIT Delhi"));
        assert_eq!(criteria.price_bucket, Some(PriceBucket::Under500));
    }

    #[test]
    fn test_builder_normalizes_sentinel() {
        let criteria = FilterCriteria::new().category("all").college("");
        assert!(criteria.is_unconstrained());
    }
}
