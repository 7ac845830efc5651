use crate::catalog_file::{seed_source, CatalogSource};
use crate::error::CatalogError;
use crate::filter::filter_events;
use crate::types::criteria::FilterCriteria;
use crate::types::event::EventRecord;
use crate::types::ids::EventId;
use crate::types::past_event::PastEvent;
use std::collections::HashSet;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct Catalog {
    events: Arc<[EventRecord]>,
    past_events: Arc<[PastEvent]>,
}

impl Catalog {
    pub fn new(events: Vec<EventRecord>) -> Result<Self, CatalogError> {
        validate_events(&events)?;
        Ok(Self {
            events: events.into(),
            past_events: Arc::from(Vec::new()),
        })
    }

    pub fn from_source(source: CatalogSource) -> Result<Self, CatalogError> {
        let catalog = Self::new(source.events)?;
        Ok(catalog.with_past_events(source.past_events))
    }

    pub fn seed() -> Result<Self, CatalogError> {
        Self::from_source(seed_source()?)
    }

    pub fn with_past_events(mut self, past_events: Vec<PastEvent>) -> Self {
        self.past_events = past_events.into();
        self
    }

    pub fn events(&self) -> &[EventRecord] {
        &self.events
    }

    pub fn past_events(&self) -> &[PastEvent] {
        &self.past_events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn find(&self, id: &str) -> Option<&EventRecord> {
        self.events.iter().find(|event| event.id.as_str() == id)
    }

    pub fn get(&self, id: &EventId) -> Result<&EventRecord, CatalogError> {
        self.find(id.as_str())
            .ok_or_else(|| CatalogError::EventNotFound { id: id.to_string() })
    }

    pub fn find_past_event(&self, id: &str) -> Result<&PastEvent, CatalogError> {
        self.past_events
            .iter()
            .find(|event| event.id.as_str() == id)
            .ok_or_else(|| CatalogError::EventNotFound { id: id.to_string() })
    }

    pub fn featured(&self) -> impl Iterator<Item = &EventRecord> {
        self.events.iter().filter(|event| event.featured)
    }

    pub fn categories(&self) -> Vec<&str> {
        unique(self.events.iter().map(|event| event.category.as_str()))
    }

    pub fn colleges(&self) -> Vec<&str> {
        unique(self.events.iter().map(|event| event.college.as_str()))
    }

    pub fn filter(&self, criteria: &FilterCriteria) -> Vec<EventRecord> {
        filter_events(&self.events, criteria)
    }
}

fn unique<'a>(values: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    let mut seen = HashSet::new();
    values.filter(|value| seen.insert(*value)).collect()
}

fn validate_events(events: &[EventRecord]) -> Result<(), CatalogError> {
    let mut ids = HashSet::new();
    for event in events {
        if !ids.insert(event.id.as_str()) {
            return Err(CatalogError::DuplicateId {
                id: event.id.to_string(),
            });
        }
        if !event.seats.is_consistent() {
            return Err(CatalogError::InvalidSeats {
                id: event.id.to_string(),
                total: event.seats.total,
                available: event.seats.available,
            });
        }
        if !event.price.is_finite() || event.price < 0.0 {
            return Err(CatalogError::InvalidPrice {
                id: event.id.to_string(),
                price: event.price,
            });
        }
    }
    Ok(())
}
