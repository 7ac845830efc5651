use crate::error::CatalogError;
use crate::types::event::EventRecord;
use crate::types::past_event::PastEvent;
use serde::Deserialize;
use std::fs;
use std::path::Path;

const SEED: &str = include_str!("../data/seed.toml");

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogSource {
    #[serde(default, alias = "events", rename = "event")]
    pub events: Vec<EventRecord>,
    #[serde(default, alias = "past_events", rename = "past_event")]
    pub past_events: Vec<PastEvent>,
}

pub fn seed_source() -> Result<CatalogSource, CatalogError> {
    parse_catalog_toml(SEED)
}

pub fn parse_catalog_toml(text: &str) -> Result<CatalogSource, CatalogError> {
    toml::from_str(text).map_err(|err| CatalogError::InvalidFile {
        message: err.to_string(),
    })
}

pub fn parse_catalog_yaml(text: &str) -> Result<CatalogSource, CatalogError> {
    serde_yaml::from_str(text).map_err(|err| CatalogError::InvalidFile {
        message: err.to_string(),
    })
}

pub fn load_catalog_file(path: &Path) -> Result<CatalogSource, CatalogError> {
    let content = fs::read_to_string(path).map_err(|err| CatalogError::InvalidFile {
        message: format!("{}: {err}", path.display()),
    })?;
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("toml") => parse_catalog_toml(&content),
        Some("yaml") | Some("yml") => parse_catalog_yaml(&content),
        other => Err(CatalogError::InvalidFile {
            message: format!("unsupported catalog extension: {}", other.unwrap_or("<none>")),
        }),
    }
}
