use crate::types::criteria::FilterCriteria;
use crate::types::event::EventRecord;

pub fn filter_events(catalog: &[EventRecord], criteria: &FilterCriteria) -> Vec<EventRecord> {
    let needle = criteria.search_text.as_deref().map(str::to_lowercase);
    catalog
        .iter()
        .filter(|event| matches_with(event, criteria, needle.as_deref()))
        .cloned()
        .collect()
}

pub fn matches(event: &EventRecord, criteria: &FilterCriteria) -> bool {
    let needle = criteria.search_text.as_deref().map(str::to_lowercase);
    matches_with(event, criteria, needle.as_deref())
}

fn matches_with(event: &EventRecord, criteria: &FilterCriteria, needle: Option<&str>) -> bool {
    matches_search(event, needle)
        && matches_exact(&event.category, criteria.category.as_deref())
        && matches_exact(&event.college, criteria.college.as_deref())
        && criteria
            .price_bucket
            .is_none_or(|bucket| bucket.contains(event.price))
}

fn matches_search(event: &EventRecord, needle: Option<&str>) -> bool {
    let Some(needle) = needle else {
        return true;
    };
    [&event.title, &event.description, &event.college]
        .iter()
        .any(|field| field.to_lowercase().contains(needle))
}

fn matches_exact(value: &str, wanted: Option<&str>) -> bool {
    wanted.is_none_or(|wanted| value == wanted)
}
