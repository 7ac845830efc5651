use crate::error::{SessionError, StorefrontError};
use crate::types::enums::Role;
use crate::types::event::{EventRecord, Seats};
use crate::types::identity::SessionIdentity;
use crate::types::ids::{EventId, OrganizerId};
use crate::types::io::CreateEventInput;
use crate::validation::validate_event_draft;
use ex_events::bus::NotificationBus;
use ex_events::types::{Notification, NotificationKind};

/// The record is returned only; the catalog is never modified.
pub fn draft_event(
    identity: Option<&SessionIdentity>,
    input: &CreateEventInput,
) -> Result<EventRecord, StorefrontError> {
    let identity = identity.ok_or(SessionError::Unauthenticated)?;
    if identity.role != Role::Organizer {
        return Err(SessionError::Forbidden {
            required: Role::Organizer,
        }
        .into());
    }
    let validated = validate_event_draft(input)?;

    let organizer_id = OrganizerId::new(format!("org-{}", user_suffix(identity)))
        .map_err(|err| StorefrontError::Internal {
            message: err.to_string(),
        })?;
    Ok(EventRecord {
        id: EventId::generate(),
        title: input.title.trim().to_string(),
        description: input.description.trim().to_string(),
        date: validated.date,
        time: input.time.trim().to_string(),
        location: input.location.trim().to_string(),
        college: input.college.trim().to_string(),
        category: input.category.clone(),
        price: validated.price,
        image: input.image.trim().to_string(),
        organizer_id,
        organizer_name: identity.name.clone(),
        seats: Seats::new(validated.total_seats, validated.total_seats),
        featured: false,
    })
}

pub fn draft_event_and_notify(
    identity: Option<&SessionIdentity>,
    input: &CreateEventInput,
    bus: &NotificationBus,
    correlation_id: Option<String>,
) -> Result<EventRecord, StorefrontError> {
    let draft = draft_event(identity, input)?;
    tracing::info!(event_id = %draft.id, title = %draft.title, "event drafted");
    let _ = bus.publish(
        Notification::new(
            NotificationKind::EventDrafted,
            "Event Created",
            "Your event has been created successfully!",
        )
        .with_correlation(correlation_id),
    );
    Ok(draft)
}

fn user_suffix(identity: &SessionIdentity) -> &str {
    let id = identity.id.as_str();
    id.strip_prefix("user-").unwrap_or(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EventDraftError;
    use crate::types::ids::UserId;
    use std::str::FromStr;

    fn organizer() -> SessionIdentity {
        SessionIdentity {
            id: UserId::from_str("user-4f2a9c1be").unwrap(),
            name: "e-cell.organizer".to_string(),
            email: "e-cell.organizer@iim.ac.in".to_string(),
            role: Role::Organizer,
            bio: None,
            college: None,
        }
    }

    fn input() -> CreateEventInput {
        CreateEventInput {
            title: "Hack Night".to_string(),
            description: "Overnight build sprint".to_string(),
            date: "2025-08-01".to_string(),
            time: "08:00 PM".to_string(),
            location: "Lab 3".to_string(),
            college: "IIT Delhi".to_string(),
            category: "Technical".to_string(),
            price: Some(0.0),
            total_seats: Some(120),
            image: String::new(),
        }
    }

    #[test]
    fn test_draft_builds_record() {
        let draft = draft_event(Some(&organizer()), &input()).unwrap();
        assert!(draft.id.as_str().starts_with("event-"));
        assert_eq!(draft.organizer_id.as_str(), "org-4f2a9c1be");
        assert_eq!(draft.organizer_name, "e-cell.organizer");
        assert_eq!(draft.seats, Seats::new(120, 120));
        assert!(draft.is_free());
        assert!(!draft.featured);
    }

    #[test]
    fn test_draft_requires_organizer() {
        let mut student = organizer();
        student.role = Role::Student;
        assert!(matches!(
            draft_event(Some(&student), &input()),
            Err(StorefrontError::Session(SessionError::Forbidden {
                required: Role::Organizer
            }))
        ));
        assert!(matches!(
            draft_event(None, &input()),
            Err(StorefrontError::Session(SessionError::Unauthenticated))
        ));
    }

    #[test]
    fn test_draft_reports_missing_fields() {
        let mut partial = input();
        partial.title.clear();
        partial.total_seats = None;
        let err = draft_event(Some(&organizer()), &partial).unwrap_err();
        match err {
            StorefrontError::Draft(EventDraftError::MissingFields { fields }) => {
                assert_eq!(fields, vec!["title", "total_seats"]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_draft_notifies() {
        let bus = NotificationBus::new(4);
        let mut receiver = bus.subscribe();
        draft_event_and_notify(Some(&organizer()), &input(), &bus, None).unwrap();
        assert_eq!(receiver.try_recv().unwrap().kind, NotificationKind::EventDrafted);
    }
}
