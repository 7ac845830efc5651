use crate::error::{BookingError, EventDraftError, SessionError};
use crate::types::io::{
    ChangePasswordInput, CreateEventInput, FieldError, RegistrationForm, UpdateProfileInput,
};
use chrono::NaiveDate;

pub const EVENT_CATEGORIES: [&str; 7] = [
    "Technical",
    "Cultural",
    "Sports",
    "Business",
    "Literary",
    "Workshop",
    "Other",
];

const MIN_NAME_LEN: usize = 2;
const MIN_PHONE_LEN: usize = 10;

pub fn is_valid_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };
    !host.is_empty() && !tld.is_empty()
}

/// Collects every field problem instead of stopping at the first.
pub fn validate_registration_form(form: &RegistrationForm) -> Result<(), BookingError> {
    let mut errors = Vec::new();
    if form.name.trim().chars().count() < MIN_NAME_LEN {
        errors.push(FieldError::new("name", "Name must be at least 2 characters"));
    }
    if !is_valid_email(form.email.trim()) {
        errors.push(FieldError::new("email", "Please enter a valid email address"));
    }
    if form.phone.trim().chars().count() < MIN_PHONE_LEN {
        errors.push(FieldError::new("phone", "Please enter a valid phone number"));
    }
    if form.college.trim().chars().count() < MIN_NAME_LEN {
        errors.push(FieldError::new(
            "college",
            "College name must be at least 2 characters",
        ));
    }
    if errors.is_empty() {
        Ok(())
    } else {
        Err(BookingError::InvalidForm { errors })
    }
}

pub fn validate_profile(input: &UpdateProfileInput) -> Result<(), SessionError> {
    if input.name.trim().is_empty() {
        return Err(SessionError::InvalidInput {
            message: "name is required".to_string(),
        });
    }
    if !is_valid_email(input.email.trim()) {
        return Err(SessionError::InvalidInput {
            message: "email is invalid".to_string(),
        });
    }
    Ok(())
}

pub fn validate_password_change(input: &ChangePasswordInput) -> Result<(), SessionError> {
    if input.new_password.is_empty() {
        return Err(SessionError::InvalidInput {
            message: "new password is required".to_string(),
        });
    }
    if input.new_password != input.confirm_password {
        return Err(SessionError::PasswordMismatch);
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidatedDraft {
    pub date: NaiveDate,
    pub price: f64,
    pub total_seats: u32,
}

pub fn validate_event_draft(input: &CreateEventInput) -> Result<ValidatedDraft, EventDraftError> {
    let required = [
        ("title", input.title.as_str()),
        ("description", input.description.as_str()),
        ("date", input.date.as_str()),
        ("time", input.time.as_str()),
        ("location", input.location.as_str()),
        ("college", input.college.as_str()),
        ("category", input.category.as_str()),
    ];
    let mut missing: Vec<&'static str> = required
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| *field)
        .collect();
    if input.price.is_none() {
        missing.push("price");
    }
    if input.total_seats.is_none() {
        missing.push("total_seats");
    }
    let (Some(price), Some(total_seats)) = (input.price, input.total_seats) else {
        return Err(EventDraftError::MissingFields { fields: missing });
    };
    if !missing.is_empty() {
        return Err(EventDraftError::MissingFields { fields: missing });
    }

    if !EVENT_CATEGORIES.contains(&input.category.as_str()) {
        return Err(EventDraftError::UnknownCategory {
            category: input.category.clone(),
        });
    }
    let date = NaiveDate::parse_from_str(input.date.trim(), "%Y-%m-%d").map_err(|err| {
        EventDraftError::InvalidInput {
            message: format!("date: {err}"),
        }
    })?;
    if !price.is_finite() || price < 0.0 {
        return Err(EventDraftError::InvalidInput {
            message: "price must be zero or more".to_string(),
        });
    }
    if total_seats < 1 {
        return Err(EventDraftError::InvalidInput {
            message: "total seats must be at least 1".to_string(),
        });
    }
    Ok(ValidatedDraft {
        date,
        price,
        total_seats,
    })
}
