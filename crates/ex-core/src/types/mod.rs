pub mod criteria;
pub mod enums;
pub mod event;
pub mod identity;
pub mod ids;
pub mod io;
pub mod past_event;
pub mod ticket;

pub use criteria::{FilterCriteria, RawFilter};
pub use enums::{AvailabilityTier, PriceBucket, Role, TicketStatus, TierColor};
pub use event::{EventRecord, Seats};
pub use identity::SessionIdentity;
pub use ids::{EventId, IdError, OrganizerId, PastEventId, TicketId, UserId};
pub use io::{
    ChangePasswordInput, CreateEventInput, FieldError, LoginInput, RegisterInput,
    RegistrationForm, UpdateProfileInput,
};
pub use past_event::{PastEvent, Testimonial};
pub use ticket::{BookingQuote, Ticket};
