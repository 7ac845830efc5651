pub mod booking;
pub mod catalog;
pub mod catalog_file;
pub mod dashboard;
pub mod drafts;
pub mod error;
pub mod filter;
pub mod format;
pub mod metrics;
pub mod sessions;
pub mod validation;

pub mod types;

pub use crate::catalog::Catalog;
pub use crate::error::StorefrontError;
pub use crate::sessions::{IdentityStorage, SessionStore};
