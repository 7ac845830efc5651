pub mod identity_repo;
pub mod kv_repo;
pub mod schema;
pub mod util;

pub use identity_repo::SqliteStorage;
