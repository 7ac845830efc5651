use crate::kv_repo::KvRepo;
use crate::schema;
use crate::util::DbError;
use ex_core::error::SessionError;
use ex_core::sessions::IdentityStorage;
use rusqlite::Connection;
use std::path::Path;
use std::sync::Mutex;

pub struct SqliteStorage {
    conn: Mutex<Connection>,
}

impl SqliteStorage {
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    pub fn open(path: impl AsRef<Path>) -> Result<Self, DbError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let conn = schema::open_and_migrate(path)?;
        tracing::debug!(path = %path.display(), "opened identity storage");
        Ok(Self::new(conn))
    }

    pub fn in_memory() -> Result<Self, DbError> {
        Ok(Self::new(schema::with_test_db()?))
    }

    fn with_repo<T>(
        &self,
        f: impl FnOnce(&KvRepo<'_>) -> Result<T, DbError>,
    ) -> Result<T, SessionError> {
        let conn = self.conn.lock().map_err(|err| SessionError::Storage {
            message: err.to_string(),
        })?;
        Ok(f(&KvRepo::new(&conn))?)
    }
}

impl IdentityStorage for SqliteStorage {
    fn load(&self, key: &str) -> Result<Option<String>, SessionError> {
        self.with_repo(|repo| Ok(repo.get(key)?.map(|entry| entry.value)))
    }

    fn save(&self, key: &str, value: &str) -> Result<(), SessionError> {
        self.with_repo(|repo| repo.put(key, value).map(|_| ()))
    }

    fn remove(&self, key: &str) -> Result<(), SessionError> {
        self.with_repo(|repo| repo.delete(key).map(|_| ()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ex_core::sessions::{SessionStore, STORAGE_KEY};
    use ex_core::types::enums::Role;
    use std::time::Duration;

    #[tokio::test]
    async fn test_session_round_trips_through_sqlite() {
        let mut store =
            SessionStore::init(SqliteStorage::in_memory().unwrap()).with_auth_delay(Duration::ZERO);
        store.login("a@b.com", "pw").await.unwrap();
        assert!(store.storage().load(STORAGE_KEY).unwrap().is_some());

        store.logout().unwrap();
        assert!(store.storage().load(STORAGE_KEY).unwrap().is_none());
    }

    #[tokio::test]
    async fn test_identity_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("session.db");

        let mut first =
            SessionStore::init(SqliteStorage::open(&path).unwrap()).with_auth_delay(Duration::ZERO);
        let identity = first
            .login("fest.organizer@college.edu", "pw")
            .await
            .unwrap()
            .unwrap();
        drop(first);

        let second = SessionStore::init(SqliteStorage::open(&path).unwrap());
        let restored = second.current().unwrap();
        assert_eq!(restored, &identity);
        assert_eq!(restored.role, Role::Organizer);
    }

    #[test]
    fn test_corrupt_row_reads_as_signed_out() {
        let storage = SqliteStorage::in_memory().unwrap();
        storage.save(STORAGE_KEY, "{not json").unwrap();
        let store = SessionStore::init(storage);
        assert!(store.current().is_none());
    }
}
