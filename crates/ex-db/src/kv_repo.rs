use crate::util::{from_rfc3339, to_rfc3339, DbError};
use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KvEntry {
    pub key: String,
    pub value: String,
    pub updated_at: DateTime<Utc>,
}

pub struct KvRepo<'a> {
    pub conn: &'a Connection,
}

impl<'a> KvRepo<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    pub fn get(&self, key: &str) -> Result<Option<KvEntry>, DbError> {
        let row = self
            .conn
            .query_row(
                "SELECT key, value, updated_at FROM kv_entries WHERE key = ?1",
                [key],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, String>(2)?,
                    ))
                },
            )
            .optional()?;
        let Some((key, value, updated_at)) = row else {
            return Ok(None);
        };
        Ok(Some(KvEntry {
            key,
            value,
            updated_at: from_rfc3339(&updated_at)?,
        }))
    }

    pub fn put(&self, key: &str, value: &str) -> Result<KvEntry, DbError> {
        let entry = KvEntry {
            key: key.to_string(),
            value: value.to_string(),
            updated_at: Utc::now(),
        };
        self.conn.execute(
            "INSERT INTO kv_entries (key, value, updated_at) VALUES (?1, ?2, ?3) \
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            (&entry.key, &entry.value, to_rfc3339(&entry.updated_at)),
        )?;
        Ok(entry)
    }

    pub fn delete(&self, key: &str) -> Result<bool, DbError> {
        let affected = self
            .conn
            .execute("DELETE FROM kv_entries WHERE key = ?1", [key])?;
        Ok(affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::with_test_db;

    #[test]
    fn test_put_get_delete() {
        let conn = with_test_db().unwrap();
        let repo = KvRepo::new(&conn);
        assert!(repo.get("missing").unwrap().is_none());

        repo.put("k", "one").unwrap();
        let updated = repo.put("k", "two").unwrap();
        let stored = repo.get("k").unwrap().unwrap();
        assert_eq!(stored.value, "two");
        assert_eq!(stored.updated_at.timestamp(), updated.updated_at.timestamp());

        assert!(repo.delete("k").unwrap());
        assert!(!repo.delete("k").unwrap());
        assert!(repo.get("k").unwrap().is_none());
    }
}
