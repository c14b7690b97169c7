use sqlx::Row;
use teloxide::types::ChatId;
use thiserror::Error;

use super::Database;

/// Joins the records inside a user's saved-flight blob.
pub const RECORD_SEPARATOR: &str = "; ";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// One delimited text blob of saved flights per user, keyed by chat id.
/// Records are appended, never edited; duplicates are allowed.
#[derive(Clone)]
pub struct FlightRecordStore {
    db: Database,
}

impl FlightRecordStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// The user's full record blob, or `None` if they have never saved one.
    pub async fn get(&self, user_id: ChatId) -> Result<Option<String>, StoreError> {
        let row = sqlx::query("SELECT flights FROM flights WHERE user_id = ?")
            .bind(user_id.0)
            .fetch_optional(&self.db.pool)
            .await?;

        Ok(row.map(|r| r.get::<String, _>("flights")))
    }

    /// Append one `"<flight_number> : <summary>"` record and write the whole
    /// blob back (replace-on-write, not a true append).
    pub async fn append(
        &self,
        user_id: ChatId,
        flight_number: &str,
        summary: &str,
    ) -> Result<(), StoreError> {
        let record = format!("{flight_number} : {summary}");
        let blob = match self.get(user_id).await? {
            Some(existing) => format!("{existing}{RECORD_SEPARATOR}{record}"),
            None => record,
        };

        sqlx::query(
            r#"
            INSERT INTO flights (user_id, flights) VALUES (?, ?)
            ON CONFLICT (user_id) DO UPDATE SET flights = excluded.flights
            "#,
        )
        .bind(user_id.0)
        .bind(&blob)
        .execute(&self.db.pool)
        .await?;

        Ok(())
    }
}
