//! SQLite-based persistence.
//!
//! Provides the storage side of the persistence collaborator:
//! - Key-value store for the active breathing session
//! - Activity log (journal entries, completed self-care activities)
//! - Current streak per activity kind

use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension};
use uuid::Uuid;

use super::data_dir;
use crate::error::DatabaseError;
use crate::streak::{ActivityKind, StreakRecord, UserStreaks};

const DATE_FMT: &str = "%Y-%m-%d";

/// SQLite database for session, activity, and streak storage.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Get a reference to the underlying SQLite connection.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Open the database at `~/.config/serenspace/serenspace.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self, DatabaseError> {
        let path = data_dir()?.join("serenspace.db");
        let conn = Connection::open(&path)
            .map_err(|source| DatabaseError::OpenFailed { path, source })?;
        // The CLI may be invoked from several processes at once.
        conn.busy_timeout(std::time::Duration::from_secs(5))?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory database (for tests).
    pub fn open_memory() -> Result<Self, DatabaseError> {
        let conn = Connection::open_in_memory().map_err(DatabaseError::from)?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), DatabaseError> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS kv (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS activities (
                id          TEXT PRIMARY KEY,
                kind        TEXT NOT NULL,
                recorded_on TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS streaks (
                kind          TEXT PRIMARY KEY,
                count         INTEGER NOT NULL,
                last_activity TEXT
            );

            CREATE INDEX IF NOT EXISTS idx_activities_kind_recorded_on
                ON activities(kind, recorded_on);",
        )?;
        Ok(())
    }

    // ── Key-value store ──────────────────────────────────────────────

    pub fn kv_get(&self, key: &str) -> Result<Option<String>, DatabaseError> {
        let value = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(value)
    }

    pub fn kv_set(&self, key: &str, value: &str) -> Result<(), DatabaseError> {
        self.conn.execute(
            "INSERT INTO kv (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )?;
        Ok(())
    }

    pub fn kv_delete(&self, key: &str) -> Result<(), DatabaseError> {
        self.conn
            .execute("DELETE FROM kv WHERE key = ?1", params![key])?;
        Ok(())
    }

    // ── Activity log ─────────────────────────────────────────────────

    /// Append an activity to the log and return its id.
    ///
    /// The log keeps every entry; per-day deduplication happens when the
    /// streak is derived from it.
    pub fn log_activity(
        &self,
        kind: ActivityKind,
        recorded_on: NaiveDate,
    ) -> Result<String, DatabaseError> {
        let id = Uuid::new_v4().to_string();
        self.conn.execute(
            "INSERT INTO activities (id, kind, recorded_on) VALUES (?1, ?2, ?3)",
            params![id, kind.as_str(), recorded_on.format(DATE_FMT).to_string()],
        )?;
        Ok(id)
    }

    /// Distinct activity dates for a kind, most recent first.
    pub fn activity_dates(&self, kind: ActivityKind) -> Result<Vec<NaiveDate>, DatabaseError> {
        let mut stmt = self.conn.prepare(
            "SELECT DISTINCT recorded_on FROM activities
             WHERE kind = ?1 ORDER BY recorded_on DESC",
        )?;
        let rows = stmt.query_map(params![kind.as_str()], |row| row.get::<_, String>(0))?;

        let mut dates = Vec::new();
        for row in rows {
            let text = row?;
            let date = NaiveDate::parse_from_str(&text, DATE_FMT)
                .map_err(|e| DatabaseError::QueryFailed(format!("bad date '{text}': {e}")))?;
            dates.push(date);
        }
        Ok(dates)
    }

    // ── Streaks ──────────────────────────────────────────────────────

    /// Current streak for a kind; a missing row reads as an empty streak.
    pub fn streak(&self, kind: ActivityKind) -> Result<StreakRecord, DatabaseError> {
        let row = self
            .conn
            .query_row(
                "SELECT count, last_activity FROM streaks WHERE kind = ?1",
                params![kind.as_str()],
                |row| {
                    Ok((
                        row.get::<_, u32>(0)?,
                        row.get::<_, Option<String>>(1)?,
                    ))
                },
            )
            .optional()?;

        let Some((count, last)) = row else {
            return Ok(StreakRecord::default());
        };
        let last_activity = match last {
            Some(text) => Some(
                NaiveDate::parse_from_str(&text, DATE_FMT)
                    .map_err(|e| DatabaseError::QueryFailed(format!("bad date '{text}': {e}")))?,
            ),
            None => None,
        };
        Ok(StreakRecord {
            count,
            last_activity,
        })
    }

    pub fn set_streak(
        &self,
        kind: ActivityKind,
        record: &StreakRecord,
    ) -> Result<(), DatabaseError> {
        let last = record
            .last_activity
            .map(|d| d.format(DATE_FMT).to_string());
        self.conn.execute(
            "INSERT INTO streaks (kind, count, last_activity) VALUES (?1, ?2, ?3)
             ON CONFLICT(kind) DO UPDATE SET
                count = excluded.count,
                last_activity = excluded.last_activity",
            params![kind.as_str(), record.count, last],
        )?;
        Ok(())
    }

    /// Both streaks at once, for display.
    pub fn user_streaks(&self) -> Result<UserStreaks, DatabaseError> {
        Ok(UserStreaks {
            journal: self.streak(ActivityKind::Journal)?,
            self_care: self.streak(ActivityKind::SelfCare)?,
        })
    }
}
