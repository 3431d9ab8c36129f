//! SQLite-backed user store.
//!
//! Provides persistent storage for:
//! - User accounts with their points, streak and last check-in day
//! - The append-only emotion log of each user
//!
//! Every `update` runs inside an `IMMEDIATE` transaction, which takes the
//! database write lock up front; the read, the caller's mutation and the
//! write-back therefore form one atomic step even across processes.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{params, Connection, OptionalExtension, TransactionBehavior};
use tracing::{debug, info};

use super::data_dir;
use super::migrations;
use super::record::{EmotionLogEntry, UserRecord};
use super::store::{UpdateFn, UserStore};
use crate::emotion::Emotion;
use crate::error::{CoreError, Result, StoreError};

const USER_COLUMNS: &str =
    "id, email, points, current_streak, last_checkin_date, boosters_completed, joined_at";

/// Undecoded `users` row.
struct UserRow {
    id: String,
    email: String,
    points: i64,
    current_streak: i64,
    last_checkin_date: Option<String>,
    boosters_completed: u32,
    joined_at: String,
}

impl UserRow {
    fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            email: row.get(1)?,
            points: row.get(2)?,
            current_streak: row.get(3)?,
            last_checkin_date: row.get(4)?,
            boosters_completed: row.get(5)?,
            joined_at: row.get(6)?,
        })
    }

    fn decode(self, emotion_log: Vec<EmotionLogEntry>) -> Result<UserRecord, StoreError> {
        let last_checkin_date = self
            .last_checkin_date
            .as_deref()
            .map(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d"))
            .transpose()
            .map_err(|e| corrupt(&self.id, format!("last_checkin_date: {e}")))?;
        let joined_at = parse_timestamp(&self.joined_at)
            .map_err(|e| corrupt(&self.id, format!("joined_at: {e}")))?;

        Ok(UserRecord {
            id: self.id,
            email: self.email,
            points: self.points,
            current_streak: self.current_streak,
            last_checkin_date,
            emotion_log,
            boosters_completed: self.boosters_completed,
            joined_at,
        })
    }
}

fn corrupt(id: &str, message: String) -> StoreError {
    StoreError::Corrupt {
        id: id.to_string(),
        message,
    }
}

fn parse_timestamp(s: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(s).map(|dt| dt.with_timezone(&Utc))
}

/// SQLite database for user records.
pub struct UserDb {
    conn: Mutex<Connection>,
}

impl UserDb {
    /// Open the database at `<data dir>/soultracker.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the data directory is unusable or the database
    /// cannot be opened or migrated.
    pub fn open() -> Result<Self> {
        let path = data_dir()?.join("soultracker.db");
        Ok(Self::open_at(&path)?)
    }

    /// Open (or create) the database at `path`.
    pub fn open_at(path: &Path) -> Result<Self, StoreError> {
        let conn = Connection::open(path).map_err(|source| StoreError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "opened user database");
        Self::from_connection(conn)
    }

    /// Open an in-memory database.
    pub fn open_memory() -> Result<Self, StoreError> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self, StoreError> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        migrations::migrate(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, StoreError> {
        self.conn.lock().map_err(|_| StoreError::Poisoned)
    }

    fn load_log(conn: &Connection, user_id: &str) -> Result<Vec<EmotionLogEntry>, StoreError> {
        let mut stmt = conn.prepare(
            "SELECT emotion, logged_at FROM emotion_log WHERE user_id = ?1 ORDER BY id",
        )?;
        let rows = stmt.query_map(params![user_id], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;

        let mut log = Vec::new();
        for row in rows {
            let (emotion, logged_at) = row?;
            let emotion = emotion
                .parse::<Emotion>()
                .map_err(|e| corrupt(user_id, e))?;
            let logged_at = parse_timestamp(&logged_at)
                .map_err(|e| corrupt(user_id, format!("logged_at: {e}")))?;
            log.push(EmotionLogEntry { emotion, logged_at });
        }
        Ok(log)
    }

    fn load_where(
        conn: &Connection,
        clause: &str,
        value: &str,
    ) -> Result<Option<UserRecord>, StoreError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE {clause} = ?1");
        let row = conn
            .query_row(&sql, params![value], UserRow::from_row)
            .optional()?;
        match row {
            Some(row) => {
                let log = Self::load_log(conn, &row.id)?;
                Ok(Some(row.decode(log)?))
            }
            None => Ok(None),
        }
    }

    fn append_log(conn: &Connection, user_id: &str, entries: &[EmotionLogEntry]) -> Result<(), StoreError> {
        let mut stmt = conn.prepare(
            "INSERT INTO emotion_log (user_id, emotion, logged_at) VALUES (?1, ?2, ?3)",
        )?;
        for entry in entries {
            stmt.execute(params![
                user_id,
                entry.emotion.as_str(),
                entry.logged_at.to_rfc3339(),
            ])?;
        }
        Ok(())
    }

    fn write_user(conn: &Connection, user: &UserRecord) -> Result<(), StoreError> {
        conn.execute(
            "UPDATE users
             SET email = ?2, points = ?3, current_streak = ?4,
                 last_checkin_date = ?5, boosters_completed = ?6
             WHERE id = ?1",
            params![
                user.id,
                user.email,
                user.points,
                user.current_streak,
                user.last_checkin_date.map(|d| d.format("%Y-%m-%d").to_string()),
                user.boosters_completed,
            ],
        )?;
        Ok(())
    }

    /// Persist `draft` over `current`; the log is appended when only new
    /// entries were added and rewritten otherwise.
    fn write_back(conn: &Connection, current: &UserRecord, draft: &UserRecord) -> Result<(), StoreError> {
        Self::write_user(conn, draft)?;
        if draft.emotion_log.starts_with(&current.emotion_log) {
            Self::append_log(conn, &draft.id, &draft.emotion_log[current.emotion_log.len()..])
        } else {
            conn.execute("DELETE FROM emotion_log WHERE user_id = ?1", params![draft.id])?;
            Self::append_log(conn, &draft.id, &draft.emotion_log)
        }
    }
}

impl UserStore for UserDb {
    fn get(&self, id: &str) -> Result<UserRecord, StoreError> {
        let conn = self.lock()?;
        Self::load_where(&conn, "id", id)?.ok_or_else(|| StoreError::UserNotFound(id.to_string()))
    }

    fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, StoreError> {
        let conn = self.lock()?;
        Self::load_where(&conn, "email", email)
    }

    fn insert(&self, record: UserRecord) -> Result<(), StoreError> {
        let mut conn = self.lock()?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        let taken: bool = tx.query_row(
            "SELECT EXISTS(SELECT 1 FROM users WHERE email = ?1)",
            params![record.email],
            |row| row.get(0),
        )?;
        if taken {
            return Err(StoreError::DuplicateEmail(record.email));
        }

        tx.execute(
            "INSERT INTO users (id, email, points, current_streak, last_checkin_date, boosters_completed, joined_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                record.id,
                record.email,
                record.points,
                record.current_streak,
                record.last_checkin_date.map(|d| d.format("%Y-%m-%d").to_string()),
                record.boosters_completed,
                record.joined_at.to_rfc3339(),
            ],
        )?;
        Self::append_log(&tx, &record.id, &record.emotion_log)?;
        tx.commit()?;

        info!(user_id = %record.id, "user inserted");
        Ok(())
    }

    fn update(&self, id: &str, f: &mut UpdateFn<'_>) -> Result<UserRecord> {
        let mut conn = self.lock()?;
        let tx = conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(StoreError::from)?;

        let current = Self::load_where(&tx, "id", id)?
            .ok_or_else(|| StoreError::UserNotFound(id.to_string()))?;
        let mut draft = current.clone();
        // Dropping `tx` on error rolls back.
        f(&mut draft)?;

        Self::write_back(&tx, &current, &draft)?;
        tx.commit().map_err(StoreError::from)?;

        info!(user_id = %id, points = draft.points, streak = draft.current_streak, "user updated");
        Ok(draft)
    }

    fn all(&self) -> Result<Vec<UserRecord>, StoreError> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(&format!("SELECT {USER_COLUMNS} FROM users ORDER BY id"))?;
        let rows = stmt
            .query_map([], UserRow::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        rows.into_iter()
            .map(|row| {
                let log = Self::load_log(&conn, &row.id)?;
                row.decode(log)
            })
            .collect()
    }
}
