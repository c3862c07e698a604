//! Session repository: history queries and aggregate time statistics.
//!
//! Sessions are append-only; this module never updates or deletes them.
//! Per-category totals join through `tasks`, so sessions whose task has
//! been deleted count toward the lifetime total but not toward any
//! category.

use chrono::{DateTime, Duration, Local, Utc};
use rusqlite::{params, Connection, Row};

use super::db::Db;
use crate::libs::error::CoreError;
use crate::libs::session::Session;
use crate::libs::task::TaskCategory;

const SELECT_SESSIONS: &str = "SELECT id, task_id, start_at, end_at, minutes, note_snapshot FROM sessions";
const WHERE_TASK: &str = "WHERE task_id = ?1 ORDER BY end_at ASC";
const ORDER_END: &str = "ORDER BY end_at ASC";
const WHERE_RANGE: &str = "WHERE end_at >= ?1 AND end_at <= ?2 ORDER BY end_at ASC";
const SUM_RANGE: &str = "SELECT COALESCE(SUM(minutes), 0) FROM sessions WHERE end_at >= ?1 AND end_at <= ?2";
const SUM_ALL: &str = "SELECT COALESCE(SUM(minutes), 0) FROM sessions";
const SUM_BY_CATEGORY: &str = "SELECT COALESCE(SUM(s.minutes), 0) FROM sessions s JOIN tasks t ON t.id = s.task_id WHERE t.category = ?1";

pub(crate) fn map_session(row: &Row) -> rusqlite::Result<Session> {
    Ok(Session {
        id: row.get(0)?,
        task_id: row.get(1)?,
        start_at: row.get(2)?,
        end_at: row.get(3)?,
        minutes: row.get(4)?,
        note_snapshot: row.get(5)?,
    })
}

pub struct Sessions {
    pub conn: Connection,
}

impl Sessions {
    pub fn new() -> Result<Sessions, CoreError> {
        let db = Db::new()?;
        Ok(Sessions { conn: db.conn })
    }

    pub fn fetch_all(&mut self) -> Result<Vec<Session>, CoreError> {
        let sql = format!("{} {}", SELECT_SESSIONS, ORDER_END);
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map([], map_session)?;
        let mut sessions = Vec::new();
        for session in rows {
            sessions.push(session?);
        }
        Ok(sessions)
    }

    pub fn fetch_by_task(&mut self, task_id: i64) -> Result<Vec<Session>, CoreError> {
        let sql = format!("{} {}", SELECT_SESSIONS, WHERE_TASK);
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(params![task_id], map_session)?;
        let mut sessions = Vec::new();
        for session in rows {
            sessions.push(session?);
        }
        Ok(sessions)
    }

    /// Sessions that ended within the given range, inclusive on both ends.
    pub fn fetch_range(&mut self, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Vec<Session>, CoreError> {
        let sql = format!("{} {}", SELECT_SESSIONS, WHERE_RANGE);
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(params![start, end], map_session)?;
        let mut sessions = Vec::new();
        for session in rows {
            sessions.push(session?);
        }
        Ok(sessions)
    }

    /// Total minutes of sessions that ended within the given range,
    /// inclusive on both ends.
    pub fn minutes_in_range(&mut self, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<u32, CoreError> {
        let minutes: u32 = self.conn.query_row(SUM_RANGE, params![start, end], |row| row.get(0))?;
        Ok(minutes)
    }

    /// Minutes of deep work finished today, by the local calendar day.
    pub fn minutes_today(&mut self) -> Result<u32, CoreError> {
        let now = Local::now();
        // Midnight can be ambiguous or skipped around a DST shift; take
        // the earliest interpretation, or the first valid hour after it.
        let naive_midnight = now
            .date_naive()
            .and_hms_opt(0, 0, 0)
            .ok_or_else(|| CoreError::StorageFailure("could not resolve start of local day".to_string()))?;
        let start_of_day = naive_midnight
            .and_local_timezone(Local)
            .earliest()
            .or_else(|| (naive_midnight + Duration::hours(1)).and_local_timezone(Local).earliest())
            .ok_or_else(|| CoreError::StorageFailure("could not resolve start of local day".to_string()))?;
        self.minutes_in_range(start_of_day.with_timezone(&Utc), now.with_timezone(&Utc))
    }

    pub fn total_minutes(&mut self) -> Result<u32, CoreError> {
        let minutes: u32 = self.conn.query_row(SUM_ALL, [], |row| row.get(0))?;
        Ok(minutes)
    }

    pub fn total_minutes_by_category(&mut self, category: TaskCategory) -> Result<u32, CoreError> {
        let minutes: u32 = self.conn.query_row(SUM_BY_CATEGORY, params![category.as_str()], |row| row.get(0))?;
        Ok(minutes)
    }
}
