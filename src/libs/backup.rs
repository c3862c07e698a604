//! Backup facility: full export and destructive, atomic import.
//!
//! The backup document is a single JSON file carrying a version tag, an
//! export timestamp and every record of every collection. Import rejects
//! any other version wholesale, then replaces the entire content of the
//! task, session and settings collections in one transaction: restore is
//! a replacement, never a merge, and a failure partway rolls the whole
//! thing back.
//!
//! Because import discards existing data, the caller is expected to
//! confirm with the user first; the `import` command does so via a
//! dialoguer prompt.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};

use crate::db::db::Db;
use crate::db::sessions::map_session;
use crate::db::tasks::map_task;
use crate::libs::error::CoreError;
use crate::libs::session::Session;
use crate::libs::task::Task;

pub const BACKUP_VERSION: &str = "1.0.0";

const SELECT_TASKS: &str = "SELECT id, title, estimate_minutes, spent_minutes, state, category, last_finish_note, last_session_end_at, session_count, created_at, updated_at FROM tasks ORDER BY id ASC";
const SELECT_SESSIONS: &str = "SELECT id, task_id, start_at, end_at, minutes, note_snapshot FROM sessions ORDER BY id ASC";
const SELECT_SETTINGS: &str = "SELECT id, value, updated_at FROM settings ORDER BY id ASC";
const INSERT_TASK: &str = "INSERT INTO tasks (id, title, estimate_minutes, spent_minutes, state, category, last_finish_note, last_session_end_at, session_count, created_at, updated_at)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)";
const INSERT_SESSION: &str = "INSERT INTO sessions (id, task_id, start_at, end_at, minutes, note_snapshot) VALUES (?1, ?2, ?3, ?4, ?5, ?6)";
const INSERT_SETTING: &str = "INSERT INTO settings (id, value, updated_at) VALUES (?1, ?2, ?3)";

/// A raw settings row. The value keeps its stored JSON shape so a
/// round-trip does not reformat it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettingRecord {
    pub id: String,
    pub value: serde_json::Value,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackupPayload {
    pub version: String,
    pub exported_at: DateTime<Utc>,
    pub tasks: Vec<Task>,
    pub sessions: Vec<Session>,
    pub settings: Vec<SettingRecord>,
}

pub struct Backup {
    pub conn: Connection,
}

impl Backup {
    pub fn new() -> Result<Backup, CoreError> {
        let db = Db::new()?;
        Ok(Backup { conn: db.conn })
    }

    /// Snapshots every record in every collection.
    pub fn export(&mut self) -> Result<BackupPayload, CoreError> {
        let mut tasks = Vec::new();
        {
            let mut stmt = self.conn.prepare(SELECT_TASKS)?;
            for task in stmt.query_map([], map_task)? {
                tasks.push(task?);
            }
        }

        let mut sessions = Vec::new();
        {
            let mut stmt = self.conn.prepare(SELECT_SESSIONS)?;
            for session in stmt.query_map([], map_session)? {
                sessions.push(session?);
            }
        }

        let mut settings = Vec::new();
        {
            let mut stmt = self.conn.prepare(SELECT_SETTINGS)?;
            let rows = stmt.query_map([], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?, row.get::<_, DateTime<Utc>>(2)?))
            })?;
            for row in rows {
                let (id, value, updated_at) = row?;
                settings.push(SettingRecord {
                    id,
                    value: serde_json::from_str(&value)?,
                    updated_at,
                });
            }
        }

        Ok(BackupPayload {
            version: BACKUP_VERSION.to_string(),
            exported_at: Utc::now(),
            tasks,
            sessions,
            settings,
        })
    }

    /// Replaces the full store content with the payload. All-or-nothing:
    /// the three collections are swapped inside one transaction.
    pub fn import(&mut self, payload: &BackupPayload) -> Result<(), CoreError> {
        if payload.version != BACKUP_VERSION {
            return Err(CoreError::VersionMismatch {
                expected: BACKUP_VERSION.to_string(),
                found: payload.version.clone(),
            });
        }

        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM tasks", [])?;
        tx.execute("DELETE FROM sessions", [])?;
        tx.execute("DELETE FROM settings", [])?;

        for task in &payload.tasks {
            tx.execute(
                INSERT_TASK,
                params![
                    task.id,
                    task.title,
                    task.estimate_minutes,
                    task.spent_minutes,
                    task.state.as_str(),
                    task.category.as_str(),
                    task.last_finish_note,
                    task.last_session_end_at,
                    task.session_count,
                    task.created_at,
                    task.updated_at,
                ],
            )?;
        }
        for session in &payload.sessions {
            tx.execute(
                INSERT_SESSION,
                params![session.id, session.task_id, session.start_at, session.end_at, session.minutes, session.note_snapshot],
            )?;
        }
        for setting in &payload.settings {
            tx.execute(INSERT_SETTING, params![setting.id, serde_json::to_string(&setting.value)?, setting.updated_at])?;
        }

        tx.commit()?;
        Ok(())
    }
}
