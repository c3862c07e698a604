//! Task repository: CRUD plus the lifecycle state machine.
//!
//! Owns every legal transition of a task (`cold -> focusing -> warm ->
//! done`) and the guards around them. The multi-record `record_finish`
//! operation (task mutation plus session append) runs in one SQLite
//! transaction so a crash can never leave the two halves inconsistent.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};

use super::db::Db;
use crate::libs::error::CoreError;
use crate::libs::session::Session;
use crate::libs::task::{validate_minutes, Task, TaskCategory, TaskFilter, TaskState};

const INSERT_TASK: &str = "INSERT INTO tasks (title, estimate_minutes, spent_minutes, state, category, last_finish_note, last_session_end_at, session_count, created_at, updated_at)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)";
const SELECT_TASKS: &str = "SELECT id, title, estimate_minutes, spent_minutes, state, category, last_finish_note, last_session_end_at, session_count, created_at, updated_at FROM tasks";
const WHERE_ID: &str = "WHERE id = ?1";
const WHERE_STATE: &str = "WHERE state = ?1";
const WHERE_NOT_DONE: &str = "WHERE state != 'done'";
const ORDER_CREATED: &str = "ORDER BY created_at ASC, id ASC";
const UPDATE_DETAILS: &str = "UPDATE tasks SET title = ?2, estimate_minutes = ?3, category = ?4, last_finish_note = ?5, updated_at = ?6 WHERE id = ?1";
const UPDATE_STATE: &str = "UPDATE tasks SET state = ?2, updated_at = ?3 WHERE id = ?1";
const UPDATE_FINISH: &str = "UPDATE tasks SET spent_minutes = spent_minutes + ?2, session_count = session_count + 1, last_session_end_at = ?3, last_finish_note = ?4, state = 'warm', updated_at = ?3 WHERE id = ?1";
const INSERT_SESSION: &str = "INSERT INTO sessions (task_id, start_at, end_at, minutes, note_snapshot) VALUES (?1, ?2, ?3, ?4, ?5)";
const DELETE_TASK: &str = "DELETE FROM tasks WHERE id = ?1";

pub(crate) fn map_task(row: &Row) -> rusqlite::Result<Task> {
    let state: String = row.get(4)?;
    let category: String = row.get(5)?;
    Ok(Task {
        id: row.get(0)?,
        title: row.get(1)?,
        estimate_minutes: row.get(2)?,
        spent_minutes: row.get(3)?,
        state: TaskState::parse(&state).map_err(|e| rusqlite::Error::FromSqlConversionFailure(4, rusqlite::types::Type::Text, Box::new(e)))?,
        category: TaskCategory::parse(&category).map_err(|e| rusqlite::Error::FromSqlConversionFailure(5, rusqlite::types::Type::Text, Box::new(e)))?,
        last_finish_note: row.get(6)?,
        last_session_end_at: row.get(7)?,
        session_count: row.get(8)?,
        created_at: row.get(9)?,
        updated_at: row.get(10)?,
    })
}

pub struct Tasks {
    pub conn: Connection,
}

impl Tasks {
    pub fn new() -> Result<Tasks, CoreError> {
        let db = Db::new()?;
        Ok(Tasks { conn: db.conn })
    }

    /// Inserts a new task and returns it with its assigned id.
    pub fn insert(&mut self, task: &Task) -> Result<Task, CoreError> {
        if let Some(estimate) = task.estimate_minutes {
            validate_minutes(estimate, "estimate")?;
        }
        self.conn.execute(
            INSERT_TASK,
            params![
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
        let id = self.conn.last_insert_rowid();
        self.get_by_id(id)
    }

    pub fn fetch(&mut self, filter: TaskFilter) -> Result<Vec<Task>, CoreError> {
        let (sql, state_param) = match filter {
            TaskFilter::All => (format!("{} {}", SELECT_TASKS, ORDER_CREATED), None),
            TaskFilter::Active => (format!("{} {} {}", SELECT_TASKS, WHERE_NOT_DONE, ORDER_CREATED), None),
            TaskFilter::Done => (format!("{} {} {}", SELECT_TASKS, WHERE_STATE, ORDER_CREATED), Some(TaskState::Done)),
            TaskFilter::ByState(state) => (format!("{} {} {}", SELECT_TASKS, WHERE_STATE, ORDER_CREATED), Some(state)),
        };
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = match state_param {
            Some(state) => stmt.query_map(params![state.as_str()], map_task)?,
            None => stmt.query_map([], map_task)?,
        };
        let mut tasks = Vec::new();
        for task in rows {
            tasks.push(task?);
        }
        Ok(tasks)
    }

    pub fn get_by_id(&mut self, id: i64) -> Result<Task, CoreError> {
        let sql = format!("{} {}", SELECT_TASKS, WHERE_ID);
        let task = self.conn.query_row(&sql, params![id], map_task).optional()?;
        task.ok_or_else(|| CoreError::NotFound(format!("task {}", id)))
    }

    /// The task currently holding the open session, if any. Queried through
    /// the state index; this is how the one-focusing invariant is checked.
    pub fn fetch_focusing(&mut self) -> Result<Option<Task>, CoreError> {
        let sql = format!("{} {}", SELECT_TASKS, WHERE_STATE);
        let task = self.conn.query_row(&sql, params![TaskState::Focusing.as_str()], map_task).optional()?;
        Ok(task)
    }

    /// Edits title, estimate, category or note. Permitted in any state and
    /// never changes `state` itself.
    pub fn edit(&mut self, id: i64, title: Option<&str>, estimate_minutes: Option<u32>, note: Option<&str>) -> Result<Task, CoreError> {
        let task = self.get_by_id(id)?;
        let title = match title {
            Some(t) if !t.trim().is_empty() => t.trim().to_string(),
            Some(_) => return Err(CoreError::InvalidArgument("title must not be blank".to_string())),
            None => task.title.clone(),
        };
        let estimate = match estimate_minutes {
            Some(minutes) => Some(validate_minutes(minutes, "estimate")?),
            None => task.estimate_minutes,
        };
        let note = match note {
            Some(n) if !n.trim().is_empty() => Some(n.trim().to_string()),
            Some(_) => None,
            None => task.last_finish_note.clone(),
        };
        self.conn
            .execute(UPDATE_DETAILS, params![id, title, estimate, task.category.as_str(), note, Utc::now()])?;
        self.get_by_id(id)
    }

    /// Flips the task state. Used by the focus manager for the
    /// `start`/`abandon` transitions; refreshes `updated_at`.
    pub fn set_state(&mut self, id: i64, state: TaskState) -> Result<Task, CoreError> {
        self.get_by_id(id)?;
        self.conn.execute(UPDATE_STATE, params![id, state.as_str(), Utc::now()])?;
        self.get_by_id(id)
    }

    /// Archives a task. Idempotent: marking a `done` task done again is a
    /// no-op and counts nothing.
    pub fn mark_done(&mut self, id: i64) -> Result<Task, CoreError> {
        let task = self.get_by_id(id)?;
        if task.state == TaskState::Done {
            return Ok(task);
        }
        self.set_state(id, TaskState::Done)
    }

    /// Brings a task back from the archive: `warm` if it has completed
    /// sessions, `cold` otherwise. A non-done task is returned untouched.
    pub fn restore(&mut self, id: i64) -> Result<Task, CoreError> {
        let task = self.get_by_id(id)?;
        if task.state != TaskState::Done {
            return Ok(task);
        }
        let next = if task.session_count > 0 { TaskState::Warm } else { TaskState::Cold };
        self.set_state(id, next)
    }

    /// Records a finished focus interval: mutates the task and appends the
    /// session as one transaction, so either both land or neither does.
    pub fn record_finish(&mut self, id: i64, start_at: DateTime<Utc>, minutes: u32, note: Option<&str>) -> Result<(Task, Session), CoreError> {
        let task = self.get_by_id(id)?;
        if task.state != TaskState::Focusing {
            return Err(CoreError::InvalidState(format!("task {} is not focusing", id)));
        }
        if minutes == 0 {
            return Err(CoreError::InvalidArgument("a session credits at least one minute".to_string()));
        }

        let now = Utc::now();
        let note = note.map(str::trim).filter(|n| !n.is_empty());
        // An empty note keeps the previous finish note on the task; the
        // session snapshot stays NULL in that case.
        let task_note = note.map(String::from).or_else(|| task.last_finish_note.clone());

        let tx = self.conn.transaction()?;
        tx.execute(UPDATE_FINISH, params![id, minutes, now, task_note])?;
        tx.execute(INSERT_SESSION, params![id, start_at, now, minutes, note])?;
        let session_id = tx.last_insert_rowid();
        tx.commit()?;

        let session = Session {
            id: Some(session_id),
            task_id: id,
            start_at,
            end_at: now,
            minutes,
            note_snapshot: note.map(String::from),
        };
        Ok((self.get_by_id(id)?, session))
    }

    /// Deletes a task. Its sessions are retained and detached, so lifetime
    /// statistics keep counting them.
    pub fn delete(&mut self, id: i64) -> Result<(), CoreError> {
        let deleted = self.conn.execute(DELETE_TASK, params![id])?;
        if deleted == 0 {
            return Err(CoreError::NotFound(format!("task {}", id)));
        }
        Ok(())
    }
}
