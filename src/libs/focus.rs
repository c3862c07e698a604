//! Focus session manager: one open session, durable across restarts.
//!
//! The manager owns a single snapshot (`{ task_id, started_at,
//! origin_state }`) persisted as a JSON file in the data directory. The
//! snapshot is written *before* the task is flipped to `focusing`, so a
//! task stuck in `focusing` after a crash can always be explained on the
//! next start-up. When the snapshot itself is lost, the session is
//! reconstructed from the store with `started_at = now`: elapsed time from
//! before the crash is not recoverable and is never retroactively
//! credited.
//!
//! A session has no timeout and no background expiry; it may stay open
//! across days until the user finishes or abandons it.

use std::fs;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::db::tasks::Tasks;
use crate::libs::data_storage::DataStorage;
use crate::libs::error::CoreError;
use crate::libs::session::Session;
use crate::libs::task::{Task, TaskState};
use crate::msg_debug;

pub const SNAPSHOT_FILE_NAME: &str = "focus_session.json";

/// Minimum credited session length, in milliseconds. Finishing earlier
/// than this still credits one full minute.
const MIN_SESSION_MS: i64 = 60_000;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FocusSnapshot {
    pub task_id: i64,
    pub started_at: DateTime<Utc>,
    /// The state the task reverts to when the session is abandoned.
    pub origin_state: TaskState,
}

impl FocusSnapshot {
    /// Whole minutes to credit for a session finishing at `now`: at least
    /// one, rounding up.
    pub fn elapsed_minutes(&self, now: DateTime<Utc>) -> u32 {
        let elapsed_ms = (now - self.started_at).num_milliseconds().max(MIN_SESSION_MS);
        ((elapsed_ms + MIN_SESSION_MS - 1) / MIN_SESSION_MS) as u32
    }
}

pub struct FocusManager {
    tasks: Tasks,
    snapshot_path: PathBuf,
    snapshot: Option<FocusSnapshot>,
}

impl FocusManager {
    /// Opens the manager and rehydrates any in-progress session.
    ///
    /// Resolution order: a valid snapshot file wins; a snapshot naming a
    /// missing or non-focusing task is discarded (the store is
    /// authoritative); with no snapshot, a task found `focusing` in the
    /// store gets a reconstructed snapshot with `started_at = now`.
    pub fn new() -> Result<Self, CoreError> {
        let snapshot_path = DataStorage::new().get_path(SNAPSHOT_FILE_NAME)?;
        let mut manager = FocusManager {
            tasks: Tasks::new()?,
            snapshot_path,
            snapshot: None,
        };
        manager.rehydrate()?;
        Ok(manager)
    }

    fn rehydrate(&mut self) -> Result<(), CoreError> {
        if let Some(snapshot) = self.load_snapshot_file() {
            match self.tasks.get_by_id(snapshot.task_id) {
                Ok(task) if task.state == TaskState::Focusing => {
                    self.snapshot = Some(snapshot);
                    return Ok(());
                }
                Ok(_) | Err(CoreError::NotFound(_)) => {
                    msg_debug!("Discarding stale focus snapshot");
                    self.clear_snapshot()?;
                }
                Err(err) => return Err(err),
            }
        }

        // Crash recovery: a task stuck in `focusing` with no snapshot.
        if let Some(task) = self.tasks.fetch_focusing()? {
            let origin_state = if task.session_count > 0 { TaskState::Warm } else { TaskState::Cold };
            let snapshot = FocusSnapshot {
                task_id: task.id.unwrap_or_default(),
                started_at: Utc::now(),
                origin_state,
            };
            self.write_snapshot(&snapshot)?;
            self.snapshot = Some(snapshot);
        }
        Ok(())
    }

    fn load_snapshot_file(&self) -> Option<FocusSnapshot> {
        let raw = fs::read_to_string(&self.snapshot_path).ok()?;
        match serde_json::from_str(&raw) {
            Ok(snapshot) => Some(snapshot),
            Err(_) => {
                msg_debug!("Ignoring unreadable focus snapshot file");
                None
            }
        }
    }

    fn write_snapshot(&self, snapshot: &FocusSnapshot) -> Result<(), CoreError> {
        let json = serde_json::to_string(snapshot)?;
        fs::write(&self.snapshot_path, json)?;
        Ok(())
    }

    fn clear_snapshot(&mut self) -> Result<(), CoreError> {
        self.snapshot = None;
        if self.snapshot_path.exists() {
            fs::remove_file(&self.snapshot_path)?;
        }
        Ok(())
    }

    /// Opens a focus session on a task.
    ///
    /// Fails with `Conflict` while a different task is focusing and with
    /// `InvalidState` for archived tasks. Starting the task that is
    /// already focusing adopts the existing `origin_state` instead of
    /// resetting it. The snapshot is durable before the state flip.
    pub fn start(&mut self, task_id: i64) -> Result<Task, CoreError> {
        if let Some(open) = self.tasks.fetch_focusing()? {
            if open.id != Some(task_id) {
                return Err(CoreError::Conflict(format!("task {} ('{}') is already focusing", open.id.unwrap_or_default(), open.title)));
            }
        }

        let task = self.tasks.get_by_id(task_id)?;
        if task.state == TaskState::Done {
            return Err(CoreError::InvalidState("an archived task cannot be started".to_string()));
        }

        let origin_state = if task.state == TaskState::Focusing {
            match &self.snapshot {
                Some(snapshot) if snapshot.task_id == task_id => snapshot.origin_state,
                _ => {
                    if task.session_count > 0 {
                        TaskState::Warm
                    } else {
                        TaskState::Cold
                    }
                }
            }
        } else {
            task.state
        };

        let snapshot = FocusSnapshot {
            task_id,
            started_at: Utc::now(),
            origin_state,
        };
        self.write_snapshot(&snapshot)?;
        self.snapshot = Some(snapshot);

        if task.state != TaskState::Focusing {
            return self.tasks.set_state(task_id, TaskState::Focusing);
        }
        Ok(task)
    }

    /// Closes the open session, crediting at least one minute and writing
    /// the task mutation and session record atomically.
    pub fn finish(&mut self, note: Option<&str>) -> Result<(Task, Session), CoreError> {
        let snapshot = self
            .snapshot
            .clone()
            .ok_or_else(|| CoreError::InvalidState("no focus session is open".to_string()))?;
        let minutes = snapshot.elapsed_minutes(Utc::now());
        let (task, session) = self.tasks.record_finish(snapshot.task_id, snapshot.started_at, minutes, note)?;
        self.clear_snapshot()?;
        Ok((task, session))
    }

    /// Discards the open session: the task reverts to its origin state,
    /// no session is recorded, no time is credited. Returns `None` when
    /// the task was deleted while the session was open.
    pub fn abandon(&mut self) -> Result<Option<Task>, CoreError> {
        let snapshot = self
            .snapshot
            .clone()
            .ok_or_else(|| CoreError::InvalidState("no focus session is open".to_string()))?;
        let task = match self.tasks.set_state(snapshot.task_id, snapshot.origin_state) {
            Ok(task) => Some(task),
            Err(CoreError::NotFound(_)) => None,
            Err(err) => return Err(err),
        };
        self.clear_snapshot()?;
        Ok(task)
    }

    /// The open session and its task, for status display.
    pub fn current(&mut self) -> Result<Option<(FocusSnapshot, Task)>, CoreError> {
        let snapshot = match &self.snapshot {
            Some(snapshot) => snapshot.clone(),
            None => return Ok(None),
        };
        let task = self.tasks.get_by_id(snapshot.task_id)?;
        Ok(Some((snapshot, task)))
    }
}
