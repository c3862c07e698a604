//! Immutable record of one completed focus interval.
//!
//! Sessions are write-once: created when a focus session finishes and never
//! mutated afterwards. They are the source of truth for all aggregate time
//! statistics. `note_snapshot` is copied at finish time and is independent
//! of later edits to the task's note field. A session keeps its `task_id`
//! even after the task is deleted, so lifetime totals survive deletion.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: Option<i64>,
    pub task_id: i64,
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
    pub minutes: u32,
    pub note_snapshot: Option<String>,
}
