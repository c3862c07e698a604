//! Task model and lifecycle states.
//!
//! A task moves through `cold -> focusing -> warm -> done`. `cold` means it
//! has never had a completed session, `warm` means it has at least one and
//! is not currently open, `focusing` means a session is open right now, and
//! `done` is the archive. At most one task in the whole store may be
//! `focusing` at any time; the focus manager enforces that at start time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::libs::error::CoreError;

/// Placeholder used when a task is created with a blank title.
pub const UNTITLED_TASK: &str = "Untitled task";

/// Upper bound for estimates and time windows, in minutes.
pub const MAX_MINUTES: u32 = 9999;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskState {
    Cold,
    Focusing,
    Warm,
    Done,
}

impl TaskState {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskState::Cold => "cold",
            TaskState::Focusing => "focusing",
            TaskState::Warm => "warm",
            TaskState::Done => "done",
        }
    }

    pub fn parse(value: &str) -> Result<Self, CoreError> {
        match value {
            "cold" => Ok(TaskState::Cold),
            "focusing" => Ok(TaskState::Focusing),
            "warm" => Ok(TaskState::Warm),
            "done" => Ok(TaskState::Done),
            other => Err(CoreError::StorageFailure(format!("unknown task state '{}'", other))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskCategory {
    Work,
    Leisure,
}

impl TaskCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskCategory::Work => "work",
            TaskCategory::Leisure => "leisure",
        }
    }

    pub fn parse(value: &str) -> Result<Self, CoreError> {
        match value {
            "work" => Ok(TaskCategory::Work),
            "leisure" => Ok(TaskCategory::Leisure),
            other => Err(CoreError::StorageFailure(format!("unknown task category '{}'", other))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: Option<i64>,
    pub title: String,
    pub estimate_minutes: Option<u32>,
    pub spent_minutes: u32,
    pub state: TaskState,
    pub category: TaskCategory,
    pub last_finish_note: Option<String>,
    pub last_session_end_at: Option<DateTime<Utc>>,
    pub session_count: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a fresh `cold` task. A blank title falls back to a
    /// placeholder rather than failing.
    pub fn new(title: &str, estimate_minutes: Option<u32>, category: TaskCategory) -> Self {
        let title = title.trim();
        let now = Utc::now();
        Task {
            id: None,
            title: if title.is_empty() { UNTITLED_TASK.to_string() } else { title.to_string() },
            estimate_minutes,
            spent_minutes: 0,
            state: TaskState::Cold,
            category,
            last_finish_note: None,
            last_session_end_at: None,
            session_count: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Minutes left against the estimate, floored at zero. `None` when no
    /// estimate is set.
    pub fn remaining_minutes(&self) -> Option<u32> {
        self.estimate_minutes.map(|estimate| estimate.saturating_sub(self.spent_minutes))
    }
}

/// Validates a minute value supplied for estimates or time windows.
///
/// The CLI already constrains its inputs, but the core re-checks the
/// [1, MAX_MINUTES] range defensively instead of corrupting state.
pub fn validate_minutes(value: u32, what: &str) -> Result<u32, CoreError> {
    if value == 0 || value > MAX_MINUTES {
        return Err(CoreError::InvalidArgument(format!("{} must be between 1 and {} minutes", what, MAX_MINUTES)));
    }
    Ok(value)
}

#[derive(Debug, Clone)]
pub enum TaskFilter {
    /// Everything, including archived tasks.
    All,
    /// Tasks whose state is not `done`.
    Active,
    /// Archived tasks only.
    Done,
    /// A single state.
    ByState(TaskState),
}
