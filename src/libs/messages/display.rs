//! Human-readable text for every `Message` variant.

use std::fmt;

use super::types::Message;

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            // === TASK MESSAGES ===
            Message::TaskCreated(id, title) => format!("Task {} created: '{}'", id, title),
            Message::TaskUpdated(id) => format!("Task {} updated", id),
            Message::TaskDeleted(id) => format!("Task {} deleted", id),
            Message::TaskMarkedDone(title) => format!("Task '{}' archived", title),
            Message::TaskRestored(title, state) => format!("Task '{}' restored to {}", title, state),
            Message::NoTasksFound => "No tasks found".to_string(),
            Message::ConfirmDeleteTask(title) => format!("Delete task '{}'? Its recorded sessions are kept for statistics", title),
            Message::DeleteCancelled => "Delete cancelled".to_string(),
            Message::SessionsRetainedAfterDelete => "Recorded sessions were kept for lifetime statistics".to_string(),

            // === FOCUS SESSION MESSAGES ===
            Message::FocusStarted(title) => format!("Focusing on '{}'", title),
            Message::FocusResumed(title) => format!("Resumed open session on '{}'", title),
            Message::FocusFinished(title, minutes) => format!("Finished '{}': {} credited", title, minutes),
            Message::FocusAbandoned(title, state) => format!("Abandoned session on '{}'; task is {} again, nothing recorded", title, state),
            Message::FocusAbandonedTaskGone => "Abandoned session; its task no longer exists".to_string(),
            Message::NoFocusSession => "No focus session is open".to_string(),
            Message::FocusStatus(title, elapsed) => format!("Focusing on '{}' for {}", title, elapsed),
            Message::FocusNote(note) => format!("Next first step: {}", note),

            // === RECOMMENDATION MESSAGES ===
            Message::RecommendationNote(note) => note.clone(),

            // === SUMMARY MESSAGES ===
            Message::SummaryHeader => "Deep work summary".to_string(),
            Message::SummaryToday(minutes) => format!("Today: {}", minutes),
            Message::SummaryTotal(minutes) => format!("Lifetime: {}", minutes),
            Message::SummaryCategory(category, minutes) => format!("Lifetime ({}): {}", category, minutes),

            // === BACKUP MESSAGES ===
            Message::ExportCompleted(path) => format!("Backup exported to {}", path),
            Message::ImportCompleted(tasks, sessions, settings) => {
                format!("Backup imported: {} tasks, {} sessions, {} settings", tasks, sessions, settings)
            }
            Message::ConfirmImport => "Importing replaces ALL current tasks, sessions and settings. Continue?".to_string(),
            Message::ImportCancelled => "Import cancelled".to_string(),

            // === SETTINGS MESSAGES ===
            Message::ConfigSaved => "Settings saved".to_string(),
            Message::ConfigCurrent(preference, custom, format) => {
                format!("Time preference: {}\nLast custom window: {}\nDuration format: {}", preference, custom, format)
            }
        };
        write!(f, "{}", text)
    }
}
