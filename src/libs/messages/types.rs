//! All user-facing message variants.
//!
//! Every string the CLI prints lives here, keyed by a `Message` variant,
//! with the actual text in the `Display` impl. Messages carry their
//! dynamic parts as typed payloads.

#[derive(Debug, Clone)]
pub enum Message {
    // === TASK MESSAGES ===
    TaskCreated(i64, String),
    TaskUpdated(i64),
    TaskDeleted(i64),
    TaskMarkedDone(String),
    TaskRestored(String, String), // title, new state
    NoTasksFound,
    ConfirmDeleteTask(String),
    DeleteCancelled,
    SessionsRetainedAfterDelete,

    // === FOCUS SESSION MESSAGES ===
    FocusStarted(String),
    FocusResumed(String),
    FocusFinished(String, String),  // title, formatted minutes
    FocusAbandoned(String, String), // title, restored state
    FocusAbandonedTaskGone,
    NoFocusSession,
    FocusStatus(String, String), // title, formatted elapsed
    FocusNote(String),

    // === RECOMMENDATION MESSAGES ===
    RecommendationNote(String),

    // === SUMMARY MESSAGES ===
    SummaryHeader,
    SummaryToday(String),
    SummaryTotal(String),
    SummaryCategory(String, String), // category, formatted minutes

    // === BACKUP MESSAGES ===
    ExportCompleted(String),              // file path
    ImportCompleted(usize, usize, usize), // tasks, sessions, settings
    ConfirmImport,
    ImportCancelled,

    // === SETTINGS MESSAGES ===
    ConfigSaved,
    ConfigCurrent(String, String, String), // preference, custom, format
}
