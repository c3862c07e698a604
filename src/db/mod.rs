//! Database layer for the dwell application.
//!
//! A SQLite-backed persistence layer with one repository module per
//! collection. Single-record operations are atomic; the two multi-record
//! mutations in the system (finishing a focus session and restoring a
//! backup) run inside explicit transactions.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use dwell::db::tasks::Tasks;
//! use dwell::libs::task::{Task, TaskCategory, TaskFilter};
//!
//! # fn main() -> Result<(), dwell::libs::error::CoreError> {
//! let mut tasks = Tasks::new()?;
//! let task = Task::new("Draft the outline", Some(60), TaskCategory::Work);
//! let task = tasks.insert(&task)?;
//! let active = tasks.fetch(TaskFilter::Active)?;
//! # Ok(())
//! # }
//! ```

/// Core database connection and initialization.
pub mod db;

/// Versioned schema migration runner.
pub mod migrations;

/// Task CRUD and lifecycle state machine.
pub mod tasks;

/// Session history and aggregate statistics.
pub mod sessions;

/// Typed per-key settings.
pub mod settings;
