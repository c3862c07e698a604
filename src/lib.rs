//! # Dwell - a local-first deep work tracker
//!
//! A command-line utility for tracking deep work tasks through their
//! lifecycle, running crash-resilient focus sessions, and recommending
//! what to work on next given a time budget.
//!
//! ## Features
//!
//! - **Task Lifecycle**: cold / focusing / warm / done with guarded
//!   transitions and a single open session at a time
//! - **Focus Sessions**: durable across restarts; minimum one-minute
//!   credit; finish and abandon paths
//! - **Recommendations**: deterministic ranking of tasks under a
//!   time-window budget
//! - **Statistics**: daily and lifetime deep work totals per category
//! - **Backup**: versioned JSON export with atomic, all-or-nothing import
//!
//! ## Usage
//!
//! ```rust,no_run
//! use dwell::commands::Cli;
//!
//! fn main() -> anyhow::Result<()> {
//!     Cli::menu()
//! }
//! ```

pub mod commands;
pub mod db;
pub mod libs;
