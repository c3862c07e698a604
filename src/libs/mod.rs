//! Core library modules for the dwell application.
//!
//! Models, the focus session manager, the recommendation engine, the
//! backup facility and the presentation helpers. Storage repositories
//! live under [`crate::db`].

pub mod backup;
pub mod data_storage;
pub mod error;
pub mod focus;
pub mod formatter;
pub mod messages;
pub mod recommend;
pub mod session;
pub mod setting;
pub mod task;
pub mod view;
