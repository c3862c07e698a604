//! Versioned schema migrations.
//!
//! Tracks applied schema versions in a `migrations` table and applies any
//! pending ones inside a single transaction when the database is opened.
//! A failed migration rolls everything back, so the schema is never left
//! half-evolved.

use rusqlite::{params, Connection, Transaction};

use crate::libs::error::CoreError;
use crate::msg_debug;

const MIGRATIONS_TABLE: &str = "
CREATE TABLE IF NOT EXISTS migrations (
    id INTEGER PRIMARY KEY,
    version INTEGER NOT NULL UNIQUE,
    name TEXT NOT NULL,
    applied_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
)";

struct Migration {
    version: u32,
    name: &'static str,
    up: fn(&Transaction) -> rusqlite::Result<()>,
}

pub struct MigrationManager {
    migrations: Vec<Migration>,
}

impl MigrationManager {
    pub fn new() -> Self {
        let mut manager = Self { migrations: Vec::new() };
        manager.register_migrations();
        manager
    }

    fn register_migrations(&mut self) {
        // Version 1: task, session and settings collections plus the
        // indexes the state machine and statistics queries depend on.
        self.add_migration(1, "create_core_tables", |tx| {
            tx.execute(
                "CREATE TABLE IF NOT EXISTS tasks (
        id INTEGER NOT NULL PRIMARY KEY AUTOINCREMENT,
        title TEXT NOT NULL,
        estimate_minutes INTEGER,
        spent_minutes INTEGER NOT NULL DEFAULT 0,
        state TEXT NOT NULL DEFAULT 'cold',
        category TEXT NOT NULL DEFAULT 'work',
        last_finish_note TEXT,
        last_session_end_at TEXT,
        session_count INTEGER NOT NULL DEFAULT 0,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    )",
                [],
            )?;

            tx.execute(
                "CREATE TABLE IF NOT EXISTS sessions (
        id INTEGER NOT NULL PRIMARY KEY AUTOINCREMENT,
        task_id INTEGER NOT NULL,
        start_at TEXT NOT NULL,
        end_at TEXT NOT NULL,
        minutes INTEGER NOT NULL,
        note_snapshot TEXT
    )",
                [],
            )?;

            tx.execute(
                "CREATE TABLE IF NOT EXISTS settings (
        id TEXT NOT NULL PRIMARY KEY,
        value TEXT NOT NULL,
        updated_at TEXT NOT NULL
    )",
                [],
            )?;

            // The one-focusing-task invariant is checked through this index.
            tx.execute("CREATE INDEX IF NOT EXISTS idx_tasks_state ON tasks(state)", [])?;
            // Session history per task.
            tx.execute("CREATE INDEX IF NOT EXISTS idx_sessions_task ON sessions(task_id)", [])?;
            // Range queries for daily totals.
            tx.execute("CREATE INDEX IF NOT EXISTS idx_sessions_end_at ON sessions(end_at)", [])?;

            Ok(())
        });
    }

    fn add_migration(&mut self, version: u32, name: &'static str, up: fn(&Transaction) -> rusqlite::Result<()>) {
        self.migrations.push(Migration { version, name, up });
    }

    /// Applies every migration newer than the recorded schema version.
    pub fn run_migrations(&self, conn: &mut Connection) -> Result<(), CoreError> {
        conn.execute(MIGRATIONS_TABLE, [])?;

        let current_version = self.get_current_version(conn)?;
        let pending: Vec<&Migration> = self.migrations.iter().filter(|m| m.version > current_version).collect();

        if pending.is_empty() {
            msg_debug!("Database schema is up to date");
            return Ok(());
        }

        let tx = conn.transaction()?;
        for migration in pending {
            msg_debug!(format!("Applying migration {} ({})", migration.version, migration.name));
            (migration.up)(&tx)?;
            tx.execute("INSERT INTO migrations (version, name) VALUES (?1, ?2)", params![migration.version, migration.name])?;
        }
        tx.commit()?;

        Ok(())
    }

    fn get_current_version(&self, conn: &Connection) -> Result<u32, CoreError> {
        let version: Option<u32> = conn.query_row("SELECT MAX(version) FROM migrations", [], |row| row.get(0)).unwrap_or(Some(0));
        Ok(version.unwrap_or(0))
    }
}

impl Default for MigrationManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Opens-time entry point: ensures the schema matches the current version.
pub fn init_with_migrations(conn: &mut Connection) -> Result<(), CoreError> {
    MigrationManager::new().run_migrations(conn)
}
