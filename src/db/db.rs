use rusqlite::Connection;

use crate::db::migrations::init_with_migrations;
use crate::libs::data_storage::DataStorage;
use crate::libs::error::CoreError;

pub const DB_FILE_NAME: &str = "dwell.db";

pub struct Db {
    pub conn: Connection,
}

impl Db {
    /// Opens the database in the platform data directory and brings the
    /// schema up to date.
    pub fn new() -> Result<Db, CoreError> {
        let db_file_path = DataStorage::new().get_path(DB_FILE_NAME)?;
        let mut conn = Connection::open(db_file_path)?;
        init_with_migrations(&mut conn)?;

        Ok(Db { conn })
    }
}
