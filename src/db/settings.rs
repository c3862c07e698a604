//! Settings repository: one typed value per enumerated key.

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};

use super::db::Db;
use crate::libs::error::CoreError;
use crate::libs::setting::{DurationFormat, Setting, SettingKey, DEFAULT_CUSTOM_MINUTES, DEFAULT_TIME_PREFERENCE};
use crate::libs::task::validate_minutes;

const SELECT_SETTING: &str = "SELECT value FROM settings WHERE id = ?1";
const SELECT_ALL: &str = "SELECT id, value FROM settings ORDER BY id ASC";
const UPSERT_SETTING: &str = "INSERT INTO settings (id, value, updated_at) VALUES (?1, ?2, ?3)
    ON CONFLICT(id) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at";

pub struct Settings {
    pub conn: Connection,
}

impl Settings {
    pub fn new() -> Result<Settings, CoreError> {
        let db = Db::new()?;
        Ok(Settings { conn: db.conn })
    }

    pub fn get(&mut self, key: SettingKey) -> Result<Option<Setting>, CoreError> {
        let value: Option<String> = self.conn.query_row(SELECT_SETTING, params![key.as_str()], |row| row.get(0)).optional()?;
        value.map(|json| Setting::from_parts(key, &json)).transpose()
    }

    pub fn set(&mut self, setting: &Setting) -> Result<(), CoreError> {
        match setting {
            Setting::TimePreferenceMinutes(minutes) => {
                validate_minutes(*minutes, "time preference")?;
            }
            Setting::LastCustomMinutes(minutes) => {
                validate_minutes(*minutes, "custom window")?;
            }
            Setting::DurationFormat(_) => {}
        }
        self.conn.execute(UPSERT_SETTING, params![setting.key().as_str(), setting.value_json()?, Utc::now()])?;
        Ok(())
    }

    pub fn fetch_all(&mut self) -> Result<Vec<Setting>, CoreError> {
        let mut stmt = self.conn.prepare(SELECT_ALL)?;
        let rows = stmt.query_map([], |row| {
            let id: String = row.get(0)?;
            let value: String = row.get(1)?;
            Ok((id, value))
        })?;
        let mut settings = Vec::new();
        for row in rows {
            let (id, value) = row?;
            settings.push(Setting::from_parts(SettingKey::parse(&id)?, &value)?);
        }
        Ok(settings)
    }

    /// The preferred time window for recommendations, defaulting to 40
    /// minutes when never set.
    pub fn time_preference(&mut self) -> Result<u32, CoreError> {
        match self.get(SettingKey::TimePreferenceMinutes)? {
            Some(Setting::TimePreferenceMinutes(minutes)) => Ok(minutes),
            _ => Ok(DEFAULT_TIME_PREFERENCE),
        }
    }

    pub fn last_custom_minutes(&mut self) -> Result<u32, CoreError> {
        match self.get(SettingKey::LastCustomMinutes)? {
            Some(Setting::LastCustomMinutes(minutes)) => Ok(minutes),
            _ => Ok(DEFAULT_CUSTOM_MINUTES),
        }
    }

    pub fn duration_format(&mut self) -> Result<DurationFormat, CoreError> {
        match self.get(SettingKey::DurationFormat)? {
            Some(Setting::DurationFormat(format)) => Ok(format),
            _ => Ok(DurationFormat::Minutes),
        }
    }
}
