//! Typed application settings.
//!
//! Settings are a closed, enumerated key set with one typed value per key,
//! persisted in the `settings` table. Keys keep the wire names the backup
//! format uses (`timePreferenceMinutes` etc.), so exported documents stay
//! stable across releases.

use serde::{Deserialize, Serialize};

use crate::libs::error::CoreError;

pub const DEFAULT_TIME_PREFERENCE: u32 = 40;
pub const DEFAULT_CUSTOM_MINUTES: u32 = 50;

/// Preset time windows offered by the recommendation UI. A window outside
/// this set is remembered in `lastCustomMinutes`.
pub const WINDOW_PRESETS: [u32; 4] = [20, 40, 60, 120];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SettingKey {
    #[serde(rename = "timePreferenceMinutes")]
    TimePreferenceMinutes,
    #[serde(rename = "lastCustomMinutes")]
    LastCustomMinutes,
    #[serde(rename = "durationFormat")]
    DurationFormat,
}

impl SettingKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SettingKey::TimePreferenceMinutes => "timePreferenceMinutes",
            SettingKey::LastCustomMinutes => "lastCustomMinutes",
            SettingKey::DurationFormat => "durationFormat",
        }
    }

    pub fn parse(value: &str) -> Result<Self, CoreError> {
        match value {
            "timePreferenceMinutes" => Ok(SettingKey::TimePreferenceMinutes),
            "lastCustomMinutes" => Ok(SettingKey::LastCustomMinutes),
            "durationFormat" => Ok(SettingKey::DurationFormat),
            other => Err(CoreError::StorageFailure(format!("unknown setting key '{}'", other))),
        }
    }
}

/// How durations are rendered: raw minutes ("95m") or hours and minutes
/// ("1h 35m").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DurationFormat {
    #[serde(rename = "minutes")]
    Minutes,
    #[serde(rename = "hm")]
    HoursMinutes,
}

impl DurationFormat {
    pub fn parse(value: &str) -> Result<Self, CoreError> {
        match value {
            "minutes" => Ok(DurationFormat::Minutes),
            "hm" => Ok(DurationFormat::HoursMinutes),
            other => Err(CoreError::InvalidArgument(format!("unknown duration format '{}' (expected 'minutes' or 'hm')", other))),
        }
    }
}

/// A setting value tagged by its key. This is the only shape the settings
/// repository accepts, so a key can never be paired with a value of the
/// wrong type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Setting {
    TimePreferenceMinutes(u32),
    LastCustomMinutes(u32),
    DurationFormat(DurationFormat),
}

impl Setting {
    pub fn key(&self) -> SettingKey {
        match self {
            Setting::TimePreferenceMinutes(_) => SettingKey::TimePreferenceMinutes,
            Setting::LastCustomMinutes(_) => SettingKey::LastCustomMinutes,
            Setting::DurationFormat(_) => SettingKey::DurationFormat,
        }
    }

    /// Serializes the bare value (without the key tag) for storage.
    pub fn value_json(&self) -> Result<String, CoreError> {
        let json = match self {
            Setting::TimePreferenceMinutes(minutes) | Setting::LastCustomMinutes(minutes) => serde_json::to_string(minutes)?,
            Setting::DurationFormat(format) => serde_json::to_string(format)?,
        };
        Ok(json)
    }

    /// Rebuilds a typed setting from its stored key and JSON value.
    pub fn from_parts(key: SettingKey, value_json: &str) -> Result<Self, CoreError> {
        let setting = match key {
            SettingKey::TimePreferenceMinutes => Setting::TimePreferenceMinutes(serde_json::from_str(value_json)?),
            SettingKey::LastCustomMinutes => Setting::LastCustomMinutes(serde_json::from_str(value_json)?),
            SettingKey::DurationFormat => Setting::DurationFormat(serde_json::from_str(value_json)?),
        };
        Ok(setting)
    }
}
