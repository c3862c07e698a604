#[cfg(test)]
mod tests {
    use std::sync::{Mutex, MutexGuard, PoisonError};

    use dwell::db::settings::Settings;
    use dwell::libs::error::CoreError;
    use dwell::libs::setting::{DurationFormat, Setting, SettingKey, DEFAULT_CUSTOM_MINUTES, DEFAULT_TIME_PREFERENCE};
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    struct SettingsTestContext {
        _temp_dir: TempDir,
        _guard: MutexGuard<'static, ()>,
    }

    impl TestContext for SettingsTestContext {
        fn setup() -> Self {
            let guard = ENV_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
            let temp_dir = tempfile::tempdir().unwrap();
            std::env::set_var("HOME", temp_dir.path());
            std::env::set_var("LOCALAPPDATA", temp_dir.path());
            SettingsTestContext {
                _temp_dir: temp_dir,
                _guard: guard,
            }
        }
    }

    #[test_context(SettingsTestContext)]
    #[test]
    fn test_defaults_when_never_set(_ctx: &mut SettingsTestContext) {
        let mut settings = Settings::new().unwrap();
        assert_eq!(settings.time_preference().unwrap(), DEFAULT_TIME_PREFERENCE);
        assert_eq!(settings.last_custom_minutes().unwrap(), DEFAULT_CUSTOM_MINUTES);
        assert_eq!(settings.duration_format().unwrap(), DurationFormat::Minutes);
        assert!(settings.get(SettingKey::TimePreferenceMinutes).unwrap().is_none());
    }

    #[test_context(SettingsTestContext)]
    #[test]
    fn test_set_and_get_each_key(_ctx: &mut SettingsTestContext) {
        let mut settings = Settings::new().unwrap();
        settings.set(&Setting::TimePreferenceMinutes(90)).unwrap();
        settings.set(&Setting::LastCustomMinutes(35)).unwrap();
        settings.set(&Setting::DurationFormat(DurationFormat::HoursMinutes)).unwrap();

        assert_eq!(settings.time_preference().unwrap(), 90);
        assert_eq!(settings.last_custom_minutes().unwrap(), 35);
        assert_eq!(settings.duration_format().unwrap(), DurationFormat::HoursMinutes);
        assert_eq!(settings.fetch_all().unwrap().len(), 3);
    }

    #[test_context(SettingsTestContext)]
    #[test]
    fn test_upsert_overwrites(_ctx: &mut SettingsTestContext) {
        let mut settings = Settings::new().unwrap();
        settings.set(&Setting::TimePreferenceMinutes(20)).unwrap();
        settings.set(&Setting::TimePreferenceMinutes(120)).unwrap();
        assert_eq!(settings.time_preference().unwrap(), 120);
        assert_eq!(settings.fetch_all().unwrap().len(), 1);
    }

    #[test_context(SettingsTestContext)]
    #[test]
    fn test_out_of_range_values_rejected(_ctx: &mut SettingsTestContext) {
        let mut settings = Settings::new().unwrap();
        let err = settings.set(&Setting::TimePreferenceMinutes(0)).unwrap_err();
        assert!(matches!(err, CoreError::InvalidArgument(_)));
        let err = settings.set(&Setting::LastCustomMinutes(10_000)).unwrap_err();
        assert!(matches!(err, CoreError::InvalidArgument(_)));
    }

    #[test]
    fn test_duration_format_parse() {
        assert_eq!(DurationFormat::parse("minutes").unwrap(), DurationFormat::Minutes);
        assert_eq!(DurationFormat::parse("hm").unwrap(), DurationFormat::HoursMinutes);
        assert!(matches!(DurationFormat::parse("hours"), Err(CoreError::InvalidArgument(_))));
    }
}
