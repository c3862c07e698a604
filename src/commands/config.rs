use anyhow::Result;
use clap::Args;

use crate::db::settings::Settings;
use crate::libs::formatter::format_minutes;
use crate::libs::messages::Message;
use crate::libs::setting::{DurationFormat, Setting};
use crate::{msg_print, msg_success};

#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Preferred time window for recommendations, in minutes (1-9999)
    #[arg(long)]
    pub time_preference: Option<u32>,
    /// Duration display format: 'minutes' or 'hm'
    #[arg(long)]
    pub format: Option<String>,
}

pub fn cmd(args: ConfigArgs) -> Result<()> {
    let mut settings = Settings::new()?;
    let mut changed = false;

    if let Some(minutes) = args.time_preference {
        settings.set(&Setting::TimePreferenceMinutes(minutes))?;
        changed = true;
    }
    if let Some(format) = args.format.as_deref() {
        settings.set(&Setting::DurationFormat(DurationFormat::parse(format)?))?;
        changed = true;
    }

    if changed {
        msg_success!(Message::ConfigSaved);
        return Ok(());
    }

    let format = settings.duration_format()?;
    let format_name = match format {
        DurationFormat::Minutes => "minutes",
        DurationFormat::HoursMinutes => "hm",
    };
    msg_print!(Message::ConfigCurrent(
        format_minutes(settings.time_preference()?, format),
        format_minutes(settings.last_custom_minutes()?, format),
        format_name.to_string()
    ));
    Ok(())
}
