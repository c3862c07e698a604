use anyhow::Result;
use clap::Args;

use crate::db::settings::Settings;
use crate::db::tasks::Tasks;
use crate::libs::messages::Message;
use crate::libs::recommend::recommend;
use crate::libs::setting::{Setting, WINDOW_PRESETS};
use crate::libs::task::{validate_minutes, TaskFilter};
use crate::libs::view::View;
use crate::msg_info;

#[derive(Debug, Args)]
pub struct RecommendArgs {
    /// Time window in minutes, 1-9999; defaults to the saved preference
    #[arg(short, long)]
    pub window: Option<u32>,
}

pub fn cmd(args: RecommendArgs) -> Result<()> {
    let mut settings = Settings::new()?;
    let window = match args.window {
        Some(window) => {
            validate_minutes(window, "time window")?;
            // Remember ad-hoc windows so the next prompt can offer them.
            if !WINDOW_PRESETS.contains(&window) {
                settings.set(&Setting::LastCustomMinutes(window))?;
            }
            window
        }
        None => settings.time_preference()?,
    };

    let tasks = Tasks::new()?.fetch(TaskFilter::All)?;
    let recommendation = recommend(&tasks, window);

    if let Some(note) = recommendation.message {
        msg_info!(Message::RecommendationNote(note.to_string()));
    }
    if recommendation.top.is_some() {
        let format = settings.duration_format()?;
        View::recommendation(&recommendation, window, format);
    }
    Ok(())
}
