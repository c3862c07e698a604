//! Aggregate deep work totals: today, lifetime, per category.
//!
//! Sessions of deleted tasks still count toward the daily and lifetime
//! totals; the per-category split needs the task and skips them.

use anyhow::Result;

use crate::db::sessions::Sessions;
use crate::db::settings::Settings;
use crate::libs::formatter::format_minutes;
use crate::libs::messages::Message;
use crate::libs::task::TaskCategory;
use crate::msg_print;

pub fn cmd() -> Result<()> {
    let mut sessions = Sessions::new()?;
    let format = Settings::new()?.duration_format()?;

    msg_print!(Message::SummaryHeader, true);
    msg_print!(Message::SummaryToday(format_minutes(sessions.minutes_today()?, format)));
    msg_print!(Message::SummaryTotal(format_minutes(sessions.total_minutes()?, format)));
    for category in [TaskCategory::Work, TaskCategory::Leisure] {
        let minutes = sessions.total_minutes_by_category(category)?;
        msg_print!(Message::SummaryCategory(category.as_str().to_string(), format_minutes(minutes, format)));
    }
    Ok(())
}
