use anyhow::Result;
use chrono::Utc;

use crate::db::settings::Settings;
use crate::libs::focus::FocusManager;
use crate::libs::formatter::format_minutes;
use crate::libs::messages::Message;
use crate::{msg_info, msg_print};

pub fn cmd() -> Result<()> {
    let mut manager = FocusManager::new()?;
    match manager.current()? {
        Some((snapshot, task)) => {
            let format = Settings::new()?.duration_format()?;
            let elapsed = format_minutes(snapshot.elapsed_minutes(Utc::now()), format);
            msg_print!(Message::FocusStatus(task.title, elapsed));
            if let Some(note) = task.last_finish_note {
                msg_print!(Message::FocusNote(note));
            }
        }
        None => msg_info!(Message::NoFocusSession),
    }
    Ok(())
}
