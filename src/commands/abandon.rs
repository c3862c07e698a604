use anyhow::Result;

use crate::libs::focus::FocusManager;
use crate::libs::messages::Message;
use crate::{msg_success, msg_warning};

pub fn cmd() -> Result<()> {
    let mut manager = FocusManager::new()?;
    match manager.abandon()? {
        Some(task) => msg_success!(Message::FocusAbandoned(task.title, task.state.as_str().to_string())),
        None => msg_warning!(Message::FocusAbandonedTaskGone),
    }
    Ok(())
}
