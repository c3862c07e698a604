use anyhow::Result;
use clap::Args;

use crate::libs::focus::FocusManager;
use crate::libs::messages::Message;
use crate::msg_success;

#[derive(Debug, Args)]
pub struct StartArgs {
    /// Id of the task to focus on
    pub id: i64,
}

pub fn cmd(args: StartArgs) -> Result<()> {
    let mut manager = FocusManager::new()?;
    let already_open = matches!(manager.current()?, Some((_, ref task)) if task.id == Some(args.id));
    let task = manager.start(args.id)?;
    if already_open {
        msg_success!(Message::FocusResumed(task.title));
    } else {
        msg_success!(Message::FocusStarted(task.title));
    }
    Ok(())
}
