use anyhow::Result;
use clap::Args;

use crate::db::settings::Settings;
use crate::libs::focus::FocusManager;
use crate::libs::formatter::format_minutes;
use crate::libs::messages::Message;
use crate::msg_success;

#[derive(Debug, Args)]
pub struct FinishArgs {
    /// "Next first step" note to leave on the task
    #[arg(short, long)]
    pub note: Option<String>,
}

pub fn cmd(args: FinishArgs) -> Result<()> {
    let mut manager = FocusManager::new()?;
    let (task, session) = manager.finish(args.note.as_deref())?;
    let format = Settings::new()?.duration_format()?;
    msg_success!(Message::FocusFinished(task.title, format_minutes(session.minutes, format)));
    Ok(())
}
