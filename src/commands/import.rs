use std::fs::File;
use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use dialoguer::{theme::ColorfulTheme, Confirm};

use crate::libs::backup::{Backup, BackupPayload};
use crate::libs::messages::Message;
use crate::{msg_print, msg_success};

#[derive(Debug, Args)]
pub struct ImportArgs {
    /// Backup file to restore from
    pub file: PathBuf,
    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

pub fn cmd(args: ImportArgs) -> Result<()> {
    let payload: BackupPayload = serde_json::from_reader(File::open(&args.file)?)?;

    // Import is a full replacement, so it needs an explicit go-ahead.
    if !args.yes {
        let confirmed = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::ConfirmImport.to_string())
            .default(false)
            .interact()?;
        if !confirmed {
            msg_print!(Message::ImportCancelled);
            return Ok(());
        }
    }

    Backup::new()?.import(&payload)?;
    msg_success!(Message::ImportCompleted(payload.tasks.len(), payload.sessions.len(), payload.settings.len()));
    Ok(())
}
