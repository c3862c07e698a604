use std::fs::File;
use std::path::PathBuf;

use anyhow::Result;
use chrono::Local;
use clap::Args;

use crate::libs::backup::Backup;
use crate::libs::messages::Message;
use crate::msg_success;

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Output file; defaults to a timestamped name in the current directory
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn cmd(args: ExportArgs) -> Result<()> {
    let payload = Backup::new()?.export()?;
    let path = args
        .output
        .unwrap_or_else(|| PathBuf::from(format!("dwell_backup_{}.json", Local::now().format("%Y%m%d_%H%M%S"))));
    serde_json::to_writer_pretty(File::create(&path)?, &payload)?;
    msg_success!(Message::ExportCompleted(path.display().to_string()));
    Ok(())
}
