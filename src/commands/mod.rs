pub mod abandon;
pub mod config;
pub mod export;
pub mod finish;
pub mod import;
pub mod recommend;
pub mod start;
pub mod status;
pub mod sum;
pub mod task;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(subcommand, about = "Manage tasks")]
    Task(task::TaskCommand),
    #[command(about = "Open a focus session on a task")]
    Start(start::StartArgs),
    #[command(about = "Finish the open focus session and record it")]
    Finish(finish::FinishArgs),
    #[command(about = "Abandon the open focus session without recording")]
    Abandon,
    #[command(about = "Show the open focus session, if any")]
    Status,
    #[command(about = "Recommend what to work on next for a time window")]
    Recommend(recommend::RecommendArgs),
    #[command(about = "Show today's and lifetime deep work totals")]
    Sum,
    #[command(about = "Export all data to a backup file")]
    Export(export::ExportArgs),
    #[command(about = "Replace all data from a backup file")]
    Import(import::ImportArgs),
    #[command(about = "Show or change settings")]
    Config(config::ConfigArgs),
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn menu() -> Result<()> {
        let cli = Self::parse();
        match cli.command {
            Commands::Task(command) => task::cmd(command),
            Commands::Start(args) => start::cmd(args),
            Commands::Finish(args) => finish::cmd(args),
            Commands::Abandon => abandon::cmd(),
            Commands::Status => status::cmd(),
            Commands::Recommend(args) => recommend::cmd(args),
            Commands::Sum => sum::cmd(),
            Commands::Export(args) => export::cmd(args),
            Commands::Import(args) => import::cmd(args),
            Commands::Config(args) => config::cmd(args),
        }
    }
}
