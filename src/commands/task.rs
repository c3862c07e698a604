//! Task management subcommands: create, list, edit, archive, delete.

use anyhow::Result;
use clap::{Args, Subcommand};
use dialoguer::{theme::ColorfulTheme, Confirm};

use crate::db::sessions::Sessions;
use crate::db::settings::Settings;
use crate::db::tasks::Tasks;
use crate::libs::messages::Message;
use crate::libs::task::{Task, TaskCategory, TaskFilter};
use crate::libs::view::View;
use crate::{msg_info, msg_print, msg_success};

#[derive(Debug, Subcommand)]
pub enum TaskCommand {
    #[command(about = "Create a task")]
    New(NewArgs),
    #[command(about = "List tasks")]
    List(ListArgs),
    #[command(about = "Edit a task's title, estimate or note")]
    Edit(EditArgs),
    #[command(about = "Archive a task")]
    Done(IdArgs),
    #[command(about = "Bring a task back from the archive")]
    Restore(IdArgs),
    #[command(about = "Show one task with its session history")]
    Show(IdArgs),
    #[command(about = "Delete a task (recorded sessions are kept)")]
    Delete(DeleteArgs),
}

#[derive(Debug, Args)]
pub struct NewArgs {
    /// Task title
    pub title: String,
    /// Estimated minutes to complete, 1-9999
    #[arg(short, long)]
    pub estimate: Option<u32>,
    /// File under the leisure stream instead of work
    #[arg(long)]
    pub leisure: bool,
}

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Include archived tasks
    #[arg(short, long)]
    pub all: bool,
}

#[derive(Debug, Args)]
pub struct EditArgs {
    pub id: i64,
    #[arg(short, long)]
    pub title: Option<String>,
    /// New estimate in minutes, 1-9999
    #[arg(short, long)]
    pub estimate: Option<u32>,
    /// Replace the "next first step" note
    #[arg(short, long)]
    pub note: Option<String>,
}

#[derive(Debug, Args)]
pub struct IdArgs {
    pub id: i64,
}

#[derive(Debug, Args)]
pub struct DeleteArgs {
    pub id: i64,
    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

pub fn cmd(command: TaskCommand) -> Result<()> {
    match command {
        TaskCommand::New(args) => new(args),
        TaskCommand::List(args) => list(args),
        TaskCommand::Edit(args) => edit(args),
        TaskCommand::Done(args) => done(args),
        TaskCommand::Restore(args) => restore(args),
        TaskCommand::Show(args) => show(args),
        TaskCommand::Delete(args) => delete(args),
    }
}

fn new(args: NewArgs) -> Result<()> {
    let category = if args.leisure { TaskCategory::Leisure } else { TaskCategory::Work };
    let task = Tasks::new()?.insert(&Task::new(&args.title, args.estimate, category))?;
    msg_success!(Message::TaskCreated(task.id.unwrap_or(0), task.title));
    Ok(())
}

fn list(args: ListArgs) -> Result<()> {
    let filter = if args.all { TaskFilter::All } else { TaskFilter::Active };
    let tasks = Tasks::new()?.fetch(filter)?;
    if tasks.is_empty() {
        msg_info!(Message::NoTasksFound);
        return Ok(());
    }
    let format = Settings::new()?.duration_format()?;
    View::tasks(&tasks, format);
    Ok(())
}

fn edit(args: EditArgs) -> Result<()> {
    let task = Tasks::new()?.edit(args.id, args.title.as_deref(), args.estimate, args.note.as_deref())?;
    msg_success!(Message::TaskUpdated(task.id.unwrap_or(0)));
    Ok(())
}

fn done(args: IdArgs) -> Result<()> {
    let task = Tasks::new()?.mark_done(args.id)?;
    msg_success!(Message::TaskMarkedDone(task.title));
    Ok(())
}

fn restore(args: IdArgs) -> Result<()> {
    let task = Tasks::new()?.restore(args.id)?;
    msg_success!(Message::TaskRestored(task.title, task.state.as_str().to_string()));
    Ok(())
}

fn show(args: IdArgs) -> Result<()> {
    let task = Tasks::new()?.get_by_id(args.id)?;
    let sessions = Sessions::new()?.fetch_by_task(args.id)?;
    let format = Settings::new()?.duration_format()?;
    View::task_detail(&task, format);
    if !sessions.is_empty() {
        View::sessions(&sessions, format);
    }
    Ok(())
}

fn delete(args: DeleteArgs) -> Result<()> {
    let mut tasks = Tasks::new()?;
    let task = tasks.get_by_id(args.id)?;

    if !args.yes {
        let confirmed = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::ConfirmDeleteTask(task.title.clone()).to_string())
            .default(false)
            .interact()?;
        if !confirmed {
            msg_print!(Message::DeleteCancelled);
            return Ok(());
        }
    }

    tasks.delete(args.id)?;
    msg_success!(Message::TaskDeleted(args.id));
    if task.session_count > 0 {
        msg_info!(Message::SessionsRetainedAfterDelete);
    }
    Ok(())
}
