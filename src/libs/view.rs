//! Console table rendering for tasks, sessions and recommendations.

use chrono::{DateTime, Local, Utc};
use prettytable::{row, Table};

use crate::libs::formatter::{format_minutes, format_remaining};
use crate::libs::recommend::{Recommendation, RankedTask};
use crate::libs::session::Session;
use crate::libs::setting::DurationFormat;
use crate::libs::task::Task;

fn local_time(ts: DateTime<Utc>) -> String {
    ts.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string()
}

fn opt_local_time(ts: Option<DateTime<Utc>>) -> String {
    ts.map(local_time).unwrap_or_else(|| "—".to_string())
}

pub struct View {}

impl View {
    pub fn tasks(tasks: &[Task], format: DurationFormat) {
        let mut table = Table::new();
        table.add_row(row!["ID", "TITLE", "STATE", "CATEGORY", "ESTIMATE", "SPENT", "REMAINING", "SESSIONS", "LAST SESSION"]);
        for task in tasks {
            table.add_row(row![
                task.id.unwrap_or(0),
                task.title,
                task.state.as_str(),
                task.category.as_str(),
                format_remaining(task.estimate_minutes, format),
                format_minutes(task.spent_minutes, format),
                format_remaining(task.remaining_minutes(), format),
                task.session_count,
                opt_local_time(task.last_session_end_at),
            ]);
        }
        table.printstd();
    }

    pub fn task_detail(task: &Task, format: DurationFormat) {
        let mut table = Table::new();
        table.add_row(row!["ID", task.id.unwrap_or(0)]);
        table.add_row(row!["Title", task.title]);
        table.add_row(row!["State", task.state.as_str()]);
        table.add_row(row!["Category", task.category.as_str()]);
        table.add_row(row!["Estimate", format_remaining(task.estimate_minutes, format)]);
        table.add_row(row!["Spent", format_minutes(task.spent_minutes, format)]);
        table.add_row(row!["Remaining", format_remaining(task.remaining_minutes(), format)]);
        table.add_row(row!["Sessions", task.session_count]);
        table.add_row(row!["Last session", opt_local_time(task.last_session_end_at)]);
        table.add_row(row!["Next first step", task.last_finish_note.clone().unwrap_or_else(|| "—".to_string())]);
        table.add_row(row!["Created", local_time(task.created_at)]);
        table.printstd();
    }

    pub fn sessions(sessions: &[Session], format: DurationFormat) {
        let mut table = Table::new();
        table.add_row(row!["ID", "START", "END", "MINUTES", "NOTE"]);
        for session in sessions {
            table.add_row(row![
                session.id.unwrap_or(0),
                local_time(session.start_at),
                local_time(session.end_at),
                format_minutes(session.minutes, format),
                session.note_snapshot.clone().unwrap_or_default(),
            ]);
        }
        table.printstd();
    }

    pub fn recommendation(recommendation: &Recommendation, window: u32, format: DurationFormat) {
        let mut table = Table::new();
        table.add_row(row!["", "ID", "TITLE", "STATE", "REMAINING", "LAST SESSION"]);
        let mut add = |label: &str, ranked: &RankedTask| {
            table.add_row(row![
                label,
                ranked.task.id.unwrap_or(0),
                ranked.task.title,
                ranked.task.state.as_str(),
                format_remaining(ranked.remaining_minutes, format),
                opt_local_time(ranked.task.last_session_end_at),
            ]);
        };
        if let Some(top) = &recommendation.top {
            add("TOP", top);
        }
        for alternative in &recommendation.alternatives {
            add("ALT", alternative);
        }
        println!("Time window: {}", format_minutes(window, format));
        table.printstd();
    }
}
