//! Recommendation engine: what to work on next given a time budget.
//!
//! A pure function over a task snapshot and a time window. No I/O, no
//! hidden state; the same input always produces the same result. Only
//! non-archived tasks in the work category are considered.
//!
//! Ranking, best first:
//! 1. fewest remaining minutes (a known remaining sorts before unknown)
//! 2. stalest last session (never-worked counts as stalest)
//! 3. `warm` before `cold`
//! 4. oldest created first

use std::cmp::Ordering;
use std::fmt;

use crate::libs::task::{Task, TaskCategory, TaskState};

const MAX_RESULTS: usize = 3;

/// A candidate task with its remaining minutes precomputed.
#[derive(Debug, Clone)]
pub struct RankedTask {
    pub task: Task,
    pub remaining_minutes: Option<u32>,
}

/// Why the result looks the way it does, when the straightforward answer
/// was not available.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecommendationNote {
    /// No candidate fits the window; the pick makes progress anyway.
    MayNotFinish,
    /// No candidate has an estimate; the pick is by age alone.
    AddEstimates,
    /// There is nothing to recommend at all.
    NothingToRecommend,
}

impl fmt::Display for RecommendationNote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecommendationNote::MayNotFinish => write!(f, "May not finish within the window, but still makes progress"),
            RecommendationNote::AddEstimates => write!(f, "No estimates set; add estimates to get window-aware recommendations"),
            RecommendationNote::NothingToRecommend => write!(f, "Nothing to recommend"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Recommendation {
    pub top: Option<RankedTask>,
    pub alternatives: Vec<RankedTask>,
    pub message: Option<RecommendationNote>,
}

fn compare(a: &RankedTask, b: &RankedTask) -> Ordering {
    match (a.remaining_minutes, b.remaining_minutes) {
        (Some(x), Some(y)) if x != y => return x.cmp(&y),
        (Some(_), None) => return Ordering::Less,
        (None, Some(_)) => return Ordering::Greater,
        _ => {}
    }

    // None sorts first: a never-worked task is the most deserving.
    let stale = a.task.last_session_end_at.cmp(&b.task.last_session_end_at);
    if stale != Ordering::Equal {
        return stale;
    }

    match (a.task.state, b.task.state) {
        (TaskState::Warm, TaskState::Cold) => return Ordering::Less,
        (TaskState::Cold, TaskState::Warm) => return Ordering::Greater,
        _ => {}
    }

    a.task.created_at.cmp(&b.task.created_at)
}

fn take_top(mut ranked: Vec<RankedTask>, message: Option<RecommendationNote>) -> Recommendation {
    let rest = ranked.split_off(1.min(ranked.len()));
    Recommendation {
        top: ranked.into_iter().next(),
        alternatives: rest.into_iter().take(MAX_RESULTS - 1).collect(),
        message,
    }
}

/// Ranks candidate tasks under the given time window, in minutes.
pub fn recommend(tasks: &[Task], time_window_minutes: u32) -> Recommendation {
    let candidates: Vec<RankedTask> = tasks
        .iter()
        .filter(|task| task.state != TaskState::Done && task.category == TaskCategory::Work)
        .map(|task| RankedTask {
            remaining_minutes: task.remaining_minutes(),
            task: task.clone(),
        })
        .collect();

    let mut matches: Vec<RankedTask> = candidates
        .iter()
        .filter(|candidate| matches!(candidate.remaining_minutes, Some(remaining) if remaining <= time_window_minutes))
        .cloned()
        .collect();
    matches.sort_by(compare);

    if matches.len() >= MAX_RESULTS {
        return take_top(matches, None);
    }

    let mut overflow: Vec<RankedTask> = candidates
        .iter()
        .filter(|candidate| matches!(candidate.remaining_minutes, Some(remaining) if remaining > time_window_minutes))
        .cloned()
        .collect();
    overflow.sort_by(compare);

    let had_matches = !matches.is_empty();
    let mut fallback = matches;
    fallback.extend(overflow);

    if !fallback.is_empty() {
        let message = if had_matches { None } else { Some(RecommendationNote::MayNotFinish) };
        return take_top(fallback, message);
    }

    let mut unestimated: Vec<RankedTask> = candidates.iter().filter(|candidate| candidate.remaining_minutes.is_none()).cloned().collect();
    unestimated.sort_by(|a, b| a.task.created_at.cmp(&b.task.created_at));

    if unestimated.is_empty() {
        return Recommendation {
            top: None,
            alternatives: Vec::new(),
            message: Some(RecommendationNote::NothingToRecommend),
        };
    }
    take_top(unestimated, Some(RecommendationNote::AddEstimates))
}
