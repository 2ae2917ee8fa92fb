//! Pluggable task ranking.
//!
//! A ranking strategy maps each task to a float score against a fixed
//! reference time, and the list is stably sorted by that score. Missing
//! fields never abort a ranking: undated or priority-less tasks get
//! documented fallbacks so partial data still sorts somewhere sensible.

use crate::libs::messages::Message;
use crate::libs::task::Task;
use crate::msg_error_anyhow;
use anyhow::Result;
use chrono::{Duration, Local, NaiveDateTime};
use std::cmp::Ordering;

/// Names accepted by [`strategy`].
pub const SORT_METHODS: [&str; 4] = ["priority", "due_time", "priority_due", "weighted_due"];

/// One-line description per sort method, same order as [`SORT_METHODS`].
pub const SORT_METHOD_HELP: [(&str, &str); 4] = [
    ("priority", "Priority value ascending, unset priority counts as 5"),
    ("due_time", "Soonest due first, undated tasks land a year out"),
    ("priority_due", "Blend of due proximity and priority, both tanh-mapped"),
    ("weighted_due", "Days until due over days since start, largest first"),
];

/// Horizon for undated tasks in due-based scoring.
const UNDATED_DUE_DAYS: i64 = 365;
/// Tighter horizon the priority_due blend uses for undated tasks.
const UNDATED_PRIORITY_DUE_DAYS: i64 = 31;
const DEFAULT_PRIORITY: i64 = 5;

pub trait RankStrategy: std::fmt::Debug {
    /// Scoring key for one task at the given reference time.
    fn score(&self, task: &Task, now: NaiveDateTime) -> f64;

    /// Sort descending when true.
    fn reverse(&self) -> bool {
        false
    }
}

/// Plain priority order. Tasks without a priority rank as 5.
#[derive(Debug)]
pub struct ByPriority;

impl RankStrategy for ByPriority {
    fn score(&self, task: &Task, _now: NaiveDateTime) -> f64 {
        task.priority.unwrap_or(DEFAULT_PRIORITY) as f64
    }
}

/// Soonest due time first. Undated tasks score a year past `now`.
#[derive(Debug)]
pub struct ByDueTime;

impl RankStrategy for ByDueTime {
    fn score(&self, task: &Task, now: NaiveDateTime) -> f64 {
        let due = task.due_time.unwrap_or_else(|| now + Duration::days(UNDATED_DUE_DAYS));
        due.and_utc().timestamp() as f64
    }
}

/// Blend of due proximity and priority.
///
/// Both terms run through tanh so one overdue-by-months task cannot
/// drown out every priority difference. Undated tasks are treated as
/// due in 31 days.
#[derive(Debug)]
pub struct ByPriorityDue;

impl RankStrategy for ByPriorityDue {
    fn score(&self, task: &Task, now: NaiveDateTime) -> f64 {
        let due = task.due_time.unwrap_or_else(|| now + Duration::days(UNDATED_PRIORITY_DUE_DAYS));
        let due_score = ((due - now).num_days() as f64).tanh();
        let priority_score = ((task.priority.unwrap_or(DEFAULT_PRIORITY) - 1) as f64).tanh();
        due_score + priority_score
    }
}

/// Ratio of days until due to days since start, largest first.
///
/// A task started long ago with a near deadline scores low and a fresh
/// task with a far deadline scores high; descending order puts the
/// stale-and-urgent work on top. A zero in either leg yields 0.
#[derive(Debug)]
pub struct ByWeightedDue;

impl RankStrategy for ByWeightedDue {
    fn score(&self, task: &Task, now: NaiveDateTime) -> f64 {
        let due = task.due_time.unwrap_or_else(|| now + Duration::days(UNDATED_DUE_DAYS));
        let due_days = (due - now).num_days();
        let start_days = task.start_time.map(|start| (now - start).num_days()).unwrap_or(0);
        if due_days == 0 || start_days == 0 {
            return 0.0;
        }
        due_days as f64 / start_days as f64
    }

    fn reverse(&self) -> bool {
        true
    }
}

/// Looks up a strategy by name.
pub fn strategy(name: &str) -> Result<Box<dyn RankStrategy>> {
    match name {
        "priority" => Ok(Box::new(ByPriority)),
        "due_time" => Ok(Box::new(ByDueTime)),
        "priority_due" => Ok(Box::new(ByPriorityDue)),
        "weighted_due" => Ok(Box::new(ByWeightedDue)),
        other => Err(msg_error_anyhow!(Message::UnknownSortMethod(
            other.to_string(),
            SORT_METHODS.join(", ")
        ))),
    }
}

/// Sorts tasks by a strategy against an explicit reference time.
///
/// The sort is stable, so equal scores keep their fetch order.
pub fn rank_at(tasks: Vec<Task>, strategy: &dyn RankStrategy, now: NaiveDateTime) -> Vec<Task> {
    let mut scored: Vec<(f64, Task)> = tasks.into_iter().map(|task| (strategy.score(&task, now), task)).collect();
    scored.sort_by(|(a, _), (b, _)| {
        let ordering = a.partial_cmp(b).unwrap_or(Ordering::Equal);
        if strategy.reverse() {
            ordering.reverse()
        } else {
            ordering
        }
    });
    scored.into_iter().map(|(_, task)| task).collect()
}

/// Sorts tasks by the named strategy against the current local time.
pub fn rank(tasks: Vec<Task>, name: &str) -> Result<Vec<Task>> {
    let strategy = strategy(name)?;
    Ok(rank_at(tasks, strategy.as_ref(), Local::now().naive_local()))
}
