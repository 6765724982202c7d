//! Schedule model adapter
//!
//! Turns raw task records plus CPM facts into tasks with concrete start and end dates, and
//! derives the date range that anchors the whole layout. Explicit dates win; missing ones are
//! derived from CPM offsets so a task is never hidden for lack of dates.

use chrono::{Duration, NaiveDate};
use ganttline_core::{days_between, CpmFact, DateRange, Task, TaskId};
use std::collections::HashMap;
use tracing::{debug, trace};

/// Origin used when no task carries an explicit date and no range is supplied
pub fn cpm_epoch() -> NaiveDate {
    NaiveDate::from_ymd_opt(1970, 1, 1).unwrap_or(NaiveDate::MIN)
}

/// A task with its effective dates resolved
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedTask {
    pub task: Task,
    pub cpm: CpmFact,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl ResolvedTask {
    /// Inclusive length in days, at least one
    pub fn duration_days(&self) -> i64 {
        (days_between(self.start, self.end) + 1).max(1)
    }
}

/// All tasks of one render pass, resolved against a common origin
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedSchedule {
    pub date_range: DateRange,
    pub tasks: Vec<ResolvedTask>,
}

/// `date` moved by `days`, or `None` past the calendar limits
fn shift(date: NaiveDate, days: i64) -> Option<NaiveDate> {
    Duration::try_days(days).and_then(|delta| date.checked_add_signed(delta))
}

/// Effective `(start, end)` of a task relative to `origin`
///
/// CPM offsets that leave the representable calendar collapse onto the origin (for the start)
/// or onto the start (for the end).
pub fn effective_dates(task: &Task, cpm: &CpmFact, origin: NaiveDate) -> (NaiveDate, NaiveDate) {
    let start = task.start_date.unwrap_or_else(|| {
        shift(origin, cpm.es).unwrap_or_else(|| {
            debug!(task = task.id, es = cpm.es, "early start out of range, using origin");
            origin
        })
    });
    let end = task.due_date.unwrap_or_else(|| {
        shift(start, cpm.duration.max(1) - 1).unwrap_or_else(|| {
            debug!(task = task.id, duration = cpm.duration, "duration out of range, using start");
            start
        })
    });
    (start, end)
}

fn earliest_explicit_date(tasks: &[Task]) -> Option<NaiveDate> {
    tasks
        .iter()
        .flat_map(|task| [task.start_date, task.due_date])
        .flatten()
        .min()
}

/// Resolve every task and the layout date range
///
/// The range is computed over all tasks, so narrowing the visible set afterwards never moves
/// the coordinate origin.
pub fn resolve_schedule(
    tasks: &[Task],
    facts: &HashMap<TaskId, CpmFact>,
    range_override: Option<DateRange>,
) -> ResolvedSchedule {
    let origin = range_override
        .map(|range| range.start)
        .or_else(|| earliest_explicit_date(tasks))
        .unwrap_or_else(cpm_epoch);

    let resolved: Vec<ResolvedTask> = tasks
        .iter()
        .map(|task| {
            let cpm = match facts.get(&task.id) {
                Some(fact) => fact.clone(),
                None => {
                    debug!(task = task.id, "no CPM fact for task, using placeholder");
                    CpmFact::placeholder(task.id)
                }
            };
            if task.start_date.is_none() || task.due_date.is_none() {
                trace!(
                    task = task.id,
                    es = cpm.es,
                    duration = cpm.duration,
                    "deriving dates from CPM offsets"
                );
            }
            let (start, end) = effective_dates(task, &cpm, origin);
            ResolvedTask {
                task: task.clone(),
                cpm,
                start,
                end,
            }
        })
        .collect();

    let date_range = range_override.unwrap_or_else(|| {
        let start = resolved.iter().map(|t| t.start).min().unwrap_or(origin);
        let end = resolved
            .iter()
            .map(|t| t.end)
            .max()
            .unwrap_or(start)
            .max(start);
        DateRange::new(start, end)
    });
    debug!(
        start = %date_range.start,
        end = %date_range.end,
        tasks = resolved.len(),
        "resolved date range"
    );

    ResolvedSchedule {
        date_range,
        tasks: resolved,
    }
}
