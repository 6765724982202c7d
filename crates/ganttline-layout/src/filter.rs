//! Visible-set predicate applied before rows are assigned

use ganttline_core::{PhaseFilter, PhaseId, StatusFilter, Task};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::schedule::ResolvedTask;

/// Status and phase selection
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskFilter {
    pub status: StatusFilter,
    pub phase: PhaseFilter,
}

impl TaskFilter {
    pub fn new(status: StatusFilter, phase: PhaseFilter) -> Self {
        Self { status, phase }
    }

    pub fn matches(&self, task: &Task) -> bool {
        self.status.matches(task.status) && self.phase.matches(task.phase_id)
    }

    /// Matching tasks in their original order
    pub fn apply<'a>(&self, tasks: &'a [ResolvedTask]) -> Vec<&'a ResolvedTask> {
        tasks.iter().filter(|t| self.matches(&t.task)).collect()
    }
}

/// Sorted, de-duplicated phase ids for the phase selector
pub fn distinct_phase_ids(tasks: &[Task]) -> Vec<PhaseId> {
    tasks
        .iter()
        .filter_map(|task| task.phase_id)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
