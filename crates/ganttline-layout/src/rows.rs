//! Row layout: one horizontal bar per visible task
//!
//! Rows keep the order of the visible list. Row indices are positional, so the id lookup
//! is rebuilt on every pass rather than cached across filter changes.

use chrono::NaiveDate;
use ganttline_core::{CpmFact, DependencyType, Task, TaskId};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

use crate::schedule::ResolvedTask;
use crate::{LayoutConfig, TimeScale};

/// Predecessor entry shown in a row's tooltip
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PredecessorLabel {
    pub id: TaskId,
    /// Title of the predecessor, if it exists in the schedule
    pub title: Option<String>,
    pub dep_type: DependencyType,
}

/// Geometry and metadata of one task bar
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LayoutRow {
    pub row_index: usize,
    pub task: Task,
    pub cpm: CpmFact,
    pub effective_start: NaiveDate,
    pub effective_end: NaiveDate,
    pub duration_days: i64,
    pub top_px: f64,
    pub left_px: f64,
    pub width_px: f64,
    /// Absolute left edge, used as a dependency anchor
    pub x_start: f64,
    /// Absolute right edge, used as a dependency anchor
    pub x_end: f64,
    /// Vertical center of the row
    pub center_y: f64,
    pub predecessors: Vec<PredecessorLabel>,
    pub tooltip: String,
}

impl LayoutRow {
    pub fn is_critical(&self) -> bool {
        self.cpm.is_critical
    }
}

/// Rows plus the task id → row index lookup used by the router
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct RowLayout {
    pub rows: Vec<LayoutRow>,
    pub id_to_row: BTreeMap<TaskId, usize>,
}

impl RowLayout {
    pub fn row_for(&self, id: TaskId) -> Option<&LayoutRow> {
        self.id_to_row.get(&id).and_then(|&index| self.rows.get(index))
    }
}

/// Lay out `visible` top to bottom
///
/// `titles` covers the whole schedule so tooltips can name predecessors hidden by the filter.
/// When two visible tasks share an id, the first one keeps the lookup entry.
pub fn layout_rows(
    visible: &[&ResolvedTask],
    titles: &HashMap<TaskId, String>,
    scale: &TimeScale,
    config: &LayoutConfig,
) -> RowLayout {
    let ppd = scale.pixels_per_day();
    let mut layout = RowLayout::default();

    for (index, resolved) in visible.iter().enumerate() {
        let top_px = index as f64 * config.row_pitch();
        let left_px = scale.date_to_offset_px(resolved.start);
        let duration_days = resolved.duration_days();
        let width_px = (duration_days as f64 * ppd).max(ppd);

        let predecessors: Vec<PredecessorLabel> = resolved
            .cpm
            .predecessors
            .iter()
            .map(|p| PredecessorLabel {
                id: p.id,
                title: titles.get(&p.id).cloned(),
                dep_type: p.dep_type,
            })
            .collect();

        let tooltip = tooltip_text(resolved, duration_days, &predecessors);

        layout.id_to_row.entry(resolved.task.id).or_insert(index);
        layout.rows.push(LayoutRow {
            row_index: index,
            task: resolved.task.clone(),
            cpm: resolved.cpm.clone(),
            effective_start: resolved.start,
            effective_end: resolved.end,
            duration_days,
            top_px,
            left_px,
            width_px,
            x_start: left_px,
            x_end: left_px + width_px,
            center_y: top_px + config.row_height / 2.0,
            predecessors,
            tooltip,
        });
    }

    layout
}

fn tooltip_text(
    resolved: &ResolvedTask,
    duration_days: i64,
    predecessors: &[PredecessorLabel],
) -> String {
    let cpm = &resolved.cpm;
    let mut lines = vec![
        resolved.task.title.clone(),
        format!("Status: {}", resolved.task.status),
        format!(
            "{} to {} ({}d)",
            resolved.start.format("%Y-%m-%d"),
            resolved.end.format("%Y-%m-%d"),
            duration_days
        ),
    ];

    let mut float_line = format!("ES {} / EF {} / Slack {}d", cpm.es, cpm.ef, cpm.slack);
    if cpm.is_critical {
        float_line.push_str(" / Critical");
    }
    lines.push(float_line);

    if !predecessors.is_empty() {
        let names: Vec<String> = predecessors
            .iter()
            .map(|p| match &p.title {
                Some(title) => format!("{} ({})", title, p.dep_type.short_code()),
                None => format!("#{} ({})", p.id, p.dep_type.short_code()),
            })
            .collect();
        lines.push(format!("Predecessors: {}", names.join(", ")));
    }

    lines.join("\n")
}
