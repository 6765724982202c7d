//! # ganttline-layout
//!
//! Timeline layout engine: turns schedule facts into pixel-space Gantt geometry.
//!
//! This crate provides:
//! - Date resolution with CPM fallbacks (`schedule`)
//! - Calendar ⇄ pixel mapping per zoom level (`scale`)
//! - Status/phase filtering (`filter`)
//! - Bar geometry per visible task (`rows`)
//! - Dependency curves with critical-chain emphasis (`router`)
//! - Day-boundary ruler lines (`grid`)
//!
//! The engine never recomputes the critical path; it consumes the CPM facts it is given.
//! A layout pass is a pure function of its [`LayoutRequest`]: no I/O, no shared state, so
//! concurrent passes over separate requests never interfere.
//!
//! ## Example
//!
//! ```rust
//! use ganttline_core::{CpmFact, Dependency, Task, ZoomLevel};
//! use ganttline_layout::{layout, LayoutRequest};
//!
//! let request = LayoutRequest::new(
//!     vec![Task::new(1, "Design"), Task::new(2, "Build")],
//!     vec![Dependency::new(1, 2)],
//!     vec![CpmFact::new(1, 0, 5).critical(), CpmFact::new(2, 5, 4).critical()],
//! )
//! .zoom(ZoomLevel::Week);
//!
//! let timeline = layout(&request);
//! assert_eq!(timeline.rows.len(), 2);
//! assert_eq!(timeline.edges.len(), 1);
//! ```

pub mod config;
pub mod filter;
pub mod grid;
pub mod rows;
pub mod router;
pub mod scale;
pub mod schedule;

pub use config::LayoutConfig;
pub use filter::{distinct_phase_ids, TaskFilter};
pub use grid::{grid_height, grid_lines, GridLine};
pub use rows::{layout_rows, LayoutRow, PredecessorLabel, RowLayout};
pub use router::{route_edges, EdgeEmphasis, LayoutEdge, Point};
pub use scale::TimeScale;
pub use schedule::{resolve_schedule, ResolvedSchedule, ResolvedTask};

use ganttline_core::{
    CpmFact, DateRange, Dependency, PhaseFilter, StatusFilter, Task, TaskId, TimelineResponse,
    ZoomLevel,
};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

/// Message drawing adapters show when the visible set is empty
pub const EMPTY_STATE_MESSAGE: &str = "No tasks match the current filters";

/// Everything one layout pass depends on
#[derive(Clone, Debug, Default)]
pub struct LayoutRequest {
    /// Tasks in display order
    pub tasks: Vec<Task>,
    pub dependencies: Vec<Dependency>,
    /// CPM facts keyed by task id
    pub cpm: HashMap<TaskId, CpmFact>,
    /// Externally supplied range; derived from the tasks when absent
    pub date_range: Option<DateRange>,
    pub zoom: ZoomLevel,
    pub filter: TaskFilter,
}

impl LayoutRequest {
    pub fn new(tasks: Vec<Task>, dependencies: Vec<Dependency>, facts: Vec<CpmFact>) -> Self {
        Self {
            tasks,
            dependencies,
            cpm: facts.into_iter().map(|fact| (fact.id, fact)).collect(),
            ..Self::default()
        }
    }

    /// Request over the task items of a timeline response
    pub fn from_response(response: &TimelineResponse) -> Self {
        Self {
            tasks: response.tasks(),
            dependencies: response.dependencies.clone(),
            cpm: response.cpm.facts(),
            date_range: response.date_range,
            ..Self::default()
        }
    }

    /// Set the zoom level (builder pattern)
    pub fn zoom(mut self, zoom: ZoomLevel) -> Self {
        self.zoom = zoom;
        self
    }

    /// Set the status filter (builder pattern)
    pub fn status(mut self, status: StatusFilter) -> Self {
        self.filter.status = status;
        self
    }

    /// Set the phase filter (builder pattern)
    pub fn phase(mut self, phase: PhaseFilter) -> Self {
        self.filter.phase = phase;
        self
    }

    /// Override the derived date range (builder pattern)
    pub fn date_range(mut self, range: DateRange) -> Self {
        self.date_range = Some(range);
        self
    }
}

/// Composited geometry of one timeline view
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TimelineLayout {
    pub date_range: DateRange,
    pub zoom: ZoomLevel,
    pub total_days: i64,
    pub pixels_per_day: f64,
    pub content_width: f64,
    pub content_height: f64,
    pub header_height: f64,
    pub row_height: f64,
    pub rows: Vec<LayoutRow>,
    pub edges: Vec<LayoutEdge>,
    pub grid_lines: Vec<GridLine>,
    pub id_to_row: BTreeMap<TaskId, usize>,
}

impl TimelineLayout {
    /// No task survived the filter
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn empty_message(&self) -> Option<&'static str> {
        self.is_empty().then_some(EMPTY_STATE_MESSAGE)
    }
}

/// Layout engine holding the geometry configuration
#[derive(Clone, Debug, Default)]
pub struct LayoutEngine {
    pub config: LayoutConfig,
}

impl LayoutEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: LayoutConfig) -> Self {
        Self { config }
    }

    /// Run a full layout pass
    pub fn layout(&self, request: &LayoutRequest) -> TimelineLayout {
        let config = &self.config;
        let schedule = resolve_schedule(&request.tasks, &request.cpm, request.date_range);
        let scale = TimeScale::new(schedule.date_range, request.zoom, config);

        let visible = request.filter.apply(&schedule.tasks);
        debug!(
            total = schedule.tasks.len(),
            visible = visible.len(),
            zoom = %request.zoom,
            "laying out timeline"
        );

        let titles: HashMap<TaskId, String> = request
            .tasks
            .iter()
            .map(|task| (task.id, task.title.clone()))
            .collect();
        let row_layout = layout_rows(&visible, &titles, &scale, config);
        let edges = route_edges(&request.dependencies, &row_layout, &scale, config);
        let grid = grid_lines(&scale);

        TimelineLayout {
            date_range: scale.range(),
            zoom: request.zoom,
            total_days: scale.total_days(),
            pixels_per_day: scale.pixels_per_day(),
            content_width: scale.content_width(),
            content_height: grid_height(row_layout.rows.len(), config),
            header_height: config.header_height,
            row_height: config.row_height,
            rows: row_layout.rows,
            edges,
            grid_lines: grid,
            id_to_row: row_layout.id_to_row,
        }
    }
}

/// Lay out `request` with the default configuration
pub fn layout(request: &LayoutRequest) -> TimelineLayout {
    LayoutEngine::new().layout(request)
}
