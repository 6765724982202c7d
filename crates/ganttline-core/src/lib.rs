//! # ganttline-core
//!
//! Core domain model for the ganttline timeline layout engine.
//!
//! This crate provides:
//! - Schedule facts: `Task`, `CpmFact`, `Dependency`, `DateRange`
//! - The timeline API payload: `TimelineResponse` and its tagged `TimelineItem`
//! - View controls: `ZoomLevel`, `StatusFilter`, `PhaseFilter`
//! - Error types shared by the layout and rendering crates
//!
//! ## Example
//!
//! ```rust
//! use ganttline_core::{CpmFact, Dependency, DependencyType, Task, TaskStatus};
//!
//! let design = Task::new(1, "Design").status(TaskStatus::InProgress);
//! let build = Task::new(2, "Build").phase(7);
//! let fact = CpmFact::new(1, 0, 5).critical();
//! let edge = Dependency::new(1, 2).kind(DependencyType::StartToStart).lag(2);
//!
//! assert_eq!(fact.ef, 5);
//! assert_eq!(edge.lag, 2);
//! assert_eq!(build.phase_id, Some(7));
//! assert!(design.start_date.is_none());
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

mod wire;

// ============================================================================
// Type Aliases
// ============================================================================

/// Unique identifier for a task
pub type TaskId = i64;

/// Identifier of the phase a task is grouped under
pub type PhaseId = i64;

// ============================================================================
// Tasks
// ============================================================================

/// A schedulable unit of work as delivered by the timeline API
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    /// Display label
    #[serde(alias = "name")]
    pub title: String,
    /// Optional grouping
    #[serde(default)]
    pub phase_id: Option<PhaseId>,
    #[serde(default)]
    pub status: TaskStatus,
    /// Explicit start date (falls back to CPM offsets when absent)
    #[serde(default, deserialize_with = "wire::optional_date")]
    pub start_date: Option<NaiveDate>,
    /// Explicit due date (falls back to CPM duration when absent)
    #[serde(default, deserialize_with = "wire::optional_date")]
    pub due_date: Option<NaiveDate>,
}

impl Task {
    /// Create a task with no phase, no explicit dates and `not_started` status
    pub fn new(id: TaskId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            phase_id: None,
            status: TaskStatus::default(),
            start_date: None,
            due_date: None,
        }
    }

    /// Set the phase (builder pattern)
    pub fn phase(mut self, phase_id: PhaseId) -> Self {
        self.phase_id = Some(phase_id);
        self
    }

    /// Set the status (builder pattern)
    pub fn status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    /// Set the explicit start date (builder pattern)
    pub fn starts(mut self, date: NaiveDate) -> Self {
        self.start_date = Some(date);
        self
    }

    /// Set the explicit due date (builder pattern)
    pub fn due(mut self, date: NaiveDate) -> Self {
        self.due_date = Some(date);
        self
    }
}

/// Task workflow status
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    NotStarted,
    InProgress,
    #[serde(alias = "complete")]
    Completed,
    OnHold,
    Cancelled,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 5] = [
        TaskStatus::NotStarted,
        TaskStatus::InProgress,
        TaskStatus::Completed,
        TaskStatus::OnHold,
        TaskStatus::Cancelled,
    ];

    /// Wire name (`not_started`, `in_progress`, ...)
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::NotStarted => "not_started",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Completed => "completed",
            TaskStatus::OnHold => "on_hold",
            TaskStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskStatus::NotStarted => write!(f, "Not Started"),
            TaskStatus::InProgress => write!(f, "In Progress"),
            TaskStatus::Completed => write!(f, "Completed"),
            TaskStatus::OnHold => write!(f, "On Hold"),
            TaskStatus::Cancelled => write!(f, "Cancelled"),
        }
    }
}

impl FromStr for TaskStatus {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        match normalized.as_str() {
            "complete" => Ok(TaskStatus::Completed),
            other => TaskStatus::ALL
                .into_iter()
                .find(|status| status.as_str() == other)
                .ok_or_else(|| ParseError::UnknownStatus(s.to_string())),
        }
    }
}

// ============================================================================
// Dependencies
// ============================================================================

/// Precedence edge between two tasks
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependency {
    /// Predecessor task
    pub from: TaskId,
    /// Successor task
    pub to: TaskId,
    #[serde(rename = "type", default)]
    pub dep_type: DependencyType,
    /// Lag in days (negative values express lead time)
    #[serde(default)]
    pub lag: i64,
}

impl Dependency {
    /// Finish-to-start edge with no lag
    pub fn new(from: TaskId, to: TaskId) -> Self {
        Self {
            from,
            to,
            dep_type: DependencyType::default(),
            lag: 0,
        }
    }

    /// Set the relationship kind (builder pattern)
    pub fn kind(mut self, dep_type: DependencyType) -> Self {
        self.dep_type = dep_type;
        self
    }

    /// Set the lag in days (builder pattern)
    pub fn lag(mut self, days: i64) -> Self {
        self.lag = days;
        self
    }
}

/// Types of task dependencies
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DependencyType {
    /// Finish-to-Start: successor starts after predecessor finishes
    #[default]
    #[serde(alias = "FS")]
    FinishToStart,
    /// Start-to-Start: successor starts when predecessor starts
    #[serde(alias = "SS")]
    StartToStart,
    /// Finish-to-Finish: successor finishes when predecessor finishes
    #[serde(alias = "FF")]
    FinishToFinish,
    /// Start-to-Finish: successor finishes when predecessor starts
    #[serde(alias = "SF")]
    StartToFinish,
}

impl DependencyType {
    /// Two-letter code used in tooltips
    pub fn short_code(&self) -> &'static str {
        match self {
            DependencyType::FinishToStart => "FS",
            DependencyType::StartToStart => "SS",
            DependencyType::FinishToFinish => "FF",
            DependencyType::StartToFinish => "SF",
        }
    }

    /// Whether the edge leaves the predecessor at its finish
    pub fn leaves_from_finish(&self) -> bool {
        matches!(
            self,
            DependencyType::FinishToStart | DependencyType::FinishToFinish
        )
    }

    /// Whether the edge arrives at the successor's finish
    pub fn arrives_at_finish(&self) -> bool {
        matches!(
            self,
            DependencyType::FinishToFinish | DependencyType::StartToFinish
        )
    }
}

impl fmt::Display for DependencyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_code())
    }
}

impl FromStr for DependencyType {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fs" | "finish_to_start" => Ok(DependencyType::FinishToStart),
            "ss" | "start_to_start" => Ok(DependencyType::StartToStart),
            "ff" | "finish_to_finish" => Ok(DependencyType::FinishToFinish),
            "sf" | "start_to_finish" => Ok(DependencyType::StartToFinish),
            _ => Err(ParseError::UnknownDependencyType(s.to_string())),
        }
    }
}

// ============================================================================
// CPM Facts
// ============================================================================

/// Predecessor reference carried by a CPM fact
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CpmPredecessor {
    pub id: TaskId,
    #[serde(rename = "type", default)]
    pub dep_type: DependencyType,
}

/// Critical-path facts for one task, computed upstream
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CpmFact {
    pub id: TaskId,
    /// Early start, in days from project start
    pub es: i64,
    /// Early finish, in days from project start
    pub ef: i64,
    /// Duration in days
    pub duration: i64,
    /// Total float in days
    #[serde(default)]
    pub slack: i64,
    #[serde(default)]
    pub is_critical: bool,
    #[serde(default)]
    pub predecessors: Vec<CpmPredecessor>,
}

impl CpmFact {
    /// Fact with `ef = es + duration`, no slack, not critical
    pub fn new(id: TaskId, es: i64, duration: i64) -> Self {
        Self {
            id,
            es,
            ef: es + duration,
            duration,
            slack: 0,
            is_critical: false,
            predecessors: Vec::new(),
        }
    }

    /// Neutral stand-in for a task the CPM pass did not report
    pub fn placeholder(id: TaskId) -> Self {
        Self::new(id, 0, 1)
    }

    /// Mark as critical (builder pattern)
    pub fn critical(mut self) -> Self {
        self.is_critical = true;
        self
    }

    /// Set total float (builder pattern)
    pub fn slack(mut self, days: i64) -> Self {
        self.slack = days;
        self
    }

    /// Append a predecessor reference (builder pattern)
    pub fn predecessor(mut self, id: TaskId, dep_type: DependencyType) -> Self {
        self.predecessors.push(CpmPredecessor { id, dep_type });
        self
    }
}

/// CPM block of the timeline payload
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CpmSummary {
    #[serde(default)]
    pub tasks: Vec<CpmFact>,
    #[serde(default)]
    pub project_duration_days: i64,
}

impl CpmSummary {
    /// Index facts by task id. Later duplicates win.
    pub fn facts(&self) -> HashMap<TaskId, CpmFact> {
        self.tasks
            .iter()
            .map(|fact| (fact.id, fact.clone()))
            .collect()
    }
}

// ============================================================================
// Date Range
// ============================================================================

/// Inclusive calendar range used as the layout's coordinate origin
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    #[serde(deserialize_with = "wire::date")]
    pub start: NaiveDate,
    #[serde(deserialize_with = "wire::date")]
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Number of calendar days covered, never less than one
    pub fn total_days(&self) -> i64 {
        ((self.end - self.start).num_days() + 1).max(1)
    }
}

/// Signed number of days from `from` to `to`
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}

// ============================================================================
// Timeline Payload
// ============================================================================

/// Phase entry of the timeline feed
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PhaseItem {
    pub id: PhaseId,
    #[serde(alias = "title")]
    pub name: String,
    #[serde(default, deserialize_with = "wire::optional_date")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "wire::optional_date")]
    pub end_date: Option<NaiveDate>,
}

/// Milestone entry of the timeline feed
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MilestoneItem {
    pub id: i64,
    #[serde(alias = "name")]
    pub title: String,
    #[serde(default, deserialize_with = "wire::optional_date")]
    pub date: Option<NaiveDate>,
}

/// One entry of the timeline feed, discriminated by its `type` field
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TimelineItem {
    Task(Task),
    Phase(PhaseItem),
    Milestone(MilestoneItem),
    /// Any discriminator this engine does not lay out
    #[serde(other)]
    Other,
}

impl TimelineItem {
    pub fn as_task(&self) -> Option<&Task> {
        match self {
            TimelineItem::Task(task) => Some(task),
            _ => None,
        }
    }
}

/// Response body of the timeline endpoint
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TimelineResponse {
    #[serde(default)]
    pub timeline: Vec<TimelineItem>,
    #[serde(default)]
    pub dependencies: Vec<Dependency>,
    #[serde(default)]
    pub cpm: CpmSummary,
    #[serde(default)]
    pub date_range: Option<DateRange>,
}

impl TimelineResponse {
    /// Task items in feed order. Other item kinds are skipped.
    pub fn tasks(&self) -> Vec<Task> {
        self.timeline
            .iter()
            .filter_map(TimelineItem::as_task)
            .cloned()
            .collect()
    }
}

// ============================================================================
// View Controls
// ============================================================================

/// Timeline zoom level
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZoomLevel {
    Day,
    #[default]
    Week,
    Month,
}

impl ZoomLevel {
    /// Spacing of emphasized grid lines, if this zoom emphasizes any
    pub fn major_interval_days(&self) -> Option<i64> {
        match self {
            ZoomLevel::Day => None,
            ZoomLevel::Week => Some(7),
            ZoomLevel::Month => Some(30),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ZoomLevel::Day => "day",
            ZoomLevel::Week => "week",
            ZoomLevel::Month => "month",
        }
    }
}

impl fmt::Display for ZoomLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ZoomLevel {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "day" | "days" => Ok(ZoomLevel::Day),
            "week" | "weeks" => Ok(ZoomLevel::Week),
            "month" | "months" => Ok(ZoomLevel::Month),
            _ => Err(ParseError::UnknownZoom(s.to_string())),
        }
    }
}

/// Status selector: `all` or one status
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusFilter {
    #[default]
    All,
    Only(TaskStatus),
}

impl StatusFilter {
    pub fn matches(&self, status: TaskStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => *wanted == status,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(StatusFilter::All);
        }
        s.parse().map(StatusFilter::Only)
    }
}

/// Phase selector: `all` or one phase id
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseFilter {
    #[default]
    All,
    Only(PhaseId),
}

impl PhaseFilter {
    /// A specific phase never matches a task without one
    pub fn matches(&self, phase_id: Option<PhaseId>) -> bool {
        match self {
            PhaseFilter::All => true,
            PhaseFilter::Only(wanted) => phase_id == Some(*wanted),
        }
    }
}

impl FromStr for PhaseFilter {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("all") {
            return Ok(PhaseFilter::All);
        }
        trimmed
            .parse()
            .map(PhaseFilter::Only)
            .map_err(|_| ParseError::InvalidPhase(s.to_string()))
    }
}

// ============================================================================
// Errors
// ============================================================================

/// Rejection of a boundary value (CLI flag, config key)
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Unknown zoom level: {0} (expected day, week or month)")]
    UnknownZoom(String),

    #[error("Unknown task status: {0}")]
    UnknownStatus(String),

    #[error("Unknown dependency type: {0}")]
    UnknownDependencyType(String),

    #[error("Invalid phase filter: {0} (expected 'all' or a phase id)")]
    InvalidPhase(String),

    #[error("Invalid layout setting {key} = {value} (expected {expected})")]
    InvalidConfig {
        key: &'static str,
        value: String,
        expected: &'static str,
    },
}

/// Rendering error
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Format error: {0}")]
    Format(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

// ============================================================================
// Tests
// ============================================================================
