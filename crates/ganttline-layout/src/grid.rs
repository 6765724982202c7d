//! Day-boundary ruler lines

use chrono::{Duration, NaiveDate};
use ganttline_core::ZoomLevel;
use serde::Serialize;

use crate::{LayoutConfig, TimeScale};

/// One vertical grid line
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GridLine {
    pub day_index: i64,
    pub date: NaiveDate,
    pub x: f64,
    /// Week or month boundary, drawn heavier
    pub is_major: bool,
}

impl GridLine {
    /// Whether the ruler should print a date for this line
    pub fn is_labeled(&self, zoom: ZoomLevel) -> bool {
        self.is_major || zoom == ZoomLevel::Day
    }
}

/// One line per day of the range, spaced across the full canvas width
pub fn grid_lines(scale: &TimeScale) -> Vec<GridLine> {
    let spacing = scale.day_width_px();
    let major_every = scale.zoom().major_interval_days();
    let start = scale.range().start;

    // Stops at the last representable date instead of overflowing
    (0..scale.total_days())
        .map_while(|day_index| {
            let date = Duration::try_days(day_index).and_then(|d| start.checked_add_signed(d))?;
            Some(GridLine {
                day_index,
                date,
                x: day_index as f64 * spacing,
                is_major: major_every.is_some_and(|every| day_index % every == 0),
            })
        })
        .collect()
}

/// Height of the grid: the row stack plus the ruler band
pub fn grid_height(row_count: usize, config: &LayoutConfig) -> f64 {
    row_count as f64 * config.row_pitch() + config.header_height
}
