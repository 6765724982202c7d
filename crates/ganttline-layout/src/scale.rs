//! Calendar ⇄ pixel mapping

use chrono::{Duration, NaiveDate};
use ganttline_core::{days_between, DateRange, ZoomLevel};

use crate::LayoutConfig;

/// Horizontal scale of one render pass
///
/// Dates outside the range are clamped onto the canvas, never rejected.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimeScale {
    range: DateRange,
    zoom: ZoomLevel,
    pixels_per_day: f64,
    total_days: i64,
    content_width: f64,
}

impl TimeScale {
    pub fn new(range: DateRange, zoom: ZoomLevel, config: &LayoutConfig) -> Self {
        let pixels_per_day = config.pixels_per_day(zoom);
        let total_days = range.total_days();
        let content_width = (total_days as f64 * pixels_per_day).max(config.min_canvas_width);
        Self {
            range,
            zoom,
            pixels_per_day,
            total_days,
            content_width,
        }
    }

    pub fn range(&self) -> DateRange {
        self.range
    }

    pub fn zoom(&self) -> ZoomLevel {
        self.zoom
    }

    pub fn pixels_per_day(&self) -> f64 {
        self.pixels_per_day
    }

    pub fn total_days(&self) -> i64 {
        self.total_days
    }

    pub fn content_width(&self) -> f64 {
        self.content_width
    }

    /// Width of one day once the canvas floor is applied
    pub fn day_width_px(&self) -> f64 {
        self.content_width / self.total_days as f64
    }

    /// Left offset of `date` from the range start
    pub fn date_to_offset_px(&self, date: NaiveDate) -> f64 {
        let days = days_between(self.range.start, date).clamp(0, self.total_days);
        days as f64 * self.pixels_per_day
    }

    /// Nearest day at a horizontal offset, clamped into the range
    pub fn offset_px_to_date(&self, offset_px: f64) -> NaiveDate {
        let days = (offset_px / self.pixels_per_day).round() as i64;
        self.range.start + Duration::days(days.clamp(0, self.total_days - 1))
    }

    /// Horizontal shift for a dependency lag
    pub fn lag_to_px(&self, lag_days: i64) -> f64 {
        lag_days as f64 * self.day_width_px()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn quarter() -> DateRange {
        DateRange::new(date(2025, 1, 1), date(2025, 3, 31))
    }

    #[test]
    fn width_follows_zoom_table() {
        let config = LayoutConfig::default();
        let scale = TimeScale::new(quarter(), ZoomLevel::Day, &config);
        assert_eq!(scale.total_days(), 90);
        assert_eq!(scale.content_width(), 2160.0);
        assert_eq!(scale.day_width_px(), 24.0);
    }

    #[test]
    fn short_range_hits_canvas_floor() {
        let config = LayoutConfig::default();
        let range = DateRange::new(date(2025, 1, 1), date(2025, 1, 10));
        let scale = TimeScale::new(range, ZoomLevel::Month, &config);
        assert_eq!(scale.content_width(), 700.0);
        assert_eq!(scale.day_width_px(), 70.0);
        assert_eq!(scale.lag_to_px(2), 140.0);
    }

    #[test]
    fn offsets_are_clamped_into_range() {
        let config = LayoutConfig::default();
        let scale = TimeScale::new(quarter(), ZoomLevel::Week, &config);
        assert_eq!(scale.date_to_offset_px(date(2024, 12, 1)), 0.0);
        assert_eq!(scale.date_to_offset_px(date(2025, 1, 11)), 120.0);
        assert_eq!(scale.date_to_offset_px(date(2026, 1, 1)), 90.0 * 12.0);
    }

    #[test]
    fn offset_maps_back_to_nearest_day() {
        let config = LayoutConfig::default();
        let scale = TimeScale::new(quarter(), ZoomLevel::Week, &config);
        assert_eq!(scale.offset_px_to_date(120.0), date(2025, 1, 11));
        assert_eq!(scale.offset_px_to_date(125.0), date(2025, 1, 11));
        assert_eq!(scale.offset_px_to_date(-40.0), date(2025, 1, 1));
        assert_eq!(scale.offset_px_to_date(1.0e6), date(2025, 3, 31));
    }
}
