//! Geometry constants for the layout engine

use ganttline_core::{ParseError, ZoomLevel};
use serde::{Deserialize, Serialize};

/// Layout engine configuration
///
/// Every field has a default, so a partial `[layout]` table in a config file is enough.
/// Values loaded from outside should pass [`LayoutConfig::validate`] before use.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutConfig {
    /// Height of a task bar row in pixels
    pub row_height: f64,
    /// Vertical gap between rows in pixels
    pub row_gap: f64,
    /// Height of the ruler band above the rows
    pub header_height: f64,
    /// Floor for the canvas width so short schedules stay legible
    pub min_canvas_width: f64,
    /// Length of the arrowhead strokes
    pub arrow_size: f64,
    /// Minimum horizontal offset of Bezier control points
    pub min_control_offset: f64,
    /// Pixels per day at day zoom
    pub day_px: f64,
    /// Pixels per day at week zoom
    pub week_px: f64,
    /// Pixels per day at month zoom
    pub month_px: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            row_height: 32.0,
            row_gap: 8.0,
            header_height: 48.0,
            min_canvas_width: 700.0,
            arrow_size: 6.0,
            min_control_offset: 16.0,
            day_px: 24.0,
            week_px: 12.0,
            month_px: 4.0,
        }
    }
}

impl LayoutConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Horizontal density for a zoom level
    pub fn pixels_per_day(&self, zoom: ZoomLevel) -> f64 {
        match zoom {
            ZoomLevel::Day => self.day_px,
            ZoomLevel::Week => self.week_px,
            ZoomLevel::Month => self.month_px,
        }
    }

    /// Distance between the tops of consecutive rows
    pub fn row_pitch(&self) -> f64 {
        self.row_height + self.row_gap
    }

    /// Configure row height
    pub fn row_height(mut self, height: f64) -> Self {
        self.row_height = height;
        self
    }

    /// Configure row gap
    pub fn row_gap(mut self, gap: f64) -> Self {
        self.row_gap = gap;
        self
    }

    /// Configure header height
    pub fn header_height(mut self, height: f64) -> Self {
        self.header_height = height;
        self
    }

    /// Configure the minimum canvas width
    pub fn min_canvas_width(mut self, width: f64) -> Self {
        self.min_canvas_width = width;
        self
    }

    /// Configure the arrowhead size
    pub fn arrow_size(mut self, size: f64) -> Self {
        self.arrow_size = size;
        self
    }

    /// Configure the minimum Bezier control offset
    pub fn min_control_offset(mut self, offset: f64) -> Self {
        self.min_control_offset = offset;
        self
    }

    /// Configure pixels per day at day zoom
    pub fn day_px(mut self, px: f64) -> Self {
        self.day_px = px;
        self
    }

    /// Configure pixels per day at week zoom
    pub fn week_px(mut self, px: f64) -> Self {
        self.week_px = px;
        self
    }

    /// Configure pixels per day at month zoom
    pub fn month_px(mut self, px: f64) -> Self {
        self.month_px = px;
        self
    }

    /// Reject settings that would collapse bars or the canvas
    ///
    /// Densities, row height and the canvas floor must be positive; gaps and offsets may be
    /// zero. Every value must be finite.
    pub fn validate(&self) -> Result<(), ParseError> {
        let positive = [
            ("day_px", self.day_px),
            ("week_px", self.week_px),
            ("month_px", self.month_px),
            ("row_height", self.row_height),
            ("min_canvas_width", self.min_canvas_width),
        ];
        let non_negative = [
            ("row_gap", self.row_gap),
            ("header_height", self.header_height),
            ("arrow_size", self.arrow_size),
            ("min_control_offset", self.min_control_offset),
        ];

        for (key, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(invalid(key, value, "a positive number"));
            }
        }
        for (key, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(invalid(key, value, "zero or a positive number"));
            }
        }
        Ok(())
    }
}

fn invalid(key: &'static str, value: f64, expected: &'static str) -> ParseError {
    ParseError::InvalidConfig {
        key,
        value: value.to_string(),
        expected,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_zoom_table() {
        let config = LayoutConfig::default();
        assert_eq!(config.pixels_per_day(ZoomLevel::Day), 24.0);
        assert_eq!(config.pixels_per_day(ZoomLevel::Week), 12.0);
        assert_eq!(config.pixels_per_day(ZoomLevel::Month), 4.0);
    }

    #[test]
    fn builder_overrides() {
        let config = LayoutConfig::new()
            .row_height(20.0)
            .row_gap(4.0)
            .min_canvas_width(0.0);
        assert_eq!(config.row_pitch(), 24.0);
        assert_eq!(config.min_canvas_width, 0.0);
    }

    #[test]
    fn builders_cover_zoom_table_and_curves() {
        let config = LayoutConfig::new()
            .day_px(30.0)
            .week_px(10.0)
            .month_px(2.0)
            .min_control_offset(8.0);
        assert_eq!(config.pixels_per_day(ZoomLevel::Day), 30.0);
        assert_eq!(config.pixels_per_day(ZoomLevel::Week), 10.0);
        assert_eq!(config.pixels_per_day(ZoomLevel::Month), 2.0);
        assert_eq!(config.min_control_offset, 8.0);
    }

    #[test]
    fn defaults_are_valid() {
        assert_eq!(LayoutConfig::default().validate(), Ok(()));
        assert_eq!(
            LayoutConfig::new().row_gap(0.0).arrow_size(0.0).validate(),
            Ok(())
        );
    }

    #[test]
    fn collapsed_geometry_is_rejected() {
        assert_eq!(
            LayoutConfig::new().week_px(0.0).validate(),
            Err(ParseError::InvalidConfig {
                key: "week_px",
                value: "0".into(),
                expected: "a positive number",
            })
        );
        assert!(LayoutConfig::new().day_px(-24.0).validate().is_err());
        assert!(LayoutConfig::new().month_px(f64::NAN).validate().is_err());
        assert!(LayoutConfig::new().row_height(0.0).validate().is_err());
        assert!(LayoutConfig::new().min_canvas_width(0.0).validate().is_err());
        assert!(LayoutConfig::new().row_gap(-1.0).validate().is_err());
        assert!(LayoutConfig::new()
            .header_height(f64::INFINITY)
            .validate()
            .is_err());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let result = serde_json::from_str::<LayoutConfig>(r#"{"weekpx": 16}"#);
        assert!(result.is_err());
    }

    #[test]
    fn partial_config_keeps_defaults() {
        let config: LayoutConfig = serde_json::from_str(r#"{"row_height": 40}"#).unwrap();
        assert_eq!(config.row_height, 40.0);
        assert_eq!(config.row_gap, 8.0);
        assert_eq!(config.week_px, 12.0);
    }
}
