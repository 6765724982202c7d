//! Dependency routing
//!
//! Each precedence edge becomes a cubic Bezier between the anchors its relationship kind
//! selects, with a chevron arrowhead at the successor end. Edges whose endpoints are not both
//! laid out are dropped.

use ganttline_core::{Dependency, DependencyType, TaskId};
use serde::Serialize;
use std::f64::consts::FRAC_PI_6;
use tracing::debug;

use crate::rows::{LayoutRow, RowLayout};
use crate::{LayoutConfig, TimeScale};

/// A point in layout space
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Visual weight of a routed edge
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeEmphasis {
    Critical,
    Normal,
}

impl EdgeEmphasis {
    /// Critical only when both endpoints are critical
    pub fn between(predecessor_critical: bool, successor_critical: bool) -> Self {
        if predecessor_critical && successor_critical {
            EdgeEmphasis::Critical
        } else {
            EdgeEmphasis::Normal
        }
    }

    /// Color token understood by drawing adapters
    pub fn token(&self) -> &'static str {
        match self {
            EdgeEmphasis::Critical => "critical",
            EdgeEmphasis::Normal => "normal",
        }
    }
}

/// A routed dependency arrow
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LayoutEdge {
    pub from: TaskId,
    pub to: TaskId,
    pub kind: DependencyType,
    pub lag: i64,
    pub lag_px: f64,
    pub start: Point,
    pub end: Point,
    pub control1: Point,
    pub control2: Point,
    /// SVG path data for the curve
    pub path: String,
    /// Chevron as `[left, tip, right]`
    pub arrow: [Point; 3],
    /// SVG polyline points for the chevron
    pub arrow_points: String,
    pub emphasis: EdgeEmphasis,
}

/// Horizontal anchors `(x1, x2)` for a relationship kind, before lag
pub fn anchor_x(
    kind: DependencyType,
    predecessor: &LayoutRow,
    successor: &LayoutRow,
) -> (f64, f64) {
    let x1 = if kind.leaves_from_finish() {
        predecessor.x_end
    } else {
        predecessor.x_start
    };
    let x2 = if kind.arrives_at_finish() {
        successor.x_end
    } else {
        successor.x_start
    };
    (x1, x2)
}

/// Route every dependency whose endpoints are both present in `rows`
pub fn route_edges(
    dependencies: &[Dependency],
    rows: &RowLayout,
    scale: &TimeScale,
    config: &LayoutConfig,
) -> Vec<LayoutEdge> {
    dependencies
        .iter()
        .filter_map(|dep| {
            let (Some(predecessor), Some(successor)) =
                (rows.row_for(dep.from), rows.row_for(dep.to))
            else {
                debug!(
                    from = dep.from,
                    to = dep.to,
                    "dropping edge with endpoint outside the view"
                );
                return None;
            };
            Some(route_edge(dep, predecessor, successor, scale, config))
        })
        .collect()
}

/// Route a single edge between two laid-out rows
pub fn route_edge(
    dep: &Dependency,
    predecessor: &LayoutRow,
    successor: &LayoutRow,
    scale: &TimeScale,
    config: &LayoutConfig,
) -> LayoutEdge {
    let (x1, anchor_x2) = anchor_x(dep.dep_type, predecessor, successor);
    let lag_px = scale.lag_to_px(dep.lag);
    let x2 = anchor_x2 + lag_px;
    let start = Point::new(x1, predecessor.center_y);
    let end = Point::new(x2, successor.center_y);

    let offset = ((x2 - x1).abs() / 2.0).max(config.min_control_offset);
    let control1 = Point::new(x1 + offset, start.y);
    let control2 = Point::new(x2 - offset, end.y);

    let path = format!(
        "M{},{} C{},{} {},{} {},{}",
        coord(start.x),
        coord(start.y),
        coord(control1.x),
        coord(control1.y),
        coord(control2.x),
        coord(control2.y),
        coord(end.x),
        coord(end.y)
    );

    let arrow = arrowhead(start, end, config.arrow_size);
    let arrow_points = arrow
        .iter()
        .map(|p| format!("{},{}", coord(p.x), coord(p.y)))
        .collect::<Vec<_>>()
        .join(" ");

    LayoutEdge {
        from: dep.from,
        to: dep.to,
        kind: dep.dep_type,
        lag: dep.lag,
        lag_px,
        start,
        end,
        control1,
        control2,
        path,
        arrow,
        arrow_points,
        emphasis: EdgeEmphasis::between(predecessor.is_critical(), successor.is_critical()),
    }
}

/// Chevron at `tip`, oriented along the straight line from `from`
fn arrowhead(from: Point, tip: Point, size: f64) -> [Point; 3] {
    let angle = (tip.y - from.y).atan2(tip.x - from.x);
    let left = Point::new(
        tip.x - size * (angle - FRAC_PI_6).cos(),
        tip.y - size * (angle - FRAC_PI_6).sin(),
    );
    let right = Point::new(
        tip.x - size * (angle + FRAC_PI_6).cos(),
        tip.y - size * (angle + FRAC_PI_6).sin(),
    );
    [left, tip, right]
}

/// Coordinates rounded to 0.01px so identical input yields identical strings
pub(crate) fn coord(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    if rounded == 0.0 {
        "0".to_string()
    } else {
        rounded.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rows::layout_rows;
    use crate::schedule::ResolvedTask;
    use chrono::NaiveDate;
    use ganttline_core::{CpmFact, DateRange, Task, ZoomLevel};
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, day).unwrap()
    }

    fn fixture(critical_b: bool) -> (RowLayout, TimeScale, LayoutConfig) {
        let config = LayoutConfig::default();
        let range = DateRange::new(date(1), NaiveDate::from_ymd_opt(2025, 3, 31).unwrap());
        let scale = TimeScale::new(range, ZoomLevel::Week, &config);

        let mut fact_b = CpmFact::new(2, 5, 4);
        fact_b.is_critical = critical_b;
        let a = ResolvedTask {
            task: Task::new(1, "A"),
            cpm: CpmFact::new(1, 0, 5).critical(),
            start: date(1),
            end: date(5),
        };
        let b = ResolvedTask {
            task: Task::new(2, "B"),
            cpm: fact_b,
            start: date(6),
            end: date(9),
        };
        let rows = layout_rows(&[&a, &b], &HashMap::new(), &scale, &config);
        (rows, scale, config)
    }

    #[test]
    fn anchors_per_relationship_kind() {
        let (rows, _, _) = fixture(true);
        let a = &rows.rows[0];
        let b = &rows.rows[1];

        assert_eq!(anchor_x(DependencyType::FinishToStart, a, b), (60.0, 60.0));
        assert_eq!(anchor_x(DependencyType::StartToStart, a, b), (0.0, 60.0));
        assert_eq!(anchor_x(DependencyType::FinishToFinish, a, b), (60.0, 108.0));
        assert_eq!(anchor_x(DependencyType::StartToFinish, a, b), (0.0, 108.0));
    }

    #[test]
    fn finish_to_start_curve_geometry() {
        let (rows, scale, config) = fixture(true);
        let edges = route_edges(&[Dependency::new(1, 2)], &rows, &scale, &config);
        let edge = &edges[0];

        assert_eq!(edge.start, Point::new(60.0, 16.0));
        assert_eq!(edge.end, Point::new(60.0, 56.0));
        assert_eq!(edge.control1, Point::new(76.0, 16.0));
        assert_eq!(edge.control2, Point::new(44.0, 56.0));
        assert_eq!(edge.path, "M60,16 C76,16 44,56 60,56");
        assert_eq!(edge.arrow[1], edge.end);
        assert_eq!(edge.emphasis, EdgeEmphasis::Critical);
    }

    #[test]
    fn wide_edges_use_half_span_offset() {
        let (rows, scale, config) = fixture(true);
        let dep = Dependency::new(1, 2).kind(DependencyType::StartToFinish);
        let edge = route_edge(&dep, &rows.rows[0], &rows.rows[1], &scale, &config);
        assert_eq!(edge.control1.x, 54.0);
        assert_eq!(edge.control2.x, 54.0);
    }

    #[test]
    fn lag_shifts_arrival_point() {
        let (rows, scale, config) = fixture(true);
        let plain = route_edge(
            &Dependency::new(1, 2),
            &rows.rows[0],
            &rows.rows[1],
            &scale,
            &config,
        );
        let lagged = route_edge(
            &Dependency::new(1, 2).lag(2),
            &rows.rows[0],
            &rows.rows[1],
            &scale,
            &config,
        );
        let lead = route_edge(
            &Dependency::new(1, 2).lag(-1),
            &rows.rows[0],
            &rows.rows[1],
            &scale,
            &config,
        );

        assert_eq!(lagged.end.x - plain.end.x, 24.0);
        assert_eq!(lead.end.x - plain.end.x, -12.0);
        assert_eq!(lagged.start, plain.start);
    }

    #[test]
    fn one_critical_endpoint_is_not_enough() {
        let (rows, scale, config) = fixture(false);
        let edges = route_edges(&[Dependency::new(1, 2)], &rows, &scale, &config);
        assert_eq!(edges[0].emphasis, EdgeEmphasis::Normal);
        assert_eq!(EdgeEmphasis::between(false, true), EdgeEmphasis::Normal);
        assert_eq!(EdgeEmphasis::between(false, false), EdgeEmphasis::Normal);
    }

    #[test]
    fn dangling_edges_are_dropped() {
        let (rows, scale, config) = fixture(true);
        let deps = [Dependency::new(1, 99), Dependency::new(42, 2), Dependency::new(2, 1)];
        let edges = route_edges(&deps, &rows, &scale, &config);
        assert_eq!(edges.len(), 1);
        assert_eq!((edges[0].from, edges[0].to), (2, 1));
    }

    #[test]
    fn chevron_straddles_the_approach_line() {
        let tip = Point::new(100.0, 0.0);
        let [left, apex, right] = arrowhead(Point::new(0.0, 0.0), tip, 6.0);
        assert_eq!(apex, tip);
        assert!(left.x < tip.x && right.x < tip.x);
        assert!((left.y + right.y).abs() < 1e-9);
        assert!((left.y.abs() - 3.0).abs() < 1e-9);
    }

    #[test]
    fn coordinates_format_compactly() {
        assert_eq!(coord(60.0), "60");
        assert_eq!(coord(155.5555), "155.56");
        assert_eq!(coord(-0.001), "0");
        assert_eq!(coord(-12.5), "-12.5");
    }
}
