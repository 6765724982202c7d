//! SVG Gantt chart adapter
//!
//! Draws the geometry produced by `ganttline-layout` without recomputing any of it:
//! - Ruler band with date labels on labeled grid lines
//! - Day grid with heavier week/month boundaries
//! - Task bars with critical path highlighting and hover tooltips
//! - Dependency curves with chevron arrowheads, colored by emphasis
//! - Explicit empty state when no task matches the filters

use ganttline_core::ZoomLevel;
use ganttline_layout::{EdgeEmphasis, GridLine, LayoutEdge, LayoutRow, TimelineLayout};
use svg::node::element::{Group, Line, Path, Polyline, Rectangle, Text};
use svg::node::Blob;
use svg::Document;

use crate::{RenderError, Renderer};

/// Color theme for the Gantt chart
#[derive(Clone, Debug, PartialEq)]
pub struct GanttTheme {
    pub critical_color: String,
    pub normal_color: String,
    pub background_color: String,
    pub grid_color: String,
    pub grid_major_color: String,
    pub text_color: String,
    pub muted_text_color: String,
    pub header_bg: String,
    pub arrow_color: String,
    pub critical_arrow_color: String,
}

impl Default for GanttTheme {
    fn default() -> Self {
        Self::light()
    }
}

impl GanttTheme {
    pub fn light() -> Self {
        Self {
            critical_color: "#e74c3c".into(),
            normal_color: "#3498db".into(),
            background_color: "#ffffff".into(),
            grid_color: "#ecf0f1".into(),
            grid_major_color: "#bdc3c7".into(),
            text_color: "#2c3e50".into(),
            muted_text_color: "#9ca3af".into(),
            header_bg: "#f8f9fa".into(),
            arrow_color: "#7f8c8d".into(),
            critical_arrow_color: "#c0392b".into(),
        }
    }

    pub fn dark() -> Self {
        Self {
            critical_color: "#e74c3c".into(),
            normal_color: "#3498db".into(),
            background_color: "#1a1a2e".into(),
            grid_color: "#2d2d44".into(),
            grid_major_color: "#4a4a6a".into(),
            text_color: "#eaeaea".into(),
            muted_text_color: "#6b7280".into(),
            header_bg: "#16213e".into(),
            arrow_color: "#95a5a6".into(),
            critical_arrow_color: "#ff6b5b".into(),
        }
    }

    /// Look up a theme by name (`light` or `dark`)
    pub fn named(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "light" => Some(Self::light()),
            "dark" => Some(Self::dark()),
            _ => None,
        }
    }

    fn edge_color(&self, emphasis: EdgeEmphasis) -> &str {
        match emphasis {
            EdgeEmphasis::Critical => &self.critical_arrow_color,
            EdgeEmphasis::Normal => &self.arrow_color,
        }
    }
}

/// SVG Gantt chart renderer configuration
#[derive(Clone, Debug)]
pub struct SvgRenderer {
    /// Width of the task label column in pixels
    pub label_width: u32,
    /// Padding around the chart
    pub padding: u32,
    /// Fraction of the row height covered by a bar
    pub bar_fill: f64,
    pub theme: GanttTheme,
    /// Show dependency arrows
    pub show_dependencies: bool,
    /// Highlight critical path tasks (default: true)
    pub highlight_critical: bool,
    /// Font family
    pub font_family: String,
    /// Font size in pixels
    pub font_size: u32,
}

impl Default for SvgRenderer {
    fn default() -> Self {
        Self {
            label_width: 220,
            padding: 20,
            bar_fill: 0.7,
            theme: GanttTheme::default(),
            show_dependencies: true,
            highlight_critical: true,
            font_family: "system-ui, -apple-system, sans-serif".into(),
            font_size: 12,
        }
    }
}

impl SvgRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use dark theme
    pub fn dark_theme(mut self) -> Self {
        self.theme = GanttTheme::dark();
        self
    }

    /// Use a specific theme
    pub fn theme(mut self, theme: GanttTheme) -> Self {
        self.theme = theme;
        self
    }

    /// Configure label column width
    pub fn label_width(mut self, width: u32) -> Self {
        self.label_width = width;
        self
    }

    /// Disable dependency arrows
    pub fn hide_dependencies(mut self) -> Self {
        self.show_dependencies = false;
        self
    }

    /// Disable critical path highlighting (all bars use normal color)
    pub fn hide_critical_path(mut self) -> Self {
        self.highlight_critical = false;
        self
    }

    /// Left edge of the time axis
    fn chart_x(&self) -> f64 {
        f64::from(self.padding + self.label_width)
    }

    /// Top of row 0
    fn rows_y(&self, timeline: &TimelineLayout) -> f64 {
        f64::from(self.padding) + timeline.header_height
    }

    fn total_width(&self, timeline: &TimelineLayout) -> f64 {
        f64::from(self.padding * 2 + self.label_width) + timeline.content_width
    }

    fn total_height(&self, timeline: &TimelineLayout) -> f64 {
        f64::from(self.padding * 2) + timeline.content_height
    }

    /// Render the ruler band and its date labels
    fn render_header(&self, timeline: &TimelineLayout) -> Group {
        let mut group = Group::new().set("class", "header");
        let padding = f64::from(self.padding);

        let band = Rectangle::new()
            .set("x", padding)
            .set("y", padding)
            .set("width", f64::from(self.label_width) + timeline.content_width)
            .set("height", timeline.header_height)
            .set("fill", self.theme.header_bg.as_str());
        group = group.add(band);

        let baseline = padding + timeline.header_height - 10.0;
        for line in timeline
            .grid_lines
            .iter()
            .filter(|line| line.is_labeled(timeline.zoom))
        {
            let text = Text::new(ruler_label(line, timeline.zoom))
                .set("x", self.chart_x() + line.x + 2.0)
                .set("y", baseline)
                .set("font-family", self.font_family.as_str())
                .set("font-size", self.font_size.saturating_sub(1))
                .set("fill", self.theme.text_color.as_str());
            group = group.add(text);
        }

        let title = Text::new(timeline.date_range.start.format("%B %Y").to_string())
            .set("x", padding + 8.0)
            .set("y", padding + 20.0)
            .set("font-family", self.font_family.as_str())
            .set("font-size", self.font_size.saturating_add(2))
            .set("font-weight", "bold")
            .set("fill", self.theme.text_color.as_str());
        group.add(title)
    }

    /// Render vertical day lines across header and rows
    fn render_grid(&self, timeline: &TimelineLayout) -> Group {
        let mut group = Group::new().set("class", "grid");
        let top = f64::from(self.padding);
        let bottom = top + timeline.content_height;

        for line in &timeline.grid_lines {
            let (color, width) = if line.is_major {
                (self.theme.grid_major_color.as_str(), 1.5)
            } else {
                (self.theme.grid_color.as_str(), 1.0)
            };
            let x = self.chart_x() + line.x;
            group = group.add(
                Line::new()
                    .set("x1", x)
                    .set("y1", top)
                    .set("x2", x)
                    .set("y2", bottom)
                    .set("stroke", color)
                    .set("stroke-width", width),
            );
        }

        group
    }

    /// Render a single task row: label plus bar
    fn render_row(&self, row: &LayoutRow, timeline: &TimelineLayout) -> Group {
        let mut group = Group::new()
            .set("class", "task")
            .set("data-task", row.task.id.to_string());
        let rows_y = self.rows_y(timeline);

        // ~7px per char at 12px font
        let max_chars = (self.label_width.saturating_sub(16) / 7) as usize;
        let label = Text::new(truncate(&row.task.title, max_chars.max(10)))
            .set("x", self.padding + 8)
            .set("y", rows_y + row.center_y + 4.0)
            .set("font-family", self.font_family.as_str())
            .set("font-size", self.font_size)
            .set("fill", self.theme.text_color.as_str());
        group = group.add(label);

        let bar_height = timeline.row_height * self.bar_fill;
        let color = if self.highlight_critical && row.is_critical() {
            self.theme.critical_color.as_str()
        } else {
            self.theme.normal_color.as_str()
        };
        let class = if row.is_critical() {
            "task-bar critical"
        } else {
            "task-bar"
        };

        let bar = Rectangle::new()
            .set("x", self.chart_x() + row.left_px)
            .set("y", rows_y + row.center_y - bar_height / 2.0)
            .set("width", row.width_px)
            .set("height", bar_height)
            .set("rx", 3)
            .set("ry", 3)
            .set("fill", color)
            .set("class", class);
        group = group.add(bar);

        group.add(Blob::new(format!(
            "<title>{}</title>",
            xml_escape(&row.tooltip)
        )))
    }

    /// Render a dependency curve and its arrowhead
    fn render_edge(&self, edge: &LayoutEdge, timeline: &TimelineLayout) -> Group {
        let color = self.theme.edge_color(edge.emphasis);
        let transform = format!("translate({},{})", self.chart_x(), self.rows_y(timeline));

        let curve = Path::new()
            .set("d", edge.path.as_str())
            .set("fill", "none")
            .set("stroke", color)
            .set("stroke-width", 1.5);
        let chevron = Polyline::new()
            .set("points", edge.arrow_points.as_str())
            .set("fill", "none")
            .set("stroke", color)
            .set("stroke-width", 1.5);

        Group::new()
            .set("class", format!("dep-arrow {}", edge.emphasis.token()))
            .set("data-from", edge.from.to_string())
            .set("data-to", edge.to.to_string())
            .set("transform", transform)
            .add(curve)
            .add(chevron)
    }

    fn render_empty_state(&self, message: &str, timeline: &TimelineLayout) -> Text {
        Text::new(message)
            .set("x", self.chart_x() + timeline.content_width / 2.0)
            .set("y", self.rows_y(timeline) + 24.0)
            .set("font-family", self.font_family.as_str())
            .set("font-size", self.font_size.saturating_add(1))
            .set("fill", self.theme.muted_text_color.as_str())
            .set("text-anchor", "middle")
            .set("class", "empty-state")
    }
}

impl Renderer for SvgRenderer {
    type Output = String;

    fn render(&self, timeline: &TimelineLayout) -> Result<String, RenderError> {
        if !timeline.content_width.is_finite() || timeline.content_width <= 0.0 {
            return Err(RenderError::InvalidData(format!(
                "Canvas width must be positive, got {}",
                timeline.content_width
            )));
        }

        let width = self.total_width(timeline);
        let height = self.total_height(timeline);

        let mut document = Document::new()
            .set("width", width)
            .set("height", height)
            .set("viewBox", (0.0, 0.0, width, height))
            .set("xmlns", "http://www.w3.org/2000/svg");

        let background = Rectangle::new()
            .set("width", "100%")
            .set("height", "100%")
            .set("fill", self.theme.background_color.as_str());
        document = document.add(background);

        document = document.add(self.render_header(timeline));
        document = document.add(self.render_grid(timeline));

        if let Some(message) = timeline.empty_message() {
            document = document.add(self.render_empty_state(message, timeline));
        }

        let mut bars = Group::new().set("class", "rows");
        for row in &timeline.rows {
            bars = bars.add(self.render_row(row, timeline));
        }
        document = document.add(bars);

        if self.show_dependencies {
            let mut edges = Group::new().set("class", "dependencies");
            for edge in &timeline.edges {
                edges = edges.add(self.render_edge(edge, timeline));
            }
            document = document.add(edges);
        }

        let mut output = Vec::new();
        svg::write(&mut output, &document)
            .map_err(|e| RenderError::Format(format!("Failed to write SVG: {}", e)))?;

        String::from_utf8(output).map_err(|e| RenderError::Format(format!("Invalid UTF-8: {}", e)))
    }
}

fn ruler_label(line: &GridLine, zoom: ZoomLevel) -> String {
    match zoom {
        ZoomLevel::Day => line.date.format("%d").to_string(),
        ZoomLevel::Week | ZoomLevel::Month => line.date.format("%b %d").to_string(),
    }
}

/// Escape text placed inside raw markup
fn xml_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Truncate a string to a maximum number of characters with ellipsis
fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use ganttline_core::{CpmFact, DateRange, Dependency, StatusFilter, Task, TaskStatus};
    use ganttline_layout::{layout, LayoutRequest};

    fn request() -> LayoutRequest {
        let start = NaiveDate::from_ymd_opt(2025, 1, 6).unwrap();
        LayoutRequest::new(
            vec![
                Task::new(1, "Design & <review>"),
                Task::new(2, "Build").status(TaskStatus::InProgress),
            ],
            vec![Dependency::new(1, 2)],
            vec![
                CpmFact::new(1, 0, 5).critical(),
                CpmFact::new(2, 5, 4).critical(),
            ],
        )
        .date_range(DateRange::new(start, NaiveDate::from_ymd_opt(2025, 3, 31).unwrap()))
    }

    #[test]
    fn svg_renderer_defaults() {
        let renderer = SvgRenderer::new();
        assert_eq!(renderer.label_width, 220);
        assert!(renderer.show_dependencies);
        assert!(renderer.highlight_critical);
    }

    #[test]
    fn dark_theme_swaps_background() {
        let renderer = SvgRenderer::new().dark_theme();
        assert_eq!(renderer.theme.background_color, "#1a1a2e");
        assert_eq!(GanttTheme::named("Dark"), Some(GanttTheme::dark()));
        assert_eq!(GanttTheme::named("sepia"), None);
    }

    #[test]
    fn svg_contains_bars_edges_and_tooltips() {
        let svg = SvgRenderer::new().render(&layout(&request())).unwrap();

        assert!(svg.starts_with("<svg"));
        assert!(svg.contains("</svg>"));
        assert!(svg.contains("task-bar critical"));
        assert!(svg.contains("dep-arrow critical"));
        assert!(svg.contains("M60,16 C76,16 44,56 60,56"));
        assert!(svg.contains("<title>Design &amp; &lt;review&gt;"));
        assert!(svg.contains("Predecessors: Design &amp; &lt;review&gt; (FS)"));
        assert!(!svg.contains("empty-state"));
    }

    #[test]
    fn hidden_dependencies_and_critical_path() {
        let svg = SvgRenderer::new()
            .hide_dependencies()
            .hide_critical_path()
            .render(&layout(&request()))
            .unwrap();
        assert!(!svg.contains("dep-arrow"));
        assert!(!svg.contains("#e74c3c"));
    }

    #[test]
    fn empty_view_renders_message() {
        let timeline = layout(&request().status(StatusFilter::Only(TaskStatus::Cancelled)));
        let svg = SvgRenderer::new().render(&timeline).unwrap();
        assert!(svg.contains("No tasks match the current filters"));
        assert!(svg.contains("empty-state"));
        assert!(!svg.contains("task-bar"));
    }

    #[test]
    fn font_size_extremes_render() {
        let timeline = layout(&request());
        for font_size in [0, u32::MAX] {
            let renderer = SvgRenderer {
                font_size,
                ..SvgRenderer::new()
            };
            let svg = renderer.render(&timeline).unwrap();
            assert!(svg.contains("task-bar critical"));
        }
    }

    #[test]
    fn zero_width_canvas_is_rejected() {
        let mut timeline = layout(&request());
        timeline.content_width = 0.0;
        assert!(SvgRenderer::new().render(&timeline).is_err());
    }

    #[test]
    fn ruler_label_formats() {
        let line = GridLine {
            day_index: 0,
            date: NaiveDate::from_ymd_opt(2025, 3, 7).unwrap(),
            x: 0.0,
            is_major: true,
        };
        assert_eq!(ruler_label(&line, ZoomLevel::Day), "07");
        assert_eq!(ruler_label(&line, ZoomLevel::Week), "Mar 07");
    }

    #[test]
    fn truncate_works() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a much longer title", 10), "a much ...");
    }
}
