//! # ganttline-render
//!
//! Drawing adapters for ganttline timeline geometry.
//!
//! The layout engine emits renderer-agnostic geometry; this crate turns it into concrete
//! output:
//! - SVG Gantt chart with ruler, bars, routed dependency arrows and tooltips
//! - JSON geometry for web or GPU front-ends
//!
//! ## Example
//!
//! ```rust,ignore
//! use ganttline_layout::{layout, LayoutRequest};
//! use ganttline_render::{JsonRenderer, Renderer, SvgRenderer};
//!
//! let timeline = layout(&request);
//!
//! // Standalone SVG document
//! let svg = SvgRenderer::new().dark_theme().render(&timeline)?;
//!
//! // Geometry as JSON
//! let json = JsonRenderer::pretty().render(&timeline)?;
//! ```

pub mod gantt;
pub mod json;

pub use gantt::{GanttTheme, SvgRenderer};
pub use json::JsonRenderer;

pub use ganttline_core::RenderError;
use ganttline_layout::TimelineLayout;

/// Output rendering
pub trait Renderer {
    type Output;

    /// Render laid-out timeline geometry to the output format
    fn render(&self, timeline: &TimelineLayout) -> Result<Self::Output, RenderError>;
}
