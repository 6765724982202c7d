//! JSON geometry output

use ganttline_layout::TimelineLayout;

use crate::{RenderError, Renderer};

/// Serializes the full layout for drawing surfaces outside Rust
#[derive(Clone, Debug, Default)]
pub struct JsonRenderer {
    pub pretty: bool,
}

impl JsonRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Indented output
    pub fn pretty() -> Self {
        Self { pretty: true }
    }
}

impl Renderer for JsonRenderer {
    type Output = String;

    fn render(&self, timeline: &TimelineLayout) -> Result<String, RenderError> {
        let result = if self.pretty {
            serde_json::to_string_pretty(timeline)
        } else {
            serde_json::to_string(timeline)
        };
        result.map_err(|e| RenderError::Format(format!("Failed to serialize layout: {}", e)))
    }
}
