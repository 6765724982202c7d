//! `--config` file handling
//!
//! A TOML file with optional `[layout]` and `[render]` tables:
//!
//! ```toml
//! [layout]
//! row_height = 28.0
//! week_px = 16.0
//!
//! [render]
//! theme = "dark"
//! label_width = 180
//! ```

use anyhow::{bail, Context, Result};
use ganttline_layout::LayoutConfig;
use ganttline_render::{GanttTheme, SvgRenderer};
use serde::Deserialize;
use std::path::Path;

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CliConfig {
    pub layout: LayoutConfig,
    pub render: RenderSettings,
}

/// SVG output options
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderSettings {
    pub theme: String,
    pub label_width: u32,
    pub highlight_critical: bool,
    pub show_dependencies: bool,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            theme: "light".into(),
            label_width: 220,
            highlight_critical: true,
            show_dependencies: true,
        }
    }
}

impl RenderSettings {
    /// Build the SVG renderer these settings describe
    pub fn renderer(&self) -> Result<SvgRenderer> {
        let Some(theme) = GanttTheme::named(&self.theme) else {
            bail!("Unknown theme '{}' (expected light or dark)", self.theme);
        };

        let mut renderer = SvgRenderer::new()
            .theme(theme)
            .label_width(self.label_width);
        if !self.highlight_critical {
            renderer = renderer.hide_critical_path();
        }
        if !self.show_dependencies {
            renderer = renderer.hide_dependencies();
        }
        Ok(renderer)
    }
}

impl CliConfig {
    /// Defaults when no file is given
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Self = toml::from_str(&text)
            .with_context(|| format!("Invalid config file: {}", path.display()))?;
        if let Err(err) = config.layout.validate() {
            bail!("Invalid config file: {}: {}", path.display(), err);
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn missing_path_gives_defaults() {
        let config = CliConfig::load(None).unwrap();
        assert_eq!(config, CliConfig::default());
        assert_eq!(config.layout.row_height, 32.0);
        assert_eq!(config.render.theme, "light");
    }

    #[test]
    fn partial_tables_keep_defaults() {
        let file = write_config(
            r#"
[layout]
row_height = 28.0
week_px = 16.0

[render]
theme = "dark"
"#,
        );
        let config = CliConfig::load(Some(file.path())).unwrap();

        assert_eq!(config.layout.row_height, 28.0);
        assert_eq!(config.layout.week_px, 16.0);
        assert_eq!(config.layout.row_gap, 8.0);
        assert_eq!(config.render.theme, "dark");
        assert_eq!(config.render.label_width, 220);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let file = write_config("[render]\ncolour = \"red\"\n");
        assert!(CliConfig::load(Some(file.path())).is_err());
    }

    #[test]
    fn misspelled_layout_key_is_rejected() {
        let file = write_config("[layout]\nweekpx = 16.0\n");
        assert!(CliConfig::load(Some(file.path())).is_err());
    }

    #[test]
    fn collapsed_layout_is_rejected() {
        let file = write_config("[layout]\nweek_px = 0.0\n");
        let err = CliConfig::load(Some(file.path())).unwrap_err();
        assert!(err.to_string().contains("week_px"));

        let file = write_config("[layout]\nmin_canvas_width = -5.0\n");
        assert!(CliConfig::load(Some(file.path())).is_err());
    }

    #[test]
    fn unreadable_file_names_the_path() {
        let err = CliConfig::load(Some(Path::new("/nonexistent/ganttline.toml"))).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/ganttline.toml"));
    }

    #[test]
    fn settings_build_renderer() {
        let settings = RenderSettings {
            theme: "dark".into(),
            label_width: 150,
            highlight_critical: false,
            show_dependencies: false,
        };
        let renderer = settings.renderer().unwrap();
        assert_eq!(renderer.label_width, 150);
        assert_eq!(renderer.theme, GanttTheme::dark());
        assert!(!renderer.highlight_critical);
        assert!(!renderer.show_dependencies);
    }

    #[test]
    fn unknown_theme_is_an_error() {
        let settings = RenderSettings {
            theme: "sepia".into(),
            ..RenderSettings::default()
        };
        assert!(settings.renderer().is_err());
    }
}
