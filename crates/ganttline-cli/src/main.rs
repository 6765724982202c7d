//! ganttline CLI - Timeline Layout Engine
//!
//! Command-line interface for laying out and rendering project timelines.

mod config;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use ganttline_core::{PhaseFilter, StatusFilter, TimelineItem, TimelineResponse, ZoomLevel};
use ganttline_layout::{distinct_phase_ids, LayoutEngine, LayoutRequest, TimelineLayout};
use ganttline_render::{JsonRenderer, Renderer};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::CliConfig;

#[derive(Parser)]
#[command(name = "ganttline")]
#[command(author, version, about = "Project timeline layout engine", long_about = None)]
struct Cli {
    /// Verbose output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// TOML file with [layout] and [render] tables
    #[arg(long, value_name = "FILE", global = true, env = "GANTTLINE_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Emit timeline geometry as JSON
    Layout {
        /// Timeline payload (JSON)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        #[command(flatten)]
        view: ViewArgs,

        /// Indent the JSON output
        #[arg(long)]
        pretty: bool,

        /// Output file (stdout if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Render an SVG Gantt chart
    Render {
        /// Timeline payload (JSON)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        #[command(flatten)]
        view: ViewArgs,

        /// Color theme (light, dark); overrides the config file
        #[arg(long)]
        theme: Option<String>,

        /// Draw every bar in the normal color
        #[arg(long)]
        no_critical: bool,

        /// Omit dependency arrows
        #[arg(long)]
        hide_dependencies: bool,

        /// Output file (stdout if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List the phase ids available to --phase
    Phases {
        /// Timeline payload (JSON)
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}

/// Zoom and filter flags shared by layout and render
#[derive(Args)]
struct ViewArgs {
    /// Zoom level (day, week, month)
    #[arg(short, long, default_value = "week")]
    zoom: ZoomLevel,

    /// Only tasks with this status (or "all")
    #[arg(short, long, default_value = "all")]
    status: StatusFilter,

    /// Only tasks in this phase id (or "all")
    #[arg(short, long, default_value = "all")]
    phase: PhaseFilter,
}

impl ViewArgs {
    fn request(&self, response: &TimelineResponse) -> LayoutRequest {
        LayoutRequest::from_response(response)
            .zoom(self.zoom)
            .status(self.status)
            .phase(self.phase)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = CliConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Layout {
            file,
            view,
            pretty,
            output,
        } => {
            let timeline = run_layout(&file, &view, &config)?;
            let renderer = JsonRenderer { pretty };
            let json = renderer
                .render(&timeline)
                .context("Failed to serialize layout")?;
            emit(&json, output.as_deref())?;
        }
        Commands::Render {
            file,
            view,
            theme,
            no_critical,
            hide_dependencies,
            output,
        } => {
            let mut settings = config.render.clone();
            if let Some(theme) = theme {
                settings.theme = theme;
            }
            if no_critical {
                settings.highlight_critical = false;
            }
            if hide_dependencies {
                settings.show_dependencies = false;
            }

            let timeline = run_layout(&file, &view, &config)?;
            let svg = settings
                .renderer()?
                .render(&timeline)
                .context("Failed to render SVG")?;
            emit(&svg, output.as_deref())?;
        }
        Commands::Phases { file } => {
            let response = read_response(&file)?;
            print!("{}", phase_listing(&response));
        }
    }

    Ok(())
}

/// Logs go to stderr; `RUST_LOG` wins over `-v`
fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn read_response(path: &Path) -> Result<TimelineResponse> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read timeline file: {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("Invalid timeline payload: {}", path.display()))
}

fn run_layout(path: &Path, view: &ViewArgs, config: &CliConfig) -> Result<TimelineLayout> {
    let response = read_response(path)?;
    let request = view.request(&response);
    let timeline = LayoutEngine::with_config(config.layout.clone()).layout(&request);

    info!(
        rows = timeline.rows.len(),
        edges = timeline.edges.len(),
        days = timeline.total_days,
        "laid out {}",
        path.display()
    );
    if let Some(message) = timeline.empty_message() {
        info!("{}", message);
    }
    Ok(timeline)
}

/// One line per phase id used by a task, with the phase name when the feed has one
fn phase_listing(response: &TimelineResponse) -> String {
    let names: HashMap<_, _> = response
        .timeline
        .iter()
        .filter_map(|item| match item {
            TimelineItem::Phase(phase) => Some((phase.id, phase.name.as_str())),
            _ => None,
        })
        .collect();

    distinct_phase_ids(&response.tasks())
        .into_iter()
        .map(|id| match names.get(&id) {
            Some(name) => format!("{}\t{}\n", id, name),
            None => format!("{}\n", id),
        })
        .collect()
}

fn emit(contents: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, contents)
                .with_context(|| format!("Failed to write output: {}", path.display()))?;
            info!("wrote {}", path.display());
        }
        None => println!("{}", contents),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn cli_parses_view_flags() {
        let cli = Cli::try_parse_from([
            "ganttline", "layout", "plan.json", "--zoom", "day", "--status", "in_progress",
            "--phase", "3",
        ])
        .unwrap();

        let Commands::Layout { view, .. } = cli.command else {
            panic!("expected layout command");
        };
        assert_eq!(view.zoom, ZoomLevel::Day);
        assert_eq!(
            view.status,
            StatusFilter::Only(ganttline_core::TaskStatus::InProgress)
        );
        assert_eq!(view.phase, PhaseFilter::Only(3));
    }

    #[test]
    fn cli_rejects_unknown_zoom() {
        let args = ["ganttline", "layout", "plan.json", "--zoom", "year"];
        assert!(Cli::try_parse_from(args).is_err());
    }

    #[test]
    fn view_defaults_show_everything() {
        let cli = Cli::try_parse_from(["ganttline", "render", "plan.json"]).unwrap();
        let Commands::Render { view, .. } = cli.command else {
            panic!("expected render command");
        };
        assert_eq!(view.zoom, ZoomLevel::Week);
        assert_eq!(view.status, StatusFilter::All);
        assert_eq!(view.phase, PhaseFilter::All);
    }

    #[test]
    fn phase_listing_names_known_phases() {
        let response: TimelineResponse = serde_json::from_str(
            r#"{"timeline": [
                {"type": "phase", "id": 2, "name": "Build"},
                {"type": "task", "id": 1, "title": "a", "phase_id": 2},
                {"type": "task", "id": 2, "title": "b", "phase_id": 1},
                {"type": "task", "id": 3, "title": "c", "phase_id": 2},
                {"type": "task", "id": 4, "title": "d"}
            ]}"#,
        )
        .unwrap();
        assert_eq!(phase_listing(&response), "1\n2\tBuild\n");
    }
}
