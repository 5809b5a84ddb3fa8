//! flowpack CLI - measure and lay out item scenes.

#![allow(
    clippy::needless_pass_by_value,
    clippy::uninlined_format_args,
    clippy::unwrap_used,
    clippy::missing_errors_doc,
    clippy::must_use_candidate,
    clippy::cast_precision_loss
)]

mod scene;

use clap::{Parser, Subcommand, ValueEnum};
use flowpack_core::Rect;
use flowpack_layout::FillMode;
use scene::{run_layout, CliError, LayoutReport, Scene};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "flowpack")]
#[command(about = "Pack items into width-adaptive columns")]
#[command(version)]
struct Cli {
    /// Override the scene's fill mode (column_wise, row_wise)
    #[arg(long, global = true)]
    fill_mode: Option<String>,

    /// Log search details to stderr (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Position every item for one width
    Layout {
        /// Path to scene file
        scene: PathBuf,

        /// Allocated width
        #[arg(short, long)]
        width: f32,

        /// Left edge of the target area
        #[arg(long, default_value = "0")]
        x: f32,

        /// Top edge of the target area
        #[arg(long, default_value = "0")]
        y: f32,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: Format,
    },

    /// Report the height needed at each width
    Measure {
        /// Path to scene file
        scene: PathBuf,

        /// Widths to measure, comma separated
        #[arg(short, long, value_delimiter = ',', required = true)]
        widths: Vec<f32>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: Format,
    },

    /// Validate a scene file
    Check {
        /// Path to scene file
        scene: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Serialize)]
struct Measurement {
    width: f32,
    height: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    columns: Option<usize>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Install a stderr subscriber; `RUST_LOG` wins over `-v`.
fn init_tracing(verbose: u8) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let default = match verbose {
        0 => "warn",
        1 => "flowpack_layout=debug",
        _ => "flowpack_layout=trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
        .with(filter)
        .init();
}

fn load_scene(path: &Path, fill_mode: Option<&str>) -> Result<Scene, CliError> {
    let mut scene = Scene::load(path)?;
    if let Some(mode) = fill_mode {
        scene.layout.fill_mode = mode.parse::<FillMode>()?;
    }
    tracing::debug!(
        path = %path.display(),
        items = scene.items.len(),
        fill_mode = %scene.layout.fill_mode,
        "loaded scene"
    );
    Ok(scene)
}

fn run(cli: Cli) -> Result<(), CliError> {
    let fill_mode = cli.fill_mode.as_deref();
    match cli.command {
        Commands::Layout {
            scene,
            width,
            x,
            y,
            format,
        } => {
            let mut layout = load_scene(&scene, fill_mode)?.into_layout()?;
            let report = run_layout(&mut layout, Rect::new(x, y, width, 0.0));
            match format {
                Format::Text => print_layout(&report),
                Format::Json => println!("{}", serde_json::to_string_pretty(&report)?),
            }
        }
        Commands::Measure {
            scene,
            widths,
            format,
        } => {
            let mut layout = load_scene(&scene, fill_mode)?.into_layout()?;
            let results: Vec<Measurement> = widths
                .into_iter()
                .map(|width| Measurement {
                    width,
                    height: layout.measure(width),
                    columns: layout.partition(width).map(|p| p.column_count()),
                })
                .collect();
            match format {
                Format::Text => {
                    for m in &results {
                        match m.columns {
                            Some(columns) => println!(
                                "width {:>8.1}  height {:>8.1}  columns {}",
                                m.width, m.height, columns
                            ),
                            None => println!("width {:>8.1}  height {:>8.1}", m.width, m.height),
                        }
                    }
                }
                Format::Json => println!("{}", serde_json::to_string_pretty(&results)?),
            }
        }
        Commands::Check { scene } => {
            let loaded = load_scene(&scene, fill_mode)?;
            if loaded.items.is_empty() {
                return Err(CliError::EmptyScene);
            }
            let mode = loaded.layout.fill_mode;
            let layout = loaded.into_layout()?;
            let min = layout.minimum_size();
            println!("✓ {} is valid", scene.display());
            println!("  items:        {}", layout.count());
            println!("  fill mode:    {}", mode);
            println!("  minimum size: {} x {}", min.width, min.height);
        }
    }
    Ok(())
}

fn print_layout(report: &LayoutReport) {
    match report.columns {
        Some(columns) => println!(
            "height {} at width {} ({} columns)",
            report.height, report.area.width, columns
        ),
        None => println!("height {} at width {}", report.height, report.area.width),
    }
    for item in &report.items {
        let label = item.label.as_deref().unwrap_or("-");
        println!(
            "{:>4} {:<16} x {:>8.1}  y {:>8.1}  w {:>7.1}  h {:>7.1}",
            item.index, label, item.rect.x, item.rect.y, item.rect.width, item.rect.height
        );
    }
}
