//! CLI logic for the wirenet layout tool.
//!
//! `wirenet layout` reads a network document and writes computed positions
//! with their conflict report. `wirenet check` only measures the positions a
//! document already carries.

pub mod document;
pub mod error;

mod args;
mod config;

pub use args::{Args, CheckArgs, Command, LayoutArgs, LayoutOverrides};
pub use error::CliError;

use std::{
    fs,
    io::{self, Write},
};

use log::{info, warn};

use wirenet::{ConflictRank, LayoutBuilder, LayoutEngine, config::LayoutOptions, geometry::Size};

use document::{LayoutDocument, NetworkDocument};

/// Run the wirenet CLI application
///
/// # Errors
///
/// Returns `CliError` for:
/// - File I/O errors
/// - Configuration or input parsing errors
/// - Invalid layout options
/// - Unplaced nodes or remaining conflicts in `check --strict`
pub fn run(args: &Args) -> Result<(), CliError> {
    let app_config = config::load_config(args.config.as_ref())?;
    let options = app_config.layout().to_options();

    match &args.command {
        Command::Layout(layout_args) => run_layout(layout_args, options),
        Command::Check(check_args) => run_check(check_args, options),
    }
}

fn run_layout(args: &LayoutArgs, options: LayoutOptions) -> Result<(), CliError> {
    info!(
        input_path = args.input,
        refine = args.refine;
        "Processing network"
    );

    let engine = build_engine(options, &args.overrides)?;
    let document = read_document(&args.input)?;
    let network = document.network();

    let positions = if args.refine {
        if !document.has_positions() {
            return Err(CliError::MissingPositions {
                path: args.input.clone(),
                action: "refine",
            });
        }
        engine.refine(&network, &document.positions())
    } else {
        engine.layout(&network)
    };

    let report = engine.check(&network, &positions);
    log_report(&report);

    let output = toml::to_string(&LayoutDocument::new(&positions, report))?;
    match &args.output {
        Some(path) => {
            fs::write(path, output)?;
            info!(output_file = path; "Positions exported successfully");
        }
        None => io::stdout().write_all(output.as_bytes())?,
    }

    Ok(())
}

fn run_check(args: &CheckArgs, options: LayoutOptions) -> Result<(), CliError> {
    info!(input_path = args.input, strict = args.strict; "Checking placement");

    let engine = build_engine(options, &LayoutOverrides::default())?;
    let document = read_document(&args.input)?;
    if !document.has_positions() {
        return Err(CliError::MissingPositions {
            path: args.input.clone(),
            action: "check",
        });
    }

    let network = document.network();
    let positions = document.positions();
    network.ensure_placed(&positions)?;

    let report = engine.check(&network, &positions);
    log_report(&report);
    io::stdout().write_all(toml::to_string(&report)?.as_bytes())?;

    if args.strict && !report.is_clean() {
        return Err(CliError::UnresolvedConflicts {
            count: report.crossings() + report.node_overlaps() + report.clearance_violations(),
        });
    }

    Ok(())
}

/// Applies command-line overrides on top of the configured options.
fn build_engine(
    options: LayoutOptions,
    overrides: &LayoutOverrides,
) -> Result<LayoutEngine, CliError> {
    let viewport = options.viewport();
    let mut builder = LayoutBuilder::new(options).with_viewport(Size::new(
        overrides.width.unwrap_or(viewport.width()),
        overrides.height.unwrap_or(viewport.height()),
    ));
    if overrides.snap {
        builder = builder.with_snap_to_grid(true);
    }
    if let Some(grid_step) = overrides.grid_step {
        builder = builder.with_grid_step(grid_step);
    }

    Ok(builder.build()?)
}

fn read_document(path: &str) -> Result<NetworkDocument, CliError> {
    let source = fs::read_to_string(path)?;
    toml::from_str(&source).map_err(|err| CliError::parse(path, source.as_str(), &err))
}

fn log_report(report: &ConflictRank) {
    if report.is_clean() {
        info!(score = report.score(); "Placement has no visual conflicts");
    } else {
        warn!(
            crossings = report.crossings(),
            node_overlaps = report.node_overlaps(),
            clearance_violations = report.clearance_violations(),
            score = report.score();
            "Placement has visual conflicts"
        );
    }
}
