//! Command-line argument definitions for the wirenet CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Global arguments select the configuration file and logging
//! verbosity; each [`Command`] carries its own input and layout overrides.

use clap::{Parser, Subcommand};

/// Command-line arguments for the wirenet layout tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Path to configuration file (TOML)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info", global = true)]
    pub log_level: String,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compute node positions for a network file
    Layout(LayoutArgs),

    /// Count visual conflicts of the positions stored in a network file
    Check(CheckArgs),
}

/// Arguments of the `layout` subcommand
#[derive(clap::Args, Debug)]
pub struct LayoutArgs {
    /// Path to the input network file (TOML)
    #[arg(help = "Path to the input file")]
    pub input: String,

    /// Path to the output file; printed to stdout when omitted
    #[arg(short, long)]
    pub output: Option<String>,

    /// Refine the positions stored in the input instead of computing new ones
    #[arg(long)]
    pub refine: bool,

    #[command(flatten)]
    pub overrides: LayoutOverrides,
}

/// Arguments of the `check` subcommand
#[derive(clap::Args, Debug)]
pub struct CheckArgs {
    /// Path to the input network file (TOML) with a `positions` table
    #[arg(help = "Path to the input file")]
    pub input: String,

    /// Fail when any conflict remains
    #[arg(long)]
    pub strict: bool,
}

/// Layout settings that take precedence over the configuration file
#[derive(clap::Args, Debug, Default)]
pub struct LayoutOverrides {
    /// Snap node positions to the grid
    #[arg(long)]
    pub snap: bool,

    /// Grid spacing used when snapping
    #[arg(long)]
    pub grid_step: Option<f64>,

    /// Viewport width
    #[arg(long)]
    pub width: Option<f64>,

    /// Viewport height
    #[arg(long)]
    pub height: Option<f64>,
}
