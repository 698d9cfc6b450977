//! CLI command definitions and handlers.

pub mod catalog;
pub mod classify;

use clap::{Parser, Subcommand};

/// Hairfit - Face-shape classification and hairstyle recommendation
#[derive(Parser)]
#[command(name = "hairfit")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Shared classify arguments (paths, calibration, output flags).
    #[command(flatten)]
    pub classify: classify::ClassifyArgs,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Classify face shapes from landmark documents
    Classify(classify::ClassifyArgs),
    /// List the hairstyle catalog
    Catalog(catalog::CatalogArgs),
}

/// Process exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Every input was classified.
    Success = 0,
    /// At least one input produced no face shape.
    Unclassified = 1,
    /// The command failed.
    Error = 2,
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> Self {
        Self::from(code as u8)
    }
}
