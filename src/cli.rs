//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::assign::Scope;
use crate::settings::check_length;

/// Top-level CLI parser for `uidgen`.
#[derive(Debug, Parser)]
#[command(
    name = "uidgen",
    version,
    about = "Assign sequential identifiers to the features of vector layers"
)]
pub struct Cli {
    /// Workspace directory holding `*.geojson` layers [env: `UIDGEN_WORKSPACE`].
    #[arg(long, short = 'w', global = true)]
    pub workspace: Option<PathBuf>,
    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Write identifiers into the selected layers.
    Assign(AssignArgs),
    /// List the layers in the workspace.
    Layers,
}

/// Options for `uidgen assign`. Omitted options come from `uidgen.yaml`
/// or the built-in defaults.
#[derive(Debug, Default, Args)]
pub struct AssignArgs {
    /// Field that receives the identifiers [default: BSM].
    #[arg(long, short = 'f')]
    pub field: Option<String>,
    /// Fixed identifier prefix [default: 130129].
    #[arg(long, short = 'p')]
    pub prefix: Option<String>,
    /// Total identifier length, 10 to 30 [default: 18].
    #[arg(long, short = 'l', value_parser = parse_length)]
    pub length: Option<usize>,
    /// Numbering scope [default: global].
    #[arg(long, short = 's', value_enum)]
    pub scope: Option<Scope>,
    /// Select every layer in the workspace.
    #[arg(long, conflicts_with = "layers")]
    pub all: bool,
    /// Print the first identifier and exit without editing anything.
    #[arg(long)]
    pub preview: bool,
    /// Write a YAML journal of every host call [env: `UIDGEN_JOURNAL`].
    #[arg(long)]
    pub journal: Option<PathBuf>,
    /// Layer names, in numbering order.
    pub layers: Vec<String>,
}

fn parse_length(raw: &str) -> Result<usize, String> {
    let length: usize = raw.parse().map_err(|e| format!("{raw}: {e}"))?;
    check_length(length)
}
