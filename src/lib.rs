//! Sequential identifier assignment for vector layer features.
//!
//! The [`assign::assign`] operation walks an ordered set of layers through a
//! [`ports::LayerHost`] and writes `prefix + zero-padded sequence` into a
//! text field on every feature. The `uidgen` binary drives it against a
//! directory of GeoJSON layers.

pub mod adapters;
pub mod assign;
pub mod cli;
pub mod commands;
pub mod context;
pub mod journal;
pub mod logging;
pub mod ports;
pub mod settings;

use clap::Parser;

/// Run the CLI with the provided arguments.
///
/// # Errors
///
/// Returns an error string when argument parsing fails or command execution fails.
pub fn run<I, T>(args: I) -> Result<(), String>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = cli::Cli::try_parse_from(args).map_err(|err| err.to_string())?;
    commands::dispatch(&cli)
}

#[cfg(test)]
mod tests {
    use super::run;

    #[test]
    fn run_lists_layers_of_empty_workspace() {
        let dir = std::env::temp_dir().join("uidgen_lib_run_empty");
        std::fs::create_dir_all(&dir).unwrap();
        let result = run(["uidgen", "layers", "--workspace", dir.to_str().unwrap()]);
        assert!(result.is_ok());
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn run_errors_on_unknown_subcommand() {
        let result = run(["uidgen", "unknown"]);
        assert!(result.is_err());
    }
}
