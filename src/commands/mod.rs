//! Command dispatch and handlers.

pub mod assign;
pub mod layers;

use std::path::PathBuf;

use crate::cli::{Cli, Command};
use crate::context::ServiceContext;
use crate::journal::JournalSession;
use crate::settings;

/// Dispatch a parsed command line to its handler.
///
/// When `assign` is given `--journal` (or `UIDGEN_JOURNAL` is set), every
/// host call is journaled and the journal is written after the command
/// finishes, even when it fails.
///
/// # Errors
///
/// Returns an error string if the selected command handler fails or the
/// journal cannot be written. When both fail, the command's error comes
/// first.
pub fn dispatch(cli: &Cli) -> Result<(), String> {
    let workspace = cli.workspace.clone().unwrap_or_else(settings::workspace_root);

    let journal = match &cli.command {
        Command::Assign(args) => args.journal.clone().or_else(settings::journal_path),
        Command::Layers => None,
    };
    let (ctx, session) = match journal {
        Some(path) => {
            let (ctx, session) = ServiceContext::recording_at(&workspace, path);
            (ctx, Some(session))
        }
        None => (ServiceContext::live(&workspace), None),
    };

    let result = match &cli.command {
        Command::Assign(args) => assign::run(&ctx, &workspace, args),
        Command::Layers => layers::run(&ctx),
    };

    let Some(session) = session else {
        return result;
    };
    // Drop context first to release the recorder handle.
    drop(ctx);
    match (result, finish_journal(session)) {
        (Err(command), Err(journal)) => Err(format!("{command}\n{journal}")),
        (Err(command), Ok(())) => Err(command),
        (Ok(()), journal) => journal,
    }
}

fn finish_journal(session: JournalSession) -> Result<(), String> {
    let path: PathBuf = session.finish()?;
    eprintln!("Journal saved to: {}", path.display());
    Ok(())
}
