//! `uidgen assign` command.

use std::path::Path;

use tracing::info;

use crate::assign::{assign, AssignError, AssignmentRequest, AssignmentResult};
use crate::cli::AssignArgs;
use crate::context::ServiceContext;
use crate::ports::LayerId;
use crate::settings::Settings;

/// Execute the `assign` command.
///
/// Builds the request from the command line and workspace settings, then
/// either previews the first identifier or assigns identifiers to every
/// selected layer and prints a confirmation.
///
/// # Errors
///
/// Returns an error string if settings or layers cannot be read, the
/// request is rejected, or a host operation fails.
pub fn run(ctx: &ServiceContext, workspace: &Path, args: &AssignArgs) -> Result<(), String> {
    let request = build_request(ctx, workspace, args)?;

    if args.preview {
        request.validate_format().map_err(|e| e.to_string())?;
        println!("{}", request.identifier(1));
        return Ok(());
    }

    let result = execute(ctx, &request)?;
    println!("Unique IDs have been assigned.");
    println!(
        "{} feature(s) in {} layer(s).",
        result.updated_feature_count, result.updated_layer_count
    );
    for layer in &result.created_fields {
        println!("Created field {} on {layer}.", request.field_name);
    }
    Ok(())
}

/// Merges command-line options over workspace settings and resolves layer names.
///
/// Field name and prefix are trimmed. Layers keep the order given on the
/// command line; a layer named twice is processed once.
///
/// # Errors
///
/// Returns an error string if settings cannot be loaded, the host cannot
/// list its layers, or a named layer does not exist.
pub fn build_request(
    ctx: &ServiceContext,
    workspace: &Path,
    args: &AssignArgs,
) -> Result<AssignmentRequest, String> {
    let settings = Settings::load(ctx.fs.as_ref(), workspace)?;

    Ok(AssignmentRequest {
        field_name: args.field.as_deref().unwrap_or(&settings.field).trim().to_string(),
        prefix: args.prefix.as_deref().unwrap_or(&settings.prefix).trim().to_string(),
        total_length: args.length.unwrap_or(settings.length),
        scope: args.scope.unwrap_or(settings.scope),
        layers: select_layers(ctx, args)?,
    })
}

fn select_layers(ctx: &ServiceContext, args: &AssignArgs) -> Result<Vec<LayerId>, String> {
    if !args.all && args.layers.is_empty() {
        return Ok(Vec::new());
    }
    let available =
        ctx.host.enumerate_layers().map_err(|e| format!("Failed to list layers: {e}"))?;
    if args.all {
        return Ok(available.into_iter().map(|l| l.id).collect());
    }

    let mut selected: Vec<LayerId> = Vec::with_capacity(args.layers.len());
    for name in &args.layers {
        let layer = available
            .iter()
            .find(|l| &l.name == name)
            .ok_or_else(|| format!("Unknown layer: {name}"))?;
        if !selected.contains(&layer.id) {
            selected.push(layer.id.clone());
        }
    }
    Ok(selected)
}

/// Runs the assigner and turns its error into a user-facing message.
///
/// # Errors
///
/// Returns the message for a rejected request or a failed host operation.
pub fn execute(
    ctx: &ServiceContext,
    request: &AssignmentRequest,
) -> Result<AssignmentResult, String> {
    info!(
        field = %request.field_name,
        prefix = %request.prefix,
        length = request.total_length,
        scope = ?request.scope,
        layers = request.layers.len(),
        "assigning identifiers"
    );
    assign(ctx.host.as_ref(), request).map_err(|err| match err {
        AssignError::EmptySelection => format!("Warning: {err}"),
        AssignError::Host { committed_layers, .. } if committed_layers > 0 => {
            format!("{err} ({committed_layers} layer(s) were already committed)")
        }
        other => other.to_string(),
    })
}
