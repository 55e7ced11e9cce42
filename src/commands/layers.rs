//! `uidgen layers` command.

use crate::context::ServiceContext;

/// One row of the layer listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerRow {
    /// Layer name.
    pub name: String,
    /// Number of features.
    pub features: usize,
    /// Comma-separated field names.
    pub fields: String,
}

/// Collects name, feature count and fields for every layer.
///
/// # Errors
///
/// Returns an error string if the host cannot list or read a layer.
pub fn collect(ctx: &ServiceContext) -> Result<Vec<LayerRow>, String> {
    let layers = ctx.host.enumerate_layers().map_err(|e| format!("Failed to list layers: {e}"))?;
    layers
        .into_iter()
        .map(|layer| -> Result<LayerRow, String> {
            let features = ctx
                .host
                .iterate_features(&layer.id)
                .map_err(|e| format!("Failed to read layer {}: {e}", layer.name))?;
            let fields = ctx
                .host
                .field_names(&layer.id)
                .map_err(|e| format!("Failed to read layer {}: {e}", layer.name))?;
            Ok(LayerRow {
                name: layer.name,
                features: features.len(),
                fields: fields.into_iter().collect::<Vec<_>>().join(", "),
            })
        })
        .collect()
}

/// Execute the `layers` command.
///
/// Prints a table of layer name, feature count and field names.
///
/// # Errors
///
/// Returns an error string if the layers cannot be read.
pub fn run(ctx: &ServiceContext) -> Result<(), String> {
    let rows = collect(ctx)?;
    if rows.is_empty() {
        println!("No layers found in workspace.");
        return Ok(());
    }

    let name_width = rows.iter().map(|r| r.name.len()).max().unwrap_or(5).max(5);
    let count_width = rows.iter().map(|r| r.features.to_string().len()).max().unwrap_or(8).max(8);

    println!("{:<name_width$}  {:>count_width$}  FIELDS", "LAYER", "FEATURES");
    println!("{:-<name_width$}  {:->count_width$}  ------", "", "");
    for row in &rows {
        println!("{:<name_width$}  {:>count_width$}  {}", row.name, row.features, row.fields);
    }

    println!("\n{} layer(s) total.", rows.len());
    Ok(())
}
