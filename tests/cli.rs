//! Integration tests for top-level CLI behavior.

use std::path::{Path, PathBuf};
use std::process::Command;

use serde_json::{json, Value};

fn run_uidgen(workspace: &Path, args: &[&str]) -> std::process::Output {
    let bin = env!("CARGO_BIN_EXE_uidgen");
    Command::new(bin)
        .arg("--workspace")
        .arg(workspace)
        .args(args)
        .env_remove("UIDGEN_JOURNAL")
        .env_remove("UIDGEN_WORKSPACE")
        .output()
        .expect("failed to run uidgen binary")
}

fn workspace(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(name);
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn write_layer(dir: &Path, name: &str, ids: &[u64]) {
    let features: Vec<Value> = ids
        .iter()
        .map(|id| {
            json!({
                "type": "Feature",
                "id": id,
                "properties": { "name": format!("f{id}") },
                "geometry": { "type": "Point", "coordinates": [0.0, 0.0] }
            })
        })
        .collect();
    let doc = json!({ "type": "FeatureCollection", "features": features });
    std::fs::write(dir.join(format!("{name}.geojson")), doc.to_string()).unwrap();
}

fn codes(dir: &Path, name: &str) -> Vec<(u64, String)> {
    let text = std::fs::read_to_string(dir.join(format!("{name}.geojson"))).unwrap();
    let doc: Value = serde_json::from_str(&text).unwrap();
    doc["features"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| {
            (f["id"].as_u64().unwrap(), f["properties"]["BSM"].as_str().unwrap_or("").to_string())
        })
        .collect()
}

#[test]
fn assign_global_scope_numbers_across_layers() {
    let dir = workspace("uidgen_it_global");
    write_layer(&dir, "parcels", &[12, 10, 11]);
    write_layer(&dir, "roads", &[4, 3]);

    let output = run_uidgen(&dir, &["assign", "parcels", "roads"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert!(stdout.contains("Unique IDs have been assigned."));
    assert!(stdout.contains("5 feature(s) in 2 layer(s)."));

    assert_eq!(
        codes(&dir, "parcels"),
        [
            (12, "130129000000000003".to_string()),
            (10, "130129000000000001".to_string()),
            (11, "130129000000000002".to_string()),
        ]
    );
    assert_eq!(
        codes(&dir, "roads"),
        [(4, "130129000000000005".to_string()), (3, "130129000000000004".to_string())]
    );

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn assign_layer_scope_restarts_per_layer() {
    let dir = workspace("uidgen_it_layer");
    write_layer(&dir, "parcels", &[1, 2, 3]);
    write_layer(&dir, "roads", &[1, 2]);

    let output =
        run_uidgen(&dir, &["assign", "--scope", "layer", "--prefix", "R", "--length", "10", "--all"]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    assert_eq!(codes(&dir, "parcels")[2].1, "R000000003");
    assert_eq!(codes(&dir, "roads")[1].1, "R000000002");

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn assign_keeps_existing_properties() {
    let dir = workspace("uidgen_it_keep");
    write_layer(&dir, "parcels", &[1]);

    let output = run_uidgen(&dir, &["assign", "parcels"]);
    assert!(output.status.success());

    let text = std::fs::read_to_string(dir.join("parcels.geojson")).unwrap();
    let doc: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(doc["features"][0]["properties"]["name"], "f1");
    assert_eq!(doc["features"][0]["geometry"]["type"], "Point");

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn assign_without_layers_warns_and_fails() {
    let dir = workspace("uidgen_it_empty");
    write_layer(&dir, "parcels", &[1]);
    let before = std::fs::read_to_string(dir.join("parcels.geojson")).unwrap();

    let output = run_uidgen(&dir, &["assign"]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(stderr.contains("No layers selected."));
    assert_eq!(std::fs::read_to_string(dir.join("parcels.geojson")).unwrap(), before);

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn assign_rejects_length_not_exceeding_prefix() {
    let dir = workspace("uidgen_it_length");
    write_layer(&dir, "parcels", &[1]);
    let before = std::fs::read_to_string(dir.join("parcels.geojson")).unwrap();

    let output =
        run_uidgen(&dir, &["assign", "--prefix", "ABCDEFGHIJ", "--length", "10", "parcels"]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(stderr.contains("must be greater than the prefix length 10"));
    assert_eq!(std::fs::read_to_string(dir.join("parcels.geojson")).unwrap(), before);

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn assign_unknown_layer_fails() {
    let dir = workspace("uidgen_it_unknown");
    write_layer(&dir, "parcels", &[1]);

    let output = run_uidgen(&dir, &["assign", "rivers"]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(stderr.contains("Unknown layer: rivers"));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn assign_uses_workspace_settings() {
    let dir = workspace("uidgen_it_settings");
    write_layer(&dir, "parcels", &[1]);
    std::fs::write(dir.join("uidgen.yaml"), "field: CODE\nprefix: \"77\"\nlength: 12\n").unwrap();

    let output = run_uidgen(&dir, &["assign", "parcels"]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let text = std::fs::read_to_string(dir.join("parcels.geojson")).unwrap();
    let doc: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(doc["features"][0]["properties"]["CODE"], "770000000001");

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn preview_prints_first_identifier() {
    let dir = workspace("uidgen_it_preview");

    let output = run_uidgen(&dir, &["assign", "--preview"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert_eq!(stdout.trim(), "130129000000000001");

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn layers_subcommand_lists_layers() {
    let dir = workspace("uidgen_it_layers");
    write_layer(&dir, "roads", &[1, 2]);

    let output = run_uidgen(&dir, &["layers"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(stdout.contains("roads"));
    assert!(stdout.contains("name"));
    assert!(stdout.contains("1 layer(s) total."));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn layers_subcommand_empty_workspace() {
    let dir = workspace("uidgen_it_layers_empty");

    let output = run_uidgen(&dir, &["layers"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(stdout.contains("No layers found"));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn invalid_subcommand_exits_with_error() {
    let dir = workspace("uidgen_it_invalid");
    let output = run_uidgen(&dir, &["nonsense"]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(stderr.contains("unrecognized subcommand"));
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn length_outside_dialog_range_is_rejected() {
    let dir = workspace("uidgen_it_range");
    let output = run_uidgen(&dir, &["assign", "--length", "31", "--preview"]);
    assert!(!output.status.success());
    let _ = std::fs::remove_dir_all(&dir);
}
