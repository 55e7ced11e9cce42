//! Integration tests for journaling host interactions.

use std::path::PathBuf;
use std::process::Command;

use uidgen::journal::Journal;

fn workspace(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(name);
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn journal_records_every_write_in_order() {
    let dir = workspace("uidgen_it_journal");
    std::fs::write(
        dir.join("wells.geojson"),
        r#"{"type":"FeatureCollection","features":[
            {"type":"Feature","id":5,"properties":{},"geometry":null},
            {"type":"Feature","id":2,"properties":{},"geometry":null}
        ]}"#,
    )
    .unwrap();
    let journal_path = dir.join("journal").join("run.yaml");

    let output = Command::new(env!("CARGO_BIN_EXE_uidgen"))
        .arg("--workspace")
        .arg(&dir)
        .args(["assign", "--journal"])
        .arg(&journal_path)
        .arg("wells")
        .env_remove("UIDGEN_JOURNAL")
        .output()
        .expect("failed to run uidgen binary");
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Journal saved to"));

    let journal: Journal =
        serde_yaml::from_str(&std::fs::read_to_string(&journal_path).unwrap()).unwrap();
    let writes: Vec<(u64, String)> = journal
        .calls("write_attribute")
        .map(|i| {
            (i.input["feature"].as_u64().unwrap(), i.input["value"].as_str().unwrap().to_string())
        })
        .collect();
    assert_eq!(
        writes,
        [(2, "130129000000000001".to_string()), (5, "130129000000000002".to_string())]
    );
    assert_eq!(journal.calls("commit_edit").count(), 1);
    assert_eq!(journal.calls("rollback_edit").count(), 0);

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn journal_is_written_when_assignment_fails() {
    let dir = workspace("uidgen_it_journal_fail");
    std::fs::write(dir.join("broken.geojson"), r#"{"type":"Feature"}"#).unwrap();
    let journal_path = dir.join("run.yaml");

    let output = Command::new(env!("CARGO_BIN_EXE_uidgen"))
        .arg("--workspace")
        .arg(&dir)
        .args(["assign", "broken"])
        .env("UIDGEN_JOURNAL", &journal_path)
        .output()
        .expect("failed to run uidgen binary");
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("begin edit failed"));

    let journal: Journal =
        serde_yaml::from_str(&std::fs::read_to_string(&journal_path).unwrap()).unwrap();
    let begin = journal.calls("begin_edit").next().expect("begin_edit journaled");
    assert!(begin.output["Err"].as_str().unwrap().contains("not a FeatureCollection"));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn command_error_is_kept_when_journal_cannot_be_written() {
    let dir = workspace("uidgen_it_journal_both_fail");
    std::fs::write(dir.join("broken.geojson"), r#"{"type":"Feature"}"#).unwrap();
    std::fs::write(dir.join("blocker"), "not a directory").unwrap();
    let journal_path = dir.join("blocker").join("run.yaml");

    let output = Command::new(env!("CARGO_BIN_EXE_uidgen"))
        .arg("--workspace")
        .arg(&dir)
        .args(["assign", "--journal"])
        .arg(&journal_path)
        .arg("broken")
        .env_remove("UIDGEN_JOURNAL")
        .output()
        .expect("failed to run uidgen binary");
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    let command = stderr.find("begin edit failed").expect("command error reported");
    let journal = stderr.find("Failed to write journal").expect("journal error reported");
    assert!(command < journal, "stderr: {stderr}");
    assert!(!journal_path.exists());

    let _ = std::fs::remove_dir_all(&dir);
}
