//! CLI integration tests using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn cogscreen() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("cogscreen").unwrap()
}

/// Answers for a default session: recall, reaction start + 10 go trials,
/// five subtraction steps, digit span, sequence, delayed recall.
fn scripted_answers() -> String {
    let mut lines = vec!["apple river".to_string()];
    lines.extend(std::iter::repeat(String::new()).take(11));
    lines.extend(["93", "86", "79", "72", "65"].map(String::from));
    lines.push("000000".into());
    lines.push("1 a 2 b 3 c 4 d 5 e 6 f".into());
    lines.push("apple".into());
    lines.join("\n") + "\n"
}

#[test]
fn run_json_report() {
    let output = cogscreen()
        .args(["run", "--participant", "tester", "--no-pause", "--format", "json"])
        .write_stdin(scripted_answers())
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let report: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(report["participant_id"], "tester");

    let results = report["results"].as_object().unwrap();
    for task in [
        "memory_immediate_recall",
        "reaction_simple",
        "multidomain_screen",
        "memory_delayed_recall",
        "composite",
    ] {
        assert!(results.contains_key(task), "missing {task}");
    }
    assert_eq!(results.len(), 5);

    let multi = &results["multidomain_screen"];
    assert_eq!(multi["metrics"]["serial_correct"], 5.0);
    assert_eq!(multi["metrics"]["sequence_correct"], 12.0);
    assert_eq!(multi["max_score"], 18.0);

    let composite = &results["composite"];
    assert!(composite["score"].is_number());
    assert!(composite["metrics"]["components_present"].as_f64().unwrap() >= 3.0);
}

#[test]
fn run_text_prompts_for_participant() {
    let stdin = format!("alice\n{}", scripted_answers());
    cogscreen()
        .args(["run", "--no-pause"])
        .write_stdin(stdin)
        .assert()
        .success()
        .stdout(predicate::str::contains("Welcome to the cognitive test demo."))
        .stdout(predicate::str::contains("Enter your participant ID"))
        .stdout(predicate::str::contains("=== SESSION COMPLETE ==="))
        .stdout(predicate::str::contains("MEMORY_IMMEDIATE_RECALL"))
        .stdout(predicate::str::contains("MEMORY_DELAYED_RECALL"))
        .stdout(predicate::str::contains("COMPOSITE"));
}

#[test]
fn run_table_format() {
    cogscreen()
        .args(["run", "--participant", "t", "--no-pause", "--format", "table"])
        .write_stdin(scripted_answers())
        .assert()
        .success()
        .stdout(predicate::str::contains("Task"))
        .stdout(predicate::str::contains("multidomain_screen"));
}

#[test]
fn run_survives_closed_stdin() {
    cogscreen()
        .args(["run", "--participant", "quiet", "--no-pause", "--format", "json"])
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"memory_delayed_recall\""));
}

#[test]
fn run_go_no_go_mode() {
    let output = cogscreen()
        .args([
            "run",
            "--participant",
            "g",
            "--no-pause",
            "--go-no-go",
            "--seed",
            "3",
            "--format",
            "json",
        ])
        .write_stdin("")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let report: serde_json::Value = serde_json::from_slice(&output).unwrap();
    let results = report["results"].as_object().unwrap();
    assert!(results.contains_key("reaction_go_nogo"));
    assert!(!results.contains_key("reaction_simple"));
}

#[test]
fn run_recognition_mode() {
    cogscreen()
        .args([
            "run",
            "--participant",
            "r",
            "--no-pause",
            "--recognition",
            "--format",
            "json",
        ])
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"memory_immediate_recognition\""));
}

#[test]
fn invalid_config_aborts() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("session.toml");
    std::fs::write(&path, "[memory]\nn_words = 500\n").unwrap();

    cogscreen()
        .args(["run", "--participant", "x", "--no-pause", "--config"])
        .arg(&path)
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"))
        .stderr(predicate::str::contains("invalid configuration"))
        .stdout(predicate::str::contains("Starting session").not());
}

#[test]
fn missing_config_file_fails() {
    cogscreen()
        .args(["run", "--participant", "x", "--config", "nonexistent.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read config"));
}

#[test]
fn config_command_prints_defaults() {
    cogscreen()
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("[memory]"))
        .stdout(predicate::str::contains("n_words = 10"))
        .stdout(predicate::str::contains("[composite]"));
}

#[test]
fn config_output_is_loadable() {
    let dir = TempDir::new().unwrap();
    let output = cogscreen().arg("config").assert().success().get_output().stdout.clone();
    let path = dir.path().join("session.toml");
    std::fs::write(&path, output).unwrap();

    cogscreen()
        .args(["run", "--participant", "c", "--no-pause", "--format", "json", "--config"])
        .arg(&path)
        .write_stdin("")
        .assert()
        .success();
}

#[test]
fn score_recall_command() {
    let output = cogscreen()
        .args([
            "score-recall",
            "--targets",
            "apple,river,chair",
            "--recalled",
            "I remember apple and CHAIR, also lamp",
        ])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let scored: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(scored["score"], 2);
    assert_eq!(scored["max_score"], 3);
    assert_eq!(scored["correct"], serde_json::json!(["apple", "chair"]));
    assert_eq!(
        scored["intrusions"],
        serde_json::json!(["also", "and", "i", "lamp", "remember"])
    );
}

#[test]
fn score_recall_requires_targets() {
    cogscreen()
        .args(["score-recall", "--targets", " , ", "--recalled", "apple"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("at least one target"));
}
