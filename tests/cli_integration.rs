//! CLI tests: exit codes and output of the `untangle-eval` binary.

mod common;

use assert_cmd::Command;
use common::{create_change, MARKED_TWO_GROUPS, METHOD_DIFF, UNMARKED_METHOD};
use std::fs;
use tempfile::TempDir;

fn untangle_eval(dir: &TempDir) -> Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("untangle-eval");
    cmd.current_dir(dir.path()).env_remove("RUST_LOG");
    cmd
}

fn stdout_of(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr_of(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn test_flatten_missing_graph_exits_one() {
    let dir = TempDir::new().unwrap();

    let output = untangle_eval(&dir)
        .args(["flatten", "absent/merged_output_wl_1.dot"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr_of(&output).contains("PDG not found"));
    assert!(!dir.path().join("absent/flexeme.csv").exists());
}

#[test]
fn test_flatten_missing_graph_with_stale_results_exits_one() {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("c1")).unwrap();
    fs::write(
        dir.path().join("c1/flexeme.csv"),
        "file,source,target,tool_group,truth_group\n",
    )
    .unwrap();

    let output = untangle_eval(&dir)
        .args(["flatten", "c1/merged_output_wl_1.dot"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr_of(&output).contains("PDG not found"));
}

#[test]
fn test_flatten_without_grouped_changes_writes_header_only() {
    let dir = TempDir::new().unwrap();
    let graph = create_change(dir.path(), "c1", UNMARKED_METHOD);

    let output = untangle_eval(&dir).arg("flatten").arg(&graph).output().unwrap();

    assert_eq!(output.status.code(), Some(0));
    assert!(stderr_of(&output).contains("No results generated for"));
    assert_eq!(
        fs::read_to_string(dir.path().join("c1/flexeme.csv")).unwrap(),
        "file,source,target,tool_group,truth_group\n"
    );
}

#[test]
fn test_flatten_writes_results_next_to_graph() {
    let dir = TempDir::new().unwrap();
    let graph = create_change(dir.path(), "c1", MARKED_TWO_GROUPS);

    untangle_eval(&dir)
        .arg("flatten")
        .arg(&graph)
        .assert()
        .success();

    let csv = fs::read_to_string(dir.path().join("c1/flexeme.csv")).unwrap();
    assert_eq!(csv.lines().count(), 4);
}

#[test]
fn test_flatten_unsupported_color_exits_two() {
    let dir = TempDir::new().unwrap();
    let graph = create_change(
        dir.path(),
        "c1",
        r#"digraph { a [label="0:x", span="1-1", color=blue, community=0, cluster="A.java"]; }"#,
    );

    let output = untangle_eval(&dir).arg("flatten").arg(&graph).output().unwrap();

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr_of(&output).contains("Color blue not supported"));
}

#[test]
fn test_score_missing_csv_exits_one() {
    let dir = TempDir::new().unwrap();

    let output = untangle_eval(&dir)
        .args(["score", "flexeme.csv"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_score_prints_rand_index() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("flexeme.csv"),
        "file,source,target,tool_group,truth_group\n\
         \"A.java\",,1,0,0\n\
         \"A.java\",,2,0,0\n\
         \"A.java\",3,,0,1\n",
    )
    .unwrap();

    let output = untangle_eval(&dir)
        .args(["score", "flexeme.csv", "--output", "scores.csv"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let printed: f64 = stdout_of(&output).trim().parse().unwrap();
    assert!((printed - 1.0 / 3.0).abs() < 1e-9);
    assert!(fs::read_to_string(dir.path().join("scores.csv"))
        .unwrap()
        .starts_with("file,score\nflexeme.csv,0.333"));
}

#[test]
fn test_score_json_output() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("flexeme.csv"),
        "file,source,target,tool_group,truth_group\n\"A.java\",,1,4,0\n",
    )
    .unwrap();

    let output = untangle_eval(&dir)
        .args(["score", "flexeme.csv", "--json"])
        .output()
        .unwrap();

    let record: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(record["file"], "flexeme.csv");
    assert_eq!(record["score"], 1.0);
}

#[test]
fn test_mark_writes_colored_graph_to_stdout() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("g.dot"), UNMARKED_METHOD).unwrap();
    fs::write(dir.path().join("c.diff"), METHOD_DIFF).unwrap();

    let output = untangle_eval(&dir)
        .args(["mark", "g.dot", "c.diff", "--language", "java"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let dot = untangle_eval::parse_dot(&stdout_of(&output)).unwrap();
    assert_eq!(dot.node("s1").and_then(|n| n.color()), Some("red"));
    assert_eq!(dot.node("s3").and_then(|n| n.color()), Some("green"));
}

#[test]
fn test_mark_language_from_config() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("g.dot"), UNMARKED_METHOD).unwrap();
    fs::write(dir.path().join("c.diff"), METHOD_DIFF).unwrap();
    fs::write(dir.path().join(".untangle-eval.toml"), "language = \"csharp\"\n").unwrap();

    untangle_eval(&dir)
        .args(["mark", "g.dot", "c.diff", "-o", "marked.dot"])
        .assert()
        .success();

    let dot = untangle_eval::read_dot(&dir.path().join("marked.dot")).unwrap();
    assert_eq!(dot.node("s2").and_then(|n| n.color()), Some("green"));
    assert_eq!(dot.node("s1").and_then(|n| n.color()), None);
}

#[test]
fn test_batch_with_failure_exits_two_and_writes_scores() {
    let dir = TempDir::new().unwrap();
    create_change(dir.path(), "good", MARKED_TWO_GROUPS);
    create_change(dir.path(), "bad", "digraph { a -> ");

    let output = untangle_eval(&dir)
        .args(["batch", ".", "scores.csv", "--no-progress", "--jobs", "2"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr_of(&output).contains("Failure breakdown:"));
    let scores = fs::read_to_string(dir.path().join("scores.csv")).unwrap();
    assert_eq!(scores.lines().count(), 2);
    assert!(scores.contains("good"));
}

#[test]
fn test_explicit_missing_config_fails() {
    let dir = TempDir::new().unwrap();

    let output = untangle_eval(&dir)
        .args(["--config", "nope.toml", "score", "flexeme.csv"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr_of(&output).contains("Failed to load config"));
}

#[test]
fn test_init_creates_config() {
    let dir = TempDir::new().unwrap();

    untangle_eval(&dir).arg("init").assert().success();
    untangle_eval(&dir).arg("init").assert().failure();

    let text = fs::read_to_string(dir.path().join(".untangle-eval.toml")).unwrap();
    assert!(text.contains("graph_filename = \"merged_output_wl_1.dot\""));
}
