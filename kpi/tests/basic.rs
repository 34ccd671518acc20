use std::path::Path;
use std::process::{Command, Output};

fn kpi(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_kpi"))
        .arg("--data")
        .arg(dir.join("indicators.json"))
        .arg("--settings")
        .arg(dir.join("view.json"))
        .args(args)
        .env("RUST_LOG", "warn")
        .output()
        .expect("run kpi")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn add_closure_rate(dir: &Path) {
    let output = kpi(
        dir,
        &[
            "add-indicator",
            "--name",
            "Incident closure rate",
            "--code",
            "OPS-1",
            "--unit",
            "%",
            "--objective",
            "90",
            "--alert",
            "70",
        ],
    );
    assert!(output.status.success(), "{output:?}");
    assert!(stdout(&output).contains("Indicator added with id 1"));
}

#[test]
fn list_flags_indicator_under_alert() {
    let dir = tempfile::tempdir().expect("tempdir");
    add_closure_rate(dir.path());
    for (date, value) in [("2024-01", "85"), ("2024-02", "60")] {
        let output = kpi(dir.path(), &["add-measurement", "1", "--value", value, "--date", date]);
        assert!(output.status.success(), "{output:?}");
    }

    let output = kpi(dir.path(), &["list"]);
    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("Incident closure rate"));
    assert!(text.contains("ALERT"));

    let output = kpi(dir.path(), &["list", "--alerts-only", "--query", "nothing"]);
    assert!(stdout(&output).contains("No indicators"));
}

#[test]
fn show_prints_chart_layout_json() {
    let dir = tempfile::tempdir().expect("tempdir");
    add_closure_rate(dir.path());
    kpi(dir.path(), &["add-measurement", "1", "--value", "95", "--date", "2024-03"]);
    kpi(dir.path(), &["add-measurement", "1", "--value", "80", "--date", "2024-01"]);

    let output = kpi(dir.path(), &["show", "1"]);
    assert!(output.status.success(), "{output:?}");
    let layout: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(layout["kind"], "chart");
    let bars = layout["bars"].as_array().expect("bars");
    assert_eq!(bars.len(), 2);
    assert_eq!(bars[0]["band"], "between-alert-and-objective");
    assert_eq!(bars[1]["band"], "at-or-above-objective");
}

#[test]
fn empty_indicator_shows_placeholder() {
    let dir = tempfile::tempdir().expect("tempdir");
    add_closure_rate(dir.path());
    let output = kpi(dir.path(), &["show", "1"]);
    let layout: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(layout["kind"], "placeholder");
    assert_eq!(layout["reason"], "empty_series");

    let output = kpi(dir.path(), &["export", "1", "out.svg"]);
    assert!(!output.status.success());
}

#[test]
fn bad_input_is_rejected() {
    let dir = tempfile::tempdir().expect("tempdir");
    add_closure_rate(dir.path());
    let output = kpi(dir.path(), &["add-measurement", "1", "--value", "abc", "--date", "2024-01"]);
    assert!(!output.status.success());
    let output = kpi(dir.path(), &["add-measurement", "7", "--value", "1", "--date", "2024-01"]);
    assert!(!output.status.success());
    let output = kpi(dir.path(), &["show", "42"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("not found"));
}
