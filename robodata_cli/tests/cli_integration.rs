use assert_cmd::prelude::*;
use predicates::prelude::*;
use rstest::rstest;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::{TempDir, tempdir};

const HEADER: &str = "TIMESTAMP,VISION_X,VISION_Y,VISION_W,ROBOT_M1,ROBOT_M2,ROBOT_M3,ROBOT_M4";

fn write_trace(dir: &Path, name: &str, records: usize) -> PathBuf {
    let path = dir.join(name);
    let mut f = fs::File::create(&path).unwrap();
    writeln!(f, "{HEADER}").unwrap();
    for i in 0..records {
        let t = 500 + 25 * i;
        let x = 0.2 + 0.003 * i as f64;
        let w = -1.4 + 0.05 * i as f64;
        writeln!(f, "{t},{x},0.9,{w},12,-12,12,-12").unwrap();
    }
    path
}

/// Config listing two 30-record traces, windows of 10, 50/50 split.
fn write_valid_config(dir: &TempDir) -> PathBuf {
    let a = write_trace(dir.path(), "a.csv", 30);
    let b = write_trace(dir.path(), "b.csv", 30);
    let toml = format!(
        r#"
traces = [{a:?}, {b:?}]

[dataset]
window_len = 10
seed = 3

[split]
train = 0.5
validation = 0.5
test = 0.0
"#
    );
    let path = dir.path().join("cfg.toml");
    fs::write(&path, toml).unwrap();
    path
}

fn robodata() -> Command {
    let mut cmd = Command::cargo_bin("robodata").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

#[rstest]
#[case(&["--help"], 0, "Usage:", "stdout")]
#[case(&["check-config"], 0, "Config OK (2 trace paths)", "stdout")]
#[case(&["split"], 0, "Split complete: 2 traces, 6 windows of 10 records", "stdout")]
#[case(&["split", "--parallel"], 0, "train           3 windows", "stdout")]
#[case(&["split", "--window", "100"], 5, "long enough for a single window", "stderr")]
#[case(&["split", "--window", "0"], 6, "window_len must be >= 1", "stderr")]
#[case(&["split", "--train", "1.5"], 6, "split ratios", "stderr")]
#[case(&["split", "--window", "nope"], 2, "invalid value", "stderr")]
#[case(&["inspect"], 2, "required", "stderr")]
fn cli_table(
    #[case] args: &[&str],
    #[case] exit_code: i32,
    #[case] needle: &str,
    #[case] stream: &str,
) {
    let dir = tempdir().unwrap();
    let cfg = write_valid_config(&dir);

    let mut cmd = robodata();
    cmd.arg("--config").arg(&cfg).arg("--log-level").arg("warn");
    for a in args {
        cmd.arg(a);
    }

    let assert = cmd.assert().code(exit_code);
    match stream {
        "stdout" => {
            assert.stdout(predicate::str::contains(needle));
        }
        "stderr" => {
            assert.stderr(predicate::str::contains(needle));
        }
        other => panic!("unknown stream: {other}"),
    }
}

#[rstest]
fn explicit_paths_override_config_traces() {
    let dir = tempdir().unwrap();
    let cfg = write_valid_config(&dir);
    let c = write_trace(dir.path(), "c.csv", 45);

    robodata()
        .arg("--config")
        .arg(&cfg)
        .arg("split")
        .arg(&c)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Split complete: 1 traces, 4 windows of 10 records",
        ));
}

#[rstest]
fn split_without_any_paths_fails() {
    robodata()
        .arg("split")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("no trace paths given"));
}

#[rstest]
fn cli_reports_missing_trace_column() {
    let dir = tempdir().unwrap();
    let bad = dir.path().join("bad.csv");
    fs::write(&bad, "TIMESTAMP,VISION_X,VISION_Y\n0,0,0\n").unwrap();

    robodata()
        .arg("inspect")
        .arg(&bad)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("missing column 'VISION_W'"))
        .stderr(predicate::str::contains("Header must contain"));
}

#[rstest]
fn cli_reports_degenerate_timestamp_with_path() {
    let dir = tempdir().unwrap();
    let bad = dir.path().join("stuck.csv");
    fs::write(
        &bad,
        format!("{HEADER}\n0,0,0,0,1,1,1,1\n10,0,0,0,1,1,1,1\n10,0,0,0,1,1,1,1\n"),
    )
    .unwrap();

    robodata()
        .arg("split")
        .arg("--window")
        .arg("1")
        .arg(&bad)
        .assert()
        .code(3)
        .stderr(predicate::str::contains("stuck.csv"))
        .stderr(predicate::str::contains("does not advance"));
}

#[rstest]
fn inspect_prints_trace_summary() {
    let dir = tempdir().unwrap();
    let path = write_trace(dir.path(), "t.csv", 25);

    robodata()
        .arg("inspect")
        .arg("--window")
        .arg("10")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("records   25"))
        .stdout(predicate::str::contains(
            "windows   2 of 10 records (5 trailing records dropped)",
        ));
}

#[rstest]
fn invalid_config_is_rejected_before_running() {
    let dir = tempdir().unwrap();
    let cfg = dir.path().join("bad.toml");
    fs::write(&cfg, "[velocity]\nfilter_taps = 0\n").unwrap();

    robodata()
        .arg("--config")
        .arg(&cfg)
        .arg("check-config")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("velocity.filter_taps must be >= 1"));
}
