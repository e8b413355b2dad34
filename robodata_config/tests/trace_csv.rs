use std::fs::File;
use std::io::Write;

use robodata_config::{TraceRow, load_config_file, load_trace_csv, read_trace_csv};
use rstest::rstest;
use tempfile::tempdir;

const HEADER: &str =
    "TIMESTAMP, VISION_X, VISION_Y, VISION_W, ROBOT_M1, ROBOT_M2, ROBOT_M3, ROBOT_M4";

#[rstest]
fn loads_rows_with_padded_headers() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("run.csv");

    let mut f = File::create(&path).unwrap();
    writeln!(f, "{HEADER}").unwrap();
    writeln!(f, "1000, 0.5, 1.0, 0.1, 10, -10, 10, -10").unwrap();
    writeln!(f, "1020, 0.6, 1.1, 0.2, 11, -11, 11, -11").unwrap();

    let rows = load_trace_csv(&path).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(
        rows[1],
        TraceRow {
            timestamp_ms: 1020.0,
            vision_x: 0.6,
            vision_y: 1.1,
            vision_w: 0.2,
            m1: 11.0,
            m2: -11.0,
            m3: 11.0,
            m4: -11.0,
        }
    );
}

#[rstest]
fn extra_columns_and_order_are_ignored() {
    let csv = "ROBOT_M4,ROBOT_M3,ROBOT_M2,ROBOT_M1,VISION_W,VISION_Y,VISION_X,TIMESTAMP,BATTERY\n\
               4,3,2,1,0.3,0.2,0.1,5,12.6\n";
    let rows = read_trace_csv(csv.as_bytes(), "inline").unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].timestamp_ms, 5.0);
    assert_eq!(rows[0].vision_x, 0.1);
    assert_eq!(rows[0].m1, 1.0);
    assert_eq!(rows[0].m4, 4.0);
}

#[rstest]
#[case("VISION_Y")]
#[case("ROBOT_M3")]
#[case("TIMESTAMP")]
fn missing_column_errors(#[case] dropped: &str) {
    let header: Vec<&str> = HEADER
        .split(',')
        .map(str::trim)
        .filter(|h| *h != dropped)
        .collect();
    let csv = format!("{}\n", header.join(","));
    let err = read_trace_csv(csv.as_bytes(), "inline").expect_err("should fail");
    let msg = format!("{err}");
    assert!(msg.contains("missing column"), "{msg}");
    assert!(msg.contains(dropped), "{msg}");
}

#[rstest]
fn non_numeric_row_reports_line() {
    let csv = format!("{HEADER}\n1000,0,0,0,1,1,1,1\n1020,abc,0,0,1,1,1,1\n");
    let err = read_trace_csv(csv.as_bytes(), "inline").expect_err("should fail");
    assert!(format!("{err}").contains("invalid CSV row 3"), "{err}");
}

#[rstest]
fn header_only_file_yields_no_rows() {
    let rows = read_trace_csv(format!("{HEADER}\n").as_bytes(), "inline").unwrap();
    assert!(rows.is_empty());
}

#[rstest]
fn missing_file_errors() {
    let dir = tempdir().unwrap();
    let err = load_trace_csv(&dir.path().join("nope.csv")).expect_err("should fail");
    assert!(format!("{err}").contains("open trace CSV"));
}

#[rstest]
fn config_file_is_validated_on_load() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("cfg.toml");
    std::fs::write(&path, "[dataset]\nwindow_len = 0\n").unwrap();
    let err = load_config_file(&path).expect_err("should fail validation");
    assert!(format!("{err}").contains("window_len"));
}
