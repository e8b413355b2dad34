//! Human-readable error descriptions and structured JSON error formatting.

use robodata_core::error::{BuildError, DatasetError};
use serde_json::json;

/// Map an eyre::Report to a human-readable explanation with likely causes and fix hints.
pub fn humanize(err: &eyre::Report) -> String {
    let context = err.to_string();

    // Typed matches first
    if let Some(be) = err.downcast_ref::<BuildError>() {
        let BuildError::InvalidConfig(msg) = be;
        return format!(
            "What happened: Invalid pipeline settings ({msg}).\nLikely causes: Out-of-range values in the TOML or on the command line.\nHow to fix: Correct the value (see `robodata check-config`), then rerun."
        );
    }

    if let Some(de) = err.downcast_ref::<DatasetError>() {
        return match de {
            DatasetError::DegenerateTimestamp { index, timestamp_ms } => format!(
                "What happened: {context}: timestamp {timestamp_ms} ms at row index {index} does not advance.\nLikely causes: Duplicated or out-of-order log lines in the trace.\nHow to fix: Deduplicate/sort the trace by TIMESTAMP or drop it from the run."
            ),
            DatasetError::LengthMismatch { .. } => format!(
                "What happened: {context}: {de}.\nLikely causes: A trace column is shorter than the others.\nHow to fix: Re-export the trace so every column has one value per row."
            ),
            DatasetError::EmptyPool { traces } => format!(
                "What happened: None of the {traces} trace(s) is long enough for a single window.\nLikely causes: Traces shorter than dataset.window_len.\nHow to fix: Lower --window / dataset.window_len or add longer traces."
            ),
            DatasetError::InvalidWindowLength => {
                "What happened: Window length is zero.\nLikely causes: --window 0 or dataset.window_len = 0.\nHow to fix: Use a window length of at least 1.".to_string()
            }
        };
    }

    // String-based heuristics for errors coming from the loaders
    let lower = format!("{err:#}").to_ascii_lowercase();

    if lower.contains("is missing column") {
        return format!(
            "What happened: {err:#}.\nLikely causes: The file is not a robot trace or its header was edited.\nHow to fix: Header must contain TIMESTAMP, VISION_X, VISION_Y, VISION_W, ROBOT_M1..ROBOT_M4."
        );
    }

    if lower.contains("invalid csv row") {
        return format!(
            "What happened: {err:#}.\nLikely causes: Truncated line or non-numeric cell.\nHow to fix: Fix or remove the reported line."
        );
    }

    if lower.contains("open trace csv") || lower.contains("read config") {
        return format!(
            "What happened: {err:#}.\nLikely causes: Wrong path or missing permissions.\nHow to fix: Check the path and rerun."
        );
    }

    if lower.contains("parse config") || lower.contains("must be") {
        return format!(
            "What happened: Configuration is invalid ({err:#}).\nLikely causes: Typo in a key or an out-of-range value.\nHow to fix: Edit the TOML config and run `robodata check-config`."
        );
    }

    // Generic fallback
    let mut cause = String::new();
    if let Some(src) = err.source() {
        cause = format!(" Cause: {src}");
    }
    format!(
        "Something went wrong.{cause}\nHow to fix: Re-run with --log-level=debug for details. Original: {context}"
    )
}

/// Stable exit codes per dataset failure; everything else returns 1.
/// (Argument errors exit with 2 from clap itself.)
pub fn exit_code_for_error(err: &eyre::Report) -> i32 {
    if err.downcast_ref::<BuildError>().is_some() {
        return 6;
    }
    match err.downcast_ref::<DatasetError>() {
        Some(DatasetError::DegenerateTimestamp { .. }) => 3,
        Some(DatasetError::LengthMismatch { .. }) => 4,
        Some(DatasetError::EmptyPool { .. }) => 5,
        Some(DatasetError::InvalidWindowLength) => 6,
        None => 1,
    }
}

fn reason_name(err: &eyre::Report) -> &'static str {
    if err.downcast_ref::<BuildError>().is_some() {
        return "InvalidConfig";
    }
    match err.downcast_ref::<DatasetError>() {
        Some(DatasetError::DegenerateTimestamp { .. }) => "DegenerateTimestamp",
        Some(DatasetError::LengthMismatch { .. }) => "LengthMismatch",
        Some(DatasetError::EmptyPool { .. }) => "EmptyPool",
        Some(DatasetError::InvalidWindowLength) => "InvalidWindowLength",
        None => "Error",
    }
}

/// Structured JSON for errors when --json is enabled.
pub fn format_error_json(err: &eyre::Report) -> String {
    let msg = humanize(err);
    let details = match err.downcast_ref::<DatasetError>() {
        Some(DatasetError::DegenerateTimestamp { index, timestamp_ms }) => {
            Some(json!({ "index": index, "timestamp_ms": timestamp_ms }))
        }
        Some(DatasetError::LengthMismatch {
            what,
            expected,
            actual,
        }) => Some(json!({ "what": what, "expected": expected, "actual": actual })),
        Some(DatasetError::EmptyPool { traces }) => Some(json!({ "traces": traces })),
        _ => None,
    };

    let obj = match details {
        Some(d) => json!({ "reason": reason_name(err), "details": d, "message": msg }),
        None => json!({ "reason": reason_name(err), "message": msg }),
    };
    obj.to_string()
}
