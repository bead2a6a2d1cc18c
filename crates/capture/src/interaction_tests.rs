// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use super::*;
use serde_json::json;

fn invocation(outcome: CapturedOutcome) -> CapturedInvocation {
    CapturedInvocation {
        seq: 3,
        timestamp: SystemTime::UNIX_EPOCH,
        elapsed: Duration::from_micros(1_500),
        hook: "emit".to_string(),
        tap: "Minifier".to_string(),
        kind: TapKind::Async,
        outcome,
    }
}

#[test]
fn test_invocation_json_shape() {
    let value = serde_json::to_value(invocation(CapturedOutcome::Completed)).unwrap();
    assert_eq!(value["elapsed_us"], json!(1_500));
    assert_eq!(value["kind"], json!("async"));
    assert_eq!(value["outcome"], json!({ "type": "completed" }));
}

#[test]
fn test_failed_outcome_json_shape() {
    let outcome = CapturedOutcome::Failed {
        message: "boom".to_string(),
    };
    let value = serde_json::to_value(&outcome).unwrap();
    assert_eq!(value, json!({ "type": "failed", "message": "boom" }));
}

#[test]
fn test_invocation_parses_back() {
    let line = serde_json::to_string(&invocation(CapturedOutcome::Completed)).unwrap();
    let parsed: CapturedInvocation = serde_json::from_str(&line).unwrap();
    assert_eq!(parsed.elapsed, Duration::from_micros(1_500));
    assert_eq!(parsed.tap, "Minifier");
    assert_eq!(parsed.timestamp, SystemTime::UNIX_EPOCH);
}

#[test]
fn test_from_result() {
    assert_eq!(
        CapturedOutcome::from_result::<String>(&Ok(())),
        CapturedOutcome::Completed
    );
    let failed = CapturedOutcome::from_result(&Err("nope"));
    assert!(failed.is_failure());
    assert_eq!(
        failed,
        CapturedOutcome::Failed {
            message: "nope".to_string()
        }
    );
}
