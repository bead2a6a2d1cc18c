// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use super::*;
use serde_json::json;
use yare::parameterized;

fn noop() -> TapCallback<()> {
    TapCallback::sync(|_: &()| Ok(()))
}

#[test]
fn test_bare_name_equals_name_record() {
    assert_eq!(TapOptions::from("A"), TapOptions::new("A"));
    assert_eq!(
        TapOptions::from("A"),
        TapOptions {
            name: Some("A".to_string()),
            ..TapOptions::default()
        }
    );
}

#[test]
fn test_into_descriptor_applies_defaults() {
    let tap = TapOptions::new("A").into_descriptor(noop()).unwrap();
    assert_eq!(tap.name, "A");
    assert_eq!(tap.stage, 0);
    assert!(tap.before.is_empty());
    assert!(!tap.context);
    assert_eq!(tap.kind(), TapKind::Sync);
}

#[parameterized(
    missing = { TapOptions::default() },
    empty = { TapOptions::new("") },
    stage_only = { TapOptions::default().with_stage(3) },
)]
fn rejects_missing_name(options: TapOptions) {
    let err = options.into_descriptor(noop()).unwrap_err();
    assert!(matches!(err, HookError::InvalidArgument { method: "tap", .. }));
    assert!(err.to_string().contains("Missing name for tap"));
}

#[test]
fn test_missing_name_reports_registration_method() {
    let callback = TapCallback::from_async(|_: &(), done: TapDone| done(Ok(())));
    let err = TapOptions::default().into_descriptor(callback).unwrap_err();
    assert!(err.to_string().contains("Missing name for tapAsync"));
}

#[parameterized(
    string = { json!("A"), TapOptions::new("A") },
    object = { json!({ "name": "A", "stage": 2 }), TapOptions::new("A").with_stage(2) },
    single_before = { json!({ "name": "A", "before": "B" }), TapOptions::new("A").with_before("B") },
    many_before = {
        json!({ "name": "A", "before": ["B", "C"] }),
        TapOptions::new("A").with_before("B").with_before("C")
    },
    context = { json!({ "name": "A", "context": true }), TapOptions::new("A").with_context(true) },
)]
fn from_value_accepts(value: serde_json::Value, expected: TapOptions) {
    assert_eq!(
        TapOptions::from_value(TapKind::Sync, value).unwrap(),
        expected
    );
}

#[parameterized(
    null = { json!(null) },
    number = { json!(42) },
    boolean = { json!(true) },
    array = { json!(["A"]) },
    unknown_field = { json!({ "name": "A", "priority": 1 }) },
)]
fn from_value_rejects(value: serde_json::Value) {
    let err = TapOptions::from_value(TapKind::Sync, value).unwrap_err();
    assert!(matches!(err, HookError::InvalidArgument { .. }));
}

#[parameterized(
    sync = { TapKind::Sync, "tap" },
    callback = { TapKind::Async, "tapAsync" },
    future = { TapKind::Promise, "tapPromise" },
)]
fn from_value_names_registration_method(kind: TapKind, method: &str) {
    let err = TapOptions::from_value(kind, json!(7)).unwrap_err();
    assert!(matches!(err, HookError::InvalidArgument { method: m, .. } if m == method));
    assert!(err.to_string().starts_with(&format!("Invalid arguments to {method}:")));
}

#[test]
fn test_merge_defaults_caller_wins() {
    let defaults = TapOptions::default().with_stage(5).with_before("Z");
    let merged = TapOptions::new("x").with_stage(1).merge_defaults(&defaults);
    assert_eq!(merged.name.as_deref(), Some("x"));
    assert_eq!(merged.stage, Some(1));
    assert_eq!(merged.before, Some(vec!["Z".to_string()]));
    assert_eq!(merged.context, None);
}

#[test]
fn test_merge_defaults_can_supply_name() {
    let defaults = TapOptions::new("fallback");
    let merged = TapOptions::default().merge_defaults(&defaults);
    assert_eq!(merged.name.as_deref(), Some("fallback"));
}

#[test]
fn test_options_serialize_skips_unset() {
    let json = serde_json::to_value(TapOptions::new("A")).unwrap();
    assert_eq!(json, json!({ "name": "A" }));
}

#[test]
fn test_descriptor_debug_hides_callback() {
    let tap = TapOptions::new("A").into_descriptor(noop()).unwrap();
    let debug = format!("{tap:?}");
    assert!(debug.contains("\"A\""));
    assert!(debug.contains("Sync"));
}

#[test]
fn test_kind_display_and_method() {
    assert_eq!(TapKind::Sync.to_string(), "sync");
    assert_eq!(TapKind::Async.method(), "tapAsync");
    assert_eq!(TapKind::Promise.method(), "tapPromise");
}
