// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Tap invocation capture for tapline hooks.
//!
//! Add [`capture_interceptor`] to a hook and every tap it runs, on any
//! surface, is recorded in a [`CaptureLog`] with its outcome. Useful for
//! asserting the order plugins actually ran in.

mod interaction;
mod interceptor;
mod log;

pub use interaction::{CapturedInvocation, CapturedOutcome};
pub use interceptor::capture_interceptor;
pub use log::CaptureLog;
