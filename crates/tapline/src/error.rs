// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for hook registration, compilation and invocation.

use crate::dispatch::CallKind;
use crate::tap::TapKind;
use thiserror::Error;

/// Errors raised by hooks.
#[derive(Debug, Error)]
pub enum HookError {
    /// Malformed registration descriptor.
    #[error("Invalid arguments to {method}: {reason}")]
    InvalidArgument {
        method: &'static str,
        reason: String,
    },

    /// Registration method the hook variant does not support.
    #[error("{method} is not supported on a {hook}{}", named(.name))]
    UnsupportedOperation {
        method: &'static str,
        hook: &'static str,
        name: Option<String>,
    },

    /// The hook was invoked but no compile strategy was ever supplied.
    #[error("Abstract: hook has no compiler")]
    AbstractMethod,

    /// The compiler returned a dispatcher for the wrong calling convention.
    #[error("Compiler returned a {found} dispatcher for a {expected} call")]
    DispatcherMismatch { expected: CallKind, found: CallKind },

    /// A tap cannot run through the surface that was invoked.
    #[error("Tap '{tap}' is {kind} and cannot run through the {surface} surface")]
    IncompatibleTap {
        tap: String,
        kind: TapKind,
        surface: CallKind,
    },

    /// A tap reported failure.
    #[error("Tap '{tap}' failed: {source}")]
    TapFailed {
        tap: String,
        #[source]
        source: anyhow::Error,
    },

    /// An async tap dropped its completion callback without calling it.
    #[error("Tap '{tap}' dropped its completion callback")]
    CallbackDropped { tap: String },

    /// A promise tap was reached outside a tokio runtime.
    #[error("Tap '{tap}' returned a future but no tokio runtime is running")]
    NoRuntime { tap: String },
}

impl HookError {
    pub(crate) fn invalid(method: &'static str, reason: impl Into<String>) -> Self {
        HookError::InvalidArgument {
            method,
            reason: reason.into(),
        }
    }

    pub(crate) fn tap_failed(tap: &str, source: anyhow::Error) -> Self {
        HookError::TapFailed {
            tap: tap.to_string(),
            source,
        }
    }
}

fn named(name: &Option<String>) -> String {
    name.as_deref()
        .map(|n| format!(" '{n}'"))
        .unwrap_or_default()
}

/// Errors raised while loading ordering configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(String),

    #[error("Unsupported config format: {0}")]
    UnsupportedFormat(String),
}
