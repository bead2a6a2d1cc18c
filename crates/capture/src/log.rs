// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Capture log implementation.

use crate::interaction::{CapturedInvocation, CapturedOutcome};
use parking_lot::Mutex;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::Arc;
use std::time::{Instant, SystemTime};
use tapline::TapKind;

/// Shared, thread-safe record of tap invocations.
///
/// Clones share the same records and file.
pub struct CaptureLog {
    start: Instant,
    invocations: Arc<Mutex<Vec<CapturedInvocation>>>,
    file_writer: Option<Arc<Mutex<BufWriter<File>>>>,
}

impl CaptureLog {
    /// Create a new in-memory capture log
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
            invocations: Arc::new(Mutex::new(Vec::new())),
            file_writer: None,
        }
    }

    /// Create a capture log that also appends each record to `path` as JSONL.
    pub fn with_file(path: &Path) -> std::io::Result<Self> {
        let file = File::create(path)?;
        Ok(Self {
            file_writer: Some(Arc::new(Mutex::new(BufWriter::new(file)))),
            ..Self::new()
        })
    }

    /// Record one finished invocation.
    pub fn record(&self, hook: &str, tap: &str, kind: TapKind, outcome: CapturedOutcome) {
        let mut invocations = self.invocations.lock();
        let invocation = CapturedInvocation {
            seq: invocations.len() as u64,
            timestamp: SystemTime::now(),
            elapsed: self.start.elapsed(),
            hook: hook.to_string(),
            tap: tap.to_string(),
            kind,
            outcome,
        };

        if let Some(ref writer) = self.file_writer {
            let mut w = writer.lock();
            let written = serde_json::to_string(&invocation)
                .map_err(std::io::Error::from)
                .and_then(|json| {
                    writeln!(w, "{json}")?;
                    w.flush()
                });
            if let Err(e) = written {
                tracing::warn!(hook, tap, error = %e, "failed to write capture record");
            }
        }

        invocations.push(invocation);
    }

    /// All captured invocations, oldest first.
    pub fn invocations(&self) -> Vec<CapturedInvocation> {
        self.invocations.lock().clone()
    }

    /// Get the last N invocations
    pub fn last(&self, n: usize) -> Vec<CapturedInvocation> {
        let all = self.invocations.lock();
        all.iter().rev().take(n).rev().cloned().collect()
    }

    /// Count invocations matching a predicate
    pub fn count<F: Fn(&CapturedInvocation) -> bool>(&self, pred: F) -> usize {
        self.invocations.lock().iter().filter(|i| pred(i)).count()
    }

    /// Tap names in invocation order.
    pub fn tap_order(&self) -> Vec<String> {
        self.invocations
            .lock()
            .iter()
            .map(|i| i.tap.clone())
            .collect()
    }

    pub fn find_by_tap(&self, tap: &str) -> Vec<CapturedInvocation> {
        self.filtered(|i| i.tap == tap)
    }

    pub fn find_by_hook(&self, hook: &str) -> Vec<CapturedInvocation> {
        self.filtered(|i| i.hook == hook)
    }

    /// Find invocations that reported failure
    pub fn find_failures(&self) -> Vec<CapturedInvocation> {
        self.filtered(|i| i.outcome.is_failure())
    }

    pub fn len(&self) -> usize {
        self.invocations.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.invocations.lock().is_empty()
    }

    /// Clear all recorded invocations. The file, if any, is left as is.
    pub fn clear(&self) {
        self.invocations.lock().clear();
    }

    fn filtered<F: Fn(&CapturedInvocation) -> bool>(&self, pred: F) -> Vec<CapturedInvocation> {
        self.invocations
            .lock()
            .iter()
            .filter(|i| pred(i))
            .cloned()
            .collect()
    }
}

impl Default for CaptureLog {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for CaptureLog {
    fn clone(&self) -> Self {
        Self {
            start: self.start,
            invocations: Arc::clone(&self.invocations),
            file_writer: self.file_writer.as_ref().map(Arc::clone),
        }
    }
}

impl std::fmt::Debug for CaptureLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CaptureLog")
            .field("invocations", &self.len())
            .field("file", &self.file_writer.is_some())
            .finish()
    }
}

#[cfg(test)]
#[path = "log_tests.rs"]
mod tests;
