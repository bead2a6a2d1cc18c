// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Captured invocation records.

use serde::{Deserialize, Serialize};
use std::time::{Duration, SystemTime};
use tapline::TapKind;

/// One recorded tap invocation.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CapturedInvocation {
    /// Sequence number, in completion order
    pub seq: u64,

    /// Wall-clock time the invocation completed
    pub timestamp: SystemTime,

    /// Time since the log was created
    #[serde(rename = "elapsed_us", with = "micros")]
    pub elapsed: Duration,

    /// Name the capturing interceptor was created with
    pub hook: String,

    /// Name of the tap that ran
    pub tap: String,

    pub kind: TapKind,

    pub outcome: CapturedOutcome,
}

/// How a tap invocation ended.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CapturedOutcome {
    Completed,
    Failed { message: String },
}

impl CapturedOutcome {
    pub(crate) fn from_result<E: std::fmt::Display>(result: &Result<(), E>) -> Self {
        match result {
            Ok(()) => CapturedOutcome::Completed,
            Err(e) => CapturedOutcome::Failed {
                message: e.to_string(),
            },
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, CapturedOutcome::Failed { .. })
    }
}

/// Durations as whole microseconds.
mod micros {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let us = u64::try_from(duration.as_micros()).unwrap_or(u64::MAX);
        serializer.serialize_u64(us)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        u64::deserialize(deserializer).map(Duration::from_micros)
    }
}

#[cfg(test)]
#[path = "interaction_tests.rs"]
mod tests;
