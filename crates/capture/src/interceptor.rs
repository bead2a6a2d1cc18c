// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! An interceptor that records every tap invocation into a [`CaptureLog`].

use crate::interaction::CapturedOutcome;
use crate::log::CaptureLog;
use std::sync::Arc;
use tapline::{Interceptor, TapCallback, TapDescriptor, TapDone, TapKind};

/// Build an interceptor that wraps each tap so its invocations land in `log`.
///
/// Taps registered before the interceptor is added are wrapped too. Failures
/// are recorded and still returned to the hook unchanged.
pub fn capture_interceptor<A: 'static>(
    hook_name: impl Into<String>,
    log: CaptureLog,
) -> Interceptor<A> {
    let hook: Arc<str> = hook_name.into().into();
    Interceptor::new()
        .with_name(format!("capture:{hook}"))
        .with_register(move |tap: TapDescriptor<A>| {
            let recorder = Recorder {
                log: log.clone(),
                hook: Arc::clone(&hook),
                tap: tap.name.as_str().into(),
                kind: tap.kind(),
            };
            let callback = wrap(tap.callback.clone(), recorder);
            Some(TapDescriptor { callback, ..tap })
        })
}

/// Everything needed to record one tap's invocations.
#[derive(Clone)]
struct Recorder {
    log: CaptureLog,
    hook: Arc<str>,
    tap: Arc<str>,
    kind: TapKind,
}

impl Recorder {
    fn record(&self, result: &anyhow::Result<()>) {
        self.log.record(
            &self.hook,
            &self.tap,
            self.kind,
            CapturedOutcome::from_result(result),
        );
    }
}

fn wrap<A: 'static>(callback: TapCallback<A>, recorder: Recorder) -> TapCallback<A> {
    match callback {
        TapCallback::Sync(f) => TapCallback::sync(move |args: &A| {
            let result = f(args);
            recorder.record(&result);
            result
        }),
        TapCallback::Async(f) => TapCallback::from_async(move |args: &A, done: TapDone| {
            let recorder = recorder.clone();
            f(
                args,
                Box::new(move |result: anyhow::Result<()>| {
                    recorder.record(&result);
                    done(result);
                }),
            );
        }),
        TapCallback::Promise(f) => TapCallback::promise(move |args: &A| {
            let future = f(args);
            let recorder = recorder.clone();
            async move {
                let result = future.await;
                recorder.record(&result);
                result
            }
        }),
    }
}

#[cfg(test)]
#[path = "interceptor_tests.rs"]
mod tests;
