// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Sequential-invocation compile strategy.
//!
//! Taps run one at a time in resolved order. Each tap completes before the
//! next one starts, on every surface. The first failure aborts the rest of
//! the sequence and is reported once through the surface's own channel.
//!
//! On the callback surface a tap that completes before returning is followed
//! in place, so long chains of such taps do not grow the stack.

use crate::dispatch::{CallDone, CallKind, CompileRequest, Compiler, Dispatcher};
use crate::error::HookError;
use crate::tap::{BoxFuture, TapCallback, TapDescriptor};
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::sync::oneshot;

/// Compiles dispatchers that run taps in series and ignore their results.
#[derive(Clone, Copy, Debug, Default)]
pub struct SeriesCompiler;

impl<A> Compiler<A> for SeriesCompiler
where
    A: Send + Sync + 'static,
{
    fn compile(&self, request: CompileRequest<A>) -> Dispatcher<A> {
        let CompileRequest { taps, kind, .. } = request;
        let taps: Arc<[TapDescriptor<A>]> = taps.into();

        match kind {
            CallKind::Sync => Dispatcher::sync(move |args: &A| run_sync(&taps, args)),
            CallKind::Async => Dispatcher::from_async(move |args: A, done: CallDone| {
                run_async(Run {
                    taps: Arc::clone(&taps),
                    index: 0,
                    args: Arc::new(args),
                    done,
                })
            }),
            CallKind::Promise => {
                Dispatcher::promise(move |args: A| -> BoxFuture<Result<(), HookError>> {
                    Box::pin(run_promise(Arc::clone(&taps), args))
                })
            }
        }
    }
}

fn run_sync<A>(taps: &[TapDescriptor<A>], args: &A) -> Result<(), HookError> {
    // Refuse up front so no tap runs when the sequence cannot complete.
    if let Some(tap) = taps.iter().find(|t| !matches!(t.callback, TapCallback::Sync(_))) {
        return Err(HookError::IncompatibleTap {
            tap: tap.name.clone(),
            kind: tap.kind(),
            surface: CallKind::Sync,
        });
    }

    for tap in taps {
        if let TapCallback::Sync(f) = &tap.callback {
            f(args).map_err(|e| HookError::tap_failed(&tap.name, e))?;
        }
    }
    Ok(())
}

/// Position of one `call_async` run through the tap sequence.
struct Run<A> {
    taps: Arc<[TapDescriptor<A>]>,
    index: usize,
    args: Arc<A>,
    done: CallDone,
}

impl<A> Run<A> {
    fn next(self) -> Self {
        Self {
            index: self.index + 1,
            ..self
        }
    }
}

/// Meeting point between the loop that started a tap and the tap's
/// completion, which may arrive before or after the tap returns.
enum Handoff<A> {
    /// The tap has not returned and has not completed.
    Running,
    /// Completed while the loop still owned the run.
    Finished(Result<(), HookError>),
    /// The loop left; whoever completes the tap resumes the run.
    Suspended(Run<A>),
    Resumed,
}

/// Completion guard handed to a tap. Settles the handoff exactly once, with
/// `CallbackDropped` if it is dropped without being called.
struct Completion<A: Send + Sync + 'static> {
    handoff: Arc<Mutex<Handoff<A>>>,
    tap: String,
    settled: bool,
}

impl<A: Send + Sync + 'static> Completion<A> {
    fn new(handoff: Handoff<A>, tap: &str) -> Self {
        Self {
            handoff: Arc::new(Mutex::new(handoff)),
            tap: tap.to_string(),
            settled: false,
        }
    }

    fn finish(mut self, result: anyhow::Result<()>) {
        let outcome = result.map_err(|e| HookError::tap_failed(&self.tap, e));
        self.settle(outcome);
    }

    fn settle(&mut self, outcome: Result<(), HookError>) {
        self.settled = true;
        let run = {
            let mut slot = self.handoff.lock();
            match std::mem::replace(&mut *slot, Handoff::Resumed) {
                Handoff::Suspended(run) => run,
                Handoff::Running => {
                    *slot = Handoff::Finished(outcome);
                    return;
                }
                other => {
                    *slot = other;
                    return;
                }
            }
        };
        match outcome {
            Ok(()) => run_async(run.next()),
            Err(e) => (run.done)(Err(e)),
        }
    }
}

impl<A: Send + Sync + 'static> Drop for Completion<A> {
    fn drop(&mut self) {
        if !self.settled {
            let tap = self.tap.clone();
            self.settle(Err(HookError::CallbackDropped { tap }));
        }
    }
}

fn run_async<A>(mut run: Run<A>)
where
    A: Send + Sync + 'static,
{
    let taps = Arc::clone(&run.taps);
    while let Some(tap) = taps.get(run.index) {
        match &tap.callback {
            TapCallback::Sync(f) => {
                if let Err(e) = f(run.args.as_ref()) {
                    (run.done)(Err(HookError::tap_failed(&tap.name, e)));
                    return;
                }
            }
            TapCallback::Async(f) => {
                let completion = Completion::new(Handoff::Running, &tap.name);
                let handoff = Arc::clone(&completion.handoff);
                f(
                    run.args.as_ref(),
                    Box::new(move |result: anyhow::Result<()>| completion.finish(result)),
                );

                // Completed on this stack: keep looping instead of recursing.
                let mut slot = handoff.lock();
                match std::mem::replace(&mut *slot, Handoff::Resumed) {
                    Handoff::Finished(Ok(())) => {}
                    Handoff::Finished(Err(e)) => {
                        drop(slot);
                        (run.done)(Err(e));
                        return;
                    }
                    _ => {
                        *slot = Handoff::Suspended(run);
                        return;
                    }
                }
            }
            TapCallback::Promise(f) => {
                let Ok(runtime) = tokio::runtime::Handle::try_current() else {
                    (run.done)(Err(HookError::NoRuntime {
                        tap: tap.name.clone(),
                    }));
                    return;
                };
                let future = f(run.args.as_ref());
                let completion = Completion::new(Handoff::Suspended(run), &tap.name);
                runtime.spawn(async move {
                    let result = future.await;
                    completion.finish(result);
                });
                return;
            }
        }
        run.index += 1;
    }
    (run.done)(Ok(()));
}

async fn run_promise<A>(taps: Arc<[TapDescriptor<A>]>, args: A) -> Result<(), HookError>
where
    A: Send + Sync + 'static,
{
    for tap in taps.iter() {
        match &tap.callback {
            TapCallback::Sync(f) => f(&args).map_err(|e| HookError::tap_failed(&tap.name, e))?,
            TapCallback::Async(f) => {
                let (tx, rx) = oneshot::channel::<anyhow::Result<()>>();
                f(
                    &args,
                    Box::new(move |result: anyhow::Result<()>| {
                        let _ = tx.send(result);
                    }),
                );
                match rx.await {
                    Ok(result) => result.map_err(|e| HookError::tap_failed(&tap.name, e))?,
                    Err(_) => {
                        return Err(HookError::CallbackDropped {
                            tap: tap.name.clone(),
                        })
                    }
                }
            }
            TapCallback::Promise(f) => f(&args)
                .await
                .map_err(|e| HookError::tap_failed(&tap.name, e))?,
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "series_tests.rs"]
mod tests;
