// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Strictly synchronous hook.

use crate::error::HookError;
use crate::hook::{Hook, HookBuilder, Tappable};
use crate::series::SeriesCompiler;
use crate::tap::{TapCallback, TapKind, TapOptions};
use crate::view::HookView;
use std::fmt;

const VARIANT: &str = "SyncHook";

/// A hook that only accepts synchronous taps and runs them in series.
///
/// `tap_async` and `tap_promise` always fail with
/// [`HookError::UnsupportedOperation`]. All three surfaces can still be
/// invoked; they run the synchronous taps in order.
pub struct SyncHook<A> {
    hook: Hook<A>,
}

impl<A> SyncHook<A>
where
    A: Send + Sync + 'static,
{
    pub fn new<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::from_builder(Hook::builder().with_args(args))
    }

    /// A hook carrying `name` in diagnostics.
    pub fn named<I, S>(name: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::from_builder(Hook::builder().with_name(name).with_args(args))
    }

    fn from_builder(builder: HookBuilder<A>) -> Self {
        Self {
            hook: builder.with_compiler(SeriesCompiler).build(),
        }
    }
}

impl<A> SyncHook<A> {
    /// Derive a view that applies `defaults` to every registration.
    pub fn with_options(&self, defaults: impl Into<TapOptions>) -> HookView<SyncHook<A>> {
        HookView::new(self.clone(), defaults.into())
    }
}

impl<A> Tappable for SyncHook<A> {
    type Args = A;

    fn hook(&self) -> &Hook<A> {
        &self.hook
    }

    fn register(&self, options: TapOptions, callback: TapCallback<A>) -> Result<(), HookError> {
        match callback.kind() {
            TapKind::Sync => self.hook.add_tap(options, callback),
            kind => Err(HookError::UnsupportedOperation {
                method: kind.method(),
                hook: VARIANT,
                name: self.hook.name().map(str::to_string),
            }),
        }
    }
}

impl<A> Clone for SyncHook<A> {
    fn clone(&self) -> Self {
        Self {
            hook: self.hook.clone(),
        }
    }
}

impl<A> fmt::Debug for SyncHook<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SyncHook").field(&self.hook).finish()
    }
}

#[cfg(test)]
#[path = "sync_hook_tests.rs"]
mod tests;
