// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Views that apply default tap options before forwarding to a base hook.

use crate::error::HookError;
use crate::hook::{Hook, Tappable};
use crate::tap::{TapCallback, TapOptions};

/// A registration facade over `base` that merges `defaults` into every
/// `tap*` call.
///
/// Views never stack: deriving from a view yields another view over the same
/// base with one merged defaults record.
#[derive(Clone, Debug)]
pub struct HookView<H> {
    base: H,
    defaults: TapOptions,
}

impl<H: Tappable> HookView<H> {
    pub(crate) fn new(base: H, defaults: TapOptions) -> Self {
        Self { base, defaults }
    }

    pub fn base(&self) -> &H {
        &self.base
    }

    pub fn defaults(&self) -> &TapOptions {
        &self.defaults
    }

    /// Derive again from the original base.
    ///
    /// Defaults already carried by this view take precedence over `defaults`.
    pub fn with_options(&self, defaults: impl Into<TapOptions>) -> HookView<H>
    where
        H: Clone,
    {
        let merged = self.defaults.clone().merge_defaults(&defaults.into());
        HookView::new(self.base.clone(), merged)
    }
}

impl<H: Tappable> Tappable for HookView<H> {
    type Args = H::Args;

    fn hook(&self) -> &Hook<H::Args> {
        self.base.hook()
    }

    fn register(
        &self,
        options: TapOptions,
        callback: TapCallback<H::Args>,
    ) -> Result<(), HookError> {
        self.base
            .register(options.merge_defaults(&self.defaults), callback)
    }
}

impl<A> Hook<A> {
    /// Derive a view that applies `defaults` to every registration.
    pub fn with_options(&self, defaults: impl Into<TapOptions>) -> HookView<Hook<A>> {
        HookView::new(self.clone(), defaults.into())
    }
}

#[cfg(test)]
#[path = "view_tests.rs"]
mod tests;
