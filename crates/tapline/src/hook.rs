// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! The hook registry and its registration API.

use crate::dispatch::{CallKind, CompileRequest, Compiler, DispatchCache, Dispatcher};
use crate::error::HookError;
use crate::interceptor::{Interceptor, InterceptorChain};
use crate::order;
use crate::tap::{BoxFuture, TapCallback, TapDescriptor, TapDone, TapOptions};
use parking_lot::Mutex;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

/// Registration API shared by hooks, hook variants and derived views.
pub trait Tappable {
    type Args;

    /// The registry this handle registers into.
    fn hook(&self) -> &Hook<Self::Args>;

    /// Register `callback` with `options`. Every `tap*` method funnels here.
    fn register(
        &self,
        options: TapOptions,
        callback: TapCallback<Self::Args>,
    ) -> Result<(), HookError>;

    /// Register a synchronous tap.
    fn tap<O, F>(&self, options: O, f: F) -> Result<(), HookError>
    where
        Self: Sized,
        O: Into<TapOptions>,
        F: Fn(&Self::Args) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.register(options.into(), TapCallback::sync(f))
    }

    /// Register a callback-style asynchronous tap.
    fn tap_async<O, F>(&self, options: O, f: F) -> Result<(), HookError>
    where
        Self: Sized,
        O: Into<TapOptions>,
        F: Fn(&Self::Args, TapDone) + Send + Sync + 'static,
    {
        self.register(options.into(), TapCallback::from_async(f))
    }

    /// Register a future-returning tap.
    fn tap_promise<O, F, Fut>(&self, options: O, f: F) -> Result<(), HookError>
    where
        Self: Sized,
        O: Into<TapOptions>,
        F: Fn(&Self::Args) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        self.register(options.into(), TapCallback::promise(f))
    }

    fn intercept(&self, interceptor: Interceptor<Self::Args>) {
        self.hook().intercept(interceptor);
    }

    fn is_used(&self) -> bool {
        self.hook().is_used()
    }

    fn call(&self, args: &Self::Args) -> Result<(), HookError> {
        self.hook().call(args)
    }

    fn call_async<D>(&self, args: Self::Args, done: D)
    where
        Self: Sized,
        D: FnOnce(Result<(), HookError>) + Send + 'static,
    {
        self.hook().call_async(args, done);
    }

    fn promise(&self, args: Self::Args) -> BoxFuture<Result<(), HookError>> {
        self.hook().promise(args)
    }
}

struct HookState<A> {
    taps: Vec<TapDescriptor<A>>,
    interceptors: InterceptorChain<A>,
    cache: DispatchCache<A>,
}

struct Shared<A> {
    name: Option<String>,
    args: Vec<String>,
    compiler: Option<Arc<dyn Compiler<A>>>,
    state: Mutex<HookState<A>>,
}

/// A named extension point holding an ordered sequence of taps.
///
/// `Hook` is a handle: clones share taps, interceptors and compiled
/// dispatchers. All state sits behind one lock. Interceptor transforms and
/// compilers run while it is held and must not call back into the hook;
/// taps run after it is released.
pub struct Hook<A> {
    shared: Arc<Shared<A>>,
}

/// Builder for [`Hook`].
pub struct HookBuilder<A> {
    name: Option<String>,
    args: Vec<String>,
    compiler: Option<Arc<dyn Compiler<A>>>,
}

impl<A> HookBuilder<A> {
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Declared parameter names. Passed to the compiler as metadata only.
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_compiler(mut self, compiler: impl Compiler<A> + 'static) -> Self {
        self.compiler = Some(Arc::new(compiler));
        self
    }

    pub fn build(self) -> Hook<A> {
        Hook {
            shared: Arc::new(Shared {
                name: self.name,
                args: self.args,
                compiler: self.compiler,
                state: Mutex::new(HookState {
                    taps: Vec::new(),
                    interceptors: InterceptorChain::new(),
                    cache: DispatchCache::new(),
                }),
            }),
        }
    }
}

impl<A> Hook<A> {
    pub fn builder() -> HookBuilder<A> {
        HookBuilder {
            name: None,
            args: Vec::new(),
            compiler: None,
        }
    }

    /// A hook without a compile strategy. Invoking it fails with
    /// [`HookError::AbstractMethod`].
    pub fn new<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::builder().with_args(args).build()
    }

    pub fn with_compiler<I, S>(args: I, compiler: impl Compiler<A> + 'static) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::builder()
            .with_args(args)
            .with_compiler(compiler)
            .build()
    }

    pub fn name(&self) -> Option<&str> {
        self.shared.name.as_deref()
    }

    pub fn args(&self) -> &[String] {
        &self.shared.args
    }

    /// Snapshot of the resolved tap sequence.
    pub fn taps(&self) -> Vec<TapDescriptor<A>> {
        self.shared.state.lock().taps.clone()
    }

    pub fn interceptors(&self) -> Vec<Interceptor<A>> {
        self.shared.state.lock().interceptors.snapshot()
    }

    pub fn is_used(&self) -> bool {
        let state = self.shared.state.lock();
        !state.taps.is_empty() || !state.interceptors.is_empty()
    }

    pub fn is_compiled(&self, kind: CallKind) -> bool {
        self.shared.state.lock().cache.is_compiled(kind)
    }

    /// Discard every compiled dispatcher.
    pub fn reset_compilation(&self) {
        self.shared.state.lock().cache.reset();
    }

    /// Validate, intercept and place a new tap.
    pub fn add_tap(
        &self,
        options: TapOptions,
        callback: TapCallback<A>,
    ) -> Result<(), HookError> {
        let tap = options.into_descriptor(callback)?;

        let mut state = self.shared.state.lock();
        let tap = state.interceptors.run_register(tap);
        let (name, kind, stage) = (tap.name.clone(), tap.kind(), tap.stage);
        let index = order::insert(&mut state.taps, tap);
        state.cache.reset();

        tracing::debug!(
            hook = self.name().unwrap_or_default(),
            tap = %name,
            %kind,
            stage,
            index,
            "tap registered"
        );
        Ok(())
    }

    /// Add an interceptor and apply it to the taps already present.
    pub fn intercept(&self, interceptor: Interceptor<A>) {
        let mut state = self.shared.state.lock();
        let state = &mut *state;
        state.cache.reset();

        tracing::debug!(
            hook = self.name().unwrap_or_default(),
            interceptor = interceptor.name.as_deref().unwrap_or_default(),
            existing_taps = state.taps.len(),
            "interceptor registered"
        );
        state.interceptors.add(interceptor, &mut state.taps);
    }

    /// Invoke the synchronous surface.
    pub fn call(&self, args: &A) -> Result<(), HookError> {
        match self.dispatcher(CallKind::Sync)? {
            Dispatcher::Sync(dispatch) => dispatch(args),
            other => Err(mismatch(CallKind::Sync, &other)),
        }
    }

    /// Invoke the callback surface. `done` runs exactly once.
    pub fn call_async<D>(&self, args: A, done: D)
    where
        D: FnOnce(Result<(), HookError>) + Send + 'static,
    {
        match self.dispatcher(CallKind::Async) {
            Ok(Dispatcher::Async(dispatch)) => dispatch(args, Box::new(done)),
            Ok(other) => done(Err(mismatch(CallKind::Async, &other))),
            Err(e) => done(Err(e)),
        }
    }

    /// Invoke the future surface.
    pub fn promise(&self, args: A) -> BoxFuture<Result<(), HookError>> {
        match self.dispatcher(CallKind::Promise) {
            Ok(Dispatcher::Promise(dispatch)) => dispatch(args),
            Ok(other) => Box::pin(std::future::ready(Err(mismatch(
                CallKind::Promise,
                &other,
            )))),
            Err(e) => Box::pin(std::future::ready(Err(e))),
        }
    }

    fn dispatcher(&self, kind: CallKind) -> Result<Dispatcher<A>, HookError> {
        let mut state = self.shared.state.lock();
        let state = &mut *state;
        state.cache.resolve(kind, |kind| {
            let compiler = self
                .shared
                .compiler
                .as_ref()
                .ok_or(HookError::AbstractMethod)?;
            tracing::debug!(
                hook = self.name().unwrap_or_default(),
                surface = kind.surface(),
                taps = state.taps.len(),
                "compiling dispatcher"
            );
            Ok(compiler.compile(CompileRequest {
                taps: state.taps.clone(),
                interceptors: state.interceptors.snapshot(),
                args: self.shared.args.clone(),
                kind,
            }))
        })
    }
}

fn mismatch<A>(expected: CallKind, found: &Dispatcher<A>) -> HookError {
    HookError::DispatcherMismatch {
        expected,
        found: found.kind(),
    }
}

impl<A> Tappable for Hook<A> {
    type Args = A;

    fn hook(&self) -> &Hook<A> {
        self
    }

    fn register(&self, options: TapOptions, callback: TapCallback<A>) -> Result<(), HookError> {
        self.add_tap(options, callback)
    }
}

impl<A> Default for Hook<A> {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl<A> Clone for Hook<A> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<A> fmt::Debug for Hook<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.shared.state.lock();
        f.debug_struct("Hook")
            .field("name", &self.shared.name)
            .field("args", &self.shared.args)
            .field("taps", &state.taps)
            .field("interceptors", &state.interceptors.len())
            .finish()
    }
}

#[cfg(test)]
#[path = "hook_tests.rs"]
mod tests;
