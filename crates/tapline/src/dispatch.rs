// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Calling-convention surfaces and their lazily compiled dispatchers.
//!
//! A hook exposes three surfaces: `call`, `call_async` and `promise`. Each
//! one owns a slot that is either `Uncompiled` or holds the dispatcher built
//! for it by a [`Compiler`]. Any registration mutation resets all three
//! slots at once. A surface compiles again only when it is next invoked.

use crate::error::HookError;
use crate::interceptor::Interceptor;
use crate::tap::{BoxFuture, TapDescriptor};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Completion callback of the `call_async` surface.
pub type CallDone = Box<dyn FnOnce(Result<(), HookError>) + Send + 'static>;

pub type SyncDispatch<A> = dyn Fn(&A) -> Result<(), HookError> + Send + Sync;
pub type AsyncDispatch<A> = dyn Fn(A, CallDone) + Send + Sync;
pub type PromiseDispatch<A> = dyn Fn(A) -> BoxFuture<Result<(), HookError>> + Send + Sync;

/// Calling convention of a surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CallKind {
    Sync,
    Async,
    Promise,
}

impl CallKind {
    pub const ALL: [CallKind; 3] = [CallKind::Sync, CallKind::Async, CallKind::Promise];

    /// Name of the invocation surface.
    pub fn surface(self) -> &'static str {
        match self {
            CallKind::Sync => "call",
            CallKind::Async => "callAsync",
            CallKind::Promise => "promise",
        }
    }
}

impl fmt::Display for CallKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CallKind::Sync => "sync",
            CallKind::Async => "async",
            CallKind::Promise => "promise",
        };
        f.write_str(s)
    }
}

/// A compiled invocation function for one calling convention.
pub enum Dispatcher<A> {
    Sync(Arc<SyncDispatch<A>>),
    Async(Arc<AsyncDispatch<A>>),
    Promise(Arc<PromiseDispatch<A>>),
}

impl<A> Dispatcher<A> {
    pub fn sync<F>(f: F) -> Self
    where
        F: Fn(&A) -> Result<(), HookError> + Send + Sync + 'static,
    {
        Dispatcher::Sync(Arc::new(f))
    }

    pub fn from_async<F>(f: F) -> Self
    where
        F: Fn(A, CallDone) + Send + Sync + 'static,
    {
        Dispatcher::Async(Arc::new(f))
    }

    pub fn promise<F>(f: F) -> Self
    where
        F: Fn(A) -> BoxFuture<Result<(), HookError>> + Send + Sync + 'static,
    {
        Dispatcher::Promise(Arc::new(f))
    }

    pub fn kind(&self) -> CallKind {
        match self {
            Dispatcher::Sync(_) => CallKind::Sync,
            Dispatcher::Async(_) => CallKind::Async,
            Dispatcher::Promise(_) => CallKind::Promise,
        }
    }
}

impl<A> Clone for Dispatcher<A> {
    fn clone(&self) -> Self {
        match self {
            Dispatcher::Sync(f) => Dispatcher::Sync(Arc::clone(f)),
            Dispatcher::Async(f) => Dispatcher::Async(Arc::clone(f)),
            Dispatcher::Promise(f) => Dispatcher::Promise(Arc::clone(f)),
        }
    }
}

impl<A> fmt::Debug for Dispatcher<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Dispatcher::{}", self.kind())
    }
}

/// Snapshot handed to a compiler.
pub struct CompileRequest<A> {
    pub taps: Vec<TapDescriptor<A>>,
    pub interceptors: Vec<Interceptor<A>>,
    pub args: Vec<String>,
    pub kind: CallKind,
}

/// Builds dispatchers from a tap snapshot.
///
/// Must return a dispatcher of the requested [`CallKind`]. It is called at
/// most once per surface between two mutations of the hook.
pub trait Compiler<A>: Send + Sync {
    fn compile(&self, request: CompileRequest<A>) -> Dispatcher<A>;
}

impl<A, F> Compiler<A> for F
where
    F: Fn(CompileRequest<A>) -> Dispatcher<A> + Send + Sync,
{
    fn compile(&self, request: CompileRequest<A>) -> Dispatcher<A> {
        self(request)
    }
}

/// State of one surface.
enum Slot<A> {
    Uncompiled,
    Compiled(Dispatcher<A>),
}

/// The three surface slots of a hook.
pub struct DispatchCache<A> {
    call: Slot<A>,
    call_async: Slot<A>,
    promise: Slot<A>,
}

impl<A> DispatchCache<A> {
    pub fn new() -> Self {
        Self {
            call: Slot::Uncompiled,
            call_async: Slot::Uncompiled,
            promise: Slot::Uncompiled,
        }
    }

    /// Drop every compiled dispatcher.
    pub fn reset(&mut self) {
        self.call = Slot::Uncompiled;
        self.call_async = Slot::Uncompiled;
        self.promise = Slot::Uncompiled;
        tracing::trace!("dispatch surfaces reset");
    }

    pub fn is_compiled(&self, kind: CallKind) -> bool {
        matches!(self.slot(kind), Slot::Compiled(_))
    }

    /// Return the cached dispatcher for `kind`, compiling it first if needed.
    ///
    /// A dispatcher of the wrong kind is refused and the slot stays
    /// uncompiled.
    pub fn resolve<F>(&mut self, kind: CallKind, compile: F) -> Result<Dispatcher<A>, HookError>
    where
        F: FnOnce(CallKind) -> Result<Dispatcher<A>, HookError>,
    {
        if let Slot::Compiled(dispatcher) = self.slot(kind) {
            return Ok(dispatcher.clone());
        }

        let dispatcher = compile(kind)?;
        if dispatcher.kind() != kind {
            return Err(HookError::DispatcherMismatch {
                expected: kind,
                found: dispatcher.kind(),
            });
        }
        *self.slot_mut(kind) = Slot::Compiled(dispatcher.clone());
        Ok(dispatcher)
    }

    fn slot(&self, kind: CallKind) -> &Slot<A> {
        match kind {
            CallKind::Sync => &self.call,
            CallKind::Async => &self.call_async,
            CallKind::Promise => &self.promise,
        }
    }

    fn slot_mut(&mut self, kind: CallKind) -> &mut Slot<A> {
        match kind {
            CallKind::Sync => &mut self.call,
            CallKind::Async => &mut self.call_async,
            CallKind::Promise => &mut self.promise,
        }
    }
}

impl<A> Default for DispatchCache<A> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "dispatch_tests.rs"]
mod tests;
