// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Tap descriptors and registration options.

use crate::error::HookError;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// Boxed `'static` future used by promise taps and the promise surface.
pub type BoxFuture<T> = Pin<Box<dyn Future<Output = T> + Send + 'static>>;

/// Completion callback handed to async taps. Consumed on first call.
pub type TapDone = Box<dyn FnOnce(anyhow::Result<()>) + Send + 'static>;

pub type SyncTapFn<A> = dyn Fn(&A) -> anyhow::Result<()> + Send + Sync;
pub type AsyncTapFn<A> = dyn Fn(&A, TapDone) + Send + Sync;
pub type PromiseTapFn<A> = dyn Fn(&A) -> BoxFuture<anyhow::Result<()>> + Send + Sync;

/// Calling convention a tap was registered with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TapKind {
    Sync,
    Async,
    Promise,
}

impl TapKind {
    /// Registration method name for this kind, as used in error messages.
    pub fn method(self) -> &'static str {
        match self {
            TapKind::Sync => "tap",
            TapKind::Async => "tapAsync",
            TapKind::Promise => "tapPromise",
        }
    }
}

impl fmt::Display for TapKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TapKind::Sync => "sync",
            TapKind::Async => "async",
            TapKind::Promise => "promise",
        };
        f.write_str(s)
    }
}

/// The user-supplied callback of a tap.
pub enum TapCallback<A> {
    Sync(Arc<SyncTapFn<A>>),
    Async(Arc<AsyncTapFn<A>>),
    Promise(Arc<PromiseTapFn<A>>),
}

impl<A> TapCallback<A> {
    pub fn sync<F>(f: F) -> Self
    where
        F: Fn(&A) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        TapCallback::Sync(Arc::new(f))
    }

    pub fn from_async<F>(f: F) -> Self
    where
        F: Fn(&A, TapDone) + Send + Sync + 'static,
    {
        TapCallback::Async(Arc::new(f))
    }

    pub fn promise<F, Fut>(f: F) -> Self
    where
        F: Fn(&A) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        TapCallback::Promise(Arc::new(move |args: &A| -> BoxFuture<anyhow::Result<()>> {
            Box::pin(f(args))
        }))
    }

    pub fn kind(&self) -> TapKind {
        match self {
            TapCallback::Sync(_) => TapKind::Sync,
            TapCallback::Async(_) => TapKind::Async,
            TapCallback::Promise(_) => TapKind::Promise,
        }
    }
}

impl<A> Clone for TapCallback<A> {
    fn clone(&self) -> Self {
        match self {
            TapCallback::Sync(f) => TapCallback::Sync(Arc::clone(f)),
            TapCallback::Async(f) => TapCallback::Async(Arc::clone(f)),
            TapCallback::Promise(f) => TapCallback::Promise(Arc::clone(f)),
        }
    }
}

impl<A> fmt::Debug for TapCallback<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TapCallback::{}", self.kind())
    }
}

/// A registered tap: callback plus ordering metadata.
///
/// Identity is positional. Several taps may share a name.
pub struct TapDescriptor<A> {
    pub name: String,
    pub stage: i32,
    pub before: Vec<String>,
    pub context: bool,
    pub callback: TapCallback<A>,
}

impl<A> TapDescriptor<A> {
    /// Calling convention, derived from the callback.
    pub fn kind(&self) -> TapKind {
        self.callback.kind()
    }
}

impl<A> Clone for TapDescriptor<A> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            stage: self.stage,
            before: self.before.clone(),
            context: self.context,
            callback: self.callback.clone(),
        }
    }
}

impl<A> fmt::Debug for TapDescriptor<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TapDescriptor")
            .field("name", &self.name)
            .field("kind", &self.kind())
            .field("stage", &self.stage)
            .field("before", &self.before)
            .field("context", &self.context)
            .finish()
    }
}

/// Caller-facing registration options.
///
/// A bare name converts into `{ name }`. Unset fields fall back to defaults
/// when merged through a derived view, and to `stage = 0`, no `before`
/// constraint and `context = false` at registration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TapOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stage: Option<i32>,

    /// Names this tap must precede. Accepts a single string or a list.
    #[serde(
        default,
        deserialize_with = "one_or_many",
        skip_serializing_if = "Option::is_none"
    )]
    pub before: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<bool>,
}

impl TapOptions {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn with_stage(mut self, stage: i32) -> Self {
        self.stage = Some(stage);
        self
    }

    /// Add one name to the `before` constraint.
    pub fn with_before(mut self, name: impl Into<String>) -> Self {
        self.before.get_or_insert_with(Vec::new).push(name.into());
        self
    }

    pub fn with_context(mut self, context: bool) -> Self {
        self.context = Some(context);
        self
    }

    /// Build options from a dynamically typed descriptor passed to the
    /// registration method for `kind`.
    ///
    /// A string is a bare name, an object is a full record. Anything else is
    /// rejected, naming that registration method.
    pub fn from_value(kind: TapKind, value: serde_json::Value) -> Result<Self, HookError> {
        let method = kind.method();
        match value {
            serde_json::Value::String(name) => Ok(Self::new(name)),
            value @ serde_json::Value::Object(_) => serde_json::from_value(value)
                .map_err(|e| HookError::invalid(method, e.to_string())),
            other => Err(HookError::invalid(
                method,
                format!("expected a name or an options object, got {other}"),
            )),
        }
    }

    /// Fill every unset field from `defaults`. Fields already set win.
    pub fn merge_defaults(self, defaults: &TapOptions) -> Self {
        Self {
            name: self.name.or_else(|| defaults.name.clone()),
            stage: self.stage.or(defaults.stage),
            before: self.before.or_else(|| defaults.before.clone()),
            context: self.context.or(defaults.context),
        }
    }

    /// Validate and resolve into a descriptor for `callback`.
    pub(crate) fn into_descriptor<A>(
        self,
        callback: TapCallback<A>,
    ) -> Result<TapDescriptor<A>, HookError> {
        let method = callback.kind().method();
        let name = match self.name {
            Some(name) if !name.is_empty() => name,
            _ => {
                return Err(HookError::invalid(
                    method,
                    format!("Missing name for {method}"),
                ))
            }
        };
        Ok(TapDescriptor {
            name,
            stage: self.stage.unwrap_or(0),
            before: self.before.unwrap_or_default(),
            context: self.context.unwrap_or(false),
            callback,
        })
    }
}

impl From<&str> for TapOptions {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for TapOptions {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

impl From<&String> for TapOptions {
    fn from(name: &String) -> Self {
        Self::new(name.as_str())
    }
}

fn one_or_many<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(Option::<OneOrMany>::deserialize(deserializer)?.map(|v| match v {
        OneOrMany::One(name) => vec![name],
        OneOrMany::Many(names) => names,
    }))
}

#[cfg(test)]
#[path = "tap_tests.rs"]
mod tests;
