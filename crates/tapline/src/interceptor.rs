// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Interceptors that rewrite tap descriptors at registration time.

use crate::tap::TapDescriptor;
use std::fmt;
use std::sync::Arc;

pub type RegisterFn<A> = dyn Fn(TapDescriptor<A>) -> Option<TapDescriptor<A>> + Send + Sync;

/// A cross-cutting observer of a hook.
///
/// The only capability is `register`: a transform applied to each tap as it
/// is registered, and once to every tap already present when the interceptor
/// is added. Returning `None` keeps the descriptor unchanged.
pub struct Interceptor<A> {
    pub name: Option<String>,
    pub register: Option<Arc<RegisterFn<A>>>,
}

impl<A> Interceptor<A> {
    /// An interceptor with no capabilities.
    pub fn new() -> Self {
        Self {
            name: None,
            register: None,
        }
    }

    /// Set the name used in diagnostics.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the `register` transform.
    pub fn with_register<F>(mut self, register: F) -> Self
    where
        F: Fn(TapDescriptor<A>) -> Option<TapDescriptor<A>> + Send + Sync + 'static,
    {
        self.register = Some(Arc::new(register));
        self
    }

    /// Run the transform over one descriptor.
    pub fn apply(&self, tap: TapDescriptor<A>) -> TapDescriptor<A> {
        match &self.register {
            Some(register) => {
                let fallback = tap.clone();
                register(tap).unwrap_or(fallback)
            }
            None => tap,
        }
    }
}

impl<A> Default for Interceptor<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> Clone for Interceptor<A> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            register: self.register.as_ref().map(Arc::clone),
        }
    }
}

impl<A> fmt::Debug for Interceptor<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Interceptor")
            .field("name", &self.name)
            .field("register", &self.register.is_some())
            .finish()
    }
}

/// Ordered list of interceptors attached to one hook.
pub struct InterceptorChain<A> {
    interceptors: Vec<Interceptor<A>>,
}

impl<A> InterceptorChain<A> {
    pub fn new() -> Self {
        Self {
            interceptors: Vec::new(),
        }
    }

    /// Pass a new descriptor through every interceptor in registration order.
    pub fn run_register(&self, tap: TapDescriptor<A>) -> TapDescriptor<A> {
        self.interceptors
            .iter()
            .fold(tap, |tap, interceptor| interceptor.apply(tap))
    }

    /// Store `interceptor` and apply its transform to the existing `taps`.
    ///
    /// Order of `taps` is preserved. Their positions are not re-resolved even
    /// if the transform changes stage or name.
    pub fn add(&mut self, interceptor: Interceptor<A>, taps: &mut [TapDescriptor<A>]) {
        if let Some(register) = &interceptor.register {
            for slot in taps.iter_mut() {
                if let Some(replaced) = register(slot.clone()) {
                    *slot = replaced;
                }
            }
        }
        self.interceptors.push(interceptor);
    }

    pub fn snapshot(&self) -> Vec<Interceptor<A>> {
        self.interceptors.clone()
    }

    pub fn len(&self) -> usize {
        self.interceptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.interceptors.is_empty()
    }
}

impl<A> Default for InterceptorChain<A> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "interceptor_tests.rs"]
mod tests;
