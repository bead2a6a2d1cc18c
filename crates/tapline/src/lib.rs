// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Ordered extension-point hooks.
//!
//! A [`Hook`] is a named extension point. Plugins register taps on it with a
//! name, an optional `stage` and an optional `before` list, and the hook keeps
//! them in one resolved order. Interceptors may rewrite every tap as it is
//! registered, including taps that were registered before the interceptor.
//!
//! Invocation goes through one of three surfaces: [`Hook::call`],
//! [`Hook::call_async`] and [`Hook::promise`]. Each surface is compiled into a
//! dispatcher the first time it is used and reused until the next mutation.
//! How the dispatcher runs the taps is decided by a [`Compiler`];
//! [`SeriesCompiler`] runs them one after another.
//!
//! ```
//! use tapline::prelude::*;
//!
//! let hook: SyncHook<String> = SyncHook::new(["compilation"]);
//! hook.tap("logger", |name: &String| {
//!     println!("compiled {name}");
//!     Ok(())
//! })?;
//! hook.tap(TapOptions::new("first").with_stage(-10), |_: &String| Ok(()))?;
//! hook.call(&"main".to_string())?;
//! # Ok::<(), tapline::HookError>(())
//! ```

pub mod config;
pub mod dispatch;
pub mod error;
pub mod hook;
pub mod interceptor;
pub mod order;
pub mod series;
pub mod sync_hook;
pub mod tap;
pub mod view;

pub use config::OrderingConfig;
pub use dispatch::{CallDone, CallKind, CompileRequest, Compiler, DispatchCache, Dispatcher};
pub use error::{ConfigError, HookError};
pub use hook::{Hook, HookBuilder, Tappable};
pub use interceptor::{Interceptor, InterceptorChain};
pub use series::SeriesCompiler;
pub use sync_hook::SyncHook;
pub use tap::{BoxFuture, TapCallback, TapDescriptor, TapDone, TapKind, TapOptions};
pub use view::HookView;

/// Types needed to declare, tap and invoke hooks.
pub mod prelude {
    pub use crate::{
        CallKind, Hook, HookError, HookView, Interceptor, SeriesCompiler, SyncHook, TapDescriptor,
        TapDone, TapOptions, Tappable,
    };
}
