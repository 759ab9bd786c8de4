// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property bags for binding an engine to an interactive element.
//!
//! ## Merge rules
//!
//! [`UserProps`] is what the caller brings: an optional handler for the
//! element's event and a pass-through bag `R` of anything else.
//! [`BoundProps`] is what the engine hands back: the engine's derived value,
//! one composed handler, and `R` returned unchanged.
//!
//! - The derived value and the handler are typed fields owned by the engine;
//!   the pass-through bag cannot override them.
//! - The caller's handler is never replaced. It runs first, then the
//!   engine's own handler (see [`call_all`](crate::handler::call_all)).

use crate::handler::Handler;

/// Properties supplied by the caller of a prop getter.
pub struct UserProps<E, R = ()> {
    /// The caller's own handler for the element's event.
    pub on_event: Option<Handler<E>>,
    /// Everything else, passed through untouched.
    pub rest: R,
}

impl<E, R: Default> Default for UserProps<E, R> {
    fn default() -> Self {
        Self {
            on_event: None,
            rest: R::default(),
        }
    }
}

impl<E, R> UserProps<E, R> {
    /// Caller props with only a pass-through bag.
    pub fn with_rest(rest: R) -> Self {
        Self {
            on_event: None,
            rest,
        }
    }

    /// Attach the caller's handler.
    pub fn on_event(mut self, h: Handler<E>) -> Self {
        self.on_event = Some(h);
        self
    }
}

impl<E, R: core::fmt::Debug> core::fmt::Debug for UserProps<E, R> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("UserProps")
            .field("on_event", &self.on_event.is_some())
            .field("rest", &self.rest)
            .finish()
    }
}

/// Properties ready to attach to an interactive element.
pub struct BoundProps<V, E, R = ()> {
    /// The engine's derived value (e.g. the pressed flag of a switch).
    pub value: V,
    /// Caller handler composed with the engine's handler.
    pub on_event: Handler<E>,
    /// The caller's pass-through bag.
    pub rest: R,
}

impl<V: core::fmt::Debug, E, R: core::fmt::Debug> core::fmt::Debug for BoundProps<V, E, R> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("BoundProps")
            .field("value", &self.value)
            .field("rest", &self.rest)
            .finish_non_exhaustive()
    }
}
