// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Transition functions: pure `(state, action) -> state` rules that parameterize the engine.
//!
//! ## Overview
//!
//! A [`Transition`] must be deterministic and side-effect free. It is total
//! over the action tags it claims to support and returns
//! [`Error::UnsupportedAction`] for anything else.
//!
//! Any closure of the shape `Fn(&S, &Action<S, X>) -> Result<S, Error>` is a
//! transition, so overriding the default is a matter of writing a function
//! that handles the cases it cares about and delegates the rest to
//! [`toggle_reducer`]:
//!
//! ```
//! use understory_control::action::Action;
//! use understory_control::transition::{toggle_reducer, ToggleState, Transition};
//! use understory_control::Error;
//!
//! let clicked_too_much = true;
//! let capped = move |s: &ToggleState, a: &Action<ToggleState>| -> Result<ToggleState, Error> {
//!     if a.is_toggle() && clicked_too_much {
//!         return Ok(*s);
//!     }
//!     toggle_reducer(s, a)
//! };
//!
//! let off = ToggleState { on: false };
//! assert_eq!(capped.transition(&off, &Action::Toggle).unwrap(), off);
//! ```

use alloc::format;
use core::convert::Infallible;
use core::fmt::Debug;

use crate::action::Action;
use crate::error::Error;

/// A pure state-update rule.
pub trait Transition<S, X = Infallible> {
    /// Compute the next state for `action` applied to `state`.
    fn transition(&self, state: &S, action: &Action<S, X>) -> Result<S, Error>;
}

impl<S, X, F> Transition<S, X> for F
where
    F: Fn(&S, &Action<S, X>) -> Result<S, Error>,
{
    #[inline]
    fn transition(&self, state: &S, action: &Action<S, X>) -> Result<S, Error> {
        self(state, action)
    }
}

/// States the default reducer knows how to flip.
pub trait Flip {
    /// Whether the state is currently "on".
    fn is_on(&self) -> bool;
    /// Return a copy of this state with the on flag inverted.
    fn flipped(&self) -> Self;
}

/// The state used by the toggle engines: a single `on` flag.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ToggleState {
    /// Whether the toggle is on.
    pub on: bool,
}

impl ToggleState {
    /// Create a toggle state with the given flag.
    pub const fn new(on: bool) -> Self {
        Self { on }
    }
}

impl Flip for ToggleState {
    fn is_on(&self) -> bool {
        self.on
    }

    fn flipped(&self) -> Self {
        Self { on: !self.on }
    }
}

impl Flip for bool {
    fn is_on(&self) -> bool {
        *self
    }

    fn flipped(&self) -> Self {
        !*self
    }
}

/// The built-in transition.
///
/// - [`Action::Toggle`] flips the state.
/// - [`Action::Reset`] returns the payload unchanged.
/// - [`Action::Custom`] is not recognized and yields [`Error::UnsupportedAction`].
pub fn toggle_reducer<S, X>(state: &S, action: &Action<S, X>) -> Result<S, Error>
where
    S: Flip + Clone,
    X: Debug,
{
    match action {
        Action::Toggle => Ok(state.flipped()),
        Action::Reset(initial) => Ok(initial.clone()),
        Action::Custom(x) => Err(Error::UnsupportedAction {
            action: format!("Custom({x:?})"),
        }),
    }
}
