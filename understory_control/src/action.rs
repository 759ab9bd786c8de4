// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Actions: the tagged inputs fed through a transition function.
//!
//! ## Overview
//!
//! [`Action`] carries the two built-in tags, [`Toggle`](Action::Toggle) and
//! [`Reset`](Action::Reset), plus a [`Custom`](Action::Custom) slot for
//! callers that extend the tag set with their own reducer.
//! The default extension type is [`Infallible`], which makes `Custom`
//! unconstructible for engines that only use the built-ins.
//!
//! ```
//! use understory_control::action::{Action, ActionKind};
//! use understory_control::transition::ToggleState;
//!
//! let a: Action<ToggleState> = Action::Reset(ToggleState { on: false });
//! assert_eq!(a.kind(), ActionKind::Reset);
//! ```

use core::convert::Infallible;

/// An input to a [`Transition`](crate::transition::Transition).
///
/// `S` is the state type; `X` is the caller's extension payload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action<S, X = Infallible> {
    /// Flip the state.
    Toggle,
    /// Restore the given state (the engine passes the state captured at construction).
    Reset(S),
    /// Caller-defined action, only meaningful to a reducer that recognizes it.
    Custom(X),
}

/// Payload-free discriminant of an [`Action`].
///
/// Handy for change callbacks that branch on the action tag without caring
/// about its payload.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ActionKind {
    /// [`Action::Toggle`].
    Toggle,
    /// [`Action::Reset`].
    Reset,
    /// [`Action::Custom`].
    Custom,
}

impl<S, X> Action<S, X> {
    /// Return the tag of this action.
    pub fn kind(&self) -> ActionKind {
        match self {
            Self::Toggle => ActionKind::Toggle,
            Self::Reset(_) => ActionKind::Reset,
            Self::Custom(_) => ActionKind::Custom,
        }
    }

    /// Return `true` for [`Action::Toggle`].
    pub fn is_toggle(&self) -> bool {
        matches!(self, Self::Toggle)
    }

    /// Return the caller payload for [`Action::Custom`].
    pub fn custom(&self) -> Option<&X> {
        match self {
            Self::Custom(x) => Some(x),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq, Eq)]
    enum Extra {
        Force(bool),
    }

    #[test]
    fn kinds_match_variants() {
        let t: Action<u8> = Action::Toggle;
        let r: Action<u8> = Action::Reset(3);
        let c: Action<u8, Extra> = Action::Custom(Extra::Force(true));
        assert_eq!(t.kind(), ActionKind::Toggle);
        assert_eq!(r.kind(), ActionKind::Reset);
        assert_eq!(c.kind(), ActionKind::Custom);
        assert!(t.is_toggle());
        assert!(!r.is_toggle());
    }

    #[test]
    fn custom_payload_is_exposed() {
        let c: Action<u8, Extra> = Action::Custom(Extra::Force(false));
        assert_eq!(c.custom(), Some(&Extra::Force(false)));
        let t: Action<u8, Extra> = Action::Toggle;
        assert_eq!(t.custom(), None);
    }
}
