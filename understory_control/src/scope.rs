// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Compound scope: share one engine with a subtree of parts.
//!
//! ## Overview
//!
//! A [`Scope`] is built at the top of a subtree and handed by reference to
//! each descendant that needs the shared state. Descendants receive an
//! `Option<&Scope>` and go through [`require`], which turns a missing scope
//! into [`Error::MissingScope`] naming both the scope and the accessor.
//!
//! Children declare the role they play with an explicit [`Part`]; the parent
//! resolves each part against the shared state with [`Scope::resolve`].
//!
//! ```
//! use std::rc::Rc;
//! use understory_control::engine::{Config, StateEngine};
//! use understory_control::scope::{self, Part, Resolved, Scope};
//! use understory_control::transition::ToggleState;
//!
//! let shared = Scope::new(Rc::new(StateEngine::new(ToggleState::default(), Config::new())));
//! let parts = [Part::On, Part::Off, Part::Button];
//! let out = shared.render::<()>(&parts);
//! assert!(matches!(out[0], Resolved::Hide));
//! assert!(matches!(out[1], Resolved::Show));
//!
//! let missing: Option<&Scope<ToggleState>> = None;
//! assert!(scope::require(missing, "toggle_button").is_err());
//! ```

use alloc::rc::Rc;
use alloc::vec::Vec;
use core::convert::Infallible;

use crate::engine::StateEngine;
use crate::error::Error;
use crate::props::{BoundProps, UserProps};
use crate::transition::Flip;

/// Name reported by [`Error::MissingScope`].
pub const SCOPE_NAME: &str = "ToggleScope";

/// Shared access to one engine for a subtree of parts.
#[derive(Debug)]
pub struct Scope<S, X = Infallible> {
    engine: Rc<StateEngine<S, X>>,
}

impl<S, X> Clone for Scope<S, X> {
    fn clone(&self) -> Self {
        Self {
            engine: Rc::clone(&self.engine),
        }
    }
}

/// Role a child declares inside a [`Scope`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Part {
    /// Shown only while on.
    On,
    /// Shown only while off.
    Off,
    /// The interactive switch bound to the shared engine.
    Button,
    /// Not a scope part; left as is.
    Other,
}

/// Outcome of resolving a [`Part`].
#[derive(Debug)]
pub enum Resolved<E, R = ()> {
    /// Render the child.
    Show,
    /// Render nothing.
    Hide,
    /// Render a switch with these props.
    Button(BoundProps<bool, E, R>),
}

impl<S, X> Scope<S, X> {
    /// Open a scope around `engine`.
    pub fn new(engine: Rc<StateEngine<S, X>>) -> Self {
        Self { engine }
    }

    /// The shared engine.
    pub fn engine(&self) -> &Rc<StateEngine<S, X>> {
        &self.engine
    }
}

impl<S: Flip + Clone + 'static, X: 'static> Scope<S, X> {
    /// Resolve a single part against the current shared state.
    pub fn resolve<E: 'static>(&self, part: Part) -> Resolved<E> {
        self.resolve_with(part, UserProps::default())
    }

    /// Resolve a part, passing caller props through to a [`Part::Button`].
    ///
    /// `user` is ignored for the other parts.
    pub fn resolve_with<E: 'static, R>(
        &self,
        part: Part,
        user: UserProps<E, R>,
    ) -> Resolved<E, R> {
        match part {
            Part::On if self.engine.is_on() => Resolved::Show,
            Part::Off if !self.engine.is_on() => Resolved::Show,
            Part::On | Part::Off => Resolved::Hide,
            Part::Button => Resolved::Button(self.engine.toggler_props(user)),
            Part::Other => Resolved::Show,
        }
    }

    /// Resolve every child in order.
    pub fn render<E: 'static>(&self, parts: &[Part]) -> Vec<Resolved<E>> {
        parts.iter().map(|&p| self.resolve(p)).collect()
    }
}

/// Unwrap the scope a descendant was handed, or fail naming `accessor`.
pub fn require<'a, S, X>(
    scope: Option<&'a Scope<S, X>>,
    accessor: &'static str,
) -> Result<&'a Scope<S, X>, Error> {
    scope.ok_or(Error::MissingScope {
        scope: SCOPE_NAME,
        accessor,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Config;
    use crate::handler::handler;
    use crate::transition::ToggleState;
    use core::cell::Cell;

    fn scope() -> Scope<ToggleState> {
        Scope::new(Rc::new(StateEngine::new(
            ToggleState::default(),
            Config::new(),
        )))
    }

    #[test]
    fn parts_follow_shared_state() {
        let s = scope();
        assert!(matches!(s.resolve::<()>(Part::On), Resolved::Hide));
        assert!(matches!(s.resolve::<()>(Part::Off), Resolved::Show));
        s.engine().toggle().unwrap();
        assert!(matches!(s.resolve::<()>(Part::On), Resolved::Show));
        assert!(matches!(s.resolve::<()>(Part::Off), Resolved::Hide));
        assert!(matches!(s.resolve::<()>(Part::Other), Resolved::Show));
    }

    #[test]
    fn button_drives_every_descendant() {
        let s = scope();
        let child = s.clone();
        let Resolved::Button(props) = child.resolve::<()>(Part::Button) else {
            panic!("button part should resolve to props");
        };
        assert!(!props.value);
        (props.on_event)(&()).unwrap();
        assert!(s.engine().is_on());
        assert!(matches!(s.resolve::<()>(Part::On), Resolved::Show));
    }

    #[test]
    fn button_keeps_caller_handler_and_rest() {
        let s = scope();
        let hits = Rc::new(Cell::new(0));
        let h = hits.clone();
        let user =
            UserProps::with_rest(7_u8).on_event(handler(move |_: &()| h.set(h.get() + 1)));
        let Resolved::Button(props) = s.resolve_with(Part::Button, user) else {
            panic!("button part should resolve to props");
        };
        assert_eq!(props.rest, 7);
        (props.on_event)(&()).unwrap();
        assert_eq!(hits.get(), 1);
        assert!(s.engine().is_on());
    }

    #[test]
    fn missing_scope_is_a_named_error() {
        let err = require::<ToggleState, Infallible>(None, "toggle_on").unwrap_err();
        assert_eq!(
            err,
            Error::MissingScope {
                scope: SCOPE_NAME,
                accessor: "toggle_on",
            }
        );
        let s = scope();
        assert!(require(Some(&s), "toggle_on").is_ok());
    }
}
