// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Engine core: reconcile a controlled value with an internal state cell.
//!
//! ## Overview
//!
//! A [`StateEngine`] owns one internal state cell, created from the initial
//! state at construction. Each evaluation supplies a [`Config`]; when the
//! config carries a controlled value, that value is authoritative
//! ([`ControlMode::Controlled`]), otherwise the internal cell is
//! ([`ControlMode::Uncontrolled`]).
//!
//! ## Dispatch
//!
//! [`StateEngine::dispatch`] always works from the *current* effective state:
//!
//! 1. `suggested = transition(effective_state(), action)`.
//! 2. When uncontrolled, `suggested` is committed to the internal cell.
//! 3. When a change callback is configured, it receives `(suggested, action)`
//!    whether or not step 2 committed anything.
//!
//! The controlled value itself is never touched; only the consumer changes
//! it, by calling [`StateEngine::evaluate`] with a new [`Config`].
//!
//! ```
//! use understory_control::engine::{Config, StateEngine};
//! use understory_control::transition::ToggleState;
//!
//! // Uncontrolled: the engine drives itself.
//! let engine = StateEngine::new(ToggleState::default(), Config::new());
//! engine.toggle().unwrap();
//! assert!(engine.effective_state().on);
//! engine.reset().unwrap();
//! assert!(!engine.effective_state().on);
//!
//! // Controlled: the value only changes when the owner re-supplies it.
//! let engine = StateEngine::new(
//!     ToggleState::default(),
//!     Config::new()
//!         .controlled(Some(ToggleState { on: true }))
//!         .on_change(|suggested, _| assert!(!suggested.on)),
//! );
//! engine.toggle().unwrap();
//! assert!(engine.effective_state().on);
//! ```
//!
//! ## Re-entrancy
//!
//! The engine holds no borrow of its configuration or cell while the change
//! callback runs, so the callback may call [`dispatch`](StateEngine::dispatch)
//! or [`evaluate`](StateEngine::evaluate) on the same engine. Every dispatch
//! reads the effective state afresh.

use alloc::rc::Rc;
use core::cell::{Cell, RefCell};
use core::convert::Infallible;
use core::fmt::Debug;

use crate::action::Action;
use crate::error::Error;
use crate::handler::{call_all, fallible};
use crate::monitor::{Labels, Monitor, Observation, WarningSink, Warnings};
use crate::props::{BoundProps, UserProps};
use crate::transition::{Flip, Transition, toggle_reducer};

/// Change callback: receives the suggested state and the action that produced it.
pub type OnChange<S, X = Infallible> = Rc<dyn Fn(&S, &Action<S, X>) -> Result<(), Error>>;

/// Whether the controlled value or the internal cell is authoritative.
///
/// Derived from the configuration on every evaluation, never stored as input.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ControlMode {
    /// A controlled value is present and wins.
    Controlled,
    /// No controlled value; the internal cell wins.
    Uncontrolled,
}

impl ControlMode {
    /// Derive the mode from an optional controlled value.
    pub fn of<S>(controlled: Option<&S>) -> Self {
        if controlled.is_some() {
            Self::Controlled
        } else {
            Self::Uncontrolled
        }
    }

    /// Return `true` for [`ControlMode::Controlled`].
    pub fn is_controlled(self) -> bool {
        self == Self::Controlled
    }
}

impl core::fmt::Display for ControlMode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            Self::Controlled => "controlled",
            Self::Uncontrolled => "uncontrolled",
        })
    }
}

/// Per-evaluation configuration of a [`StateEngine`].
///
/// Everything here may change between evaluations. The initial state is not
/// part of it: that is captured once by [`StateEngine::new`].
pub struct Config<S, X = Infallible> {
    reducer: Rc<dyn Transition<S, X>>,
    on_change: Option<OnChange<S, X>>,
    controlled: Option<S>,
    read_only: bool,
    labels: Labels,
    sink: WarningSink,
}

impl<S: Flip + Clone + 'static> Config<S> {
    /// Configuration for the built-in action set, using [`toggle_reducer`].
    pub fn new() -> Self {
        Self::with_reducer(toggle_reducer::<S, Infallible>)
    }
}

impl<S: Flip + Clone + 'static> Default for Config<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, X> Config<S, X>
where
    S: Flip + Clone + 'static,
    X: Debug + 'static,
{
    /// Configuration for an extended action set that starts from
    /// [`toggle_reducer`].
    ///
    /// Custom actions fail with [`Error::UnsupportedAction`] until a reducer
    /// that recognizes them is installed with [`Config::reducer`].
    pub fn with_default_reducer() -> Self {
        Self::with_reducer(toggle_reducer::<S, X>)
    }
}

impl<S: 'static, X: 'static> Config<S, X> {
    /// Configuration using a caller-supplied transition.
    pub fn with_reducer(reducer: impl Transition<S, X> + 'static) -> Self {
        Self {
            reducer: Rc::new(reducer),
            on_change: None,
            controlled: None,
            read_only: false,
            labels: Labels::default(),
            sink: WarningSink::default(),
        }
    }

    /// Replace the transition.
    pub fn reducer(mut self, reducer: impl Transition<S, X> + 'static) -> Self {
        self.reducer = Rc::new(reducer);
        self
    }

    /// Set or clear the controlled value.
    pub fn controlled(mut self, value: Option<S>) -> Self {
        self.controlled = value;
        self
    }

    /// Install an infallible change callback.
    pub fn on_change(mut self, f: impl Fn(&S, &Action<S, X>) + 'static) -> Self {
        self.on_change = Some(Rc::new(
            move |s: &S, a: &Action<S, X>| -> Result<(), Error> {
                f(s, a);
                Ok(())
            },
        ));
        self
    }

    /// Install a change callback whose errors propagate out of `dispatch`.
    pub fn try_on_change(
        mut self,
        f: impl Fn(&S, &Action<S, X>) -> Result<(), Error> + 'static,
    ) -> Self {
        self.on_change = Some(Rc::new(f));
        self
    }

    /// Set or clear the change callback from an already shared handle.
    pub fn on_change_callback(mut self, f: Option<OnChange<S, X>>) -> Self {
        self.on_change = f;
        self
    }

    /// Acknowledge that a controlled value is intentionally immutable.
    pub fn read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    /// Names used in warning messages.
    pub fn labels(mut self, labels: Labels) -> Self {
        self.labels = labels;
        self
    }

    /// Where warnings are delivered.
    pub fn sink(mut self, sink: WarningSink) -> Self {
        self.sink = sink;
        self
    }

    /// The control mode this configuration implies.
    pub fn mode(&self) -> ControlMode {
        ControlMode::of(self.controlled.as_ref())
    }

    fn observation(&self) -> Observation {
        Observation {
            mode: self.mode(),
            has_on_change: self.on_change.is_some(),
            read_only: self.read_only,
        }
    }
}

impl<S: Debug, X> Debug for Config<S, X> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Config")
            .field("controlled", &self.controlled)
            .field("on_change", &self.on_change.is_some())
            .field("read_only", &self.read_only)
            .field("labels", &self.labels)
            .finish_non_exhaustive()
    }
}

/// A hybrid controlled/uncontrolled state engine for one piece of state.
///
/// ## Usage
///
/// - Construct with [`StateEngine::new`], passing the initial state and the
///   first [`Config`]. The initial state is what [`reset`](Self::reset)
///   restores; the first config fixes the mode the monitor compares against.
/// - Call [`evaluate`](Self::evaluate) whenever the owner's configuration
///   changes (e.g. on each re-render) to supply a new controlled value,
///   callback, or reducer.
/// - Drive transitions with [`dispatch`](Self::dispatch),
///   [`toggle`](Self::toggle), and [`reset`](Self::reset).
/// - Wrap in an [`Rc`] to use the prop getters
///   [`toggler_props`](Self::toggler_props) and
///   [`resetter_props`](Self::resetter_props).
pub struct StateEngine<S, X = Infallible> {
    initial: S,
    cell: RefCell<S>,
    config: RefCell<Config<S, X>>,
    monitor: Monitor,
    last_warnings: Cell<Warnings>,
}

impl<S: Debug, X> Debug for StateEngine<S, X> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("StateEngine")
            .field("initial", &self.initial)
            .field("cell", &self.cell)
            .field("config", &self.config)
            .field("monitor", &self.monitor)
            .finish_non_exhaustive()
    }
}

impl<S: Clone + 'static, X: 'static> StateEngine<S, X> {
    /// Create an engine and run the first evaluation.
    pub fn new(initial_state: S, config: Config<S, X>) -> Self {
        let monitor = Monitor::new(config.mode());
        let engine = Self {
            initial: initial_state.clone(),
            cell: RefCell::new(initial_state),
            config: RefCell::new(config),
            monitor,
            last_warnings: Cell::new(Warnings::empty()),
        };
        engine.run_monitor();
        engine
    }

    /// Re-evaluate with the owner's current configuration.
    ///
    /// Replaces the live configuration and runs the consistency monitor.
    /// Returns the warning categories that fired.
    pub fn evaluate(&self, config: Config<S, X>) -> Warnings {
        tracing::debug!(
            target: "understory_control",
            mode = ?config.mode(),
            initial_mode = ?self.monitor.initial_mode(),
            "re-evaluating engine configuration"
        );
        *self.config.borrow_mut() = config;
        self.run_monitor()
    }

    fn run_monitor(&self) -> Warnings {
        let fired = {
            let config = self.config.borrow();
            self.monitor
                .check(&config.observation(), &config.labels, &config.sink)
        };
        self.last_warnings.set(fired);
        fired
    }

    /// The state consumers should display.
    pub fn effective_state(&self) -> S {
        let config = self.config.borrow();
        match &config.controlled {
            Some(v) => v.clone(),
            None => self.cell.borrow().clone(),
        }
    }

    /// The internal cell, regardless of mode.
    pub fn internal_state(&self) -> S {
        self.cell.borrow().clone()
    }

    /// The state captured at construction.
    pub fn initial_state(&self) -> &S {
        &self.initial
    }

    /// The mode implied by the live configuration.
    pub fn mode(&self) -> ControlMode {
        self.config.borrow().mode()
    }

    /// The mode captured on the first evaluation.
    pub fn initial_mode(&self) -> ControlMode {
        self.monitor.initial_mode()
    }

    /// Warning categories reported by the most recent evaluation.
    pub fn last_warnings(&self) -> Warnings {
        self.last_warnings.get()
    }

    /// Apply `action` to the effective state.
    ///
    /// Commits the result only when uncontrolled, then reports it to the
    /// change callback regardless of mode. Errors from the transition or the
    /// callback are returned as is.
    pub fn dispatch(&self, action: Action<S, X>) -> Result<(), Error> {
        let (reducer, current, mode, on_change) = {
            let config = self.config.borrow();
            let current = match &config.controlled {
                Some(v) => v.clone(),
                None => self.cell.borrow().clone(),
            };
            (
                config.reducer.clone(),
                current,
                config.mode(),
                config.on_change.clone(),
            )
        };

        let suggested = reducer.transition(&current, &action)?;
        let committed = !mode.is_controlled();
        if committed {
            *self.cell.borrow_mut() = suggested.clone();
        }
        tracing::trace!(
            target: "understory_control",
            kind = ?action.kind(),
            %mode,
            committed,
            notified = on_change.is_some(),
            "dispatched action"
        );

        if let Some(on_change) = on_change {
            on_change(&suggested, &action)?;
        }
        Ok(())
    }

    /// Dispatch [`Action::Toggle`].
    pub fn toggle(&self) -> Result<(), Error> {
        self.dispatch(Action::Toggle)
    }

    /// Dispatch [`Action::Reset`] with the state captured at construction.
    pub fn reset(&self) -> Result<(), Error> {
        self.dispatch(Action::Reset(self.initial.clone()))
    }

    /// Bind a reset control: the value is the effective state and the handler
    /// runs the caller's handler, then [`reset`](Self::reset).
    pub fn resetter_props<E: 'static, R>(
        self: &Rc<Self>,
        user: UserProps<E, R>,
    ) -> BoundProps<S, E, R> {
        let engine = Rc::clone(self);
        let internal = fallible(move |_: &E| engine.reset());
        BoundProps {
            value: self.effective_state(),
            on_event: call_all([user.on_event, Some(internal)]),
            rest: user.rest,
        }
    }
}

impl<S: Flip + Clone + 'static, X: 'static> StateEngine<S, X> {
    /// Whether the effective state is on.
    pub fn is_on(&self) -> bool {
        self.effective_state().is_on()
    }

    /// Bind a toggle control: the value is the pressed flag and the handler
    /// runs the caller's handler, then [`toggle`](Self::toggle).
    pub fn toggler_props<E: 'static, R>(
        self: &Rc<Self>,
        user: UserProps<E, R>,
    ) -> BoundProps<bool, E, R> {
        let engine = Rc::clone(self);
        let internal = fallible(move |_: &E| engine.toggle());
        BoundProps {
            value: self.is_on(),
            on_event: call_all([user.on_event, Some(internal)]),
            rest: user.rest,
        }
    }
}
