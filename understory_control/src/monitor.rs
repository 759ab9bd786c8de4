// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Consistency monitor: non-fatal diagnostics for inconsistent engine usage.
//!
//! ## Overview
//!
//! The monitor looks at the configuration supplied on each evaluation and
//! reports two kinds of usage problems through a [`WarningSink`]:
//!
//! - Mode switch: the control mode differs from the one captured on the
//!   first evaluation. The comparison is always against that first mode, so
//!   the warning repeats on every evaluation while the mismatch lasts.
//! - Read-only: a controlled value was supplied with no change callback and
//!   without `read_only`, so nothing can ever feed a new value back in.
//!
//! The monitor never mutates engine state and never fails; [`Monitor::check`]
//! returns the [`Warnings`] that fired so callers can inspect categories
//! without parsing messages.
//!
//! ```
//! use understory_control::engine::ControlMode;
//! use understory_control::monitor::{Collector, Labels, Monitor, Observation, Warnings};
//!
//! let collector = Collector::new();
//! let monitor = Monitor::new(ControlMode::Uncontrolled);
//! let fired = monitor.check(
//!     &Observation { mode: ControlMode::Controlled, has_on_change: true, read_only: false },
//!     &Labels::default(),
//!     &collector.sink(),
//! );
//! assert_eq!(fired, Warnings::BECAME_CONTROLLED);
//! assert_eq!(collector.len(), 1);
//! ```

use alloc::format;
use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::cell::RefCell;

use crate::engine::ControlMode;

bitflags::bitflags! {
    /// Categories of usage warnings emitted by the [`Monitor`].
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Warnings: u8 {
        /// Switched from uncontrolled (first evaluation) to controlled.
        const BECAME_CONTROLLED   = 0b0000_0001;
        /// Switched from controlled (first evaluation) to uncontrolled.
        const BECAME_UNCONTROLLED = 0b0000_0010;
        /// Controlled without a change callback and without `read_only`.
        const READ_ONLY           = 0b0000_0100;
    }
}

/// Names used when rendering warning messages.
///
/// These identify the component and the configuration fields a consumer
/// should look at.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Labels {
    /// Name of the component or hook being configured.
    pub component: &'static str,
    /// Field carrying the controlled value.
    pub control: &'static str,
    /// Field carrying the change callback.
    pub on_change: &'static str,
    /// Field acknowledging an intentionally immutable value.
    pub read_only: &'static str,
    /// Field carrying the uncontrolled initial value.
    pub initial: &'static str,
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            component: "Toggle",
            control: "on",
            on_change: "on_change",
            read_only: "read_only",
            initial: "initial_on",
        }
    }
}

/// A single usage warning.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Warning {
    /// The control mode changed after the first evaluation.
    ModeSwitch {
        /// Mode captured on the first evaluation.
        from: ControlMode,
        /// Mode observed now.
        to: ControlMode,
    },
    /// A controlled value that can never change.
    ReadOnly,
}

impl Warning {
    /// The category flag for this warning.
    pub fn flag(&self) -> Warnings {
        match self {
            Self::ModeSwitch {
                to: ControlMode::Controlled,
                ..
            } => Warnings::BECAME_CONTROLLED,
            Self::ModeSwitch {
                to: ControlMode::Uncontrolled,
                ..
            } => Warnings::BECAME_UNCONTROLLED,
            Self::ReadOnly => Warnings::READ_ONLY,
        }
    }

    /// Render the human-readable message for this warning.
    pub fn message(&self, labels: &Labels) -> String {
        match self {
            Self::ModeSwitch { from, to } => format!(
                "`{c}` is changing from {from} to be {to}. Components should not switch \
                 from uncontrolled to controlled (or vice versa). Decide between using a \
                 controlled or uncontrolled `{c}` for the lifetime of the component. \
                 Check the `{field}` field.",
                c = labels.component,
                field = labels.control,
            ),
            Self::ReadOnly => format!(
                "A `{control}` value was provided to `{c}` without an `{on_change}` handler. \
                 This will result in a read-only `{control}` value. If you want it to be \
                 mutable, use `{initial}`. Otherwise, set either `{on_change}` or `{read_only}`.",
                c = labels.component,
                control = labels.control,
                on_change = labels.on_change,
                initial = labels.initial,
                read_only = labels.read_only,
            ),
        }
    }
}

/// Destination for warning messages.
///
/// The default sink forwards to [`tracing::warn!`]. Substitute
/// [`WarningSink::silent`] to drop warnings or a [`Collector`] to capture them.
#[derive(Clone)]
pub struct WarningSink(Rc<dyn Fn(&str)>);

impl core::fmt::Debug for WarningSink {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("WarningSink").finish_non_exhaustive()
    }
}

impl Default for WarningSink {
    fn default() -> Self {
        Self::tracing()
    }
}

impl WarningSink {
    /// Wrap an arbitrary message consumer.
    pub fn new(f: impl Fn(&str) + 'static) -> Self {
        Self(Rc::new(f))
    }

    /// Emit each message as a `tracing` warning under the `understory_control` target.
    pub fn tracing() -> Self {
        Self::new(|message| tracing::warn!(target: "understory_control", "{message}"))
    }

    /// Discard all messages.
    pub fn silent() -> Self {
        Self::new(|_| {})
    }

    /// Deliver a message.
    pub fn emit(&self, message: &str) {
        (self.0)(message);
    }
}

/// A sink that records every message it receives.
///
/// Clones share the same buffer.
#[derive(Clone, Debug, Default)]
pub struct Collector {
    messages: Rc<RefCell<Vec<String>>>,
}

impl Collector {
    /// Create an empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// A [`WarningSink`] that appends into this collector.
    pub fn sink(&self) -> WarningSink {
        let messages = self.messages.clone();
        WarningSink::new(move |m| messages.borrow_mut().push(String::from(m)))
    }

    /// Number of messages recorded so far.
    pub fn len(&self) -> usize {
        self.messages.borrow().len()
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.messages.borrow().is_empty()
    }

    /// A copy of the recorded messages.
    pub fn messages(&self) -> Vec<String> {
        self.messages.borrow().clone()
    }

    /// Remove and return the recorded messages.
    pub fn take(&self) -> Vec<String> {
        core::mem::take(&mut *self.messages.borrow_mut())
    }
}

/// What the monitor inspects on each evaluation.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Observation {
    /// Control mode derived from the current configuration.
    pub mode: ControlMode,
    /// Whether a change callback is configured.
    pub has_on_change: bool,
    /// Whether the consumer acknowledged an immutable controlled value.
    pub read_only: bool,
}

/// Tracks the first observed control mode and checks later observations against it.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Monitor {
    initial_mode: ControlMode,
}

impl Monitor {
    /// Create a monitor anchored to the mode seen on the first evaluation.
    pub fn new(initial_mode: ControlMode) -> Self {
        Self { initial_mode }
    }

    /// The mode captured on the first evaluation.
    pub fn initial_mode(&self) -> ControlMode {
        self.initial_mode
    }

    /// Compute the warnings for `obs` without emitting anything.
    pub fn warnings(&self, obs: &Observation) -> Vec<Warning> {
        let mut out = Vec::new();
        if obs.mode != self.initial_mode {
            out.push(Warning::ModeSwitch {
                from: self.initial_mode,
                to: obs.mode,
            });
        }
        if obs.mode == ControlMode::Controlled && !obs.has_on_change && !obs.read_only {
            out.push(Warning::ReadOnly);
        }
        out
    }

    /// Emit the warnings for `obs` to `sink` and return their categories.
    pub fn check(&self, obs: &Observation, labels: &Labels, sink: &WarningSink) -> Warnings {
        let mut fired = Warnings::empty();
        for w in self.warnings(obs) {
            sink.emit(&w.message(labels));
            fired |= w.flag();
        }
        fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obs(mode: ControlMode, has_on_change: bool, read_only: bool) -> Observation {
        Observation {
            mode,
            has_on_change,
            read_only,
        }
    }

    #[test]
    fn steady_uncontrolled_is_quiet() {
        let c = Collector::new();
        let m = Monitor::new(ControlMode::Uncontrolled);
        let fired = m.check(
            &obs(ControlMode::Uncontrolled, false, false),
            &Labels::default(),
            &c.sink(),
        );
        assert!(fired.is_empty());
        assert!(c.is_empty());
    }

    #[test]
    fn uncontrolled_to_controlled_names_control_field() {
        let c = Collector::new();
        let m = Monitor::new(ControlMode::Uncontrolled);
        let fired = m.check(
            &obs(ControlMode::Controlled, true, false),
            &Labels::default(),
            &c.sink(),
        );
        assert_eq!(fired, Warnings::BECAME_CONTROLLED);
        let msgs = c.take();
        assert_eq!(msgs.len(), 1);
        assert!(msgs[0].contains("from uncontrolled to be controlled"));
        assert!(msgs[0].contains("Check the `on` field"));
    }

    #[test]
    fn controlled_to_uncontrolled_is_the_other_category() {
        let c = Collector::new();
        let m = Monitor::new(ControlMode::Controlled);
        let fired = m.check(
            &obs(ControlMode::Uncontrolled, true, false),
            &Labels::default(),
            &c.sink(),
        );
        assert_eq!(fired, Warnings::BECAME_UNCONTROLLED);
        assert!(c.messages()[0].contains("from controlled to be uncontrolled"));
    }

    #[test]
    fn mode_switch_repeats_while_mismatch_persists() {
        let c = Collector::new();
        let m = Monitor::new(ControlMode::Uncontrolled);
        let o = obs(ControlMode::Controlled, true, false);
        m.check(&o, &Labels::default(), &c.sink());
        m.check(&o, &Labels::default(), &c.sink());
        let msgs = c.take();
        assert_eq!(msgs.len(), 2);
        assert_eq!(msgs[0], msgs[1]);
    }

    #[test]
    fn read_only_fires_without_on_change() {
        let c = Collector::new();
        let m = Monitor::new(ControlMode::Controlled);
        let fired = m.check(
            &obs(ControlMode::Controlled, false, false),
            &Labels::default(),
            &c.sink(),
        );
        assert_eq!(fired, Warnings::READ_ONLY);
        let msg = &c.messages()[0];
        assert!(msg.contains("without an `on_change` handler"));
        assert!(msg.contains("use `initial_on`"));
    }

    #[test]
    fn read_only_suppressed_by_on_change_or_flag() {
        let c = Collector::new();
        let m = Monitor::new(ControlMode::Controlled);
        let labels = Labels::default();
        assert!(
            m.check(&obs(ControlMode::Controlled, true, false), &labels, &c.sink())
                .is_empty()
        );
        assert!(
            m.check(&obs(ControlMode::Controlled, false, true), &labels, &c.sink())
                .is_empty()
        );
        assert!(c.is_empty());
    }

    #[test]
    fn switch_and_read_only_fire_together() {
        let m = Monitor::new(ControlMode::Uncontrolled);
        let fired = m.check(
            &obs(ControlMode::Controlled, false, false),
            &Labels::default(),
            &WarningSink::silent(),
        );
        assert_eq!(fired, Warnings::BECAME_CONTROLLED | Warnings::READ_ONLY);
    }

    #[test]
    fn custom_labels_flow_into_messages() {
        let labels = Labels {
            component: "Switch",
            control: "checked",
            on_change: "on_input",
            read_only: "locked",
            initial: "default_checked",
        };
        let msg = Warning::ReadOnly.message(&labels);
        assert!(msg.contains("`checked` value was provided to `Switch`"));
        assert!(msg.contains("set either `on_input` or `locked`"));
    }
}
