// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_control --heading-base-level=0

//! Understory Control: a hybrid controlled/uncontrolled state engine for UI.
//!
//! ## Overview
//!
//! This crate lets one piece of interactive state be driven either by the
//! engine itself (uncontrolled) or by an owner that supplies the value and
//! reacts to change suggestions (controlled), through a single code path.
//! It does not render anything. Bind the returned values and handlers to
//! whatever view layer you use.
//!
//! - [`StateEngine`](crate::engine::StateEngine) owns an internal state cell,
//!   decides which value is authoritative, and dispatches
//!   [`Action`](crate::action::Action)s through a pluggable
//!   [`Transition`](crate::transition::Transition).
//! - The [`monitor`](crate::monitor) reports inconsistent usage (switching
//!   control mode, or a controlled value nothing can change) to an injectable
//!   [`WarningSink`](crate::monitor::WarningSink). It never fails.
//! - [`call_all`](crate::handler::call_all) composes event handlers so the
//!   engine's handler and the caller's handler both run.
//! - [`Scope`](crate::scope::Scope) shares one engine with a subtree of
//!   explicitly tagged [`Part`](crate::scope::Part)s.
//!
//! ## Three usage shapes, one engine
//!
//! - Uncontrolled: no controlled value; the internal cell drives everything
//!   and a change callback, if any, is telemetry.
//! - Controlled: the owner supplies the value on each evaluation and decides
//!   what to do with each suggestion (accept, reject, or transform it).
//! - Observed uncontrolled: the internal cell drives the display while the
//!   change callback feeds a side channel.
//!
//! ## Workflow
//!
//! 1) Construct a [`StateEngine`](crate::engine::StateEngine) with the initial
//!    state and a [`Config`](crate::engine::Config). This is the first
//!    evaluation; the control mode seen here is the one the monitor expects
//!    for the engine's lifetime.
//! 2) On each interaction call [`dispatch`](crate::engine::StateEngine::dispatch)
//!    (or [`toggle`](crate::engine::StateEngine::toggle) /
//!    [`reset`](crate::engine::StateEngine::reset)), or bind the element with
//!    [`toggler_props`](crate::engine::StateEngine::toggler_props).
//! 3) When the owner's configuration changes, call
//!    [`evaluate`](crate::engine::StateEngine::evaluate) with the new config.
//!
//! ## Controlled example
//!
//! ```
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use understory_control::engine::{Config, StateEngine};
//! use understory_control::transition::ToggleState;
//!
//! // The owner keeps the value and accepts every suggestion.
//! let owned = Rc::new(Cell::new(ToggleState { on: false }));
//! let config = |owned: &Rc<Cell<ToggleState>>| {
//!     let sink = owned.clone();
//!     Config::new()
//!         .controlled(Some(owned.get()))
//!         .on_change(move |suggested: &ToggleState, _| sink.set(*suggested))
//! };
//!
//! let engine = StateEngine::new(ToggleState::default(), config(&owned));
//! engine.toggle().unwrap();
//! // Nothing changes until the owner re-evaluates with its new value.
//! assert!(!engine.effective_state().on);
//! engine.evaluate(config(&owned));
//! assert!(engine.effective_state().on);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod action;
pub mod engine;
pub mod error;
pub mod handler;
pub mod monitor;
pub mod props;
pub mod scope;
pub mod transition;

pub use error::Error;
