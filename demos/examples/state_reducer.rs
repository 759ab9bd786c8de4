// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! State reducer.
//!
//! An uncontrolled toggle whose transition is overridden by its owner: after
//! four clicks toggles are ignored, while resets still go through the default
//! reducer. The owner counts clicks with its own handler, composed ahead of
//! the engine's.
//!
//! Run:
//! - `cargo run -p understory_demos --example state_reducer`

use std::cell::Cell;
use std::rc::Rc;

use understory_control::Error;
use understory_control::action::Action;
use understory_control::engine::{Config, StateEngine};
use understory_control::handler::handler;
use understory_control::props::UserProps;
use understory_control::transition::{ToggleState, toggle_reducer};

/// Reducer configuration that caps toggles once `times_clicked` reaches four.
fn capped(times_clicked: &Rc<Cell<u32>>) -> Config<ToggleState> {
    let clicked_too_much = times_clicked.get() >= 4;
    Config::with_reducer(
        move |s: &ToggleState, a: &Action<ToggleState>| -> Result<ToggleState, Error> {
            if a.is_toggle() && clicked_too_much {
                return Ok(*s);
            }
            toggle_reducer(s, a)
        },
    )
}

fn main() -> Result<(), Error> {
    let times_clicked = Rc::new(Cell::new(0_u32));
    let engine = Rc::new(StateEngine::new(ToggleState::default(), capped(&times_clicked)));

    println!("== Clicking the switch ==");
    for _ in 0..6 {
        let counter = times_clicked.clone();
        let props = engine.toggler_props(
            UserProps::with_rest("switch")
                .on_event(handler(move |_: &()| counter.set(counter.get() + 1))),
        );
        (props.on_event)(&())?;
        // Re-evaluate so the reducer sees the updated count.
        engine.evaluate(capped(&times_clicked));
        println!(
            "  {} on={} clicks={}",
            props.rest,
            engine.is_on(),
            times_clicked.get()
        );
    }

    println!("== Reset ==");
    let counter = times_clicked.clone();
    let reset = engine.resetter_props(
        UserProps::with_rest("reset").on_event(handler(move |_: &()| counter.set(0))),
    );
    (reset.on_event)(&())?;
    engine.evaluate(capped(&times_clicked));
    println!(
        "  on={} clicks={}",
        engine.is_on(),
        times_clicked.get()
    );
    Ok(())
}
