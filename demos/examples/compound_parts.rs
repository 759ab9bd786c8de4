// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Compound parts.
//!
//! A scope shares one engine with a list of tagged parts. The parent resolves
//! each part against the shared state; the button part binds to the engine.
//! A part rendered without a scope fails with a named error.
//!
//! Run:
//! - `cargo run -p understory_demos --example compound_parts`

use std::rc::Rc;

use understory_control::Error;
use understory_control::engine::{Config, StateEngine};
use understory_control::scope::{self, Part, Resolved, Scope};
use understory_control::transition::ToggleState;

fn describe(parts: &[Part], shared: &Scope<ToggleState>) -> Vec<String> {
    parts
        .iter()
        .zip(shared.render::<()>(parts))
        .map(|(part, r)| match r {
            Resolved::Show => format!("{part:?}: shown"),
            Resolved::Hide => format!("{part:?}: hidden"),
            Resolved::Button(props) => format!("{part:?}: switch pressed={}", props.value),
        })
        .collect()
}

/// A part that only works inside a scope.
fn toggle_button(ctx: Option<&Scope<ToggleState>>) -> Result<(), Error> {
    let shared = scope::require(ctx, "toggle_button")?;
    if let Resolved::Button(props) = shared.resolve::<()>(Part::Button) {
        (props.on_event)(&())?;
    }
    Ok(())
}

fn main() -> Result<(), Error> {
    let shared = Scope::new(Rc::new(StateEngine::new(
        ToggleState::default(),
        Config::new(),
    )));
    let parts = [Part::On, Part::Off, Part::Other, Part::Button];

    println!("== Before click ==");
    for line in describe(&parts, &shared) {
        println!("  {line}");
    }

    toggle_button(Some(&shared))?;

    println!("== After click ==");
    for line in describe(&parts, &shared) {
        println!("  {line}");
    }

    println!("== Outside a scope ==");
    if let Err(e) = toggle_button(None) {
        println!("  {e}");
    }
    Ok(())
}
