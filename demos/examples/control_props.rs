// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Control props.
//!
//! Two toggles share one owner-held value. The owner accepts suggestions
//! until it has counted too many clicks, then rejects toggles while still
//! allowing resets. A third toggle stays uncontrolled and only reports its
//! changes, and a fourth is controlled without a change handler to show the
//! read-only warning.
//!
//! Run:
//! - `RUST_LOG=understory_control=warn,control_props=info cargo run -p understory_demos --example control_props`

use std::cell::Cell;
use std::rc::Rc;

use tracing_subscriber::EnvFilter;
use understory_control::Error;
use understory_control::action::{Action, ActionKind};
use understory_control::engine::{Config, StateEngine};
use understory_control::props::UserProps;
use understory_control::transition::ToggleState;

#[derive(Debug, Default)]
struct App {
    both_on: Cell<bool>,
    times_clicked: Cell<u32>,
}

impl App {
    fn clicked_too_much(&self) -> bool {
        self.times_clicked.get() > 4
    }

    fn reset(&self) {
        self.both_on.set(false);
        self.times_clicked.set(0);
    }
}

/// Configuration each synchronized toggle is re-evaluated with.
fn synced(app: &Rc<App>) -> Config<ToggleState> {
    let owner = app.clone();
    Config::new()
        .controlled(Some(ToggleState::new(app.both_on.get())))
        .on_change(move |suggested: &ToggleState, action: &Action<ToggleState>| {
            if action.kind() == ActionKind::Toggle && owner.clicked_too_much() {
                return;
            }
            owner.both_on.set(suggested.on);
            owner.times_clicked.set(owner.times_clicked.get() + 1);
        })
}

fn render(app: &Rc<App>, toggles: &[Rc<StateEngine<ToggleState>>]) {
    for t in toggles {
        t.evaluate(synced(app));
    }
    let states: Vec<bool> = toggles.iter().map(|t| t.is_on()).collect();
    if app.clicked_too_much() {
        println!("  toggles={states:?}  Whoa, you clicked too much!");
    } else {
        println!(
            "  toggles={states:?}  Click count: {}",
            app.times_clicked.get()
        );
    }
}

fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let app = Rc::new(App::default());
    let toggles = [
        Rc::new(StateEngine::new(ToggleState::default(), synced(&app))),
        Rc::new(StateEngine::new(ToggleState::default(), synced(&app))),
    ];

    println!("== Synchronized controlled toggles ==");
    for click in 0..7 {
        let props = toggles[click % 2].toggler_props::<(), ()>(UserProps::default());
        (props.on_event)(&())?;
        render(&app, &toggles);
    }

    println!("== Owner reset ==");
    app.reset();
    render(&app, &toggles);

    println!("== Observed uncontrolled toggle ==");
    let observed = StateEngine::new(
        ToggleState::default(),
        Config::new().on_change(|s: &ToggleState, a: &Action<ToggleState>| {
            tracing::info!(on = s.on, kind = ?a.kind(), "uncontrolled toggle changed");
        }),
    );
    observed.toggle()?;
    observed.toggle()?;
    println!("  observed={}", observed.is_on());

    println!("== Controlled without a change handler ==");
    let frozen = StateEngine::new(
        ToggleState::default(),
        Config::new().controlled(Some(ToggleState::new(true))),
    );
    frozen.toggle()?;
    println!(
        "  frozen={}  warnings={:?}",
        frozen.is_on(),
        frozen.last_warnings()
    );
    Ok(())
}
