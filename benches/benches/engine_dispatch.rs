// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::rc::Rc;

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use understory_control::engine::{Config, StateEngine};
use understory_control::handler::{Handler, call_all, handler};
use understory_control::monitor::WarningSink;
use understory_control::transition::ToggleState;

fn uncontrolled() -> StateEngine<ToggleState> {
    StateEngine::new(ToggleState::default(), Config::new())
}

fn controlled(on: bool) -> Config<ToggleState> {
    Config::new()
        .controlled(Some(ToggleState::new(on)))
        .on_change(|s: &ToggleState, _| {
            black_box(s);
        })
}

fn bench_dispatch(c: &mut Criterion) {
    let mut group = c.benchmark_group("dispatch");
    for &n in &[16usize, 256, 4096] {
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("uncontrolled_toggle_n{}", n), |b| {
            b.iter_batched(
                uncontrolled,
                |engine| {
                    for _ in 0..n {
                        let _ = engine.toggle();
                    }
                    black_box(engine.effective_state());
                },
                BatchSize::SmallInput,
            )
        });
        group.bench_function(format!("controlled_toggle_n{}", n), |b| {
            b.iter_batched(
                || StateEngine::new(ToggleState::default(), controlled(false)),
                |engine| {
                    for _ in 0..n {
                        let _ = engine.toggle();
                    }
                    black_box(engine.effective_state());
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_evaluate(c: &mut Criterion) {
    let mut group = c.benchmark_group("evaluate");
    // Alternating modes keeps the monitor's warning path hot.
    group.bench_function("mode_switch_silent_sink", |b| {
        let engine = uncontrolled();
        let mut on = false;
        b.iter(|| {
            on = !on;
            let config = if on { controlled(true) } else { Config::new() };
            let fired = engine.evaluate(config.sink(WarningSink::silent()));
            black_box(fired);
        })
    });
    group.bench_function("steady_uncontrolled", |b| {
        let engine = uncontrolled();
        b.iter(|| black_box(engine.evaluate(Config::new())))
    });
    group.finish();
}

fn bench_call_all(c: &mut Criterion) {
    let mut group = c.benchmark_group("call_all");
    for &n in &[1usize, 8, 64] {
        let handlers: Vec<Option<Handler<u64>>> = (0..n)
            .map(|i| {
                (i % 3 != 0).then(|| {
                    handler(|x: &u64| {
                        black_box(x);
                    })
                })
            })
            .collect();
        let composed = call_all(handlers);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("invoke_n{}", n), |b| {
            let composed = Rc::clone(&composed);
            b.iter(|| black_box(composed(&42)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_dispatch, bench_evaluate, bench_call_all);
criterion_main!(benches);
