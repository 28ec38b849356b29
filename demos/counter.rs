//! Counter store built with `StoreFactory`
//!
//! Run with `RUST_LOG=general_store=trace cargo run --example counter` to see
//! registration and dispatch logs.

use general_store::{response, Action, SimpleDispatcher, StoreError, StoreFactory};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Clone, Debug, Default)]
struct CounterState {
    count: i32,
    step: i32,
    history: Vec<i32>,
}

#[derive(Clone, Debug)]
enum CounterAction {
    Step(i32),
    Tick,
}

fn main() -> Result<(), StoreError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Counter Store ===\n");

    let dispatcher = Arc::new(SimpleDispatcher::new());

    let base = StoreFactory::new()
        .define_name("counter")?
        .define_get(|state: &CounterState| state.count)?;

    let counter = base
        .define_initial_state(CounterState {
            count: 0,
            step: 1,
            history: vec![],
        })?
        .define_responses([
            (
                "INCREMENT",
                response(|state: &mut CounterState, _: &CounterAction| {
                    state.count += state.step;
                    state.history.push(state.count);
                }),
            ),
            (
                "DECREMENT",
                response(|state: &mut CounterState, _: &CounterAction| {
                    state.count -= state.step;
                    state.history.push(state.count);
                }),
            ),
        ])?
        .define_response_to("SET_STEP", |state: &mut CounterState, action: &CounterAction| {
            if let CounterAction::Step(step) = action {
                state.step = *step;
            }
        })?;

    let store = counter.register(dispatcher.clone())?;
    store.subscribe({
        let store = store.clone();
        move || println!("   count is now {:?}", store.get())
    });

    println!("1. Incrementing twice");
    dispatcher.dispatch(&Action::new("INCREMENT", CounterAction::Tick))?;
    dispatcher.dispatch(&Action::new("INCREMENT", CounterAction::Tick))?;

    println!("\n2. Changing step size to 5");
    dispatcher.dispatch(&Action::new("SET_STEP", CounterAction::Step(5)))?;

    println!("\n3. Decrementing");
    dispatcher.dispatch(&Action::new("DECREMENT", CounterAction::Tick))?;

    println!("\n4. Redefining the getter fails");
    if let Err(err) = counter.define_get(|state: &CounterState| state.step) {
        println!("   {err}");
    }

    println!("\n5. History:");
    store.read(|state| println!("   {:?}", state.history));

    store.remove();
    Ok(())
}
