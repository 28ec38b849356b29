use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;
use std::sync::Arc;

use general_store::{response, Action, SimpleDispatcher, StoreFactory, StoreSingleton};

#[derive(Clone, Default)]
struct State {
    counter: usize,
}

fn factory_define_benchmark(c: &mut Criterion) {
    c.bench_function("factory_define", |b| {
        b.iter(|| {
            StoreFactory::<State, usize, usize>::new()
                .define_get(|state: &State| state.counter)
                .and_then(|f| f.define_initial_state(State { counter: black_box(1) }))
                .and_then(|f| {
                    f.define_responses([(
                        "INCREMENT",
                        response(|state: &mut State, by: &usize| state.counter += by),
                    )])
                })
        });
    });
}

fn factory_responses_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("factory_responses");

    for response_count in [1, 10, 100].iter() {
        let action_types: Vec<String> = (0..*response_count).map(|i| format!("ACTION_{i}")).collect();

        group.bench_with_input(
            BenchmarkId::from_parameter(response_count),
            &action_types,
            |b, action_types| {
                b.iter(|| {
                    StoreFactory::<State, usize, usize>::new()
                        .define_response_to(action_types.clone(), |state: &mut State, _: &usize| {
                            state.counter += 1
                        })
                });
            },
        );
    }
    group.finish();
}

fn singleton_register_benchmark(c: &mut Criterion) {
    let dispatcher = Arc::new(SimpleDispatcher::<()>::new());

    c.bench_function("singleton_register", |b| {
        b.iter(|| {
            let mut singleton = StoreSingleton::new();
            singleton.define_get(|| black_box(42)).ok();
            let store = singleton.register(dispatcher.clone()).ok();
            if let Some(store) = store {
                store.remove();
            }
        });
    });
}

fn store_dispatch_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("store_dispatch");

    for subscriber_count in [1, 10, 100].iter() {
        let dispatcher = Arc::new(SimpleDispatcher::new());
        let store = StoreFactory::<State, usize, usize>::new()
            .define_get(|state: &State| state.counter)
            .and_then(|f| {
                f.define_response_to("INCREMENT", |state: &mut State, by: &usize| {
                    state.counter += by
                })
            })
            .and_then(|f| f.register_or_default(dispatcher.clone()))
            .expect("benchmark store should register");

        for _ in 0..*subscriber_count {
            store.subscribe(|| {
                // Empty subscriber
            });
        }

        group.bench_with_input(
            BenchmarkId::from_parameter(subscriber_count),
            subscriber_count,
            |b, _| {
                let action = Action::new("INCREMENT", 1);
                b.iter(|| {
                    dispatcher.dispatch(black_box(&action)).ok();
                });
            },
        );
    }
    group.finish();
}

criterion_group!(
    benches,
    factory_define_benchmark,
    factory_responses_benchmark,
    singleton_register_benchmark,
    store_dispatch_benchmark,
);
criterion_main!(benches);
