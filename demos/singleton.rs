//! Todo list kept outside the store and exposed through a `StoreSingleton`

use general_store::{Action, SimpleDispatcher, StoreError, StoreSingleton};
use std::sync::{Arc, RwLock};
use tracing_subscriber::EnvFilter;

#[derive(Clone, Debug)]
struct TodoItem {
    id: usize,
    text: String,
    completed: bool,
}

#[derive(Clone, Debug)]
enum TodoAction {
    Add(String),
    Complete(usize),
}

fn main() -> Result<(), StoreError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Todo Singleton ===\n");

    let todos = Arc::new(RwLock::new(Vec::<TodoItem>::new()));
    let dispatcher = Arc::new(SimpleDispatcher::new());

    let mut singleton = StoreSingleton::new();
    singleton
        .define_get({
            let todos = todos.clone();
            move || todos.read().map(|t| t.clone()).unwrap_or_default()
        })?
        .define_response_to(["TODO_ADDED", "TODO_COMPLETED"], {
            let todos = todos.clone();
            move |action: &TodoAction| {
                let Ok(mut todos) = todos.write() else {
                    return;
                };
                match action {
                    TodoAction::Add(text) => {
                        let id = todos.len() + 1;
                        todos.push(TodoItem {
                            id,
                            text: text.clone(),
                            completed: false,
                        });
                    }
                    TodoAction::Complete(id) => {
                        if let Some(todo) = todos.iter_mut().find(|t| t.id == *id) {
                            todo.completed = true;
                        }
                    }
                }
            }
        })?;

    let store = singleton.register(dispatcher.clone())?;
    store.subscribe({
        let store = store.clone();
        move || {
            let active = store
                .get()
                .map(|todos| todos.iter().filter(|t| !t.completed).count())
                .unwrap_or_default();
            println!("State updated! Active todos: {active}");
        }
    });

    println!("Adding todo...");
    dispatcher.dispatch(&Action::new(
        "TODO_ADDED",
        TodoAction::Add("Learn Flux".to_string()),
    ))?;

    println!("\nCompleting todo...");
    dispatcher.dispatch(&Action::new("TODO_COMPLETED", TodoAction::Complete(1)))?;

    println!("\nRegistering again returns the same store");
    let again = singleton.register(dispatcher.clone())?;
    println!("   same store: {}", general_store::Store::ptr_eq(&store, &again));

    println!("\nFinal state: {:#?}", store.get());
    Ok(())
}
