//! # General Store
//!
//! Flux stores defined with builders and registered once with a dispatcher.
//!
//! ## Defining stores
//!
//! - [`StoreFactory`] - Immutable builder; every `define_*` call returns a new factory
//! - [`StoreSingleton`] - Mutable wrapper that registers its definition exactly once
//!
//! ## Registering stores
//!
//! - [`Dispatcher`] - The `register`/`unregister` contract a store subscribes through
//! - [`SimpleDispatcher`] - Synchronous dispatcher for applications without their own
//! - [`FnDispatcher`] - Dispatcher assembled from closures, validated at registration
//! - [`Store`] - The facade returned by registration, queried through its getter
//!
//! All builder misuse is reported as a [`StoreError`].
//!
//! ```
//! use general_store::{response, Action, SimpleDispatcher, StoreFactory};
//! use std::sync::Arc;
//!
//! #[derive(Clone, Default)]
//! struct Counter {
//!     count: i32,
//! }
//!
//! let dispatcher = Arc::new(SimpleDispatcher::new());
//! let store = StoreFactory::new()
//!     .define_get(|state: &Counter| state.count)?
//!     .define_initial_state(Counter { count: 0 })?
//!     .define_responses([("INCR", response(|state: &mut Counter, _: &()| state.count += 1))])?
//!     .register(dispatcher.clone())?;
//!
//! dispatcher.dispatch(&Action::new("INCR", ()))?;
//! assert_eq!(store.get(), Some(1));
//! # Ok::<(), general_store::StoreError>(())
//! ```

pub mod dispatcher;
pub mod error;
pub mod store;

// Re-export main types for convenience
pub use dispatcher::{
    Action, ActionType, ActionTypes, DispatchCallback, DispatchToken, Dispatcher, FnDispatcher,
    IntoDispatcher, SimpleDispatcher,
};
pub use error::StoreError;
pub use store::{
    response, Definition, SingletonStore, Store, StoreFactory, StoreSingleton, SubscriptionId,
};
