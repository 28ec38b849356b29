//! Store definitions and the facades they register.
//!
//! A store is described with [`StoreFactory`], an immutable builder, or with
//! [`StoreSingleton`], a mutable wrapper that can only be registered once.
//! Registering either produces a [`Store`].

mod definition;
mod factory;
mod singleton;
mod store;

pub use definition::{response, Definition, Getter, Response};
pub use factory::StoreFactory;
pub use singleton::{SingletonStore, StoreSingleton};
pub use store::{Store, SubscriptionId};
