use super::factory::StoreFactory;
use super::store::Store;
use crate::dispatcher::{ActionTypes, IntoDispatcher};
use crate::error::{Result, StoreError};
use std::fmt;
use std::sync::Arc;

/// Facade type produced by a [`StoreSingleton`].
///
/// Singleton stores keep their data outside the store, so their state is `()`.
pub type SingletonStore<T, P> = Store<(), T, P>;

type SingletonGetter<T> = Arc<dyn Fn() -> T + Send + Sync>;

/// A store definition that can be registered exactly once.
///
/// Unlike [`StoreFactory`], the singleton is configured in place: each
/// `define_*` call mutates it and returns `&mut Self` for chaining. The
/// first [`register`](StoreSingleton::register) freezes the definition;
/// later calls hand back the same facade.
///
/// # Examples
///
/// ```
/// use general_store::{Action, SimpleDispatcher, StoreSingleton};
/// use std::sync::{Arc, Mutex};
///
/// let users = Arc::new(Mutex::new(Vec::<String>::new()));
/// let dispatcher = Arc::new(SimpleDispatcher::new());
///
/// let mut singleton = StoreSingleton::new();
/// singleton
///     .define_get({
///         let users = users.clone();
///         move || users.lock().unwrap().len()
///     })?
///     .define_response_to("USER_ADDED", {
///         let users = users.clone();
///         move |name: &String| users.lock().unwrap().push(name.clone())
///     })?;
///
/// let store = singleton.register(dispatcher.clone())?;
/// dispatcher.dispatch(&Action::new("USER_ADDED", "ada".to_string()))?;
/// assert_eq!(store.get(), Some(1));
///
/// assert!(singleton.define_response_to("USER_REMOVED", |_: &String| {}).is_err());
/// # Ok::<(), general_store::StoreError>(())
/// ```
pub struct StoreSingleton<T, P> {
    facade: Option<SingletonStore<T, P>>,
    factory: StoreFactory<(), T, P>,
    getter: Option<SingletonGetter<T>>,
}

impl<T: 'static, P: 'static> StoreSingleton<T, P> {
    pub fn new() -> Self {
        Self {
            facade: None,
            factory: StoreFactory::new(),
            getter: None,
        }
    }

    /// Set the getter, replacing any getter defined earlier.
    ///
    /// The getter takes no state; singleton stores read their data from
    /// whatever their response handlers write to.
    pub fn define_get<F>(&mut self, getter: F) -> Result<&mut Self>
    where
        F: Fn() -> T + Send + Sync + 'static,
    {
        self.ensure_unregistered("StoreSingleton::define_get")?;
        self.getter = Some(Arc::new(getter));
        Ok(self)
    }

    /// Respond to one or more action types with `response`.
    pub fn define_response_to<F>(
        &mut self,
        action_types: impl Into<ActionTypes>,
        response: F,
    ) -> Result<&mut Self>
    where
        F: Fn(&P) + Send + Sync + 'static,
    {
        self.ensure_unregistered("StoreSingleton::define_response_to")?;
        self.factory = self
            .factory
            .define_response_to(action_types, move |_: &mut (), data: &P| response(data))?;
        Ok(self)
    }

    pub fn is_registered(&self) -> bool {
        self.facade.is_some()
    }

    /// Register with `dispatcher` on the first call; return the cached facade
    /// on every call.
    ///
    /// Once registered, `dispatcher` is ignored.
    pub fn register<D>(&mut self, dispatcher: D) -> Result<SingletonStore<T, P>>
    where
        D: IntoDispatcher<P>,
    {
        let Some(getter) = self.getter.clone() else {
            return Err(StoreError::MissingGetter {
                method: "StoreSingleton::register",
            });
        };

        if let Some(facade) = &self.facade {
            tracing::debug!(
                token = %facade.dispatch_token(),
                "store singleton already registered, returning cached store"
            );
            return Ok(facade.clone());
        }

        let factory = self.factory.define_get(move |_: &()| getter())?;
        let facade = factory.register_or_default(dispatcher)?;
        self.factory = factory;
        self.facade = Some(facade.clone());
        Ok(facade)
    }

    fn ensure_unregistered(&self, method: &'static str) -> Result<()> {
        if self.is_registered() {
            return Err(StoreError::AlreadyRegistered { method });
        }
        Ok(())
    }
}

impl<T: 'static, P: 'static> Default for StoreSingleton<T, P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, P> fmt::Debug for StoreSingleton<T, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreSingleton")
            .field("registered", &self.facade.is_some())
            .field("getter", &self.getter.is_some())
            .field("definition", self.factory.definition())
            .finish()
    }
}
