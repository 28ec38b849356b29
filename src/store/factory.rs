use super::definition::{Definition, Response};
use super::store::Store;
use crate::dispatcher::{ActionType, ActionTypes, Dispatcher, IntoDispatcher};
use crate::error::{Result, StoreError};
use std::fmt;
use std::sync::Arc;

/// Immutable builder for a store [`Definition`].
///
/// Every `define_*` method leaves the receiver untouched and returns a new
/// factory, so a partially built factory can be shared and extended in
/// different directions. Each field may be set once per lineage; response
/// handlers merge, but an action type can only be claimed once.
///
/// # Examples
///
/// ```
/// use general_store::{response, SimpleDispatcher, StoreFactory};
/// use std::sync::Arc;
///
/// #[derive(Clone, Default)]
/// struct Counter {
///     count: i32,
/// }
///
/// let base = StoreFactory::<Counter, i32, ()>::new()
///     .define_get(|state: &Counter| state.count)?;
///
/// let counting = base
///     .define_initial_state(Counter { count: 10 })?
///     .define_responses([("INCREMENT", response(|state: &mut Counter, _: &()| state.count += 1))])?;
///
/// // The base factory is unchanged
/// assert!(base.definition().initial_state().is_none());
///
/// let store = counting.register(Arc::new(SimpleDispatcher::new()))?;
/// assert_eq!(store.get(), Some(10));
/// # Ok::<(), general_store::StoreError>(())
/// ```
///
/// Response mappings are checked by the type system. A bare string is not a
/// mapping:
///
/// ```compile_fail
/// use general_store::StoreFactory;
///
/// let _ = StoreFactory::<i32, i32, ()>::new().define_responses("testAction");
/// ```
///
/// Neither is a function:
///
/// ```compile_fail
/// use general_store::StoreFactory;
///
/// let _ = StoreFactory::<i32, i32, ()>::new().define_responses(|_: &mut i32, _: &()| {});
/// ```
///
/// And every value in a mapping must be a handler:
///
/// ```compile_fail
/// use general_store::StoreFactory;
///
/// let _ = StoreFactory::<i32, i32, ()>::new().define_responses([("TESTING", None::<i32>)]);
/// ```
pub struct StoreFactory<S, T, P> {
    definition: Definition<S, T, P>,
}

impl<S, T, P> StoreFactory<S, T, P>
where
    S: Clone + Send + Sync + 'static,
    T: 'static,
    P: 'static,
{
    /// Create a factory with an empty definition.
    pub fn new() -> Self {
        Self {
            definition: Definition::default(),
        }
    }

    fn with_definition(definition: Definition<S, T, P>) -> Self {
        Self { definition }
    }

    /// Name the store. The name appears in log fields and in the facade.
    pub fn define_name(&self, name: impl Into<String>) -> Result<Self> {
        const METHOD: &str = "StoreFactory::define_name";
        if self.definition.name.is_some() {
            return Err(StoreError::AlreadyDefined {
                method: METHOD,
                field: "name",
            });
        }
        let name = name.into();
        if name.is_empty() {
            return Err(StoreError::invalid_argument(
                METHOD,
                "expected a non-empty store name",
            ));
        }

        let mut definition = self.definition.clone();
        definition.name = Some(name);
        Ok(Self::with_definition(definition))
    }

    /// Set the function that derives the store's public value from its state.
    pub fn define_get<F>(&self, getter: F) -> Result<Self>
    where
        F: Fn(&S) -> T + Send + Sync + 'static,
    {
        if self.definition.getter.is_some() {
            return Err(StoreError::AlreadyDefined {
                method: "StoreFactory::define_get",
                field: "getter",
            });
        }

        let mut definition = self.definition.clone();
        definition.getter = Some(Arc::new(getter));
        Ok(Self::with_definition(definition))
    }

    /// Set the state the store starts from.
    pub fn define_initial_state(&self, initial_state: S) -> Result<Self> {
        if self.definition.initial_state.is_some() {
            return Err(StoreError::AlreadyDefined {
                method: "StoreFactory::define_initial_state",
                field: "initial state",
            });
        }

        let mut definition = self.definition.clone();
        definition.initial_state = Some(initial_state);
        Ok(Self::with_definition(definition))
    }

    /// Add response handlers from a mapping of action types to handlers.
    ///
    /// Fails if an action type is empty, already has a handler in this
    /// lineage, or appears twice in `responses`.
    pub fn define_responses<I, K>(&self, responses: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, Response<S, P>)>,
        K: Into<ActionType>,
    {
        self.merge_responses(
            "StoreFactory::define_responses",
            responses.into_iter().map(|(k, v)| (k.into(), v)),
        )
    }

    /// Add one handler for each of `action_types`.
    ///
    /// ```
    /// use general_store::StoreFactory;
    ///
    /// let factory = StoreFactory::<i32, i32, i32>::new()
    ///     .define_response_to(["ADD", "DEPOSIT"], |total: &mut i32, amount: &i32| *total += amount)?;
    /// assert!(factory.definition().response_to("DEPOSIT").is_some());
    ///
    /// assert!(factory.define_response_to("ADD", |_: &mut i32, _: &i32| {}).is_err());
    /// # Ok::<(), general_store::StoreError>(())
    /// ```
    pub fn define_response_to<F>(
        &self,
        action_types: impl Into<ActionTypes>,
        response: F,
    ) -> Result<Self>
    where
        F: Fn(&mut S, &P) + Send + Sync + 'static,
    {
        const METHOD: &str = "StoreFactory::define_response_to";
        let action_types = action_types.into();
        if action_types.is_empty() {
            return Err(StoreError::invalid_argument(
                METHOD,
                "expected at least one action type",
            ));
        }

        let response: Response<S, P> = Arc::new(response);
        self.merge_responses(
            METHOD,
            action_types
                .into_iter()
                .map(|action_type| (action_type, Arc::clone(&response))),
        )
    }

    fn merge_responses(
        &self,
        method: &'static str,
        responses: impl Iterator<Item = (ActionType, Response<S, P>)>,
    ) -> Result<Self> {
        let mut definition = self.definition.clone();

        for (action_type, response) in responses {
            if action_type.is_empty() {
                return Err(StoreError::invalid_argument(
                    method,
                    "expected action types to be non-empty strings",
                ));
            }
            if definition.responses.contains_key(&action_type) {
                return Err(StoreError::DuplicateResponse {
                    method,
                    action_type,
                });
            }
            definition.responses.insert(action_type, response);
        }

        Ok(Self::with_definition(definition))
    }

    /// Subscribe a store built from this definition to `dispatcher`.
    ///
    /// The dispatcher is checked for both `register` and `unregister` before
    /// anything is subscribed. The store starts from the defined initial
    /// state; registering without one fails with
    /// [`StoreError::InvalidArgument`]. See
    /// [`register_or_default`](StoreFactory::register_or_default) for state
    /// types with a default.
    pub fn register<D>(&self, dispatcher: D) -> Result<Store<S, T, P>>
    where
        D: IntoDispatcher<P>,
    {
        const METHOD: &str = "StoreFactory::register";
        let dispatcher = dispatcher.into_dispatcher(METHOD)?;
        let Some(initial_state) = self.definition.initial_state.clone() else {
            return Err(StoreError::invalid_argument(
                METHOD,
                "expected an initial state, define one or use register_or_default",
            ));
        };
        Ok(self.subscribe(dispatcher, initial_state))
    }

    /// Like [`register`](StoreFactory::register), but a store without an
    /// initial state starts from `S::default()`.
    pub fn register_or_default<D>(&self, dispatcher: D) -> Result<Store<S, T, P>>
    where
        S: Default,
        D: IntoDispatcher<P>,
    {
        let dispatcher = dispatcher.into_dispatcher("StoreFactory::register_or_default")?;
        let initial_state = self.definition.initial_state.clone().unwrap_or_default();
        Ok(self.subscribe(dispatcher, initial_state))
    }

    fn subscribe(&self, dispatcher: Arc<dyn Dispatcher<P>>, initial_state: S) -> Store<S, T, P> {
        let definition = &self.definition;
        Store::subscribe_to(
            dispatcher,
            definition.name.clone(),
            initial_state,
            definition.getter.clone(),
            definition.responses.clone(),
        )
    }
}

impl<S, T, P> StoreFactory<S, T, P> {
    /// Read-only view of the accumulated definition.
    pub fn definition(&self) -> &Definition<S, T, P> {
        &self.definition
    }
}

impl<S, T, P> Default for StoreFactory<S, T, P>
where
    S: Clone + Send + Sync + 'static,
    T: 'static,
    P: 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Clone, T, P> Clone for StoreFactory<S, T, P> {
    fn clone(&self) -> Self {
        Self {
            definition: self.definition.clone(),
        }
    }
}

impl<S: fmt::Debug, T, P> fmt::Debug for StoreFactory<S, T, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreFactory")
            .field("definition", &self.definition)
            .finish()
    }
}
