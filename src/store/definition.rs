use crate::dispatcher::ActionType;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Derives the value a store exposes from its state.
pub type Getter<S, T> = Arc<dyn Fn(&S) -> T + Send + Sync>;

/// Updates a store's state in response to an action payload.
pub type Response<S, P> = Arc<dyn Fn(&mut S, &P) + Send + Sync>;

/// Wrap a closure as a [`Response`].
///
/// `define_responses` takes a mapping of action types to handlers, and each
/// closure has its own type, so the handlers are stored behind an `Arc`.
///
/// ```
/// use general_store::{response, StoreFactory};
///
/// let factory = StoreFactory::<i32, i32, i32>::new().define_responses([
///     ("ADD", response(|count: &mut i32, by: &i32| *count += by)),
///     ("RESET", response(|count: &mut i32, _: &i32| *count = 0)),
/// ])?;
/// assert_eq!(factory.definition().responses().len(), 2);
/// # Ok::<(), general_store::StoreError>(())
/// ```
pub fn response<S, P, F>(handler: F) -> Response<S, P>
where
    F: Fn(&mut S, &P) + Send + Sync + 'static,
{
    Arc::new(handler)
}

/// Accumulated configuration for one store.
///
/// Every field starts unset. An unset field is `None`, which keeps it
/// distinct from any real value, including an initial state that is itself
/// `None`.
pub struct Definition<S, T, P> {
    pub(crate) name: Option<String>,
    pub(crate) getter: Option<Getter<S, T>>,
    pub(crate) initial_state: Option<S>,
    pub(crate) responses: HashMap<ActionType, Response<S, P>>,
}

impl<S, T, P> Definition<S, T, P> {
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn getter(&self) -> Option<&Getter<S, T>> {
        self.getter.as_ref()
    }

    pub fn initial_state(&self) -> Option<&S> {
        self.initial_state.as_ref()
    }

    pub fn responses(&self) -> &HashMap<ActionType, Response<S, P>> {
        &self.responses
    }

    /// Look up the handler registered for `action_type`.
    pub fn response_to(&self, action_type: &str) -> Option<&Response<S, P>> {
        self.responses.get(action_type)
    }
}

impl<S, T, P> Default for Definition<S, T, P> {
    fn default() -> Self {
        Self {
            name: None,
            getter: None,
            initial_state: None,
            responses: HashMap::new(),
        }
    }
}

impl<S: Clone, T, P> Clone for Definition<S, T, P> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            getter: self.getter.clone(),
            initial_state: self.initial_state.clone(),
            responses: self.responses.clone(),
        }
    }
}

impl<S: fmt::Debug, T, P> fmt::Debug for Definition<S, T, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut action_types: Vec<_> = self.responses.keys().collect();
        action_types.sort();
        f.debug_struct("Definition")
            .field("name", &self.name)
            .field("getter", &self.getter.is_some())
            .field("initial_state", &self.initial_state)
            .field("responses", &action_types)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_definition_is_unset() {
        let definition = Definition::<i32, i32, ()>::default();
        assert!(definition.name().is_none());
        assert!(definition.getter().is_none());
        assert!(definition.initial_state().is_none());
        assert!(definition.responses().is_empty());
    }

    #[test]
    fn debug_lists_sorted_action_types() {
        let mut definition = Definition::<i32, i32, ()>::default();
        definition
            .responses
            .insert("B".to_string(), response(|_: &mut i32, _: &()| {}));
        definition
            .responses
            .insert("A".to_string(), response(|_: &mut i32, _: &()| {}));

        let debug = format!("{:?}", definition);
        assert!(debug.contains(r#"responses: ["A", "B"]"#));
    }
}
