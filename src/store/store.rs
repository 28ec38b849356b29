use super::definition::{Getter, Response};
use crate::dispatcher::{Action, ActionType, DispatchCallback, DispatchToken, Dispatcher};
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, RwLock, Weak};

type Listener = Arc<dyn Fn() + Send + Sync>;

/// Handle returned by [`Store::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(usize);

struct StoreInner<S, T, P> {
    name: Option<String>,
    state: RwLock<S>,
    getter: Option<Getter<S, T>>,
    responses: HashMap<ActionType, Response<S, P>>,
    listeners: RwLock<Vec<(SubscriptionId, Listener)>>,
    next_listener: AtomicUsize,
    dispatcher: Arc<dyn Dispatcher<P>>,
    token: DispatchToken,
    removed: AtomicBool,
}

impl<S, T, P> StoreInner<S, T, P> {
    fn label(&self) -> &str {
        self.name.as_deref().unwrap_or("<anonymous>")
    }

    fn handle(&self, action: &Action<P>) {
        let Some(response) = self.responses.get(&action.action_type) else {
            return;
        };

        {
            let mut state = self.state.write().unwrap_or_else(|e| e.into_inner());
            response(&mut *state, &action.data);
        }
        tracing::trace!(
            store = self.label(),
            action_type = %action.action_type,
            "store handled action"
        );
        self.notify();
    }

    fn notify(&self) {
        // Listeners run without the lock so they can query or resubscribe
        let listeners: Vec<Listener> = self
            .listeners
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();
        for listener in listeners {
            listener();
        }
    }
}

impl<S, T, P> Drop for StoreInner<S, T, P> {
    fn drop(&mut self) {
        if !self.removed.swap(true, Ordering::SeqCst) {
            self.dispatcher.unregister(self.token);
            tracing::debug!(
                store = self.label(),
                token = %self.token,
                "dropped store, unregistered from dispatcher"
            );
        }
    }
}

/// A registered store.
///
/// Produced by [`StoreFactory::register`](crate::StoreFactory::register) or
/// [`StoreSingleton::register`](crate::StoreSingleton::register). Response
/// handlers mutate the state as actions arrive from the dispatcher, and
/// [`get`](Store::get) applies the getter to the current state. Clones are
/// handles to the same store.
pub struct Store<S, T, P> {
    inner: Arc<StoreInner<S, T, P>>,
}

impl<S, T, P> Store<S, T, P>
where
    S: Send + Sync + 'static,
    T: 'static,
    P: 'static,
{
    pub(crate) fn subscribe_to(
        dispatcher: Arc<dyn Dispatcher<P>>,
        name: Option<String>,
        initial_state: S,
        getter: Option<Getter<S, T>>,
        responses: HashMap<ActionType, Response<S, P>>,
    ) -> Self {
        let inner = Arc::new_cyclic(|weak: &Weak<StoreInner<S, T, P>>| {
            let weak = weak.clone();
            let callback: DispatchCallback<P> = Arc::new(move |action: &Action<P>| {
                if let Some(inner) = weak.upgrade() {
                    inner.handle(action);
                }
            });
            let token = dispatcher.register(callback);

            StoreInner {
                name,
                state: RwLock::new(initial_state),
                getter,
                responses,
                listeners: RwLock::new(Vec::new()),
                next_listener: AtomicUsize::new(0),
                dispatcher: Arc::clone(&dispatcher),
                token,
                removed: AtomicBool::new(false),
            }
        });

        tracing::debug!(
            store = inner.label(),
            token = %inner.token,
            responses = inner.responses.len(),
            "registered store with dispatcher"
        );
        Self { inner }
    }
}

impl<S, T, P> Store<S, T, P> {
    /// Apply the getter to the current state.
    ///
    /// Returns `None` if the store was defined without a getter.
    pub fn get(&self) -> Option<T> {
        let getter = self.inner.getter.as_ref()?;
        let state = self.inner.state.read().unwrap_or_else(|e| e.into_inner());
        Some(getter(&*state))
    }

    /// Read state without going through the getter.
    pub fn read<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&S) -> R,
    {
        let state = self.inner.state.read().unwrap_or_else(|e| e.into_inner());
        f(&*state)
    }

    /// Subscribe to state changes.
    ///
    /// The callback runs after every action this store responds to, and on
    /// [`trigger_change`](Store::trigger_change).
    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn() + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.inner.next_listener.fetch_add(1, Ordering::SeqCst));
        self.inner
            .listeners
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .push((id, Arc::new(callback)));
        id
    }

    /// Remove a change listener. Returns `false` if it was already removed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut listeners = self
            .inner
            .listeners
            .write()
            .unwrap_or_else(|e| e.into_inner());
        let before = listeners.len();
        listeners.retain(|(listener_id, _)| *listener_id != id);
        listeners.len() != before
    }

    /// Notify every listener without changing state.
    pub fn trigger_change(&self) {
        self.inner.notify();
    }

    pub fn name(&self) -> Option<&str> {
        self.inner.name.as_deref()
    }

    /// Token of this store's dispatcher subscription.
    pub fn dispatch_token(&self) -> DispatchToken {
        self.inner.token
    }

    /// Unsubscribe from the dispatcher. Later calls do nothing.
    ///
    /// Dropping the last handle to a store unsubscribes it as well.
    pub fn remove(&self) {
        if self.inner.removed.swap(true, Ordering::SeqCst) {
            return;
        }
        self.inner.dispatcher.unregister(self.inner.token);
        tracing::debug!(
            store = self.inner.label(),
            token = %self.inner.token,
            "removed store from dispatcher"
        );
    }

    pub fn is_removed(&self) -> bool {
        self.inner.removed.load(Ordering::SeqCst)
    }

    /// Whether two handles refer to the same store.
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Arc::ptr_eq(&a.inner, &b.inner)
    }
}

impl<S, T, P> Clone for Store<S, T, P> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: fmt::Debug, T, P> fmt::Debug for Store<S, T, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.inner.state.read().unwrap_or_else(|e| e.into_inner());
        f.debug_struct("Store")
            .field("name", &self.inner.name)
            .field("token", &self.inner.token)
            .field("state", &*state)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatcher::SimpleDispatcher;
    use crate::store::response;
    use crate::StoreFactory;

    #[derive(Clone, Debug, Default, PartialEq)]
    struct AppState {
        count: usize,
        name: String,
    }

    fn counter_store(dispatcher: Arc<SimpleDispatcher<usize>>) -> Store<AppState, usize, usize> {
        StoreFactory::new()
            .define_name("counter")
            .unwrap()
            .define_initial_state(AppState {
                count: 0,
                name: "test".to_string(),
            })
            .unwrap()
            .define_get(|state: &AppState| state.count)
            .unwrap()
            .define_responses([
                (
                    "INCREMENT",
                    response(|state: &mut AppState, by: &usize| state.count += by),
                ),
                (
                    "RESET",
                    response(|state: &mut AppState, _: &usize| state.count = 0),
                ),
            ])
            .unwrap()
            .register(dispatcher)
            .unwrap()
    }

    #[test]
    fn store_responds_to_actions() {
        let dispatcher = Arc::new(SimpleDispatcher::new());
        let store = counter_store(dispatcher.clone());

        assert_eq!(store.get(), Some(0));

        dispatcher.dispatch(&Action::new("INCREMENT", 42)).unwrap();
        assert_eq!(store.get(), Some(42));

        dispatcher.dispatch(&Action::new("RESET", 0)).unwrap();
        assert_eq!(store.get(), Some(0));
        assert_eq!(store.read(|state| state.name.clone()), "test");
    }

    #[test]
    fn unknown_actions_are_ignored() {
        let dispatcher = Arc::new(SimpleDispatcher::new());
        let store = counter_store(dispatcher.clone());
        let calls = Arc::new(AtomicUsize::new(0));
        let calls_clone = calls.clone();
        store.subscribe(move || {
            calls_clone.fetch_add(1, Ordering::SeqCst);
        });

        dispatcher.dispatch(&Action::new("DECREMENT", 1)).unwrap();

        assert_eq!(store.get(), Some(0));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn store_subscribe() {
        let dispatcher = Arc::new(SimpleDispatcher::new());
        let store = counter_store(dispatcher.clone());

        let call_count = Arc::new(AtomicUsize::new(0));
        let call_count_clone = call_count.clone();

        let id = store.subscribe(move || {
            call_count_clone.fetch_add(1, Ordering::SeqCst);
        });

        assert_eq!(call_count.load(Ordering::SeqCst), 0);

        dispatcher.dispatch(&Action::new("INCREMENT", 1)).unwrap();
        assert_eq!(call_count.load(Ordering::SeqCst), 1);

        store.trigger_change();
        assert_eq!(call_count.load(Ordering::SeqCst), 2);

        assert!(store.unsubscribe(id));
        assert!(!store.unsubscribe(id));

        dispatcher.dispatch(&Action::new("INCREMENT", 1)).unwrap();
        assert_eq!(call_count.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn listeners_can_read_the_store() {
        let dispatcher = Arc::new(SimpleDispatcher::new());
        let store = counter_store(dispatcher.clone());
        let seen = Arc::new(AtomicUsize::new(0));

        let seen_clone = seen.clone();
        let store_clone = store.clone();
        store.subscribe(move || {
            seen_clone.store(store_clone.get().unwrap_or_default(), Ordering::SeqCst);
        });

        dispatcher.dispatch(&Action::new("INCREMENT", 5)).unwrap();
        assert_eq!(seen.load(Ordering::SeqCst), 5);
    }

    #[test]
    fn remove_unregisters_once() {
        let dispatcher = Arc::new(SimpleDispatcher::new());
        let store = counter_store(dispatcher.clone());
        assert_eq!(dispatcher.len(), 1);

        store.remove();
        store.remove();
        assert!(store.is_removed());
        assert!(dispatcher.is_empty());

        dispatcher.dispatch(&Action::new("INCREMENT", 1)).unwrap();
        assert_eq!(store.get(), Some(0));
    }

    #[test]
    fn store_without_getter_yields_none() {
        let dispatcher = Arc::new(SimpleDispatcher::<()>::new());
        let store = StoreFactory::<AppState, usize, ()>::new()
            .register_or_default(dispatcher)
            .unwrap();

        assert_eq!(store.get(), None);
        assert_eq!(store.read(|state| state.clone()), AppState::default());
    }

    #[test]
    fn dropping_the_last_handle_unregisters() {
        let dispatcher = Arc::new(SimpleDispatcher::new());
        let store = counter_store(dispatcher.clone());
        let clone = store.clone();

        drop(store);
        assert_eq!(dispatcher.len(), 1);

        drop(clone);
        assert!(dispatcher.is_empty());
        dispatcher.dispatch(&Action::new("INCREMENT", 1)).unwrap();
    }

    #[test]
    fn clones_share_identity() {
        let dispatcher = Arc::new(SimpleDispatcher::new());
        let store = counter_store(dispatcher.clone());
        let other = counter_store(dispatcher);

        assert!(Store::ptr_eq(&store, &store.clone()));
        assert!(!Store::ptr_eq(&store, &other));
        assert_eq!(store.name(), Some("counter"));
        assert_ne!(store.dispatch_token(), other.dispatch_token());
    }
}
