use super::{Action, DispatchCallback, DispatchToken, Dispatcher};
use crate::error::{Result, StoreError};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, RwLock};
use std::thread::{self, ThreadId};

/// A synchronous dispatcher that forwards each action to every callback.
///
/// Callbacks run in registration order and one action settles before the
/// next one starts. Dispatching from inside a callback is rejected with
/// [`StoreError::NestedDispatch`]. Dispatches from other threads wait for the
/// running one to finish.
///
/// # Examples
///
/// ```
/// use general_store::{Action, SimpleDispatcher, StoreFactory};
/// use std::sync::Arc;
///
/// let dispatcher = Arc::new(SimpleDispatcher::new());
/// let store = StoreFactory::new()
///     .define_initial_state(0)?
///     .define_get(|count: &i32| *count)?
///     .define_response_to("INCREMENT", |count: &mut i32, by: &i32| *count += by)?
///     .register(dispatcher.clone())?;
///
/// dispatcher.dispatch(&Action::new("INCREMENT", 2))?;
/// assert_eq!(store.get(), Some(2));
/// # Ok::<(), general_store::StoreError>(())
/// ```
pub struct SimpleDispatcher<P> {
    next_id: AtomicU64,
    callbacks: RwLock<BTreeMap<DispatchToken, DispatchCallback<P>>>,
    // Held for the whole fan-out so concurrent dispatches run one at a time
    serial: Mutex<()>,
    dispatching: Mutex<Option<ThreadId>>,
}

impl<P> SimpleDispatcher<P> {
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(1),
            callbacks: RwLock::new(BTreeMap::new()),
            serial: Mutex::new(()),
            dispatching: Mutex::new(None),
        }
    }

    /// Forward `action` to every registered callback.
    ///
    /// Fails with [`StoreError::NestedDispatch`] when called from a callback
    /// of a dispatch still running on the current thread.
    pub fn dispatch(&self, action: &Action<P>) -> Result<()> {
        let current = thread::current().id();
        if *self.dispatching.lock().unwrap_or_else(|e| e.into_inner()) == Some(current) {
            return Err(StoreError::NestedDispatch {
                action_type: action.action_type.clone(),
            });
        }

        let _serial = self.serial.lock().unwrap_or_else(|e| e.into_inner());
        *self.dispatching.lock().unwrap_or_else(|e| e.into_inner()) = Some(current);
        let _guard = DispatchingGuard(&self.dispatching);

        // Snapshot so callbacks may register or unregister while we iterate
        let callbacks: Vec<_> = self
            .callbacks
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .values()
            .cloned()
            .collect();

        tracing::trace!(
            action_type = %action.action_type,
            callbacks = callbacks.len(),
            "dispatching action"
        );
        for callback in callbacks {
            callback(action);
        }
        Ok(())
    }

    /// Whether a dispatch is currently running.
    pub fn is_dispatching(&self) -> bool {
        self.dispatching
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .is_some()
    }

    /// Number of registered callbacks.
    pub fn len(&self) -> usize {
        self.callbacks.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<P> Default for SimpleDispatcher<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> Dispatcher<P> for SimpleDispatcher<P> {
    fn register(&self, callback: DispatchCallback<P>) -> DispatchToken {
        let token = DispatchToken::new(self.next_id.fetch_add(1, Ordering::SeqCst));
        self.callbacks
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(token, callback);
        token
    }

    fn unregister(&self, token: DispatchToken) {
        self.callbacks
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .remove(&token);
    }
}

/// Clears the dispatching thread even if a callback panics.
struct DispatchingGuard<'a>(&'a Mutex<Option<ThreadId>>);

impl Drop for DispatchingGuard<'_> {
    fn drop(&mut self) {
        *self.0.lock().unwrap_or_else(|e| e.into_inner()) = None;
    }
}
