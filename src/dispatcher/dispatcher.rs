use super::Action;
use crate::error::{Result, StoreError};
use std::fmt;
use std::sync::Arc;

/// Callback a store hands to a dispatcher.
pub type DispatchCallback<P> = Arc<dyn Fn(&Action<P>) + Send + Sync>;

/// Closure form of [`Dispatcher::register`].
pub type RegisterFn<P> = Arc<dyn Fn(DispatchCallback<P>) -> DispatchToken + Send + Sync>;

/// Closure form of [`Dispatcher::unregister`].
pub type UnregisterFn = Arc<dyn Fn(DispatchToken) + Send + Sync>;

/// Opaque subscription token returned by [`Dispatcher::register`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DispatchToken(u64);

impl DispatchToken {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn id(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for DispatchToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ID_{}", self.0)
    }
}

/// The capabilities a store needs from a dispatcher.
pub trait Dispatcher<P>: Send + Sync {
    /// Subscribe `callback` to every dispatched action.
    fn register(&self, callback: DispatchCallback<P>) -> DispatchToken;

    /// Drop the callback registered under `token`.
    fn unregister(&self, token: DispatchToken);
}

impl<P, D> Dispatcher<P> for Arc<D>
where
    D: Dispatcher<P> + ?Sized,
{
    fn register(&self, callback: DispatchCallback<P>) -> DispatchToken {
        (**self).register(callback)
    }

    fn unregister(&self, token: DispatchToken) {
        (**self).unregister(token)
    }
}

/// Conversion performed at the registration boundary.
///
/// Any [`Dispatcher`] behind an `Arc`, including `Arc<dyn Dispatcher<P>>`,
/// converts unconditionally. Dispatchers assembled at run time, such as
/// [`FnDispatcher`], are checked for both capabilities here and rejected
/// with [`StoreError::InvalidDispatcher`].
pub trait IntoDispatcher<P> {
    fn into_dispatcher(self, method: &'static str) -> Result<Arc<dyn Dispatcher<P>>>;
}

impl<P, D> IntoDispatcher<P> for Arc<D>
where
    D: Dispatcher<P> + ?Sized + 'static,
{
    fn into_dispatcher(self, _method: &'static str) -> Result<Arc<dyn Dispatcher<P>>> {
        Ok(Arc::new(self))
    }
}

/// A dispatcher assembled from closures.
///
/// Useful when bridging to a dispatcher that lives outside Rust's type
/// system. Either capability may be missing until it is supplied; a store
/// refuses to register with it unless both are present.
///
/// ```
/// use general_store::{DispatchToken, FnDispatcher, StoreFactory};
///
/// let incomplete = FnDispatcher::<()>::new().on_register(|_| DispatchToken::new(1));
/// let factory = StoreFactory::<(), (), ()>::new();
/// assert!(factory.register(incomplete).is_err());
/// ```
pub struct FnDispatcher<P> {
    register: Option<RegisterFn<P>>,
    unregister: Option<UnregisterFn>,
}

impl<P> FnDispatcher<P> {
    pub fn new() -> Self {
        Self {
            register: None,
            unregister: None,
        }
    }

    pub fn on_register<F>(mut self, register: F) -> Self
    where
        F: Fn(DispatchCallback<P>) -> DispatchToken + Send + Sync + 'static,
    {
        self.register = Some(Arc::new(register));
        self
    }

    pub fn on_unregister<F>(mut self, unregister: F) -> Self
    where
        F: Fn(DispatchToken) + Send + Sync + 'static,
    {
        self.unregister = Some(Arc::new(unregister));
        self
    }
}

impl<P> Default for FnDispatcher<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> fmt::Debug for FnDispatcher<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnDispatcher")
            .field("register", &self.register.is_some())
            .field("unregister", &self.unregister.is_some())
            .finish()
    }
}

struct BoundFnDispatcher<P> {
    register: RegisterFn<P>,
    unregister: UnregisterFn,
}

impl<P> Dispatcher<P> for BoundFnDispatcher<P> {
    fn register(&self, callback: DispatchCallback<P>) -> DispatchToken {
        (self.register)(callback)
    }

    fn unregister(&self, token: DispatchToken) {
        (self.unregister)(token)
    }
}

impl<P: 'static> IntoDispatcher<P> for FnDispatcher<P> {
    fn into_dispatcher(self, method: &'static str) -> Result<Arc<dyn Dispatcher<P>>> {
        let register = self.register.ok_or(StoreError::InvalidDispatcher {
            method,
            missing: "register",
        })?;
        let unregister = self.unregister.ok_or(StoreError::InvalidDispatcher {
            method,
            missing: "unregister",
        })?;
        Ok(Arc::new(BoundFnDispatcher {
            register,
            unregister,
        }))
    }
}
