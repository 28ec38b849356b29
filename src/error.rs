//! Errors raised while defining, registering and dispatching to stores.
//!
//! Every variant describes a programming error at the call site: a builder
//! method called with the wrong arguments or in the wrong order. None of them
//! are transient, so callers are expected to fix the call rather than retry.

use thiserror::Error;

/// Error returned by the store builders and dispatchers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// A definition field was set twice in the same builder lineage.
    #[error("{method}: {field} is already defined. See the general_store docs on defining stores.")]
    AlreadyDefined {
        /// Builder method that was called.
        method: &'static str,
        /// Definition field that was already set.
        field: &'static str,
    },

    /// A singleton definition was modified after registration.
    #[error(
        "{method}: this store definition cannot be modified because it has already been \
         registered with a dispatcher. See the general_store docs on defining stores."
    )]
    AlreadyRegistered {
        /// Builder method that was called.
        method: &'static str,
    },

    /// A builder method received an argument it cannot use.
    #[error("{method}: {reason}. See the general_store docs on defining stores.")]
    InvalidArgument {
        /// Builder method that was called.
        method: &'static str,
        /// What was wrong with the argument.
        reason: String,
    },

    /// A response handler was defined twice for one action type.
    #[error("{method}: a response for action type \"{action_type}\" is already defined. See the general_store docs on defining stores.")]
    DuplicateResponse {
        /// Builder method that was called.
        method: &'static str,
        /// The conflicting action type.
        action_type: String,
    },

    /// A store was registered before a getter was defined.
    #[error(
        "{method}: a store cannot be registered without a getter. Use \
         StoreSingleton::define_get to define a getter. See the general_store docs on defining stores."
    )]
    MissingGetter {
        /// Builder method that was called.
        method: &'static str,
    },

    /// The dispatcher does not expose both `register` and `unregister`.
    #[error("{method}: expected a dispatcher with `register` and `unregister`, but `{missing}` is missing. See the general_store docs on defining stores.")]
    InvalidDispatcher {
        /// Builder method that was called.
        method: &'static str,
        /// The capability the dispatcher lacks.
        missing: &'static str,
    },

    /// An action was dispatched from a callback of a dispatch running on the
    /// same thread.
    #[error("cannot dispatch \"{action_type}\" in the middle of a dispatch")]
    NestedDispatch {
        /// The action type that was rejected.
        action_type: String,
    },
}

impl StoreError {
    pub(crate) fn invalid_argument(method: &'static str, reason: impl Into<String>) -> Self {
        StoreError::InvalidArgument {
            method,
            reason: reason.into(),
        }
    }
}

/// Result alias used across the crate.
pub type Result<T, E = StoreError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_method() {
        let err = StoreError::AlreadyDefined {
            method: "StoreFactory::define_get",
            field: "getter",
        };
        let message = err.to_string();
        assert!(message.starts_with("StoreFactory::define_get: getter is already defined."));
        assert!(message.ends_with("See the general_store docs on defining stores."));
    }

    #[test]
    fn duplicate_response_quotes_action_type() {
        let err = StoreError::DuplicateResponse {
            method: "StoreFactory::define_responses",
            action_type: "INCREMENT".to_string(),
        };
        assert!(err.to_string().contains("\"INCREMENT\""));
    }
}
