//! Dispatcher contract and the actions routed through it.
//!
//! Stores never own the dispatcher. They only need something that accepts a
//! callback, hands back a token, and forgets the callback again when given
//! that token. [`SimpleDispatcher`] is a complete implementation for
//! applications that do not bring their own.

mod action;
mod dispatcher;
mod simple;

pub use action::{Action, ActionType, ActionTypes};
pub use dispatcher::{
    DispatchCallback, DispatchToken, Dispatcher, FnDispatcher, IntoDispatcher, RegisterFn,
    UnregisterFn,
};
pub use simple::SimpleDispatcher;
