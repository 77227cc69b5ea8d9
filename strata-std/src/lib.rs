//! # strata-std
//!
//! Standard implementations for the Strata state container.
//!
//! This crate provides:
//! - **Reducer registry**: [`ReducerRegistry`], [`default_registry`]
//! - **Reducer combination**: [`combine_reducers`]
//! - **Store**: [`Store`], [`StoreBuilder`]
//! - **Store composition**: [`create_store`], which keeps a store in sync
//!   with a registry
//! - **Handler reducers**: [`create_reducer`]
//! - **Async actions**: [`asyncify_action`], [`create_ajax_action`]
//! - **Helpers**: [`merge_with_current`], [`FetchOnUpdate`]
//! - **Standard hooks**: Logging, Filter

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

// Re-export core traits
pub use strata_core;

// Modules
pub mod ajax;
pub mod combine;
pub mod compose;
pub mod handlers;
pub mod hooks;
pub mod merge;
pub mod registry;
pub mod store;
pub mod testing;
pub mod watch;

pub use ajax::{AjaxAction, AjaxError, AsyncAction, asyncify_action, create_ajax_action};
pub use combine::{CombinedReducer, combine_reducers};
pub use compose::{Enhancer, compose_reducers, create_store, placeholder_reducer};
pub use handlers::{HandlerReducer, create_reducer};
pub use merge::{merge_with_current, merge_with_current_or};
pub use registry::{
    ChangeListener, ReducerMap, ReducerRegistry, ReducerSnapshot, default_registry,
    register_reducer,
};
pub use store::{INIT_ACTION, REPLACE_ACTION, Store, StoreBuilder, SubscriptionId};
pub use watch::{FetchOnUpdate, Props};
