//! # strata - Reducer Registry and Dynamic Store
//!
//! `strata` is a state container for applications whose state slices are
//! loaded incrementally. Feature modules register their reducers in a
//! [`ReducerRegistry`] whenever they load; a store created with
//! [`create_store`] picks up every registration by hot-swapping its
//! combined reducer, and keeps pre-seeded state for slices whose reducer has
//! not arrived yet.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use strata::prelude::*;
//! use serde_json::json;
//!
//! let registry = ReducerRegistry::new();
//! let store = create_store(&registry, Some(json!({ "count": 68 })), None)?;
//!
//! // `count` is preserved by a placeholder until its reducer registers.
//! registry.register("count", create_reducer(0).on("INCREMENT", |s, _, _| {
//!     json!(s.as_i64().unwrap_or(0) + 1)
//! }));
//!
//! store.dispatch(Action::new("increment"))?;
//! assert_eq!(store.get_state(), json!({ "count": 69 }));
//! ```

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

pub use strata_core::{
    // Actions
    Action,
    ActionKind,
    // Error types
    BoxError,
    // Reducers
    DynReducer,
    // Hooks
    Hook,
    HookResult,
    Reducer,
    State,
    StoreError,
    StrataError,
    TypedReducer,
    // Action-type conversion
    handler_key,
    typed_reducer,
};

// Registry and store
pub use strata_std::{
    ChangeListener, CombinedReducer, Enhancer, INIT_ACTION, REPLACE_ACTION, ReducerMap,
    ReducerRegistry, ReducerSnapshot, Store, StoreBuilder, SubscriptionId, combine_reducers,
    compose_reducers, create_store, default_registry, placeholder_reducer, register_reducer,
};

// Reducer and action helpers
pub use strata_std::{
    AjaxAction, AjaxError, AsyncAction, FetchOnUpdate, HandlerReducer, Props, asyncify_action,
    create_ajax_action, create_reducer, merge_with_current, merge_with_current_or,
};

/// Standard store hooks.
pub mod hooks {
    pub use strata_std::hooks::{FilterHook, LoggingHook};
}

/// Testing utilities.
pub mod testing {
    pub use strata_std::testing::{RecordingHook, RecordingListener, counter_reducer};
}

/// Prelude module - common imports for Strata.
///
/// # Usage
///
/// ```rust,ignore
/// use strata::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        // Actions
        Action,
        ActionKind,
        // Errors
        BoxError,
        // Core traits
        Hook,
        HookResult,
        Reducer,
        ReducerRegistry,
        State,
        Store,
        StoreBuilder,
        StoreError,
        // Helpers
        asyncify_action,
        create_ajax_action,
        create_reducer,
        create_store,
        typed_reducer,
    };
}

#[cfg(feature = "macros")]
pub use strata_macros::ActionKind;

#[doc(hidden)]
pub mod __private {
    pub use serde_json;
}
