//! Error types for Strata.
//!
//! This module provides a structured error hierarchy using `thiserror`:
//!
//! - [`StrataError`] - Top-level error type for all Strata operations
//! - [`StoreError`] - Misuse of the store layer (bad preloaded state,
//!   dispatching from inside a reducer, a hook rejecting an action)
//! - [`BoxError`] - Errors returned by user hooks

use thiserror::Error;

/// A boxed error type for dynamic error handling.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Top-level error type for all Strata operations.
#[derive(Error, Debug)]
pub enum StrataError {
    /// An error occurred in the store layer.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// A typed action or state could not be converted to or from JSON.
    #[error("payload conversion failed: {0}")]
    Payload(#[from] serde_json::Error),

    /// A custom error occurred.
    #[error(transparent)]
    Custom(BoxError),
}

/// Errors raised by the store layer.
///
/// These are the only errors the reducer registry and store composer ever
/// surface; they are passed through unchanged.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The preloaded state was not an object (or `null`).
    #[error("preloaded state must be an object or null, got {0}")]
    InvalidPreloadedState(&'static str),

    /// A reducer tried to dispatch while the store was reducing.
    #[error("reducers may not dispatch actions (while reducing `{0}`)")]
    ReducerDispatch(String),

    /// A store hook returned an error for the action.
    #[error("hook rejected action `{action_type}`")]
    Hook {
        /// Type of the rejected action.
        action_type: String,
        /// The hook's error.
        #[source]
        source: BoxError,
    },
}

impl From<BoxError> for StrataError {
    fn from(err: BoxError) -> Self {
        StrataError::Custom(err)
    }
}

/// Name of a JSON value's kind, for error messages.
pub fn value_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
