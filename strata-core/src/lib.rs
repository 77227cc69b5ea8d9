//! # strata-core
//!
//! Core traits for the Strata reducer registry and store.
//!
//! This crate has minimal dependencies and is designed to be imported by
//! feature modules that only define reducers and actions, without pulling in
//! the registry and store from `strata-std`.
//!
//! # Building Blocks
//!
//! ## [`Action`] and [`ActionKind`]
//!
//! An [`Action`] is the boundary representation: a type string, a payload,
//! metadata and an error flag. [`ActionKind`] is the typed representation,
//! an enum whose variants map to action types.
//!
//! ## [`Reducer`]
//!
//! A pure function `(Option<State>, &Action) -> State`. Closures implement it
//! directly; [`typed_reducer`] builds one from a `match` over an
//! [`ActionKind`].
//!
//! ## [`Hook`]
//!
//! A store extension point that sees every action before the reducer does
//! and decides whether it continues ([`HookResult::Next`]) or is swallowed
//! ([`HookResult::Stop`]).
//!
//! ## [`handler_key`]
//!
//! The boundary string transform: any casing of an action type maps to a
//! single `onXxx` handler key.
//!
//! # Error Types
//!
//! - [`StrataError`] - Top-level error type
//! - [`StoreError`] - Store-layer misuse
//! - [`BoxError`] - Hook errors

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod action;
mod convert;
mod error;
mod hook;
mod reducer;

// Re-exports
pub use action::{Action, ActionKind};
pub use convert::{handler_key, normalize_handler_name};
pub use error::{BoxError, StoreError, StrataError, value_kind};
pub use hook::{Hook, HookResult};
pub use reducer::{DynReducer, Reducer, State, TypedReducer, typed_reducer};
