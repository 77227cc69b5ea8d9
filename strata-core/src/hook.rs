//! # Store hooks
//!
//! Hooks observe every action dispatched to a store before it reaches the
//! reducer. Like the `Next`/`Stop` contract of an event handler chain, a
//! hook either lets the action continue or swallows it.
//!
//! Hooks are the store's extension point: logging, recording for tests,
//! and action filtering are all hooks.

use crate::{action::Action, error::BoxError, reducer::State};

/// Result of hook execution indicating whether to continue or stop propagation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookResult {
    /// Continue to the next hook and finally to the reducer.
    Next,
    /// Swallow the action; later hooks and the reducer do not see it.
    Stop,
}

/// Observer invoked for every dispatched action.
///
/// `state` is the store state before the action is reduced.
#[diagnostic::on_unimplemented(
    message = "`{Self}` does not implement `Hook`",
    label = "missing `Hook` implementation",
    note = "Hooks must implement `on_action`, or be a `Fn(&Action, &State) -> Result<HookResult, BoxError>`."
)]
pub trait Hook: Send + Sync + 'static {
    /// Called when an action is dispatched.
    fn on_action(&self, action: &Action, state: &State) -> Result<HookResult, BoxError>;
}

impl<F> Hook for F
where
    F: Fn(&Action, &State) -> Result<HookResult, BoxError> + Send + Sync + 'static,
{
    fn on_action(&self, action: &Action, state: &State) -> Result<HookResult, BoxError> {
        (self)(action, state)
    }
}
