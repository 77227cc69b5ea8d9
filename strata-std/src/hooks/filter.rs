//! Filter hook that swallows actions failing a predicate.

use strata_core::{Action, BoxError, Hook, HookResult, State};

/// A hook that only lets through actions matching a predicate.
///
/// Rejected actions never reach the reducer and are not an error.
pub struct FilterHook<F> {
    predicate: F,
}

impl<F> FilterHook<F>
where
    F: Fn(&Action, &State) -> bool + Send + Sync + 'static,
{
    /// Create a new filter hook.
    pub fn new(predicate: F) -> Self {
        Self { predicate }
    }
}

impl<F> Hook for FilterHook<F>
where
    F: Fn(&Action, &State) -> bool + Send + Sync + 'static,
{
    fn on_action(&self, action: &Action, state: &State) -> Result<HookResult, BoxError> {
        if (self.predicate)(action, state) {
            Ok(HookResult::Next)
        } else {
            Ok(HookResult::Stop)
        }
    }
}
