//! Logging hook for action observation.

use strata_core::{Action, BoxError, Hook, HookResult, State};

/// A hook that logs every dispatched action.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingHook;

impl Hook for LoggingHook {
    fn on_action(&self, action: &Action, _state: &State) -> Result<HookResult, BoxError> {
        #[cfg(feature = "tracing")]
        {
            if action.error {
                tracing::warn!(
                    action_type = %action.action_type,
                    payload = %action.payload,
                    "Dispatching error action"
                );
            } else {
                tracing::info!(action_type = %action.action_type, "Dispatching action");
                tracing::trace!(payload = %action.payload, meta = %action.meta, "Action body");
            }
        }
        #[cfg(not(feature = "tracing"))]
        {
            let _ = action; // Suppress unused warning
        }
        Ok(HookResult::Next)
    }
}
