//! Testing utilities for Strata.
//!
//! This module provides helpers for testing reducers, stores and registry
//! wiring.
//!
//! # Features
//!
//! - [`RecordingHook`]: A store hook that records every dispatched action
//! - [`RecordingListener`]: Records registry change notifications
//! - [`counter_reducer`]: A small integer reducer fixture

use crate::registry::ReducerSnapshot;
use serde_json::json;
use std::sync::{Arc, Mutex};
use strata_core::{Action, BoxError, Hook, HookResult, Reducer, State};

// ============================================================================
// Recording Hook
// ============================================================================

/// A hook that records all actions it sees.
///
/// # Example
///
/// ```rust,ignore
/// let recorder = RecordingHook::new();
/// let store = StoreBuilder::new(reducer).hook(recorder.clone()).build();
///
/// store.dispatch(Action::new("INCREMENT"))?;
/// assert_eq!(recorder.action_types(), ["INCREMENT"]);
/// ```
#[derive(Clone)]
pub struct RecordingHook {
    actions: Arc<Mutex<Vec<Action>>>,
    result: HookResult,
}

impl RecordingHook {
    /// Create a new recording hook that returns `Next`.
    pub fn new() -> Self {
        Self::with_result(HookResult::Next)
    }

    /// Create a recording hook that returns a specific result.
    pub fn with_result(result: HookResult) -> Self {
        Self {
            actions: Arc::new(Mutex::new(Vec::new())),
            result,
        }
    }

    /// Get a clone of the recorded actions.
    pub fn actions(&self) -> Vec<Action> {
        self.actions.lock().unwrap().clone()
    }

    /// Get the recorded action types, in dispatch order.
    pub fn action_types(&self) -> Vec<String> {
        self.actions
            .lock()
            .unwrap()
            .iter()
            .map(|action| action.action_type.clone())
            .collect()
    }

    /// Get the number of recorded actions.
    pub fn count(&self) -> usize {
        self.actions.lock().unwrap().len()
    }

    /// Clear all recorded actions.
    pub fn clear(&self) {
        self.actions.lock().unwrap().clear();
    }
}

impl Default for RecordingHook {
    fn default() -> Self {
        Self::new()
    }
}

impl Hook for RecordingHook {
    fn on_action(&self, action: &Action, _state: &State) -> Result<HookResult, BoxError> {
        self.actions.lock().unwrap().push(action.clone());
        Ok(self.result)
    }
}

// ============================================================================
// Recording Listener
// ============================================================================

/// Records the slice names of every registry snapshot it is notified with.
///
/// # Example
///
/// ```rust,ignore
/// let listener = RecordingListener::new();
/// registry.set_change_listener(listener.callback());
/// registry.register("count", counter_reducer());
///
/// assert_eq!(listener.notifications(), vec![vec!["count".to_string()]]);
/// ```
#[derive(Clone, Default)]
pub struct RecordingListener {
    notifications: Arc<Mutex<Vec<Vec<String>>>>,
}

impl RecordingListener {
    /// Create a new recording listener.
    pub fn new() -> Self {
        Self::default()
    }

    /// A callback suitable for `ReducerRegistry::set_change_listener`.
    pub fn callback(&self) -> impl Fn(&ReducerSnapshot) + Send + Sync + 'static {
        let notifications = self.notifications.clone();
        move |snapshot: &ReducerSnapshot| {
            notifications
                .lock()
                .unwrap()
                .push(snapshot.names().map(str::to_owned).collect());
        }
    }

    /// The slice names of each notification, oldest first.
    pub fn notifications(&self) -> Vec<Vec<String>> {
        self.notifications.lock().unwrap().clone()
    }

    /// Get the number of notifications received.
    pub fn count(&self) -> usize {
        self.notifications.lock().unwrap().len()
    }
}

// ============================================================================
// Counter Reducer
// ============================================================================

/// An integer reducer: starts at `0`, handles `INCREMENT` and `DECREMENT`.
pub fn counter_reducer() -> impl Reducer + Clone {
    |state: Option<State>, action: &Action| {
        let Some(state) = state else {
            return json!(0);
        };
        let Some(count) = state.as_i64() else {
            return state;
        };
        match action.action_type.as_str() {
            "INCREMENT" => json!(count + 1),
            "DECREMENT" => json!(count - 1),
            _ => state,
        }
    }
}
