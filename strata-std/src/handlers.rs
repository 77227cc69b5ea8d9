//! Handler-table reducers.
//!
//! [`create_reducer`] builds a reducer from per-action-type handlers. The
//! incoming action type is normalized with [`handler_key`], so a handler
//! registered for `THING_HAPPENED` also receives `thing-happened`,
//! `thingHappened` and `ThingHappened`.
//!
//! [`handler_key`]: strata_core::handler_key

use serde_json::Value;
use std::{collections::HashMap, sync::Arc};
use strata_core::{Action, Reducer, State, normalize_handler_name};

type Handler = Arc<dyn Fn(State, &Value, &Value) -> State + Send + Sync>;
type ErrorHandler = Arc<dyn Fn(State, &str, &Value, &Value) -> State + Send + Sync>;

/// A reducer dispatching to handlers by normalized action type.
///
/// Lookup order:
/// 1. the handler registered for the action's type, called with
///    `(state, payload, meta)`;
/// 2. for actions with `error` set, the error handler, called with
///    `(state, action_type, payload, meta)`;
/// 3. otherwise the state is returned unchanged.
#[derive(Clone)]
pub struct HandlerReducer {
    initial_state: State,
    handlers: HashMap<String, Handler>,
    error_handler: Option<ErrorHandler>,
}

/// Start a handler-table reducer with the given initial state.
///
/// # Example
/// ```ignore
/// let reducer = create_reducer(json!([]))
///     .on("TODO_ADDED", |state, payload, _meta| { ... })
///     .on_error(|state, _action_type, _payload, _meta| state);
/// ```
pub fn create_reducer(initial_state: impl Into<State>) -> HandlerReducer {
    HandlerReducer {
        initial_state: initial_state.into(),
        handlers: HashMap::new(),
        error_handler: None,
    }
}

impl HandlerReducer {
    /// Handle an action type. `name` may be the action type in any casing or
    /// the handler key itself (`onThingHappened`).
    pub fn on<F>(mut self, name: &str, handler: F) -> Self
    where
        F: Fn(State, &Value, &Value) -> State + Send + Sync + 'static,
    {
        self.handlers
            .insert(normalize_handler_name(name), Arc::new(handler));
        self
    }

    /// Fallback for error actions that have no dedicated handler.
    pub fn on_error<F>(mut self, handler: F) -> Self
    where
        F: Fn(State, &str, &Value, &Value) -> State + Send + Sync + 'static,
    {
        self.error_handler = Some(Arc::new(handler));
        self
    }

    /// Check whether an action type has a dedicated handler.
    pub fn handles(&self, action_type: &str) -> bool {
        self.handlers
            .contains_key(&normalize_handler_name(action_type))
    }

    /// The state used when the slice has no value yet.
    pub fn initial_state(&self) -> &State {
        &self.initial_state
    }
}

impl Reducer for HandlerReducer {
    fn reduce(&self, state: Option<State>, action: &Action) -> State {
        let state = state.unwrap_or_else(|| self.initial_state.clone());

        if let Some(handler) = self.handlers.get(&action.handler_key()) {
            return handler(state, &action.payload, &action.meta);
        }

        match &self.error_handler {
            Some(handler) if action.error => {
                handler(state, &action.action_type, &action.payload, &action.meta)
            }
            _ => state,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn describe(label: &'static str) -> impl Fn(State, &Value, &Value) -> State {
        move |state: State, payload: &Value, meta: &Value| {
            json!(format!(
                "{}, {label} with {} & {}",
                state.as_str().unwrap_or_default(),
                payload.as_str().unwrap_or_default(),
                meta.as_str().unwrap_or_default()
            ))
        }
    }

    #[test]
    fn test_initial_state_when_absent() {
        let reducer = create_reducer("nothing");
        assert_eq!(reducer.reduce(None, &Action::new("ANY")), json!("nothing"));
    }

    #[test]
    fn test_handler_name_forms() {
        let reducer = create_reducer("s")
            .on("onThingHappened", describe("a"))
            .on("OTHER_THING", describe("b"));

        assert!(reducer.handles("thing-happened"));
        assert!(reducer.handles("otherThing"));
        assert!(!reducer.handles("missing"));
    }

    #[test]
    fn test_error_fallback_receives_action_type() {
        let reducer = create_reducer(json!([])).on_error(|state, action_type, payload, _meta| {
            let mut errors = state.as_array().cloned().unwrap_or_default();
            errors.push(json!({"type": action_type, "reason": payload}));
            Value::Array(errors)
        });

        let failed = Action::new("LOAD_FAILED").with_payload("timeout").with_error(true);
        assert_eq!(
            reducer.reduce(None, &failed),
            json!([{"type": "LOAD_FAILED", "reason": "timeout"}])
        );

        // without the error flag the fallback is not used
        let plain = Action::new("LOAD_FAILED").with_payload("timeout");
        assert_eq!(reducer.reduce(None, &plain), json!([]));
    }

    #[test]
    fn test_dedicated_handler_beats_error_fallback() {
        let reducer = create_reducer("s")
            .on("LOAD_FAILED", describe("failed"))
            .on_error(|_state, _action_type, _payload, _meta| json!("fallback"));

        let failed = Action::new("LOAD_FAILED").with_payload("p").with_error(true);
        assert_eq!(reducer.reduce(None, &failed), json!("s, failed with p & "));
    }
}
