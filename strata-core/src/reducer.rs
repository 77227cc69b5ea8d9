//! Reducers: pure functions from (state, action) to the next state.
//!
//! State trees are JSON values. A reducer receives `None` when its slice has
//! no value yet and must then produce its initial state.

use crate::action::{Action, ActionKind};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use std::{marker::PhantomData, sync::Arc};

/// A state tree or slice.
pub type State = Value;

/// A reducer shared between the registry, snapshots and the store.
pub type DynReducer = Arc<dyn Reducer>;

/// A pure state transition function.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a `Reducer`",
    label = "missing `Reducer` implementation",
    note = "Reducers are `Fn(Option<State>, &Action) -> State`."
)]
pub trait Reducer: Send + Sync + 'static {
    /// Computes the next state. `state` is `None` before the slice exists.
    fn reduce(&self, state: Option<State>, action: &Action) -> State;
}

// Blanket impl for closures
impl<F> Reducer for F
where
    F: Fn(Option<State>, &Action) -> State + Send + Sync + 'static,
{
    fn reduce(&self, state: Option<State>, action: &Action) -> State {
        (self)(state, action)
    }
}

/// A reducer over a serde-typed slice state and a typed action enum.
///
/// Actions that do not decode into `A` leave the state untouched, as does a
/// stored value that does not decode into `S`.
pub struct TypedReducer<S, A, F> {
    reduce: F,
    _phantom: PhantomData<fn() -> (S, A)>,
}

/// Builds a [`Reducer`] from an exhaustive `match` over a typed action.
///
/// # Example
///
/// ```rust,ignore
/// let reducer = typed_reducer(|count: i64, action: Counter| match action {
///     Counter::Increment => count + 1,
///     Counter::IncrementBy(n) => count + n,
/// });
/// ```
pub fn typed_reducer<S, A, F>(reduce: F) -> TypedReducer<S, A, F>
where
    S: Serialize + DeserializeOwned + Default,
    A: ActionKind,
    F: Fn(S, A) -> S + Send + Sync + 'static,
{
    TypedReducer {
        reduce,
        _phantom: PhantomData,
    }
}

impl<S, A, F> Reducer for TypedReducer<S, A, F>
where
    S: Serialize + DeserializeOwned + Default + 'static,
    A: ActionKind + 'static,
    F: Fn(S, A) -> S + Send + Sync + 'static,
{
    fn reduce(&self, state: Option<State>, action: &Action) -> State {
        let typed = A::from_action(action);

        let current = match state {
            Some(value) if typed.is_none() => return value,
            Some(value) => match S::deserialize(&value) {
                Ok(current) => current,
                Err(_) => return value,
            },
            None => S::default(),
        };

        let next = match typed {
            Some(action) => (self.reduce)(current, action),
            None => current,
        };
        serde_json::to_value(next).unwrap_or(Value::Null)
    }
}
