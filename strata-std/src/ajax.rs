//! Asynchronous request actions.
//!
//! [`asyncify_action`] turns an action template into the request /
//! completed / failed triple. [`create_ajax_action`] drives that triple from
//! an externally supplied future: the request action is dispatched
//! immediately, the outcome is dispatched from a spawned task once the
//! future resolves.
//!
//! A rejected future is never an error for the caller; it becomes a
//! `<TYPE>_FAILED` action with `error: true`.

use crate::store::Store;
use serde::Serialize;
use serde_json::Value;
use std::{fmt::Display, future::Future, sync::Arc};
use strata_core::{Action, State, StoreError};
use thiserror::Error;
use tokio::{runtime::Handle, task::JoinHandle};

/// Suffix appended to the template type for the success action.
pub const COMPLETED_SUFFIX: &str = "_COMPLETED";

/// Suffix appended to the template type for the failure action.
pub const FAILED_SUFFIX: &str = "_FAILED";

/// Errors from starting an ajax action.
#[derive(Error, Debug)]
pub enum AjaxError {
    /// No tokio runtime is available to deliver the outcome.
    #[error("no tokio runtime to deliver the request outcome: {0}")]
    NoRuntime(#[from] tokio::runtime::TryCurrentError),

    /// The request action was rejected by the store.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// The request / completed / failed triple derived from an action template.
#[derive(Debug, Clone, PartialEq)]
pub struct AsyncAction {
    request: Action,
}

/// Derive the asynchronous action triple from `action`.
pub fn asyncify_action(action: Action) -> AsyncAction {
    AsyncAction { request: action }
}

impl AsyncAction {
    /// The template action itself, dispatched when the request starts.
    pub fn request(&self) -> &Action {
        &self.request
    }

    /// Take the template action.
    pub fn into_request(self) -> Action {
        self.request
    }

    /// `<TYPE>_COMPLETED` carrying the response, with the original payload
    /// as `meta`.
    pub fn completed(&self, response: impl Into<Value>) -> Action {
        Action::new(format!("{}{COMPLETED_SUFFIX}", self.request.action_type))
            .with_payload(response)
            .with_meta(self.request.payload.clone())
    }

    /// `<TYPE>_FAILED` carrying the error, with the original payload as
    /// `meta` and the error flag set.
    pub fn failed(&self, error: impl Into<Value>) -> Action {
        Action::new(format!("{}{FAILED_SUFFIX}", self.request.action_type))
            .with_payload(error)
            .with_meta(self.request.payload.clone())
            .with_error(true)
    }
}

/// An action backed by a future, created with [`create_ajax_action`].
pub struct AjaxAction<G> {
    action: AsyncAction,
    get_future: G,
}

/// Wrap `action` so that dispatching it runs the future produced by
/// `get_future`.
///
/// `get_future` receives the current state and may return `None` to skip
/// the request entirely. The resolved value is serialized into the
/// completed action's payload; an error is carried as its display string.
///
/// # Example
/// ```ignore
/// let load = create_ajax_action(
///     Action::new("LOAD_USER").with_payload(json!({ "id": 7 })),
///     |_state| Some(api.fetch_user(7)),
/// );
/// let delivered = load.dispatch(&store)?;
/// ```
pub fn create_ajax_action<G, Fut, T, E>(action: Action, get_future: G) -> AjaxAction<G>
where
    G: FnOnce(&State) -> Option<Fut>,
    Fut: Future<Output = Result<T, E>> + Send + 'static,
    T: Serialize + Send + 'static,
    E: Display + Send + 'static,
{
    AjaxAction {
        action: asyncify_action(action),
        get_future,
    }
}

impl<G> AjaxAction<G> {
    /// The action template.
    pub fn template(&self) -> &AsyncAction {
        &self.action
    }

    /// Start the request against `store`.
    ///
    /// Dispatches the request action synchronously, then spawns a task that
    /// awaits the future, yields once, and dispatches the completed or
    /// failed action. The yield keeps the outcome dispatch out of the
    /// future's own poll, so a failure while handling the completed action
    /// is never reported as a request failure.
    ///
    /// Returns `Ok(None)` when `get_future` declined to start a request.
    /// There is no cancellation: dropping the handle does not stop delivery.
    pub fn dispatch<Fut, T, E>(self, store: &Arc<Store>) -> Result<Option<JoinHandle<()>>, AjaxError>
    where
        G: FnOnce(&State) -> Option<Fut>,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
        T: Serialize + Send + 'static,
        E: Display + Send + 'static,
    {
        let runtime = Handle::try_current()?;
        let state = store.get_state();
        let Some(future) = (self.get_future)(&state) else {
            return Ok(None);
        };

        store.dispatch(self.action.request().clone())?;
        Ok(Some(deliver(&runtime, Arc::clone(store), self.action, future)))
    }
}

fn deliver<Fut, T, E>(
    runtime: &Handle,
    store: Arc<Store>,
    template: AsyncAction,
    future: Fut,
) -> JoinHandle<()>
where
    Fut: Future<Output = Result<T, E>> + Send + 'static,
    T: Serialize + Send + 'static,
    E: Display + Send + 'static,
{
    runtime.spawn(async move {
        let action = match future.await {
            Ok(response) => match serde_json::to_value(response) {
                Ok(payload) => template.completed(payload),
                Err(err) => template.failed(err.to_string()),
            },
            Err(err) => template.failed(err.to_string()),
        };
        tokio::task::yield_now().await;

        if let Err(_err) = store.dispatch(action) {
            #[cfg(feature = "tracing")]
            tracing::warn!(error = %_err, "Failed to dispatch request outcome");
        }
    })
}
