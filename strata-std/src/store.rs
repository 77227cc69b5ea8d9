//! The state container.
//!
//! A [`Store`] owns the state tree and the active reducer. The reducer can
//! be hot-swapped with [`Store::replace_reducer`] without recreating the
//! store; this is what the store composer does whenever the reducer registry
//! changes.
//!
//! # Dispatch
//!
//! 1. Hooks run in registration order and may swallow the action.
//! 2. The active reducer computes the next state.
//! 3. Subscribers are notified with the new state.

use arc_swap::ArcSwap;
use std::{
    sync::{
        Arc, Mutex, MutexGuard, PoisonError,
        atomic::{AtomicU64, Ordering},
    },
    thread::{self, ThreadId},
};
use strata_core::{Action, DynReducer, Hook, HookResult, Reducer, State, StoreError};

/// Type of the action dispatched when a store is built.
pub const INIT_ACTION: &str = "@@strata/INIT";

/// Type of the action dispatched after the reducer is replaced.
pub const REPLACE_ACTION: &str = "@@strata/REPLACE";

type Subscriber = Arc<dyn Fn(&State) + Send + Sync>;

/// Handle returned by [`Store::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Builder for constructing a [`Store`].
///
/// # Example
/// ```ignore
/// let store = StoreBuilder::new(combine_reducers(reducers))
///     .preloaded_state(json!({ "count": 68 }))
///     .hook(LoggingHook)
///     .build();
/// ```
pub struct StoreBuilder {
    reducer: DynReducer,
    preloaded_state: Option<State>,
    hooks: Vec<Arc<dyn Hook>>,
}

impl StoreBuilder {
    /// Create a builder for a store driven by `reducer`.
    pub fn new<R: Reducer>(reducer: R) -> Self {
        Self::from_shared(Arc::new(reducer))
    }

    /// Create a builder from an already shared reducer.
    pub fn from_shared(reducer: DynReducer) -> Self {
        Self {
            reducer,
            preloaded_state: None,
            hooks: Vec::new(),
        }
    }

    /// Seed the store with an initial state tree.
    pub fn preloaded_state(mut self, state: State) -> Self {
        self.preloaded_state = Some(state);
        self
    }

    /// Add a hook. Hooks run in the order they are added.
    pub fn hook<H: Hook>(mut self, hook: H) -> Self {
        self.hooks.push(Arc::new(hook));
        self
    }

    /// Add an already shared hook.
    pub fn shared_hook(mut self, hook: Arc<dyn Hook>) -> Self {
        self.hooks.push(hook);
        self
    }

    /// Get the number of hooks added so far.
    pub fn hook_count(&self) -> usize {
        self.hooks.len()
    }

    /// Build the store, reducing [`INIT_ACTION`] over the preloaded state.
    pub fn build(self) -> Store {
        let initial = self
            .reducer
            .reduce(self.preloaded_state, &Action::new(INIT_ACTION));

        Store {
            reducer: ArcSwap::from_pointee(self.reducer),
            state: Mutex::new(initial),
            reducing: Mutex::new(None),
            hooks: self.hooks,
            subscribers: Mutex::new(Vec::new()),
            next_subscription: AtomicU64::new(0),
        }
    }
}

/// A state container with a hot-swappable reducer.
///
/// Dispatches are serialized: the reducer runs under the state lock. A
/// reducer that dispatches to the store it is reducing for gets
/// [`StoreError::ReducerDispatch`] instead of a deadlock.
pub struct Store {
    reducer: ArcSwap<DynReducer>,
    state: Mutex<State>,
    reducing: Mutex<Option<(ThreadId, String)>>,
    hooks: Vec<Arc<dyn Hook>>,
    subscribers: Mutex<Vec<(SubscriptionId, Subscriber)>>,
    next_subscription: AtomicU64,
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store").finish_non_exhaustive()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Clears the reducing marker even if the reducer panics.
struct ReducingGuard<'a> {
    slot: &'a Mutex<Option<(ThreadId, String)>>,
}

impl<'a> ReducingGuard<'a> {
    fn enter(slot: &'a Mutex<Option<(ThreadId, String)>>, action: &Action) -> Self {
        *lock(slot) = Some((thread::current().id(), action.action_type.clone()));
        Self { slot }
    }
}

impl Drop for ReducingGuard<'_> {
    fn drop(&mut self) {
        *lock(self.slot) = None;
    }
}

impl Store {
    /// A copy of the current state tree.
    pub fn get_state(&self) -> State {
        lock(&self.state).clone()
    }

    /// Read the state tree without copying it.
    pub fn select<T>(&self, selector: impl FnOnce(&State) -> T) -> T {
        selector(&lock(&self.state))
    }

    /// Dispatch an action.
    ///
    /// Returns the action back on success, including when a hook swallowed
    /// it.
    pub fn dispatch(&self, action: Action) -> Result<Action, StoreError> {
        self.check_not_reducing()?;

        if !self.hooks.is_empty() {
            let state = self.get_state();
            for hook in &self.hooks {
                match hook.on_action(&action, &state) {
                    Ok(HookResult::Next) => continue,
                    Ok(HookResult::Stop) => return Ok(action),
                    Err(source) => {
                        return Err(StoreError::Hook {
                            action_type: action.action_type.clone(),
                            source,
                        });
                    }
                }
            }
        }

        self.reduce_and_notify(&action);
        Ok(action)
    }

    /// Replace the active reducer and dispatch [`REPLACE_ACTION`] through it.
    ///
    /// Hooks do not see the replace action.
    pub fn replace_reducer<R: Reducer>(&self, reducer: R) -> Result<(), StoreError> {
        self.replace_shared_reducer(Arc::new(reducer))
    }

    /// Replace the active reducer with an already shared one.
    pub fn replace_shared_reducer(&self, reducer: DynReducer) -> Result<(), StoreError> {
        self.check_not_reducing()?;
        self.reducer.store(Arc::new(reducer));

        #[cfg(feature = "tracing")]
        tracing::debug!("Replaced store reducer");

        self.reduce_and_notify(&Action::new(REPLACE_ACTION));
        Ok(())
    }

    /// Register a callback run after every reduced action.
    pub fn subscribe<F>(&self, subscriber: F) -> SubscriptionId
    where
        F: Fn(&State) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_subscription.fetch_add(1, Ordering::Relaxed));
        lock(&self.subscribers).push((id, Arc::new(subscriber)));
        id
    }

    /// Remove a subscriber. Returns `false` if it was already removed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subscribers = lock(&self.subscribers);
        let before = subscribers.len();
        subscribers.retain(|(existing, _)| *existing != id);
        subscribers.len() != before
    }

    fn check_not_reducing(&self) -> Result<(), StoreError> {
        match &*lock(&self.reducing) {
            Some((thread, action_type)) if *thread == thread::current().id() => {
                Err(StoreError::ReducerDispatch(action_type.clone()))
            }
            _ => Ok(()),
        }
    }

    fn reduce_and_notify(&self, action: &Action) {
        let next = {
            let mut state = lock(&self.state);
            let _guard = ReducingGuard::enter(&self.reducing, action);
            let reducer = self.reducer.load_full();
            // Reduce a copy: a panicking reducer leaves the tree intact.
            *state = reducer.reduce(Some(state.clone()), action);
            state.clone()
        };

        let subscribers: Vec<Subscriber> = lock(&self.subscribers)
            .iter()
            .map(|(_, subscriber)| subscriber.clone())
            .collect();
        for subscriber in subscribers {
            subscriber(&next);
        }
    }
}
