//! Store composition over a [`ReducerRegistry`].
//!
//! [`create_store`] combines whatever the registry holds, plus a placeholder
//! for every key of the initial state that has no reducer yet, and keeps the
//! store's reducer in sync with the registry from then on.

use crate::{
    combine::{CombinedReducer, combine_reducers},
    registry::{ReducerMap, ReducerRegistry, ReducerSnapshot},
    store::{Store, StoreBuilder},
};
use serde_json::Value;
use std::{
    sync::{Arc, Mutex, MutexGuard, PoisonError, Weak},
    thread,
};
use strata_core::{Action, DynReducer, State, StoreError, value_kind};

/// Customizes the store before it is built (hooks, extra configuration).
pub trait Enhancer {
    /// Transform the builder.
    fn enhance(&self, builder: StoreBuilder) -> StoreBuilder;
}

impl<F> Enhancer for F
where
    F: Fn(StoreBuilder) -> StoreBuilder,
{
    fn enhance(&self, builder: StoreBuilder) -> StoreBuilder {
        (self)(builder)
    }
}

/// The identity reducer guarding pre-seeded state of a slice whose reducer
/// is not registered yet. Defaults to `null`.
pub fn placeholder_reducer() -> DynReducer {
    Arc::new(|state: Option<State>, _action: &Action| state.unwrap_or(Value::Null))
}

/// Combine `reducers` with placeholders for every seed key they lack.
pub fn compose_reducers(mut reducers: ReducerMap, seed_keys: &[String]) -> CombinedReducer {
    for key in seed_keys {
        reducers
            .entry(key.clone())
            .or_insert_with(placeholder_reducer);
    }
    combine_reducers(reducers)
}

/// Create a store driven by `registry`.
///
/// The store starts with the registry's current reducers plus placeholders
/// for the keys of `initial_state`, and becomes the registry's change
/// listener: every later registration recombines (against the same original
/// initial-state keys) and hot-swaps the store's reducer. The registry only
/// holds a weak reference to the store.
///
/// `initial_state` must be an object or `null`.
pub fn create_store(
    registry: &ReducerRegistry,
    initial_state: Option<State>,
    enhancer: Option<&dyn Enhancer>,
) -> Result<Arc<Store>, StoreError> {
    let initial_state = initial_state.filter(|state| !state.is_null());
    let seed_keys: Arc<[String]> = match &initial_state {
        None => Arc::from(Vec::new()),
        Some(Value::Object(map)) => map.keys().cloned().collect(),
        Some(other) => return Err(StoreError::InvalidPreloadedState(value_kind(other))),
    };

    let snapshot = registry.snapshot();
    let generation = snapshot.generation();
    let reducer = compose_reducers(snapshot.into_reducers(), &seed_keys);

    let mut builder = StoreBuilder::new(reducer);
    if let Some(state) = initial_state {
        builder = builder.preloaded_state(state);
    }
    if let Some(enhancer) = enhancer {
        builder = enhancer.enhance(builder);
    }
    let store = Arc::new(builder.build());

    let binding = Arc::new(RegistryBinding::new(&store, generation, seed_keys));
    let listener = binding.clone();
    registry.set_change_listener(move |snapshot| listener.apply(snapshot));

    // Catch registrations that landed between the snapshot and the listener.
    binding.apply(&registry.snapshot());

    Ok(store)
}

/// Keeps one store's reducer in sync with registry snapshots.
struct RegistryBinding {
    store: Weak<Store>,
    queue: Mutex<SwapQueue>,
    seed_keys: Arc<[String]>,
}

/// Snapshots waiting to be installed.
///
/// Only one caller installs at a time. A snapshot arriving meanwhile (from
/// a subscriber of the swap in progress, or from another thread) is parked
/// in `pending` and installed by that caller before it returns; a newer
/// snapshot replaces a parked older one.
#[derive(Default)]
struct SwapQueue {
    applied: u64,
    pending: Option<ReducerSnapshot>,
    installing: bool,
}

/// Clears `installing` if an install unwinds, so later snapshots still land.
struct InstallGuard<'a> {
    queue: &'a Mutex<SwapQueue>,
}

impl Drop for InstallGuard<'_> {
    fn drop(&mut self) {
        if thread::panicking() {
            lock(self.queue).installing = false;
        }
    }
}

fn lock(queue: &Mutex<SwapQueue>) -> MutexGuard<'_, SwapQueue> {
    queue.lock().unwrap_or_else(PoisonError::into_inner)
}

impl RegistryBinding {
    fn new(store: &Arc<Store>, generation: u64, seed_keys: Arc<[String]>) -> Self {
        Self {
            store: Arc::downgrade(store),
            queue: Mutex::new(SwapQueue {
                applied: generation,
                ..SwapQueue::default()
            }),
            seed_keys,
        }
    }

    fn apply(&self, snapshot: &ReducerSnapshot) {
        {
            let mut queue = lock(&self.queue);
            // Notifications may race; never install an older mapping.
            let newest = queue
                .pending
                .as_ref()
                .map_or(queue.applied, ReducerSnapshot::generation);
            if snapshot.generation() <= newest {
                return;
            }
            queue.pending = Some(snapshot.clone());
            if queue.installing {
                return;
            }
            queue.installing = true;
        }

        let _guard = InstallGuard { queue: &self.queue };
        loop {
            let next = {
                let mut queue = lock(&self.queue);
                match queue.pending.take() {
                    Some(next) => {
                        queue.applied = next.generation();
                        next
                    }
                    None => {
                        queue.installing = false;
                        return;
                    }
                }
            };
            // The queue lock is released here: subscribers notified by the
            // swap may register more reducers.
            self.install(&next);
        }
    }

    fn install(&self, snapshot: &ReducerSnapshot) {
        let Some(store) = self.store.upgrade() else {
            return;
        };
        let reducer = compose_reducers(snapshot.reducers().clone(), &self.seed_keys);

        #[cfg(feature = "tracing")]
        tracing::debug!(
            generation = snapshot.generation(),
            slices = ?reducer.keys().collect::<Vec<_>>(),
            "Hot-swapping store reducer"
        );

        if let Err(_err) = store.replace_reducer(reducer) {
            #[cfg(feature = "tracing")]
            tracing::warn!(error = %_err, "Failed to replace store reducer");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{RecordingHook, counter_reducer};
    use strata_core::Reducer;
    use serde_json::json;

    #[test]
    fn test_placeholder_defaults_to_null() {
        let placeholder = placeholder_reducer();
        assert_eq!(placeholder.reduce(None, &Action::new("ANY")), json!(null));
        assert_eq!(placeholder.reduce(Some(json!(68)), &Action::new("ANY")), json!(68));
    }

    #[test]
    fn test_compose_keeps_registered_reducers() {
        let mut reducers = ReducerMap::new();
        reducers.insert("count".into(), Arc::new(counter_reducer()));
        let reducer = compose_reducers(reducers, &["count".into(), "user".into()]);

        assert_eq!(reducer.keys().collect::<Vec<_>>(), ["count", "user"]);
        let state = reducer.reduce(
            Some(json!({"count": 1, "user": {"name": "Homer"}})),
            &Action::new("INCREMENT"),
        );
        assert_eq!(state, json!({"count": 2, "user": {"name": "Homer"}}));
    }

    #[test]
    fn test_rejects_non_object_initial_state() {
        let registry = ReducerRegistry::new();
        let err = create_store(&registry, Some(json!([1, 2])), None).unwrap_err();
        assert!(matches!(err, StoreError::InvalidPreloadedState("array")));
        assert!(!registry.has_change_listener());
    }

    #[test]
    fn test_null_initial_state_is_absent() {
        let registry = ReducerRegistry::new();
        let store = create_store(&registry, Some(json!(null)), None).unwrap();
        assert_eq!(store.get_state(), json!({}));
    }

    #[test]
    fn test_enhancer_adds_hooks() {
        let registry = ReducerRegistry::new();
        registry.register("count", counter_reducer());
        let recorder = RecordingHook::new();

        let hook = recorder.clone();
        let enhancer = move |builder: StoreBuilder| builder.hook(hook.clone());
        let store = create_store(&registry, None, Some(&enhancer)).unwrap();

        store.dispatch(Action::new("INCREMENT")).unwrap();
        assert_eq!(recorder.action_types(), ["INCREMENT"]);
        assert_eq!(store.get_state(), json!({"count": 1}));
    }

    #[test]
    fn test_dropped_store_is_not_kept_alive() {
        let registry = ReducerRegistry::new();
        let store = create_store(&registry, None, None).unwrap();
        let weak = Arc::downgrade(&store);
        drop(store);

        assert!(weak.upgrade().is_none());
        // notifying a dead store is a no-op
        registry.register("count", counter_reducer());
    }

    #[test]
    fn test_stale_snapshot_is_ignored() {
        let registry = ReducerRegistry::new();
        let store = create_store(&registry, None, None).unwrap();
        let stale = registry.snapshot();
        registry.register("count", counter_reducer());
        let current = registry.snapshot();

        let binding = RegistryBinding::new(&store, current.generation(), Arc::from(Vec::new()));
        binding.apply(&stale);

        assert_eq!(store.get_state(), json!({"count": 0}));
    }
}
