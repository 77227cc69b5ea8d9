//! Reducer registry for code-split state slices.
//!
//! Feature modules register their reducers by slice name at any time,
//! including after a store exists. The registry notifies a single change
//! listener (normally the store composer) with a snapshot of the full
//! mapping after every registration.
//!
//! A process-wide [`default_registry`] exists for convenience; tests and
//! embedders that need isolation construct their own [`ReducerRegistry`].

use std::{
    collections::BTreeMap,
    sync::{Arc, LazyLock, Mutex, MutexGuard, PoisonError},
};
use strata_core::{DynReducer, Reducer};

/// Slice name to reducer mapping.
pub type ReducerMap = BTreeMap<String, DynReducer>;

/// The registry's change listener.
pub type ChangeListener = Arc<dyn Fn(&ReducerSnapshot) + Send + Sync>;

/// A point-in-time copy of the registry contents.
///
/// Each registration bumps the registry's generation, so listeners can tell
/// an older snapshot from a newer one when notifications race.
#[derive(Clone, Default)]
pub struct ReducerSnapshot {
    generation: u64,
    reducers: ReducerMap,
}

impl ReducerSnapshot {
    /// The registry generation this snapshot was taken at.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The reducers in this snapshot.
    pub fn reducers(&self) -> &ReducerMap {
        &self.reducers
    }

    /// Take ownership of the reducer mapping.
    pub fn into_reducers(self) -> ReducerMap {
        self.reducers
    }

    /// Registered slice names, in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.reducers.keys().map(String::as_str)
    }

    /// Check whether a slice name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.reducers.contains_key(name)
    }

    /// Get the number of registered reducers.
    pub fn len(&self) -> usize {
        self.reducers.len()
    }

    /// Check if the snapshot has no reducers.
    pub fn is_empty(&self) -> bool {
        self.reducers.is_empty()
    }
}

impl std::fmt::Debug for ReducerSnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReducerSnapshot")
            .field("generation", &self.generation)
            .field("names", &self.reducers.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[derive(Default)]
struct Inner {
    reducers: ReducerMap,
    listener: Option<ChangeListener>,
    generation: u64,
}

/// Runtime mapping from slice name to reducer.
///
/// Registration and snapshot reads are serialized under a mutex. The change
/// listener is called after the lock is released, so a listener may read the
/// registry (or even register) without deadlocking.
///
/// # Example
/// ```ignore
/// let registry = ReducerRegistry::new();
/// registry.register("counter", counter_reducer);
///
/// let store = create_store(&registry, None, None)?;
/// registry.register("todos", todos_reducer); // hot-swapped into `store`
/// ```
#[derive(Default)]
pub struct ReducerRegistry {
    inner: Mutex<Inner>,
}

impl ReducerRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register a reducer under `name`, replacing any previous one.
    ///
    /// The change listener, if any, is invoked synchronously with a snapshot
    /// taken right after this registration.
    pub fn register<R: Reducer>(&self, name: impl Into<String>, reducer: R) {
        self.register_shared(name, Arc::new(reducer));
    }

    /// Register an already shared reducer.
    pub fn register_shared(&self, name: impl Into<String>, reducer: DynReducer) {
        let name = name.into();
        let (snapshot, listener) = {
            let mut inner = self.lock();
            let replaced = inner.reducers.insert(name.clone(), reducer).is_some();
            inner.generation += 1;

            #[cfg(feature = "tracing")]
            tracing::debug!(
                name = %name,
                replaced,
                generation = inner.generation,
                "Registered reducer"
            );
            #[cfg(not(feature = "tracing"))]
            let _ = replaced;

            let snapshot = ReducerSnapshot {
                generation: inner.generation,
                reducers: inner.reducers.clone(),
            };
            (snapshot, inner.listener.clone())
        };

        if let Some(listener) = listener {
            listener(&snapshot);
        }
    }

    /// A shallow copy of the current mapping.
    ///
    /// Later registrations are not visible through the returned map.
    pub fn get_reducers(&self) -> ReducerMap {
        self.lock().reducers.clone()
    }

    /// A copy of the current mapping tagged with its generation.
    pub fn snapshot(&self) -> ReducerSnapshot {
        let inner = self.lock();
        ReducerSnapshot {
            generation: inner.generation,
            reducers: inner.reducers.clone(),
        }
    }

    /// Clear every registration and the change listener.
    ///
    /// The generation counter keeps increasing across resets.
    pub fn reset(&self) {
        let mut inner = self.lock();
        inner.reducers.clear();
        inner.listener = None;

        #[cfg(feature = "tracing")]
        tracing::debug!(generation = inner.generation, "Reset reducer registry");
    }

    /// Install the change listener.
    ///
    /// The registry holds exactly one listener: installing a new one silently
    /// discards the previous one.
    pub fn set_change_listener<F>(&self, listener: F)
    where
        F: Fn(&ReducerSnapshot) + Send + Sync + 'static,
    {
        self.lock().listener = Some(Arc::new(listener));
    }

    /// Remove the change listener, if any.
    pub fn clear_change_listener(&self) {
        self.lock().listener = None;
    }

    /// Check whether a change listener is installed.
    pub fn has_change_listener(&self) -> bool {
        self.lock().listener.is_some()
    }

    /// Check whether a slice name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.lock().reducers.contains_key(name)
    }

    /// Get the number of registered reducers.
    pub fn len(&self) -> usize {
        self.lock().reducers.len()
    }

    /// Check if the registry has no reducers.
    pub fn is_empty(&self) -> bool {
        self.lock().reducers.is_empty()
    }
}

static DEFAULT_REGISTRY: LazyLock<ReducerRegistry> = LazyLock::new(ReducerRegistry::new);

/// The process-wide registry.
pub fn default_registry() -> &'static ReducerRegistry {
    &DEFAULT_REGISTRY
}

/// Register a reducer in the process-wide registry.
pub fn register_reducer<R: Reducer>(name: impl Into<String>, reducer: R) {
    default_registry().register(name, reducer);
}
