//! Reducer combination.
//!
//! A combined reducer owns an object-shaped state tree with one key per
//! slice reducer. Each slice reducer sees only its own slice.

use crate::registry::ReducerMap;
use serde_json::{Map, Value};
use std::{
    collections::BTreeSet,
    sync::{Mutex, PoisonError},
};
use strata_core::{Action, Reducer, State};

/// A reducer built from a [`ReducerMap`].
///
/// The produced state always has exactly the map's keys. Keys found in the
/// incoming state without a reducer are dropped; each such key is reported
/// once.
pub struct CombinedReducer {
    reducers: ReducerMap,
    reported: Mutex<BTreeSet<String>>,
}

/// Combine slice reducers into a single object reducer.
///
/// An empty map yields a reducer whose state is always `{}`.
pub fn combine_reducers(reducers: ReducerMap) -> CombinedReducer {
    CombinedReducer {
        reducers,
        reported: Mutex::new(BTreeSet::new()),
    }
}

impl CombinedReducer {
    /// The slice names this reducer produces, in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.reducers.keys().map(String::as_str)
    }

    /// Check whether a slice name is part of this reducer.
    pub fn contains(&self, key: &str) -> bool {
        self.reducers.contains_key(key)
    }

    fn report_unexpected(&self, previous: &Map<String, Value>) {
        let mut reported = self.reported.lock().unwrap_or_else(PoisonError::into_inner);
        for key in previous.keys() {
            if self.reducers.contains_key(key) || reported.contains(key) {
                continue;
            }
            reported.insert(key.clone());

            #[cfg(feature = "tracing")]
            tracing::warn!(
                key = %key,
                expected = ?self.reducers.keys().collect::<Vec<_>>(),
                "Unexpected state key has no reducer and will be dropped"
            );
        }
    }
}

impl Reducer for CombinedReducer {
    fn reduce(&self, state: Option<State>, action: &Action) -> State {
        let mut previous = match state {
            Some(Value::Object(map)) => map,
            _ => Map::new(),
        };
        self.report_unexpected(&previous);

        let mut next = Map::new();
        for (key, reducer) in &self.reducers {
            let slice = previous.remove(key);
            next.insert(key.clone(), reducer.reduce(slice, action));
        }
        Value::Object(next)
    }
}
