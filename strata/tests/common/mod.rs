#![allow(dead_code)]

use serde_json::{Value, json};
use strata::{Action, HandlerReducer, StoreBuilder, create_reducer, testing::RecordingHook};

// ============================================================================
// Test Actions
// ============================================================================

pub fn increment() -> Action {
    Action::new("INCREMENT")
}

pub fn decrement() -> Action {
    Action::new("DECREMENT")
}

// ============================================================================
// Test Reducers
// ============================================================================

/// The handler-table reducer used by the reducer convention tests.
pub fn describing_reducer() -> HandlerReducer {
    create_reducer("nothing")
        .on("onThingHappened", |state, payload, meta| {
            json!(format!(
                "{}, thing happened with {} & {}",
                text(&state),
                text(payload),
                text(meta)
            ))
        })
        .on("onThingFailed", |state, payload, meta| {
            json!(format!(
                "{}, ouch the thing broke with {} & {}",
                text(&state),
                text(payload),
                text(meta)
            ))
        })
}

fn text(value: &Value) -> &str {
    value.as_str().unwrap_or_default()
}

// ============================================================================
// Test Enhancers
// ============================================================================

/// An enhancer that installs `recorder` as a store hook.
pub fn recording(recorder: &RecordingHook) -> impl Fn(StoreBuilder) -> StoreBuilder + use<> {
    let recorder = recorder.clone();
    move |builder: StoreBuilder| builder.hook(recorder.clone())
}

/// Install a `tracing` subscriber honoring `RUST_LOG`, once per binary.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
