//! Future-backed actions dispatched against a live store.

use futures::channel::oneshot;
use serde::Serialize;
use serde_json::{Value, json};
use strata::{
    Action, AjaxError, BoxError, HookResult, ReducerRegistry, Store, StoreBuilder,
    create_ajax_action, create_reducer, create_store, merge_with_current, testing::RecordingHook,
};
use std::sync::Arc;

mod common;
use common::recording;

fn recorded_store(recorder: &RecordingHook) -> Arc<Store> {
    let registry = ReducerRegistry::new();
    let enhancer = recording(recorder);
    create_store(&registry, None, Some(&enhancer)).unwrap()
}

#[derive(Serialize)]
struct User {
    name: String,
}

#[tokio::test]
async fn test_request_is_dispatched_synchronously() {
    let recorder = RecordingHook::new();
    let store = recorded_store(&recorder);
    let (_tx, rx) = oneshot::channel::<Result<User, String>>();

    let load = create_ajax_action(
        Action::new("LOAD_USER").with_payload(json!({"id": 7})),
        |_state| Some(async move { rx.await.unwrap_or_else(|_| Err("cancelled".into())) }),
    );
    let handle = load.dispatch(&store).unwrap();

    assert!(handle.is_some());
    assert_eq!(recorder.action_types(), ["LOAD_USER"]);
    assert_eq!(recorder.actions()[0].payload, json!({"id": 7}));
}

#[tokio::test]
async fn test_completed_carries_response_and_request_payload() {
    let recorder = RecordingHook::new();
    let store = recorded_store(&recorder);
    let (tx, rx) = oneshot::channel::<Result<User, String>>();

    let load = create_ajax_action(
        Action::new("LOAD_USER").with_payload(json!({"id": 7})),
        |_state| Some(async move { rx.await.unwrap_or_else(|_| Err("cancelled".into())) }),
    );
    let handle = load.dispatch(&store).unwrap().unwrap();

    tx.send(Ok(User { name: "Homer".into() })).ok();
    handle.await.unwrap();

    let actions = recorder.actions();
    assert_eq!(recorder.action_types(), ["LOAD_USER", "LOAD_USER_COMPLETED"]);
    assert_eq!(actions[1].payload, json!({"name": "Homer"}));
    assert_eq!(actions[1].meta, json!({"id": 7}));
    assert!(!actions[1].error);
}

#[tokio::test]
async fn test_failed_carries_error_message() {
    let recorder = RecordingHook::new();
    let store = recorded_store(&recorder);

    let load = create_ajax_action(
        Action::new("LOAD_USER").with_payload(json!({"id": 7})),
        |_state| Some(async { Err::<Value, _>("not found") }),
    );
    load.dispatch(&store).unwrap().unwrap().await.unwrap();

    let actions = recorder.actions();
    assert_eq!(recorder.action_types(), ["LOAD_USER", "LOAD_USER_FAILED"]);
    assert_eq!(actions[1].payload, json!("not found"));
    assert_eq!(actions[1].meta, json!({"id": 7}));
    assert!(actions[1].error);
}

#[tokio::test]
async fn test_declined_request_dispatches_nothing() {
    let recorder = RecordingHook::new();
    let store = recorded_store(&recorder);

    let load = create_ajax_action(Action::new("LOAD_USER"), |_state| {
        None::<std::future::Ready<Result<Value, String>>>
    });

    assert!(load.dispatch(&store).unwrap().is_none());
    assert_eq!(recorder.count(), 0);
}

#[tokio::test]
async fn test_get_future_sees_current_state() {
    let registry = ReducerRegistry::new();
    let store = create_store(&registry, Some(json!({"user": {"id": 3}})), None).unwrap();

    let load = create_ajax_action(Action::new("LOAD_USER"), |state| {
        let id = state["user"]["id"].as_i64()?;
        Some(async move { Ok::<_, String>(json!({"id": id, "name": "Marge"})) })
    });
    registry.register(
        "user",
        create_reducer(json!({})).on("LOAD_USER_COMPLETED", |state, payload, _meta| {
            match payload.as_object() {
                Some(data) => merge_with_current(state, "profile", data.clone()),
                None => state,
            }
        }),
    );
    load.dispatch(&store).unwrap().unwrap().await.unwrap();

    assert_eq!(
        store.get_state(),
        json!({"user": {"id": 3, "profile": {"id": 3, "name": "Marge"}}})
    );
}

#[tokio::test]
async fn test_outcome_dispatch_error_is_not_a_request_failure() {
    let recorder = RecordingHook::new();
    let registry = ReducerRegistry::new();
    let hook = recorder.clone();
    let enhancer = move |builder: StoreBuilder| {
        builder
            .hook(hook.clone())
            .hook(|action: &Action, _state: &Value| -> Result<HookResult, BoxError> {
                if action.action_type.ends_with("_COMPLETED") {
                    return Err("handler exploded".into());
                }
                Ok(HookResult::Next)
            })
    };
    let store = create_store(&registry, None, Some(&enhancer)).unwrap();

    let load = create_ajax_action(Action::new("LOAD_USER"), |_state| {
        Some(async { Ok::<_, String>(json!({"name": "Bart"})) })
    });
    load.dispatch(&store).unwrap().unwrap().await.unwrap();

    assert_eq!(recorder.action_types(), ["LOAD_USER", "LOAD_USER_COMPLETED"]);
}

#[test]
fn test_dispatch_outside_runtime() {
    let recorder = RecordingHook::new();
    let store = recorded_store(&recorder);

    let load = create_ajax_action(Action::new("LOAD_USER"), |_state| {
        Some(async { Ok::<_, String>(json!(null)) })
    });

    assert!(matches!(load.dispatch(&store), Err(AjaxError::NoRuntime(_))));
    assert_eq!(recorder.count(), 0);
}
