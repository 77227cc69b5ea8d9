//! Handler-table reducers and action-type normalization.

use serde_json::json;
use strata::{Action, Reducer, ReducerRegistry, create_reducer, create_store};

mod common;
use common::describing_reducer;

#[test]
fn test_unknown_action_returns_initial_state() {
    let reducer = describing_reducer();
    assert_eq!(reducer.reduce(None, &Action::new("whatever")), json!("nothing"));
}

#[test]
fn test_action_type_casings_reach_the_same_handler() {
    let reducer = describing_reducer();

    for action_type in [
        "THING_HAPPENED",
        "thing_happened",
        "thing-happened",
        "thingHappened",
        "ThingHappened",
        "Thing Happened",
    ] {
        let action = Action::new(action_type).with_payload("a").with_meta("b");
        assert_eq!(
            reducer.reduce(None, &action),
            json!("nothing, thing happened with a & b"),
            "action type {action_type:?}"
        );
    }
}

#[test]
fn test_failed_handler() {
    let reducer = describing_reducer();
    let action = Action::new("THING_FAILED")
        .with_payload("a")
        .with_meta("b")
        .with_error(true);

    assert_eq!(
        reducer.reduce(Some(json!("something")), &action),
        json!("something, ouch the thing broke with a & b")
    );
}

#[test]
fn test_handlers_keep_unrelated_state() {
    let reducer = describing_reducer();
    assert_eq!(
        reducer.reduce(Some(json!("kept")), &Action::new("THING_IGNORED")),
        json!("kept")
    );
}

#[test]
fn test_registered_handler_reducer() {
    let registry = ReducerRegistry::new();
    let store = create_store(&registry, None, None).unwrap();
    registry.register(
        "todos",
        create_reducer(json!([])).on("TODO_ADDED", |state, payload, _meta| {
            let mut todos = state.as_array().cloned().unwrap_or_default();
            todos.push(payload.clone());
            json!(todos)
        }),
    );

    store
        .dispatch(Action::new("todoAdded").with_payload("milk"))
        .unwrap();
    store
        .dispatch(Action::new("todo-added").with_payload("bread"))
        .unwrap();

    assert_eq!(store.get_state(), json!({"todos": ["milk", "bread"]}));
}
