//! Actions: plain data describing an intended state transition.
//!
//! At the boundary an [`Action`] is a type string plus optional payload,
//! metadata and an error flag. Inside an application, actions are usually
//! modelled as an enum implementing [`ActionKind`]; the conversion between
//! the two goes through the handler-key normalization, so any casing of the
//! type string decodes to the same variant.

use crate::convert::handler_key;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A dispatched action.
///
/// Serializes to the conventional `{ "type", "payload", "meta", "error" }`
/// shape, omitting absent fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    /// The action type discriminator.
    #[serde(rename = "type")]
    pub action_type: String,

    /// The action payload (`null` when absent).
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub payload: Value,

    /// Metadata accompanying the payload (`null` when absent).
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub meta: Value,

    /// Whether the action reports a failure.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub error: bool,
}

impl Action {
    /// Create an action with the given type and no payload.
    pub fn new(action_type: impl Into<String>) -> Self {
        Self {
            action_type: action_type.into(),
            payload: Value::Null,
            meta: Value::Null,
            error: false,
        }
    }

    /// Set the payload.
    pub fn with_payload(mut self, payload: impl Into<Value>) -> Self {
        self.payload = payload.into();
        self
    }

    /// Set the metadata.
    pub fn with_meta(mut self, meta: impl Into<Value>) -> Self {
        self.meta = meta.into();
        self
    }

    /// Set the error flag.
    pub fn with_error(mut self, error: bool) -> Self {
        self.error = error;
        self
    }

    /// The handler-lookup key for this action's type.
    pub fn handler_key(&self) -> String {
        handler_key(&self.action_type)
    }

    /// Returns `true` if this action's type matches `action_type` under
    /// handler-key normalization.
    pub fn is(&self, action_type: &str) -> bool {
        self.handler_key() == handler_key(action_type)
    }
}

/// A typed action: a tagged union whose variants map to action types.
///
/// Usually derived with `#[derive(ActionKind)]`, which maps each variant to
/// its `SCREAMING_SNAKE_CASE` name. Unit variants carry no payload;
/// single-field tuple variants carry their field as the payload.
///
/// # Example
///
/// ```rust,ignore
/// #[derive(ActionKind)]
/// enum Counter {
///     Increment,
///     IncrementBy(i64),
/// }
///
/// let action = Counter::IncrementBy(5).into_action()?;
/// assert_eq!(action.action_type, "INCREMENT_BY");
/// ```
pub trait ActionKind: Sized {
    /// The boundary type string for this variant.
    fn action_type(&self) -> &'static str;

    /// Converts into a boundary action.
    fn into_action(self) -> Result<Action, serde_json::Error>;

    /// Decodes a boundary action, returning `None` when the type matches no
    /// variant or the payload does not fit the variant.
    fn from_action(action: &Action) -> Option<Self>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_builder() {
        let action = Action::new("THING_HAPPENED")
            .with_payload("hello")
            .with_meta(json!({"page": 2}))
            .with_error(true);

        assert_eq!(action.action_type, "THING_HAPPENED");
        assert_eq!(action.payload, json!("hello"));
        assert_eq!(action.meta, json!({"page": 2}));
        assert!(action.error);
    }

    #[test]
    fn test_serialized_shape_omits_absent_fields() {
        let action = Action::new("INCREMENT");
        assert_eq!(serde_json::to_value(&action).unwrap(), json!({"type": "INCREMENT"}));

        let failed = Action::new("LOAD_FAILED").with_payload("boom").with_error(true);
        assert_eq!(
            serde_json::to_value(&failed).unwrap(),
            json!({"type": "LOAD_FAILED", "payload": "boom", "error": true})
        );
    }

    #[test]
    fn test_deserialize_plain_object() {
        let action: Action =
            serde_json::from_value(json!({"type": "thing-happened", "payload": 1})).unwrap();
        assert_eq!(action.payload, json!(1));
        assert_eq!(action.meta, Value::Null);
        assert!(!action.error);
        assert!(action.is("THING_HAPPENED"));
    }
}
