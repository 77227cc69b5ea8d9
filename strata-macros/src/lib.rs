use proc_macro::TokenStream;

mod action;

/// Derive macro for implementing the `ActionKind` trait on an enum.
///
/// Each variant maps to its `SCREAMING_SNAKE_CASE` name as the action type,
/// unless renamed with `#[action(rename = "TYPE")]`.
///
/// - Unit variants carry no payload.
/// - Single-field tuple variants carry the field as the payload.
/// - Struct variants carry their fields as a payload object.
///
/// Decoding matches the action type through handler-key normalization, so
/// `INCREMENT_BY`, `increment-by` and `incrementBy` all decode to
/// `IncrementBy`.
#[proc_macro_derive(ActionKind, attributes(action))]
pub fn derive_action_kind(input: TokenStream) -> TokenStream {
    action::derive_action_kind_impl(input)
}
