//! Action-type to handler-key conversion.
//!
//! Action types arrive in whatever casing the producer used
//! (`THING_HAPPENED`, `thing-happened`, `thingHappened`, ...). Handlers are
//! looked up by a single normalized key: the type camel-cased, first letter
//! upper-cased, prefixed with `on`. A run of digits is a word of its own,
//! so `LOAD_2FA_CODE`, `load2faCode` and `onLoad2FaCode` share a key.

use heck::ToUpperCamelCase;
use std::borrow::Cow;

/// Converts an action type into its handler-lookup key.
///
/// ```
/// use strata_core::handler_key;
///
/// assert_eq!(handler_key("THING_HAPPENED"), "onThingHappened");
/// assert_eq!(handler_key("thing-happened"), "onThingHappened");
/// assert_eq!(handler_key("thingHappened"), "onThingHappened");
/// ```
pub fn handler_key(action_type: &str) -> String {
    format!("on{}", separate_digits(action_type).to_upper_camel_case())
}

/// Put a word break between digits and letters.
fn separate_digits(text: &str) -> Cow<'_, str> {
    let is_break = |a: char, b: char| {
        (a.is_ascii_digit() && b.is_alphabetic()) || (a.is_alphabetic() && b.is_ascii_digit())
    };
    let chars: Vec<char> = text.chars().collect();
    if !chars.windows(2).any(|pair| is_break(pair[0], pair[1])) {
        return Cow::Borrowed(text);
    }

    let mut separated = String::with_capacity(text.len() + 4);
    for (i, &c) in chars.iter().enumerate() {
        if i > 0 && is_break(chars[i - 1], c) {
            separated.push('_');
        }
        separated.push(c);
    }
    Cow::Owned(separated)
}

/// Normalizes a handler name given by a caller.
///
/// Names already in `onXxx` form are kept; anything else is treated as an
/// action type and converted with [`handler_key`].
pub fn normalize_handler_name(name: &str) -> String {
    match name.strip_prefix("on") {
        Some(rest) if rest.starts_with(|c: char| c.is_ascii_uppercase()) => {
            handler_key(rest)
        }
        _ => handler_key(name),
    }
}
