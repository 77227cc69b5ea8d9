//! Fetch-on-update: trigger a fetch when selected properties change.
//!
//! [`FetchOnUpdate`] holds the lifecycle logic of a component that loads
//! data for its properties. The host calls [`FetchOnUpdate::mount`] once
//! and [`FetchOnUpdate::update`] whenever the properties change; the fetch
//! callback runs on mount and again only when a watched property changed.
//! Rendering is left to the host.

use serde_json::{Map, Value};

/// A component's properties.
pub type Props = Map<String, Value>;

type RenderPredicate = Box<dyn Fn(&Props) -> bool + Send + Sync>;

/// Calls `fetch` on mount and whenever the watched properties change.
///
/// With no watched keys, every property is watched. Watched keys may be
/// dotted paths into nested values.
pub struct FetchOnUpdate<F> {
    keys: Vec<String>,
    fetch: F,
    should_render: Option<RenderPredicate>,
}

/// Resolve a watched key. A key naming a property is used as is; otherwise
/// it is a dotted path (`user.name.first`, `items.0.id`) into nested values.
fn lookup<'a>(props: &'a Props, key: &str) -> Option<&'a Value> {
    if let Some(value) = props.get(key) {
        return Some(value);
    }
    let mut segments = key.split('.');
    let root = props.get(segments.next()?)?;
    segments.try_fold(root, |value, segment| match value {
        Value::Array(items) => items.get(segment.parse::<usize>().ok()?),
        _ => value.get(segment),
    })
}

impl<F> FetchOnUpdate<F>
where
    F: Fn(&Props),
{
    /// Watch `keys` and call `fetch` with their current values.
    pub fn new<I, K>(keys: I, fetch: F) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        Self {
            keys: keys.into_iter().map(Into::into).collect(),
            fetch,
            should_render: None,
        }
    }

    /// Watch every property.
    pub fn all(fetch: F) -> Self {
        Self::new(Vec::<String>::new(), fetch)
    }

    /// Gate rendering on a predicate over the properties.
    pub fn with_should_render<P>(mut self, predicate: P) -> Self
    where
        P: Fn(&Props) -> bool + Send + Sync + 'static,
    {
        self.should_render = Some(Box::new(predicate));
        self
    }

    /// The watched subset of `props`, keyed by watched key. Missing keys
    /// map to `null`.
    pub fn params(&self, props: &Props) -> Props {
        if self.keys.is_empty() {
            return props.clone();
        }
        self.keys
            .iter()
            .map(|key| (key.clone(), lookup(props, key).cloned().unwrap_or(Value::Null)))
            .collect()
    }

    /// First render: always fetches.
    pub fn mount(&self, props: &Props) {
        (self.fetch)(&self.params(props));
    }

    /// Properties changed from `previous` to `next`.
    ///
    /// Returns whether a fetch was triggered.
    pub fn update(&self, previous: &Props, next: &Props) -> bool {
        let params = self.params(next);
        if params == self.params(previous) {
            return false;
        }
        (self.fetch)(&params);
        true
    }

    /// Whether the wrapped content should render for `props`.
    pub fn should_render(&self, props: &Props) -> bool {
        self.should_render
            .as_ref()
            .is_none_or(|predicate| predicate(props))
    }
}
