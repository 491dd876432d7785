//! Context value model for placeholder substitution.
//!
//! [`ContextValue`] makes the display conversions explicit: sequences join
//! with a `<br>` marker, structured values serialize to compact JSON.
//! [`RenderContext`] preserves insertion order because the variable pass
//! walks entries in the order the caller added them.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::escape::escape_html;

/// Join marker used when a [`ContextValue::Sequence`] is displayed.
pub const SEQUENCE_JOIN: &str = "<br>";

/// A value bound to a placeholder name for one render call.
///
/// The untagged serde representation lets contexts be built straight from
/// deserialized JSON documents: strings become scalars, string arrays
/// become sequences, everything else stays structured.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ContextValue {
    /// Plain text.
    Scalar(String),
    /// Ordered lines, joined with [`SEQUENCE_JOIN`] on display.
    Sequence(Vec<String>),
    /// Opaque structured data, serialized to compact JSON on display.
    Structured(Value),
}

impl ContextValue {
    /// Raw display text, unescaped.
    ///
    /// This is the form fed to function and filter arguments; escaping the
    /// value for direct display is [`ContextValue::render_as_html`].
    pub fn render_as_text(&self) -> String {
        match self {
            ContextValue::Scalar(s) => s.clone(),
            ContextValue::Sequence(items) => items.join(SEQUENCE_JOIN),
            ContextValue::Structured(value) => value.to_string(),
        }
    }

    /// HTML-safe display text.
    ///
    /// Sequence elements are escaped individually and then joined, so the
    /// `<br>` marker itself survives: `["a", "b"]` displays as `a<br>b`.
    pub fn render_as_html(&self) -> String {
        match self {
            ContextValue::Scalar(s) => escape_html(s),
            ContextValue::Sequence(items) => items
                .iter()
                .map(|item| escape_html(item))
                .collect::<Vec<_>>()
                .join(SEQUENCE_JOIN),
            ContextValue::Structured(value) => escape_html(&value.to_string()),
        }
    }
}

impl fmt::Display for ContextValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render_as_text())
    }
}

impl From<String> for ContextValue {
    fn from(s: String) -> Self {
        ContextValue::Scalar(s)
    }
}

impl From<&str> for ContextValue {
    fn from(s: &str) -> Self {
        ContextValue::Scalar(s.to_owned())
    }
}

impl From<Vec<String>> for ContextValue {
    fn from(items: Vec<String>) -> Self {
        ContextValue::Sequence(items)
    }
}

impl From<Vec<&str>> for ContextValue {
    fn from(items: Vec<&str>) -> Self {
        ContextValue::Sequence(items.into_iter().map(str::to_owned).collect())
    }
}

impl From<Value> for ContextValue {
    fn from(value: Value) -> Self {
        ContextValue::Structured(value)
    }
}

/// Per-call name→value mapping with insertion-order iteration.
///
/// Backed by a `Vec` so the variable pass sees entries in the order the
/// caller inserted them; lookups are linear, which is fine for the handful
/// of entries a page carries. Created fresh per render call and never
/// shared across calls.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RenderContext {
    entries: Vec<(String, ContextValue)>,
}

impl RenderContext {
    /// Empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `name` to `value`. An existing binding is replaced in place,
    /// keeping its original position in the iteration order.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<ContextValue>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Bind `name` to `value` only if `name` is not already bound.
    pub fn entry_default(&mut self, name: impl Into<String>, value: impl Into<ContextValue>) {
        let name = name.into();
        if !self.contains(&name) {
            self.entries.push((name, value.into()));
        }
    }

    /// Look up a binding by exact, case-sensitive name.
    pub fn get(&self, name: &str) -> Option<&ContextValue> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    /// Whether `name` is bound.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(n, _)| n == name)
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ContextValue)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// Number of bindings.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the context holds no bindings.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<N: Into<String>, V: Into<ContextValue>> FromIterator<(N, V)> for RenderContext {
    fn from_iter<T: IntoIterator<Item = (N, V)>>(iter: T) -> Self {
        let mut ctx = RenderContext::new();
        for (name, value) in iter {
            ctx.insert(name, value);
        }
        ctx
    }
}
