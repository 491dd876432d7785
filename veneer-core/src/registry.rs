//! Named function and filter registry for the placeholder pipeline.
//!
//! Functions answer `{{ name(args) }}` placeholders; filters answer the
//! segments of `{{ value | filter | ... }}` pipes. The two namespaces are
//! disjoint, so the same name may be bound in both without conflict.

use std::collections::HashMap;
use std::fmt;

use chrono::{Datelike, Utc};

/// A registered template callable: ordered string arguments in, display
/// text out. Arity is not validated at registration; mismatches are the
/// callable author's concern and surface at call time.
pub type TemplateCallable = Box<dyn Fn(&[String]) -> String + Send + Sync>;

/// Collection of named functions and filters available to templates.
///
/// Registration overwrites any prior binding for that name in that
/// namespace. Lookups never fail hard: unknown names yield `None` and the
/// caller picks its own fallback. Intended lifecycle: populate during
/// setup, then share read-only across render calls.
pub struct FunctionRegistry {
    functions: HashMap<String, TemplateCallable>,
    filters: HashMap<String, TemplateCallable>,
}

impl FunctionRegistry {
    /// Registry pre-seeded with the built-ins:
    /// - filter `raw` — identity on its first argument, no escaping;
    /// - function `currentYear` — the current calendar year, read from the
    ///   system clock at each call (never cached).
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register_filter("raw", |args: &[String]| {
            args.first().cloned().unwrap_or_default()
        });
        registry.register_function("currentYear", |_args: &[String]| {
            Utc::now().year().to_string()
        });
        registry
    }

    /// Registry with no built-ins. Most callers want [`FunctionRegistry::new`].
    pub fn empty() -> Self {
        FunctionRegistry { functions: HashMap::new(), filters: HashMap::new() }
    }

    /// Bind a function, replacing any prior binding for `name`.
    pub fn register_function(
        &mut self,
        name: impl Into<String>,
        callable: impl Fn(&[String]) -> String + Send + Sync + 'static,
    ) {
        self.functions.insert(name.into(), Box::new(callable));
    }

    /// Bind a filter, replacing any prior binding for `name`.
    pub fn register_filter(
        &mut self,
        name: impl Into<String>,
        callable: impl Fn(&[String]) -> String + Send + Sync + 'static,
    ) {
        self.filters.insert(name.into(), Box::new(callable));
    }

    /// Look up a function by name.
    pub fn get_function(&self, name: &str) -> Option<&TemplateCallable> {
        self.functions.get(name)
    }

    /// Look up a filter by name.
    pub fn get_filter(&self, name: &str) -> Option<&TemplateCallable> {
        self.filters.get(name)
    }

    /// Invoke a function; `None` when `name` is unbound.
    pub fn execute_function(&self, name: &str, args: &[String]) -> Option<String> {
        self.get_function(name).map(|f| f(args))
    }

    /// Invoke a filter; `None` when `name` is unbound.
    pub fn execute_filter(&self, name: &str, args: &[String]) -> Option<String> {
        self.get_filter(name).map(|f| f(args))
    }
}

impl Default for FunctionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for FunctionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut functions: Vec<&str> = self.functions.keys().map(String::as_str).collect();
        let mut filters: Vec<&str> = self.filters.keys().map(String::as_str).collect();
        functions.sort_unstable();
        filters.sort_unstable();
        f.debug_struct("FunctionRegistry")
            .field("functions", &functions)
            .field("filters", &filters)
            .finish()
    }
}
