//! Renderer orchestration — options, file resolution, the 404 fallback.
//!
//! # Render flow
//!
//! ```text
//! render(path, data_to_render, data_to_variable)
//!   ├─ path missing ──► not-found page at <root_path>/<not_found_file>
//!   │                     └─ also missing ──► built-in minimal body
//!   └─ path exists  ──► executor produces body
//!                         ├─ lang/title defaults merged (non-destructive)
//!                         └─ placeholder pipeline ──► final string
//! ```
//!
//! A missing template never fails the call: both fallback levels return a
//! [`RenderedPage`] with [`PageStatus::NotFound`] and a non-empty body.

use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use veneer_core::{FunctionRegistry, RenderContext};

use crate::error::RenderError;
use crate::exec::{StaticFileExecutor, TemplateExecutor};
use crate::pipeline;

/// Environment variable overriding [`RendererOptions::root_path`].
pub const ROOT_PATH_ENV: &str = "ROOT_PATH";
/// Environment variable overriding [`RendererOptions::not_found_file`].
pub const NOT_FOUND_ENV: &str = "DEFAULT_PAGE_NOT_FOUND";

const DEFAULT_LANG: &str = "fr";
const DEFAULT_TITLE: &str = "Document";
const DEFAULT_NOT_FOUND_FILE: &str = "404.html";

/// Body served when the not-found page itself is missing.
const NOT_FOUND_BODY: &str = "<h1>404 Not Found</h1>";

/// Constructor-level options.
///
/// Unset fields fall back to an environment override where one exists
/// (`ROOT_PATH`, `DEFAULT_PAGE_NOT_FOUND`), then to the documented
/// default. Resolution happens once, at [`Renderer`] construction.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RendererOptions {
    /// Outer shell template holding a `{{ content }}` slot. Empty or
    /// absent means bodies are emitted unwrapped.
    pub default_html: Option<String>,
    /// Default `lang` placeholder value (falls back to `"fr"`).
    pub lang: Option<String>,
    /// Default `title` placeholder value (falls back to `"Document"`).
    pub default_title: Option<String>,
    /// File name of the not-found page under `root_path`
    /// (falls back to `$DEFAULT_PAGE_NOT_FOUND`, then `"404.html"`).
    pub not_found_file: Option<String>,
    /// Base directory for resolving the not-found page
    /// (falls back to `$ROOT_PATH`, then `"."`).
    pub root_path: Option<PathBuf>,
}

impl RendererOptions {
    /// Apply precedence: explicit option > environment > default.
    /// `env` is injectable so the precedence is testable without touching
    /// the process environment.
    pub(crate) fn resolve(self, env: impl Fn(&str) -> Option<String>) -> ResolvedOptions {
        ResolvedOptions {
            default_html: self.default_html.filter(|s| !s.is_empty()),
            lang: self.lang.unwrap_or_else(|| DEFAULT_LANG.to_owned()),
            default_title: self.default_title.unwrap_or_else(|| DEFAULT_TITLE.to_owned()),
            not_found_file: self
                .not_found_file
                .or_else(|| env(NOT_FOUND_ENV))
                .unwrap_or_else(|| DEFAULT_NOT_FOUND_FILE.to_owned()),
            root_path: self
                .root_path
                .or_else(|| env(ROOT_PATH_ENV).map(PathBuf::from))
                .unwrap_or_else(|| PathBuf::from(".")),
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct ResolvedOptions {
    pub(crate) default_html: Option<String>,
    pub(crate) lang: String,
    pub(crate) default_title: String,
    pub(crate) not_found_file: String,
    pub(crate) root_path: PathBuf,
}

/// Outcome status the host signals before writing the body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageStatus {
    Ok,
    NotFound,
}

impl PageStatus {
    /// HTTP status code for this outcome.
    pub fn code(&self) -> u16 {
        match self {
            PageStatus::Ok => 200,
            PageStatus::NotFound => 404,
        }
    }
}

/// Final output of one render call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderedPage {
    pub status: PageStatus,
    pub body: String,
}

impl RenderedPage {
    /// Write the body to the host's response stream.
    pub fn write_to(&self, out: &mut impl io::Write) -> io::Result<()> {
        out.write_all(self.body.as_bytes())
    }
}

/// View renderer. Create once, register callables during setup, then
/// render per request.
///
/// Each render call builds on a call-local [`RenderContext`]; the only
/// state shared between calls is the registry, which must not be mutated
/// once concurrent rendering starts.
pub struct Renderer {
    options: ResolvedOptions,
    registry: FunctionRegistry,
    executor: Box<dyn TemplateExecutor + Send + Sync>,
}

impl Renderer {
    /// Renderer with the default [`StaticFileExecutor`]. Environment
    /// overrides are read here, once.
    pub fn new(options: RendererOptions) -> Self {
        Self::with_executor(options, StaticFileExecutor)
    }

    /// Renderer backed by a custom template executor.
    pub fn with_executor(
        options: RendererOptions,
        executor: impl TemplateExecutor + Send + Sync + 'static,
    ) -> Self {
        Renderer {
            options: options.resolve(|name| std::env::var(name).ok()),
            registry: FunctionRegistry::new(),
            executor: Box::new(executor),
        }
    }

    /// Bind a template function, replacing any prior binding.
    pub fn register_function(
        &mut self,
        name: impl Into<String>,
        callable: impl Fn(&[String]) -> String + Send + Sync + 'static,
    ) {
        self.registry.register_function(name, callable);
    }

    /// Bind a template filter, replacing any prior binding.
    pub fn register_filter(
        &mut self,
        name: impl Into<String>,
        callable: impl Fn(&[String]) -> String + Send + Sync + 'static,
    ) {
        self.registry.register_filter(name, callable);
    }

    /// Read access to the function/filter registry.
    pub fn registry(&self) -> &FunctionRegistry {
        &self.registry
    }

    /// Render `path`: execute the template with `data_to_variable` as its
    /// locals, then post-process placeholders with `data_to_render`.
    ///
    /// `lang` and `title` defaults are merged into `data_to_render` only
    /// for keys not already present.
    pub fn render(
        &self,
        path: impl AsRef<Path>,
        mut data_to_render: RenderContext,
        data_to_variable: RenderContext,
    ) -> Result<RenderedPage, RenderError> {
        let path = path.as_ref();
        if !path.exists() {
            return self.not_found(path);
        }

        debug!(path = %path.display(), "rendering template");
        let body = self.executor.execute(path, &data_to_variable)?;

        data_to_render.entry_default("lang", self.options.lang.as_str());
        data_to_render.entry_default("title", self.options.default_title.as_str());

        let body = pipeline::apply(
            &body,
            self.options.default_html.as_deref(),
            &data_to_render,
            &self.registry,
        );
        Ok(RenderedPage { status: PageStatus::Ok, body })
    }

    /// Two-level fallback: the configured not-found page, then the
    /// built-in body. The page is emitted as-is, without a pipeline pass.
    fn not_found(&self, requested: &Path) -> Result<RenderedPage, RenderError> {
        let page = self.options.root_path.join(&self.options.not_found_file);
        warn!(requested = %requested.display(), "template missing, serving not-found page");
        let body = if page.exists() {
            self.executor.execute(&page, &RenderContext::new())?
        } else {
            warn!(page = %page.display(), "not-found page missing, using built-in body");
            NOT_FOUND_BODY.to_owned()
        };
        Ok(RenderedPage { status: PageStatus::NotFound, body })
    }
}
