//! Template execution seam.
//!
//! Whatever mechanism the host uses to turn a template file into body text
//! (embedded scripting, includes, plain markup) sits behind
//! [`TemplateExecutor`]. The renderer only asks for one thing: the full
//! text the template produced.

use std::path::Path;

use veneer_core::RenderContext;

use crate::error::RenderError;

/// Produces the raw body text for a template file.
///
/// `vars` carries the caller's variable bindings; executors that run
/// embedded logic expose them to the template as locals. The returned
/// text is handed to the placeholder pipeline untouched.
pub trait TemplateExecutor {
    fn execute(&self, path: &Path, vars: &RenderContext) -> Result<String, RenderError>;
}

/// Executor for static markup: the file's bytes are the body.
///
/// Ignores `vars` — a static page has no embedded logic to bind them to;
/// its placeholders are resolved by the pipeline afterwards.
#[derive(Debug, Default, Clone, Copy)]
pub struct StaticFileExecutor;

impl TemplateExecutor for StaticFileExecutor {
    fn execute(&self, path: &Path, _vars: &RenderContext) -> Result<String, RenderError> {
        std::fs::read_to_string(path).map_err(|e| RenderError::io(path, e))
    }
}
