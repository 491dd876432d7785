//! Error types for veneer-renderer.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise from rendering operations.
///
/// Missing template files are not errors — they take the not-found
/// fallback path and still produce output. What does surface here is
/// filesystem trouble on files that exist (permissions, encoding) and
/// custom executor failures.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Filesystem error while reading a template or not-found page.
    #[error("template io error at {path}: {source}")]
    Io { path: PathBuf, source: std::io::Error },

    /// A custom [`TemplateExecutor`](crate::exec::TemplateExecutor)
    /// failed to produce body text.
    #[error("template execution failed at {path}: {message}")]
    Exec { path: PathBuf, message: String },
}

impl RenderError {
    /// I/O error wrapper carrying the offending path.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        RenderError::Io { path: path.into(), source }
    }

    /// Executor failure wrapper carrying the offending path.
    pub fn exec(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        RenderError::Exec { path: path.into(), message: message.into() }
    }
}
