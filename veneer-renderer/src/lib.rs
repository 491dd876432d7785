//! # veneer-renderer
//!
//! Server-side view renderer: resolves a template file, captures its body
//! through a [`TemplateExecutor`], then substitutes `{{ ... }}`
//! placeholders — variables, function calls, and filter pipes — with
//! values from a per-call [`veneer_core::RenderContext`]. A missing file
//! falls back to a configured 404 page, never to an error.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use veneer_core::RenderContext;
//! use veneer_renderer::{Renderer, RendererOptions};
//!
//! fn respond() {
//!     let mut renderer = Renderer::new(RendererOptions {
//!         default_html: Some("<html><body>{{ content }}</body></html>".into()),
//!         lang: Some("en".into()),
//!         ..RendererOptions::default()
//!     });
//!     renderer.register_function("upper", |args: &[String]| {
//!         args.first().map(|s| s.to_uppercase()).unwrap_or_default()
//!     });
//!
//!     let mut data = RenderContext::new();
//!     data.insert("title", "Home");
//!     if let Ok(page) = renderer.render("pages/home.html", data, RenderContext::new()) {
//!         let _ = page.write_to(&mut std::io::stdout());
//!     }
//! }
//! ```

pub mod engine;
pub mod error;
pub mod exec;
pub mod pipeline;
pub mod scan;

pub use engine::{
    PageStatus, RenderedPage, Renderer, RendererOptions, NOT_FOUND_ENV, ROOT_PATH_ENV,
};
pub use error::RenderError;
pub use exec::{StaticFileExecutor, TemplateExecutor};
