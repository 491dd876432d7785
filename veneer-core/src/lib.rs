//! # veneer-core
//!
//! Context model and callable registry for the veneer view renderer.
//!
//! Public API surface:
//! - [`types`] — [`ContextValue`] tagged union and the insertion-ordered
//!   [`RenderContext`]
//! - [`registry`] — [`FunctionRegistry`] holding named functions and filters
//! - [`escape`] — HTML escaping used for displayed values

pub mod escape;
pub mod registry;
pub mod types;

pub use escape::escape_html;
pub use registry::{FunctionRegistry, TemplateCallable};
pub use types::{ContextValue, RenderContext, SEQUENCE_JOIN};
