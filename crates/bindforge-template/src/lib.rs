pub mod registry;
pub mod template;

// Re-exports
pub use registry::TemplateSet;
pub use template::{RenderContext, TemplateDocument, TemplateError};
