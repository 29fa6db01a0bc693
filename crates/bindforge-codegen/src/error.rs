use bindforge_model::{TypeRef, ValidationError};
use bindforge_template::TemplateError;
use thiserror::Error;

use crate::mapping::Target;

#[derive(Debug, Error)]
pub enum CodegenError {
    /// A type has no representation for the requested target. Fatal for that
    /// target only; other targets may still succeed.
    #[error("unsupported mapping: no {target:?} representation for {ty:?}")]
    UnsupportedMapping { ty: TypeRef, target: Target },

    /// Model-level failure. Fatal: aborts the run before any emission.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Template authoring bug, never recovered automatically.
    #[error("template error: {0}")]
    Template(#[from] TemplateError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
