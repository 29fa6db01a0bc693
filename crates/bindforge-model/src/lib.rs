pub mod error;
pub mod function;
pub mod model;
pub mod ownership;
pub mod structure;
pub mod types;

// Re-exports
pub use error::{ValidationError, ValidationReport};
pub use function::{FunctionSignature, ParamRef};
pub use model::InterfaceModel;
pub use ownership::OwnershipKind;
pub use structure::{Field, StructDef};
pub use types::{Primitive, TypeRef};
