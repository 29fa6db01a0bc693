pub mod build;
pub mod context;
pub mod error;
pub mod generator;
pub mod mapping;
pub mod naming;

// Target emitters
pub mod emitters;

// Re-exports
pub use build::{builtin_templates, create_adapter, BuildAdapter};
pub use context::{EmitContext, IndentStyle};
pub use emitters::{create_emitter, TargetEmitter};
pub use error::CodegenError;
pub use generator::{generate_all, BindingGenerator, GeneratedBindings, RunReport};
pub use mapping::{map, MappedType, ReleaseStyle, Target};
