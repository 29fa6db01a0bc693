//! Build-system manifests emitted next to the binding sources, rendered from
//! the built-in template set.

pub mod cmake;
pub mod csproj;

use bindforge_model::InterfaceModel;
use bindforge_template::{TemplateError, TemplateSet};

use crate::error::CodegenError;
use crate::mapping::Target;

/// Per-target build manifest adapter. Counterpart of
/// [`crate::emitters::TargetEmitter`] for the build-system side of an output
/// tree.
pub trait BuildAdapter {
    fn target(&self) -> Target;

    /// Emit (relative path, content) pairs for the build manifests.
    fn emit(
        &self,
        model: &InterfaceModel,
        templates: &TemplateSet,
    ) -> Result<Vec<(String, String)>, CodegenError>;
}

/// Create the build adapter for the given target.
pub fn create_adapter(target: Target) -> Box<dyn BuildAdapter> {
    match target {
        Target::C => Box::new(cmake::CMakeAdapter::c()),
        Target::Cpp => Box::new(cmake::CMakeAdapter::cpp()),
        Target::CSharp => Box::new(csproj::CsprojAdapter),
    }
}

/// Template set carrying the built-in build-system templates. The sources
/// are compiled in; a parse failure here is a bug in the shipped templates.
pub fn builtin_templates() -> Result<TemplateSet, TemplateError> {
    let mut set = TemplateSet::new();
    set.register("cmake_c", include_str!("../templates/CMakeLists.c.tmpl"))?;
    set.register("cmake_cpp", include_str!("../templates/CMakeLists.cpp.tmpl"))?;
    set.register("csproj", include_str!("../templates/bindings.csproj.tmpl"))?;
    Ok(set)
}
