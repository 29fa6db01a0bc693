pub mod c;
pub mod cpp;
pub mod csharp;

use bindforge_model::{FunctionSignature, InterfaceModel, TypeRef};

use crate::error::CodegenError;
use crate::mapping::Target;

/// Target-specific binding emitter.
///
/// Each emitter consumes the same immutable model and produces an ordered
/// list of (relative path, content) pairs. All type text goes through
/// [`crate::mapping::map`]; translating types inside an emitter would bypass
/// the exactness guarantees.
pub trait TargetEmitter {
    /// Which target this emitter produces code for.
    fn target(&self) -> Target;

    /// File extension for declarations (e.g. "h", "hpp", "cs").
    fn file_extension(&self) -> &str;

    /// Emit all source artifacts for the model.
    fn emit(&self, model: &InterfaceModel) -> Result<Vec<(String, String)>, CodegenError>;
}

/// Create the emitter for the given target.
pub fn create_emitter(target: Target) -> Box<dyn TargetEmitter> {
    match target {
        Target::C => Box::new(c::CEmitter),
        Target::Cpp => Box::new(cpp::CppEmitter),
        Target::CSharp => Box::new(csharp::CSharpEmitter),
    }
}

/// Functions belonging to a handle type, in model order.
pub(crate) fn functions_for<'a>(model: &'a InterfaceModel, owner: &str) -> Vec<&'a FunctionSignature> {
    model
        .functions
        .iter()
        .filter(|f| f.owner() == Some(owner))
        .collect()
}

/// Functions attached to no handle type, in model order.
pub(crate) fn free_functions(model: &InterfaceModel) -> Vec<&FunctionSignature> {
    model.functions.iter().filter(|f| f.owner().is_none()).collect()
}

/// Header/file a type reference pulls in, relative to the current type.
pub(crate) fn include_for(ty: &TypeRef, current: Option<&str>, extension: &str) -> Option<String> {
    match ty {
        TypeRef::OpaqueHandle { name } | TypeRef::StructRef { name } => {
            if current == Some(name.as_str()) {
                None
            } else {
                Some(format!("#include \"{}.{}\"", name, extension))
            }
        }
        TypeRef::OwnedString => Some(format!("#include \"OwnedStr.{}\"", extension)),
        _ => None,
    }
}
