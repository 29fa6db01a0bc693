use bindforge_model::{InterfaceModel, Primitive, TypeRef};
use serde::{Deserialize, Serialize};

use crate::error::CodegenError;

/// Supported emission targets. A closed set: adding a target means adding a
/// variant and an emitter, and exhaustive matches catch anything missed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Target {
    C,
    Cpp,
    CSharp,
}

impl Target {
    pub const ALL: [Target; 3] = [Target::C, Target::Cpp, Target::CSharp];

    /// Output subdirectory for this target.
    pub fn dir_name(&self) -> &'static str {
        match self {
            Target::C => "c",
            Target::Cpp => "cpp",
            Target::CSharp => "csharp",
        }
    }

    /// How this target represents resource release.
    pub fn release_style(&self) -> ReleaseStyle {
        match self {
            Target::C => ReleaseStyle::Explicit,
            Target::Cpp | Target::CSharp => ReleaseStyle::ScopeBound,
        }
    }
}

/// Whether a target requires an explicit destructor call or wraps the handle
/// in a scope-bound owner that releases it on scope exit exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseStyle {
    Explicit,
    ScopeBound,
}

/// Target-specific representation of an interface-model type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappedType {
    /// Spelling used in wrapper-level declarations.
    pub name: String,
    /// Spelling used in the raw FFI declarations (externs); identical to
    /// `name` for targets without a wrapper layer.
    pub raw: String,
    /// Declared bit width, for primitives.
    pub bit_width: Option<u32>,
    /// Declared signedness, for primitives (floats are signed).
    pub signed: Option<bool>,
    /// Whether the consumer holds a release obligation for this value.
    pub needs_release: bool,
}

impl MappedType {
    fn primitive(name: &str, p: Primitive) -> Self {
        Self {
            name: name.to_string(),
            raw: name.to_string(),
            bit_width: Some(p.bit_width()),
            signed: Some(p.is_signed()),
            needs_release: false,
        }
    }

    fn plain(name: &str) -> Self {
        Self {
            name: name.to_string(),
            raw: name.to_string(),
            bit_width: None,
            signed: None,
            needs_release: false,
        }
    }

    fn owned(name: &str, raw: &str) -> Self {
        Self {
            name: name.to_string(),
            raw: raw.to_string(),
            bit_width: None,
            signed: None,
            needs_release: true,
        }
    }

    fn view(name: &str, raw: &str) -> Self {
        Self {
            name: name.to_string(),
            raw: raw.to_string(),
            bit_width: None,
            signed: None,
            needs_release: false,
        }
    }
}

/// Map an interface-model type to its representation for `target`.
///
/// The single source of truth for type translation: emitters must route every
/// type appearing in a signature or field through here. Primitive mappings
/// are width- and signedness-exact; a `U8` never becomes a target's default
/// (possibly wider or signed) integer type.
pub fn map(ty: &TypeRef, target: Target, model: &InterfaceModel) -> Result<MappedType, CodegenError> {
    match ty {
        TypeRef::Primitive(p) => Ok(MappedType::primitive(primitive_name(*p, target), *p)),
        TypeRef::OpaqueHandle { name } => {
            resolve(name, ty, target, model)?;
            Ok(handle_mapping(name, target))
        }
        TypeRef::OwnedString => Ok(match target {
            Target::C => MappedType::owned("COwnedStr", "COwnedStr"),
            Target::Cpp => MappedType::owned("OwnedStr", "COwnedStr"),
            Target::CSharp => MappedType::owned("OwnedStr", "IntPtr"),
        }),
        TypeRef::BorrowedStringView => Ok(match target {
            // Read-only view; no release obligation, ever.
            Target::C | Target::Cpp => MappedType::plain("const char*"),
            // The raw side stays a pointer: marshaling a returned char* as
            // string would free library-owned memory.
            Target::CSharp => MappedType::view("string", "IntPtr"),
        }),
        TypeRef::StructRef { name } => {
            resolve(name, ty, target, model)?;
            if model.is_opaque(name) {
                // Opaque usage wins; the layout is never exposed.
                Ok(handle_mapping(name, target))
            } else {
                Ok(MappedType::plain(name))
            }
        }
    }
}

fn resolve(name: &str, ty: &TypeRef, target: Target, model: &InterfaceModel) -> Result<(), CodegenError> {
    // Validation catches dangling names before emission; this is the
    // emission-time safety net for models that bypassed it.
    if model.struct_def(name).is_none() {
        return Err(CodegenError::UnsupportedMapping {
            ty: ty.clone(),
            target,
        });
    }
    Ok(())
}

fn handle_mapping(name: &str, target: Target) -> MappedType {
    match target {
        Target::C => MappedType::owned(&format!("C{}", name), &format!("C{}", name)),
        Target::Cpp => MappedType::owned(name, &format!("C{}", name)),
        Target::CSharp => MappedType::owned(name, "IntPtr"),
    }
}

fn primitive_name(p: Primitive, target: Target) -> &'static str {
    match target {
        Target::C => match p {
            Primitive::I8 => "int8_t",
            Primitive::I16 => "int16_t",
            Primitive::I32 => "int32_t",
            Primitive::I64 => "int64_t",
            Primitive::U8 => "uint8_t",
            Primitive::U16 => "uint16_t",
            Primitive::U32 => "uint32_t",
            Primitive::U64 => "uint64_t",
            Primitive::F32 => "float",
            Primitive::F64 => "double",
        },
        Target::Cpp => match p {
            Primitive::I8 => "std::int8_t",
            Primitive::I16 => "std::int16_t",
            Primitive::I32 => "std::int32_t",
            Primitive::I64 => "std::int64_t",
            Primitive::U8 => "std::uint8_t",
            Primitive::U16 => "std::uint16_t",
            Primitive::U32 => "std::uint32_t",
            Primitive::U64 => "std::uint64_t",
            Primitive::F32 => "float",
            Primitive::F64 => "double",
        },
        Target::CSharp => match p {
            Primitive::I8 => "sbyte",
            Primitive::I16 => "short",
            Primitive::I32 => "int",
            Primitive::I64 => "long",
            Primitive::U8 => "byte",
            Primitive::U16 => "ushort",
            Primitive::U32 => "uint",
            Primitive::U64 => "ulong",
            Primitive::F32 => "float",
            Primitive::F64 => "double",
        },
    }
}
