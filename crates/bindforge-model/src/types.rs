use serde::{Deserialize, Serialize};

/// Fixed-width primitive types.
///
/// Widths and signedness are exact. There is no implicit widening anywhere in
/// the pipeline: a `U8` stays an 8-bit unsigned value in every target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Primitive {
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
    F32,
    F64,
}

impl Primitive {
    /// All ten variants, in declaration order.
    pub const ALL: [Primitive; 10] = [
        Primitive::I8,
        Primitive::I16,
        Primitive::I32,
        Primitive::I64,
        Primitive::U8,
        Primitive::U16,
        Primitive::U32,
        Primitive::U64,
        Primitive::F32,
        Primitive::F64,
    ];

    /// Declared bit width.
    pub fn bit_width(&self) -> u32 {
        match self {
            Primitive::I8 | Primitive::U8 => 8,
            Primitive::I16 | Primitive::U16 => 16,
            Primitive::I32 | Primitive::U32 | Primitive::F32 => 32,
            Primitive::I64 | Primitive::U64 | Primitive::F64 => 64,
        }
    }

    pub fn is_float(&self) -> bool {
        matches!(self, Primitive::F32 | Primitive::F64)
    }

    /// Integer signedness. Floats are always signed.
    pub fn is_signed(&self) -> bool {
        matches!(
            self,
            Primitive::I8
                | Primitive::I16
                | Primitive::I32
                | Primitive::I64
                | Primitive::F32
                | Primitive::F64
        )
    }
}

/// Reference to a type in the interface model.
///
/// `OpaqueHandle` and `StructRef` name a [`StructDef`](crate::StructDef) in
/// the same model; dangling names are rejected by validation before any
/// emission happens.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeRef {
    Primitive(Primitive),
    /// A library-managed resource identified by a single raw handle. The
    /// consumer never sees its layout.
    OpaqueHandle { name: String },
    /// A string the consumer owns and must release exactly once.
    OwnedString,
    /// A read-only view into library-owned memory. Never released by the
    /// consumer.
    BorrowedStringView,
    /// A plain struct passed with its full layout, field order preserved.
    StructRef { name: String },
}

impl TypeRef {
    /// The struct name this reference must resolve against, if any.
    pub fn struct_name(&self) -> Option<&str> {
        match self {
            TypeRef::OpaqueHandle { name } | TypeRef::StructRef { name } => Some(name),
            _ => None,
        }
    }

    pub fn is_handle(&self) -> bool {
        matches!(self, TypeRef::OpaqueHandle { .. })
    }
}
