use serde::{Deserialize, Serialize};

use crate::types::TypeRef;

/// A named struct field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeRef,
}

impl Field {
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

/// A struct exported by the bound library.
///
/// Field order is part of the contract: targets that express layout declare
/// fields in exactly this order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructDef {
    pub name: String,
    pub fields: Vec<Field>,
}

impl StructDef {
    pub fn new(name: impl Into<String>, fields: Vec<Field>) -> Self {
        Self {
            name: name.into(),
            fields,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Primitive;

    #[test]
    fn test_field_order_preserved_through_serde() {
        let def = StructDef::new(
            "Point",
            vec![
                Field::new("x", TypeRef::Primitive(Primitive::I32)),
                Field::new("y", TypeRef::Primitive(Primitive::I32)),
            ],
        );
        let json = serde_json::to_string(&def).unwrap();
        let back: StructDef = serde_json::from_str(&json).unwrap();
        assert_eq!(back.fields[0].name, "x");
        assert_eq!(back.fields[1].name, "y");
        assert_eq!(back, def);
    }
}
