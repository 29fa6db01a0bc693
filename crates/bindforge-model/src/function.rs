use serde::{Deserialize, Serialize};

use crate::ownership::OwnershipKind;
use crate::types::TypeRef;

/// A function parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamRef {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeRef,
    /// Output parameters denote in-place mutation of caller-supplied storage,
    /// never ownership transfer.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_output: bool,
}

impl ParamRef {
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty,
            is_output: false,
        }
    }

    pub fn output(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty,
            is_output: true,
        }
    }
}

/// An exported function of the bound library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionSignature {
    /// Exported symbol name, e.g. `Counter_get_count`.
    pub name: String,
    pub params: Vec<ParamRef>,
    #[serde(rename = "return", skip_serializing_if = "Option::is_none")]
    pub ret: Option<TypeRef>,
    pub ownership: OwnershipKind,
}

impl FunctionSignature {
    /// The handle type this function belongs to, if any: the declared
    /// resource for constructors and destructors, otherwise the handle type
    /// of the first parameter or of the return value.
    pub fn owner(&self) -> Option<&str> {
        if let Some(resource) = self.ownership.resource() {
            return Some(resource);
        }
        for param in &self.params {
            if let TypeRef::OpaqueHandle { name } = &param.ty {
                return Some(name);
            }
        }
        match &self.ret {
            Some(TypeRef::OpaqueHandle { name }) => Some(name),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Primitive;

    fn handle(name: &str) -> TypeRef {
        TypeRef::OpaqueHandle {
            name: name.to_string(),
        }
    }

    #[test]
    fn test_owner_from_resource() {
        let f = FunctionSignature {
            name: "Counter_new".to_string(),
            params: vec![ParamRef::new("initial", TypeRef::Primitive(Primitive::U32))],
            ret: Some(handle("Counter")),
            ownership: OwnershipKind::Constructs {
                resource: "Counter".to_string(),
            },
        };
        assert_eq!(f.owner(), Some("Counter"));
    }

    #[test]
    fn test_owner_from_first_handle_param() {
        let f = FunctionSignature {
            name: "Counter_get_count".to_string(),
            params: vec![ParamRef::new("self", handle("Counter"))],
            ret: Some(TypeRef::Primitive(Primitive::U32)),
            ownership: OwnershipKind::Borrows,
        };
        assert_eq!(f.owner(), Some("Counter"));
    }

    #[test]
    fn test_free_function_has_no_owner() {
        let f = FunctionSignature {
            name: "add".to_string(),
            params: vec![
                ParamRef::new("a", TypeRef::Primitive(Primitive::F32)),
                ParamRef::new("b", TypeRef::Primitive(Primitive::F32)),
            ],
            ret: Some(TypeRef::Primitive(Primitive::F32)),
            ownership: OwnershipKind::Computes,
        };
        assert_eq!(f.owner(), None);
    }

    #[test]
    fn test_param_serialization_skips_default_output_flag() {
        let p = ParamRef::new("amount", TypeRef::Primitive(Primitive::U32));
        let json = serde_json::to_value(&p).unwrap();
        assert!(json.get("is_output").is_none());

        let out = ParamRef::output("count", TypeRef::Primitive(Primitive::U32));
        let json = serde_json::to_value(&out).unwrap();
        assert_eq!(json["is_output"], true);
    }
}
