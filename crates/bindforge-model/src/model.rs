use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::function::{FunctionSignature, ParamRef};
use crate::ownership::{self, OwnershipKind};
use crate::structure::StructDef;
use crate::types::TypeRef;

/// Language-neutral description of a library's exported surface.
///
/// Constructed once per generation run and read-only afterwards. The model
/// arrives fully populated and namespaced; this crate never reads the origin
/// library's source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceModel {
    /// Library name, used for artifact naming (`ffi_<name>`).
    pub name: String,
    pub structs: Vec<StructDef>,
    pub functions: Vec<FunctionSignature>,
}

impl InterfaceModel {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            structs: Vec::new(),
            functions: Vec::new(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Look up a struct definition by name.
    pub fn struct_def(&self, name: &str) -> Option<&StructDef> {
        self.structs.iter().find(|s| s.name == name)
    }

    /// Whether `name` is referenced as an opaque handle anywhere in the
    /// model. Opaque usage wins over plain struct usage: a type referenced
    /// both ways is emitted opaque and its layout is never exposed.
    pub fn is_opaque(&self, name: &str) -> bool {
        self.each_type_ref()
            .any(|ty| matches!(ty, TypeRef::OpaqueHandle { name: n } if n == name))
    }

    /// Handle types in first-reference order, deduplicated. Covers both
    /// `OpaqueHandle` references and declared constructor/destructor
    /// resources.
    pub fn handle_types(&self) -> Vec<String> {
        let mut handles: IndexSet<String> = IndexSet::new();
        for f in &self.functions {
            if let Some(resource) = f.ownership.resource() {
                handles.insert(resource.to_string());
            }
        }
        for ty in self.each_type_ref() {
            if let TypeRef::OpaqueHandle { name } = ty {
                handles.insert(name.clone());
            }
        }
        handles.into_iter().collect()
    }

    /// Whether any signature or field uses an owned string. Drives emission
    /// of the per-target owned-string wrapper.
    pub fn uses_owned_string(&self) -> bool {
        self.each_type_ref().any(|ty| *ty == TypeRef::OwnedString)
    }

    /// Every type reference appearing in the model: struct fields, parameter
    /// types, and return types.
    pub fn each_type_ref(&self) -> impl Iterator<Item = &TypeRef> {
        let field_types = self.structs.iter().flat_map(|s| s.fields.iter().map(|f| &f.ty));
        let param_types = self.functions.iter().flat_map(|f| f.params.iter().map(|p| &p.ty));
        let return_types = self.functions.iter().filter_map(|f| f.ret.as_ref());
        field_types.chain(param_types).chain(return_types)
    }

    // ── Builder API ──
    //
    // Symbol names follow the ownership-protocol derivation rules, so models
    // built here match the convention the emitters document.

    pub fn add_struct(&mut self, def: StructDef) -> &mut Self {
        self.structs.push(def);
        self
    }

    pub fn add_function(&mut self, function: FunctionSignature) -> &mut Self {
        self.functions.push(function);
        self
    }

    /// Add a `<Resource>_new` constructor returning a live handle.
    pub fn add_constructor(&mut self, resource: &str, params: Vec<ParamRef>) -> &mut Self {
        self.add_function(FunctionSignature {
            name: ownership::constructor_symbol(resource),
            params,
            ret: Some(TypeRef::OpaqueHandle {
                name: resource.to_string(),
            }),
            ownership: OwnershipKind::Constructs {
                resource: resource.to_string(),
            },
        })
    }

    /// Add a `<Resource>_get_<field>` accessor reading through the handle.
    pub fn add_accessor(&mut self, resource: &str, field: &str, ret: TypeRef) -> &mut Self {
        self.add_function(FunctionSignature {
            name: ownership::accessor_symbol(resource, field),
            params: vec![ParamRef::new(
                "self",
                TypeRef::OpaqueHandle {
                    name: resource.to_string(),
                },
            )],
            ret: Some(ret),
            ownership: OwnershipKind::Borrows,
        })
    }

    /// Add a `<Resource>_<verb>` mutator operating through the handle.
    pub fn add_mutator(&mut self, resource: &str, verb: &str, params: Vec<ParamRef>) -> &mut Self {
        let mut all = vec![ParamRef::new(
            "self",
            TypeRef::OpaqueHandle {
                name: resource.to_string(),
            },
        )];
        all.extend(params);
        self.add_function(FunctionSignature {
            name: ownership::mutator_symbol(resource, verb),
            params: all,
            ret: None,
            ownership: OwnershipKind::Mutates,
        })
    }

    /// Add the `<Resource>_drop` destructor consuming the handle.
    pub fn add_destructor(&mut self, resource: &str) -> &mut Self {
        self.add_function(FunctionSignature {
            name: ownership::destructor_symbol(resource),
            params: vec![ParamRef::new(
                "self",
                TypeRef::OpaqueHandle {
                    name: resource.to_string(),
                },
            )],
            ret: None,
            ownership: OwnershipKind::Releases {
                resource: resource.to_string(),
            },
        })
    }
}
