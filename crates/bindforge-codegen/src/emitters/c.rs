//! C target: header declarations for the symbols exported by the compiled
//! `ffi_<project>` artifact. Manual memory target: every handle requires an
//! explicit destructor call; nothing simulates automatic cleanup.

use bindforge_model::ownership::{BORROWED_VIEW_CONTRACT, HANDLE_CONTRACT, OWNED_STRING_CONTRACT};
use bindforge_model::{FunctionSignature, InterfaceModel, OwnershipKind, StructDef};

use super::{free_functions, functions_for, include_for, TargetEmitter};
use crate::context::{EmitContext, IndentStyle};
use crate::error::CodegenError;
use crate::mapping::{map, Target};

pub struct CEmitter;

impl TargetEmitter for CEmitter {
    fn target(&self) -> Target {
        Target::C
    }

    fn file_extension(&self) -> &str {
        "h"
    }

    fn emit(&self, model: &InterfaceModel) -> Result<Vec<(String, String)>, CodegenError> {
        let mut files = Vec::new();
        for def in &model.structs {
            let content = if model.is_opaque(&def.name) {
                self.handle_header(model, def)?
            } else {
                self.layout_header(model, def)?
            };
            files.push((format!("include/{}.h", def.name), content));
        }
        if model.uses_owned_string() {
            files.push(("include/OwnedStr.h".to_string(), owned_string_header()));
        }
        let free = free_functions(model);
        if !free.is_empty() {
            let content = self.functions_header(model, &free)?;
            files.push((format!("include/{}.h", model.name), content));
        }
        Ok(files)
    }
}

impl CEmitter {
    /// Header for an opaque handle type: wrapper typedef carrying exactly one
    /// raw handle, plus prototypes for every function attached to it.
    fn handle_header(&self, model: &InterfaceModel, def: &StructDef) -> Result<String, CodegenError> {
        let mut ctx = EmitContext::new(IndentStyle::Spaces(4));
        let mut body = String::new();

        for line in HANDLE_CONTRACT {
            body.push_str(&format!("// {}\n", line));
        }
        body.push_str(&format!(
            "typedef struct Struct_{0} {{\n    void* self;\n}} C{0};\n\n",
            def.name
        ));

        for function in functions_for(model, &def.name) {
            body.push_str(&self.prototype(model, function, Some(&def.name), &mut ctx)?);
        }

        Ok(assemble_header(&mut ctx, &body))
    }

    /// Header for a plain struct: full layout, field order preserved.
    fn layout_header(&self, model: &InterfaceModel, def: &StructDef) -> Result<String, CodegenError> {
        let mut ctx = EmitContext::new(IndentStyle::Spaces(4));
        let mut body = String::new();

        body.push_str(&format!("typedef struct {} {{\n", def.name));
        for field in &def.fields {
            if let Some(include) = include_for(&field.ty, Some(&def.name), "h") {
                ctx.add_include(include);
            }
            let mapped = map(&field.ty, Target::C, model)?;
            body.push_str(&format!("    {} {};\n", mapped.name, field.name));
        }
        body.push_str(&format!("}} {};\n", def.name));

        Ok(assemble_header(&mut ctx, &body))
    }

    /// Header for functions attached to no handle type.
    fn functions_header(
        &self,
        model: &InterfaceModel,
        functions: &[&FunctionSignature],
    ) -> Result<String, CodegenError> {
        let mut ctx = EmitContext::new(IndentStyle::Spaces(4));
        let mut body = String::new();
        for function in functions {
            body.push_str(&self.prototype(model, function, None, &mut ctx)?);
        }
        Ok(assemble_header(&mut ctx, &body))
    }

    fn prototype(
        &self,
        model: &InterfaceModel,
        function: &FunctionSignature,
        current: Option<&str>,
        ctx: &mut EmitContext,
    ) -> Result<String, CodegenError> {
        let ret = match &function.ret {
            Some(ty) => {
                if let Some(include) = include_for(ty, current, "h") {
                    ctx.add_include(include);
                }
                map(ty, Target::C, model)?.name
            }
            None => "void".to_string(),
        };

        let mut params = Vec::new();
        for param in &function.params {
            if let Some(include) = include_for(&param.ty, current, "h") {
                ctx.add_include(include);
            }
            let mapped = map(&param.ty, Target::C, model)?;
            if param.is_output {
                // In-place mutation of caller storage, never ownership
                // transfer.
                params.push(format!("{}* {}", mapped.name, param.name));
            } else {
                params.push(format!("{} {}", mapped.name, param.name));
            }
        }

        let mut out = String::new();
        if let Some(doc) = ownership_doc(&function.ownership) {
            out.push_str(&format!("// {}\n", doc));
        }
        out.push_str(&format!("{} {}({});\n\n", ret, function.name, params.join(", ")));
        Ok(out)
    }
}

fn ownership_doc(ownership: &OwnershipKind) -> Option<String> {
    match ownership {
        OwnershipKind::Constructs { resource } => Some(format!(
            "Constructs a live {0}; release it with {0}_drop exactly once.",
            resource
        )),
        OwnershipKind::Releases { resource } => Some(format!(
            "Releases the {}. The handle must not be used afterwards.",
            resource
        )),
        OwnershipKind::Borrows => Some("Reads through the handle; no ownership transfer.".to_string()),
        OwnershipKind::Mutates => Some("Mutates the resource in place.".to_string()),
        OwnershipKind::Computes => None,
    }
}

fn assemble_header(ctx: &mut EmitContext, body: &str) -> String {
    let mut out = String::from("#pragma once\n\n#include <stdint.h>\n");
    for include in ctx.take_includes() {
        out.push_str(&include);
        out.push('\n');
    }
    out.push_str("\n#ifdef __cplusplus\nextern \"C\" {\n#endif\n\n");
    out.push_str(body);
    out.push_str("\n#ifdef __cplusplus\n}\n#endif\n");
    out
}

fn owned_string_header() -> String {
    let mut body = String::new();
    for line in OWNED_STRING_CONTRACT {
        body.push_str(&format!("// {}\n", line));
    }
    body.push_str("typedef struct Struct_OwnedStr {\n    void* self;\n} COwnedStr;\n\n");
    body.push_str("// Read-only pointer into the owned buffer; valid until OwnedStr_drop.\n");
    for line in BORROWED_VIEW_CONTRACT {
        body.push_str(&format!("// {}\n", line));
    }
    body.push_str("const char* OwnedStr_as_ptr(COwnedStr self);\n\n");
    body.push_str("// Releases the owned string. Must be called exactly once.\n");
    body.push_str("void OwnedStr_drop(COwnedStr self);\n");

    let mut ctx = EmitContext::new(IndentStyle::Spaces(4));
    assemble_header(&mut ctx, &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bindforge_model::{Field, ParamRef, Primitive, TypeRef};

    fn counter_model() -> InterfaceModel {
        let mut model = InterfaceModel::new("counter");
        model.add_struct(StructDef::new(
            "Counter",
            vec![Field::new("count", TypeRef::Primitive(Primitive::U32))],
        ));
        model
            .add_constructor(
                "Counter",
                vec![ParamRef::new("initial", TypeRef::Primitive(Primitive::U32))],
            )
            .add_mutator(
                "Counter",
                "count",
                vec![ParamRef::new("amount", TypeRef::Primitive(Primitive::U32))],
            )
            .add_accessor("Counter", "count", TypeRef::Primitive(Primitive::U32))
            .add_destructor("Counter");
        model
    }

    #[test]
    fn test_counter_header_declares_all_four_symbols() {
        let model = counter_model();
        let files = CEmitter.emit(&model).unwrap();
        assert_eq!(files.len(), 1);
        let (path, content) = &files[0];
        assert_eq!(path, "include/Counter.h");

        assert!(content.contains("typedef struct Struct_Counter {"));
        assert!(content.contains("} CCounter;"));
        assert!(content.contains("CCounter Counter_new(uint32_t initial);"));
        assert!(content.contains("void Counter_count(CCounter self, uint32_t amount);"));
        assert!(content.contains("uint32_t Counter_get_count(CCounter self);"));
        assert!(content.contains("void Counter_drop(CCounter self);"));
    }

    #[test]
    fn test_header_carries_guards_and_contract() {
        let model = counter_model();
        let files = CEmitter.emit(&model).unwrap();
        let content = &files[0].1;
        assert!(content.starts_with("#pragma once"));
        assert!(content.contains("#include <stdint.h>"));
        assert!(content.contains("extern \"C\" {"));
        assert!(content.contains("undefined behavior"));
        assert!(content.contains("exactly once"));
    }

    #[test]
    fn test_layout_struct_preserves_field_order() {
        let mut model = InterfaceModel::new("geometry");
        model.add_struct(StructDef::new(
            "Point",
            vec![
                Field::new("x", TypeRef::Primitive(Primitive::I32)),
                Field::new("y", TypeRef::Primitive(Primitive::I32)),
            ],
        ));
        let files = CEmitter.emit(&model).unwrap();
        let content = &files[0].1;
        let x = content.find("int32_t x;").unwrap();
        let y = content.find("int32_t y;").unwrap();
        assert!(x < y);
        assert!(content.contains("typedef struct Point {"));
        assert!(!content.contains("void* self"));
    }

    #[test]
    fn test_owned_string_header_emitted_on_demand() {
        let mut model = counter_model();
        model.add_function(FunctionSignature {
            name: "Counter_label".to_string(),
            params: vec![ParamRef::new(
                "self",
                TypeRef::OpaqueHandle {
                    name: "Counter".to_string(),
                },
            )],
            ret: Some(TypeRef::OwnedString),
            ownership: OwnershipKind::Borrows,
        });

        let files = CEmitter.emit(&model).unwrap();
        let owned = files
            .iter()
            .find(|(p, _)| p == "include/OwnedStr.h")
            .expect("OwnedStr.h should be emitted");
        assert!(owned.1.contains("const char* OwnedStr_as_ptr(COwnedStr self);"));
        assert!(owned.1.contains("void OwnedStr_drop(COwnedStr self);"));

        // The counter header pulls the wrapper in and returns it by value.
        let counter = &files.iter().find(|(p, _)| p == "include/Counter.h").unwrap().1;
        assert!(counter.contains("#include \"OwnedStr.h\""));
        assert!(counter.contains("COwnedStr Counter_label(CCounter self);"));
    }

    #[test]
    fn test_output_param_is_a_pointer() {
        let mut model = InterfaceModel::new("counter");
        model.add_struct(StructDef::new("Counter", vec![]));
        model.add_constructor("Counter", vec![]).add_destructor("Counter");
        model.add_function(FunctionSignature {
            name: "Counter_read_into".to_string(),
            params: vec![
                ParamRef::new(
                    "self",
                    TypeRef::OpaqueHandle {
                        name: "Counter".to_string(),
                    },
                ),
                ParamRef::output("out", TypeRef::Primitive(Primitive::U32)),
            ],
            ret: None,
            ownership: OwnershipKind::Borrows,
        });

        let files = CEmitter.emit(&model).unwrap();
        let content = &files[0].1;
        assert!(content.contains("void Counter_read_into(CCounter self, uint32_t* out);"));
    }

    #[test]
    fn test_free_functions_land_in_project_header() {
        let mut model = InterfaceModel::new("mathlib");
        model.add_function(FunctionSignature {
            name: "add".to_string(),
            params: vec![
                ParamRef::new("a", TypeRef::Primitive(Primitive::F32)),
                ParamRef::new("b", TypeRef::Primitive(Primitive::F32)),
            ],
            ret: Some(TypeRef::Primitive(Primitive::F32)),
            ownership: OwnershipKind::Computes,
        });

        let files = CEmitter.emit(&model).unwrap();
        let (path, content) = &files[0];
        assert_eq!(path, "include/mathlib.h");
        assert!(content.contains("float add(float a, float b);"));
    }
}
