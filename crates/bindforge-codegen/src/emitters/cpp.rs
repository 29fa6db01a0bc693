//! C++ target: header-only RAII wrappers over the C symbols. Scope-bound
//! ownership: the wrapper's destructor releases the handle on scope exit
//! exactly once; moved-from wrappers release nothing.

use bindforge_model::ownership::{self, HANDLE_CONTRACT, OWNED_STRING_CONTRACT};
use bindforge_model::{FunctionSignature, InterfaceModel, OwnershipKind, StructDef, TypeRef};

use super::{free_functions, functions_for, include_for, TargetEmitter};
use crate::context::{EmitContext, IndentStyle};
use crate::error::CodegenError;
use crate::mapping::{map, Target};

pub struct CppEmitter;

impl TargetEmitter for CppEmitter {
    fn target(&self) -> Target {
        Target::Cpp
    }

    fn file_extension(&self) -> &str {
        "hpp"
    }

    fn emit(&self, model: &InterfaceModel) -> Result<Vec<(String, String)>, CodegenError> {
        let mut files = Vec::new();
        for def in &model.structs {
            let content = if model.is_opaque(&def.name) {
                self.handle_header(model, def)?
            } else {
                self.layout_header(model, def)?
            };
            files.push((format!("include/{}.hpp", def.name), content));
        }
        if model.uses_owned_string() {
            files.push((
                "include/OwnedStr.hpp".to_string(),
                owned_string_header(&model.name),
            ));
        }
        let free = free_functions(model);
        if !free.is_empty() {
            let content = self.functions_header(model, &free)?;
            files.push((format!("include/{}.hpp", model.name), content));
        }
        Ok(files)
    }
}

impl CppEmitter {
    fn handle_header(&self, model: &InterfaceModel, def: &StructDef) -> Result<String, CodegenError> {
        let mut ctx = EmitContext::new(IndentStyle::Spaces(4));
        let functions = functions_for(model, &def.name);

        let mut externs = String::new();
        externs.push_str(&format!(
            "typedef struct Struct_{0} {{\n    void* self;\n}} C{0};\n",
            def.name
        ));
        for function in &functions {
            externs.push_str(&self.extern_decl(model, function, Some(&def.name), &mut ctx)?);
        }

        let mut class = String::new();
        for line in HANDLE_CONTRACT {
            class.push_str(&format!("// {}\n", line));
        }
        class.push_str("// Scope-bound owner: the destructor performs the release.\n");
        class.push_str(&format!("class {} {{\npublic:\n", def.name));
        ctx.push_indent();

        for function in &functions {
            match &function.ownership {
                OwnershipKind::Constructs { .. } => {
                    class.push_str(&self.wrapper_constructor(model, function, def, &mut ctx)?);
                }
                OwnershipKind::Releases { .. } => {
                    class.push_str(&self.wrapper_destructor(function, def, &mut ctx));
                }
                _ => {}
            }
        }

        let ind = ctx.indent();
        class.push_str(&format!(
            "{0}// Takes ownership of an already-live raw handle.\n{0}explicit {1}(C{1} raw) : self_(raw) {{}}\n\n",
            ind, def.name
        ));
        class.push_str(&format!("{0}{1}(const {1}&) = delete;\n", ind, def.name));
        class.push_str(&format!("{0}{1}& operator=(const {1}&) = delete;\n\n", ind, def.name));
        class.push_str(&format!(
            "{0}{1}({1}&& other) noexcept : self_(other.self_) {{\n{0}    other.self_.self = nullptr;\n{0}}}\n\n",
            ind, def.name
        ));

        for function in &functions {
            if function.ownership.resource().is_some() {
                continue;
            }
            class.push_str(&self.wrapper_method(model, function, def, &mut ctx)?);
        }

        ctx.pop_indent();
        class.push_str(&format!("private:\n    C{} self_;\n}};\n", def.name));

        Ok(assemble_header(&mut ctx, &model.name, &externs, Some(&class)))
    }

    fn layout_header(&self, model: &InterfaceModel, def: &StructDef) -> Result<String, CodegenError> {
        let mut ctx = EmitContext::new(IndentStyle::Spaces(4));
        let mut externs = String::new();
        externs.push_str(&format!("typedef struct {} {{\n", def.name));
        for field in &def.fields {
            if let Some(include) = include_for(&field.ty, Some(&def.name), "hpp") {
                ctx.add_include(include);
            }
            let mapped = map(&field.ty, Target::Cpp, model)?;
            externs.push_str(&format!("    {} {};\n", mapped.name, field.name));
        }
        externs.push_str(&format!("}} {};\n", def.name));
        Ok(assemble_header(&mut ctx, &model.name, &externs, None))
    }

    fn functions_header(
        &self,
        model: &InterfaceModel,
        functions: &[&FunctionSignature],
    ) -> Result<String, CodegenError> {
        let mut ctx = EmitContext::new(IndentStyle::Spaces(4));
        let mut externs = String::new();
        for function in functions {
            externs.push_str(&self.extern_decl(model, function, None, &mut ctx)?);
        }

        let mut wrappers = String::new();
        for function in functions {
            let ret = match &function.ret {
                Some(ty) => map(ty, Target::Cpp, model)?.raw,
                None => "void".to_string(),
            };
            let params = self.raw_params(model, function, None, &mut ctx)?;
            let args: Vec<&str> = function.params.iter().map(|p| p.name.as_str()).collect();
            let call = format!("::{}({})", function.name, args.join(", "));
            let body = if function.ret.is_some() {
                format!("    return {};", call)
            } else {
                format!("    {};", call)
            };
            wrappers.push_str(&format!(
                "inline {} {}({}) {{\n{}\n}}\n\n",
                ret,
                function.name,
                params.join(", "),
                body
            ));
        }

        Ok(assemble_header(&mut ctx, &model.name, &externs, Some(&wrappers)))
    }

    fn extern_decl(
        &self,
        model: &InterfaceModel,
        function: &FunctionSignature,
        current: Option<&str>,
        ctx: &mut EmitContext,
    ) -> Result<String, CodegenError> {
        let ret = match &function.ret {
            Some(ty) => {
                if let Some(include) = include_for(ty, current, "hpp") {
                    ctx.add_include(include);
                }
                map(ty, Target::Cpp, model)?.raw
            }
            None => "void".to_string(),
        };
        let params = self.raw_params(model, function, current, ctx)?;
        Ok(format!("{} {}({});\n", ret, function.name, params.join(", ")))
    }

    fn raw_params(
        &self,
        model: &InterfaceModel,
        function: &FunctionSignature,
        current: Option<&str>,
        ctx: &mut EmitContext,
    ) -> Result<Vec<String>, CodegenError> {
        let mut params = Vec::new();
        for param in &function.params {
            if let Some(include) = include_for(&param.ty, current, "hpp") {
                ctx.add_include(include);
            }
            let mapped = map(&param.ty, Target::Cpp, model)?;
            if param.is_output {
                params.push(format!("{}* {}", mapped.raw, param.name));
            } else {
                params.push(format!("{} {}", mapped.raw, param.name));
            }
        }
        Ok(params)
    }

    fn wrapper_constructor(
        &self,
        model: &InterfaceModel,
        function: &FunctionSignature,
        def: &StructDef,
        ctx: &mut EmitContext,
    ) -> Result<String, CodegenError> {
        let params = self.raw_params(model, function, Some(&def.name), ctx)?;
        let args: Vec<&str> = function.params.iter().map(|p| p.name.as_str()).collect();
        let ind = ctx.indent();
        let explicit = if function.params.len() == 1 { "explicit " } else { "" };
        Ok(format!(
            "{0}{1}{2}({3}) : self_({4}({5})) {{}}\n\n",
            ind,
            explicit,
            def.name,
            params.join(", "),
            function.name,
            args.join(", ")
        ))
    }

    fn wrapper_destructor(
        &self,
        function: &FunctionSignature,
        def: &StructDef,
        ctx: &mut EmitContext,
    ) -> String {
        let ind = ctx.indent();
        format!(
            "{0}~{1}() {{\n{0}    if (self_.self != nullptr) {{\n{0}        {2}(self_);\n{0}        self_.self = nullptr;\n{0}    }}\n{0}}}\n\n",
            ind, def.name, function.name
        )
    }

    fn wrapper_method(
        &self,
        model: &InterfaceModel,
        function: &FunctionSignature,
        def: &StructDef,
        ctx: &mut EmitContext,
    ) -> Result<String, CodegenError> {
        let method = ownership::operation_name(&def.name, &function.name);
        let constness = match function.ownership {
            OwnershipKind::Mutates => "",
            _ => " const",
        };

        // Skip the leading self handle; the wrapper supplies it.
        let rest = match function.params.first() {
            Some(p) if p.ty.is_handle() && p.name == "self" => &function.params[1..],
            _ => &function.params[..],
        };

        let mut params = Vec::new();
        let mut args = vec!["self_".to_string()];
        for param in rest {
            if let Some(include) = include_for(&param.ty, Some(&def.name), "hpp") {
                ctx.add_include(include);
            }
            let mapped = map(&param.ty, Target::Cpp, model)?;
            let spelling = if mapped.raw == mapped.name { mapped.name } else { mapped.raw };
            if param.is_output {
                params.push(format!("{}* {}", spelling, param.name));
            } else {
                params.push(format!("{} {}", spelling, param.name));
            }
            args.push(param.name.clone());
        }

        let call = format!("{}({})", function.name, args.join(", "));
        let ind = ctx.indent();
        let (ret, body) = match &function.ret {
            Some(TypeRef::OwnedString) => {
                ctx.add_include("#include \"OwnedStr.hpp\"".to_string());
                ("OwnedStr".to_string(), format!("{0}    return OwnedStr({1});", ind, call))
            }
            Some(ty) => {
                let mapped = map(ty, Target::Cpp, model)?;
                if mapped.raw != mapped.name {
                    // Raw extern handle, adopted by its scope-bound owner.
                    let body = format!("{0}    return {1}({2});", ind, mapped.name, call);
                    (mapped.name.clone(), body)
                } else {
                    (mapped.name, format!("{0}    return {1};", ind, call))
                }
            }
            None => ("void".to_string(), format!("{0}    {1};", ind, call)),
        };

        Ok(format!(
            "{0}{1} {2}({3}){4} {{\n{5}\n{0}}}\n\n",
            ind,
            ret,
            method,
            params.join(", "),
            constness,
            body
        ))
    }
}

fn assemble_header(
    ctx: &mut EmitContext,
    namespace: &str,
    externs: &str,
    wrapped: Option<&str>,
) -> String {
    let mut out = String::from("#pragma once\n\n#include <cstdint>\n");
    for include in ctx.take_includes() {
        out.push_str(&include);
        out.push('\n');
    }
    out.push_str("\nextern \"C\" {\n");
    out.push_str(externs);
    out.push_str("}\n");
    if let Some(body) = wrapped {
        out.push_str(&format!("\nnamespace {} {{\n\n", namespace));
        out.push_str(body);
        out.push_str(&format!("\n}}  // namespace {}\n", namespace));
    }
    out
}

fn owned_string_header(namespace: &str) -> String {
    let mut externs = String::new();
    externs.push_str("typedef struct Struct_OwnedStr {\n    void* self;\n} COwnedStr;\n");
    externs.push_str("const char* OwnedStr_as_ptr(COwnedStr self);\n");
    externs.push_str("void OwnedStr_drop(COwnedStr self);\n");

    let mut class = String::new();
    for line in OWNED_STRING_CONTRACT {
        class.push_str(&format!("// {}\n", line));
    }
    class.push_str("// Scope-bound owner: the destructor performs the release.\n");
    class.push_str("class OwnedStr {\npublic:\n");
    class.push_str("    explicit OwnedStr(COwnedStr raw) : self_(raw) {}\n\n");
    class.push_str("    ~OwnedStr() {\n        if (self_.self != nullptr) {\n            OwnedStr_drop(self_);\n            self_.self = nullptr;\n        }\n    }\n\n");
    class.push_str("    OwnedStr(const OwnedStr&) = delete;\n");
    class.push_str("    OwnedStr& operator=(const OwnedStr&) = delete;\n\n");
    class.push_str("    OwnedStr(OwnedStr&& other) noexcept : self_(other.self_) {\n        other.self_.self = nullptr;\n    }\n\n");
    class.push_str("    // Read-only pointer into the owned buffer; valid while this owner lives.\n");
    class.push_str("    const char* as_ptr() const {\n        return OwnedStr_as_ptr(self_);\n    }\n\n");
    class.push_str("private:\n    COwnedStr self_;\n};\n");

    let mut ctx = EmitContext::new(IndentStyle::Spaces(4));
    assemble_header(&mut ctx, namespace, &externs, Some(&class))
}

#[cfg(test)]
mod tests {
    use super::*;
    use bindforge_model::{Field, ParamRef, Primitive};

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
    fn test_scope_bound_owner_shape() {
        let model = counter_model();
        let files = CppEmitter.emit(&model).unwrap();
        let content = &files[0].1;

        assert!(content.contains("class Counter {"));
        assert!(content.contains("explicit Counter(std::uint32_t initial) : self_(Counter_new(initial)) {}"));
        assert!(content.contains("~Counter()"));
        assert!(content.contains("Counter_drop(self_);"));
        assert!(content.contains("Counter(const Counter&) = delete;"));
        assert!(content.contains("Counter(Counter&& other) noexcept"));
        assert!(content.contains("namespace counter {"));
    }

    #[test]
    fn test_methods_delegate_by_handle() {
        let model = counter_model();
        let files = CppEmitter.emit(&model).unwrap();
        let content = &files[0].1;

        assert!(content.contains("void count(std::uint32_t amount) {"));
        assert!(content.contains("Counter_count(self_, amount);"));
        assert!(content.contains("std::uint32_t get_count() const {"));
        assert!(content.contains("return Counter_get_count(self_);"));
    }

    #[test]
    fn test_extern_block_uses_exact_widths() {
        let model = counter_model();
        let files = CppEmitter.emit(&model).unwrap();
        let content = &files[0].1;

        assert!(content.contains("extern \"C\" {"));
        assert!(content.contains("CCounter Counter_new(std::uint32_t initial);"));
        assert!(content.contains("#include <cstdint>"));
    }

    #[test]
    fn test_owned_string_return_wraps_into_scope_owner() {
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

        let files = CppEmitter.emit(&model).unwrap();
        let counter = &files.iter().find(|(p, _)| p == "include/Counter.hpp").unwrap().1;
        assert!(counter.contains("#include \"OwnedStr.hpp\""));
        assert!(counter.contains("OwnedStr label() const {"));
        assert!(counter.contains("return OwnedStr(Counter_label(self_));"));

        let owned = &files.iter().find(|(p, _)| p == "include/OwnedStr.hpp").unwrap().1;
        assert!(owned.contains("const char* as_ptr() const {"));
        assert!(owned.contains("OwnedStr_drop(self_);"));
    }

    #[test]
    fn test_handle_return_adopted_by_owner() {
        let mut model = counter_model();
        model.add_function(FunctionSignature {
            name: "Counter_twin".to_string(),
            params: vec![ParamRef::new(
                "self",
                TypeRef::OpaqueHandle {
                    name: "Counter".to_string(),
                },
            )],
            ret: Some(TypeRef::OpaqueHandle {
                name: "Counter".to_string(),
            }),
            ownership: OwnershipKind::Borrows,
        });

        let files = CppEmitter.emit(&model).unwrap();
        let content = &files[0].1;
        assert!(content.contains("explicit Counter(CCounter raw) : self_(raw) {}"));
        assert!(content.contains("Counter twin() const {"));
        assert!(content.contains("return Counter(Counter_twin(self_));"));
    }

    #[test]
    fn test_free_functions_qualify_the_extern_call() {
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

        let files = CppEmitter.emit(&model).unwrap();
        let content = &files[0].1;
        assert!(content.contains("inline float add(float a, float b) {"));
        assert!(content.contains("return ::add(a, b);"));
    }
}
