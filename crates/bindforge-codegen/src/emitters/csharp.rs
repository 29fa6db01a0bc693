//! C# target: `IDisposable` wrapper classes over P/Invoke externs.
//! Scope-bound ownership via `using`: `Dispose` releases the handle exactly
//! once and nulls it so a second call is a no-op.

use bindforge_model::ownership::{self, HANDLE_CONTRACT, OWNED_STRING_CONTRACT};
use bindforge_model::{FunctionSignature, InterfaceModel, OwnershipKind, StructDef};

use super::{free_functions, functions_for, TargetEmitter};
use crate::error::CodegenError;
use crate::mapping::{map, MappedType, Target};
use crate::naming::pascal_case;

pub struct CSharpEmitter;

impl TargetEmitter for CSharpEmitter {
    fn target(&self) -> Target {
        Target::CSharp
    }

    fn file_extension(&self) -> &str {
        "cs"
    }

    fn emit(&self, model: &InterfaceModel) -> Result<Vec<(String, String)>, CodegenError> {
        let mut files = Vec::new();
        for def in &model.structs {
            let content = if model.is_opaque(&def.name) {
                self.handle_class(model, def)?
            } else {
                self.layout_struct(model, def)?
            };
            files.push((format!("{}.cs", def.name), content));
        }
        if model.uses_owned_string() {
            files.push(("OwnedStr.cs".to_string(), owned_string_class(model)));
        }
        let free = free_functions(model);
        if !free.is_empty() {
            files.push(("NativeMethods.cs".to_string(), self.native_methods(model, &free)?));
        }
        Ok(files)
    }
}

impl CSharpEmitter {
    fn handle_class(&self, model: &InterfaceModel, def: &StructDef) -> Result<String, CodegenError> {
        let functions = functions_for(model, &def.name);
        let mut body = String::new();

        for line in HANDLE_CONTRACT {
            body.push_str(&format!("    // {}\n", line));
        }
        body.push_str("    // Scope-bound owner: Dispose performs the release.\n");
        body.push_str(&format!("    public sealed class {} : IDisposable\n    {{\n", def.name));
        body.push_str("        internal IntPtr self;\n\n");

        for function in &functions {
            body.push_str(&self.extern_decl(model, function)?);
        }

        // Raw-handle constructor for values returned by other wrappers.
        body.push_str(&format!(
            "        internal {}(IntPtr raw)\n        {{\n            self = raw;\n        }}\n\n",
            def.name
        ));

        for function in &functions {
            match &function.ownership {
                OwnershipKind::Constructs { .. } => {
                    body.push_str(&self.wrapper_constructor(model, function, def)?);
                }
                OwnershipKind::Releases { .. } => {
                    body.push_str(&wrapper_dispose(&function.name));
                }
                _ => {
                    body.push_str(&self.wrapper_method(model, function, def)?);
                }
            }
        }

        trim_trailing_blank(&mut body);
        body.push_str("    }\n");
        Ok(assemble_file(model, &body))
    }

    fn layout_struct(&self, model: &InterfaceModel, def: &StructDef) -> Result<String, CodegenError> {
        let mut body = String::new();
        body.push_str("    [StructLayout(LayoutKind.Sequential, Pack = 1)]\n");
        body.push_str(&format!("    public struct {}\n    {{\n", def.name));
        for field in &def.fields {
            let mapped = map(&field.ty, Target::CSharp, model)?;
            body.push_str(&format!("        public {} {};\n", mapped.name, field.name));
        }
        body.push_str("    }\n");
        Ok(assemble_file(model, &body))
    }

    fn native_methods(
        &self,
        model: &InterfaceModel,
        functions: &[&FunctionSignature],
    ) -> Result<String, CodegenError> {
        let mut body = String::new();
        body.push_str("    public static class NativeMethods\n    {\n");
        for function in functions {
            let ret = match &function.ret {
                Some(ty) => map(ty, Target::CSharp, model)?.raw,
                None => "void".to_string(),
            };
            let mut params = Vec::new();
            for param in &function.params {
                let mapped = map(&param.ty, Target::CSharp, model)?;
                params.push(extern_param(&mapped, &param.name, param.is_output));
            }
            body.push_str(&dll_import(model, &function.name));
            body.push_str(&format!(
                "        public static extern {} {}({});\n\n",
                ret,
                function.name,
                params.join(", ")
            ));
        }
        trim_trailing_blank(&mut body);
        body.push_str("    }\n");
        Ok(assemble_file(model, &body))
    }

    fn extern_decl(&self, model: &InterfaceModel, function: &FunctionSignature) -> Result<String, CodegenError> {
        let ret = match &function.ret {
            Some(ty) => map(ty, Target::CSharp, model)?.raw,
            None => "void".to_string(),
        };
        let mut params = Vec::new();
        for param in &function.params {
            let mapped = map(&param.ty, Target::CSharp, model)?;
            params.push(extern_param(&mapped, &param.name, param.is_output));
        }
        let mut out = dll_import(model, &function.name);
        out.push_str(&format!(
            "        private static extern {} {}({});\n\n",
            ret,
            function.name,
            params.join(", ")
        ));
        Ok(out)
    }

    fn wrapper_constructor(
        &self,
        model: &InterfaceModel,
        function: &FunctionSignature,
        def: &StructDef,
    ) -> Result<String, CodegenError> {
        let (params, args) = self.public_params(model, &function.params)?;
        Ok(format!(
            "        public {}({})\n        {{\n            self = {}({});\n        }}\n\n",
            def.name,
            params.join(", "),
            function.name,
            args.join(", ")
        ))
    }

    fn wrapper_method(
        &self,
        model: &InterfaceModel,
        function: &FunctionSignature,
        def: &StructDef,
    ) -> Result<String, CodegenError> {
        let method = pascal_case(ownership::operation_name(&def.name, &function.name));

        let rest = match function.params.first() {
            Some(p) if p.ty.is_handle() && p.name == "self" => &function.params[1..],
            _ => &function.params[..],
        };
        let (params, mut args) = self.public_params(model, rest)?;
        args.insert(0, "self".to_string());
        let call = format!("{}({})", function.name, args.join(", "));

        let (ret, stmt) = match &function.ret {
            Some(ty) => {
                let mapped = map(ty, Target::CSharp, model)?;
                if is_wrapped(&mapped) {
                    (mapped.name.clone(), format!("return new {}({});", mapped.name, call))
                } else if is_string_view(&mapped) {
                    // Library-owned memory: read through the raw pointer,
                    // never handed to the marshaler for release.
                    (
                        "string".to_string(),
                        format!("return Marshal.PtrToStringAnsi({}) ?? string.Empty;", call),
                    )
                } else {
                    (mapped.name, format!("return {};", call))
                }
            }
            None => ("void".to_string(), format!("{};", call)),
        };

        Ok(format!(
            "        public {} {}({})\n        {{\n            {}\n        }}\n\n",
            ret,
            method,
            params.join(", "),
            stmt
        ))
    }

    /// Public-surface parameter list plus the argument spellings that feed
    /// the extern call (wrappers contribute their raw handle).
    fn public_params(
        &self,
        model: &InterfaceModel,
        params: &[bindforge_model::ParamRef],
    ) -> Result<(Vec<String>, Vec<String>), CodegenError> {
        let mut decls = Vec::new();
        let mut args = Vec::new();
        for param in params {
            let mapped = map(&param.ty, Target::CSharp, model)?;
            if param.is_output {
                decls.push(format!("ref {} {}", mapped.name, param.name));
                args.push(format!("ref {}", param.name));
            } else if is_wrapped(&mapped) {
                decls.push(format!("{} {}", mapped.name, param.name));
                args.push(format!("{}.self", param.name));
            } else {
                decls.push(format!("{} {}", mapped.name, param.name));
                args.push(param.name.clone());
            }
        }
        Ok((decls, args))
    }
}

/// Whether the public surface uses a wrapper class over a raw IntPtr.
fn is_wrapped(mapped: &MappedType) -> bool {
    mapped.raw == "IntPtr" && mapped.needs_release
}

/// Borrowed string view: public `string`, raw pointer on the wire.
fn is_string_view(mapped: &MappedType) -> bool {
    mapped.name == "string" && mapped.raw == "IntPtr"
}

fn extern_param(mapped: &MappedType, name: &str, is_output: bool) -> String {
    if is_output {
        format!("ref {} {}", mapped.raw, name)
    } else if is_string_view(mapped) {
        // Argument direction is safe: the marshaler copies the string in
        // and the callee only borrows it.
        format!("string {}", name)
    } else {
        format!("{} {}", mapped.raw, name)
    }
}

fn dll_import(model: &InterfaceModel, symbol: &str) -> String {
    format!(
        "        [DllImport(\"ffi_{}\", EntryPoint = \"{}\", ExactSpelling = true, CallingConvention = CallingConvention.Cdecl)]\n",
        model.name, symbol
    )
}

fn wrapper_dispose(symbol: &str) -> String {
    format!(
        "        public void Dispose()\n        {{\n            if (self != IntPtr.Zero)\n            {{\n                {}(self);\n                self = IntPtr.Zero;\n            }}\n        }}\n\n",
        symbol
    )
}

fn assemble_file(model: &InterfaceModel, body: &str) -> String {
    let mut out = String::new();
    out.push_str("using System;\nusing System.Runtime.InteropServices;\n\n");
    out.push_str(&format!("namespace {}\n{{\n", pascal_case(&model.name)));
    out.push_str(body);
    out.push_str("}\n");
    out
}

fn trim_trailing_blank(body: &mut String) {
    while body.ends_with("\n\n") {
        body.pop();
    }
    if !body.ends_with('\n') {
        body.push('\n');
    }
}

fn owned_string_class(model: &InterfaceModel) -> String {
    let mut body = String::new();
    for line in OWNED_STRING_CONTRACT {
        body.push_str(&format!("    // {}\n", line));
    }
    body.push_str("    // Scope-bound owner: Dispose performs the release.\n");
    body.push_str("    public sealed class OwnedStr : IDisposable\n    {\n");
    body.push_str("        internal IntPtr self;\n\n");
    body.push_str(&dll_import(model, "OwnedStr_as_ptr"));
    body.push_str("        private static extern IntPtr OwnedStr_as_ptr(IntPtr self);\n\n");
    body.push_str(&dll_import(model, "OwnedStr_drop"));
    body.push_str("        private static extern void OwnedStr_drop(IntPtr self);\n\n");
    body.push_str("        internal OwnedStr(IntPtr raw)\n        {\n            self = raw;\n        }\n\n");
    body.push_str("        // Read-only pointer into the owned buffer; valid until Dispose.\n");
    body.push_str("        public IntPtr AsPtr()\n        {\n            return OwnedStr_as_ptr(self);\n        }\n\n");
    body.push_str("        public override string ToString()\n        {\n            return Marshal.PtrToStringAnsi(OwnedStr_as_ptr(self)) ?? string.Empty;\n        }\n\n");
    body.push_str(&wrapper_dispose("OwnedStr_drop"));
    trim_trailing_blank(&mut body);
    body.push_str("    }\n");
    assemble_file(model, &body)
}
