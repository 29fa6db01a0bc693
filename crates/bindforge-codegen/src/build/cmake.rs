use bindforge_model::InterfaceModel;
use bindforge_template::{RenderContext, TemplateSet};

use super::BuildAdapter;
use crate::error::CodegenError;
use crate::mapping::Target;

/// CMake manifest for the C and C++ output trees. Both render the same
/// context; the templates differ in project language and compile features.
pub struct CMakeAdapter {
    language: CmakeLanguage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CmakeLanguage {
    C,
    Cpp,
}

impl CMakeAdapter {
    pub fn c() -> Self {
        Self {
            language: CmakeLanguage::C,
        }
    }

    pub fn cpp() -> Self {
        Self {
            language: CmakeLanguage::Cpp,
        }
    }

    fn template_name(&self) -> &'static str {
        match self.language {
            CmakeLanguage::C => "cmake_c",
            CmakeLanguage::Cpp => "cmake_cpp",
        }
    }
}

impl BuildAdapter for CMakeAdapter {
    fn target(&self) -> Target {
        match self.language {
            CmakeLanguage::C => Target::C,
            CmakeLanguage::Cpp => Target::Cpp,
        }
    }

    fn emit(
        &self,
        model: &InterfaceModel,
        templates: &TemplateSet,
    ) -> Result<Vec<(String, String)>, CodegenError> {
        let mut context = RenderContext::new();
        context.insert("project_name".to_string(), model.name.clone());
        context.insert(
            "generator_version".to_string(),
            env!("CARGO_PKG_VERSION").to_string(),
        );
        let rendered = templates.render(self.template_name(), &context)?;
        Ok(vec![("CMakeLists.txt".to_string(), rendered)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build::builtin_templates;

    #[test]
    fn test_cmake_manifest_renders_escapes_and_values() {
        let model = InterfaceModel::new("counter");
        let templates = builtin_templates().unwrap();
        let files = CMakeAdapter::c().emit(&model, &templates).unwrap();
        assert_eq!(files.len(), 1);
        let (path, content) = &files[0];
        assert_eq!(path, "CMakeLists.txt");

        assert!(content.contains("project(counter_bindings C)"));
        assert!(content.contains("${CMAKE_CURRENT_SOURCE_DIR}/include"));
        assert!(content.contains("libffi_counter.so"));
        // Doubled braces in the template collapse to literal CMake syntax.
        assert!(!content.contains("{{"));
        assert!(!content.contains("}}"));
    }

    #[test]
    fn test_cpp_manifest_uses_cxx() {
        let model = InterfaceModel::new("counter");
        let templates = builtin_templates().unwrap();
        let files = CMakeAdapter::cpp().emit(&model, &templates).unwrap();
        let content = &files[0].1;
        assert!(content.contains("project(counter_bindings CXX)"));
        assert!(content.contains("cxx_std_17"));
    }
}
