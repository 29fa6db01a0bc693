use bindforge_model::InterfaceModel;
use bindforge_template::{RenderContext, TemplateSet};

use super::BuildAdapter;
use crate::error::CodegenError;
use crate::mapping::Target;
use crate::naming::pascal_case;

/// MSBuild project file for the C# output tree.
pub struct CsprojAdapter;

impl BuildAdapter for CsprojAdapter {
    fn target(&self) -> Target {
        Target::CSharp
    }

    fn emit(
        &self,
        model: &InterfaceModel,
        templates: &TemplateSet,
    ) -> Result<Vec<(String, String)>, CodegenError> {
        let namespace = pascal_case(&model.name);
        let mut context = RenderContext::new();
        context.insert("project_name".to_string(), model.name.clone());
        context.insert("root_namespace".to_string(), namespace.clone());
        context.insert(
            "generator_version".to_string(),
            env!("CARGO_PKG_VERSION").to_string(),
        );
        let rendered = templates.render("csproj", &context)?;
        Ok(vec![(format!("{}.csproj", namespace), rendered)])
    }
}
