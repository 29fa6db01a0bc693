use bindforge_model::{InterfaceModel, ValidationError, ValidationReport};

/// Check that every `OpaqueHandle` and `StructRef` resolves to a struct
/// defined in the same model, including resources declared on constructor
/// and destructor functions.
pub fn check(model: &InterfaceModel, report: &mut ValidationReport) {
    let mut seen: Vec<&str> = Vec::new();

    for ty in model.each_type_ref() {
        if let Some(name) = ty.struct_name() {
            if model.struct_def(name).is_none() && !seen.contains(&name) {
                seen.push(name);
                report.push(ValidationError::UnresolvedType {
                    entity: name.to_string(),
                });
            }
        }
    }

    for function in &model.functions {
        if let Some(resource) = function.ownership.resource() {
            if model.struct_def(resource).is_none() && !seen.contains(&resource) {
                seen.push(resource);
                report.push(ValidationError::UnresolvedType {
                    entity: resource.to_string(),
                });
            }
        }
    }
}
