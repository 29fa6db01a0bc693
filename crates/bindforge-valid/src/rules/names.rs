use std::collections::BTreeSet;

use bindforge_model::{InterfaceModel, ValidationError, ValidationReport};

/// Check that function names are unique within the model, struct names are
/// unique within the model, and field names are unique within each struct.
pub fn check(model: &InterfaceModel, report: &mut ValidationReport) {
    let mut function_names = BTreeSet::new();
    for function in &model.functions {
        if !function_names.insert(&function.name) {
            report.push(ValidationError::DuplicateName {
                entity: function.name.clone(),
            });
        }
    }

    let mut struct_names = BTreeSet::new();
    for def in &model.structs {
        if !struct_names.insert(&def.name) {
            report.push(ValidationError::DuplicateName {
                entity: def.name.clone(),
            });
        }
        let mut field_names = BTreeSet::new();
        for field in &def.fields {
            if !field_names.insert(&field.name) {
                report.push(ValidationError::DuplicateName {
                    entity: format!("{}.{}", def.name, field.name),
                });
            }
        }
    }
}
