use bindforge_model::{InterfaceModel, ValidationError, ValidationReport};

use crate::rules;

/// Validate an interface model.
/// Runs all validation rules and returns a consolidated report.
pub fn check(model: &InterfaceModel) -> ValidationReport {
    let mut report = ValidationReport::success();

    rules::resolve::check(model, &mut report);
    rules::ownership::check(model, &mut report);
    rules::names::check(model, &mut report);

    report
}

/// Validate an interface model, surfacing the first hard error.
/// Generation must not emit anything for a model that fails here.
pub fn validate(model: &InterfaceModel) -> Result<(), ValidationError> {
    check(model).into_result()
}
