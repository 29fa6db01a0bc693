use bindforge_model::{InterfaceModel, OwnershipKind, ValidationError, ValidationReport};

/// Check that every handle type has exactly one `Constructs` and exactly one
/// `Releases` function. The pairing is declared through the explicit
/// `resource` field, never inferred from symbol names.
pub fn check(model: &InterfaceModel, report: &mut ValidationReport) {
    for handle in model.handle_types() {
        let mut constructors = 0usize;
        let mut destructors = 0usize;
        for function in &model.functions {
            match &function.ownership {
                OwnershipKind::Constructs { resource } if *resource == handle => {
                    constructors += 1;
                }
                OwnershipKind::Releases { resource } if *resource == handle => {
                    destructors += 1;
                }
                _ => {}
            }
        }
        if constructors != 1 || destructors != 1 {
            report.push(ValidationError::UnpairedOwnership {
                entity: handle,
                detail: format!(
                    "{} constructor(s), {} destructor(s); expected exactly one of each",
                    constructors, destructors
                ),
            });
        }
    }
}
