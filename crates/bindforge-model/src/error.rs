use serde::{Deserialize, Serialize};
use thiserror::Error;

// ── Error code constants ──

pub const E_UNRESOLVED_TYPE: &str = "E_UNRESOLVED_TYPE";
pub const E_UNPAIRED_OWNERSHIP: &str = "E_UNPAIRED_OWNERSHIP";
pub const E_DUPLICATE_NAME: &str = "E_DUPLICATE_NAME";

/// A model-level validation failure. Always fatal: nothing is emitted for a
/// model that fails validation.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationError {
    #[error("type reference '{entity}' does not resolve to a struct in the model")]
    UnresolvedType { entity: String },

    #[error("handle type '{entity}' has unpaired ownership: {detail}")]
    UnpairedOwnership { entity: String, detail: String },

    #[error("duplicate name '{entity}'")]
    DuplicateName { entity: String },
}

impl ValidationError {
    /// Machine-readable stable error code.
    pub fn code(&self) -> &'static str {
        match self {
            ValidationError::UnresolvedType { .. } => E_UNRESOLVED_TYPE,
            ValidationError::UnpairedOwnership { .. } => E_UNPAIRED_OWNERSHIP,
            ValidationError::DuplicateName { .. } => E_DUPLICATE_NAME,
        }
    }

    /// The offending entity: a type name, handle type, or duplicated symbol.
    pub fn entity(&self) -> &str {
        match self {
            ValidationError::UnresolvedType { entity }
            | ValidationError::UnpairedOwnership { entity, .. }
            | ValidationError::DuplicateName { entity } => entity,
        }
    }
}

/// Aggregated validation findings for one model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub ok: bool,
    pub errors: Vec<ValidationError>,
}

impl ValidationReport {
    /// Create a successful (empty) report.
    pub fn success() -> Self {
        Self {
            ok: true,
            errors: Vec::new(),
        }
    }

    /// Add an error and update the ok flag.
    pub fn push(&mut self, error: ValidationError) {
        self.ok = false;
        self.errors.push(error);
    }

    pub fn has_errors(&self) -> bool {
        !self.ok
    }

    /// Collapse the report to the first error, if any.
    pub fn into_result(mut self) -> Result<(), ValidationError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self.errors.remove(0))
        }
    }
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::success()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = ValidationError::UnpairedOwnership {
            entity: "Counter".to_string(),
            detail: "1 constructor, 0 destructors".to_string(),
        };
        assert_eq!(err.code(), E_UNPAIRED_OWNERSHIP);
        assert_eq!(err.entity(), "Counter");
    }

    #[test]
    fn test_error_display_names_entity() {
        let err = ValidationError::UnresolvedType {
            entity: "Missing".to_string(),
        };
        assert!(err.to_string().contains("Missing"));
    }

    #[test]
    fn test_report_push_clears_ok() {
        let mut report = ValidationReport::success();
        assert!(report.ok);
        report.push(ValidationError::DuplicateName {
            entity: "Counter_new".to_string(),
        });
        assert!(!report.ok);
        assert!(report.has_errors());
        assert_eq!(report.errors.len(), 1);
    }

    #[test]
    fn test_into_result_returns_first_error() {
        let mut report = ValidationReport::success();
        report.push(ValidationError::DuplicateName {
            entity: "a".to_string(),
        });
        report.push(ValidationError::DuplicateName {
            entity: "b".to_string(),
        });
        match report.into_result() {
            Err(ValidationError::DuplicateName { entity }) => assert_eq!(entity, "a"),
            other => panic!("expected first duplicate, got {:?}", other),
        }
        assert!(ValidationReport::success().into_result().is_ok());
    }

    #[test]
    fn test_error_serialization() {
        let err = ValidationError::UnresolvedType {
            entity: "Missing".to_string(),
        };
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["kind"], "unresolved_type");
        assert_eq!(json["entity"], "Missing");
    }
}
