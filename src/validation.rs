//! Structural validation of the roster.
//!
//! Sales figures are not validated here; only the shape that the
//! ranking invariants depend on. Detects:
//! - Duplicate consultant identifiers
//! - Blank consultant identifiers

use crate::models::Consultant;
use std::collections::HashSet;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Offending consultant identifier.
    pub consultant_id: String,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two roster entries share the same identifier.
    DuplicateId,
    /// A roster entry has an empty identifier.
    BlankId,
}

impl ValidationError {
    fn new(
        kind: ValidationErrorKind,
        consultant_id: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            consultant_id: consultant_id.into(),
            message: message.into(),
        }
    }
}

/// Validates a roster.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
/// Each duplicated identifier is reported once per extra occurrence.
pub fn validate_roster(roster: &[Consultant]) -> ValidationResult {
    let mut errors = Vec::new();
    let mut seen = HashSet::new();

    for (row, c) in roster.iter().enumerate() {
        if c.id.trim().is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::BlankId,
                "",
                format!("Roster row {} has a blank consultant identifier", row + 1),
            ));
            continue;
        }
        if !seen.insert(c.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                c.id.as_str(),
                format!("Duplicate consultant ID: {}", c.id),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_roster() {
        let roster = vec![Consultant::new("A", "SPO"), Consultant::new("B", "BHZ")];
        assert!(validate_roster(&roster).is_ok());
        assert!(validate_roster(&[]).is_ok());
    }

    #[test]
    fn test_duplicate_id() {
        let roster = vec![
            Consultant::new("A", "SPO"),
            Consultant::new("A", "BHZ"),
            Consultant::new("A", "RJO"),
        ];
        let errors = validate_roster(&roster).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors
            .iter()
            .all(|e| e.kind == ValidationErrorKind::DuplicateId && e.consultant_id == "A"));
    }

    #[test]
    fn test_blank_id() {
        let roster = vec![Consultant::new("  ", "SPO")];
        let errors = validate_roster(&roster).unwrap_err();
        assert_eq!(errors[0].kind, ValidationErrorKind::BlankId);
        assert!(errors[0].message.contains("row 1"));
    }
}
