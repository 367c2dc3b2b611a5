//! Consultant (roster entry) model.

use serde::{Deserialize, Serialize};

/// A roster entry.
///
/// Immutable for the duration of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Consultant {
    /// Normalized identifier (trimmed, upper-cased). Unique in the roster.
    pub id: String,
    /// Free-text team label ("Equipe"), mapped to a unit code later.
    pub team: String,
    /// Availability / justification note ("Justificativa").
    pub justification: String,
}

impl Consultant {
    /// Creates a consultant with an empty justification.
    pub fn new(id: impl Into<String>, team: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            team: team.into(),
            justification: String::new(),
        }
    }

    /// Sets the justification note.
    pub fn with_justification(mut self, justification: impl Into<String>) -> Self {
        self.justification = justification.into();
        self
    }

    /// Presentation name: the identifier in Title Case.
    ///
    /// Never used for comparisons.
    pub fn display_name(&self) -> String {
        crate::table::title_case(&self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_consultant_builder() {
        let c = Consultant::new("ANA LIMA", "SP 1").with_justification("-");
        assert_eq!(c.id, "ANA LIMA");
        assert_eq!(c.team, "SP 1");
        assert_eq!(c.justification, "-");
        assert_eq!(c.display_name(), "Ana Lima");
    }
}
