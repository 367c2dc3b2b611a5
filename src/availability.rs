//! Availability filter.
//!
//! The only eligibility gate: a consultant whose justification note
//! equals the leave marker (case-insensitive, exact) is excluded from
//! queue assignment.

use crate::models::Consultant;

/// Default leave marker.
pub const DEFAULT_LEAVE_MARKER: &str = "FÉRIAS";

/// Whether a justification note marks the consultant as on leave.
pub fn is_on_leave(justification: &str, leave_marker: &str) -> bool {
    justification.to_uppercase() == leave_marker.to_uppercase()
}

/// Roster entries that are not on leave, in roster order.
pub fn filter_available<'a>(roster: &'a [Consultant], leave_marker: &str) -> Vec<&'a Consultant> {
    roster
        .iter()
        .filter(|c| !is_on_leave(&c.justification, leave_marker))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leave_marker_case_insensitive() {
        assert!(is_on_leave("Férias", DEFAULT_LEAVE_MARKER));
        assert!(is_on_leave("FÉRIAS", DEFAULT_LEAVE_MARKER));
        assert!(is_on_leave("férias", DEFAULT_LEAVE_MARKER));
    }

    #[test]
    fn test_leave_marker_exact() {
        assert!(!is_on_leave("Férias parciais", DEFAULT_LEAVE_MARKER));
        assert!(!is_on_leave("-", DEFAULT_LEAVE_MARKER));
        assert!(!is_on_leave("", DEFAULT_LEAVE_MARKER));
    }

    #[test]
    fn test_filter_keeps_roster_order() {
        let roster = vec![
            Consultant::new("A", "Team X").with_justification("-"),
            Consultant::new("B", "Team X").with_justification("Férias"),
            Consultant::new("C", "Team X"),
        ];
        let ids: Vec<&str> = filter_available(&roster, DEFAULT_LEAVE_MARKER)
            .iter()
            .map(|c| c.id.as_str())
            .collect();
        assert_eq!(ids, vec!["A", "C"]);
    }

    #[test]
    fn test_custom_marker() {
        let roster = vec![Consultant::new("A", "SPO").with_justification("licença")];
        assert!(filter_available(&roster, "LICENÇA").is_empty());
    }
}
