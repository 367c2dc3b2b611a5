//! Commercial-unit normalization.
//!
//! Maps free-text team labels ("Equipe") to a canonical unit code via a
//! fixed alias table. Lookup is case-insensitive and ignores surrounding
//! and repeated whitespace. Unknown labels become their own code.
//!
//! | Code | Aliases |
//! |------|---------|
//! | `SPO` | GRANDES CONTAS SP, SP 1, SPO, SP |
//! | `BHZ` | GRANDES CONTAS BH, MG 1, BHZ, BH |
//! | `RJO` | GRANDES CONTAS RJ, RJ 1, RJO, RJ |
//! | `CTA` | GRANDES CONTAS CTA, CURITIBA, CTA |
//! | `SP INTERIOR` | SP INTERIOR, SPI |

use crate::models::UnitCode;

/// Fixed alias table: normalized label → unit code.
const UNIT_ALIASES: &[(&str, &str)] = &[
    ("GRANDES CONTAS SP", "SPO"),
    ("SP 1", "SPO"),
    ("SPO", "SPO"),
    ("SP", "SPO"),
    ("GRANDES CONTAS BH", "BHZ"),
    ("MG 1", "BHZ"),
    ("BHZ", "BHZ"),
    ("BH", "BHZ"),
    ("GRANDES CONTAS RJ", "RJO"),
    ("RJ 1", "RJO"),
    ("RJO", "RJO"),
    ("RJ", "RJO"),
    ("GRANDES CONTAS CTA", "CTA"),
    ("CURITIBA", "CTA"),
    ("CTA", "CTA"),
    ("SP INTERIOR", "SP INTERIOR"),
    ("SPI", "SP INTERIOR"),
];

fn normalize_label(label: &str) -> String {
    label
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_uppercase()
}

/// Canonical unit code for a team label.
///
/// ```
/// use u_lead_queue::unit::normalize_unit;
/// assert_eq!(normalize_unit(" grandes  contas sp ").as_str(), "SPO");
/// assert_eq!(normalize_unit("Recife").as_str(), "RECIFE");
/// ```
pub fn normalize_unit(label: &str) -> UnitCode {
    let key = normalize_label(label);
    let code = UNIT_ALIASES
        .iter()
        .find(|(alias, _)| *alias == key)
        .map(|(_, code)| (*code).to_string())
        .unwrap_or(key);
    UnitCode(code)
}

/// Whether the label maps to one of the known regional units.
pub fn is_known_unit(label: &str) -> bool {
    let key = normalize_label(label);
    UNIT_ALIASES.iter().any(|(alias, _)| *alias == key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_alias_maps_to_its_code() {
        for (alias, code) in UNIT_ALIASES {
            assert_eq!(normalize_unit(alias).as_str(), *code, "alias {alias}");
        }
    }

    #[test]
    fn test_case_and_whitespace_insensitive() {
        assert_eq!(normalize_unit("sp 1").as_str(), "SPO");
        assert_eq!(normalize_unit("  Mg   1 ").as_str(), "BHZ");
        assert_eq!(normalize_unit("curitiba").as_str(), "CTA");
        assert_eq!(normalize_unit("sp interior").as_str(), "SP INTERIOR");
        assert_eq!(normalize_unit("Spi").as_str(), "SP INTERIOR");
    }

    #[test]
    fn test_unknown_label_passes_through() {
        assert_eq!(normalize_unit("Team X").as_str(), "TEAM X");
        assert_eq!(normalize_unit("").as_str(), "");
        assert!(!is_known_unit("Team X"));
        assert!(is_known_unit("rj"));
    }

    #[test]
    fn test_sp_interior_is_distinct_from_spo() {
        assert_ne!(normalize_unit("SP INTERIOR"), normalize_unit("SP"));
    }
}
