//! Sales summary model.
//!
//! One summary per consultant per reporting period. Weekly and monthly
//! summaries share the same shape and are computed independently.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Reporting period of a summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Period {
    Weekly,
    Monthly,
}

impl Period {
    /// Field-name suffix used to disambiguate the two periods in the
    /// joined base table. Carries no ranking semantics.
    pub fn suffix(&self) -> &'static str {
        match self {
            Period::Weekly => "",
            Period::Monthly => "_Mensal",
        }
    }

    /// Table name used in diagnostics.
    pub fn table_name(&self) -> &'static str {
        match self {
            Period::Weekly => "weekly",
            Period::Monthly => "monthly",
        }
    }
}

/// Per-consultant sales totals for one period.
///
/// `total` is always `new + existing`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesSummary {
    pub consultant_id: String,
    /// Sum of New-client sales.
    pub new: Decimal,
    /// Sum of Existing-client sales.
    pub existing: Decimal,
    /// `new + existing`.
    pub total: Decimal,
}

impl SalesSummary {
    /// Creates a summary; `total` is derived and saturates at the
    /// `Decimal` bounds. Use [`SalesSummary::checked`] to detect overflow.
    pub fn new(consultant_id: impl Into<String>, new: Decimal, existing: Decimal) -> Self {
        Self {
            consultant_id: consultant_id.into(),
            new,
            existing,
            total: new.saturating_add(existing),
        }
    }

    /// Creates a summary, or `None` if `new + existing` overflows.
    pub fn checked(consultant_id: impl Into<String>, new: Decimal, existing: Decimal) -> Option<Self> {
        let total = new.checked_add(existing)?;
        Some(Self {
            consultant_id: consultant_id.into(),
            new,
            existing,
            total,
        })
    }

    /// All-zero summary, used when a consultant has no transactions.
    pub fn zero(consultant_id: impl Into<String>) -> Self {
        Self::new(consultant_id, Decimal::ZERO, Decimal::ZERO)
    }

    /// Whether any sale was recorded (`total > 0`).
    pub fn has_sales(&self) -> bool {
        self.total > Decimal::ZERO
    }
}
