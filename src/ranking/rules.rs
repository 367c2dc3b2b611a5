//! Built-in ranking rules.
//!
//! All rules rank larger amounts first and therefore return the negated
//! amount (lower score = higher priority).

use super::{RankingRule, RuleScore};
use crate::models::BaseRow;

/// Weekly New-client sales, descending.
///
/// Primary key for Category A and for the Fila 1 split.
#[derive(Debug, Clone, Copy)]
pub struct WeeklyNew;

impl RankingRule for WeeklyNew {
    fn name(&self) -> &'static str {
        "WEEKLY_NEW"
    }

    fn evaluate(&self, row: &BaseRow) -> RuleScore {
        -row.weekly.new
    }

    fn description(&self) -> &'static str {
        "Weekly New-client sales (descending)"
    }
}

/// Weekly total sales, descending.
///
/// Tie-break for Category A; sole key for the Category A overflow in Fila 2.
#[derive(Debug, Clone, Copy)]
pub struct WeeklyTotal;

impl RankingRule for WeeklyTotal {
    fn name(&self) -> &'static str {
        "WEEKLY_TOTAL"
    }

    fn evaluate(&self, row: &BaseRow) -> RuleScore {
        -row.weekly.total
    }

    fn description(&self) -> &'static str {
        "Weekly total sales (descending)"
    }
}

/// Monthly total sales, descending.
///
/// Sole key for Category B.
#[derive(Debug, Clone, Copy)]
pub struct MonthlyTotal;

impl RankingRule for MonthlyTotal {
    fn name(&self) -> &'static str {
        "MONTHLY_TOTAL"
    }

    fn evaluate(&self, row: &BaseRow) -> RuleScore {
        -row.monthly.total
    }

    fn description(&self) -> &'static str {
        "Monthly total sales (descending)"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{SalesSummary, UnitCode};
    use rust_decimal::Decimal;

    fn row(id: &str, weekly: (i64, i64), monthly: (i64, i64)) -> BaseRow {
        BaseRow {
            consultant_id: id.into(),
            team: "SPO".into(),
            justification: String::new(),
            on_leave: false,
            unit: UnitCode("SPO".into()),
            weekly: SalesSummary::new(id, Decimal::from(weekly.0), Decimal::from(weekly.1)),
            monthly: SalesSummary::new(id, Decimal::from(monthly.0), Decimal::from(monthly.1)),
        }
    }

    #[test]
    fn test_weekly_new() {
        let high = row("H", (100, 0), (0, 0));
        let low = row("L", (10, 500), (0, 0));
        assert!(WeeklyNew.evaluate(&high) < WeeklyNew.evaluate(&low));
    }

    #[test]
    fn test_weekly_total() {
        let high = row("H", (100, 0), (0, 0));
        let low = row("L", (10, 500), (0, 0));
        assert!(WeeklyTotal.evaluate(&low) < WeeklyTotal.evaluate(&high));
    }

    #[test]
    fn test_monthly_total() {
        let a = row("A", (0, 0), (0, 300));
        let b = row("B", (0, 0), (200, 0));
        assert!(MonthlyTotal.evaluate(&a) < MonthlyTotal.evaluate(&b));
        assert_eq!(MonthlyTotal.evaluate(&a), Decimal::from(-300));
    }

    #[test]
    fn test_rule_names() {
        assert_eq!(WeeklyNew.name(), "WEEKLY_NEW");
        assert_eq!(WeeklyTotal.description(), "Weekly total sales (descending)");
        assert_eq!(MonthlyTotal.name(), "MONTHLY_TOTAL");
    }
}
