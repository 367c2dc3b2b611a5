//! Rule engine for multi-key ordering.
//!
//! Applies rules in sequence; the next rule is consulted only on ties.
//! Rows that tie on every rule keep their input order (stable sort).

use std::cmp::Ordering;
use std::sync::Arc;

use super::{RankingRule, RuleScore};
use crate::models::BaseRow;

/// A composable, stable multi-key sorter.
///
/// # Example
/// ```
/// use u_lead_queue::ranking::RuleEngine;
/// use u_lead_queue::ranking::rules;
///
/// let engine = RuleEngine::new()
///     .with_rule(rules::WeeklyNew)
///     .with_tie_breaker(rules::WeeklyTotal);
/// assert_eq!(engine.rule_names(), vec!["WEEKLY_NEW", "WEEKLY_TOTAL"]);
/// ```
#[derive(Clone, Default)]
pub struct RuleEngine {
    rules: Vec<Arc<dyn RankingRule>>,
}

impl RuleEngine {
    /// Creates an empty rule engine. With no rules, `sort` keeps input order.
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Adds a primary rule.
    pub fn with_rule<R: RankingRule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Arc::new(rule));
        self
    }

    /// Adds a tie-breaking rule, consulted only when all earlier rules tie.
    pub fn with_tie_breaker<R: RankingRule + 'static>(self, rule: R) -> Self {
        self.with_rule(rule)
    }

    /// Names of the configured rules, in evaluation order.
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Sorts rows by priority (highest priority first). Stable.
    pub fn sort(&self, rows: &mut [&BaseRow]) {
        rows.sort_by(|a, b| self.compare(a, b));
    }

    /// Evaluates a single row and returns scores from each rule.
    pub fn evaluate(&self, row: &BaseRow) -> Vec<RuleScore> {
        self.rules.iter().map(|r| r.evaluate(row)).collect()
    }

    /// Sequential comparison: first non-equal rule decides.
    pub fn compare(&self, a: &BaseRow, b: &BaseRow) -> Ordering {
        for rule in &self.rules {
            match rule.evaluate(a).cmp(&rule.evaluate(b)) {
                Ordering::Equal => continue,
                decided => return decided,
            }
        }
        Ordering::Equal
    }
}

impl std::fmt::Debug for RuleEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleEngine")
            .field("rules", &self.rule_names())
            .finish()
    }
}
