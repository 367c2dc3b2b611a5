//! Queue ranking: rules, rule engine, and the queue builder.
//!
//! Each unit's consultants are classified into tiers and ordered by
//! composable ranking rules, then split into Fila 1 / Fila 2.
//!
//! # Usage
//!
//! ```
//! use rand::SeedableRng;
//! use rand::rngs::SmallRng;
//! use u_lead_queue::models::{Consultant, SalesSummary};
//! use u_lead_queue::ranking::QueueBuilder;
//! use rust_decimal::Decimal;
//!
//! let roster = vec![Consultant::new("ANA", "SP 1"), Consultant::new("BRUNO", "SP 1")];
//! let weekly = vec![SalesSummary::new("ANA", Decimal::from(100), Decimal::ZERO)];
//!
//! let mut rng = SmallRng::seed_from_u64(7);
//! let out = QueueBuilder::new()
//!     .build(Some(roster.as_slice()), Some(weekly.as_slice()), None, &mut rng)
//!     .unwrap();
//! let spo = out.report.unit("SPO").unwrap();
//! assert_eq!(spo.fila_1.len(), 1);
//! assert_eq!(spo.fila_2.len(), 1);
//! ```

mod builder;
mod engine;
pub mod rules;

pub use builder::QueueBuilder;
pub use engine::RuleEngine;

use crate::models::BaseRow;
use rust_decimal::Decimal;
use std::fmt::Debug;

/// Score returned by a ranking rule.
///
/// Lower scores = higher priority (ranked first).
pub type RuleScore = Decimal;

/// A rule that scores a joined row for ordering.
///
/// # Score Convention
/// **Lower score = higher priority.** Rules ranking by "more is better"
/// return the negated amount.
pub trait RankingRule: Send + Sync + Debug {
    /// Rule name (e.g., "WEEKLY_NEW").
    fn name(&self) -> &'static str;

    /// Scores a row. Lower = ranked first.
    fn evaluate(&self, row: &BaseRow) -> RuleScore;

    /// Rule description.
    fn description(&self) -> &'static str {
        self.name()
    }
}
