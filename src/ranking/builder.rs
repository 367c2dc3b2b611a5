//! Queue builder.
//!
//! Joins the roster with weekly and monthly summaries, groups eligible
//! consultants by unit, and assigns each to Fila 1 or Fila 2.
//!
//! # Algorithm (per unit)
//!
//! | Tier | Condition | Order |
//! |------|-----------|-------|
//! | A | weekly total > 0 | weekly New ↓, weekly total ↓ |
//! | B | weekly total = 0, monthly total > 0 | monthly total ↓ |
//! | C | no sales in either period | random shuffle |
//!
//! Fila 1 takes the first `ceil(|A| / 2)` of tier A. Fila 2 is the
//! remaining tier A re-sorted by weekly total ↓, then tier B, then tier C.

use std::collections::{BTreeMap, HashMap, HashSet};

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, info, warn};

use super::{rules, RuleEngine};
use crate::availability::{self, DEFAULT_LEAVE_MARKER};
use crate::error::{LeadQueueError, Result};
use crate::models::{
    BaseRow, Category, Consultant, QueueEntry, QueueLabel, QueueReport, RunOutput, SalesSummary,
    UnitCode, UnitQueues,
};
use crate::unit::{is_known_unit, normalize_unit};
use crate::validation;

/// Builds per-unit Fila 1 / Fila 2 queues.
#[derive(Debug, Clone)]
pub struct QueueBuilder {
    leave_marker: String,
    tier_a: RuleEngine,
    overflow: RuleEngine,
    tier_b: RuleEngine,
}

impl QueueBuilder {
    /// Creates a builder with the default leave marker.
    pub fn new() -> Self {
        Self {
            leave_marker: DEFAULT_LEAVE_MARKER.to_string(),
            tier_a: RuleEngine::new()
                .with_rule(rules::WeeklyNew)
                .with_tie_breaker(rules::WeeklyTotal),
            overflow: RuleEngine::new().with_rule(rules::WeeklyTotal),
            tier_b: RuleEngine::new().with_rule(rules::MonthlyTotal),
        }
    }

    /// Sets the justification text that marks a consultant as on leave.
    pub fn with_leave_marker(mut self, marker: impl Into<String>) -> Self {
        self.leave_marker = marker.into();
        self
    }

    /// Left-joins the roster with both summary sets.
    ///
    /// Every roster entry yields exactly one row (first occurrence wins
    /// for duplicated identifiers). Missing summaries are zero-filled.
    pub fn join(
        &self,
        roster: &[Consultant],
        weekly: &[SalesSummary],
        monthly: &[SalesSummary],
    ) -> Vec<BaseRow> {
        if let Err(errors) = validation::validate_roster(roster) {
            for e in &errors {
                warn!(consultant = %e.consultant_id, "{}", e.message);
            }
        }

        let weekly: HashMap<&str, &SalesSummary> =
            weekly.iter().map(|s| (s.consultant_id.as_str(), s)).collect();
        let monthly: HashMap<&str, &SalesSummary> =
            monthly.iter().map(|s| (s.consultant_id.as_str(), s)).collect();
        let available: HashSet<&str> = availability::filter_available(roster, &self.leave_marker)
            .into_iter()
            .map(|c| c.id.as_str())
            .collect();

        let unaliased: HashSet<&str> = roster
            .iter()
            .filter(|c| !is_known_unit(&c.team))
            .map(|c| c.team.as_str())
            .collect();
        for team in &unaliased {
            debug!(%team, "team has no unit alias; grouped under its own label");
        }

        let mut seen = HashSet::new();
        roster
            .iter()
            .filter(|c| !c.id.trim().is_empty() && seen.insert(c.id.as_str()))
            .map(|c| {
                let id = c.id.as_str();
                BaseRow {
                    consultant_id: c.id.clone(),
                    team: c.team.clone(),
                    justification: c.justification.clone(),
                    on_leave: !available.contains(id),
                    unit: normalize_unit(&c.team),
                    weekly: weekly
                        .get(id)
                        .map(|s| (*s).clone())
                        .unwrap_or_else(|| SalesSummary::zero(id)),
                    monthly: monthly
                        .get(id)
                        .map(|s| (*s).clone())
                        .unwrap_or_else(|| SalesSummary::zero(id)),
                }
            })
            .collect()
    }

    /// Runs the full ranking.
    ///
    /// `roster` and `weekly` are mandatory; `monthly` may be absent, in
    /// which case every consultant's monthly totals are zero. Tier C is
    /// shuffled with `rng`; pass a seeded generator for reproducible output.
    ///
    /// # Errors
    /// [`LeadQueueError::MissingPrerequisiteData`] when `roster` or
    /// `weekly` is `None`. No partial output is produced.
    pub fn build<R: Rng + ?Sized>(
        &self,
        roster: Option<&[Consultant]>,
        weekly: Option<&[SalesSummary]>,
        monthly: Option<&[SalesSummary]>,
        rng: &mut R,
    ) -> Result<RunOutput> {
        let roster = roster.ok_or(LeadQueueError::MissingPrerequisiteData { table: "roster" })?;
        let weekly = weekly.ok_or(LeadQueueError::MissingPrerequisiteData { table: "weekly" })?;
        let monthly = monthly.unwrap_or(&[]);

        let base_table = self.join(roster, weekly, monthly);

        let mut groups: BTreeMap<&UnitCode, Vec<&BaseRow>> = BTreeMap::new();
        for row in base_table.iter().filter(|r| !r.on_leave) {
            groups.entry(&row.unit).or_default().push(row);
        }

        let units: Vec<UnitQueues> = groups
            .into_iter()
            .map(|(unit, rows)| self.rank_unit(unit, rows, rng))
            .collect();
        let report = QueueReport { units };

        info!(
            roster = roster.len(),
            on_leave = base_table.iter().filter(|r| r.on_leave).count(),
            units = report.units.len(),
            queued = report.len(),
            "queues built"
        );

        Ok(RunOutput { report, base_table })
    }

    fn rank_unit<R: Rng + ?Sized>(
        &self,
        unit: &UnitCode,
        rows: Vec<&BaseRow>,
        rng: &mut R,
    ) -> UnitQueues {
        let mut tier_a = Vec::new();
        let mut tier_b = Vec::new();
        let mut tier_c = Vec::new();
        for row in rows {
            match row.category() {
                Category::A => tier_a.push(row),
                Category::B => tier_b.push(row),
                Category::C => tier_c.push(row),
            }
        }
        debug!(unit = %unit, a = tier_a.len(), b = tier_b.len(), c = tier_c.len(), "unit classified");

        self.tier_a.sort(&mut tier_a);
        self.tier_b.sort(&mut tier_b);
        tier_c.shuffle(rng);

        let fila_1_len = tier_a.len().div_ceil(2);
        let mut overflow = tier_a.split_off(fila_1_len);
        self.overflow.sort(&mut overflow);

        let fila_1 = tier_a
            .iter()
            .enumerate()
            .map(|(i, row)| QueueEntry::from_row(row, QueueLabel::Fila1, i + 1))
            .collect();
        let fila_2 = overflow
            .iter()
            .chain(&tier_b)
            .chain(&tier_c)
            .enumerate()
            .map(|(i, row)| QueueEntry::from_row(row, QueueLabel::Fila2, i + 1))
            .collect();

        UnitQueues {
            unit: unit.clone(),
            fila_1,
            fila_2,
        }
    }
}

impl Default for QueueBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;
    use rust_decimal::Decimal;

    const NO_SALES: &[SalesSummary] = &[];

    fn weekly_new(id: &str, amount: i64) -> SalesSummary {
        SalesSummary::new(id, Decimal::from(amount), Decimal::ZERO)
    }

    fn weekly_existing(id: &str, amount: i64) -> SalesSummary {
        SalesSummary::new(id, Decimal::ZERO, Decimal::from(amount))
    }

    fn summary(id: &str, new: i64, existing: i64) -> SalesSummary {
        SalesSummary::new(id, Decimal::from(new), Decimal::from(existing))
    }

    fn rng() -> SmallRng {
        SmallRng::seed_from_u64(42)
    }

    fn sorted(mut ids: Vec<&str>) -> Vec<&str> {
        ids.sort_unstable();
        ids
    }

    #[test]
    fn test_example_scenario() {
        let roster = vec![
            Consultant::new("A", "Team X").with_justification("-"),
            Consultant::new("B", "Team X").with_justification("-"),
            Consultant::new("C", "Team X").with_justification("Férias"),
        ];
        let weekly = vec![weekly_new("A", 100), weekly_existing("B", 50)];

        let out = QueueBuilder::new()
            .build(Some(roster.as_slice()), Some(weekly.as_slice()), Some(NO_SALES), &mut rng())
            .unwrap();

        let unit = out.report.unit("TEAM X").unwrap();
        assert_eq!(unit.ids(QueueLabel::Fila1), vec!["A"]);
        assert_eq!(unit.ids(QueueLabel::Fila2), vec!["B"]);
        assert!(out.report.entries().all(|e| e.consultant_id != "C"));
        assert_eq!(out.base_table.len(), 3);
        assert!(out.base_table[2].on_leave);
    }

    #[test]
    fn test_no_sales_lands_in_tier_c() {
        let roster = vec![Consultant::new("D", "Team X"), Consultant::new("E", "Team X")];
        let out = QueueBuilder::new()
            .build(Some(roster.as_slice()), Some(NO_SALES), None, &mut rng())
            .unwrap();

        let unit = out.report.unit("TEAM X").unwrap();
        assert!(unit.fila_1.is_empty());
        assert_eq!(sorted(unit.ids(QueueLabel::Fila2)), vec!["D", "E"]);
        assert!(unit.fila_2.iter().all(|e| e.category == Category::C));
        assert!(unit
            .fila_2
            .iter()
            .all(|e| e.weekly_total.is_zero() && e.monthly_total.is_zero()));
    }

    #[test]
    fn test_missing_prerequisites() {
        let roster = vec![Consultant::new("A", "SPO")];
        let err = QueueBuilder::new()
            .build(None, Some(NO_SALES), None, &mut rng())
            .unwrap_err();
        assert!(matches!(
            err,
            LeadQueueError::MissingPrerequisiteData { table: "roster" }
        ));

        let err = QueueBuilder::new()
            .build(Some(roster.as_slice()), None, None, &mut rng())
            .unwrap_err();
        assert!(matches!(
            err,
            LeadQueueError::MissingPrerequisiteData { table: "weekly" }
        ));
    }

    #[test]
    fn test_split_and_overflow_resort() {
        // Tier A by (New, Total): P(90,90) Q(80,80) R(10,300) S(0,200) T(0,20)
        let roster: Vec<Consultant> = ["S", "R", "T", "Q", "P"]
            .iter()
            .map(|id| Consultant::new(*id, "SP"))
            .collect();
        let weekly = vec![
            summary("P", 90, 0),
            summary("Q", 80, 0),
            summary("R", 10, 290),
            summary("S", 0, 200),
            summary("T", 0, 20),
        ];
        let out = QueueBuilder::new()
            .build(Some(roster.as_slice()), Some(weekly.as_slice()), None, &mut rng())
            .unwrap();
        let spo = out.report.unit("SPO").unwrap();

        // ceil(5/2) = 3
        assert_eq!(spo.ids(QueueLabel::Fila1), vec!["P", "Q", "R"]);
        // Overflow re-sorted by weekly total only: S(200) before T(20)
        assert_eq!(spo.ids(QueueLabel::Fila2), vec!["S", "T"]);
    }

    #[test]
    fn test_overflow_uses_total_not_new() {
        // A by (New, Total): X(50,50) Y(40,40) Z(30,30) W(0,45)
        // Fila 1 = X, Y ; overflow = Z, W → resorted by total → W, Z
        let roster: Vec<Consultant> = ["X", "Y", "Z", "W"]
            .iter()
            .map(|id| Consultant::new(*id, "RJ"))
            .collect();
        let weekly = vec![
            summary("X", 50, 0),
            summary("Y", 40, 0),
            summary("Z", 30, 0),
            summary("W", 0, 45),
        ];
        let out = QueueBuilder::new()
            .build(Some(roster.as_slice()), Some(weekly.as_slice()), None, &mut rng())
            .unwrap();
        let rjo = out.report.unit("RJO").unwrap();
        assert_eq!(rjo.ids(QueueLabel::Fila1), vec!["X", "Y"]);
        assert_eq!(rjo.ids(QueueLabel::Fila2), vec!["W", "Z"]);
    }

    #[test]
    fn test_fila_2_segment_order() {
        let roster: Vec<Consultant> = ["A1", "A2", "B1", "B2", "C1", "C2"]
            .iter()
            .map(|id| Consultant::new(*id, "BH"))
            .collect();
        let weekly = vec![summary("A1", 10, 0), summary("A2", 5, 0)];
        let monthly = vec![summary("B1", 0, 100), summary("B2", 500, 0)];
        let out = QueueBuilder::new()
            .build(Some(roster.as_slice()), Some(weekly.as_slice()), Some(monthly.as_slice()), &mut rng())
            .unwrap();
        let bhz = out.report.unit("BHZ").unwrap();

        assert_eq!(bhz.ids(QueueLabel::Fila1), vec!["A1"]);
        let fila_2 = bhz.ids(QueueLabel::Fila2);
        assert_eq!(&fila_2[..3], &["A2", "B2", "B1"]);
        assert_eq!(sorted(fila_2[3..].to_vec()), vec!["C1", "C2"]);
        assert_eq!(bhz.count(Category::B), 2);
    }

    #[test]
    fn test_tier_a_stable_on_full_tie() {
        let roster: Vec<Consultant> = ["M", "N", "O", "P"]
            .iter()
            .map(|id| Consultant::new(*id, "CTA"))
            .collect();
        let weekly: Vec<SalesSummary> = ["M", "N", "O", "P"]
            .iter()
            .map(|id| summary(id, 10, 10))
            .collect();
        let out = QueueBuilder::new()
            .build(Some(roster.as_slice()), Some(weekly.as_slice()), None, &mut rng())
            .unwrap();
        let cta = out.report.unit("CTA").unwrap();
        assert_eq!(cta.ids(QueueLabel::Fila1), vec!["M", "N"]);
        assert_eq!(cta.ids(QueueLabel::Fila2), vec!["O", "P"]);
    }

    #[test]
    fn test_units_sorted_and_independent() {
        let roster = vec![
            Consultant::new("A", "SP 1"),
            Consultant::new("B", "Grandes Contas BH"),
            Consultant::new("C", "Recife"),
            Consultant::new("D", "spi"),
        ];
        let out = QueueBuilder::new()
            .build(Some(roster.as_slice()), Some(NO_SALES), None, &mut rng())
            .unwrap();
        let codes: Vec<&str> = out.report.units.iter().map(|u| u.unit.as_str()).collect();
        assert_eq!(codes, vec!["BHZ", "RECIFE", "SP INTERIOR", "SPO"]);
        assert!(out.report.units.iter().all(|u| u.len() == 1));
    }

    #[test]
    fn test_completeness_and_ranks() {
        let roster: Vec<Consultant> = (0..9)
            .map(|i| Consultant::new(format!("C{i}"), if i % 2 == 0 { "SP" } else { "RJ" }))
            .collect();
        let weekly: Vec<SalesSummary> = (0..5)
            .map(|i| summary(&format!("C{i}"), i * 10, i))
            .collect();
        let monthly = vec![summary("C6", 0, 70), summary("C7", 7, 0)];
        let out = QueueBuilder::new()
            .build(Some(roster.as_slice()), Some(weekly.as_slice()), Some(monthly.as_slice()), &mut rng())
            .unwrap();

        let mut all: Vec<&str> = out.report.entries().map(|e| e.consultant_id.as_str()).collect();
        all.sort_unstable();
        let mut expected: Vec<String> = roster.iter().map(|c| c.id.clone()).collect();
        expected.sort_unstable();
        assert_eq!(all, expected);

        for unit in &out.report.units {
            let a = unit.count(Category::A);
            assert_eq!(unit.fila_1.len(), a.div_ceil(2));
            for (i, e) in unit.fila_1.iter().enumerate() {
                assert_eq!(e.rank, i + 1);
                assert_eq!(e.queue, QueueLabel::Fila1);
            }
            for (i, e) in unit.fila_2.iter().enumerate() {
                assert_eq!(e.rank, i + 1);
                assert_eq!(e.queue, QueueLabel::Fila2);
            }
            for pair in unit.fila_1.windows(2) {
                assert!(
                    (pair[0].weekly_new, pair[0].weekly_total)
                        >= (pair[1].weekly_new, pair[1].weekly_total)
                );
            }
        }
    }

    #[test]
    fn test_fixed_seed_is_reproducible() {
        let roster: Vec<Consultant> = (0..20)
            .map(|i| Consultant::new(format!("Z{i:02}"), "SPO"))
            .collect();
        let builder = QueueBuilder::new();
        let first = builder
            .build(Some(roster.as_slice()), Some(NO_SALES), None, &mut SmallRng::seed_from_u64(9))
            .unwrap();
        let second = builder
            .build(Some(roster.as_slice()), Some(NO_SALES), None, &mut SmallRng::seed_from_u64(9))
            .unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_duplicate_roster_entry_queued_once() {
        let roster = vec![
            Consultant::new("A", "SPO"),
            Consultant::new("A", "BHZ"),
            Consultant::new("B", "SPO"),
        ];
        let out = QueueBuilder::new()
            .build(Some(roster.as_slice()), Some(&[weekly_new("A", 1)][..]), None, &mut rng())
            .unwrap();
        assert_eq!(out.report.len(), 2);
        assert!(out.report.unit("BHZ").is_none());
        assert_eq!(out.base_table.len(), 2);
    }

    #[test]
    fn test_custom_leave_marker() {
        let roster = vec![
            Consultant::new("A", "SPO").with_justification("licença"),
            Consultant::new("B", "SPO").with_justification("Férias"),
        ];
        let out = QueueBuilder::new()
            .with_leave_marker("LICENÇA")
            .build(Some(roster.as_slice()), Some(NO_SALES), None, &mut rng())
            .unwrap();
        let ids: Vec<&str> = out.report.entries().map(|e| e.consultant_id.as_str()).collect();
        assert_eq!(ids, vec!["B"]);
    }

    #[test]
    fn test_summaries_for_unknown_consultants_ignored() {
        let roster = vec![Consultant::new("A", "SPO")];
        let weekly = vec![weekly_new("GHOST", 1000)];
        let out = QueueBuilder::new()
            .build(Some(roster.as_slice()), Some(weekly.as_slice()), None, &mut rng())
            .unwrap();
        assert_eq!(out.report.len(), 1);
        assert_eq!(out.report.unit("SPO").unwrap().ids(QueueLabel::Fila2), vec!["A"]);
    }

    #[test]
    fn test_tier_b_ties_keep_roster_order() {
        let roster: Vec<Consultant> = ["B3", "B1", "B2"]
            .iter()
            .map(|id| Consultant::new(*id, "SPO"))
            .collect();
        let monthly = vec![summary("B1", 40, 0), summary("B2", 0, 40), summary("B3", 20, 20)];
        let out = QueueBuilder::new()
            .build(Some(roster.as_slice()), Some(NO_SALES), Some(monthly.as_slice()), &mut rng())
            .unwrap();
        let spo = out.report.unit("SPO").unwrap();
        assert!(spo.fila_1.is_empty());
        assert_eq!(spo.ids(QueueLabel::Fila2), vec!["B3", "B1", "B2"]);
        assert_eq!(spo.count(Category::B), 3);
    }

    #[test]
    fn test_tier_c_draws_from_one_generator_across_units() {
        let roster: Vec<Consultant> = (0..10)
            .map(|i| Consultant::new(format!("R{i}"), "RJO"))
            .chain((0..10).map(|i| Consultant::new(format!("S{i}"), "SPO")))
            .collect();
        let out = QueueBuilder::new()
            .build(Some(roster.as_slice()), Some(NO_SALES), None, &mut SmallRng::seed_from_u64(5))
            .unwrap();

        // Units run in code order (RJO, SPO) and share one generator, so
        // replaying two shuffles on the same seed reproduces both orders.
        let mut replay = SmallRng::seed_from_u64(5);
        let mut rjo_order: Vec<usize> = (0..10).collect();
        rjo_order.shuffle(&mut replay);
        let mut spo_order: Vec<usize> = (0..10).collect();
        spo_order.shuffle(&mut replay);

        let positions = |code: &str, prefix: char| -> Vec<usize> {
            out.report
                .unit(code)
                .unwrap()
                .ids(QueueLabel::Fila2)
                .iter()
                .map(|id| id.trim_start_matches(prefix).parse().unwrap())
                .collect()
        };
        assert_eq!(positions("RJO", 'R'), rjo_order);
        assert_eq!(positions("SPO", 'S'), spo_order);
        assert_ne!(rjo_order, spo_order);
    }
}
