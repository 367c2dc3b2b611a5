//! Queue (ranking output) models.
//!
//! A [`QueueReport`] holds one [`UnitQueues`] block per commercial unit,
//! in sorted unit order. Entries are created once per run and never
//! mutated after assignment.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::SalesSummary;

/// Canonical commercial-unit code (e.g. `SPO`, `BHZ`, `SP INTERIOR`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct UnitCode(pub String);

impl UnitCode {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Label shown on the unit block header.
    pub fn display_label(&self) -> String {
        format!("{} Comercial", self.0)
    }
}

impl fmt::Display for UnitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Performance tier of a consultant within a unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Sold this week (`weekly total > 0`).
    A,
    /// No weekly sales, but monthly sales (`monthly total > 0`).
    B,
    /// No sales in either period.
    C,
}

impl Category {
    /// Classifies a consultant from their weekly and monthly totals.
    pub fn classify(weekly: &SalesSummary, monthly: &SalesSummary) -> Self {
        if weekly.has_sales() {
            Category::A
        } else if monthly.has_sales() {
            Category::B
        } else {
            Category::C
        }
    }
}

/// Output queue label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QueueLabel {
    #[serde(rename = "Fila 1")]
    Fila1,
    #[serde(rename = "Fila 2")]
    Fila2,
}

impl QueueLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            QueueLabel::Fila1 => "Fila 1",
            QueueLabel::Fila2 => "Fila 2",
        }
    }
}

impl fmt::Display for QueueLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of the joined base table (roster ⋈ weekly ⋈ monthly).
///
/// Includes consultants on leave; `on_leave` marks them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaseRow {
    pub consultant_id: String,
    pub team: String,
    pub justification: String,
    pub on_leave: bool,
    pub unit: UnitCode,
    /// Weekly totals (all-zero when absent from the weekly table).
    pub weekly: SalesSummary,
    /// Monthly totals (all-zero when absent from the monthly table).
    pub monthly: SalesSummary,
}

impl BaseRow {
    pub fn category(&self) -> Category {
        Category::classify(&self.weekly, &self.monthly)
    }
}

/// A consultant placed in a queue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueueEntry {
    pub consultant_id: String,
    /// Title Case rendering of the identifier, for presentation only.
    pub display_name: String,
    pub weekly_new: Decimal,
    pub weekly_existing: Decimal,
    pub weekly_total: Decimal,
    pub monthly_total: Decimal,
    pub category: Category,
    pub queue: QueueLabel,
    pub unit: UnitCode,
    /// 1-based position within its queue.
    pub rank: usize,
}

impl QueueEntry {
    /// Builds an entry from a joined row.
    pub fn from_row(row: &BaseRow, queue: QueueLabel, rank: usize) -> Self {
        Self {
            consultant_id: row.consultant_id.clone(),
            display_name: crate::table::title_case(&row.consultant_id),
            weekly_new: row.weekly.new,
            weekly_existing: row.weekly.existing,
            weekly_total: row.weekly.total,
            monthly_total: row.monthly.total,
            category: row.category(),
            queue,
            unit: row.unit.clone(),
            rank,
        }
    }
}

/// The two ordered queues of one unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitQueues {
    pub unit: UnitCode,
    pub fila_1: Vec<QueueEntry>,
    pub fila_2: Vec<QueueEntry>,
}

impl UnitQueues {
    /// Entries of the given queue.
    pub fn queue(&self, label: QueueLabel) -> &[QueueEntry] {
        match label {
            QueueLabel::Fila1 => &self.fila_1,
            QueueLabel::Fila2 => &self.fila_2,
        }
    }

    /// Consultant identifiers of the given queue, in rank order.
    pub fn ids(&self, label: QueueLabel) -> Vec<&str> {
        self.queue(label)
            .iter()
            .map(|e| e.consultant_id.as_str())
            .collect()
    }

    /// Total number of consultants across both queues.
    pub fn len(&self) -> usize {
        self.fila_1.len() + self.fila_2.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of entries of the given category across both queues.
    pub fn count(&self, category: Category) -> usize {
        self.fila_1
            .iter()
            .chain(&self.fila_2)
            .filter(|e| e.category == category)
            .count()
    }
}

/// Per-unit queue blocks in sorted unit order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueueReport {
    pub units: Vec<UnitQueues>,
}

impl QueueReport {
    /// Block for a unit code.
    pub fn unit(&self, code: &str) -> Option<&UnitQueues> {
        self.units.iter().find(|u| u.unit.as_str() == code)
    }

    /// All entries, unit by unit, Fila 1 before Fila 2.
    pub fn entries(&self) -> impl Iterator<Item = &QueueEntry> {
        self.units
            .iter()
            .flat_map(|u| u.fila_1.iter().chain(u.fila_2.iter()))
    }

    /// Number of queued consultants.
    pub fn len(&self) -> usize {
        self.units.iter().map(UnitQueues::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Complete result of one ranking run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunOutput {
    pub report: QueueReport,
    /// Joined base table before classification (secondary export).
    pub base_table: Vec<BaseRow>,
}
