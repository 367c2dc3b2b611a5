//! Lead-queue domain models.
//!
//! Input records ([`Transaction`], [`Consultant`]), derived summaries
//! ([`SalesSummary`]) and ranking output ([`QueueEntry`], [`UnitQueues`],
//! [`QueueReport`]).
//!
//! # Data Flow
//!
//! | Stage | Type | Cardinality |
//! |-------|------|-------------|
//! | Raw sale events | `Transaction` | many per consultant |
//! | Roster | `Consultant` | one per consultant |
//! | Period totals | `SalesSummary` | one per consultant per period |
//! | Joined row | `BaseRow` | one per roster entry |
//! | Queue placement | `QueueEntry` | one per eligible consultant |

mod consultant;
mod queue;
mod summary;
mod transaction;

pub use consultant::Consultant;
pub use queue::{
    BaseRow, Category, QueueEntry, QueueLabel, QueueReport, RunOutput, UnitCode, UnitQueues,
};
pub use summary::{Period, SalesSummary};
pub use transaction::{ClientType, Transaction};
