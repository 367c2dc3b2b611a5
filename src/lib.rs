//! Lead-distribution queue ranking.
//!
//! Assigns sales consultants to one of two priority queues ("Fila 1",
//! "Fila 2") per commercial unit, based on weekly and monthly sales.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `Transaction`, `Consultant`, `SalesSummary`,
//!   `BaseRow`, `QueueEntry`, `UnitQueues`, `QueueReport`
//! - **`table`** / **`schema`**: Raw loaded tables and their resolution into
//!   typed records
//! - **`summarizer`**: Per-consultant New / Existing / Total sums
//! - **`unit`**: Team label → canonical unit code
//! - **`availability`**: Leave filter (sole eligibility gate)
//! - **`validation`**: Structural roster checks
//! - **`ranking`**: Rule engine and queue builder
//! - **`loader`** / **`report`**: Workbook input and report output
//! - **`session`**: Snapshot-consistent owner of the loaded tables
//! - **`config`**: TOML configuration
//!
//! # Pipeline
//!
//! raw transactions → summaries → joined base table → per-unit queues → report

pub mod availability;
pub mod config;
pub mod error;
pub mod loader;
pub mod models;
pub mod ranking;
pub mod report;
pub mod schema;
pub mod session;
pub mod summarizer;
pub mod table;
pub mod unit;
pub mod validation;

pub use config::LeadQueueConfig;
pub use error::{LeadQueueError, Result};
pub use session::{Dataset, Session};
