//! Session: the loaded input tables and the entry point for ranking runs.
//!
//! The three tables are held as one immutable [`Dataset`] behind an
//! `Arc`. A reload swaps the `Arc` wholesale; a run clones the current
//! `Arc` once and never observes a partially replaced dataset.

use std::path::Path;
use std::sync::Arc;

use parking_lot::RwLock;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

use crate::config::{LeadQueueConfig, SheetNames};
use crate::error::{LeadQueueError, Result};
use crate::loader;
use crate::models::{Period, RunOutput};
use crate::ranking::QueueBuilder;
use crate::schema;
use crate::summarizer;
use crate::table::RawTable;

/// The three input tables of one load.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    /// Weekly transactions. Mandatory for ranking.
    pub weekly: Option<RawTable>,
    /// Monthly transactions. Optional; absent means all-zero monthly totals.
    pub monthly: Option<RawTable>,
    /// Consultant roster. Mandatory for ranking.
    pub roster: Option<RawTable>,
}

impl Dataset {
    /// Creates an empty dataset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the weekly transaction table.
    pub fn with_weekly(mut self, table: RawTable) -> Self {
        self.weekly = Some(table);
        self
    }

    /// Sets the monthly transaction table.
    pub fn with_monthly(mut self, table: RawTable) -> Self {
        self.monthly = Some(table);
        self
    }

    /// Sets the roster table.
    pub fn with_roster(mut self, table: RawTable) -> Self {
        self.roster = Some(table);
        self
    }
}

/// Ranks one dataset.
///
/// Checks both mandatory tables before any computation, then resolves
/// schemas, summarizes both periods and builds the queues.
pub fn rank_dataset<R: Rng + ?Sized>(
    dataset: &Dataset,
    config: &LeadQueueConfig,
    rng: &mut R,
) -> Result<RunOutput> {
    let roster_table = dataset
        .roster
        .as_ref()
        .ok_or(LeadQueueError::MissingPrerequisiteData { table: "roster" })?;
    let weekly_table = dataset
        .weekly
        .as_ref()
        .ok_or(LeadQueueError::MissingPrerequisiteData { table: "weekly" })?;

    let roster = schema::read_roster(roster_table)?;
    let weekly = summarizer::summarize_table(Some(weekly_table), Period::Weekly)?;
    let monthly = summarizer::summarize_table(dataset.monthly.as_ref(), Period::Monthly)?;

    QueueBuilder::new()
        .with_leave_marker(config.leave_marker.as_str())
        .build(
            Some(roster.as_slice()),
            Some(weekly.as_slice()),
            Some(monthly.as_slice()),
            rng,
        )
}

/// Owns the currently loaded dataset.
#[derive(Debug, Default)]
pub struct Session {
    current: RwLock<Arc<Dataset>>,
}

impl Session {
    /// Creates a session with nothing loaded.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a session holding `dataset`.
    pub fn with_dataset(dataset: Dataset) -> Self {
        Self {
            current: RwLock::new(Arc::new(dataset)),
        }
    }

    /// The current dataset. Unaffected by later replacements.
    pub fn snapshot(&self) -> Arc<Dataset> {
        Arc::clone(&self.current.read())
    }

    /// Replaces the dataset wholesale.
    pub fn replace(&self, dataset: Dataset) {
        *self.current.write() = Arc::new(dataset);
    }

    /// Loads a workbook and replaces the dataset.
    ///
    /// On failure the previous dataset stays in place.
    pub fn load_workbook(&self, path: impl AsRef<Path>, sheets: &SheetNames) -> Result<()> {
        let dataset = loader::load_workbook(path, sheets)?;
        self.replace(dataset);
        Ok(())
    }

    /// Ranks the current dataset.
    ///
    /// Uses `config.seed` when set, otherwise a freshly OS-seeded generator.
    pub fn rank(&self, config: &LeadQueueConfig) -> Result<RunOutput> {
        let mut rng = match config.seed {
            Some(seed) => {
                info!(seed, "using fixed shuffle seed");
                StdRng::seed_from_u64(seed)
            }
            None => StdRng::from_os_rng(),
        };
        self.rank_with_rng(config, &mut rng)
    }

    /// Ranks the current dataset with an injected random source.
    pub fn rank_with_rng<R: Rng + ?Sized>(
        &self,
        config: &LeadQueueConfig,
        rng: &mut R,
    ) -> Result<RunOutput> {
        let snapshot = self.snapshot();
        rank_dataset(&snapshot, config, rng)
    }
}
