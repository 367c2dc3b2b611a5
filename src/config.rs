//! Run configuration.
//!
//! Every field has a default, so an empty TOML file (or no file at all)
//! reproduces the standard workbook layout.
//!
//! ```toml
//! leave_marker = "FÉRIAS"
//! seed = 42
//!
//! [sheets]
//! weekly = ["BASE LEAD", "BASE SEMANAL"]
//! monthly = ["BASE MENSAL"]
//! roster = ["CONSULTORES"]
//!
//! [output]
//! directory = "out"
//! file_stem = "Fila_do_Lead"
//! include_base_table = true
//! include_input_tables = false
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::availability::DEFAULT_LEAVE_MARKER;
use crate::error::Result;

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LeadQueueConfig {
    /// Justification text marking a consultant as on leave (case-insensitive).
    pub leave_marker: String,
    /// Sheet names accepted for each input table.
    pub sheets: SheetNames,
    /// Report destination.
    pub output: OutputConfig,
    /// Fixed seed for the tier C shuffle. `None` = fresh entropy per run.
    pub seed: Option<u64>,
}

impl Default for LeadQueueConfig {
    fn default() -> Self {
        Self {
            leave_marker: DEFAULT_LEAVE_MARKER.to_string(),
            sheets: SheetNames::default(),
            output: OutputConfig::default(),
            seed: None,
        }
    }
}

/// Accepted sheet names per table. Matching is trimmed and case-insensitive;
/// the first name present in the workbook wins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetNames {
    pub weekly: Vec<String>,
    pub monthly: Vec<String>,
    pub roster: Vec<String>,
}

impl Default for SheetNames {
    fn default() -> Self {
        Self {
            weekly: vec!["BASE LEAD".into(), "BASE SEMANAL".into()],
            monthly: vec!["BASE MENSAL".into()],
            roster: vec!["CONSULTORES".into()],
        }
    }
}

/// Report output settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub directory: PathBuf,
    /// File name without extension.
    pub file_stem: String,
    /// Also export the joined base table.
    pub include_base_table: bool,
    /// Also echo the three loaded input tables as CSV.
    pub include_input_tables: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
            file_stem: "Fila_do_Lead".to_string(),
            include_base_table: true,
            include_input_tables: false,
        }
    }
}

impl LeadQueueConfig {
    /// Parses configuration from TOML text.
    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml(&text)
    }
}
