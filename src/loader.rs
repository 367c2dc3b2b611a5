//! Workbook loader.
//!
//! Reads the three input sheets (weekly, monthly, roster) from an
//! `.xlsx` / `.xls` / `.ods` workbook via `calamine`. Sheet names are
//! matched trimmed and case-insensitively against the configured
//! candidates. All three sheets are required; a missing one yields
//! [`LeadQueueError::MalformedSchema`].

use std::collections::HashMap;
use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};
use tracing::{debug, info};

use crate::config::SheetNames;
use crate::error::{LeadQueueError, Result};
use crate::session::Dataset;
use crate::table::{Cell, RawTable};

/// Actual sheet names chosen for each table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSheets {
    pub weekly: String,
    pub monthly: String,
    pub roster: String,
}

fn pick(index: &HashMap<String, &String>, candidates: &[String]) -> Option<String> {
    candidates
        .iter()
        .find_map(|c| index.get(&c.trim().to_uppercase()).map(|s| (*s).clone()))
}

/// Resolves required sheets among the workbook's sheet names.
pub fn resolve_sheets(available: &[String], wanted: &SheetNames) -> Result<ResolvedSheets> {
    let index: HashMap<String, &String> = available
        .iter()
        .map(|n| (n.trim().to_uppercase(), n))
        .collect();

    let weekly = pick(&index, &wanted.weekly);
    let monthly = pick(&index, &wanted.monthly);
    let roster = pick(&index, &wanted.roster);

    match (weekly, monthly, roster) {
        (Some(weekly), Some(monthly), Some(roster)) => Ok(ResolvedSheets {
            weekly,
            monthly,
            roster,
        }),
        (weekly, monthly, roster) => {
            let mut missing = Vec::new();
            if weekly.is_none() {
                missing.push(wanted.weekly.join(" | "));
            }
            if monthly.is_none() {
                missing.push(wanted.monthly.join(" | "));
            }
            if roster.is_none() {
                missing.push(wanted.roster.join(" | "));
            }
            Err(LeadQueueError::MalformedSchema(format!(
                "required sheets not found: {} (workbook has: {})",
                missing.join(", "),
                available.join(", ")
            )))
        }
    }
}

fn to_cell(data: &Data) -> Cell {
    match data {
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Float(f) => Cell::Number(*f),
        Data::String(s) => Cell::Text(s.clone()),
        Data::Bool(b) => Cell::Text(b.to_string()),
        Data::DateTime(dt) => Cell::Number(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::Text(s.clone()),
        Data::Error(_) | Data::Empty => Cell::Empty,
    }
}

/// Builds a table from sheet rows. The first row holds the headers.
///
/// Trailing rows with no value in any column are dropped.
pub fn table_from_rows<R: AsRef<[Data]>>(
    name: &str,
    rows: impl IntoIterator<Item = R>,
) -> RawTable {
    let mut rows = rows.into_iter();
    let Some(header_row) = rows.next() else {
        return RawTable::new(name);
    };
    let headers: Vec<String> = header_row
        .as_ref()
        .iter()
        .enumerate()
        .map(|(i, d)| {
            let h = to_cell(d).as_text();
            if h.trim().is_empty() {
                format!("Unnamed: {i}")
            } else {
                h
            }
        })
        .collect();

    let mut columns: Vec<Vec<Cell>> = vec![Vec::new(); headers.len()];
    for row in rows {
        let row = row.as_ref();
        for (i, column) in columns.iter_mut().enumerate() {
            column.push(row.get(i).map(to_cell).unwrap_or(Cell::Empty));
        }
    }

    let last_filled = (0..columns.first().map_or(0, Vec::len))
        .rev()
        .find(|&r| columns.iter().any(|c| !c[r].is_empty()))
        .map_or(0, |r| r + 1);

    let mut table = RawTable::new(name);
    for (header, mut cells) in headers.iter().zip(columns) {
        cells.truncate(last_filled);
        table.push_column(header, cells);
    }
    table
}

/// Loads the weekly, monthly and roster sheets from a workbook.
///
/// # Errors
/// - [`LeadQueueError::Workbook`] if the file cannot be opened or read.
/// - [`LeadQueueError::MalformedSchema`] if a required sheet is missing.
pub fn load_workbook(path: impl AsRef<Path>, sheets: &SheetNames) -> Result<Dataset> {
    let path = path.as_ref();
    let mut workbook = open_workbook_auto(path)?;
    let resolved = resolve_sheets(&workbook.sheet_names(), sheets)?;
    debug!(?resolved, "sheets resolved");

    let mut read = |name: &str| -> Result<RawTable> {
        let range = workbook.worksheet_range(name)?;
        let table = table_from_rows(name, range.rows());
        debug!(sheet = name, rows = table.row_count(), columns = table.columns.len(), "sheet read");
        Ok(table)
    };

    let dataset = Dataset {
        weekly: Some(read(&resolved.weekly)?),
        monthly: Some(read(&resolved.monthly)?),
        roster: Some(read(&resolved.roster)?),
    };
    info!(path = %path.display(), "workbook loaded");
    Ok(dataset)
}
