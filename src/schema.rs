//! Schema resolution: raw tables → typed records.
//!
//! Column names are resolved against a short list of accepted headers
//! (Portuguese workbook names first, English equivalents second). A table
//! that cannot be resolved yields a named error; the ranking engine only
//! ever sees typed records.
//!
//! # Sale-amount resolution
//! 1. A column named `Venda` / `Sale` / `Amount`.
//! 2. Otherwise the first numeric column (every non-empty cell numeric).
//! 3. Otherwise [`LeadQueueError::MissingValueColumn`].

use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::error::{LeadQueueError, Result};
use crate::models::{ClientType, Consultant, Transaction};
use crate::table::{normalize_consultant_id, Column, RawTable};

/// Accepted consultant-identifier headers.
pub const CONSULTANT_HEADERS: &[&str] = &["Consultor", "Consultant"];
/// Accepted client-type headers.
pub const CLIENT_TYPE_HEADERS: &[&str] = &["Tipo Cliente", "Client Type"];
/// Accepted sale-amount headers.
pub const VALUE_HEADERS: &[&str] = &["Venda", "Sale", "Amount"];
/// Accepted team headers.
pub const TEAM_HEADERS: &[&str] = &["Equipe", "Team"];
/// Accepted availability/justification headers.
pub const JUSTIFICATION_HEADERS: &[&str] = &["Justificativa", "Justification"];

fn require<'a>(table: &'a RawTable, candidates: &[&str], what: &str) -> Result<&'a Column> {
    table.find_column(candidates).ok_or_else(|| {
        LeadQueueError::MalformedSchema(format!(
            "table '{}' has no {} column (expected one of: {})",
            table.name,
            what,
            candidates.join(", ")
        ))
    })
}

/// Resolves the sale-amount column of a transaction table.
pub fn resolve_value_column(table: &RawTable) -> Result<&Column> {
    if let Some(col) = table.find_column(VALUE_HEADERS) {
        return Ok(col);
    }
    let consultant = table.find_column(CONSULTANT_HEADERS).map(|c| &c.header);
    match table
        .columns
        .iter()
        .filter(|c| Some(&c.header) != consultant)
        .find(|c| c.is_numeric())
    {
        Some(col) => {
            debug!(table = %table.name, column = %col.header, "value column resolved by numeric fallback");
            Ok(col)
        }
        None => Err(LeadQueueError::MissingValueColumn {
            table: table.name.clone(),
        }),
    }
}

fn to_decimal(value: f64) -> Option<Decimal> {
    Decimal::try_from(value).ok()
}

/// Reads a transaction table into typed records.
///
/// Rows with a blank consultant identifier are skipped. Empty or
/// non-numeric amounts count as zero.
pub fn read_transactions(table: &RawTable) -> Result<Vec<Transaction>> {
    let consultant = require(table, CONSULTANT_HEADERS, "consultant")?;
    let value = resolve_value_column(table)?;
    let client_type = require(table, CLIENT_TYPE_HEADERS, "client type")?;

    let mut out = Vec::with_capacity(table.row_count());
    let mut unreadable = 0usize;
    let mut untagged = 0usize;
    for row in 0..table.row_count() {
        let id = normalize_consultant_id(&RawTable::cell(consultant, row).as_text());
        if id.is_empty() {
            continue;
        }
        let cell = RawTable::cell(value, row);
        let amount = match cell.as_number().and_then(to_decimal) {
            Some(a) => a,
            None => {
                if !cell.is_empty() {
                    unreadable += 1;
                }
                Decimal::ZERO
            }
        };
        let tag = ClientType::parse(&RawTable::cell(client_type, row).as_text());
        if !tag.is_recognized() {
            untagged += 1;
        }
        out.push(Transaction::new(id, tag, amount));
    }

    if unreadable > 0 {
        warn!(table = %table.name, count = unreadable, "non-numeric sale amounts counted as zero");
    }
    if untagged > 0 {
        debug!(table = %table.name, count = untagged, "rows with unrecognized client type ignored");
    }
    debug!(table = %table.name, rows = out.len(), value_column = %value.header, "transactions read");
    Ok(out)
}

/// Reads the roster table into typed records.
///
/// A missing justification column leaves every consultant available.
pub fn read_roster(table: &RawTable) -> Result<Vec<Consultant>> {
    let consultant = require(table, CONSULTANT_HEADERS, "consultant")?;
    let team = require(table, TEAM_HEADERS, "team")?;
    let justification = table.find_column(JUSTIFICATION_HEADERS);
    if justification.is_none() {
        warn!(table = %table.name, "roster has no justification column; nobody is on leave");
    }

    let mut out = Vec::with_capacity(table.row_count());
    for row in 0..table.row_count() {
        let id = normalize_consultant_id(&RawTable::cell(consultant, row).as_text());
        if id.is_empty() {
            continue;
        }
        let note = justification
            .map(|c| RawTable::cell(c, row).as_text())
            .unwrap_or_default();
        out.push(
            Consultant::new(id, RawTable::cell(team, row).as_text()).with_justification(note),
        );
    }
    debug!(table = %table.name, rows = out.len(), "roster read");
    Ok(out)
}
