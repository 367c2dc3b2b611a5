//! Sales summarizer.
//!
//! Folds transactions into one [`SalesSummary`] per consultant:
//! New = Σ New-tagged amounts, Existing = Σ Existing-tagged amounts,
//! Total = New + Existing. Unrecognized client-type tags contribute to
//! none of the three.
//!
//! Pure: identical input yields identical output, ordered by consultant
//! identifier. Sums that leave the `Decimal` range fail with
//! [`LeadQueueError::AmountOverflow`].

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use tracing::debug;

use crate::error::{LeadQueueError, Result};
use crate::models::{ClientType, Period, SalesSummary, Transaction};
use crate::schema;
use crate::table::RawTable;

/// Summarizes typed transactions.
///
/// Empty input yields an empty collection.
pub fn summarize(transactions: &[Transaction]) -> Result<Vec<SalesSummary>> {
    let mut buckets: BTreeMap<&str, (Decimal, Decimal)> = BTreeMap::new();

    for tx in transactions {
        let entry = buckets
            .entry(tx.consultant_id.as_str())
            .or_insert((Decimal::ZERO, Decimal::ZERO));
        let slot = match tx.client_type {
            ClientType::New => &mut entry.0,
            ClientType::Existing => &mut entry.1,
            ClientType::Other(_) => continue,
        };
        *slot = slot
            .checked_add(tx.amount)
            .ok_or_else(|| overflow(&tx.consultant_id))?;
    }

    buckets
        .into_iter()
        .map(|(id, (new, existing))| {
            SalesSummary::checked(id, new, existing).ok_or_else(|| overflow(id))
        })
        .collect()
}

fn overflow(consultant_id: &str) -> LeadQueueError {
    LeadQueueError::AmountOverflow {
        consultant: consultant_id.to_string(),
    }
}

/// Resolves and summarizes one period's raw transaction table.
///
/// An absent or row-less table yields an empty collection. A table without a
/// resolvable sale-amount column fails with
/// [`crate::LeadQueueError::MissingValueColumn`].
pub fn summarize_table(table: Option<&RawTable>, period: Period) -> Result<Vec<SalesSummary>> {
    let Some(table) = table else {
        return Ok(Vec::new());
    };
    if table.is_empty() {
        return Ok(Vec::new());
    }
    let transactions = schema::read_transactions(table)?;
    let summaries = summarize(&transactions)?;
    debug!(
        period = period.table_name(),
        transactions = transactions.len(),
        consultants = summaries.len(),
        "period summarized"
    );
    Ok(summaries)
}
