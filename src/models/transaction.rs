//! Transaction model.
//!
//! One record per sale event. Several records per consultant are
//! expected; the summarizer folds them into a [`super::SalesSummary`].

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Client-type tag of a sale.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClientType {
    /// Sale to a new client ("Novo").
    New,
    /// Sale to an existing client ("Existente").
    Existing,
    /// Any other tag. Kept for diagnostics, ignored for bucket totals.
    Other(String),
}

impl ClientType {
    /// Parses a raw tag (trimmed, case-insensitive).
    ///
    /// Accepts the Portuguese workbook tags and their English equivalents.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_uppercase().as_str() {
            "NOVO" | "NEW" => ClientType::New,
            "EXISTENTE" | "EXISTING" => ClientType::Existing,
            _ => ClientType::Other(raw.trim().to_string()),
        }
    }

    /// Whether the tag is one of the two recognized buckets.
    pub fn is_recognized(&self) -> bool {
        !matches!(self, ClientType::Other(_))
    }
}

/// A single sale event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Normalized consultant identifier (trimmed, upper-cased).
    pub consultant_id: String,
    pub client_type: ClientType,
    /// Sale amount.
    pub amount: Decimal,
}

impl Transaction {
    /// Creates a transaction.
    pub fn new(consultant_id: impl Into<String>, client_type: ClientType, amount: Decimal) -> Self {
        Self {
            consultant_id: consultant_id.into(),
            client_type,
            amount,
        }
    }
}
