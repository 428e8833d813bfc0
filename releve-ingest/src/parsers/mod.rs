//! Per-institution statement parsers.
//!
//! Every parser follows the same contract: validate the raw table's column
//! count, then each required source column in a fixed order, then emit rows
//! restricted to the canonical schema. Validation failures reject the whole
//! file with a status code and never escape the parser boundary.

mod nbc;
mod rbc;
mod scotia;

use releve_core::transaction::{AccountKind, Transaction};

use crate::table::RawTable;

/// Parse succeeded.
pub const STATUS_OK: u16 = 100;
/// Column count differs from the institution's fixed schema.
pub const STATUS_SCHEMA_SIZE: u16 = 101;
/// A required source column is absent.
pub const STATUS_MISSING_COLUMN: u16 = 102;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("column count mismatch: expected {expected}, found {found}")]
    SchemaSize { expected: usize, found: usize },
    #[error("required column missing: {0}")]
    MissingColumn(&'static str),
}

impl ParseError {
    /// Status code reported to callers ([`STATUS_OK`] is success).
    pub fn code(&self) -> u16 {
        match self {
            ParseError::SchemaSize { .. } => STATUS_SCHEMA_SIZE,
            ParseError::MissingColumn(_) => STATUS_MISSING_COLUMN,
        }
    }
}

/// Statement source selected by the operator at import time. Scotia carries
/// the account kind of the product variant being imported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Institution {
    Rbc,
    NbcChecking,
    NbcCredit,
    Scotia(AccountKind),
}

impl Institution {
    /// Fixed source schema of this institution's export.
    pub fn columns(&self) -> &'static [&'static str] {
        match self {
            Institution::Rbc => rbc::COLUMNS,
            Institution::NbcChecking => nbc::Variant::Checking.columns(),
            Institution::NbcCredit => nbc::Variant::Credit.columns(),
            Institution::Scotia(_) => scotia::COLUMNS,
        }
    }

    /// NBC exports are semicolon-delimited; everything else uses commas.
    pub fn delimiter(&self) -> u8 {
        match self {
            Institution::NbcChecking | Institution::NbcCredit => b';',
            _ => b',',
        }
    }

    /// File name of this source's staging object.
    pub fn staging_file(&self) -> &'static str {
        match self {
            Institution::Rbc => "rbc_account.csv",
            Institution::NbcChecking => "nbc_checking.csv",
            Institution::NbcCredit => "nbc_credit.csv",
            Institution::Scotia(AccountKind::CreditCard) => "scotia_credit.csv",
            Institution::Scotia(_) => "scotia_checking.csv",
        }
    }

    /// Read raw export bytes into a table: header skipped, this source's
    /// column names assigned.
    pub fn read_statement(&self, bytes: &[u8]) -> anyhow::Result<RawTable> {
        RawTable::from_csv(bytes, self.columns(), self.delimiter())
    }

    /// Normalize a raw table into canonical transactions, or reject the
    /// whole file.
    pub fn parse(&self, table: &RawTable) -> Result<Vec<Transaction>, ParseError> {
        match self {
            Institution::Rbc => rbc::parse(table),
            Institution::NbcChecking => nbc::parse(table, nbc::Variant::Checking),
            Institution::NbcCredit => nbc::parse(table, nbc::Variant::Credit),
            Institution::Scotia(kind) => scotia::parse(table, kind.clone()),
        }
    }
}

/// Cell text by column index; absent cells read as empty.
pub(crate) fn field<'a>(row: &'a [String], idx: usize) -> &'a str {
    row.get(idx).map(String::as_str).unwrap_or("")
}
