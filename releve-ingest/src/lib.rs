//! releve-ingest: raw statement tables, amount-field coercion, and the
//! per-institution parsers.

pub mod amount;
pub mod parsers;
pub mod table;

pub use parsers::{
    Institution, ParseError, STATUS_MISSING_COLUMN, STATUS_OK, STATUS_SCHEMA_SIZE,
};
pub use table::RawTable;
