//! CSV codec for the canonical transaction schema.

use releve_core::transaction::{CANONICAL_COLUMNS, Transaction};

use crate::object_store::StoreError;

/// Staging stores keep the full canonical column set.
pub const STAGING_COLUMNS: &[&str] = &CANONICAL_COLUMNS;

/// The committed output store drops `To Ignore`.
pub const OUTPUT_COLUMNS: &[&str] = &[
    "Date",
    "Name",
    "Account",
    "Type",
    "Category",
    "Sub Category",
    "Amount",
    "Description",
];

/// Serialize rows for a staging object.
pub fn staging_records(rows: &[Transaction]) -> Vec<Vec<String>> {
    rows.iter().map(staging_record).collect()
}

/// Serialize rows for the committed output object.
pub fn output_records(rows: &[Transaction]) -> Vec<Vec<String>> {
    rows.iter().map(output_record).collect()
}

fn staging_record(row: &Transaction) -> Vec<String> {
    let mut record = output_record(row);
    record.push(row.to_ignore.to_string());
    record
}

fn output_record(row: &Transaction) -> Vec<String> {
    vec![
        row.date.format("%Y-%m-%d").to_string(),
        row.name.clone(),
        row.account.as_str().to_string(),
        row.kind.as_str().to_string(),
        row.category.clone(),
        row.sub_category.clone(),
        format_amount(row.amount),
        row.description.clone(),
    ]
}

/// Two-decimal money formatting keeps serialized rows byte-stable across
/// imports, which full-row dedup depends on.
fn format_amount(amount: f64) -> String {
    format!("{amount:.2}")
}

/// Encode a header and records to CSV bytes.
pub fn encode(header: &[&str], records: &[Vec<String>]) -> Result<Vec<u8>, StoreError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(header)?;
    for record in records {
        writer.write_record(record)?;
    }
    writer
        .into_inner()
        .map_err(|e| StoreError::Transport(e.to_string()))
}

/// Decode CSV bytes into a header row and data records.
pub fn decode(bytes: &[u8]) -> Result<(Vec<String>, Vec<Vec<String>>), StoreError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(bytes);
    let mut header = Vec::new();
    let mut records = Vec::new();
    for (i, result) in reader.records().enumerate() {
        let record: Vec<String> = result?.iter().map(str::to_string).collect();
        if i == 0 {
            header = record;
        } else {
            records.push(record);
        }
    }
    Ok((header, records))
}
