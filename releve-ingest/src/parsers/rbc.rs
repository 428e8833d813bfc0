//! RBC account export parser.
//!
//! Exports mix chequing and credit-card rows in one file; the account-type
//! column tells them apart. Dates are `mm/dd/yyyy`, amounts are signed in
//! the CAD column.

use chrono::NaiveDate;
use releve_core::transaction::{AccountKind, Transaction, TxnKind};

use super::{ParseError, field};
use crate::amount;
use crate::table::RawTable;

pub(super) const COLUMNS: &[&str] = &[
    "Type de compte",
    "Numéro du compte",
    "Date de l'opération",
    "Numéro du chèque",
    "Description 1",
    "Description 2",
    "CAD",
    "USD",
];

const DATE_FORMAT: &str = "%m/%d/%Y";

/// Source account labels with a translation entry; anything else passes
/// through unchanged.
fn account_kind(label: &str) -> AccountKind {
    match label {
        "Chèques" => AccountKind::Checking,
        "MasterCard" => AccountKind::CreditCard,
        other => AccountKind::Other(other.to_string()),
    }
}

pub(super) fn parse(table: &RawTable) -> Result<Vec<Transaction>, ParseError> {
    if table.column_count() != COLUMNS.len() {
        return Err(ParseError::SchemaSize {
            expected: COLUMNS.len(),
            found: table.column_count(),
        });
    }
    let account_col = table
        .column("Type de compte")
        .ok_or(ParseError::MissingColumn("Type de compte"))?;
    let date_col = table
        .column("Date de l'opération")
        .ok_or(ParseError::MissingColumn("Date de l'opération"))?;
    let desc1_col = table
        .column("Description 1")
        .ok_or(ParseError::MissingColumn("Description 1"))?;
    let desc2_col = table
        .column("Description 2")
        .ok_or(ParseError::MissingColumn("Description 2"))?;
    let amount_col = table.column("CAD").ok_or(ParseError::MissingColumn("CAD"))?;

    let mut out = Vec::new();
    for row in table.rows() {
        let Ok(date) = NaiveDate::parse_from_str(field(row, date_col).trim(), DATE_FORMAT) else {
            continue; // blank or trailer line
        };
        let signed = amount::signed(field(row, amount_col));
        let kind = if signed < 0.0 {
            TxnKind::Expense
        } else {
            TxnKind::Credit
        };
        let description = [field(row, desc1_col).trim(), field(row, desc2_col).trim()]
            .iter()
            .filter(|part| !part.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join(" / ");

        out.push(Transaction::uncategorized(
            date,
            "RBC",
            account_kind(field(row, account_col).trim()),
            kind,
            signed.abs(),
            description,
        ));
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn columns() -> Vec<String> {
        COLUMNS.iter().map(|s| s.to_string()).collect()
    }

    fn row(account: &str, date: &str, d1: &str, d2: &str, cad: &str) -> Vec<String> {
        vec![
            account.to_string(),
            "5336995".to_string(),
            date.to_string(),
            String::new(),
            d1.to_string(),
            d2.to_string(),
            cad.to_string(),
            String::new(),
        ]
    }

    #[test]
    fn test_wrong_column_count_rejects_the_file() {
        let mut wide = row("Chèques", "03/14/2025", "A", "", "1.00");
        wide.push("extra".to_string());
        let table = RawTable::new(columns(), vec![wide]);
        let err = parse(&table).unwrap_err();
        assert_eq!(
            err,
            ParseError::SchemaSize {
                expected: 8,
                found: 9
            }
        );
        assert_eq!(err.code(), 101);
    }

    #[test]
    fn test_missing_required_column_rejects_the_file() {
        for missing in [
            "Type de compte",
            "Date de l'opération",
            "Description 1",
            "Description 2",
            "CAD",
        ] {
            let names: Vec<String> = COLUMNS
                .iter()
                .map(|c| {
                    if *c == missing {
                        "Inconnu".to_string()
                    } else {
                        c.to_string()
                    }
                })
                .collect();
            let table = RawTable::new(names, vec![row("Chèques", "03/14/2025", "A", "", "1.00")]);
            let err = parse(&table).unwrap_err();
            assert_eq!(err, ParseError::MissingColumn(missing), "case {missing}");
        }
    }

    #[test]
    fn test_sign_drives_type_and_amount_is_absolute() {
        let table = RawTable::new(
            columns(),
            vec![
                row("Chèques", "03/14/2025", "TIM HORTONS", "", "-42.50"),
                row("Chèques", "03/15/2025", "PAYROLL", "", "30.00"),
            ],
        );
        let rows = parse(&table).unwrap();
        assert_eq!(rows[0].kind, TxnKind::Expense);
        assert_eq!(rows[0].amount, 42.50);
        assert_eq!(rows[1].kind, TxnKind::Credit);
        assert_eq!(rows[1].amount, 30.00);
    }

    #[test]
    fn test_date_is_reemitted_year_first() {
        let table = RawTable::new(
            columns(),
            vec![row("Chèques", "03/14/2025", "A", "", "1.00")],
        );
        let rows = parse(&table).unwrap();
        assert_eq!(rows[0].date.to_string(), "2025-03-14");
    }

    #[test]
    fn test_description_joins_non_empty_parts() {
        let table = RawTable::new(
            columns(),
            vec![
                row("Chèques", "03/14/2025", "AMAZON.CA", "ORDER 123", "-1.00"),
                row("Chèques", "03/15/2025", "TIM HORTONS", "", "-2.00"),
            ],
        );
        let rows = parse(&table).unwrap();
        assert_eq!(rows[0].description, "AMAZON.CA / ORDER 123");
        assert_eq!(rows[1].description, "TIM HORTONS");
    }

    #[test]
    fn test_account_labels_translate_or_pass_through() {
        let table = RawTable::new(
            columns(),
            vec![
                row("Chèques", "03/14/2025", "A", "", "1.00"),
                row("MasterCard", "03/14/2025", "B", "", "1.00"),
                row("Placements", "03/14/2025", "C", "", "1.00"),
            ],
        );
        let rows = parse(&table).unwrap();
        assert_eq!(rows[0].account, AccountKind::Checking);
        assert_eq!(rows[1].account, AccountKind::CreditCard);
        assert_eq!(rows[2].account, AccountKind::Other("Placements".to_string()));
    }

    #[test]
    fn test_unparseable_date_rows_are_skipped() {
        let table = RawTable::new(
            columns(),
            vec![
                row("Chèques", "not a date", "A", "", "1.00"),
                row("Chèques", "03/14/2025", "B", "", "1.00"),
            ],
        );
        let rows = parse(&table).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].description, "B");
    }

    #[test]
    fn test_fixed_fields_and_name_tag() {
        let table = RawTable::new(
            columns(),
            vec![row("Chèques", "03/14/2025", "A", "", "1.00")],
        );
        let rows = parse(&table).unwrap();
        assert_eq!(rows[0].name, "RBC");
        assert!(rows[0].category.is_empty());
        assert!(rows[0].sub_category.is_empty());
        assert!(!rows[0].to_ignore);
    }
}
