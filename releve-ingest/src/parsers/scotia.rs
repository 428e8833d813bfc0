//! Scotiabank export parser.
//!
//! One export format covers both Scotia products, so the account kind is
//! passed in by the caller. The operation-type column uses the localized
//! labels of the export (note the curly apostrophe in its header).

use chrono::NaiveDate;
use releve_core::transaction::{AccountKind, Transaction, TxnKind};

use super::{ParseError, field};
use crate::amount;
use crate::table::RawTable;

pub(super) const COLUMNS: &[&str] = &[
    "Filtre",
    "Date",
    "Description",
    "Sous-description",
    "Type d’opération",
    "Montant",
    "Solde",
];

/// Localized operation label marking a withdrawal; anything else is a
/// credit.
const DEBIT_LABEL: &str = "Débit";

const DATE_FORMAT: &str = "%Y-%m-%d";

pub(super) fn parse(table: &RawTable, account: AccountKind) -> Result<Vec<Transaction>, ParseError> {
    if table.column_count() != COLUMNS.len() {
        return Err(ParseError::SchemaSize {
            expected: COLUMNS.len(),
            found: table.column_count(),
        });
    }
    let date_col = table.column("Date").ok_or(ParseError::MissingColumn("Date"))?;
    let op_col = table
        .column("Type d’opération")
        .ok_or(ParseError::MissingColumn("Type d’opération"))?;
    let desc_col = table
        .column("Description")
        .ok_or(ParseError::MissingColumn("Description"))?;
    let sub_col = table
        .column("Sous-description")
        .ok_or(ParseError::MissingColumn("Sous-description"))?;
    let amount_col = table
        .column("Montant")
        .ok_or(ParseError::MissingColumn("Montant"))?;

    let mut out = Vec::new();
    for row in table.rows() {
        let Ok(date) = NaiveDate::parse_from_str(field(row, date_col).trim(), DATE_FORMAT) else {
            continue;
        };
        let kind = if field(row, op_col).trim() == DEBIT_LABEL {
            TxnKind::Expense
        } else {
            TxnKind::Credit
        };
        let description = format!(
            "{} / {}",
            field(row, desc_col).trim(),
            field(row, sub_col).trim()
        );

        out.push(Transaction::uncategorized(
            date,
            "Scotia",
            account.clone(),
            kind,
            amount::signed(field(row, amount_col)).abs(),
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

    fn row(date: &str, desc: &str, sub: &str, op: &str, montant: &str) -> Vec<String> {
        vec![
            String::new(),
            date.to_string(),
            desc.to_string(),
            sub.to_string(),
            op.to_string(),
            montant.to_string(),
            "850.00".to_string(),
        ]
    }

    #[test]
    fn test_wrong_column_count_rejects_the_file() {
        let mut wide = row("2025-03-14", "A", "B", "Débit", "-5.00");
        wide.push("extra".to_string());
        let table = RawTable::new(columns(), vec![wide]);
        let err = parse(&table, AccountKind::Checking).unwrap_err();
        assert_eq!(err.code(), 101);
    }

    #[test]
    fn test_missing_required_column_rejects_the_file() {
        for missing in [
            "Date",
            "Type d’opération",
            "Description",
            "Sous-description",
            "Montant",
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
            let table = RawTable::new(names, vec![row("2025-03-14", "A", "B", "Débit", "-5.00")]);
            let err = parse(&table, AccountKind::Checking).unwrap_err();
            assert_eq!(err, ParseError::MissingColumn(missing), "case {missing}");
        }
    }

    #[test]
    fn test_debit_label_drives_the_type() {
        let table = RawTable::new(
            columns(),
            vec![
                row("2025-03-14", "TIM HORTONS", "ACHAT", "Débit", "-4.85"),
                row("2025-03-15", "DEPOT", "VIREMENT", "Crédit", "500.00"),
                row("2025-03-16", "FRAIS", "", "Autre", "2.00"),
            ],
        );
        let rows = parse(&table, AccountKind::Checking).unwrap();
        assert_eq!(rows[0].kind, TxnKind::Expense);
        assert_eq!(rows[1].kind, TxnKind::Credit);
        // any non-debit label is a credit
        assert_eq!(rows[2].kind, TxnKind::Credit);
    }

    #[test]
    fn test_amount_is_absolute() {
        let table = RawTable::new(
            columns(),
            vec![row("2025-03-14", "TIM HORTONS", "ACHAT", "Débit", "-4.85")],
        );
        let rows = parse(&table, AccountKind::Checking).unwrap();
        assert_eq!(rows[0].amount, 4.85);
    }

    #[test]
    fn test_description_joins_sub_description() {
        let table = RawTable::new(
            columns(),
            vec![row("2025-03-14", "TIM HORTONS", "ACHAT", "Débit", "-4.85")],
        );
        let rows = parse(&table, AccountKind::Checking).unwrap();
        assert_eq!(rows[0].description, "TIM HORTONS / ACHAT");
    }

    #[test]
    fn test_account_kind_comes_from_the_caller() {
        let table = RawTable::new(
            columns(),
            vec![row("2025-03-14", "A", "B", "Débit", "-5.00")],
        );
        let rows = parse(&table, AccountKind::CreditCard).unwrap();
        assert_eq!(rows[0].account, AccountKind::CreditCard);
        assert_eq!(rows[0].name, "Scotia");
    }
}
