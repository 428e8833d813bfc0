//! National Bank export parsers (chequing and credit card).
//!
//! Both variants are semicolon-delimited with separate Debit and Credit
//! columns; by source convention exactly one of the two is populated per
//! row. The cells are free-form ("$12.34 CAD"), so amounts go through the
//! numeric-token coercion.

use chrono::NaiveDate;
use releve_core::transaction::{AccountKind, Transaction, TxnKind};

use super::{ParseError, field};
use crate::amount;
use crate::table::RawTable;

const CHECKING_COLUMNS: &[&str] = &["Date", "Description", "Categorie", "Debit", "Credit", "Solde"];
const CREDIT_COLUMNS: &[&str] = &[
    "Date",
    "Numero de Carte",
    "Description",
    "Categorie",
    "Debit",
    "Credit",
];

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Variant {
    Checking,
    Credit,
}

impl Variant {
    pub(super) fn columns(self) -> &'static [&'static str] {
        match self {
            Variant::Checking => CHECKING_COLUMNS,
            Variant::Credit => CREDIT_COLUMNS,
        }
    }

    fn account(self) -> AccountKind {
        match self {
            Variant::Checking => AccountKind::Checking,
            Variant::Credit => AccountKind::CreditCard,
        }
    }
}

pub(super) fn parse(table: &RawTable, variant: Variant) -> Result<Vec<Transaction>, ParseError> {
    let columns = variant.columns();
    if table.column_count() != columns.len() {
        return Err(ParseError::SchemaSize {
            expected: columns.len(),
            found: table.column_count(),
        });
    }
    let date_col = table.column("Date").ok_or(ParseError::MissingColumn("Date"))?;
    let debit_col = table
        .column("Debit")
        .ok_or(ParseError::MissingColumn("Debit"))?;
    let credit_col = table
        .column("Credit")
        .ok_or(ParseError::MissingColumn("Credit"))?;
    let desc_col = table
        .column("Description")
        .ok_or(ParseError::MissingColumn("Description"))?;
    let cat_col = table
        .column("Categorie")
        .ok_or(ParseError::MissingColumn("Categorie"))?;

    let mut out = Vec::new();
    for row in table.rows() {
        let Ok(date) = NaiveDate::parse_from_str(field(row, date_col).trim(), DATE_FORMAT) else {
            continue;
        };
        let debit = amount::unsigned(field(row, debit_col));
        let credit = amount::unsigned(field(row, credit_col));
        // Blank cells coerce to zero, so a row with neither side populated
        // classifies as a zero-amount credit.
        let kind = if debit > 0.0 {
            TxnKind::Expense
        } else {
            TxnKind::Credit
        };
        let description = format!(
            "{} / {}",
            field(row, desc_col).trim(),
            field(row, cat_col).trim()
        );

        out.push(Transaction::uncategorized(
            date,
            "NBC",
            variant.account(),
            kind,
            debit + credit,
            description,
        ));
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn columns(variant: Variant) -> Vec<String> {
        variant.columns().iter().map(|s| s.to_string()).collect()
    }

    fn checking_row(date: &str, desc: &str, cat: &str, debit: &str, credit: &str) -> Vec<String> {
        vec![
            date.to_string(),
            desc.to_string(),
            cat.to_string(),
            debit.to_string(),
            credit.to_string(),
            "1200.00".to_string(),
        ]
    }

    fn credit_row(date: &str, desc: &str, cat: &str, debit: &str, credit: &str) -> Vec<String> {
        vec![
            date.to_string(),
            "**** 2110".to_string(),
            desc.to_string(),
            cat.to_string(),
            debit.to_string(),
            credit.to_string(),
        ]
    }

    #[test]
    fn test_wrong_column_count_rejects_the_file() {
        let mut short = checking_row("2025-03-14", "IGA", "Alimentation", "10.00", "");
        short.pop();
        let table = RawTable::new(columns(Variant::Checking), vec![short]);
        let err = parse(&table, Variant::Checking).unwrap_err();
        assert_eq!(err.code(), 101);
    }

    #[test]
    fn test_missing_required_column_rejects_the_file() {
        for missing in ["Date", "Debit", "Credit", "Description", "Categorie"] {
            let names: Vec<String> = CHECKING_COLUMNS
                .iter()
                .map(|c| {
                    if *c == missing {
                        "Inconnu".to_string()
                    } else {
                        c.to_string()
                    }
                })
                .collect();
            let table = RawTable::new(
                names,
                vec![checking_row("2025-03-14", "IGA", "Alimentation", "10.00", "")],
            );
            let err = parse(&table, Variant::Checking).unwrap_err();
            assert_eq!(err, ParseError::MissingColumn(missing), "case {missing}");
        }
    }

    #[test]
    fn test_debit_with_currency_noise_is_an_expense() {
        let table = RawTable::new(
            columns(Variant::Checking),
            vec![checking_row(
                "2025-03-14",
                "IGA EXPRESS",
                "Alimentation",
                "$12.34 CAD",
                "",
            )],
        );
        let rows = parse(&table, Variant::Checking).unwrap();
        assert_eq!(rows[0].amount, 12.34);
        assert_eq!(rows[0].kind, TxnKind::Expense);
    }

    #[test]
    fn test_credit_side_yields_a_credit() {
        let table = RawTable::new(
            columns(Variant::Checking),
            vec![checking_row("2025-03-14", "PAIE", "Revenus", "", "1250.00")],
        );
        let rows = parse(&table, Variant::Checking).unwrap();
        assert_eq!(rows[0].amount, 1250.00);
        assert_eq!(rows[0].kind, TxnKind::Credit);
    }

    #[test]
    fn test_blank_debit_and_credit_is_a_zero_amount_credit() {
        let table = RawTable::new(
            columns(Variant::Checking),
            vec![checking_row("2025-03-14", "AJUSTEMENT", "", "", "")],
        );
        let rows = parse(&table, Variant::Checking).unwrap();
        assert_eq!(rows[0].amount, 0.0);
        assert_eq!(rows[0].kind, TxnKind::Credit);
    }

    #[test]
    fn test_description_carries_the_category_hint() {
        let table = RawTable::new(
            columns(Variant::Checking),
            vec![checking_row(
                "2025-03-14",
                "IGA EXPRESS",
                "Alimentation",
                "10.00",
                "",
            )],
        );
        let rows = parse(&table, Variant::Checking).unwrap();
        assert_eq!(rows[0].description, "IGA EXPRESS / Alimentation");
    }

    #[test]
    fn test_variant_sets_the_account_kind() {
        let checking = RawTable::new(
            columns(Variant::Checking),
            vec![checking_row("2025-03-14", "IGA", "Alimentation", "10.00", "")],
        );
        let rows = parse(&checking, Variant::Checking).unwrap();
        assert_eq!(rows[0].account, AccountKind::Checking);
        assert_eq!(rows[0].name, "NBC");

        let credit = RawTable::new(
            columns(Variant::Credit),
            vec![credit_row("2025-03-14", "AMAZON.CA", "Achats", "42.50", "")],
        );
        let rows = parse(&credit, Variant::Credit).unwrap();
        assert_eq!(rows[0].account, AccountKind::CreditCard);
        assert_eq!(rows[0].description, "AMAZON.CA / Achats");
    }
}
