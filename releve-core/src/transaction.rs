//! The canonical transaction record every statement source is normalized
//! into.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Column order of the persisted canonical CSV. The committed output store
/// drops the trailing `To Ignore` column.
pub const CANONICAL_COLUMNS: [&str; 9] = [
    "Date",
    "Name",
    "Account",
    "Type",
    "Category",
    "Sub Category",
    "Amount",
    "Description",
    "To Ignore",
];

/// Kind of account a row came from.
///
/// `Other` carries source labels with no translation entry through
/// unchanged, which is what the RBC account-type mapping calls for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AccountKind {
    Checking,
    CreditCard,
    Other(String),
}

impl AccountKind {
    pub fn as_str(&self) -> &str {
        match self {
            AccountKind::Checking => "Checking",
            AccountKind::CreditCard => "Credit Card",
            AccountKind::Other(label) => label,
        }
    }

    pub fn from_label(label: &str) -> Self {
        match label {
            "Checking" => AccountKind::Checking,
            "Credit Card" => AccountKind::CreditCard,
            other => AccountKind::Other(other.to_string()),
        }
    }
}

impl From<String> for AccountKind {
    fn from(label: String) -> Self {
        AccountKind::from_label(&label)
    }
}

impl From<AccountKind> for String {
    fn from(kind: AccountKind) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for AccountKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Direction of money movement. The sign lives here; `amount` is always
/// non-negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TxnKind {
    #[serde(rename = "expense")]
    Expense,
    #[serde(rename = "credit")]
    Credit,
}

impl TxnKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TxnKind::Expense => "expense",
            TxnKind::Credit => "credit",
        }
    }
}

impl fmt::Display for TxnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One financial event in the canonical schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub date: NaiveDate,
    /// Source institution tag, fixed per parser.
    pub name: String,
    pub account: AccountKind,
    pub kind: TxnKind,
    /// Empty until classified by the operator.
    pub category: String,
    /// Empty until classified; must belong to the category's allowed set.
    pub sub_category: String,
    pub amount: f64,
    pub description: String,
    /// Operator flag; flagged rows are excluded from the final commit.
    pub to_ignore: bool,
}

impl Transaction {
    /// A freshly parsed row: classification fields empty, not ignored.
    pub fn uncategorized(
        date: NaiveDate,
        name: impl Into<String>,
        account: AccountKind,
        kind: TxnKind,
        amount: f64,
        description: impl Into<String>,
    ) -> Self {
        Self {
            date,
            name: name.into(),
            account,
            kind,
            category: String::new(),
            sub_category: String::new(),
            amount,
            description: description.into(),
            to_ignore: false,
        }
    }

    pub fn is_classified(&self) -> bool {
        !self.category.is_empty() && !self.sub_category.is_empty()
    }
}
