//! Object layout of the deployment bucket.
//!
//! Each environment gets its own folder: raw per-institution staging
//! objects under `<env>/staging/`, the combined output store under
//! `<env>/output/`. The budget taxonomy objects under `shared/` are
//! read-only to this tool.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Deployment environment folder inside the bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Env {
    Prod,
    Local,
}

impl Env {
    pub fn as_str(self) -> &'static str {
        match self {
            Env::Prod => "prod",
            Env::Local => "local",
        }
    }
}

impl fmt::Display for Env {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown environment {0:?} (expected prod or local)")]
pub struct UnknownEnv(String);

impl FromStr for Env {
    type Err = UnknownEnv;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "prod" => Ok(Env::Prod),
            "local" => Ok(Env::Local),
            other => Err(UnknownEnv(other.to_string())),
        }
    }
}

/// Raw per-institution accumulation object, pre-categorization.
pub fn staging_key(env: Env, staging_file: &str) -> String {
    format!("{env}/staging/{staging_file}")
}

/// Final combined store of categorized transactions.
pub fn output_key(env: Env) -> String {
    format!("{env}/output/combined_transactions.csv")
}

/// Flat list of budget category names.
pub const BUDGET_CATEGORIES_KEY: &str = "shared/budget_categories.csv";
/// Per-category sub-category detail rows.
pub const BUDGET_DETAILS_KEY: &str = "shared/budget_details.csv";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_are_env_scoped() {
        assert_eq!(
            staging_key(Env::Local, "rbc_account.csv"),
            "local/staging/rbc_account.csv"
        );
        assert_eq!(
            output_key(Env::Prod),
            "prod/output/combined_transactions.csv"
        );
    }

    #[test]
    fn test_env_parses_and_displays() {
        assert_eq!("prod".parse::<Env>().unwrap(), Env::Prod);
        assert_eq!("local".parse::<Env>().unwrap(), Env::Local);
        assert!("staging".parse::<Env>().is_err());
        assert_eq!(Env::Local.to_string(), "local");
    }
}
