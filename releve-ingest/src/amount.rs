//! Numeric coercion for raw amount cells.
//!
//! Statement exports wrap numbers in currency symbols, codes, and grouping
//! separators ("$1,234.56 CAD"). Coercion takes the first numeric token;
//! cells with no token (a blank debit or credit field) coerce to zero.

use std::sync::OnceLock;

use regex::Regex;

fn token_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?P<sign>-)?\s*\$?\s*(?P<num>\d{1,3}(?:,\d{3})+(?:\.\d*)?|\d+(?:\.\d*)?)")
            .expect("amount token regex")
    })
}

/// First numeric token as a non-negative value; blank or non-numeric cells
/// are 0.0.
pub fn unsigned(cell: &str) -> f64 {
    match token(cell) {
        Some((_, value)) => value,
        None => 0.0,
    }
}

/// Like [`unsigned`] but a minus sign ahead of the token is kept.
pub fn signed(cell: &str) -> f64 {
    match token(cell) {
        Some((true, value)) => -value,
        Some((false, value)) => value,
        None => 0.0,
    }
}

fn token(cell: &str) -> Option<(bool, f64)> {
    let caps = token_re().captures(cell)?;
    let raw = caps.name("num")?.as_str().replace(',', "");
    let value: f64 = raw.parse().ok()?;
    Some((caps.name("sign").is_some(), value))
}
