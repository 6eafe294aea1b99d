//! Loan documents supplied as JSON, from a file or piped stdin.
//!
//! Both paths parse straight into `LoanInput`; text that is not a number
//! where one is expected is rejected here, before the core sees it.

pub mod file;
pub mod stdin;

use std::fmt;
use std::path::Path;

use loan_amortization_core::LoanInput;

/// Origin of a loan document.
#[derive(Debug, Clone, Copy)]
pub enum LoanSource<'a> {
    File(&'a Path),
    Stdin,
}

impl fmt::Display for LoanSource<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoanSource::File(path) => write!(f, "'{}'", path.display()),
            LoanSource::Stdin => f.write_str("stdin"),
        }
    }
}

/// Parse a JSON loan document such as
/// `{"principal": "10000", "annual_rate_pct": "5", "term_years": 10}`.
pub fn parse_loan(
    text: &str,
    source: LoanSource<'_>,
) -> Result<LoanInput, Box<dyn std::error::Error>> {
    let loan: LoanInput = serde_json::from_str(text.trim())
        .map_err(|e| format!("Invalid loan document from {source}: {e}"))?;
    log::debug!(
        "loaded loan from {source}: principal {} at {}% for {} years, extra {}",
        loan.principal,
        loan.annual_rate_pct,
        loan.term_years,
        loan.extra_payment
    );
    Ok(loan)
}
