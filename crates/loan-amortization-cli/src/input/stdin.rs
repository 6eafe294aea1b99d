use std::io::{self, Read};

use loan_amortization_core::LoanInput;

use super::{parse_loan, LoanSource};

/// Load a loan piped in on stdin. `None` when stdin is a terminal or carries
/// nothing, so the caller can fall back to flags.
pub fn read_loan() -> Result<Option<LoanInput>, Box<dyn std::error::Error>> {
    if atty::is(atty::Stream::Stdin) {
        log::debug!("stdin is a terminal; no piped loan");
        return Ok(None);
    }

    let mut text = String::new();
    io::stdin().read_to_string(&mut text)?;
    if text.trim().is_empty() {
        return Ok(None);
    }

    parse_loan(&text, LoanSource::Stdin).map(Some)
}
