use std::fs;
use std::path::Path;

use loan_amortization_core::LoanInput;

use super::{parse_loan, LoanSource};

/// Load a loan from a JSON file, relative paths resolving against the
/// working directory.
pub fn read_loan(path: &str) -> Result<LoanInput, Box<dyn std::error::Error>> {
    let given = Path::new(path);
    let full = if given.is_absolute() {
        given.to_path_buf()
    } else {
        std::env::current_dir()?.join(given)
    };

    if !full.is_file() {
        return Err(format!("Loan file not found: {}", full.display()).into());
    }

    let text = fs::read_to_string(&full)
        .map_err(|e| format!("Cannot read loan file {}: {}", full.display(), e))?;
    parse_loan(&text, LoanSource::File(&full))
}
