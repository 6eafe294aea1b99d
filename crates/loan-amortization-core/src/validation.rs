use rust_decimal::Decimal;

use crate::error::LoanError;
use crate::types::{LoanInput, Money};
use crate::LoanResult;

/// Longest loan term accepted by `validate_loan`.
pub const MAX_TERM_YEARS: i32 = 100;

/// Quick yes/no check of the three loan terms.
///
/// A zero rate is valid (interest-free loan); only negative rates are rejected.
pub fn validate_inputs(principal: Money, annual_rate_pct: Decimal, term_years: i32) -> bool {
    !(principal <= Decimal::ZERO || annual_rate_pct < Decimal::ZERO || term_years <= 0)
}

/// Validate a full loan description, naming the offending field.
///
/// Also rejects a negative extra payment, which would shrink the
/// periodic payment below the amortizing amount.
pub fn validate_loan(input: &LoanInput) -> LoanResult<()> {
    if input.principal <= Decimal::ZERO {
        return Err(LoanError::InvalidInput {
            field: "principal".into(),
            reason: "Principal must be positive".into(),
        });
    }
    if input.annual_rate_pct < Decimal::ZERO {
        return Err(LoanError::InvalidInput {
            field: "annual_rate_pct".into(),
            reason: "Annual rate cannot be negative".into(),
        });
    }
    if input.term_years <= 0 {
        return Err(LoanError::InvalidInput {
            field: "term_years".into(),
            reason: "Term must be at least 1 year".into(),
        });
    }
    if input.term_years > MAX_TERM_YEARS {
        return Err(LoanError::InvalidInput {
            field: "term_years".into(),
            reason: format!("Term cannot exceed {MAX_TERM_YEARS} years"),
        });
    }
    if input.extra_payment < Decimal::ZERO {
        return Err(LoanError::InvalidInput {
            field: "extra_payment".into(),
            reason: "Extra payment cannot be negative".into(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_validate_inputs_known_cases() {
        assert!(validate_inputs(dec!(10000), dec!(5), 10));
        assert!(!validate_inputs(dec!(-10000), dec!(5), 10));
        assert!(!validate_inputs(dec!(10000), dec!(-5), 10));
        assert!(!validate_inputs(dec!(10000), dec!(5), -10));
    }

    #[test]
    fn test_validate_inputs_boundaries() {
        assert!(!validate_inputs(Decimal::ZERO, dec!(5), 10));
        assert!(!validate_inputs(dec!(10000), dec!(5), 0));
        // Interest-free loans are allowed
        assert!(validate_inputs(dec!(10000), Decimal::ZERO, 1));
    }

    #[test]
    fn test_validate_loan_names_field() {
        let input = LoanInput::new(dec!(10000), dec!(5), 0);
        match validate_loan(&input).unwrap_err() {
            LoanError::InvalidInput { field, .. } => assert_eq!(field, "term_years"),
            other => panic!("Expected InvalidInput for term_years, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_loan_rejects_excessive_term() {
        let input = LoanInput::new(dec!(10000), dec!(5), 2_000_000_000);
        match validate_loan(&input).unwrap_err() {
            LoanError::InvalidInput { field, .. } => assert_eq!(field, "term_years"),
            other => panic!("Expected InvalidInput for term_years, got {other:?}"),
        }
        assert!(validate_loan(&LoanInput::new(dec!(10000), dec!(5), MAX_TERM_YEARS)).is_ok());
    }

    #[test]
    fn test_validate_loan_rejects_negative_extra() {
        let input = LoanInput::new(dec!(10000), dec!(5), 10).with_extra_payment(dec!(-50));
        match validate_loan(&input).unwrap_err() {
            LoanError::InvalidInput { field, .. } => assert_eq!(field, "extra_payment"),
            other => panic!("Expected InvalidInput for extra_payment, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_loan_accepts_zero_extra() {
        let input = LoanInput::new(dec!(10000), dec!(5), 10);
        assert!(validate_loan(&input).is_ok());
    }
}
