use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::{overflow, LoanError};
use crate::types::*;
use crate::validation::validate_loan;
use crate::LoanResult;

const MONTHS_PER_YEAR: u32 = 12;

/// Output of the payment calculation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentOutput {
    /// Fixed monthly payment that fully amortizes the loan over its term.
    pub monthly_payment: Money,
    /// Monthly payment once the extra payment is added.
    pub monthly_payment_with_extra: Money,
    pub total_periods: u32,
    pub monthly_rate: Rate,
}

/// Convert an annual percentage rate (5.0 = 5%) into a monthly decimal rate.
pub fn monthly_rate(annual_rate_pct: Decimal) -> Rate {
    annual_rate_pct / dec!(100) / Decimal::from(MONTHS_PER_YEAR)
}

/// Number of monthly periods in a term. Non-positive terms map to zero.
pub fn total_periods(term_years: i32) -> u32 {
    u32::try_from(term_years)
        .unwrap_or(0)
        .saturating_mul(MONTHS_PER_YEAR)
}

/// Fixed monthly payment for a fully amortizing loan.
///
/// Uses straight-line repayment when the rate is zero and the annuity
/// formula `P * r / (1 - (1 + r)^-n)` otherwise. Inputs are not validated
/// beyond refusing a zero-period term.
pub fn monthly_payment(
    principal: Money,
    annual_rate_pct: Decimal,
    term_years: i32,
) -> LoanResult<Money> {
    let nper = total_periods(term_years);
    if nper == 0 {
        return Err(LoanError::DivisionByZero {
            context: "monthly payment over zero periods".into(),
        });
    }

    let rate = monthly_rate(annual_rate_pct);
    if rate.is_zero() {
        return Ok(principal / Decimal::from(nper));
    }

    let one_plus_r = Decimal::ONE + rate;
    if one_plus_r.is_zero() {
        return Err(LoanError::DivisionByZero {
            context: "annuity discount base".into(),
        });
    }

    // (1 + r)^-n, computed as (1 / (1 + r))^n so long terms underflow to zero
    // instead of overflowing.
    let discount = pow_decimal(Decimal::ONE / one_plus_r, nper);
    let annuity_denominator = Decimal::ONE - discount;
    if annuity_denominator.is_zero() {
        return Err(LoanError::DivisionByZero {
            context: "annuity factor".into(),
        });
    }

    principal
        .checked_mul(rate)
        .and_then(|interest| interest.checked_div(annuity_denominator))
        .ok_or_else(|| overflow("annuity payment"))
}

/// Validate a loan and compute its monthly payment.
pub fn calculate_payment(input: &LoanInput) -> LoanResult<ComputationOutput<PaymentOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate_loan(input)?;

    let payment = monthly_payment(input.principal, input.annual_rate_pct, input.term_years)?;
    let rate = monthly_rate(input.annual_rate_pct);

    let methodology = if rate.is_zero() {
        warnings.push("Zero interest rate; payment is straight-line principal".into());
        "Straight-line repayment"
    } else {
        "Level-payment annuity (monthly compounding)"
    };

    let output = PaymentOutput {
        monthly_payment: payment,
        monthly_payment_with_extra: payment
            .checked_add(input.extra_payment)
            .ok_or_else(|| overflow("payment with extra"))?,
        total_periods: total_periods(input.term_years),
        monthly_rate: rate,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        methodology,
        &loan_assumptions(input),
        warnings,
        elapsed,
        output,
    ))
}

/// Integer power of a Decimal via exponentiation by squaring (avoids powd precision drift).
pub(crate) fn pow_decimal(base: Decimal, exp: u32) -> Decimal {
    let mut result = Decimal::ONE;
    let mut b = base;
    let mut e = exp;
    while e > 0 {
        if e & 1 == 1 {
            result *= b;
        }
        e >>= 1;
        if e > 0 {
            b *= b;
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_monthly_payment_ten_year_loan() {
        // 10,000 at 5% over 10 years ≈ 106.07
        let pmt = monthly_payment(dec!(10000), dec!(5), 10).unwrap();
        assert!((pmt - dec!(106.07)).abs() < dec!(0.01), "got {pmt}");
    }

    #[test]
    fn test_monthly_payment_five_year_loan() {
        // 5,000 at 3% over 5 years ≈ 89.84
        let pmt = monthly_payment(dec!(5000), dec!(3), 5).unwrap();
        assert!((pmt - dec!(89.84)).abs() < dec!(0.01), "got {pmt}");
    }

    #[test]
    fn test_zero_rate_is_straight_line() {
        let pmt = monthly_payment(dec!(12000), Decimal::ZERO, 10).unwrap();
        assert_eq!(pmt, dec!(100));
    }

    #[test]
    fn test_zero_term_is_division_error() {
        let err = monthly_payment(dec!(10000), dec!(5), 0).unwrap_err();
        assert!(matches!(err, LoanError::DivisionByZero { .. }));
    }

    #[test]
    fn test_monthly_rate_conversion() {
        assert_eq!(monthly_rate(dec!(12)), dec!(0.01));
        assert_eq!(total_periods(30), 360);
        assert_eq!(total_periods(-3), 0);
    }

    #[test]
    fn test_pow_decimal() {
        assert_eq!(pow_decimal(dec!(1.1), 0), Decimal::ONE);
        assert_eq!(pow_decimal(dec!(1.1), 2), dec!(1.21));
        assert_eq!(pow_decimal(dec!(2), 10), dec!(1024));
    }

    #[test]
    fn test_calculate_payment_envelope() {
        let input = LoanInput::new(dec!(10000), dec!(5), 10).with_extra_payment(dec!(100));
        let out = calculate_payment(&input).unwrap();
        assert_eq!(out.result.total_periods, 120);
        assert_eq!(
            out.result.monthly_payment_with_extra,
            out.result.monthly_payment + dec!(100)
        );
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn test_calculate_payment_rejects_invalid() {
        let input = LoanInput::new(dec!(-1), dec!(5), 10);
        assert!(calculate_payment(&input).is_err());
    }

    #[test]
    fn test_oversized_rate_reports_overflow() {
        let err = monthly_payment(Decimal::MAX, Decimal::MAX, 1).unwrap_err();
        assert!(matches!(err, LoanError::ArithmeticOverflow { .. }), "got {err:?}");
    }

    #[test]
    fn test_calculate_payment_zero_rate_warns() {
        let input = LoanInput::new(dec!(1200), Decimal::ZERO, 1);
        let out = calculate_payment(&input).unwrap();
        assert_eq!(out.result.monthly_payment, dec!(100));
        assert!(out.warnings.iter().any(|w| w.contains("Zero interest")));
    }
}
