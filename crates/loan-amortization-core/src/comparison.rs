use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::schedule::generate_schedule;
use crate::types::*;
use crate::validation::validate_loan;
use crate::LoanResult;

/// Headline figures of one schedule, without the per-month rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleSummary {
    pub monthly_payment: Money,
    pub extra_payment: Money,
    pub months_to_payoff: u32,
    pub total_interest_paid: Money,
    pub total_paid: Money,
}

/// Standard schedule set against the same loan with a constant extra payment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayoffComparison {
    pub standard: ScheduleSummary,
    pub accelerated: ScheduleSummary,
    pub months_saved: u32,
    pub interest_saved: Money,
}

impl ScheduleSummary {
    fn from_schedule(schedule: &AmortizationResult, extra_payment: Money) -> Self {
        Self {
            monthly_payment: schedule.monthly_payment,
            extra_payment,
            months_to_payoff: schedule.months_to_payoff,
            total_interest_paid: schedule.total_interest_paid,
            total_paid: schedule.total_paid,
        }
    }
}

/// Compare paying the base amount against paying base plus `extra_payment`.
pub fn compare_extra_payment(input: &LoanInput) -> LoanResult<ComputationOutput<PayoffComparison>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate_loan(input)?;

    let standard = generate_schedule(
        input.principal,
        input.annual_rate_pct,
        input.term_years,
        Decimal::ZERO,
    )?;
    let accelerated = generate_schedule(
        input.principal,
        input.annual_rate_pct,
        input.term_years,
        input.extra_payment,
    )?;

    if input.extra_payment.is_zero() {
        warnings.push("Extra payment is zero; both schedules are identical".into());
    }

    let output = PayoffComparison {
        months_saved: standard
            .months_to_payoff
            .saturating_sub(accelerated.months_to_payoff),
        interest_saved: standard.total_interest_paid - accelerated.total_interest_paid,
        standard: ScheduleSummary::from_schedule(&standard, Decimal::ZERO),
        accelerated: ScheduleSummary::from_schedule(&accelerated, input.extra_payment),
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Standard vs. accelerated amortization",
        &loan_assumptions(input),
        warnings,
        elapsed,
        output,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_extra_payment_saves_time_and_interest() {
        let input = LoanInput::new(dec!(10000), dec!(5), 10).with_extra_payment(dec!(100));
        let out = compare_extra_payment(&input).unwrap();
        let cmp = &out.result;
        assert_eq!(cmp.standard.months_to_payoff, 120);
        assert!(cmp.months_saved > 0);
        assert!(cmp.interest_saved > Decimal::ZERO);
        assert_eq!(cmp.accelerated.extra_payment, dec!(100));
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn test_zero_extra_payment_saves_nothing() {
        let input = LoanInput::new(dec!(10000), dec!(5), 10);
        let out = compare_extra_payment(&input).unwrap();
        assert_eq!(out.result.months_saved, 0);
        assert_eq!(out.result.interest_saved, Decimal::ZERO);
        assert_eq!(out.result.standard, out.result.accelerated);
        assert_eq!(out.warnings.len(), 1);
    }

    #[test]
    fn test_invalid_loan_rejected() {
        let input = LoanInput::new(dec!(10000), dec!(-1), 10);
        assert!(compare_extra_payment(&input).is_err());
    }
}
