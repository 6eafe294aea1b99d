//! Month-by-month amortization of a fixed-rate loan.
//!
//! Each month accrues interest on the opening balance, applies the base
//! payment plus any extra payment, and clamps the payoff month so the
//! balance lands on exactly zero. All math in `rust_decimal::Decimal`.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::time::Instant;

use crate::error::{overflow, LoanError};
use crate::payment::{monthly_payment, monthly_rate, total_periods};
use crate::types::*;
use crate::validation::validate_loan;
use crate::LoanResult;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Remaining balance at or below this is treated as fully repaid.
pub const BALANCE_EPSILON: Decimal = dec!(0.000001);

/// Residue, relative to principal, cleared in the last scheduled month.
const FINAL_RESIDUE_TOLERANCE: Decimal = dec!(0.000000000001);

/// Upper bound on the up-front entry reservation (100 years of months).
const MAX_PREALLOCATED_MONTHS: u32 = 1200;

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Generate the amortization schedule for a loan.
///
/// Validates the inputs, derives the base payment, then amortizes until
/// the balance reaches zero. Fails with `NonTerminatingSchedule` rather
/// than looping when a month would not reduce the balance.
pub fn generate_schedule(
    principal: Money,
    annual_rate_pct: Decimal,
    term_years: i32,
    extra_payment: Money,
) -> LoanResult<AmortizationResult> {
    let input = LoanInput {
        principal,
        annual_rate_pct,
        term_years,
        extra_payment,
    };
    validate_loan(&input)?;

    let base_payment = monthly_payment(principal, annual_rate_pct, term_years)?;
    amortize(
        principal,
        monthly_rate(annual_rate_pct),
        base_payment,
        extra_payment,
        total_periods(term_years),
    )
}

/// Amortize a balance with an explicit base payment.
///
/// `max_months` bounds the loop; a schedule still open after that many
/// months is reported as non-terminating. In the last allowed month a
/// rounding residue up to `principal * FINAL_RESIDUE_TOLERANCE` is cleared
/// by the payoff clamp.
pub fn amortize(
    principal: Money,
    monthly_rate: Rate,
    base_payment: Money,
    extra_payment: Money,
    max_months: u32,
) -> LoanResult<AmortizationResult> {
    let mut entries: Vec<ScheduleEntry> =
        Vec::with_capacity(max_months.min(MAX_PREALLOCATED_MONTHS) as usize);
    let mut balance = principal;
    let mut total_interest_paid = Decimal::ZERO;
    let mut total_paid = Decimal::ZERO;

    let nominal_payment = base_payment
        .checked_add(extra_payment)
        .ok_or_else(|| overflow("base plus extra payment"))?;
    let final_residue = BALANCE_EPSILON.max(
        principal
            .checked_mul(FINAL_RESIDUE_TOLERANCE)
            .ok_or_else(|| overflow("final residue tolerance"))?,
    );

    while balance > Decimal::ZERO {
        let month = entries.len() as u32 + 1;
        if month > max_months {
            return Err(LoanError::NonTerminatingSchedule {
                month,
                reason: format!("balance {balance} still outstanding after {max_months} months"),
            });
        }

        let interest = balance
            .checked_mul(monthly_rate)
            .ok_or_else(|| overflow("monthly interest"))?;
        let mut principal_portion = nominal_payment - interest;
        if principal_portion <= Decimal::ZERO {
            return Err(LoanError::NonTerminatingSchedule {
                month,
                reason: format!("payment {nominal_payment} does not cover interest {interest}"),
            });
        }

        let payoff_threshold = if month == max_months {
            final_residue
        } else {
            BALANCE_EPSILON
        };

        let mut payment = nominal_payment;
        if balance - principal_portion <= payoff_threshold {
            // Payoff month: never repay more than is outstanding
            principal_portion = balance;
            payment = interest
                .checked_add(principal_portion)
                .ok_or_else(|| overflow("payoff payment"))?;
        }

        balance -= principal_portion;
        total_interest_paid = total_interest_paid
            .checked_add(interest)
            .ok_or_else(|| overflow("total interest paid"))?;
        total_paid = total_paid
            .checked_add(payment)
            .ok_or_else(|| overflow("total paid"))?;

        entries.push(ScheduleEntry {
            month,
            payment,
            interest,
            principal: principal_portion,
            balance,
        });
    }

    Ok(AmortizationResult {
        monthly_payment: base_payment,
        months_to_payoff: entries.len() as u32,
        entries,
        total_interest_paid,
        total_paid,
    })
}

/// Validate a loan and build its schedule inside the standard envelope.
pub fn build_amortization_schedule(
    input: &LoanInput,
) -> LoanResult<ComputationOutput<AmortizationResult>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let schedule = generate_schedule(
        input.principal,
        input.annual_rate_pct,
        input.term_years,
        input.extra_payment,
    )?;

    if input.annual_rate_pct.is_zero() {
        warnings.push("Zero interest rate; schedule carries no interest".into());
    }
    let scheduled = total_periods(input.term_years);
    if schedule.months_to_payoff < scheduled {
        warnings.push(format!(
            "Extra payment retires the loan after {} of {scheduled} months",
            schedule.months_to_payoff
        ));
    }

    let methodology = if input.extra_payment.is_zero() {
        "Standard amortization schedule"
    } else {
        "Accelerated amortization schedule (constant extra payment)"
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        methodology,
        &loan_assumptions(input),
        warnings,
        elapsed,
        schedule,
    ))
}

/// Month vs. remaining balance, for charting.
pub fn balance_curve(schedule: &AmortizationResult) -> Vec<(u32, Money)> {
    schedule
        .entries
        .iter()
        .map(|e| (e.month, e.balance))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_standard_schedule_length() {
        let sched = generate_schedule(dec!(10000), dec!(5), 10, Decimal::ZERO).unwrap();
        assert_eq!(sched.entries.len(), 120);
        assert_eq!(sched.months_to_payoff, 120);
        assert!(sched.total_interest_paid > Decimal::ZERO);
    }

    #[test]
    fn test_first_month_split() {
        let sched = generate_schedule(dec!(12000), dec!(12), 1, Decimal::ZERO).unwrap();
        let first = &sched.entries[0];
        // 1% of 12,000
        assert_eq!(first.interest, dec!(120));
        assert_eq!(first.principal, sched.monthly_payment - dec!(120));
        assert_eq!(first.balance, dec!(12000) - first.principal);
        assert_eq!(first.month, 1);
    }

    #[test]
    fn test_final_balance_is_zero() {
        let sched = generate_schedule(dec!(250000), dec!(6.5), 30, dec!(150)).unwrap();
        let last = sched.entries.last().unwrap();
        assert_eq!(last.balance, Decimal::ZERO);
    }

    #[test]
    fn test_payoff_month_payment_is_clamped() {
        let sched = generate_schedule(dec!(10000), dec!(5), 10, dec!(100)).unwrap();
        let last = sched.entries.last().unwrap();
        let nominal = sched.monthly_payment + dec!(100);
        assert!(last.payment < nominal);
        assert_eq!(last.payment, last.interest + last.principal);
    }

    #[test]
    fn test_insufficient_payment_is_rejected() {
        // 1% monthly on 10,000 is 100 of interest; a 100 payment never amortizes
        let err = amortize(dec!(10000), dec!(0.01), dec!(100), Decimal::ZERO, 360).unwrap_err();
        match err {
            LoanError::NonTerminatingSchedule { month, .. } => assert_eq!(month, 1),
            other => panic!("Expected NonTerminatingSchedule, got {other:?}"),
        }
    }

    #[test]
    fn test_month_cap_is_enforced() {
        // Amortizes, but needs far more than 12 months
        let err = amortize(dec!(10000), dec!(0.01), dec!(101), Decimal::ZERO, 12).unwrap_err();
        match err {
            LoanError::NonTerminatingSchedule { month, .. } => assert_eq!(month, 13),
            other => panic!("Expected NonTerminatingSchedule, got {other:?}"),
        }
    }

    #[test]
    fn test_final_month_clears_relative_residue() {
        // Twelve payments leave 0.5 outstanding, under 1e-12 of the principal
        let sched = amortize(
            dec!(1000000000000),
            Decimal::ZERO,
            dec!(83333333333.2916666666666667),
            Decimal::ZERO,
            12,
        )
        .unwrap();
        assert_eq!(sched.entries.len(), 12);
        assert_eq!(sched.entries[11].balance, Decimal::ZERO);
    }

    #[test]
    fn test_large_final_residue_still_fails() {
        // Twelve payments leave 12 outstanding, well above the tolerance
        let err = amortize(dec!(1200), Decimal::ZERO, dec!(99), Decimal::ZERO, 12).unwrap_err();
        assert!(matches!(err, LoanError::NonTerminatingSchedule { month: 13, .. }));
    }

    #[test]
    fn test_invalid_inputs_rejected() {
        assert!(generate_schedule(dec!(-1), dec!(5), 10, Decimal::ZERO).is_err());
        assert!(generate_schedule(dec!(1000), dec!(-5), 10, Decimal::ZERO).is_err());
        assert!(generate_schedule(dec!(1000), dec!(5), 0, Decimal::ZERO).is_err());
        assert!(generate_schedule(dec!(1000), dec!(5), 10, dec!(-1)).is_err());
    }

    #[test]
    fn test_envelope_warns_on_early_payoff() {
        let input = LoanInput::new(dec!(10000), dec!(5), 10).with_extra_payment(dec!(100));
        let out = build_amortization_schedule(&input).unwrap();
        assert!(out.warnings.iter().any(|w| w.contains("retires the loan")));
        assert_eq!(
            out.methodology,
            "Accelerated amortization schedule (constant extra payment)"
        );
    }

    #[test]
    fn test_balance_curve_matches_entries() {
        let sched = generate_schedule(dec!(1200), Decimal::ZERO, 1, Decimal::ZERO).unwrap();
        let curve = balance_curve(&sched);
        assert_eq!(curve.len(), 12);
        assert_eq!(curve[0], (1, dec!(1100)));
        assert_eq!(curve[11], (12, Decimal::ZERO));
    }
}
