use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use loan_amortization_core::comparison;
use loan_amortization_core::payment;
use loan_amortization_core::schedule;
use loan_amortization_core::validation::{validate_inputs, validate_loan};
use loan_amortization_core::LoanInput;

use crate::input;

/// Arguments shared by every loan command
#[derive(Args)]
pub struct LoanArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Amount borrowed
    #[arg(long, allow_hyphen_values = true)]
    pub principal: Option<Decimal>,

    /// Annual interest rate in percent (e.g. 5 for 5%)
    #[arg(long, allow_hyphen_values = true)]
    pub rate: Option<Decimal>,

    /// Loan term in years
    #[arg(long, allow_hyphen_values = true)]
    pub term: Option<i32>,

    /// Extra amount paid every month on top of the base payment
    #[arg(long, allow_hyphen_values = true)]
    pub extra_payment: Option<Decimal>,
}

/// Resolve a loan from `--input`, piped stdin, or individual flags.
fn resolve_loan(args: &LoanArgs) -> Result<LoanInput, Box<dyn std::error::Error>> {
    if let Some(ref path) = args.input {
        return input::file::read_loan(path);
    }
    // Flags take precedence over stdin
    if args.principal.is_none() {
        if let Some(loan) = input::stdin::read_loan()? {
            return Ok(loan);
        }
    }

    let principal = args
        .principal
        .ok_or("--principal is required (or provide --input)")?;
    let rate = args.rate.ok_or("--rate is required (or provide --input)")?;
    let term = args.term.ok_or("--term is required (or provide --input)")?;

    Ok(LoanInput {
        principal,
        annual_rate_pct: rate,
        term_years: term,
        extra_payment: args.extra_payment.unwrap_or(Decimal::ZERO),
    })
}

pub fn run_payment(args: LoanArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let loan = resolve_loan(&args)?;
    log::info!("computing payment for {} over {} years", loan.principal, loan.term_years);
    let result = payment::calculate_payment(&loan)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_schedule(args: LoanArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let loan = resolve_loan(&args)?;
    log::info!(
        "building schedule for {} over {} years (extra {})",
        loan.principal,
        loan.term_years,
        loan.extra_payment
    );
    let result = schedule::build_amortization_schedule(&loan)?;
    log::debug!("schedule has {} months", result.result.months_to_payoff);
    Ok(serde_json::to_value(result)?)
}

pub fn run_compare(args: LoanArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let loan = resolve_loan(&args)?;
    log::info!("comparing payoff with extra payment {}", loan.extra_payment);
    let result = comparison::compare_extra_payment(&loan)?;
    Ok(serde_json::to_value(result)?)
}

/// Report whether the loan inputs are usable, and why not when they aren't.
pub fn run_validate(args: LoanArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let loan = resolve_loan(&args)?;
    let terms_valid = validate_inputs(loan.principal, loan.annual_rate_pct, loan.term_years);
    let reason = validate_loan(&loan).err().map(|e| e.to_string());
    Ok(serde_json::json!({
        "result": {
            "valid": reason.is_none(),
            "terms_valid": terms_valid,
            "reason": reason,
        }
    }))
}
