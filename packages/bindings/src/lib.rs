use napi::Result as NapiResult;
use napi_derive::napi;
use rust_decimal::Decimal;
use serde::Serialize;

use loan_amortization_core::{comparison, payment, schedule, validation, LoanInput};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

fn parse_loan(input_json: &str) -> NapiResult<LoanInput> {
    serde_json::from_str(input_json).map_err(to_napi_error)
}

/// One point of the month-vs-balance chart series.
#[derive(Serialize)]
struct BalancePoint {
    month: u32,
    balance: Decimal,
}

// ---------------------------------------------------------------------------
// Payment
// ---------------------------------------------------------------------------

#[napi]
pub fn calculate_payment(input_json: String) -> NapiResult<String> {
    let input = parse_loan(&input_json)?;
    let output = payment::calculate_payment(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Returns `null` for a usable loan, otherwise the validation message.
#[napi]
pub fn validate_loan(input_json: String) -> NapiResult<Option<String>> {
    let input = parse_loan(&input_json)?;
    Ok(validation::validate_loan(&input).err().map(|e| e.to_string()))
}

// ---------------------------------------------------------------------------
// Schedules
// ---------------------------------------------------------------------------

#[napi]
pub fn amortization_schedule(input_json: String) -> NapiResult<String> {
    let input = parse_loan(&input_json)?;
    let output = schedule::build_amortization_schedule(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn balance_curve(input_json: String) -> NapiResult<String> {
    let input = parse_loan(&input_json)?;
    let sched = schedule::generate_schedule(
        input.principal,
        input.annual_rate_pct,
        input.term_years,
        input.extra_payment,
    )
    .map_err(to_napi_error)?;
    let points: Vec<BalancePoint> = schedule::balance_curve(&sched)
        .into_iter()
        .map(|(month, balance)| BalancePoint { month, balance })
        .collect();
    serde_json::to_string(&points).map_err(to_napi_error)
}

#[napi]
pub fn compare_extra_payment(input_json: String) -> NapiResult<String> {
    let input = parse_loan(&input_json)?;
    let output = comparison::compare_extra_payment(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}
