use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Rates expressed as decimals (0.05 = 5%). Annual input rates are the
/// exception and travel as percentages in `LoanInput::annual_rate_pct`.
pub type Rate = Decimal;

/// The four scalars that fully describe a fixed-rate loan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanInput {
    /// Amount borrowed.
    pub principal: Money,
    /// Annual interest rate in percent (5.0 = 5%).
    pub annual_rate_pct: Decimal,
    /// Loan term in whole years.
    pub term_years: i32,
    /// Constant amount paid on top of the base payment every month.
    #[serde(default)]
    pub extra_payment: Money,
}

impl LoanInput {
    /// Loan without an extra payment.
    pub fn new(principal: Money, annual_rate_pct: Decimal, term_years: i32) -> Self {
        Self {
            principal,
            annual_rate_pct,
            term_years,
            extra_payment: Decimal::ZERO,
        }
    }

    pub fn with_extra_payment(mut self, extra_payment: Money) -> Self {
        self.extra_payment = extra_payment;
        self
    }
}

/// One month of an amortization schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    /// 1-based month index.
    pub month: u32,
    /// Total paid this month (base + extra, smaller in the payoff month).
    pub payment: Money,
    pub interest: Money,
    pub principal: Money,
    /// Balance outstanding after this month's payment.
    pub balance: Money,
}

/// Full amortization schedule with cumulative totals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationResult {
    /// Base monthly payment, excluding any extra payment.
    pub monthly_payment: Money,
    pub entries: Vec<ScheduleEntry>,
    pub total_interest_paid: Money,
    pub total_paid: Money,
    pub months_to_payoff: u32,
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}

/// Assumptions block shared by every loan computation.
pub(crate) fn loan_assumptions(input: &LoanInput) -> serde_json::Value {
    serde_json::json!({
        "principal": input.principal.to_string(),
        "annual_rate_pct": input.annual_rate_pct.to_string(),
        "term_years": input.term_years,
        "extra_payment": input.extra_payment.to_string(),
        "compounding": "monthly",
    })
}
