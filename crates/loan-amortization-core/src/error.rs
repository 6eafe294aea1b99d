use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoanError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Division by zero in {context}")]
    DivisionByZero { context: String },

    #[error("Payment insufficient to amortize: schedule stalled at month {month} ({reason})")]
    NonTerminatingSchedule { month: u32, reason: String },

    #[error("Arithmetic overflow in {context}")]
    ArithmeticOverflow { context: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

/// Error for a checked Decimal operation that returned `None`.
pub(crate) fn overflow(context: &str) -> LoanError {
    LoanError::ArithmeticOverflow {
        context: context.into(),
    }
}

impl From<serde_json::Error> for LoanError {
    fn from(e: serde_json::Error) -> Self {
        LoanError::SerializationError(e.to_string())
    }
}
