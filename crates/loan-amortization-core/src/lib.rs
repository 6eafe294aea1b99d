pub mod error;
pub mod payment;
pub mod schedule;
pub mod types;
pub mod validation;

#[cfg(feature = "comparison")]
pub mod comparison;

pub use error::LoanError;
pub use types::*;

/// Standard result type for all loan operations
pub type LoanResult<T> = Result<T, LoanError>;
