//! Fixed-rate loan amortization engine.
//!
//! Validates a loan request, derives the level monthly payment from the
//! annuity formula and simulates the balance month by month, optionally
//! accelerated by extra principal.
//!
//! ```
//! use mortgage_calc_core::{calculate_amortization, RawLoanRequest};
//!
//! let raw: RawLoanRequest = serde_json::from_str(
//!     r#"{"price": 300000, "downPayment": 60000, "annualRate": 6, "years": 30}"#,
//! ).unwrap();
//! let out = calculate_amortization(&raw).unwrap();
//! assert_eq!(out.result.months_to_payoff, 360);
//! ```

pub mod amortization;
pub mod error;
pub mod types;

pub use amortization::{
    base_payment, build_schedule, calculate_amortization, calculate_from_request, summarize,
    validate, CalculationResult, LoanRequest, RawLoanRequest, Schedule, ScheduleEntry,
    ScheduleSummary,
};
pub use error::CalcError;
pub use types::*;

/// Standard result type for all amortization operations
pub type CalcResult<T> = Result<T, CalcError>;
