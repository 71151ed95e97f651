//! Fixed-rate loan amortization: validation, level-payment derivation,
//! month-by-month schedule simulation with optional extra principal, and
//! summary aggregation. All math in `rust_decimal::Decimal`.

pub mod calculator;
pub mod payment;
pub mod schedule;
pub mod summary;
pub mod validation;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::CalcError;
use crate::types::{Money, Rate, Years};
use crate::CalcResult;

pub use calculator::{calculate_amortization, calculate_from_request};
pub use payment::base_payment;
pub use schedule::{build_schedule, Schedule};
pub use summary::{summarize, ScheduleSummary};
pub use validation::{validate, RawLoanRequest};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Longest accepted loan term.
pub const MAX_TERM_YEARS: Decimal = dec!(1000);

/// Largest accepted price or extra monthly payment.
pub const MAX_AMOUNT: Decimal = dec!(1_000_000_000_000_000);

/// Largest accepted annual rate, in percent.
pub const MAX_ANNUAL_RATE: Decimal = dec!(1000);

const MONTHS_PER_YEAR: Decimal = dec!(12);

// ---------------------------------------------------------------------------
// Input types
// ---------------------------------------------------------------------------

/// A validated loan request. Build one through [`validate`] or construct it
/// directly and let [`calculate_from_request`] check it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanRequest {
    /// Purchase price.
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Money,
    /// Cash paid up front; the rest is financed.
    #[serde(default, with = "rust_decimal::serde::float")]
    pub down_payment: Money,
    /// Annual interest rate as a percentage (6 = 6%).
    #[serde(with = "rust_decimal::serde::float")]
    pub annual_rate: Rate,
    /// Loan term in years; fractional terms are rounded to whole months.
    #[serde(with = "rust_decimal::serde::float")]
    pub years: Years,
    /// Extra principal paid on top of the level payment every month.
    #[serde(default, with = "rust_decimal::serde::float")]
    pub extra_monthly: Money,
}

impl LoanRequest {
    /// Amount financed.
    pub fn principal(&self) -> Money {
        self.price - self.down_payment
    }

    /// Periodic rate: annual percentage / 100 / 12.
    pub fn monthly_rate(&self) -> Rate {
        self.annual_rate / dec!(100) / MONTHS_PER_YEAR
    }

    /// Nominal number of monthly installments, ignoring extra payments.
    pub fn planned_payments(&self) -> CalcResult<u32> {
        months_in_term(self.years).ok_or_else(|| CalcError::InvalidInput {
            field: "years".into(),
            reason: format!("term of {} years does not map to a month count", self.years),
        })
    }
}

/// round(years × 12) with halves rounded up, or `None` when the result does
/// not fit a `u32`.
pub(crate) fn months_in_term(years: Years) -> Option<u32> {
    years
        .checked_mul(MONTHS_PER_YEAR)?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u32()
}

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// One simulated month. Currency fields are rounded to cents when the entry
/// is recorded, so `payment == interest + principal` holds exactly. Amounts
/// go over the wire as JSON numbers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub month: u32,
    #[serde(with = "rust_decimal::serde::float")]
    pub interest: Money,
    #[serde(with = "rust_decimal::serde::float")]
    pub principal: Money,
    #[serde(with = "rust_decimal::serde::float")]
    pub payment: Money,
    #[serde(with = "rust_decimal::serde::float")]
    pub balance: Money,
}

/// Full result of one amortization run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationResult {
    pub inputs: LoanRequest,
    #[serde(with = "rust_decimal::serde::float")]
    pub principal: Money,
    /// Unrounded periodic rate.
    #[serde(with = "rust_decimal::serde::float")]
    pub monthly_rate: Rate,
    pub planned_payments: u32,
    /// Level payment that retires the principal over `planned_payments`.
    #[serde(with = "rust_decimal::serde::float")]
    pub base_payment: Money,
    /// `base_payment` plus the extra monthly principal.
    #[serde(with = "rust_decimal::serde::float")]
    pub scheduled_payment: Money,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_interest: Money,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_payment: Money,
    pub months_to_payoff: u32,
    /// False when the simulation hit its safety bound before the balance
    /// reached zero; the schedule and totals are then incomplete.
    pub fully_amortized: bool,
    pub schedule: Vec<ScheduleEntry>,
}

impl CalculationResult {
    /// Months saved against the nominal term.
    pub fn months_saved(&self) -> u32 {
        self.planned_payments.saturating_sub(self.months_to_payoff)
    }
}
