use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;

use crate::error::CalcError;
use crate::types::{Money, Rate};
use crate::CalcResult;

/// Level monthly payment that retires `principal` over `num_payments` at
/// `monthly_rate`:
///
/// ```text
/// P × r(1+r)^n / ((1+r)^n − 1)
/// ```
///
/// A zero rate degrades to `P / n`. When `(1+r)^n` leaves the decimal range
/// the ratio `(1+r)^n / ((1+r)^n − 1)` is indistinguishable from one, so the
/// payment is its limit `P × r`.
pub fn base_payment(principal: Money, monthly_rate: Rate, num_payments: u32) -> CalcResult<Money> {
    if num_payments == 0 {
        return Err(CalcError::InvalidInput {
            field: "num_payments".into(),
            reason: "Number of payments must be > 0".into(),
        });
    }
    if monthly_rate < Decimal::ZERO {
        return Err(CalcError::InvalidInput {
            field: "monthly_rate".into(),
            reason: "Monthly rate must be >= 0".into(),
        });
    }

    if monthly_rate.is_zero() {
        return Ok(principal / Decimal::from(num_payments));
    }

    let interest_only = principal
        .checked_mul(monthly_rate)
        .ok_or_else(|| CalcError::Overflow {
            context: "annuity payment".into(),
        })?;

    let one_plus_r = Decimal::ONE + monthly_rate;
    let Some(factor) = one_plus_r.checked_powu(u64::from(num_payments)) else {
        return Ok(interest_only);
    };

    let denominator = factor - Decimal::ONE;
    if denominator.is_zero() {
        return Err(CalcError::DivisionByZero {
            context: "annuity factor".into(),
        });
    }

    let ratio = factor / denominator;
    interest_only
        .checked_mul(ratio)
        .ok_or_else(|| CalcError::Overflow {
            context: "annuity payment".into(),
        })
}
