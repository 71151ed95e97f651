use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::ScheduleEntry;
use crate::error::CalcError;
use crate::types::{round_money, Money, Rate};
use crate::CalcResult;

/// Months simulated beyond the nominal term before the loop gives up.
pub const SAFETY_MARGIN_MONTHS: u32 = 600;

/// Zero-rate residue at or below this is retired with the current payment.
const ZERO_RATE_FLOOR: Money = dec!(0.01);

/// Positive-rate residue below this would display as 0.00 and is retired
/// with the current payment.
const DUST_BALANCE: Money = dec!(0.005);

/// Simulated month-by-month schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    pub entries: Vec<ScheduleEntry>,
    /// False when the safety bound stopped the simulation with principal
    /// still outstanding.
    pub fully_amortized: bool,
}

impl Schedule {
    /// Balance shown on the last entry, or `None` for an empty schedule.
    pub fn final_balance(&self) -> Option<Money> {
        self.entries.last().map(|e| e.balance)
    }
}

/// Simulate monthly payments of `scheduled_payment` against `principal`
/// until the balance is retired or `planned_payments + 600` months elapse.
pub fn build_schedule(
    principal: Money,
    monthly_rate: Rate,
    scheduled_payment: Money,
    planned_payments: u32,
) -> CalcResult<Schedule> {
    let max_months = planned_payments.saturating_add(SAFETY_MARGIN_MONTHS);
    let mut entries = Vec::with_capacity(planned_payments as usize);

    let mut balance = principal;
    let mut month: u32 = 0;

    while balance > Decimal::ZERO && month < max_months {
        month += 1;

        let interest = if monthly_rate.is_zero() {
            Decimal::ZERO
        } else {
            balance
                .checked_mul(monthly_rate)
                .ok_or_else(|| CalcError::Overflow {
                    context: format!("interest for month {month}"),
                })?
        };

        let mut principal_paid = scheduled_payment - interest;
        if principal_paid < Decimal::ZERO {
            return Err(CalcError::InvalidInput {
                field: "scheduled_payment".into(),
                reason: format!(
                    "payment {scheduled_payment} does not cover interest {} in month {month}",
                    round_money(interest)
                ),
            });
        }

        // Final installment is only as large as what is left.
        if principal_paid > balance {
            principal_paid = balance;
        }

        let mut new_balance = balance - principal_paid;
        if is_residue(new_balance, monthly_rate) {
            principal_paid = balance;
            new_balance = Decimal::ZERO;
        }

        let interest_shown = round_money(interest);
        let principal_shown = round_money(principal_paid);
        entries.push(ScheduleEntry {
            month,
            interest: interest_shown,
            principal: principal_shown,
            payment: interest_shown + principal_shown,
            balance: round_money(new_balance),
        });

        balance = new_balance;
    }

    Ok(Schedule {
        fully_amortized: balance <= Decimal::ZERO,
        entries,
    })
}

fn is_residue(balance: Money, monthly_rate: Rate) -> bool {
    if balance <= Decimal::ZERO {
        return false;
    }
    if monthly_rate.is_zero() {
        balance <= ZERO_RATE_FLOOR
    } else {
        balance < DUST_BALANCE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amortization::base_payment;

    fn standard_schedule(extra: Money) -> Schedule {
        let payment = base_payment(dec!(240_000), dec!(0.005), 360).unwrap() + extra;
        build_schedule(dec!(240_000), dec!(0.005), payment, 360).unwrap()
    }

    #[test]
    fn test_standard_schedule_runs_full_term() {
        let s = standard_schedule(Decimal::ZERO);
        assert_eq!(s.entries.len(), 360);
        assert!(s.fully_amortized);
        assert_eq!(s.final_balance(), Some(Decimal::ZERO));

        let first = &s.entries[0];
        assert_eq!(first.month, 1);
        assert_eq!(first.interest, dec!(1200.00));
        assert_eq!(first.principal, dec!(238.92));
        assert_eq!(first.balance, dec!(239761.08));
    }

    #[test]
    fn test_extra_payment_shortens_schedule() {
        let s = standard_schedule(dec!(500));
        assert!(s.entries.len() < 360);
        assert_eq!(s.entries.len(), 194);
        assert_eq!(s.final_balance(), Some(Decimal::ZERO));
    }

    #[test]
    fn test_last_payment_is_clamped() {
        let s = standard_schedule(dec!(500));
        let last = s.entries.last().unwrap();
        let regular = &s.entries[0];
        assert!(last.payment < regular.payment);
        assert!(last.principal >= Decimal::ZERO);
    }

    #[test]
    fn test_rows_are_self_consistent_and_monotonic() {
        let s = standard_schedule(dec!(137.45));
        for pair in s.entries.windows(2) {
            assert!(pair[1].balance <= pair[0].balance);
            assert_eq!(pair[1].month, pair[0].month + 1);
        }
        for e in &s.entries {
            assert_eq!(e.payment, e.interest + e.principal);
            assert!(e.interest >= Decimal::ZERO);
            assert!(e.principal >= Decimal::ZERO);
            assert!(e.balance >= Decimal::ZERO);
        }
    }

    #[test]
    fn test_zero_rate_floor_retires_residue() {
        // 1000 at 199.999/month would leave 0.005 after five payments
        let s = build_schedule(dec!(1000), Decimal::ZERO, dec!(199.999), 10).unwrap();
        assert_eq!(s.entries.len(), 5);
        let last = s.entries.last().unwrap();
        assert_eq!(last.principal, dec!(200.00));
        assert_eq!(last.balance, Decimal::ZERO);
        assert!(s.fully_amortized);
    }

    #[test]
    fn test_zero_rate_floor_applies_within_a_cent() {
        // 1000.01 at 200/month: 0.01 is left after the fifth payment
        let s = build_schedule(dec!(1000.01), Decimal::ZERO, dec!(200), 5).unwrap();
        assert_eq!(s.entries.len(), 5);
        let last = s.entries.last().unwrap();
        assert_eq!(last.principal, dec!(200.01));
        assert_eq!(last.balance, Decimal::ZERO);
    }

    #[test]
    fn test_positive_rate_dust_does_not_add_a_month() {
        let payment = base_payment(dec!(10_000), dec!(0.01), 12).unwrap();
        let s = build_schedule(dec!(10_000), dec!(0.01), payment, 12).unwrap();
        assert_eq!(s.entries.len(), 12);
        assert_eq!(s.final_balance(), Some(Decimal::ZERO));
    }

    #[test]
    fn test_safety_bound_stops_pathological_schedule() {
        // one cent of principal per month never retires 100k within 12 + 600 months
        let s = build_schedule(dec!(100_000), dec!(0.01), dec!(1000.01), 12).unwrap();
        assert_eq!(s.entries.len(), 612);
        assert!(!s.fully_amortized);
        assert!(s.final_balance().unwrap() > Decimal::ZERO);
    }

    #[test]
    fn test_payment_below_interest_is_an_error() {
        let err = build_schedule(dec!(100_000), dec!(0.01), dec!(999), 12).unwrap_err();
        assert!(matches!(err, CalcError::InvalidInput { .. }));
    }

    #[test]
    fn test_zero_principal_yields_empty_schedule() {
        let s = build_schedule(Decimal::ZERO, dec!(0.01), dec!(100), 12).unwrap();
        assert!(s.entries.is_empty());
        assert!(s.fully_amortized);
        assert_eq!(s.final_balance(), None);
    }
}
