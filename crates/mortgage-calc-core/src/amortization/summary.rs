use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::ScheduleEntry;
use crate::error::CalcError;
use crate::types::Money;
use crate::CalcResult;

/// Totals over a schedule, taken from the rounded per-month values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleSummary {
    pub total_interest: Money,
    pub total_payment: Money,
    pub months_to_payoff: u32,
}

pub fn summarize(entries: &[ScheduleEntry]) -> CalcResult<ScheduleSummary> {
    let overflow = |what: &str| CalcError::Overflow {
        context: format!("{what} total"),
    };

    let mut total_interest = Decimal::ZERO;
    let mut total_payment = Decimal::ZERO;
    for e in entries {
        total_interest = total_interest
            .checked_add(e.interest)
            .ok_or_else(|| overflow("interest"))?;
        total_payment = total_payment
            .checked_add(e.payment)
            .ok_or_else(|| overflow("payment"))?;
    }

    let months_to_payoff = u32::try_from(entries.len()).map_err(|_| overflow("month"))?;

    Ok(ScheduleSummary {
        total_interest,
        total_payment,
        months_to_payoff,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn entry(month: u32, interest: Money, principal: Money, balance: Money) -> ScheduleEntry {
        ScheduleEntry {
            month,
            interest,
            principal,
            payment: interest + principal,
            balance,
        }
    }

    #[test]
    fn test_sums_rounded_values() {
        let entries = vec![
            entry(1, dec!(10.00), dec!(90.00), dec!(910.00)),
            entry(2, dec!(9.10), dec!(90.90), dec!(819.10)),
            entry(3, dec!(8.19), dec!(819.10), dec!(0.00)),
        ];
        let s = summarize(&entries).unwrap();
        assert_eq!(s.total_interest, dec!(27.29));
        assert_eq!(s.total_payment, dec!(1027.29));
        assert_eq!(s.months_to_payoff, 3);
    }

    #[test]
    fn test_empty_schedule() {
        let s = summarize(&[]).unwrap();
        assert_eq!(s.total_interest, Decimal::ZERO);
        assert_eq!(s.total_payment, Decimal::ZERO);
        assert_eq!(s.months_to_payoff, 0);
    }

    #[test]
    fn test_overflowing_total_is_an_error() {
        let big = entry(1, Decimal::MAX, Decimal::ZERO, Decimal::ZERO);
        let err = summarize(&[big.clone(), big]).unwrap_err();
        assert!(matches!(err, CalcError::Overflow { .. }));
        assert!(!err.is_client_error());
    }
}
