use std::time::Instant;

use tracing::{debug, warn};

use super::{
    base_payment, build_schedule, summarize, validate, CalculationResult, LoanRequest,
    RawLoanRequest,
};
use crate::error::CalcError;
use crate::types::{round_money, with_metadata, ComputationOutput};
use crate::CalcResult;

const METHODOLOGY: &str = "Fixed-rate annuity amortization with extra monthly principal";

/// Validate a raw request and run the full amortization.
pub fn calculate_amortization(
    raw: &RawLoanRequest,
) -> CalcResult<ComputationOutput<CalculationResult>> {
    let request = validate(raw)?;
    calculate_from_request(&request)
}

/// Run the amortization for a typed request.
pub fn calculate_from_request(
    request: &LoanRequest,
) -> CalcResult<ComputationOutput<CalculationResult>> {
    let start = Instant::now();
    request.validate()?;

    let principal = request.principal();
    let monthly_rate = request.monthly_rate();
    let planned_payments = request.planned_payments()?;

    let base = base_payment(principal, monthly_rate, planned_payments)?;
    let scheduled = base
        .checked_add(request.extra_monthly)
        .ok_or_else(|| CalcError::Overflow {
            context: "scheduled payment".into(),
        })?;

    let schedule = build_schedule(principal, monthly_rate, scheduled, planned_payments)?;
    let summary = summarize(&schedule.entries)?;

    let mut warnings = Vec::new();
    if !schedule.fully_amortized {
        warn!(
            months = summary.months_to_payoff,
            remaining = %schedule.final_balance().unwrap_or_default(),
            "safety bound reached before the loan was retired"
        );
        warnings.push(format!(
            "Schedule stopped after {} months with {} still outstanding; totals are incomplete",
            summary.months_to_payoff,
            schedule.final_balance().unwrap_or_default()
        ));
    }

    debug!(
        %principal,
        %monthly_rate,
        planned_payments,
        base_payment = %round_money(base),
        months_to_payoff = summary.months_to_payoff,
        "amortization computed"
    );

    let result = CalculationResult {
        inputs: request.clone(),
        principal: round_money(principal),
        monthly_rate,
        planned_payments,
        base_payment: round_money(base),
        scheduled_payment: round_money(scheduled),
        total_interest: round_money(summary.total_interest),
        total_payment: round_money(summary.total_payment),
        months_to_payoff: summary.months_to_payoff,
        fully_amortized: schedule.fully_amortized,
        schedule: schedule.entries,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(METHODOLOGY, request, warnings, elapsed, result))
}
