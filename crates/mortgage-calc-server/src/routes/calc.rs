//! Amortization endpoint.

use axum::{extract::rejection::JsonRejection, Json};
use mortgage_calc_core::{calculate_amortization, CalculationResult, RawLoanRequest};

use crate::error::{ApiError, ApiResult};

/// Build the amortization schedule for a loan request. The response is the
/// bare calculation result; envelope warnings are logged.
pub async fn calculate(
    payload: Result<Json<RawLoanRequest>, JsonRejection>,
) -> ApiResult<Json<CalculationResult>> {
    let Json(raw) = payload.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;

    let output = calculate_amortization(&raw)?;
    for warning in &output.warnings {
        tracing::warn!(%warning, "incomplete schedule");
    }
    tracing::info!(
        months_to_payoff = output.result.months_to_payoff,
        elapsed_us = output.metadata.computation_time_us,
        "schedule computed"
    );

    Ok(Json(output.result))
}
