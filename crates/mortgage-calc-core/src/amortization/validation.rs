use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{months_in_term, LoanRequest, MAX_AMOUNT, MAX_ANNUAL_RATE, MAX_TERM_YEARS};
use crate::error::CalcError;
use crate::types::{Money, Rate, Years};
use crate::CalcResult;

/// Loan request as it arrives over the wire. Each field may be a JSON number,
/// a numeric string, null, or absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawLoanRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub down_payment: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annual_rate: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub years: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra_monthly: Option<Value>,
}

impl From<&LoanRequest> for RawLoanRequest {
    fn from(req: &LoanRequest) -> Self {
        let text = |d: Decimal| Some(Value::String(d.to_string()));
        RawLoanRequest {
            price: text(req.price),
            down_payment: text(req.down_payment),
            annual_rate: text(req.annual_rate),
            years: text(req.years),
            extra_monthly: text(req.extra_monthly),
        }
    }
}

/// Outcome of coercing one wire value.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Coerced {
    Missing,
    Number(Decimal),
    NotNumeric,
    /// A finite number the decimal type cannot hold.
    OutOfRange,
}

/// Validate a raw request, reporting every violated constraint at once.
pub fn validate(raw: &RawLoanRequest) -> CalcResult<LoanRequest> {
    let mut details = Vec::new();

    let price = required(&mut details, "price", raw.price.as_ref());
    let down_payment = defaulted(&mut details, "downPayment", raw.down_payment.as_ref());
    let years = required(&mut details, "years", raw.years.as_ref());
    let annual_rate = required(&mut details, "annualRate", raw.annual_rate.as_ref());
    let extra_monthly = defaulted(&mut details, "extraMonthly", raw.extra_monthly.as_ref());

    check_constraints(
        &mut details,
        price,
        down_payment,
        years,
        annual_rate,
        extra_monthly,
    );

    let (Some(price), Some(down_payment), Some(annual_rate), Some(years), Some(extra_monthly)) =
        (price, down_payment, annual_rate, years, extra_monthly)
    else {
        return Err(CalcError::Validation { details });
    };
    if !details.is_empty() {
        return Err(CalcError::Validation { details });
    }

    Ok(LoanRequest {
        price,
        down_payment,
        annual_rate,
        years,
        extra_monthly,
    })
}

impl LoanRequest {
    /// Check the same constraints [`validate`] enforces on raw input.
    pub fn validate(&self) -> CalcResult<()> {
        let mut details = Vec::new();
        check_constraints(
            &mut details,
            Some(self.price),
            Some(self.down_payment),
            Some(self.years),
            Some(self.annual_rate),
            Some(self.extra_monthly),
        );
        if details.is_empty() {
            Ok(())
        } else {
            Err(CalcError::Validation { details })
        }
    }
}

fn check_constraints(
    details: &mut Vec<String>,
    price: Option<Money>,
    down_payment: Option<Money>,
    years: Option<Years>,
    annual_rate: Option<Rate>,
    extra_monthly: Option<Money>,
) {
    if let Some(p) = price {
        if p <= Decimal::ZERO {
            details.push("price must be > 0".into());
        } else if p > MAX_AMOUNT {
            details.push(format!("price must be <= {MAX_AMOUNT}"));
        }
    }
    if let Some(d) = down_payment {
        if d < Decimal::ZERO {
            details.push("downPayment must be >= 0".into());
        }
    }
    if let Some(y) = years {
        if y <= Decimal::ZERO {
            details.push("years must be > 0".into());
        }
    }
    if let Some(r) = annual_rate {
        if r < Decimal::ZERO {
            details.push("annualRate must be >= 0".into());
        } else if r > MAX_ANNUAL_RATE {
            details.push(format!("annualRate must be <= {MAX_ANNUAL_RATE}"));
        }
    }
    if let Some(e) = extra_monthly {
        if e < Decimal::ZERO {
            details.push("extraMonthly must be >= 0".into());
        } else if e > MAX_AMOUNT {
            details.push(format!("extraMonthly must be <= {MAX_AMOUNT}"));
        }
    }
    if let (Some(p), Some(d)) = (price, down_payment) {
        if d >= p {
            details.push("downPayment must be less than price".into());
        }
    }
    if let Some(y) = years {
        if y > MAX_TERM_YEARS {
            details.push(format!("years must be <= {MAX_TERM_YEARS}"));
        } else if y > Decimal::ZERO && months_in_term(y).unwrap_or(0) == 0 {
            details.push("years must be long enough for at least one monthly payment".into());
        }
    }
}

fn required(details: &mut Vec<String>, field: &str, value: Option<&Value>) -> Option<Decimal> {
    match coerce(value) {
        Coerced::Number(d) => Some(d),
        Coerced::Missing => {
            details.push(format!("{field} is required"));
            None
        }
        Coerced::NotNumeric => {
            details.push(format!("{field} must be a number"));
            None
        }
        Coerced::OutOfRange => {
            details.push(format!("{field} is out of range"));
            None
        }
    }
}

fn defaulted(details: &mut Vec<String>, field: &str, value: Option<&Value>) -> Option<Decimal> {
    match coerce(value) {
        Coerced::Number(d) => Some(d),
        Coerced::Missing => Some(Decimal::ZERO),
        Coerced::NotNumeric => {
            details.push(format!("{field} must be a number"));
            None
        }
        Coerced::OutOfRange => {
            details.push(format!("{field} is out of range"));
            None
        }
    }
}

/// Total conversion of a wire value to a decimal. Blank strings count as
/// missing; anything that is not a finite number is rejected, and finite
/// numbers beyond the decimal range are told apart from garbage.
fn coerce(value: Option<&Value>) -> Coerced {
    match value {
        None | Some(Value::Null) => Coerced::Missing,
        Some(Value::Number(n)) => parse_decimal(&n.to_string()),
        Some(Value::String(s)) if s.trim().is_empty() => Coerced::Missing,
        Some(Value::String(s)) => parse_decimal(s.trim()),
        Some(_) => Coerced::NotNumeric,
    }
}

fn parse_decimal(text: &str) -> Coerced {
    if let Ok(d) = Decimal::from_str(text).or_else(|_| Decimal::from_scientific(text)) {
        return Coerced::Number(d);
    }
    match text.parse::<f64>() {
        Ok(f) if f.is_finite() => Coerced::OutOfRange,
        _ => Coerced::NotNumeric,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn raw(value: Value) -> RawLoanRequest {
        serde_json::from_value(value).unwrap()
    }

    fn violations(value: Value) -> Vec<String> {
        match validate(&raw(value)) {
            Err(CalcError::Validation { details }) => details,
            other => panic!("expected validation failure, got {other:?}"),
        }
    }

    #[test]
    fn test_valid_request_with_defaults() {
        let req = validate(&raw(json!({
            "price": 300000,
            "annualRate": 6,
            "years": 30
        })))
        .unwrap();
        assert_eq!(req.price, dec!(300000));
        assert_eq!(req.down_payment, Decimal::ZERO);
        assert_eq!(req.extra_monthly, Decimal::ZERO);
    }

    #[test]
    fn test_numeric_strings_are_coerced() {
        let req = validate(&raw(json!({
            "price": "300000",
            "downPayment": " 60000.50 ",
            "annualRate": "6.5",
            "years": "30",
            "extraMonthly": "1e2"
        })))
        .unwrap();
        assert_eq!(req.down_payment, dec!(60000.50));
        assert_eq!(req.annual_rate, dec!(6.5));
        assert_eq!(req.extra_monthly, dec!(100));
    }

    #[test]
    fn test_null_and_blank_optionals_default_to_zero() {
        let req = validate(&raw(json!({
            "price": 1000,
            "downPayment": null,
            "annualRate": 0,
            "years": 1,
            "extraMonthly": ""
        })))
        .unwrap();
        assert_eq!(req.down_payment, Decimal::ZERO);
        assert_eq!(req.extra_monthly, Decimal::ZERO);
    }

    #[test]
    fn test_collects_every_violation() {
        let details = violations(json!({
            "price": -1,
            "annualRate": 5,
            "years": -1
        }));
        assert_eq!(
            details,
            vec![
                "price must be > 0".to_string(),
                "years must be > 0".to_string(),
                "downPayment must be less than price".to_string(),
            ]
        );
    }

    #[test]
    fn test_violation_order_follows_field_order() {
        let details = violations(json!({
            "price": 0,
            "downPayment": -5,
            "annualRate": -1,
            "years": 0,
            "extraMonthly": -10
        }));
        assert_eq!(
            details,
            vec![
                "price must be > 0".to_string(),
                "downPayment must be >= 0".to_string(),
                "years must be > 0".to_string(),
                "annualRate must be >= 0".to_string(),
                "extraMonthly must be >= 0".to_string(),
            ]
        );
    }

    #[rstest]
    #[case(json!({"price": 1000, "downPayment": 1000, "annualRate": 5, "years": 10}), "downPayment must be less than price")]
    #[case(json!({"price": 1000, "downPayment": 1500, "annualRate": 5, "years": 10}), "downPayment must be less than price")]
    #[case(json!({"annualRate": 5, "years": 10}), "price is required")]
    #[case(json!({"price": 1000, "years": 10}), "annualRate is required")]
    #[case(json!({"price": "abc", "annualRate": 5, "years": 10}), "price must be a number")]
    #[case(json!({"price": 1000, "annualRate": "NaN", "years": 10}), "annualRate must be a number")]
    #[case(json!({"price": 1000, "annualRate": 5, "years": true}), "years must be a number")]
    #[case(json!({"price": 1000, "annualRate": 5, "years": 10, "extraMonthly": [1]}), "extraMonthly must be a number")]
    #[case(json!({"price": 1000, "annualRate": 5, "years": 0.01}), "years must be long enough for at least one monthly payment")]
    #[case(json!({"price": 1000, "annualRate": 5, "years": 1001}), "years must be <= 1000")]
    #[case(json!({"price": 1e29, "annualRate": 5, "years": 10}), "price is out of range")]
    #[case(json!({"price": 1000, "annualRate": "1e40", "years": 10}), "annualRate is out of range")]
    #[case(json!({"price": "79228162514264337593543950335", "annualRate": 6, "years": 30}), "price must be <= 1000000000000000")]
    #[case(json!({"price": 1000, "annualRate": "1e27", "years": 30}), "annualRate must be <= 1000")]
    #[case(json!({"price": 1000, "annualRate": 5, "years": 10, "extraMonthly": 1e16}), "extraMonthly must be <= 1000000000000000")]
    fn test_rejects(#[case] body: Value, #[case] expected: &str) {
        let details = violations(body);
        assert!(
            details.iter().any(|d| d == expected),
            "expected {expected:?} in {details:?}"
        );
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let req = validate(&raw(json!({
            "price": "1000000000000000",
            "annualRate": 1000,
            "years": 1000,
            "extraMonthly": "1000000000000000"
        })))
        .unwrap();
        assert_eq!(req.price, MAX_AMOUNT);
        assert_eq!(req.annual_rate, MAX_ANNUAL_RATE);
    }

    #[test]
    fn test_infinite_string_is_not_a_number() {
        let details = violations(json!({"price": "inf", "annualRate": 5, "years": 10}));
        assert_eq!(details, vec!["price must be a number".to_string()]);
    }

    #[test]
    fn test_non_numeric_price_skips_relational_check() {
        let details = violations(json!({
            "price": "lots",
            "downPayment": 10,
            "annualRate": 5,
            "years": 10
        }));
        assert_eq!(details, vec!["price must be a number".to_string()]);
    }

    #[test]
    fn test_loan_request_validate() {
        let mut req = LoanRequest {
            price: dec!(1000),
            down_payment: dec!(100),
            annual_rate: dec!(5),
            years: dec!(10),
            extra_monthly: Decimal::ZERO,
        };
        assert!(req.validate().is_ok());

        req.down_payment = dec!(1000);
        let err = req.validate().unwrap_err();
        assert_eq!(
            err.details().to_vec(),
            vec!["downPayment must be less than price".to_string()]
        );
        assert!(err.is_client_error());
    }

    #[test]
    fn test_raw_round_trip_from_validated_request() {
        let req = LoanRequest {
            price: dec!(250000),
            down_payment: dec!(50000),
            annual_rate: dec!(4.25),
            years: dec!(15),
            extra_monthly: dec!(200),
        };
        assert_eq!(validate(&RawLoanRequest::from(&req)).unwrap(), req);
    }
}
