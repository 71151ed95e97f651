use clap::Args;
use serde_json::Value;

use mortgage_calc_core::amortization::{self, RawLoanRequest};

use crate::input;

/// Arguments for an amortization schedule
#[derive(Args)]
pub struct AmortizeArgs {
    /// Path to JSON input file, or - for stdin (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Purchase price
    #[arg(long, allow_hyphen_values = true)]
    pub price: Option<String>,

    /// Down payment (default 0)
    #[arg(long, alias = "down", allow_hyphen_values = true)]
    pub down_payment: Option<String>,

    /// Annual interest rate in percent (6 = 6%)
    #[arg(long, alias = "rate", allow_hyphen_values = true)]
    pub annual_rate: Option<String>,

    /// Loan term in years
    #[arg(long, allow_hyphen_values = true)]
    pub years: Option<String>,

    /// Extra principal paid every month (default 0)
    #[arg(long, alias = "extra", allow_hyphen_values = true)]
    pub extra_monthly: Option<String>,
}

pub fn run_amortize(args: AmortizeArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let raw: RawLoanRequest = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if has_flags(&args) {
        raw_from_flags(&args)
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        raw_from_flags(&args)
    };
    let result = amortization::calculate_amortization(&raw)?;
    Ok(serde_json::to_value(result)?)
}

fn has_flags(args: &AmortizeArgs) -> bool {
    [
        &args.price,
        &args.down_payment,
        &args.annual_rate,
        &args.years,
        &args.extra_monthly,
    ]
    .iter()
    .any(|flag| flag.is_some())
}

/// Flags are passed through as strings so the validator reports bad numbers
/// alongside every other violation.
fn raw_from_flags(args: &AmortizeArgs) -> RawLoanRequest {
    let text = |flag: &Option<String>| flag.clone().map(Value::String);
    RawLoanRequest {
        price: text(&args.price),
        down_payment: text(&args.down_payment),
        annual_rate: text(&args.annual_rate),
        years: text(&args.years),
        extra_monthly: text(&args.extra_monthly),
    }
}
