use clap::Args;
use serde_json::Value;

use trade_calc_core::{analyze_trade, validate, Field, PricePair, TradeFormState};

use crate::input;

/// Trade inputs, from flags and/or a JSON/YAML document.
///
/// Flags override values read from `--input` or stdin. Prices and percents
/// are fed through the form transitions, so a percent flag derives its
/// price from the buy price exactly as editing the form would.
#[derive(Args)]
pub struct TradeArgs {
    /// Path to a JSON or YAML file holding the trade form fields
    #[arg(long)]
    pub input: Option<String>,

    /// Stock name or ticker
    #[arg(long)]
    pub stock_name: Option<String>,

    /// Price paid per share
    #[arg(long)]
    pub buy_price: Option<String>,

    /// Number of shares bought
    #[arg(long)]
    pub shares: Option<String>,

    /// Exit price per share
    #[arg(long, conflicts_with = "sell_percent", allow_hyphen_values = true)]
    pub sell_price: Option<String>,

    /// Exit price as a percent change from the buy price (e.g. 10 or -5)
    #[arg(long, allow_hyphen_values = true)]
    pub sell_percent: Option<String>,

    /// Enable the leveraged (margin trading facility) scenario
    #[arg(long)]
    pub mtf: bool,

    /// Buying power per unit of own margin (must exceed 1)
    #[arg(long)]
    pub margin_multiplier: Option<String>,

    /// Exit price per share for the leveraged position
    #[arg(long, conflicts_with = "mtf_target_percent", allow_hyphen_values = true)]
    pub mtf_target_price: Option<String>,

    /// Leveraged exit as a percent change from the buy price
    #[arg(long, allow_hyphen_values = true)]
    pub mtf_target_percent: Option<String>,

    /// Days the leveraged position is held
    #[arg(long)]
    pub holding_days: Option<String>,

    /// Broker's annual interest rate in percent (e.g. 12 for 12% p.a.)
    #[arg(long)]
    pub interest_rate: Option<String>,

    /// Stop-loss price per share
    #[arg(long, allow_hyphen_values = true)]
    pub stop_loss: Option<String>,
}

pub fn run_analyze(args: TradeArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let form = apply_flags(load_document(&args)?, &args);
    let result = analyze_trade(&form)?;
    tracing::info!(
        stock = %result.result.stock_name,
        mtf = result.result.mtf.is_some(),
        stop_loss = result.result.stop_loss.is_some(),
        elapsed_us = result.metadata.computation_time_us,
        "trade analysed"
    );
    for warning in &result.warnings {
        tracing::warn!("{}", warning);
    }
    Ok(serde_json::to_value(result)?)
}

pub fn run_validate(args: TradeArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let form = apply_flags(load_document(&args)?, &args);
    Ok(validation_report(&form))
}

fn validation_report(form: &TradeFormState) -> Value {
    match validate(form) {
        Ok(input) => serde_json::json!({ "valid": true, "input": input }),
        Err(errors) => {
            tracing::info!(fields = errors.len(), "validation failed");
            serde_json::json!({ "valid": false, "errors": errors })
        }
    }
}

/// Read the form document from `--input` or piped stdin; blank otherwise.
fn load_document(args: &TradeArgs) -> Result<TradeFormState, Box<dyn std::error::Error>> {
    let mut form: TradeFormState = if let Some(ref path) = args.input {
        input::file::read_document(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        TradeFormState::new()
    };
    tracing::debug!(?form, "form loaded");

    fill_missing_prices(&mut form);
    Ok(form)
}

/// Overlay command-line flags on the loaded document. Buy price is applied
/// before the targets so that percent flags derive from the new base.
fn apply_flags(mut form: TradeFormState, args: &TradeArgs) -> TradeFormState {
    if args.mtf {
        form.mtf_enabled = true;
    }

    let edits = [
        (Field::StockName, &args.stock_name),
        (Field::Shares, &args.shares),
        (Field::BuyPrice, &args.buy_price),
        (Field::SellPrice, &args.sell_price),
        (Field::SellPercent, &args.sell_percent),
        (Field::MarginMultiplier, &args.margin_multiplier),
        (Field::MtfTargetPrice, &args.mtf_target_price),
        (Field::MtfTargetPercent, &args.mtf_target_percent),
        (Field::HoldingPeriodDays, &args.holding_days),
        (Field::AnnualInterestRatePct, &args.interest_rate),
        (Field::StopLossPrice, &args.stop_loss),
    ];
    for (field, value) in edits {
        if let Some(value) = value {
            form.edit(field, value.as_str());
        }
    }

    form
}

/// A document may give a target only as a percent; derive its price the
/// way the form would have when that percent was typed.
fn fill_missing_prices(form: &mut TradeFormState) {
    for pair in [PricePair::Sell, PricePair::Mtf] {
        let price_blank = form.get(pair.price_field()).trim().is_empty();
        let percent = form.get(pair.percent_field()).to_string();
        if price_blank && !percent.trim().is_empty() {
            form.on_percent_edited(pair, percent);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> TradeArgs {
        TradeArgs {
            input: None,
            stock_name: Some("SBIN".into()),
            buy_price: Some("100".into()),
            shares: Some("10".into()),
            sell_price: None,
            sell_percent: None,
            mtf: false,
            margin_multiplier: None,
            mtf_target_price: None,
            mtf_target_percent: None,
            holding_days: None,
            interest_rate: None,
            stop_loss: None,
        }
    }

    #[test]
    fn test_percent_flag_derives_price() {
        let form = apply_flags(
            TradeFormState::new(),
            &TradeArgs {
                sell_percent: Some("-5".into()),
                mtf: true,
                mtf_target_percent: Some("12.5".into()),
                ..args()
            },
        );
        assert_eq!(form.sell_price, "95.00");
        assert_eq!(form.mtf_target_price, "112.50");
        assert!(form.mtf_enabled);
    }

    #[test]
    fn test_price_flag_derives_percent() {
        let form = apply_flags(
            TradeFormState::new(),
            &TradeArgs {
                sell_price: Some("110".into()),
                ..args()
            },
        );
        assert_eq!(form.sell_percent, "10.00");
    }

    #[test]
    fn test_flags_override_document() {
        let document = TradeFormState {
            stock_name: "OLD".into(),
            buy_price: "50".into(),
            sell_price: "55".into(),
            sell_percent: "10.00".into(),
            ..Default::default()
        };
        let form = apply_flags(document, &args());
        assert_eq!(form.stock_name, "SBIN");
        // new buy price keeps the established percent
        assert_eq!(form.sell_price, "110.00");
    }

    #[test]
    fn test_fill_missing_prices_from_document_percent() {
        let mut form = TradeFormState {
            buy_price: "200".into(),
            sell_percent: "2.5".into(),
            mtf_target_price: "210".into(),
            mtf_target_percent: "99".into(),
            ..Default::default()
        };
        fill_missing_prices(&mut form);
        assert_eq!(form.sell_price, "205.00");
        // an explicit price is left alone
        assert_eq!(form.mtf_target_price, "210");
    }

    #[test]
    fn test_validate_reports_errors_as_value() {
        let form = apply_flags(
            TradeFormState::new(),
            &TradeArgs {
                buy_price: Some("0".into()),
                sell_price: Some("110".into()),
                ..args()
            },
        );
        let value = validation_report(&form);
        assert_eq!(value["valid"], false);
        assert_eq!(value["errors"]["buy_price"], "Buy price must be greater than 0");
    }
}
