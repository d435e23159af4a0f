use clap::Args;
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value;

use trade_calc_core::{sync_from_percent, sync_from_price};

/// Arguments for price/percent conversion
#[derive(Args)]
#[command(group(
    clap::ArgGroup::new("target")
        .required(true)
        .args(["price", "percent"]),
))]
pub struct SyncArgs {
    /// Buy price the percent change is measured from
    #[arg(long, allow_hyphen_values = true)]
    pub buy_price: Decimal,

    /// Target price; the percent change is derived
    #[arg(long, allow_hyphen_values = true)]
    pub price: Option<Decimal>,

    /// Percent change from the buy price (e.g. -2.5); the price is derived
    #[arg(long, allow_hyphen_values = true)]
    pub percent: Option<Decimal>,
}

#[derive(Debug, Serialize)]
struct SyncOutput {
    buy_price: Decimal,
    price: Option<Decimal>,
    percent: Option<Decimal>,
    /// Which side was derived: "percent" or "price"
    derived: &'static str,
}

pub fn run_sync(args: SyncArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let buy = Some(args.buy_price);
    let output = match (args.price, args.percent) {
        (Some(price), _) => SyncOutput {
            buy_price: args.buy_price,
            price: Some(price),
            percent: sync_from_price(buy, price),
            derived: "percent",
        },
        (None, Some(percent)) => SyncOutput {
            buy_price: args.buy_price,
            price: sync_from_percent(buy, percent),
            percent: Some(percent),
            derived: "price",
        },
        (None, None) => return Err("--price or --percent required".into()),
    };

    if output.price.is_none() || output.percent.is_none() {
        tracing::warn!(
            buy_price = %args.buy_price,
            "derived side left unset: buy price is not positive or the result is out of range"
        );
    }
    Ok(serde_json::to_value(output)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn decimal_at(value: &Value) -> Decimal {
        value.as_str().unwrap().parse().unwrap()
    }

    #[test]
    fn test_price_to_percent() {
        let out = run_sync(SyncArgs {
            buy_price: dec!(100),
            price: Some(dec!(112.345)),
            percent: None,
        })
        .unwrap();
        assert_eq!(out["derived"], "percent");
        assert_eq!(decimal_at(&out["percent"]), dec!(12.35));
    }

    #[test]
    fn test_percent_to_price() {
        let out = run_sync(SyncArgs {
            buy_price: dec!(80),
            price: None,
            percent: Some(dec!(-2.5)),
        })
        .unwrap();
        assert_eq!(out["derived"], "price");
        assert_eq!(decimal_at(&out["price"]), dec!(78));
    }

    #[test]
    fn test_non_positive_buy_leaves_derived_unset() {
        let out = run_sync(SyncArgs {
            buy_price: Decimal::ZERO,
            price: Some(dec!(10)),
            percent: None,
        })
        .unwrap();
        assert!(out["percent"].is_null());
    }

    #[test]
    fn test_out_of_range_result_left_unset() {
        let out = run_sync(SyncArgs {
            buy_price: dec!(100),
            price: None,
            percent: Some(Decimal::MAX),
        })
        .unwrap();
        assert_eq!(out["derived"], "price");
        assert!(out["price"].is_null());
    }
}
