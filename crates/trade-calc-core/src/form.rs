use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::Value;

// ---------------------------------------------------------------------------
// Field names
// ---------------------------------------------------------------------------

/// A named field on the trade form. Ordering follows the form layout, which
/// is also the order in which validation errors are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    StockName,
    BuyPrice,
    Shares,
    SellPrice,
    SellPercent,
    MarginMultiplier,
    MtfTargetPrice,
    MtfTargetPercent,
    HoldingPeriodDays,
    AnnualInterestRatePct,
    StopLossPrice,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::StockName => "stock_name",
            Field::BuyPrice => "buy_price",
            Field::Shares => "shares",
            Field::SellPrice => "sell_price",
            Field::SellPercent => "sell_percent",
            Field::MarginMultiplier => "margin_multiplier",
            Field::MtfTargetPrice => "mtf_target_price",
            Field::MtfTargetPercent => "mtf_target_percent",
            Field::HoldingPeriodDays => "holding_period_days",
            Field::AnnualInterestRatePct => "annual_interest_rate_pct",
            Field::StopLossPrice => "stop_loss_price",
        }
    }

    /// Human-readable label used at the start of validation messages.
    pub fn label(&self) -> &'static str {
        match self {
            Field::StockName => "Stock name",
            Field::BuyPrice => "Buy price",
            Field::Shares => "Number of shares",
            Field::SellPrice => "Sell price",
            Field::SellPercent => "Sell percentage",
            Field::MarginMultiplier => "Margin multiplier",
            Field::MtfTargetPrice => "MTF target price",
            Field::MtfTargetPercent => "MTF target percentage",
            Field::HoldingPeriodDays => "Holding period",
            Field::AnnualInterestRatePct => "Annual interest rate",
            Field::StopLossPrice => "Stop-loss price",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One of the two independent price/percent pairs on the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PricePair {
    /// Plain sell target: `sell_price` <-> `sell_percent`
    Sell,
    /// Leveraged target: `mtf_target_price` <-> `mtf_target_percent`
    Mtf,
}

impl PricePair {
    pub fn price_field(&self) -> Field {
        match self {
            PricePair::Sell => Field::SellPrice,
            PricePair::Mtf => Field::MtfTargetPrice,
        }
    }

    pub fn percent_field(&self) -> Field {
        match self {
            PricePair::Sell => Field::SellPercent,
            PricePair::Mtf => Field::MtfTargetPercent,
        }
    }
}

// ---------------------------------------------------------------------------
// Form state
// ---------------------------------------------------------------------------

/// Snapshot of every form field as the user typed it.
///
/// Values are kept as raw text so that blank and malformed entries survive
/// until validation can report them per field. The engine never stores this
/// value; callers own it and pass it into the sync transitions and
/// [`crate::validate`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TradeFormState {
    #[serde(deserialize_with = "raw_text")]
    pub stock_name: String,
    #[serde(deserialize_with = "raw_text")]
    pub buy_price: String,
    #[serde(deserialize_with = "raw_text")]
    pub shares: String,
    #[serde(deserialize_with = "raw_text")]
    pub sell_price: String,
    #[serde(deserialize_with = "raw_text")]
    pub sell_percent: String,
    pub mtf_enabled: bool,
    #[serde(deserialize_with = "raw_text")]
    pub margin_multiplier: String,
    #[serde(deserialize_with = "raw_text")]
    pub mtf_target_price: String,
    #[serde(deserialize_with = "raw_text")]
    pub mtf_target_percent: String,
    #[serde(deserialize_with = "raw_text")]
    pub holding_period_days: String,
    #[serde(deserialize_with = "raw_text")]
    pub annual_interest_rate_pct: String,
    #[serde(deserialize_with = "raw_text")]
    pub stop_loss_price: String,
}

impl TradeFormState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw text currently held for `field`.
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::StockName => &self.stock_name,
            Field::BuyPrice => &self.buy_price,
            Field::Shares => &self.shares,
            Field::SellPrice => &self.sell_price,
            Field::SellPercent => &self.sell_percent,
            Field::MarginMultiplier => &self.margin_multiplier,
            Field::MtfTargetPrice => &self.mtf_target_price,
            Field::MtfTargetPercent => &self.mtf_target_percent,
            Field::HoldingPeriodDays => &self.holding_period_days,
            Field::AnnualInterestRatePct => &self.annual_interest_rate_pct,
            Field::StopLossPrice => &self.stop_loss_price,
        }
    }

    /// Overwrite the raw text for `field`. This is a plain store; use the
    /// transitions in [`crate::sync`] for fields that drive a paired value.
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        match field {
            Field::StockName => self.stock_name = value,
            Field::BuyPrice => self.buy_price = value,
            Field::Shares => self.shares = value,
            Field::SellPrice => self.sell_price = value,
            Field::SellPercent => self.sell_percent = value,
            Field::MarginMultiplier => self.margin_multiplier = value,
            Field::MtfTargetPrice => self.mtf_target_price = value,
            Field::MtfTargetPercent => self.mtf_target_percent = value,
            Field::HoldingPeriodDays => self.holding_period_days = value,
            Field::AnnualInterestRatePct => self.annual_interest_rate_pct = value,
            Field::StopLossPrice => self.stop_loss_price = value,
        }
    }

    /// Parsed value of `field`, or `None` when blank or not a number.
    pub fn number(&self, field: Field) -> Option<Decimal> {
        parse_number(self.get(field))
    }
}

/// Parse user-entered text as a decimal number. Surrounding whitespace is
/// ignored; blank or malformed text yields `None`.
pub fn parse_number(raw: &str) -> Option<Decimal> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .ok()
}

/// Accept a field as text or as a bare number, so JSON and YAML documents can
/// write `"buy_price": 100` as well as `"buy_price": "100"`.
///
/// JSON numbers keep the digits exactly as written. YAML floats arrive as
/// `f64`; quote them when more than 15 significant digits matter.
fn raw_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Null => Ok(String::new()),
        other => Err(de::Error::invalid_type(
            unexpected(&other),
            &"a number, text or null",
        )),
    }
}

fn unexpected(value: &Value) -> de::Unexpected<'_> {
    match value {
        Value::Bool(b) => de::Unexpected::Bool(*b),
        Value::Array(_) => de::Unexpected::Seq,
        _ => de::Unexpected::Map,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_number_trims_and_rejects_garbage() {
        assert_eq!(parse_number(" 101.5 "), Some(dec!(101.5)));
        assert_eq!(parse_number("-3"), Some(dec!(-3)));
        assert_eq!(parse_number("1e2"), Some(dec!(100)));
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("   "), None);
        assert_eq!(parse_number("abc"), None);
    }

    #[test]
    fn test_get_set_roundtrip_every_field() {
        let fields = [
            Field::StockName,
            Field::BuyPrice,
            Field::Shares,
            Field::SellPrice,
            Field::SellPercent,
            Field::MarginMultiplier,
            Field::MtfTargetPrice,
            Field::MtfTargetPercent,
            Field::HoldingPeriodDays,
            Field::AnnualInterestRatePct,
            Field::StopLossPrice,
        ];
        let mut form = TradeFormState::new();
        for (i, field) in fields.iter().enumerate() {
            form.set(*field, i.to_string());
        }
        for (i, field) in fields.iter().enumerate() {
            assert_eq!(form.get(*field), i.to_string());
        }
    }

    #[test]
    fn test_deserialize_accepts_numbers_and_missing_fields() {
        let form: TradeFormState = serde_json::from_str(
            r#"{"stock_name": "INFY", "buy_price": 100, "shares": "10", "sell_price": 110.5, "stop_loss_price": null}"#,
        )
        .unwrap();
        assert_eq!(form.buy_price, "100");
        assert_eq!(form.shares, "10");
        assert_eq!(form.sell_price, "110.5");
        assert_eq!(form.stop_loss_price, "");
        assert!(!form.mtf_enabled);
        assert_eq!(form.margin_multiplier, "");
    }

    #[test]
    fn test_deserialize_keeps_full_precision_of_numbers() {
        let form: TradeFormState = serde_json::from_str(
            r#"{"buy_price": 1234567.123456789012, "shares": 0.1000000000000000055511151231}"#,
        )
        .unwrap();
        assert_eq!(form.buy_price, "1234567.123456789012");
        assert_eq!(form.number(Field::BuyPrice), Some(dec!(1234567.123456789012)));
        assert_eq!(form.number(Field::Shares), Some(dec!(0.1000000000000000055511151231)));
    }

    #[test]
    fn test_deserialize_rejects_non_scalar_fields() {
        let err = serde_json::from_str::<TradeFormState>(r#"{"buy_price": true}"#).unwrap_err();
        assert!(err.to_string().contains("a number, text or null"));
    }

    #[test]
    fn test_pair_fields() {
        assert_eq!(PricePair::Sell.price_field(), Field::SellPrice);
        assert_eq!(PricePair::Mtf.percent_field(), Field::MtfTargetPercent);
    }
}
