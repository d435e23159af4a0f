use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::FieldErrors;
use crate::form::{parse_number, Field, TradeFormState};
use crate::types::*;

// ---------------------------------------------------------------------------
// Input limits
// ---------------------------------------------------------------------------

// Together these keep every intermediate of `calculate` inside `Decimal`
// range, so a validated trade can never overflow.

/// Largest accepted price, share count or stop-loss magnitude.
pub const MAX_AMOUNT: Decimal = dec!(1000000000);
/// Smallest accepted price or share count.
pub const MIN_AMOUNT: Decimal = dec!(0.000001);
pub const MAX_MARGIN_MULTIPLIER: Multiple = dec!(100);
pub const MAX_HOLDING_PERIOD_DAYS: Decimal = dec!(36500);
pub const MAX_ANNUAL_INTEREST_RATE_PCT: Percent = dec!(1000);

// ---------------------------------------------------------------------------
// Validated input types
// ---------------------------------------------------------------------------

/// Leveraged (margin trading facility) parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MtfParams {
    /// Buying power per unit of own margin; strictly greater than 1
    pub margin_multiplier: Multiple,
    /// Exit price per share for the leveraged position
    pub target_price: Money,
    /// Days the borrowed capital is held; at least 1
    pub holding_period_days: Decimal,
    /// Broker's annual interest rate in percent (12 = 12% p.a.)
    pub annual_interest_rate_pct: Percent,
}

/// A trade that has passed every field rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeInput {
    pub stock_name: String,
    pub buy_price: Money,
    pub shares: Decimal,
    pub sell_price: Money,
    /// Present iff MTF is enabled
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mtf: Option<MtfParams>,
    /// May sit above or below the buy price
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_loss_price: Option<Money>,
}

impl TradeInput {
    pub fn is_mtf_enabled(&self) -> bool {
        self.mtf.is_some()
    }

    /// Re-apply the field rules to an already typed input, e.g. one received
    /// over a binding boundary rather than built by [`validate`].
    pub fn check(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        check_stock_name(&self.stock_name, &mut errors);
        check_amount(Field::BuyPrice, self.buy_price, &mut errors);
        check_amount(Field::Shares, self.shares, &mut errors);
        check_amount(Field::SellPrice, self.sell_price, &mut errors);
        if let Some(mtf) = &self.mtf {
            check_mtf(
                Some(mtf.margin_multiplier),
                Some(mtf.target_price),
                Some(mtf.holding_period_days),
                Some(mtf.annual_interest_rate_pct),
                &mut errors,
            );
        }
        if let Some(stop) = self.stop_loss_price {
            check_stop_loss(stop, &mut errors);
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Validate a raw form snapshot.
///
/// Every field is checked and every failure reported, keyed by field. MTF
/// fields are ignored unless MTF is enabled. A blank stop-loss means "not
/// supplied"; a non-blank one has to be numeric and within [`MAX_AMOUNT`]
/// of zero. Prices and share counts must lie in `[MIN_AMOUNT, MAX_AMOUNT]`.
pub fn validate(raw: &TradeFormState) -> Result<TradeInput, FieldErrors> {
    let mut errors = FieldErrors::new();

    let stock_name = raw.stock_name.trim();
    check_stock_name(stock_name, &mut errors);

    let buy_price = required(raw, Field::BuyPrice, &mut errors);
    let shares = required(raw, Field::Shares, &mut errors);
    let sell_price = required(raw, Field::SellPrice, &mut errors);
    for (field, value) in [
        (Field::BuyPrice, buy_price),
        (Field::Shares, shares),
        (Field::SellPrice, sell_price),
    ] {
        if let Some(v) = value {
            check_amount(field, v, &mut errors);
        }
    }

    let mtf = if raw.mtf_enabled {
        let margin_multiplier = required(raw, Field::MarginMultiplier, &mut errors);
        let target_price = required(raw, Field::MtfTargetPrice, &mut errors);
        let holding_period_days = required(raw, Field::HoldingPeriodDays, &mut errors);
        let annual_interest_rate_pct = required(raw, Field::AnnualInterestRatePct, &mut errors);
        check_mtf(
            margin_multiplier,
            target_price,
            holding_period_days,
            annual_interest_rate_pct,
            &mut errors,
        );
        match (
            margin_multiplier,
            target_price,
            holding_period_days,
            annual_interest_rate_pct,
        ) {
            (Some(margin_multiplier), Some(target_price), Some(holding_period_days), Some(rate)) => {
                Some(MtfParams {
                    margin_multiplier,
                    target_price,
                    holding_period_days,
                    annual_interest_rate_pct: rate,
                })
            }
            _ => None,
        }
    } else {
        None
    };

    let stop_loss_price = optional(raw, Field::StopLossPrice, &mut errors);
    if let Some(stop) = stop_loss_price {
        check_stop_loss(stop, &mut errors);
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    match (buy_price, shares, sell_price) {
        (Some(buy_price), Some(shares), Some(sell_price)) => Ok(TradeInput {
            stock_name: stock_name.to_string(),
            buy_price,
            shares,
            sell_price,
            mtf,
            stop_loss_price,
        }),
        // Unreachable: a missing value always records an error above.
        _ => Err(errors),
    }
}

// ---------------------------------------------------------------------------
// Field rules
// ---------------------------------------------------------------------------

fn required(raw: &TradeFormState, field: Field, errors: &mut FieldErrors) -> Option<Decimal> {
    let text = raw.get(field);
    if text.trim().is_empty() {
        errors.insert(field, format!("{} is required", field.label()));
        return None;
    }
    let value = parse_number(text);
    if value.is_none() {
        errors.insert(field, format!("{} must be a valid number", field.label()));
    }
    value
}

fn optional(raw: &TradeFormState, field: Field, errors: &mut FieldErrors) -> Option<Decimal> {
    let text = raw.get(field);
    if text.trim().is_empty() {
        return None;
    }
    let value = parse_number(text);
    if value.is_none() {
        errors.insert(field, format!("{} must be a valid number", field.label()));
    }
    value
}

fn check_stock_name(name: &str, errors: &mut FieldErrors) {
    if name.trim().is_empty() {
        errors.insert(Field::StockName, "Stock name is required");
    }
}

fn check_positive(field: Field, value: Decimal, errors: &mut FieldErrors) {
    if value <= Decimal::ZERO {
        errors.insert(field, format!("{} must be greater than 0", field.label()));
    }
}

fn check_at_most(field: Field, value: Decimal, max: Decimal, errors: &mut FieldErrors) {
    if value > max {
        errors.insert(field, format!("{} is too large", field.label()));
    }
}

/// Prices and share counts: positive, not below [`MIN_AMOUNT`], not above
/// [`MAX_AMOUNT`].
fn check_amount(field: Field, value: Decimal, errors: &mut FieldErrors) {
    check_positive(field, value, errors);
    if value > Decimal::ZERO && value < MIN_AMOUNT {
        errors.insert(
            field,
            format!("{} must be at least {}", field.label(), MIN_AMOUNT),
        );
    }
    check_at_most(field, value, MAX_AMOUNT, errors);
}

fn check_stop_loss(value: Money, errors: &mut FieldErrors) {
    check_at_most(Field::StopLossPrice, value.abs(), MAX_AMOUNT, errors);
}

fn check_mtf(
    margin_multiplier: Option<Multiple>,
    target_price: Option<Money>,
    holding_period_days: Option<Decimal>,
    annual_interest_rate_pct: Option<Percent>,
    errors: &mut FieldErrors,
) {
    if let Some(m) = margin_multiplier {
        if m <= Decimal::ONE {
            errors.insert(
                Field::MarginMultiplier,
                "Margin multiplier must be greater than 1",
            );
        }
        check_at_most(Field::MarginMultiplier, m, MAX_MARGIN_MULTIPLIER, errors);
    }
    if let Some(p) = target_price {
        check_amount(Field::MtfTargetPrice, p, errors);
    }
    if let Some(d) = holding_period_days {
        if d < Decimal::ONE {
            errors.insert(
                Field::HoldingPeriodDays,
                "Holding period must be at least 1 day",
            );
        }
        check_at_most(Field::HoldingPeriodDays, d, MAX_HOLDING_PERIOD_DAYS, errors);
    }
    if let Some(r) = annual_interest_rate_pct {
        check_positive(Field::AnnualInterestRatePct, r, errors);
        check_at_most(
            Field::AnnualInterestRatePct,
            r,
            MAX_ANNUAL_INTEREST_RATE_PCT,
            errors,
        );
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
