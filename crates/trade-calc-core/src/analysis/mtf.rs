use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::*;
use crate::validation::MtfParams;

/// Day count for prorating the broker's annual rate.
pub const DAYS_PER_YEAR: Decimal = dec!(365);

/// Economics of the leveraged position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MtfAnalysis {
    /// Own capital × multiplier
    pub buying_power: Money,
    /// Trader's own capital at risk
    pub required_margin: Money,
    pub mtf_shares: Decimal,
    /// Capital supplied by the broker
    pub borrowed_amount: Money,
    /// Simple interest on the borrowed amount over the holding period
    pub interest_cost: Money,
    pub sell_amount: Money,
    /// Profit/loss at the target price before interest
    pub gross_profit_loss: Money,
    pub net_profit_loss: Money,
    /// Net profit/loss as a percent of required margin
    pub profit_loss_pct: Percent,
    /// Exit price at which net profit/loss is zero
    pub break_even_price: Money,
}

/// Leveraged economics for a position whose own capital is `total_invested`.
///
/// Each step reads only earlier steps. `required_margin` is derived from
/// buying power rather than reused from `total_invested`; the two agree
/// while buying power is a fixed multiple of invested capital.
pub fn mtf_analysis(buy_price: Money, total_invested: Money, params: &MtfParams) -> MtfAnalysis {
    let hundred = Decimal::ONE_HUNDRED;

    let buying_power = total_invested * params.margin_multiplier;
    let required_margin = buying_power / params.margin_multiplier;
    let mtf_shares = buying_power / buy_price;
    let borrowed_amount = buying_power - required_margin;
    let interest_cost = borrowed_amount
        * (params.annual_interest_rate_pct / hundred)
        * (params.holding_period_days / DAYS_PER_YEAR);

    let sell_amount = mtf_shares * params.target_price;
    let gross_profit_loss = sell_amount - buying_power;
    let net_profit_loss = gross_profit_loss - interest_cost;
    let profit_loss_pct = net_profit_loss / required_margin * hundred;
    let break_even_price = buy_price + interest_cost / mtf_shares;

    MtfAnalysis {
        buying_power,
        required_margin,
        mtf_shares,
        borrowed_amount,
        interest_cost,
        sell_amount,
        gross_profit_loss,
        net_profit_loss,
        profit_loss_pct,
        break_even_price,
    }
}
