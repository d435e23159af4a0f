pub mod mtf;
pub mod stop_loss;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::form::TradeFormState;
use crate::types::*;
use crate::validation::{validate, TradeInput};
use crate::TradeCalcResult;

pub use mtf::{mtf_analysis, MtfAnalysis};
pub use stop_loss::{stop_loss_analysis, StopLossAnalysis};

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// Everything computed for one trade. Produced fresh per calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub stock_name: String,
    /// buy_price × shares
    pub total_invested: Money,
    /// sell_price × shares
    pub total_sell_amount: Money,
    pub profit_loss: Money,
    /// profit_loss as a percent of total_invested
    pub profit_loss_pct: Percent,
    /// Present iff MTF is enabled
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mtf: Option<MtfAnalysis>,
    /// Present iff a stop-loss price was supplied
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_loss: Option<StopLossAnalysis>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Compute baseline, leveraged and stop-loss economics for a validated trade.
///
/// Total over anything [`validate`] or [`TradeInput::check`] accepts: buy
/// price and shares are positive and the margin multiplier exceeds 1, so no
/// division can fail, and the input limits in [`crate::validation`] keep
/// every product inside `Decimal` range. Values are kept at full precision;
/// rounding is left to the presenter.
pub fn calculate(input: &TradeInput) -> AnalysisResult {
    let total_invested = input.buy_price * input.shares;
    let total_sell_amount = input.sell_price * input.shares;
    let profit_loss = total_sell_amount - total_invested;
    let profit_loss_pct = profit_loss / total_invested * Decimal::ONE_HUNDRED;

    let mtf = input
        .mtf
        .as_ref()
        .map(|params| mtf_analysis(input.buy_price, total_invested, params));

    let stop_loss = input
        .stop_loss_price
        .map(|stop| stop_loss_analysis(input.buy_price, input.shares, stop));

    AnalysisResult {
        stock_name: input.stock_name.clone(),
        total_invested,
        total_sell_amount,
        profit_loss,
        profit_loss_pct,
        mtf,
        stop_loss,
    }
}

/// Validate a form snapshot and, if it passes, analyse the trade.
///
/// Validation failures surface as [`crate::TradeCalcError::Validation`]
/// carrying every failing field; nothing is calculated in that case.
pub fn analyze_trade(form: &TradeFormState) -> TradeCalcResult<ComputationOutput<AnalysisResult>> {
    let start = Instant::now();

    let input = validate(form)?;
    let result = calculate(&input);
    let warnings = collect_warnings(&input, &result);

    let assumptions = serde_json::json!({
        "position": "long, single lot",
        "interest": "simple, annual rate prorated by holding_days / 365",
        "mtf_return_base": "required margin (own capital)",
        "stop_loss": "unleveraged position, no slippage",
        "input": serde_json::to_value(&input)?,
    });

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Equity Trade P&L with MTF Leverage and Stop-Loss",
        &assumptions,
        warnings,
        elapsed,
        result,
    ))
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn collect_warnings(input: &TradeInput, result: &AnalysisResult) -> Vec<String> {
    let mut warnings = Vec::new();

    if input.sell_price < input.buy_price {
        warnings.push(format!(
            "Sell price {} is below buy price {}: position closes at a loss",
            input.sell_price, input.buy_price
        ));
    }

    if let (Some(params), Some(mtf)) = (&input.mtf, &result.mtf) {
        if params.target_price < mtf.break_even_price {
            warnings.push(format!(
                "MTF target price {} is below break-even {}: net loss after interest",
                params.target_price,
                round_display(mtf.break_even_price)
            ));
        }
    }

    if let Some(stop) = input.stop_loss_price {
        if stop >= input.buy_price {
            warnings.push(format!(
                "Stop-loss {} is at or above buy price {}: it does not limit downside",
                stop, input.buy_price
            ));
        }
    }

    warnings
}
