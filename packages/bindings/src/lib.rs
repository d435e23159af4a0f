use napi::Result as NapiResult;
use napi_derive::napi;

use trade_calc_core::form::parse_number;
use trade_calc_core::{Field, TradeFormState, TradeInput};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Validation and analysis
// ---------------------------------------------------------------------------

/// Validate a form snapshot. Returns `{"valid": true, "input": ...}` or
/// `{"valid": false, "errors": {field: reason}}`; never throws on bad input.
#[napi]
pub fn validate_trade(form_json: String) -> NapiResult<String> {
    let form: TradeFormState = serde_json::from_str(&form_json).map_err(to_napi_error)?;
    let report = match trade_calc_core::validate(&form) {
        Ok(input) => serde_json::json!({ "valid": true, "input": input }),
        Err(errors) => serde_json::json!({ "valid": false, "errors": errors }),
    };
    serde_json::to_string(&report).map_err(to_napi_error)
}

#[napi]
pub fn analyze_trade(form_json: String) -> NapiResult<String> {
    let form: TradeFormState = serde_json::from_str(&form_json).map_err(to_napi_error)?;
    let output = trade_calc_core::analyze_trade(&form).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

/// Calculate from an already typed input. The field rules are re-applied
/// since the input did not come through `validate_trade`.
#[napi]
pub fn calculate_trade(input_json: String) -> NapiResult<String> {
    let input: TradeInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    input
        .check()
        .map_err(trade_calc_core::TradeCalcError::from)
        .map_err(to_napi_error)?;
    let output = trade_calc_core::calculate(&input);
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Price/percent sync
// ---------------------------------------------------------------------------

/// Percent change for `price`, or `null` when either value is blank or
/// non-numeric, the buy price is not positive, or the result is out of range.
#[napi]
pub fn sync_from_price(buy_price: Option<String>, price: String) -> Option<String> {
    let buy = buy_price.as_deref().and_then(parse_number);
    parse_number(&price)
        .and_then(|p| trade_calc_core::sync_from_price(buy, p))
        .map(trade_calc_core::sync::format_display)
}

/// Price for a percent change, or `null` under the same conditions.
#[napi]
pub fn sync_from_percent(buy_price: Option<String>, percent: String) -> Option<String> {
    let buy = buy_price.as_deref().and_then(parse_number);
    parse_number(&percent)
        .and_then(|p| trade_calc_core::sync_from_percent(buy, p))
        .map(trade_calc_core::sync::format_display)
}

// ---------------------------------------------------------------------------
// Form state
// ---------------------------------------------------------------------------

/// Apply one user edit to a form snapshot and return the updated snapshot.
/// Price and percent fields drive their paired value; buy price re-derives
/// both targets.
#[napi]
pub fn edit_form(form_json: String, field: String, value: String) -> NapiResult<String> {
    let mut form: TradeFormState = serde_json::from_str(&form_json).map_err(to_napi_error)?;
    let field: Field =
        serde_json::from_value(serde_json::Value::String(field)).map_err(to_napi_error)?;
    form.edit(field, value);
    serde_json::to_string(&form).map_err(to_napi_error)
}
