//! Price/percent synchronisation.
//!
//! The plain sell target and the MTF target are each shown twice on the
//! form: as an absolute price and as a percent change from the buy price.
//! Whichever side the user edits last is authoritative; the other side is
//! recomputed. Buy price is the independent variable for both pairs.

use rust_decimal::Decimal;

use crate::form::{Field, PricePair, TradeFormState};
use crate::types::{round_display, Money, Percent};

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

// ---------------------------------------------------------------------------
// Pure conversions
// ---------------------------------------------------------------------------

/// Percent change of `new_price` from `buy_price`, rounded to 2 dp.
///
/// Returns `None` when the buy price is unknown or not positive, so callers
/// clear the percent instead of showing a value derived from a bad base.
/// A result outside `Decimal` range is also `None`.
pub fn sync_from_price(buy_price: Option<Money>, new_price: Money) -> Option<Percent> {
    let buy = positive(buy_price)?;
    let pct = new_price
        .checked_sub(buy)?
        .checked_div(buy)?
        .checked_mul(HUNDRED)?;
    Some(round_display(pct))
}

/// Price implied by a percent change from `buy_price`, rounded to 2 dp.
///
/// Returns `None` when the buy price is unknown or not positive, or when the
/// price would overflow.
pub fn sync_from_percent(buy_price: Option<Money>, new_percent: Percent) -> Option<Money> {
    let buy = positive(buy_price)?;
    let factor = Decimal::ONE.checked_add(new_percent.checked_div(HUNDRED)?)?;
    Some(round_display(buy.checked_mul(factor)?))
}

fn positive(value: Option<Decimal>) -> Option<Decimal> {
    value.filter(|v| *v > Decimal::ZERO)
}

// ---------------------------------------------------------------------------
// Form transitions
// ---------------------------------------------------------------------------

impl TradeFormState {
    /// The user typed into the price side of `pair`. Stores the text and
    /// recomputes the percent, clearing it when it cannot be derived.
    pub fn on_price_edited(&mut self, pair: PricePair, value: impl Into<String>) {
        self.set(pair.price_field(), value);
        self.refresh_percent(pair);
    }

    /// The user typed into the percent side of `pair`. Stores the text and
    /// recomputes the price. When the buy price or the percent is unusable
    /// the price keeps whatever the user last had there.
    pub fn on_percent_edited(&mut self, pair: PricePair, value: impl Into<String>) {
        self.set(pair.percent_field(), value);
        let buy = self.number(Field::BuyPrice);
        if let Some(price) = self
            .number(pair.percent_field())
            .and_then(|pct| sync_from_percent(buy, pct))
        {
            self.set(pair.price_field(), format_display(price));
        }
    }

    /// The user typed into the buy price. An established percent is kept and
    /// the price re-derived from it; a lone price gets its percent derived.
    /// Percent text that does not parse counts as no percent, so it is
    /// replaced by one derived from the price. An unusable buy price clears
    /// both percents.
    pub fn on_buy_price_edited(&mut self, value: impl Into<String>) {
        self.set(Field::BuyPrice, value);
        let buy = self.number(Field::BuyPrice);

        for pair in [PricePair::Sell, PricePair::Mtf] {
            if positive(buy).is_none() {
                self.set(pair.percent_field(), "");
                continue;
            }
            match self.number(pair.percent_field()) {
                Some(pct) => {
                    if let Some(price) = sync_from_percent(buy, pct) {
                        self.set(pair.price_field(), format_display(price));
                    }
                }
                None => self.refresh_percent(pair),
            }
        }
    }

    /// Route a user edit of `field` to the matching transition. Fields
    /// outside the price/percent pairs are stored as typed.
    pub fn edit(&mut self, field: Field, value: impl Into<String>) {
        match field {
            Field::BuyPrice => self.on_buy_price_edited(value),
            Field::SellPrice => self.on_price_edited(PricePair::Sell, value),
            Field::SellPercent => self.on_percent_edited(PricePair::Sell, value),
            Field::MtfTargetPrice => self.on_price_edited(PricePair::Mtf, value),
            Field::MtfTargetPercent => self.on_percent_edited(PricePair::Mtf, value),
            other => self.set(other, value),
        }
    }

    fn refresh_percent(&mut self, pair: PricePair) {
        let buy = self.number(Field::BuyPrice);
        let percent = self
            .number(pair.price_field())
            .and_then(|price| sync_from_price(buy, price));
        let text = percent.map(format_display).unwrap_or_default();
        self.set(pair.percent_field(), text);
    }
}

/// Render a synchronised value with exactly two decimals ("10.00").
pub fn format_display(value: Decimal) -> String {
    format!("{:.2}", round_display(value))
}
