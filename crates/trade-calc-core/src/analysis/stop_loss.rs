use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::*;

/// Hypothetical outcome of exiting the plain position at the stop-loss.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StopLossAnalysis {
    pub stop_loss_price: Money,
    /// Negative when the stop sits below the buy price
    pub stop_loss_amount: Money,
    pub stop_loss_pct: Percent,
}

/// Linear impact of a stop-loss on the unleveraged position.
pub fn stop_loss_analysis(
    buy_price: Money,
    shares: Decimal,
    stop_loss_price: Money,
) -> StopLossAnalysis {
    let move_per_share = stop_loss_price - buy_price;
    StopLossAnalysis {
        stop_loss_price,
        stop_loss_amount: move_per_share * shares,
        stop_loss_pct: move_per_share / buy_price * Decimal::ONE_HUNDRED,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_stop_below_buy() {
        let out = stop_loss_analysis(dec!(100), dec!(10), dec!(90));
        assert_eq!(out.stop_loss_amount, dec!(-100));
        assert_eq!(out.stop_loss_pct, dec!(-10));
    }

    #[test]
    fn test_stop_above_buy_is_a_gain() {
        let out = stop_loss_analysis(dec!(200), dec!(3), dec!(205));
        assert_eq!(out.stop_loss_amount, dec!(15));
        assert_eq!(out.stop_loss_pct, dec!(2.5));
    }

    fn sign(value: Decimal) -> i8 {
        if value > Decimal::ZERO {
            1
        } else if value < Decimal::ZERO {
            -1
        } else {
            0
        }
    }

    #[test]
    fn test_sign_follows_price_move() {
        for stop in [dec!(0), dec!(49.99), dec!(50), dec!(50.01), dec!(75)] {
            let out = stop_loss_analysis(dec!(50), dec!(7), stop);
            let expected = sign(stop - dec!(50));
            assert_eq!(sign(out.stop_loss_amount), expected);
            assert_eq!(sign(out.stop_loss_pct), expected);
        }
    }
}
