use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use trade_calc_core::{sync_from_percent, sync_from_price, validate, PricePair, TradeFormState};

// ===========================================================================
// Price <-> percent synchronisation
// ===========================================================================

#[test]
fn test_round_trip_within_display_tolerance() {
    let buys = [dec!(0.75), dec!(3), dec!(37.5), dec!(100), dec!(999.99), dec!(2456.8)];
    let prices = [dec!(0.01), dec!(1), dec!(41.2), dec!(123.456), dec!(1000), dec!(5000.5)];
    for bp in buys {
        for price in prices {
            let pct = sync_from_price(Some(bp), price).unwrap();
            let back = sync_from_percent(Some(bp), pct).unwrap();
            // percent is off by at most 0.005 points, price rounding by 0.005
            let tolerance = bp * dec!(0.00005) + dec!(0.005) + dec!(0.0000001);
            assert!(
                (back - price).abs() <= tolerance,
                "bp {bp} price {price}: got {back} via {pct}%"
            );
        }
    }
}

#[test]
fn test_unset_without_buy_price() {
    assert_eq!(sync_from_price(None, dec!(10)), None);
    assert_eq!(sync_from_percent(Some(Decimal::ZERO), dec!(10)), None);
}

#[test]
fn test_form_edit_sequence_feeds_validation() {
    let mut form = TradeFormState {
        stock_name: "ITC".into(),
        shares: "40".into(),
        ..Default::default()
    };

    // Percent typed before buy price: nothing to derive yet
    form.on_percent_edited(PricePair::Sell, "8");
    assert_eq!(form.sell_price, "");

    // Buy price arrives; established percent drives the price
    form.on_buy_price_edited("250");
    assert_eq!(form.sell_price, "270.00");
    assert_eq!(form.sell_percent, "8");

    // Editing the price takes over
    form.on_price_edited(PricePair::Sell, "262.5");
    assert_eq!(form.sell_percent, "5.00");

    let input = validate(&form).unwrap();
    assert_eq!(input.buy_price, dec!(250));
    assert_eq!(input.sell_price, dec!(262.5));
    assert_eq!(form.mtf_target_price, "");
    assert_eq!(form.mtf_target_percent, "");
}
