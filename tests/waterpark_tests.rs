// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use ratedesk::pricing::TicketCategory;
use ratedesk::resolver::{PricingSource, resolve_waterpark};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::{Value, json};

fn source(onboarding: Value, admin: Value) -> PricingSource {
    PricingSource {
        price: Decimal::ZERO,
        price_mon_thu: Decimal::ZERO,
        price_fri_sun: Decimal::ZERO,
        price_sat: Decimal::ZERO,
        onboarding,
        admin,
    }
}

#[test]
fn waterpark_prices_feed_all_four_tickets() {
    let onboarding = json!({"pricing": {"waterparkPrices": {
        "adultWeekday": 500, "adultWeekend": 700, "childWeekday": 300, "childWeekend": 400
    }}});
    let grid = resolve_waterpark(&source(onboarding, Value::Null));
    assert_eq!(grid.adult_weekday.current, dec!(500));
    assert_eq!(grid.adult_weekend.current, dec!(700));
    assert_eq!(grid.child_weekday.current, dec!(300));
    assert_eq!(grid.child_weekend.current, dec!(400));
    // Fresh tickets carry no discount or margin.
    for ticket in TicketCategory::ALL {
        let c = grid.cell(ticket);
        assert_eq!(c.discounted, c.current);
        assert_eq!(c.r#final, c.current);
        assert_eq!(c.vendor_discount_pct, Decimal::ZERO);
        assert_eq!(c.our_margin_pct, Decimal::ZERO);
    }
}

#[test]
fn shared_ticket_prices_cover_both_day_kinds() {
    let onboarding = json!({"ticketPrices": {"adult": 600, "child": 350}});
    let grid = resolve_waterpark(&source(onboarding, Value::Null));
    assert_eq!(grid.adult_weekday.current, dec!(600));
    assert_eq!(grid.adult_weekend.current, dec!(600));
    assert_eq!(grid.child_weekday.current, dec!(350));
    assert_eq!(grid.child_weekend.current, dec!(350));
}

#[test]
fn child_pricing_split_wins_over_shared_rate() {
    let onboarding = json!({
        "childPricing": {"monFri": "250", "satSun": "380"},
        "ticketPrices": {"child": 999}
    });
    let grid = resolve_waterpark(&source(onboarding, Value::Null));
    assert_eq!(grid.child_weekday.current, dec!(250));
    assert_eq!(grid.child_weekend.current, dec!(380));
}

#[test]
fn historical_child_criteria_prices_still_resolve() {
    // Some old records kept the child fares inside the criteria block.
    let onboarding = json!({
        "childCriteria": {"freeAge": 5, "weekdayPrice": "275", "weekendPrice": 425},
        "ticketPrices": {"child": 999}
    });
    let grid = resolve_waterpark(&source(onboarding, Value::Null));
    assert_eq!(grid.child_weekday.current, dec!(275));
    assert_eq!(grid.child_weekend.current, dec!(425));

    // A shared price key covers both day kinds.
    let onboarding = json!({"childCriteria": {"price": 300}});
    let grid = resolve_waterpark(&source(onboarding, Value::Null));
    assert_eq!(grid.child_weekday.current, dec!(300));
    assert_eq!(grid.child_weekend.current, dec!(300));
}

#[test]
fn plain_weekday_weekend_is_the_last_resort() {
    let onboarding = json!({"pricing": {"weekday": 450, "weekend": 650}});
    let grid = resolve_waterpark(&source(onboarding, Value::Null));
    assert_eq!(grid.adult_weekday.current, dec!(450));
    assert_eq!(grid.adult_weekend.current, dec!(650));
    assert_eq!(grid.child_weekday.current, Decimal::ZERO);
    assert_eq!(grid.child_weekend.current, Decimal::ZERO);
}

#[test]
fn historical_adult_rate_key_overrides_both_splits() {
    let onboarding = json!({"ticketPrices": {"adult": 600, "child": 350}});
    let admin = json!({"adult_rate": {"current": 650, "discounted": 550, "final": 750}});
    let grid = resolve_waterpark(&source(onboarding, admin));
    for ticket in [TicketCategory::AdultWeekday, TicketCategory::AdultWeekend] {
        let c = grid.cell(ticket);
        assert_eq!(c.current, dec!(650));
        assert_eq!(c.discounted, dec!(550));
        assert_eq!(c.r#final, dec!(750));
        // (650 - 550) / 650 * 100 = 15.38; (750 - 550) / 550 * 100 = 36.36
        assert_eq!(c.vendor_discount_pct.round_dp(2), dec!(15.38));
        assert_eq!(c.our_margin_pct.round_dp(2), dec!(36.36));
    }
    assert_eq!(grid.child_weekday.current, dec!(350));
}

#[test]
fn split_key_beats_historical_key() {
    let admin = json!({
        "adult_weekday": {"final": 520},
        "adult_rate": {"final": 480}
    });
    let grid = resolve_waterpark(&source(Value::Null, admin));
    assert_eq!(grid.adult_weekday.r#final, dec!(520));
    // No adult_weekend entry, so the historical key still applies there.
    assert_eq!(grid.adult_weekend.r#final, dec!(480));
    // No base price anywhere: current stays zero and so do the percentages.
    assert_eq!(grid.adult_weekday.current, Decimal::ZERO);
    assert_eq!(grid.adult_weekday.our_margin_pct, Decimal::ZERO);
}

#[test]
fn no_source_at_all_stays_zero() {
    let grid = resolve_waterpark(&source(Value::Null, Value::Null));
    for ticket in TicketCategory::ALL {
        assert_eq!(*grid.cell(ticket), Default::default());
    }
}
