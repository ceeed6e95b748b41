// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::Weekday;
use ratedesk::resolver::{PricingSource, display_price};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::{Value, json};

fn villa(price: Decimal, mon_thu: Decimal, fri_sun: Decimal, sat: Decimal, admin: Value) -> PricingSource {
    PricingSource {
        price,
        price_mon_thu: mon_thu,
        price_fri_sun: fri_sun,
        price_sat: sat,
        onboarding: Value::Null,
        admin,
    }
}

fn waterpark(price: Decimal, admin: Value) -> PricingSource {
    PricingSource {
        price,
        price_mon_thu: Decimal::ZERO,
        price_fri_sun: Decimal::ZERO,
        price_sat: Decimal::ZERO,
        onboarding: Value::Null,
        admin,
    }
}

#[test]
fn saved_final_wins_for_its_day() {
    let admin = json!({"tuesday": {"villa": {"final": 2500}}});
    let src = villa(dec!(1000), dec!(1200), dec!(1500), dec!(1800), admin);
    assert_eq!(display_price(&src, false, Weekday::Tue), dec!(2500));
    // Days without a saved final read their tariff column.
    assert_eq!(display_price(&src, false, Weekday::Mon), dec!(1200));
    assert_eq!(display_price(&src, false, Weekday::Sat), dec!(1800));
}

#[test]
fn zero_saved_final_is_not_a_price() {
    let admin = json!({"monday": {"villa": {"final": 0}}});
    let src = villa(dec!(1000), Decimal::ZERO, Decimal::ZERO, Decimal::ZERO, admin);
    assert_eq!(display_price(&src, false, Weekday::Mon), dec!(1000));
}

#[test]
fn sunday_reads_the_fri_sun_column() {
    let src = villa(
        dec!(900),
        dec!(1200),
        dec!(1500),
        dec!(1800),
        Value::Null,
    );
    assert_eq!(display_price(&src, false, Weekday::Sun), dec!(1500));
    assert_eq!(display_price(&src, false, Weekday::Fri), dec!(1500));
    assert_eq!(display_price(&src, false, Weekday::Thu), dec!(1200));
}

#[test]
fn bare_property_quotes_its_base_price() {
    let src = villa(dec!(900), Decimal::ZERO, Decimal::ZERO, Decimal::ZERO, Value::Null);
    for wd in [Weekday::Mon, Weekday::Fri, Weekday::Sat, Weekday::Sun] {
        assert_eq!(display_price(&src, false, wd), dec!(900));
    }
}

#[test]
fn waterpark_weekend_runs_friday_through_sunday() {
    let admin = json!({
        "adult_weekday": {"final": 500},
        "adult_weekend": {"final": 800}
    });
    let src = waterpark(dec!(450), admin);
    assert_eq!(display_price(&src, true, Weekday::Mon), dec!(500));
    assert_eq!(display_price(&src, true, Weekday::Thu), dec!(500));
    assert_eq!(display_price(&src, true, Weekday::Fri), dec!(800));
    assert_eq!(display_price(&src, true, Weekday::Sat), dec!(800));
    assert_eq!(display_price(&src, true, Weekday::Sun), dec!(800));
}

#[test]
fn single_rate_waterpark_records_still_quote() {
    let src = waterpark(dec!(450), json!({"adult_rate": {"discounted": 420}}));
    assert_eq!(display_price(&src, true, Weekday::Wed), dec!(420));

    let src = waterpark(dec!(450), json!({"adult": {"discounted": 350}}));
    assert_eq!(display_price(&src, true, Weekday::Sat), dec!(350));

    let src = waterpark(dec!(450), Value::Null);
    assert_eq!(display_price(&src, true, Weekday::Sat), dec!(450));
}
