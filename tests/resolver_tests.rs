// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use ratedesk::models::{Property, PropertyPayload};
use ratedesk::pricing::{Day, VillaCategory};
use ratedesk::resolver::{PricingSource, resolve_villa};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::{Value, json};

fn source(
    price: Decimal,
    mon_thu: Decimal,
    fri_sun: Decimal,
    sat: Decimal,
    onboarding: Value,
    admin: Value,
) -> PricingSource {
    PricingSource {
        price,
        price_mon_thu: mon_thu,
        price_fri_sun: fri_sun,
        price_sat: sat,
        onboarding,
        admin,
    }
}

fn bare(price: Decimal, onboarding: Value, admin: Value) -> PricingSource {
    source(
        price,
        Decimal::ZERO,
        Decimal::ZERO,
        Decimal::ZERO,
        onboarding,
        admin,
    )
}

#[test]
fn base_price_seeds_every_day() {
    let src = bare(dec!(1000), Value::Null, Value::Null);
    let grid = resolve_villa(&src);
    for day in Day::ALL {
        let c = grid.cell(day, VillaCategory::Villa);
        assert_eq!(c.current, dec!(1000));
        assert_eq!(c.discounted, dec!(1000));
        assert_eq!(c.r#final, dec!(1000));
        assert_eq!(c.vendor_discount_pct, Decimal::ZERO);
        assert_eq!(c.our_margin_pct, Decimal::ZERO);
        // No onboarding data, so the surcharge rows stay empty.
        assert_eq!(
            grid.cell(day, VillaCategory::ExtraPerson).current,
            Decimal::ZERO
        );
        assert_eq!(
            grid.cell(day, VillaCategory::MealPerson).r#final,
            Decimal::ZERO
        );
    }
}

#[test]
fn tariff_columns_split_by_bucket() {
    let src = source(
        dec!(900),
        dec!(1200),
        dec!(1500),
        dec!(1800),
        Value::Null,
        Value::Null,
    );
    let grid = resolve_villa(&src);
    assert_eq!(grid.wednesday.villa.current, dec!(1200));
    assert_eq!(grid.friday.villa.current, dec!(1500));
    // Sunday groups with Friday, never with Saturday.
    assert_eq!(grid.sunday.villa.current, dec!(1500));
    assert_eq!(grid.saturday.villa.current, dec!(1800));
}

#[test]
fn zero_column_falls_back_to_base() {
    let src = source(
        dec!(900),
        Decimal::ZERO,
        dec!(1500),
        Decimal::ZERO,
        Value::Null,
        Value::Null,
    );
    let grid = resolve_villa(&src);
    assert_eq!(grid.monday.villa.current, dec!(900));
    assert_eq!(grid.saturday.villa.current, dec!(900));
    assert_eq!(grid.friday.villa.current, dec!(1500));
}

#[test]
fn bucket_override_reprices_sunday() {
    let admin = json!({"fri_sun": {"villa": {"discounted": 1300, "final": 1600}}});
    let src = source(
        dec!(900),
        dec!(1200),
        dec!(1500),
        dec!(1800),
        Value::Null,
        admin,
    );
    let grid = resolve_villa(&src);
    let c = grid.sunday.villa;
    assert_eq!(c.current, dec!(1500));
    assert_eq!(c.discounted, dec!(1300));
    assert_eq!(c.r#final, dec!(1600));
    assert_eq!(c.vendor_discount_pct.round_dp(2), dec!(13.33));
    assert_eq!(c.our_margin_pct.round_dp(2), dec!(23.08));
    // Midweek is untouched by a fri_sun override.
    assert_eq!(grid.tuesday.villa.r#final, dec!(1200));
}

#[test]
fn day_key_beats_bucket_key() {
    let admin = json!({
        "sunday": {"villa": {"final": 1700}},
        "fri_sun": {"villa": {"final": 1600}}
    });
    let src = bare(dec!(1000), Value::Null, admin);
    let grid = resolve_villa(&src);
    assert_eq!(grid.sunday.villa.r#final, dec!(1700));
    // Friday has no day-keyed entry, so the bucket still applies.
    assert_eq!(grid.friday.villa.r#final, dec!(1600));
    assert_eq!(grid.monday.villa.r#final, dec!(1000));
}

#[test]
fn unusable_admin_values_are_skipped() {
    let admin = json!({"mon_thu": {"villa": {"final": 0, "current": "n/a"}}});
    let src = bare(dec!(1000), Value::Null, admin);
    let grid = resolve_villa(&src);
    assert_eq!(grid.monday.villa.current, dec!(1000));
    assert_eq!(grid.monday.villa.r#final, dec!(1000));
}

#[test]
fn string_amounts_from_old_records_parse() {
    let admin = json!({"mon_thu": {"villa": {"current": "2000", "discounted": "1800.50"}}});
    let src = bare(dec!(1000), Value::Null, admin);
    let grid = resolve_villa(&src);
    assert_eq!(grid.monday.villa.current, dec!(2000));
    assert_eq!(grid.monday.villa.discounted, dec!(1800.50));
    // (2000 - 1800.50) / 2000 * 100 = 9.975
    assert_eq!(grid.monday.villa.vendor_discount_pct, dec!(9.975));
}

#[test]
fn final_defaults_to_base_not_discounted() {
    let admin = json!({"mon_thu": {"villa": {"discounted": 900}}});
    let src = bare(dec!(1000), Value::Null, admin);
    let c = resolve_villa(&src).monday.villa;
    assert_eq!(c.current, dec!(1000));
    assert_eq!(c.discounted, dec!(900));
    // The customer price stays at the raw base until someone sets it.
    assert_eq!(c.r#final, dec!(1000));
    assert_eq!(c.vendor_discount_pct, dec!(10));
    assert_eq!(c.our_margin_pct.round_dp(2), dec!(11.11));
}

#[test]
fn extra_guest_flat_keys_take_priority() {
    let onboarding = json!({
        "extraGuestPriceMonThu": 300,
        "extraGuestPriceFriSun": 400,
        "extraGuestPriceSaturday": 500,
        "pricing": {"extraGuestCharge": {"week": 999}}
    });
    let src = bare(dec!(1000), onboarding, Value::Null);
    let grid = resolve_villa(&src);
    assert_eq!(grid.monday.extra_person.current, dec!(300));
    assert_eq!(grid.sunday.extra_person.current, dec!(400));
    assert_eq!(grid.saturday.extra_person.current, dec!(500));
}

#[test]
fn extra_guest_charge_object_by_bucket() {
    let onboarding = json!({"pricing": {"extraGuestCharge": {"week": 250, "weekend": 350, "saturday": 450}}});
    let src = bare(dec!(1000), onboarding, Value::Null);
    let grid = resolve_villa(&src);
    assert_eq!(grid.monday.extra_person.current, dec!(250));
    assert_eq!(grid.friday.extra_person.current, dec!(350));
    assert_eq!(grid.sunday.extra_person.current, dec!(350));
    assert_eq!(grid.saturday.extra_person.current, dec!(450));

    // Without a dedicated saturday rate the weekend rate covers it.
    let onboarding = json!({"pricing": {"extraGuestCharge": {"week": 250, "weekend": 350}}});
    let src = bare(dec!(1000), onboarding, Value::Null);
    let grid = resolve_villa(&src);
    assert_eq!(grid.saturday.extra_person.current, dec!(350));
}

#[test]
fn extra_guest_scalar_applies_everywhere() {
    let onboarding = json!({"pricing": {"extraGuestCharge": "200"}});
    let src = bare(dec!(1000), onboarding, Value::Null);
    let grid = resolve_villa(&src);
    for day in Day::ALL {
        assert_eq!(grid.cell(day, VillaCategory::ExtraPerson).current, dec!(200));
    }
}

#[test]
fn meal_rate_prefers_veg_then_falls_back() {
    let onboarding = json!({"foodRates": {"nonVeg": 450, "jain": 350}});
    let src = bare(dec!(1000), onboarding, Value::Null);
    let grid = resolve_villa(&src);
    assert_eq!(grid.monday.meal_person.current, dec!(450));
    assert_eq!(grid.monday.jain_meal_person.current, dec!(350));

    let onboarding = json!({"foodRates": {"veg": 400, "nonVeg": 450}});
    let src = bare(dec!(1000), onboarding, Value::Null);
    let grid = resolve_villa(&src);
    assert_eq!(grid.monday.meal_person.current, dec!(400));
    assert_eq!(grid.monday.jain_meal_person.current, Decimal::ZERO);
}

#[test]
fn malformed_stored_json_degrades_quietly() {
    let p = Property {
        id: 1,
        name: "Hill View".into(),
        property_type: "Villa".into(),
        location: String::new(),
        city: String::new(),
        max_guests: 0,
        rooms: 0,
        price: dec!(1200),
        price_mon_thu: Decimal::ZERO,
        price_fri_sun: Decimal::ZERO,
        price_sat: Decimal::ZERO,
        onboarding_data: Some("{not json".into()),
        admin_pricing: Some("also not json".into()),
        is_approved: false,
    };
    let src = PricingSource::from_property(&p);
    let grid = resolve_villa(&src);
    assert_eq!(grid.monday.villa.current, dec!(1200));
    assert_eq!(grid.monday.extra_person.current, Decimal::ZERO);
}

#[test]
fn double_encoded_payload_columns_unwrap() {
    // Older backend dumps ship the JSON columns as strings.
    let payload: PropertyPayload = serde_json::from_value(json!({
        "Name": "Old Import",
        "Price": "1500",
        "admin_pricing": "{\"mon_thu\":{\"villa\":{\"final\":1800}}}"
    }))
    .unwrap();
    let src = PricingSource::from_payload(&payload);
    let grid = resolve_villa(&src);
    assert_eq!(grid.monday.villa.current, dec!(1500));
    assert_eq!(grid.monday.villa.r#final, dec!(1800));
}
