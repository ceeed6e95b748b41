// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::Weekday;
use rust_decimal::Decimal;
use serde_json::Value;

use crate::models::{Property, PropertyPayload, lenient};
use crate::pricing::{
    Bucket, Day, PricingMatrix, RateCell, TicketCategory, VillaCategory, VillaDayRates, VillaGrid,
    WaterparkGrid, cell_from_amounts,
};

/// Everything rate resolution reads for one property. The JSON columns are
/// parsed up front; unreadable JSON degrades to Null so resolution itself
/// can never fail.
#[derive(Debug, Clone)]
pub struct PricingSource {
    pub price: Decimal,
    pub price_mon_thu: Decimal,
    pub price_fri_sun: Decimal,
    pub price_sat: Decimal,
    pub onboarding: Value,
    pub admin: Value,
}

impl PricingSource {
    pub fn from_property(p: &Property) -> PricingSource {
        PricingSource {
            price: p.price,
            price_mon_thu: p.price_mon_thu,
            price_fri_sun: p.price_fri_sun,
            price_sat: p.price_sat,
            onboarding: parse_json_text(p.onboarding_data.as_deref()),
            admin: parse_json_text(p.admin_pricing.as_deref()),
        }
    }

    pub fn from_payload(p: &PropertyPayload) -> PricingSource {
        PricingSource {
            price: p.price,
            price_mon_thu: p.price_mon_thu,
            price_fri_sun: p.price_fri_sun,
            price_sat: p.price_sat,
            onboarding: unwrap_json(p.onboarding_data.clone()),
            admin: unwrap_json(p.admin_pricing.clone()),
        }
    }
}

pub fn parse_json_text(s: Option<&str>) -> Value {
    s.and_then(|s| serde_json::from_str(s).ok())
        .unwrap_or(Value::Null)
}

// Older backend dumps double-encode the JSON columns as strings.
fn unwrap_json(v: Option<Value>) -> Value {
    match v {
        Some(Value::String(s)) => serde_json::from_str(&s).unwrap_or(Value::Null),
        Some(v) => v,
        None => Value::Null,
    }
}

fn node<'a>(v: &'a Value, path: &[&str]) -> Option<&'a Value> {
    let mut cur = v;
    for key in path {
        cur = cur.get(key)?;
    }
    Some(cur)
}

fn amount_at(v: &Value, path: &[&str]) -> Option<Decimal> {
    let n = node(v, path)?;
    if n.is_null() {
        return None;
    }
    Some(lenient::decimal_from_value(n))
}

/// First non-zero amount along an ordered list of candidate paths. Zero and
/// garbage both count as "not set" so the next generation of data gets a
/// chance, matching how the approval screens always read these fields.
fn first_usable(v: &Value, candidates: &[&[&str]]) -> Option<Decimal> {
    candidates
        .iter()
        .find_map(|path| amount_at(v, path).filter(|d| !d.is_zero()))
}

/// Admin override for one cell field, trying the day key first and the
/// legacy three-bucket key second.
fn admin_amount(admin: &Value, groups: &[&str], category: &str, field: &str) -> Option<Decimal> {
    groups
        .iter()
        .find_map(|g| amount_at(admin, &[g, category, field]).filter(|d| !d.is_zero()))
}

fn villa_column(src: &PricingSource, bucket: Bucket) -> Decimal {
    let col = match bucket {
        Bucket::MonThu => src.price_mon_thu,
        Bucket::FriSun => src.price_fri_sun,
        Bucket::Sat => src.price_sat,
    };
    if col.is_zero() { src.price } else { col }
}

fn extra_person_base(onboarding: &Value, bucket: Bucket) -> Decimal {
    // Newest records keep flat per-bucket keys at the onboarding root; the
    // mon_thu key doubles as the format marker.
    if first_usable(onboarding, &[&["extraGuestPriceMonThu"]]).is_some() {
        let key = match bucket {
            Bucket::MonThu => "extraGuestPriceMonThu",
            Bucket::FriSun => "extraGuestPriceFriSun",
            Bucket::Sat => "extraGuestPriceSaturday",
        };
        return amount_at(onboarding, &[key]).unwrap_or(Decimal::ZERO);
    }
    match node(onboarding, &["pricing", "extraGuestCharge"]) {
        Some(charge @ Value::Object(_)) => {
            let keys: &[&str] = match bucket {
                Bucket::MonThu => &["week", "weekday"],
                Bucket::FriSun => &["weekend"],
                Bucket::Sat => &["saturday", "weekend"],
            };
            keys.iter()
                .find_map(|k| amount_at(charge, &[k]).filter(|d| !d.is_zero()))
                .unwrap_or(Decimal::ZERO)
        }
        Some(scalar) => lenient::decimal_from_value(scalar),
        None => Decimal::ZERO,
    }
}

fn meal_base(onboarding: &Value) -> Decimal {
    first_usable(
        onboarding,
        &[
            &["foodRates", "veg"],
            &["foodRates", "nonVeg"],
            &["foodRates", "jain"],
        ],
    )
    .unwrap_or(Decimal::ZERO)
}

fn jain_meal_base(onboarding: &Value) -> Decimal {
    first_usable(onboarding, &[&["foodRates", "jain"]]).unwrap_or(Decimal::ZERO)
}

// Candidate order is newest data generation first: the per-ticket
// waterparkPrices block, then the vendor childPricing split, then the price
// keys some historical records keep inside childCriteria, then the seeded
// flat ticketPrices, and for adults the plain weekday/weekend entry price.
fn ticket_base(onboarding: &Value, ticket: TicketCategory) -> Decimal {
    let candidates: &[&[&str]] = match ticket {
        TicketCategory::AdultWeekday => &[
            &["pricing", "waterparkPrices", "adultWeekday"],
            &["ticketPrices", "adult"],
            &["pricing", "weekday"],
        ],
        TicketCategory::AdultWeekend => &[
            &["pricing", "waterparkPrices", "adultWeekend"],
            &["ticketPrices", "adult"],
            &["pricing", "weekend"],
        ],
        TicketCategory::ChildWeekday => &[
            &["pricing", "waterparkPrices", "childWeekday"],
            &["childPricing", "monFri"],
            &["childCriteria", "weekdayPrice"],
            &["childCriteria", "monFriPrice"],
            &["childCriteria", "price"],
            &["ticketPrices", "child"],
        ],
        TicketCategory::ChildWeekend => &[
            &["pricing", "waterparkPrices", "childWeekend"],
            &["childPricing", "satSun"],
            &["childCriteria", "weekendPrice"],
            &["childCriteria", "price"],
            &["ticketPrices", "child"],
        ],
    };
    first_usable(onboarding, candidates).unwrap_or(Decimal::ZERO)
}

/// Seed one villa cell. `current` and `final` both default to the legacy
/// base when no admin override exists (zero margin on a fresh property);
/// `discounted` defaults to the resolved `current`.
fn resolve_cell(src: &PricingSource, day: Day, category: VillaCategory, base: Decimal) -> RateCell {
    let groups = [day.as_str(), day.bucket().as_str()];
    let cat = category.as_str();
    let current = admin_amount(&src.admin, &groups, cat, "current").unwrap_or(base);
    let discounted = admin_amount(&src.admin, &groups, cat, "discounted").unwrap_or(current);
    let final_price = admin_amount(&src.admin, &groups, cat, "final").unwrap_or(base);
    cell_from_amounts(current, discounted, final_price)
}

pub fn resolve_villa(src: &PricingSource) -> VillaGrid {
    let mut grid = VillaGrid::default();
    for day in Day::ALL {
        let bucket = day.bucket();
        *grid.day_mut(day) = VillaDayRates {
            villa: resolve_cell(src, day, VillaCategory::Villa, villa_column(src, bucket)),
            extra_person: resolve_cell(
                src,
                day,
                VillaCategory::ExtraPerson,
                extra_person_base(&src.onboarding, bucket),
            ),
            meal_person: resolve_cell(
                src,
                day,
                VillaCategory::MealPerson,
                meal_base(&src.onboarding),
            ),
            jain_meal_person: resolve_cell(
                src,
                day,
                VillaCategory::JainMealPerson,
                jain_meal_base(&src.onboarding),
            ),
        };
    }
    grid
}

fn resolve_ticket(src: &PricingSource, ticket: TicketCategory) -> RateCell {
    let groups = ticket.lookup_keys();
    let base = ticket_base(&src.onboarding, ticket);
    let current = flat_admin_amount(&src.admin, groups, "current").unwrap_or(base);
    let discounted = flat_admin_amount(&src.admin, groups, "discounted").unwrap_or(current);
    let final_price = flat_admin_amount(&src.admin, groups, "final").unwrap_or(base);
    cell_from_amounts(current, discounted, final_price)
}

fn flat_admin_amount(admin: &Value, keys: &[&str], field: &str) -> Option<Decimal> {
    keys.iter()
        .find_map(|k| amount_at(admin, &[k, field]).filter(|d| !d.is_zero()))
}

pub fn resolve_waterpark(src: &PricingSource) -> WaterparkGrid {
    let mut grid = WaterparkGrid::default();
    for ticket in TicketCategory::ALL {
        *grid.cell_mut(ticket) = resolve_ticket(src, ticket);
    }
    grid
}

pub fn resolve(src: &PricingSource, waterpark: bool) -> PricingMatrix {
    if waterpark {
        PricingMatrix::Waterpark(resolve_waterpark(src))
    } else {
        PricingMatrix::Villa(resolve_villa(src))
    }
}

/// Price the marketplace would display for the given calendar day. Mirrors
/// the public listing screen: a saved admin final wins, then the legacy
/// tariff column for the day's bucket, then the raw base price.
pub fn display_price(src: &PricingSource, waterpark: bool, weekday: Weekday) -> Decimal {
    let day = Day::from_weekday(weekday);
    if waterpark {
        let key = if matches!(day, Day::Friday | Day::Saturday | Day::Sunday) {
            "adult_weekend"
        } else {
            "adult_weekday"
        };
        if let Some(v) = amount_at(&src.admin, &[key, "final"]).filter(|d| *d > Decimal::ZERO) {
            return v;
        }
        // Historical single-rate records kept only a discounted adult price.
        if let Some(v) = amount_at(&src.admin, &["adult_rate", "discounted"]) {
            return v;
        }
        if let Some(v) = amount_at(&src.admin, &["adult", "discounted"]) {
            return v;
        }
        return src.price;
    }
    if let Some(v) =
        amount_at(&src.admin, &[day.as_str(), "villa", "final"]).filter(|d| *d > Decimal::ZERO)
    {
        return v;
    }
    let col = match day.bucket() {
        Bucket::MonThu => src.price_mon_thu,
        Bucket::FriSun => src.price_fri_sun,
        Bucket::Sat => src.price_sat,
    };
    if col.is_zero() { src.price } else { col }
}
