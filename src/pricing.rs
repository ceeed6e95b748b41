// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Day {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Day {
    pub const ALL: [Day; 7] = [
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
        Day::Saturday,
        Day::Sunday,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Day::Monday => "monday",
            Day::Tuesday => "tuesday",
            Day::Wednesday => "wednesday",
            Day::Thursday => "thursday",
            Day::Friday => "friday",
            Day::Saturday => "saturday",
            Day::Sunday => "sunday",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Day::Monday => "Monday",
            Day::Tuesday => "Tuesday",
            Day::Wednesday => "Wednesday",
            Day::Thursday => "Thursday",
            Day::Friday => "Friday",
            Day::Saturday => "Saturday",
            Day::Sunday => "Sunday",
        }
    }

    /// Legacy tariff bucket. Sunday rides with Friday, not Saturday; the
    /// historical rate sheets grouped it that way and saved data depends on it.
    pub fn bucket(self) -> Bucket {
        match self {
            Day::Friday | Day::Sunday => Bucket::FriSun,
            Day::Saturday => Bucket::Sat,
            _ => Bucket::MonThu,
        }
    }

    pub fn parse(s: &str) -> Option<Day> {
        match s.trim().to_lowercase().as_str() {
            "monday" | "mon" => Some(Day::Monday),
            "tuesday" | "tue" => Some(Day::Tuesday),
            "wednesday" | "wed" => Some(Day::Wednesday),
            "thursday" | "thu" => Some(Day::Thursday),
            "friday" | "fri" => Some(Day::Friday),
            "saturday" | "sat" => Some(Day::Saturday),
            "sunday" | "sun" => Some(Day::Sunday),
            _ => None,
        }
    }

    pub fn from_weekday(w: chrono::Weekday) -> Day {
        match w {
            chrono::Weekday::Mon => Day::Monday,
            chrono::Weekday::Tue => Day::Tuesday,
            chrono::Weekday::Wed => Day::Wednesday,
            chrono::Weekday::Thu => Day::Thursday,
            chrono::Weekday::Fri => Day::Friday,
            chrono::Weekday::Sat => Day::Saturday,
            chrono::Weekday::Sun => Day::Sunday,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bucket {
    MonThu,
    FriSun,
    Sat,
}

impl Bucket {
    pub const ALL: [Bucket; 3] = [Bucket::MonThu, Bucket::FriSun, Bucket::Sat];

    pub fn as_str(self) -> &'static str {
        match self {
            Bucket::MonThu => "mon_thu",
            Bucket::FriSun => "fri_sun",
            Bucket::Sat => "sat",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VillaCategory {
    Villa,
    ExtraPerson,
    MealPerson,
    JainMealPerson,
}

impl VillaCategory {
    pub const ALL: [VillaCategory; 4] = [
        VillaCategory::Villa,
        VillaCategory::ExtraPerson,
        VillaCategory::MealPerson,
        VillaCategory::JainMealPerson,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            VillaCategory::Villa => "villa",
            VillaCategory::ExtraPerson => "extra_person",
            VillaCategory::MealPerson => "meal_person",
            VillaCategory::JainMealPerson => "jain_meal_person",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            VillaCategory::Villa => "Villa",
            VillaCategory::ExtraPerson => "Extra person",
            VillaCategory::MealPerson => "Meal per person",
            VillaCategory::JainMealPerson => "Jain meal per person",
        }
    }

    pub fn parse(s: &str) -> Option<VillaCategory> {
        match s.trim().to_lowercase().as_str() {
            "villa" => Some(VillaCategory::Villa),
            "extra_person" => Some(VillaCategory::ExtraPerson),
            "meal_person" => Some(VillaCategory::MealPerson),
            "jain_meal_person" => Some(VillaCategory::JainMealPerson),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TicketCategory {
    AdultWeekday,
    AdultWeekend,
    ChildWeekday,
    ChildWeekend,
}

impl TicketCategory {
    pub const ALL: [TicketCategory; 4] = [
        TicketCategory::AdultWeekday,
        TicketCategory::AdultWeekend,
        TicketCategory::ChildWeekday,
        TicketCategory::ChildWeekend,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TicketCategory::AdultWeekday => "adult_weekday",
            TicketCategory::AdultWeekend => "adult_weekend",
            TicketCategory::ChildWeekday => "child_weekday",
            TicketCategory::ChildWeekend => "child_weekend",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TicketCategory::AdultWeekday => "Adult weekday",
            TicketCategory::AdultWeekend => "Adult weekend",
            TicketCategory::ChildWeekday => "Child weekday",
            TicketCategory::ChildWeekend => "Child weekend",
        }
    }

    /// Saved-matrix keys to try, newest first. Early waterpark records kept a
    /// single `adult_rate`/`child_rate` (or even `adult`/`child`) entry with
    /// no weekday split.
    pub fn lookup_keys(self) -> &'static [&'static str] {
        match self {
            TicketCategory::AdultWeekday => &["adult_weekday", "adult_rate", "adult"],
            TicketCategory::AdultWeekend => &["adult_weekend", "adult_rate", "adult"],
            TicketCategory::ChildWeekday => &["child_weekday", "child_rate", "child"],
            TicketCategory::ChildWeekend => &["child_weekend", "child_rate", "child"],
        }
    }

    pub fn parse(s: &str) -> Option<TicketCategory> {
        match s.trim().to_lowercase().as_str() {
            "adult_weekday" => Some(TicketCategory::AdultWeekday),
            "adult_weekend" => Some(TicketCategory::AdultWeekend),
            "child_weekday" => Some(TicketCategory::ChildWeekday),
            "child_weekend" => Some(TicketCategory::ChildWeekend),
            _ => None,
        }
    }
}

/// One (day, category) pricing cell: the vendor's ask, our negotiated rate,
/// the customer price, and the two percentages linking them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RateCell {
    #[serde(with = "rust_decimal::serde::float")]
    pub current: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub discounted: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub r#final: Decimal,
    #[serde(rename = "vendorDiscountPercentage", with = "rust_decimal::serde::float")]
    pub vendor_discount_pct: Decimal,
    #[serde(rename = "ourMarginPercentage", with = "rust_decimal::serde::float")]
    pub our_margin_pct: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateField {
    Current,
    Discounted,
    Final,
    VendorDiscountPct,
    OurMarginPct,
}

impl RateField {
    pub fn parse(s: &str) -> Option<RateField> {
        match s.trim().to_lowercase().as_str() {
            "current" | "ask" => Some(RateField::Current),
            "discounted" => Some(RateField::Discounted),
            "final" => Some(RateField::Final),
            "discount" | "vendor_discount" => Some(RateField::VendorDiscountPct),
            "margin" | "our_margin" => Some(RateField::OurMarginPct),
            _ => None,
        }
    }
}

/// `part` as a percentage of `whole`. A zero denominator yields zero, never
/// an error; pricing screens treat the percentage as simply unknown there.
pub fn pct_of(part: Decimal, whole: Decimal) -> Decimal {
    part.checked_div(whole)
        .map(|r| r * Decimal::ONE_HUNDRED)
        .unwrap_or(Decimal::ZERO)
}

pub fn apply_discount(amount: Decimal, pct: Decimal) -> Decimal {
    amount - amount * pct / Decimal::ONE_HUNDRED
}

pub fn apply_margin(amount: Decimal, pct: Decimal) -> Decimal {
    amount + amount * pct / Decimal::ONE_HUNDRED
}

/// Build a cell from three resolved money amounts, deriving both percentages.
pub fn cell_from_amounts(current: Decimal, discounted: Decimal, final_price: Decimal) -> RateCell {
    RateCell {
        current,
        discounted,
        r#final: final_price,
        vendor_discount_pct: pct_of(current - discounted, current),
        our_margin_pct: pct_of(final_price - discounted, discounted),
    }
}

/// Recompute a cell after a single field edit. Propagation is directed:
/// editing a money amount pushes downstream only, editing `discounted` or
/// `final` back-solves its own percentage, and nothing ever moves upstream.
pub fn apply_edit(cell: RateCell, field: RateField, value: Decimal) -> RateCell {
    let mut next = cell;
    match field {
        RateField::Current => {
            next.current = value;
            next.discounted = apply_discount(value, next.vendor_discount_pct);
            next.r#final = apply_margin(next.discounted, next.our_margin_pct);
        }
        RateField::VendorDiscountPct => {
            next.vendor_discount_pct = value;
            next.discounted = apply_discount(next.current, value);
            next.r#final = apply_margin(next.discounted, next.our_margin_pct);
        }
        RateField::Discounted => {
            next.discounted = value;
            next.vendor_discount_pct = pct_of(next.current - value, next.current);
            next.r#final = apply_margin(value, next.our_margin_pct);
        }
        RateField::OurMarginPct => {
            next.our_margin_pct = value;
            next.r#final = apply_margin(next.discounted, value);
        }
        RateField::Final => {
            next.r#final = value;
            next.our_margin_pct = pct_of(value - next.discounted, next.discounted);
        }
    }
    next
}

/// Operator input is forgiving: anything that does not parse as a number
/// becomes zero rather than silently keeping the previous value.
pub fn coerce_amount(s: &str) -> Decimal {
    s.trim().parse::<Decimal>().unwrap_or(Decimal::ZERO)
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VillaDayRates {
    pub villa: RateCell,
    pub extra_person: RateCell,
    pub meal_person: RateCell,
    pub jain_meal_person: RateCell,
}

impl VillaDayRates {
    pub fn cell(&self, category: VillaCategory) -> &RateCell {
        match category {
            VillaCategory::Villa => &self.villa,
            VillaCategory::ExtraPerson => &self.extra_person,
            VillaCategory::MealPerson => &self.meal_person,
            VillaCategory::JainMealPerson => &self.jain_meal_person,
        }
    }

    pub fn cell_mut(&mut self, category: VillaCategory) -> &mut RateCell {
        match category {
            VillaCategory::Villa => &mut self.villa,
            VillaCategory::ExtraPerson => &mut self.extra_person,
            VillaCategory::MealPerson => &mut self.meal_person,
            VillaCategory::JainMealPerson => &mut self.jain_meal_person,
        }
    }
}

/// Seven-day villa matrix, keyed by day name on the wire.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VillaGrid {
    pub monday: VillaDayRates,
    pub tuesday: VillaDayRates,
    pub wednesday: VillaDayRates,
    pub thursday: VillaDayRates,
    pub friday: VillaDayRates,
    pub saturday: VillaDayRates,
    pub sunday: VillaDayRates,
}

impl VillaGrid {
    pub fn day(&self, day: Day) -> &VillaDayRates {
        match day {
            Day::Monday => &self.monday,
            Day::Tuesday => &self.tuesday,
            Day::Wednesday => &self.wednesday,
            Day::Thursday => &self.thursday,
            Day::Friday => &self.friday,
            Day::Saturday => &self.saturday,
            Day::Sunday => &self.sunday,
        }
    }

    pub fn day_mut(&mut self, day: Day) -> &mut VillaDayRates {
        match day {
            Day::Monday => &mut self.monday,
            Day::Tuesday => &mut self.tuesday,
            Day::Wednesday => &mut self.wednesday,
            Day::Thursday => &mut self.thursday,
            Day::Friday => &mut self.friday,
            Day::Saturday => &mut self.saturday,
            Day::Sunday => &mut self.sunday,
        }
    }

    pub fn cell(&self, day: Day, category: VillaCategory) -> &RateCell {
        self.day(day).cell(category)
    }

    pub fn cell_mut(&mut self, day: Day, category: VillaCategory) -> &mut RateCell {
        self.day_mut(day).cell_mut(category)
    }
}

/// Waterpark tickets have no day dimension, only a weekday/weekend split.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WaterparkGrid {
    pub adult_weekday: RateCell,
    pub adult_weekend: RateCell,
    pub child_weekday: RateCell,
    pub child_weekend: RateCell,
}

impl WaterparkGrid {
    pub fn cell(&self, ticket: TicketCategory) -> &RateCell {
        match ticket {
            TicketCategory::AdultWeekday => &self.adult_weekday,
            TicketCategory::AdultWeekend => &self.adult_weekend,
            TicketCategory::ChildWeekday => &self.child_weekday,
            TicketCategory::ChildWeekend => &self.child_weekend,
        }
    }

    pub fn cell_mut(&mut self, ticket: TicketCategory) -> &mut RateCell {
        match ticket {
            TicketCategory::AdultWeekday => &mut self.adult_weekday,
            TicketCategory::AdultWeekend => &mut self.adult_weekend,
            TicketCategory::ChildWeekday => &mut self.child_weekday,
            TicketCategory::ChildWeekend => &mut self.child_weekend,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PricingMatrix {
    Villa(VillaGrid),
    Waterpark(WaterparkGrid),
}
