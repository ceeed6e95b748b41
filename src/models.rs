// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Property {
    pub id: i64,
    pub name: String,
    pub property_type: String,
    pub location: String,
    pub city: String,
    pub max_guests: i64,
    pub rooms: i64,
    pub price: Decimal,
    pub price_mon_thu: Decimal,
    pub price_fri_sun: Decimal,
    pub price_sat: Decimal,
    pub onboarding_data: Option<String>,
    pub admin_pricing: Option<String>,
    pub is_approved: bool,
}

impl Property {
    pub fn is_waterpark(&self) -> bool {
        self.property_type.eq_ignore_ascii_case("waterpark")
    }
}

/// One property as the marketplace backend ships it. Field names follow the
/// upstream API (StudlyCase for the old columns, snake_case for the newer
/// ones); money arrives as numbers or strings depending on the vintage of
/// the record, so everything numeric is parsed leniently.
#[derive(Debug, Clone, Deserialize)]
pub struct PropertyPayload {
    #[serde(rename = "PropertyId", alias = "id", default, deserialize_with = "lenient::opt_int")]
    pub id: Option<i64>,
    #[serde(rename = "Name", alias = "name", default)]
    pub name: String,
    #[serde(rename = "PropertyType", alias = "property_type", default)]
    pub property_type: String,
    #[serde(rename = "Location", alias = "location", default)]
    pub location: String,
    #[serde(rename = "CityName", alias = "city", default)]
    pub city: String,
    #[serde(rename = "MaxGuests", alias = "max_guests", default, deserialize_with = "lenient::int")]
    pub max_guests: i64,
    #[serde(rename = "NoofRooms", alias = "rooms", default, deserialize_with = "lenient::int")]
    pub rooms: i64,
    #[serde(rename = "Price", alias = "price", default, deserialize_with = "lenient::decimal")]
    pub price: Decimal,
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub price_mon_thu: Decimal,
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub price_fri_sun: Decimal,
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub price_sat: Decimal,
    #[serde(default)]
    pub onboarding_data: Option<Value>,
    #[serde(default)]
    pub admin_pricing: Option<Value>,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub is_approved: bool,
}

impl PropertyPayload {
    pub fn validate(&self) -> Result<(), PayloadError> {
        if self.name.trim().is_empty() {
            return Err(PayloadError::MissingName);
        }
        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum PayloadError {
    #[error("property name is missing or empty")]
    MissingName,
    #[error("unreadable {column} JSON: {source}")]
    BadJson {
        column: &'static str,
        source: serde_json::Error,
    },
}

/// Vendor-declared child admission rules for waterparks. Informational only;
/// ticket prices come from the pricing tables, not from here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChildCriteria {
    #[serde(rename = "freeAge", default, deserialize_with = "lenient::opt_string")]
    pub free_age: Option<String>,
    #[serde(rename = "freeHeight", default, deserialize_with = "lenient::opt_string")]
    pub free_height: Option<String>,
    #[serde(rename = "chargeAgeFrom", default, deserialize_with = "lenient::opt_string")]
    pub charge_age_from: Option<String>,
    #[serde(rename = "chargeAgeTo", default, deserialize_with = "lenient::opt_string")]
    pub charge_age_to: Option<String>,
    #[serde(rename = "chargeHeightFrom", default, deserialize_with = "lenient::opt_string")]
    pub charge_height_from: Option<String>,
    #[serde(rename = "chargeHeightTo", default, deserialize_with = "lenient::opt_string")]
    pub charge_height_to: Option<String>,
}

impl ChildCriteria {
    pub fn from_onboarding(onboarding: &Value) -> Option<ChildCriteria> {
        let node = onboarding.get("childCriteria")?;
        serde_json::from_value(node.clone()).ok()
    }

    pub fn is_empty(&self) -> bool {
        self.free_age.is_none()
            && self.free_height.is_none()
            && self.charge_age_from.is_none()
            && self.charge_age_to.is_none()
            && self.charge_height_from.is_none()
            && self.charge_height_to.is_none()
    }
}

/// Forgiving deserializers for vendor-entered values: numbers, numeric
/// strings, nulls and absent keys all come out usable, never as an error.
pub mod lenient {
    use rust_decimal::Decimal;
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    pub fn decimal_from_value(v: &Value) -> Decimal {
        match v {
            Value::Number(n) => n.to_string().parse().unwrap_or(Decimal::ZERO),
            Value::String(s) => s.trim().parse().unwrap_or(Decimal::ZERO),
            _ => Decimal::ZERO,
        }
    }

    pub fn decimal<'de, D>(de: D) -> Result<Decimal, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(decimal_from_value(&Value::deserialize(de)?))
    }

    pub fn int<'de, D>(de: D) -> Result<i64, D::Error>
    where
        D: Deserializer<'de>,
    {
        let v = Value::deserialize(de)?;
        Ok(match &v {
            Value::Number(n) => n.as_i64().unwrap_or(0),
            Value::String(s) => s.trim().parse().unwrap_or(0),
            _ => 0,
        })
    }

    pub fn opt_int<'de, D>(de: D) -> Result<Option<i64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let v = Value::deserialize(de)?;
        Ok(match &v {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        })
    }

    pub fn opt_string<'de, D>(de: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let v = Value::deserialize(de)?;
        Ok(match v {
            Value::String(s) if !s.trim().is_empty() => Some(s),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
    }

    pub fn flag<'de, D>(de: D) -> Result<bool, D::Error>
    where
        D: Deserializer<'de>,
    {
        let v = Value::deserialize(de)?;
        Ok(match &v {
            Value::Bool(b) => *b,
            Value::Number(n) => n.as_i64().unwrap_or(0) != 0,
            Value::String(s) => matches!(s.trim(), "1" | "true" | "yes"),
            _ => false,
        })
    }
}
