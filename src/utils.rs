// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use comfy_table::{presets::UTF8_FULL, Cell, Table};
use rusqlite::{params, Connection, OptionalExtension};
use rust_decimal::Decimal;

use crate::models::{Property, PropertyPayload};
use crate::pricing::PricingMatrix;

const UA: &str = concat!(
    "ratedesk/",
    env!("CARGO_PKG_VERSION"),
    " (+https://github.com/alphavelocity/ratedesk)"
);

pub fn http_client() -> Result<reqwest::blocking::Client> {
    let c = reqwest::blocking::Client::builder()
        .timeout(std::time::Duration::from_secs(15))
        .user_agent(UA)
        .build()?;
    Ok(c)
}

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

pub fn parse_decimal(s: &str) -> Result<Decimal> {
    s.parse::<Decimal>()
        .with_context(|| format!("Invalid decimal '{}'", s))
}

pub fn fmt_amount(d: &Decimal) -> String {
    d.round_dp(2).to_string()
}

pub fn fmt_pct(d: &Decimal) -> String {
    format!("{}%", d.round_dp(2))
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // If v is an array, stream each element; else stream single line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}

// Settings
pub fn get_setting(conn: &Connection, key: &str) -> Result<Option<String>> {
    let v: Option<String> = conn
        .query_row("SELECT value FROM settings WHERE key=?1", params![key], |r| {
            r.get(0)
        })
        .optional()?;
    Ok(v)
}

pub fn set_setting(conn: &Connection, key: &str, value: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO settings(key, value) VALUES(?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        params![key, value],
    )?;
    Ok(())
}

pub fn api_base_url(conn: &Connection) -> Result<String> {
    get_setting(conn, "api_base_url")?
        .context("API base URL not set; run 'ratedesk config set-api --url <URL>'")
}

pub fn api_token(conn: &Connection) -> Result<Option<String>> {
    get_setting(conn, "api_token")
}

pub const PROPERTY_COLS: &str = "id, name, property_type, location, city, max_guests, rooms, \
     price, price_mon_thu, price_fri_sun, price_sat, onboarding_data, admin_pricing, is_approved";

pub fn property_from_row(r: &rusqlite::Row<'_>) -> rusqlite::Result<Property> {
    Ok(Property {
        id: r.get(0)?,
        name: r.get(1)?,
        property_type: r.get(2)?,
        location: r.get(3)?,
        city: r.get(4)?,
        max_guests: r.get(5)?,
        rooms: r.get(6)?,
        price: text_decimal(r, 7)?,
        price_mon_thu: text_decimal(r, 8)?,
        price_fri_sun: text_decimal(r, 9)?,
        price_sat: text_decimal(r, 10)?,
        onboarding_data: r.get(11)?,
        admin_pricing: r.get(12)?,
        is_approved: r.get::<_, i64>(13)? != 0,
    })
}

// A malformed stored amount behaves like an unset one, same as everywhere
// else in the pricing path.
fn text_decimal(r: &rusqlite::Row<'_>, idx: usize) -> rusqlite::Result<Decimal> {
    let s: String = r.get(idx)?;
    Ok(s.trim().parse().unwrap_or(Decimal::ZERO))
}

pub fn load_property(conn: &Connection, id: i64) -> Result<Property> {
    let sql = format!("SELECT {} FROM properties WHERE id=?1", PROPERTY_COLS);
    let mut stmt = conn.prepare(&sql)?;
    stmt.query_row(params![id], property_from_row)
        .with_context(|| format!("Property #{} not found", id))
}

/// Persist a pricing matrix and mirror the villa finals back into the legacy
/// tariff columns that the listing screens still read. Waterpark matrices
/// have no tariff columns to mirror.
pub fn save_admin_pricing(conn: &Connection, id: i64, matrix: &PricingMatrix) -> Result<()> {
    let json = serde_json::to_string(matrix)?;
    conn.execute(
        "UPDATE properties SET admin_pricing=?1 WHERE id=?2",
        params![json, id],
    )?;
    if let PricingMatrix::Villa(grid) = matrix {
        conn.execute(
            "UPDATE properties SET price=?1, price_mon_thu=?1, price_fri_sun=?2, price_sat=?3 WHERE id=?4",
            params![
                grid.monday.villa.r#final.to_string(),
                grid.friday.villa.r#final.to_string(),
                grid.saturday.villa.r#final.to_string(),
                id
            ],
        )?;
    }
    Ok(())
}

/// Insert or update a backend payload, keyed by the marketplace property id
/// when the payload carries one.
pub fn upsert_property(conn: &Connection, p: &PropertyPayload) -> Result<i64> {
    let property_type = if p.property_type.trim().is_empty() {
        "Villa"
    } else {
        p.property_type.trim()
    };
    let onboarding = json_column_text(p.onboarding_data.as_ref());
    let admin = json_column_text(p.admin_pricing.as_ref());
    match p.id {
        Some(id) => {
            conn.execute(
                "INSERT INTO properties(id, name, property_type, location, city, max_guests, rooms, \
                     price, price_mon_thu, price_fri_sun, price_sat, onboarding_data, admin_pricing, is_approved) \
                 VALUES (?1,?2,?3,?4,?5,?6,?7,?8,?9,?10,?11,?12,?13,?14) \
                 ON CONFLICT(id) DO UPDATE SET \
                     name=excluded.name, \
                     property_type=excluded.property_type, \
                     location=excluded.location, \
                     city=excluded.city, \
                     max_guests=excluded.max_guests, \
                     rooms=excluded.rooms, \
                     price=excluded.price, \
                     price_mon_thu=excluded.price_mon_thu, \
                     price_fri_sun=excluded.price_fri_sun, \
                     price_sat=excluded.price_sat, \
                     onboarding_data=excluded.onboarding_data, \
                     admin_pricing=excluded.admin_pricing, \
                     is_approved=excluded.is_approved",
                params![
                    id,
                    p.name.trim(),
                    property_type,
                    p.location.trim(),
                    p.city.trim(),
                    p.max_guests,
                    p.rooms,
                    p.price.to_string(),
                    p.price_mon_thu.to_string(),
                    p.price_fri_sun.to_string(),
                    p.price_sat.to_string(),
                    onboarding,
                    admin,
                    p.is_approved as i64
                ],
            )?;
            Ok(id)
        }
        None => {
            conn.execute(
                "INSERT INTO properties(name, property_type, location, city, max_guests, rooms, \
                     price, price_mon_thu, price_fri_sun, price_sat, onboarding_data, admin_pricing, is_approved) \
                 VALUES (?1,?2,?3,?4,?5,?6,?7,?8,?9,?10,?11,?12,?13)",
                params![
                    p.name.trim(),
                    property_type,
                    p.location.trim(),
                    p.city.trim(),
                    p.max_guests,
                    p.rooms,
                    p.price.to_string(),
                    p.price_mon_thu.to_string(),
                    p.price_fri_sun.to_string(),
                    p.price_sat.to_string(),
                    onboarding,
                    admin,
                    p.is_approved as i64
                ],
            )?;
            Ok(conn.last_insert_rowid())
        }
    }
}

// Double-encoded JSON strings are stored as-is; real JSON is compacted.
fn json_column_text(v: Option<&serde_json::Value>) -> Option<String> {
    match v {
        Some(serde_json::Value::String(s)) => Some(s.clone()),
        Some(serde_json::Value::Null) | None => None,
        Some(v) => Some(v.to_string()),
    }
}
