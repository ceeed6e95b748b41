// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::resolver::{self, PricingSource, parse_json_text};
use crate::utils::{PROPERTY_COLS, load_property, property_from_row};
use anyhow::{Result, anyhow};
use rusqlite::Connection;
use serde_json::json;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("properties", sub)) => export_properties(conn, sub),
        Some(("rates", sub)) => export_rates(conn, sub),
        _ => Ok(()),
    }
}

fn export_properties(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap();

    let sql = format!("SELECT {} FROM properties ORDER BY id", PROPERTY_COLS);
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([], property_from_row)?;

    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record([
                "id",
                "name",
                "type",
                "location",
                "city",
                "max_guests",
                "rooms",
                "price",
                "price_mon_thu",
                "price_fri_sun",
                "price_sat",
                "is_approved",
            ])?;
            for row in rows {
                let p = row?;
                wtr.write_record([
                    p.id.to_string(),
                    p.name,
                    p.property_type,
                    p.location,
                    p.city,
                    p.max_guests.to_string(),
                    p.rooms.to_string(),
                    p.price.to_string(),
                    p.price_mon_thu.to_string(),
                    p.price_fri_sun.to_string(),
                    p.price_sat.to_string(),
                    if p.is_approved { "1".into() } else { "0".into() },
                ])?;
            }
            wtr.flush()?;
        }
        "json" => {
            let mut items = Vec::new();
            for row in rows {
                let p = row?;
                items.push(json!({
                    "id": p.id,
                    "name": p.name,
                    "property_type": p.property_type,
                    "location": p.location,
                    "city": p.city,
                    "max_guests": p.max_guests,
                    "rooms": p.rooms,
                    "price": p.price.to_string(),
                    "price_mon_thu": p.price_mon_thu.to_string(),
                    "price_fri_sun": p.price_fri_sun.to_string(),
                    "price_sat": p.price_sat.to_string(),
                    "onboarding_data": parse_json_text(p.onboarding_data.as_deref()),
                    "admin_pricing": parse_json_text(p.admin_pricing.as_deref()),
                    "is_approved": p.is_approved,
                }));
            }
            std::fs::write(out, serde_json::to_string_pretty(&items)?)?;
        }
        _ => {
            return Err(anyhow!("Unknown format: {} (use csv|json)", fmt));
        }
    }
    println!("Exported properties to {}", out);
    Ok(())
}

/// The resolved matrix as the save collaborator expects it: seven day keys
/// for villas, four ticket keys for waterparks, five numeric fields per cell.
fn export_rates(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let out = sub.get_one::<String>("out").unwrap();
    let p = load_property(conn, id)?;
    let src = PricingSource::from_property(&p);
    let matrix = resolver::resolve(&src, p.is_waterpark());
    std::fs::write(out, serde_json::to_string_pretty(&matrix)?)?;
    println!("Exported rates for '{}' to {}", p.name, out);
    Ok(())
}
