// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{PayloadError, PropertyPayload};
use crate::pricing::coerce_amount;
use crate::utils::upsert_property;
use anyhow::{Context, Result};
use csv::ReaderBuilder;
use rusqlite::{Connection, params};

pub fn handle(conn: &mut Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("properties", sub)) => import_properties(conn, sub),
        Some(("dump", sub)) => import_dump(conn, sub),
        _ => Ok(()),
    }
}

/// Vendor rate sheets: one property per row, money columns as loose text.
/// Rows without a name are reported and skipped; unparseable money behaves
/// as unset, the same policy the resolver applies to stored data.
fn import_properties(conn: &mut Connection, sub: &clap::ArgMatches) -> Result<()> {
    let path = sub.get_one::<String>("path").unwrap().trim();
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("Open CSV {}", path))?;

    let tx = conn.transaction()?;
    let mut imported = 0usize;
    let mut skipped = 0usize;
    for (i, result) in rdr.records().enumerate() {
        let rec = result?;
        let line = i + 2; // line 1 is the header
        let name = rec.get(0).unwrap_or("").trim();
        if name.is_empty() {
            eprintln!("Skipping line {}: {}", line, PayloadError::MissingName);
            skipped += 1;
            continue;
        }
        let typ = rec.get(1).map(str::trim).filter(|s| !s.is_empty()).unwrap_or("Villa");
        let location = rec.get(2).unwrap_or("").trim();
        let city = rec.get(3).unwrap_or("").trim();
        let price = coerce_amount(rec.get(4).unwrap_or(""));
        let price_mon_thu = coerce_amount(rec.get(5).unwrap_or(""));
        let price_fri_sun = coerce_amount(rec.get(6).unwrap_or(""));
        let price_sat = coerce_amount(rec.get(7).unwrap_or(""));
        let guests: i64 = rec.get(8).unwrap_or("").trim().parse().unwrap_or(0);
        let rooms: i64 = rec.get(9).unwrap_or("").trim().parse().unwrap_or(0);

        tx.execute(
            "INSERT INTO properties(name, property_type, location, city, max_guests, rooms, \
                 price, price_mon_thu, price_fri_sun, price_sat) \
             VALUES (?1,?2,?3,?4,?5,?6,?7,?8,?9,?10)",
            params![
                name,
                typ,
                location,
                city,
                guests,
                rooms,
                price.to_string(),
                price_mon_thu.to_string(),
                price_fri_sun.to_string(),
                price_sat.to_string()
            ],
        )?;
        imported += 1;
    }
    tx.commit()?;
    println!(
        "Imported {} properties from {} ({} skipped)",
        imported, path, skipped
    );
    Ok(())
}

/// Backend JSON dumps: an array of property payloads in the upstream wire
/// shape, upserted by marketplace id so re-imports refresh in place.
fn import_dump(conn: &mut Connection, sub: &clap::ArgMatches) -> Result<()> {
    let path = sub.get_one::<String>("path").unwrap().trim();
    let text =
        std::fs::read_to_string(path).with_context(|| format!("Open dump {}", path))?;
    let raw: Vec<serde_json::Value> =
        serde_json::from_str(&text).with_context(|| format!("Dump {} is not a JSON array", path))?;

    let tx = conn.transaction()?;
    let mut imported = 0usize;
    let mut skipped = 0usize;
    for (i, item) in raw.into_iter().enumerate() {
        let payload: PropertyPayload = match serde_json::from_value(item) {
            Ok(p) => p,
            Err(e) => {
                eprintln!("Skipping record {}: {}", i + 1, e);
                skipped += 1;
                continue;
            }
        };
        if let Err(e) = payload.validate() {
            eprintln!("Skipping record {}: {}", i + 1, e);
            skipped += 1;
            continue;
        }
        upsert_property(&tx, &payload)?;
        imported += 1;
    }
    tx.commit()?;
    println!(
        "Imported {} properties from {} ({} skipped)",
        imported, path, skipped
    );
    Ok(())
}
