// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::resolver::{self, PricingSource};
use crate::utils::{
    fmt_amount, load_property, maybe_print_json, parse_decimal, pretty_table, save_admin_pricing,
};
use anyhow::Result;
use rusqlite::{Connection, params};
use rust_decimal::Decimal;
use serde::Serialize;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("show", sub)) => show(conn, sub)?,
        Some(("rm", sub)) => rm(conn, sub)?,
        Some(("approve", sub)) => approve(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn arg_decimal(sub: &clap::ArgMatches, name: &str) -> Result<Decimal> {
    match sub.get_one::<String>(name) {
        Some(s) => parse_decimal(s),
        None => Ok(Decimal::ZERO),
    }
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let name = sub.get_one::<String>("name").unwrap();
    let typ = sub.get_one::<String>("type").unwrap();
    let location = sub.get_one::<String>("location").map(|s| s.as_str()).unwrap_or("");
    let city = sub.get_one::<String>("city").map(|s| s.as_str()).unwrap_or("");
    let price = arg_decimal(sub, "price")?;
    let price_mon_thu = arg_decimal(sub, "price-mon-thu")?;
    let price_fri_sun = arg_decimal(sub, "price-fri-sun")?;
    let price_sat = arg_decimal(sub, "price-sat")?;
    let guests = sub.get_one::<i64>("guests").copied().unwrap_or(0);
    let rooms = sub.get_one::<i64>("rooms").copied().unwrap_or(0);

    conn.execute(
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
    println!(
        "Added property '{}' ({}, #{})",
        name,
        typ,
        conn.last_insert_rowid()
    );
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(conn, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.id.to_string(),
                    r.name.clone(),
                    r.property_type.clone(),
                    r.city.clone(),
                    r.price.clone(),
                    if r.approved { "yes".into() } else { "pending".into() },
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Id", "Name", "Type", "City", "Price", "Approved"], rows)
        );
    }
    Ok(())
}

#[derive(Serialize)]
pub struct PropertyRow {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub property_type: String,
    pub city: String,
    pub price: String,
    pub approved: bool,
}

pub fn query_rows(conn: &Connection, sub: &clap::ArgMatches) -> Result<Vec<PropertyRow>> {
    let mut sql = String::from(
        "SELECT id, name, property_type, city, price, is_approved FROM properties WHERE 1=1",
    );
    let mut params_vec: Vec<String> = Vec::new();

    if let Some(typ) = sub.get_one::<String>("type") {
        sql.push_str(" AND property_type=?");
        params_vec.push(typ.into());
    }
    if let Some(city) = sub.get_one::<String>("city") {
        sql.push_str(" AND city=?");
        params_vec.push(city.into());
    }
    if sub.get_flag("pending") {
        sql.push_str(" AND is_approved=0");
    }
    sql.push_str(" ORDER BY id");
    if let Some(limit) = sub.get_one::<usize>("limit") {
        sql.push_str(" LIMIT ?");
        params_vec.push(limit.to_string());
    }

    let mut stmt = conn.prepare(&sql)?;
    let mut rows = if params_vec.is_empty() {
        stmt.query([])?
    } else {
        let params: Vec<&dyn rusqlite::ToSql> = params_vec
            .iter()
            .map(|s| s as &dyn rusqlite::ToSql)
            .collect();
        stmt.query(rusqlite::params_from_iter(params))?
    };

    let mut data = Vec::new();
    while let Some(r) = rows.next()? {
        let price: String = r.get(4)?;
        data.push(PropertyRow {
            id: r.get(0)?,
            name: r.get(1)?,
            property_type: r.get(2)?,
            city: r.get(3)?,
            price: fmt_amount(&price.trim().parse().unwrap_or_default()),
            approved: r.get::<_, i64>(5)? != 0,
        });
    }
    Ok(data)
}

fn show(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let p = load_property(conn, id)?;
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    if maybe_print_json(json_flag, jsonl_flag, &p)? {
        return Ok(());
    }
    let present = |o: &Option<String>| {
        if o.as_deref().is_some_and(|s| !s.trim().is_empty()) {
            "yes".to_string()
        } else {
            "-".to_string()
        }
    };
    let rows = vec![
        vec!["Id".into(), p.id.to_string()],
        vec!["Name".into(), p.name.clone()],
        vec!["Type".into(), p.property_type.clone()],
        vec!["Location".into(), p.location.clone()],
        vec!["City".into(), p.city.clone()],
        vec!["Max guests".into(), p.max_guests.to_string()],
        vec!["Rooms".into(), p.rooms.to_string()],
        vec!["Price".into(), fmt_amount(&p.price)],
        vec!["Price Mon-Thu".into(), fmt_amount(&p.price_mon_thu)],
        vec!["Price Fri+Sun".into(), fmt_amount(&p.price_fri_sun)],
        vec!["Price Sat".into(), fmt_amount(&p.price_sat)],
        vec!["Onboarding data".into(), present(&p.onboarding_data)],
        vec!["Admin pricing".into(), present(&p.admin_pricing)],
        vec![
            "Approved".into(),
            if p.is_approved { "yes".into() } else { "pending".into() },
        ],
    ];
    println!("{}", pretty_table(&["Field", "Value"], rows));
    Ok(())
}

fn rm(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let n = conn.execute("DELETE FROM properties WHERE id=?1", params![id])?;
    if n == 0 {
        eprintln!("Property #{} not found", id);
    } else {
        println!("Removed property #{}", id);
    }
    Ok(())
}

/// Approval always re-resolves and saves the full matrix, upgrading any
/// legacy three-bucket data to the seven-day format and syncing the tariff
/// columns in the same step.
fn approve(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let p = load_property(conn, id)?;
    let src = PricingSource::from_property(&p);
    let matrix = resolver::resolve(&src, p.is_waterpark());
    save_admin_pricing(conn, id, &matrix)?;
    conn.execute(
        "UPDATE properties SET is_approved=1 WHERE id=?1",
        params![id],
    )?;
    println!("Approved '{}' (#{})", p.name, id);
    Ok(())
}
