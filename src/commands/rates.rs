// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::ChildCriteria;
use crate::pricing::{
    Day, PricingMatrix, RateField, TicketCategory, VillaCategory, apply_edit, cell_from_amounts,
    coerce_amount,
};
use crate::resolver::{self, PricingSource};
use crate::utils::{
    fmt_amount, fmt_pct, load_property, maybe_print_json, parse_date, pretty_table,
    save_admin_pricing,
};
use anyhow::{Result, anyhow};
use chrono::{Datelike, Utc};
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", sub)) => show(conn, sub),
        Some(("set", sub)) => set(conn, sub),
        Some(("flatten", sub)) => flatten(conn, sub),
        Some(("quote", sub)) => quote(conn, sub),
        _ => Ok(()),
    }
}

fn show(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let p = load_property(conn, id)?;
    let src = PricingSource::from_property(&p);
    let matrix = resolver::resolve(&src, p.is_waterpark());

    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    if maybe_print_json(json_flag, jsonl_flag, &matrix)? {
        return Ok(());
    }

    println!("{} (#{}) {}", p.name, p.id, p.property_type);
    match &matrix {
        PricingMatrix::Villa(grid) => {
            let mut rows = Vec::new();
            for day in Day::ALL {
                for category in VillaCategory::ALL {
                    let c = grid.cell(day, category);
                    rows.push(vec![
                        day.label().to_string(),
                        category.label().to_string(),
                        fmt_amount(&c.current),
                        fmt_amount(&c.discounted),
                        fmt_amount(&c.r#final),
                        fmt_pct(&c.vendor_discount_pct),
                        fmt_pct(&c.our_margin_pct),
                    ]);
                }
            }
            println!(
                "{}",
                pretty_table(
                    &[
                        "Day",
                        "Category",
                        "Vendor ask",
                        "Discounted",
                        "Final",
                        "Vendor disc",
                        "Margin",
                    ],
                    rows,
                )
            );
        }
        PricingMatrix::Waterpark(grid) => {
            let mut rows = Vec::new();
            for ticket in TicketCategory::ALL {
                let c = grid.cell(ticket);
                rows.push(vec![
                    ticket.label().to_string(),
                    fmt_amount(&c.current),
                    fmt_amount(&c.discounted),
                    fmt_amount(&c.r#final),
                    fmt_pct(&c.vendor_discount_pct),
                    fmt_pct(&c.our_margin_pct),
                ]);
            }
            println!(
                "{}",
                pretty_table(
                    &[
                        "Ticket",
                        "Vendor ask",
                        "Discounted",
                        "Final",
                        "Vendor disc",
                        "Margin",
                    ],
                    rows,
                )
            );
            if let Some(c) = ChildCriteria::from_onboarding(&src.onboarding) {
                print_child_policy(&c);
            }
        }
    }
    Ok(())
}

fn print_child_policy(c: &ChildCriteria) {
    if c.is_empty() {
        return;
    }
    let mut notes = Vec::new();
    if let Some(a) = &c.free_age {
        notes.push(format!("free under age {}", a));
    }
    if let Some(h) = &c.free_height {
        notes.push(format!("free under height {}", h));
    }
    if let (Some(from), Some(to)) = (&c.charge_age_from, &c.charge_age_to) {
        notes.push(format!("child fare ages {}-{}", from, to));
    }
    if let (Some(from), Some(to)) = (&c.charge_height_from, &c.charge_height_to) {
        notes.push(format!("child fare height {}-{}", from, to));
    }
    if !notes.is_empty() {
        println!("Child policy: {}", notes.join(", "));
    }
}

fn set(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let field_raw = sub.get_one::<String>("field").unwrap();
    let field = RateField::parse(field_raw).ok_or_else(|| {
        anyhow!(
            "Unknown field '{}' (current|discounted|final|discount|margin)",
            field_raw
        )
    })?;
    let value = coerce_amount(sub.get_one::<String>("value").unwrap());
    let category_raw = sub.get_one::<String>("category").unwrap();

    let p = load_property(conn, id)?;
    let src = PricingSource::from_property(&p);
    let mut matrix = resolver::resolve(&src, p.is_waterpark());

    let cell = match &mut matrix {
        PricingMatrix::Villa(grid) => {
            let category = VillaCategory::parse(category_raw).ok_or_else(|| {
                anyhow!(
                    "'{}' is not a villa category (villa|extra_person|meal_person|jain_meal_person)",
                    category_raw
                )
            })?;
            let day_raw = sub
                .get_one::<String>("day")
                .ok_or_else(|| anyhow!("--day is required for villa pricing"))?;
            let day = Day::parse(day_raw)
                .ok_or_else(|| anyhow!("Invalid day '{}', expected monday..sunday", day_raw))?;
            grid.cell_mut(day, category)
        }
        PricingMatrix::Waterpark(grid) => {
            let ticket = TicketCategory::parse(category_raw).ok_or_else(|| {
                anyhow!(
                    "'{}' is not a ticket category (adult_weekday|adult_weekend|child_weekday|child_weekend)",
                    category_raw
                )
            })?;
            grid.cell_mut(ticket)
        }
    };
    let updated = apply_edit(*cell, field, value);
    *cell = updated;

    save_admin_pricing(conn, id, &matrix)?;
    println!(
        "Updated #{} {}: ask {}, discounted {}, final {} (disc {}, margin {})",
        id,
        category_raw,
        fmt_amount(&updated.current),
        fmt_amount(&updated.discounted),
        fmt_amount(&updated.r#final),
        fmt_pct(&updated.vendor_discount_pct),
        fmt_pct(&updated.our_margin_pct),
    );
    Ok(())
}

fn flatten(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let category_raw = sub.get_one::<String>("category").unwrap();
    let value = coerce_amount(sub.get_one::<String>("value").unwrap());

    let p = load_property(conn, id)?;
    let src = PricingSource::from_property(&p);
    let mut matrix = resolver::resolve(&src, p.is_waterpark());

    match &mut matrix {
        PricingMatrix::Villa(grid) => {
            let category = VillaCategory::parse(category_raw).ok_or_else(|| {
                anyhow!(
                    "'{}' is not a villa category (villa|extra_person|meal_person|jain_meal_person)",
                    category_raw
                )
            })?;
            // A flattened cell carries no spread: all three amounts equal, both
            // percentages zero.
            for day in Day::ALL {
                *grid.cell_mut(day, category) = cell_from_amounts(value, value, value);
            }
        }
        PricingMatrix::Waterpark(_) => {
            return Err(anyhow!(
                "flatten applies to villa pricing; waterpark tickets have no day dimension"
            ));
        }
    }

    save_admin_pricing(conn, id, &matrix)?;
    println!(
        "Flattened {} to {} across all days for #{}",
        category_raw,
        fmt_amount(&value),
        id
    );
    Ok(())
}

fn quote(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let date = match sub.get_one::<String>("date") {
        Some(s) => parse_date(s)?,
        None => Utc::now().date_naive(),
    };
    let p = load_property(conn, id)?;
    let src = PricingSource::from_property(&p);
    let price = resolver::display_price(&src, p.is_waterpark(), date.weekday());
    println!(
        "{} on {} ({}): {}",
        p.name,
        date,
        Day::from_weekday(date.weekday()).label(),
        fmt_amount(&price)
    );
    Ok(())
}
