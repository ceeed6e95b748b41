// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{PayloadError, Property, lenient};
use crate::pricing::{Day, PricingMatrix, TicketCategory, VillaCategory, apply_discount, apply_margin};
use crate::resolver::{self, PricingSource};
use crate::utils::{PROPERTY_COLS, pretty_table, property_from_row};
use anyhow::Result;
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde_json::Value;

pub fn handle(conn: &Connection) -> Result<()> {
    let mut rows = Vec::new();

    let sql = format!("SELECT {} FROM properties ORDER BY id", PROPERTY_COLS);
    let mut stmt = conn.prepare(&sql)?;
    let props: Vec<Property> = stmt
        .query_map([], property_from_row)?
        .collect::<rusqlite::Result<_>>()?;

    for p in &props {
        let tag = format!("#{} {}", p.id, p.name);

        // 1) JSON columns must parse
        for (column, text) in [
            ("onboarding_data", &p.onboarding_data),
            ("admin_pricing", &p.admin_pricing),
        ] {
            if let Some(t) = text {
                if let Err(e) = serde_json::from_str::<Value>(t) {
                    let err = PayloadError::BadJson { column, source: e };
                    rows.push(vec!["unreadable_json".into(), format!("{}: {}", tag, err)]);
                }
            }
        }

        let src = PricingSource::from_property(p);

        // 2) Saved matrix shape should match the property type
        if !src.admin.is_null() {
            let has_days = Day::ALL.iter().any(|d| src.admin.get(d.as_str()).is_some())
                || ["mon_thu", "fri_sun", "sat"]
                    .iter()
                    .any(|b| src.admin.get(b).is_some());
            let has_tickets = TicketCategory::ALL
                .iter()
                .any(|t| src.admin.get(t.as_str()).is_some());
            if p.is_waterpark() && has_days && !has_tickets {
                rows.push(vec![
                    "matrix_shape_mismatch".into(),
                    format!("{}: villa matrix on a waterpark", tag),
                ]);
            }
            if !p.is_waterpark() && has_tickets && !has_days {
                rows.push(vec![
                    "matrix_shape_mismatch".into(),
                    format!("{}: ticket matrix on a villa", tag),
                ]);
            }
            check_stored_chain(&src.admin, &tag, &mut rows);
        }

        // 3) Resolved matrix sanity: something must price, margins should
        //    not be under water
        let matrix = resolver::resolve(&src, p.is_waterpark());
        let mut any_price = false;
        match &matrix {
            PricingMatrix::Villa(grid) => {
                for day in Day::ALL {
                    for category in VillaCategory::ALL {
                        let c = grid.cell(day, category);
                        if !c.current.is_zero() || !c.r#final.is_zero() {
                            any_price = true;
                        }
                        if c.our_margin_pct < Decimal::ZERO {
                            rows.push(vec![
                                "negative_margin".into(),
                                format!("{}: {} {}", tag, day.as_str(), category.as_str()),
                            ]);
                        }
                    }
                }
            }
            PricingMatrix::Waterpark(grid) => {
                for ticket in TicketCategory::ALL {
                    let c = grid.cell(ticket);
                    if !c.current.is_zero() || !c.r#final.is_zero() {
                        any_price = true;
                    }
                    if c.our_margin_pct < Decimal::ZERO {
                        rows.push(vec![
                            "negative_margin".into(),
                            format!("{}: {}", tag, ticket.as_str()),
                        ]);
                    }
                }
            }
        }
        if !any_price {
            rows.push(vec!["no_price_source".into(), tag.clone()]);
        }
    }

    if rows.is_empty() {
        println!("✅ doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}

/// Stored cells that carry all five fields should satisfy the discount and
/// margin chain; hand-edited columns tend to drift.
fn check_stored_chain(admin: &Value, tag: &str, rows: &mut Vec<Vec<String>>) {
    let Some(groups) = admin.as_object() else {
        return;
    };
    for (group_key, group) in groups {
        let Some(inner) = group.as_object() else {
            continue;
        };
        // Waterpark matrices keep cells at the top level; villa matrices
        // nest them one level deeper under the category key.
        if looks_like_cell(inner) {
            check_cell(inner, format!("{}: {}", tag, group_key), rows);
        } else {
            for (cell_key, cell) in inner {
                if let Some(obj) = cell.as_object() {
                    check_cell(obj, format!("{}: {} {}", tag, group_key, cell_key), rows);
                }
            }
        }
    }
}

fn looks_like_cell(obj: &serde_json::Map<String, Value>) -> bool {
    obj.contains_key("current") || obj.contains_key("discounted") || obj.contains_key("final")
}

fn check_cell(obj: &serde_json::Map<String, Value>, detail: String, rows: &mut Vec<Vec<String>>) {
    let tolerance = Decimal::new(1, 2); // 0.01
    let complete = [
        "current",
        "discounted",
        "final",
        "vendorDiscountPercentage",
        "ourMarginPercentage",
    ]
    .iter()
    .all(|f| obj.get(*f).is_some_and(|v| !v.is_null()));
    if !complete {
        return;
    }
    let current = lenient::decimal_from_value(&obj["current"]);
    let discounted = lenient::decimal_from_value(&obj["discounted"]);
    let final_price = lenient::decimal_from_value(&obj["final"]);
    let vendor_disc = lenient::decimal_from_value(&obj["vendorDiscountPercentage"]);
    let margin = lenient::decimal_from_value(&obj["ourMarginPercentage"]);
    let drift = (discounted - apply_discount(current, vendor_disc)).abs() > tolerance
        || (final_price - apply_margin(discounted, margin)).abs() > tolerance;
    if drift {
        rows.push(vec!["stale_percentages".into(), detail]);
    }
}
