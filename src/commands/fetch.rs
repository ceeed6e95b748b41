// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::PropertyPayload;
use crate::utils::{api_base_url, api_token, http_client, upsert_property};
use anyhow::{Context, Result};
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("property", sub)) => fetch_property(conn, sub),
        Some(("pending", _)) => fetch_pending(conn),
        _ => Ok(()),
    }
}

fn get(conn: &Connection, path: &str) -> Result<reqwest::blocking::Response> {
    let base = api_base_url(conn)?;
    let url = format!("{}/{}", base.trim_end_matches('/'), path);
    let client = http_client()?;
    let mut req = client.get(&url);
    if let Some(token) = api_token(conn)? {
        req = req.bearer_auth(token);
    }
    let resp = req
        .send()
        .and_then(|r| r.error_for_status())
        .with_context(|| format!("GET {}", url))?;
    Ok(resp)
}

fn fetch_property(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let payload: PropertyPayload = get(conn, &format!("admin/properties/{}", id))?
        .json()
        .with_context(|| format!("Decode property {}", id))?;
    payload.validate()?;
    let local = upsert_property(conn, &payload)?;
    println!("Fetched '{}' (#{})", payload.name, local);
    Ok(())
}

fn fetch_pending(conn: &Connection) -> Result<()> {
    let items: Vec<serde_json::Value> = get(conn, "admin/properties?status=pending")?
        .json()
        .context("Decode pending properties")?;
    let mut imported = 0usize;
    for (i, item) in items.into_iter().enumerate() {
        let payload: PropertyPayload = match serde_json::from_value(item) {
            Ok(p) => p,
            Err(e) => {
                eprintln!("Skipping record {}: {}", i + 1, e);
                continue;
            }
        };
        if let Err(e) = payload.validate() {
            eprintln!("Skipping record {}: {}", i + 1, e);
            continue;
        }
        upsert_property(conn, &payload)?;
        imported += 1;
    }
    println!("Fetched {} pending properties.", imported);
    Ok(())
}
