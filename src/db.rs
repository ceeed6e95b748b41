// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::Connection;
use std::fs;
use std::path::PathBuf;

static APP: Lazy<(&str, &str, &str)> = Lazy::new(|| ("com.alphavelocity", "Ratedesk", "ratedesk"));

pub fn db_path() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("ratedesk.sqlite"))
}

pub fn open_or_init() -> Result<Connection> {
    let path = db_path()?;
    let mut conn =
        Connection::open(&path).with_context(|| format!("Open DB at {}", path.display()))?;
    init_schema(&mut conn)?;
    Ok(conn)
}

fn init_schema(conn: &mut Connection) -> Result<()> {
    conn.execute_batch(
        r#"
    PRAGMA foreign_keys = ON;

    CREATE TABLE IF NOT EXISTS settings(
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL
    );

    -- Money columns are stored as TEXT and parsed as decimals; the JSON
    -- columns carry whatever generation of pricing data the vendor or an
    -- earlier admin tool left behind.
    CREATE TABLE IF NOT EXISTS properties(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        property_type TEXT NOT NULL DEFAULT 'Villa',
        location TEXT NOT NULL DEFAULT '',
        city TEXT NOT NULL DEFAULT '',
        max_guests INTEGER NOT NULL DEFAULT 0,
        rooms INTEGER NOT NULL DEFAULT 0,
        price TEXT NOT NULL DEFAULT '0',
        price_mon_thu TEXT NOT NULL DEFAULT '0',
        price_fri_sun TEXT NOT NULL DEFAULT '0',
        price_sat TEXT NOT NULL DEFAULT '0',
        onboarding_data TEXT,
        admin_pricing TEXT,
        is_approved INTEGER NOT NULL DEFAULT 0,
        created_at TEXT NOT NULL DEFAULT (datetime('now'))
    );
    CREATE INDEX IF NOT EXISTS idx_properties_type ON properties(property_type);
    CREATE INDEX IF NOT EXISTS idx_properties_approved ON properties(is_approved);
    "#,
    )?;
    Ok(())
}
