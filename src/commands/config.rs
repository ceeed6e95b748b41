// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::utils::{get_setting, pretty_table, set_setting};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set-api", sub)) => {
            let url = sub
                .get_one::<String>("url")
                .unwrap()
                .trim_end_matches('/')
                .to_string();
            set_setting(conn, "api_base_url", &url)?;
            if let Some(token) = sub.get_one::<String>("token") {
                set_setting(conn, "api_token", token)?;
            }
            println!("API endpoint set to {}", url);
        }
        Some(("show", _)) => {
            let url = get_setting(conn, "api_base_url")?.unwrap_or_else(|| "-".into());
            let token = if get_setting(conn, "api_token")?.is_some() {
                "set"
            } else {
                "-"
            };
            let rows = vec![
                vec!["api_base_url".to_string(), url],
                vec!["api_token".to_string(), token.to_string()],
            ];
            println!("{}", pretty_table(&["Key", "Value"], rows));
        }
        _ => {}
    }
    Ok(())
}
