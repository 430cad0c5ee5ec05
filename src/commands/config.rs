// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::settings;
use crate::utils::pretty_table;
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", _)) => {
            let data = settings::list(conn)?
                .into_iter()
                .map(|(k, v)| vec![k, v.unwrap_or_else(|| "(unset)".into())])
                .collect();
            println!("{}", pretty_table(&["Key", "Value"], data));
        }
        Some(("get", sub)) => {
            let key = sub.get_one::<String>("key").unwrap().trim();
            match settings::get(conn, key)? {
                Some(v) => println!("{}", v),
                None => println!("(unset)"),
            }
        }
        Some(("set", sub)) => {
            let key = sub.get_one::<String>("key").unwrap().trim();
            let value = sub.get_one::<String>("value").unwrap();
            settings::set(conn, key, value)?;
            println!("Set {} = {}", key, value.trim());
        }
        Some(("unset", sub)) => {
            let key = sub.get_one::<String>("key").unwrap().trim();
            settings::unset(conn, key)?;
            println!("Reset {} to its default", key);
        }
        _ => {}
    }
    Ok(())
}
