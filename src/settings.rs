// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! User preferences, kept in the `settings` table next to the data.

use crate::aggregate::window_len;
use anyhow::{Context, Result, bail};
use rusqlite::{Connection, OptionalExtension, params};
use std::path::PathBuf;

pub const CURRENCY_SYMBOL: &str = "currency_symbol";
pub const EXPORT_DIR: &str = "export_dir";
pub const DAILY_WINDOW: &str = "daily_window";
pub const MONTHLY_WINDOW: &str = "monthly_window";

/// Known keys and their defaults. `export_dir` has none: the user's
/// Documents directory is used instead.
pub const KEYS: &[(&str, Option<&str>)] = &[
    (CURRENCY_SYMBOL, Some("₹")),
    (EXPORT_DIR, None),
    (DAILY_WINDOW, Some("7")),
    (MONTHLY_WINDOW, Some("6")),
];

fn default_for(key: &str) -> Result<Option<&'static str>> {
    KEYS.iter()
        .find(|(k, _)| *k == key)
        .map(|(_, d)| *d)
        .with_context(|| format!("Unknown setting '{}'", key))
}

pub fn get(conn: &Connection, key: &str) -> Result<Option<String>> {
    let default = default_for(key)?;
    let v: Option<String> = conn
        .query_row("SELECT value FROM settings WHERE key=?1", params![key], |r| {
            r.get(0)
        })
        .optional()?;
    Ok(v.or_else(|| default.map(str::to_string)))
}

pub fn set(conn: &Connection, key: &str, value: &str) -> Result<()> {
    default_for(key)?;
    let value = value.trim();
    if value.is_empty() {
        bail!("Value for '{}' must not be empty", key);
    }
    if key == DAILY_WINDOW || key == MONTHLY_WINDOW {
        let n: i64 = value
            .parse()
            .with_context(|| format!("Invalid number '{}' for {}", value, key))?;
        window_len(n, key)?;
    }
    conn.execute(
        "INSERT INTO settings(key, value) VALUES(?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        params![key, value],
    )?;
    Ok(())
}

/// Drops a stored value so the default applies again.
pub fn unset(conn: &Connection, key: &str) -> Result<()> {
    default_for(key)?;
    conn.execute("DELETE FROM settings WHERE key=?1", params![key])?;
    Ok(())
}

/// Every known key with its effective value, if any.
pub fn list(conn: &Connection) -> Result<Vec<(String, Option<String>)>> {
    KEYS.iter()
        .map(|(k, _)| -> Result<(String, Option<String>)> {
            Ok((k.to_string(), get(conn, k)?))
        })
        .collect()
}

pub fn currency_symbol(conn: &Connection) -> Result<String> {
    Ok(get(conn, CURRENCY_SYMBOL)?.unwrap_or_default())
}

pub fn export_dir(conn: &Connection) -> Result<Option<PathBuf>> {
    Ok(get(conn, EXPORT_DIR)?.map(PathBuf::from))
}

pub fn daily_window(conn: &Connection) -> Result<u32> {
    window_setting(conn, DAILY_WINDOW)
}

pub fn monthly_window(conn: &Connection) -> Result<u32> {
    window_setting(conn, MONTHLY_WINDOW)
}

fn window_setting(conn: &Connection, key: &str) -> Result<u32> {
    let raw = get(conn, key)?.unwrap_or_default();
    let n: i64 = raw
        .parse()
        .with_context(|| format!("Invalid stored value '{}' for {}", raw, key))?;
    Ok(window_len(n, key)?)
}
