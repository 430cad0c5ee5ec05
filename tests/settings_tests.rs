// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use moneyplanner::{db, settings};
use rusqlite::Connection;
use std::path::PathBuf;

fn setup() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    conn
}

#[test]
fn defaults_apply_until_set() {
    let conn = setup();
    assert_eq!(settings::currency_symbol(&conn).unwrap(), "₹");
    assert_eq!(settings::daily_window(&conn).unwrap(), 7);
    assert_eq!(settings::monthly_window(&conn).unwrap(), 6);
    assert!(settings::export_dir(&conn).unwrap().is_none());

    settings::set(&conn, settings::CURRENCY_SYMBOL, "$").unwrap();
    settings::set(&conn, settings::EXPORT_DIR, " /tmp/reports ").unwrap();
    settings::set(&conn, settings::DAILY_WINDOW, "14").unwrap();
    assert_eq!(settings::currency_symbol(&conn).unwrap(), "$");
    assert_eq!(
        settings::export_dir(&conn).unwrap(),
        Some(PathBuf::from("/tmp/reports"))
    );
    assert_eq!(settings::daily_window(&conn).unwrap(), 14);

    settings::unset(&conn, settings::DAILY_WINDOW).unwrap();
    assert_eq!(settings::daily_window(&conn).unwrap(), 7);
}

#[test]
fn bad_values_and_keys_are_refused() {
    let conn = setup();
    assert!(settings::set(&conn, settings::MONTHLY_WINDOW, "0").is_err());
    assert!(settings::set(&conn, settings::MONTHLY_WINDOW, "-2").is_err());
    assert!(settings::set(&conn, settings::MONTHLY_WINDOW, "six").is_err());
    assert!(settings::set(&conn, settings::CURRENCY_SYMBOL, "  ").is_err());
    assert!(settings::set(&conn, "base_currency", "USD").is_err());
    assert!(settings::get(&conn, "base_currency").is_err());
    assert_eq!(settings::monthly_window(&conn).unwrap(), 6);
}

#[test]
fn list_reports_every_key() {
    let conn = setup();
    let all = settings::list(&conn).unwrap();
    let keys: Vec<&str> = all.iter().map(|(k, _)| k.as_str()).collect();
    assert_eq!(
        keys,
        vec!["currency_symbol", "export_dir", "daily_window", "monthly_window"]
    );
    assert_eq!(all[1].1, None);
}
