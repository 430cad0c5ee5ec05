// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use moneyplanner::commands::{exporter, reports, summary};
use moneyplanner::export::ExportFormat;
use moneyplanner::models::{YearMonth, start_of_day};
use moneyplanner::report::Scope;
use moneyplanner::{cli, db};
use rusqlite::{Connection, params};
use rust_decimal::Decimal;
use tempfile::tempdir;

fn setup() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    for (amount, kind, date) in [
        ("100", "INCOME", "2024-01-05 09:00:00.000"),
        ("40", "EXPENSE", "2024-01-05 18:00:00.000"),
        ("30", "EXPENSE", "2024-01-06 12:00:00.000"),
        ("250", "INCOME", "2023-12-20 08:00:00.000"),
    ] {
        conn.execute(
            "INSERT INTO transactions(amount, type, category, description, date)
             VALUES (?1, ?2, 'General', 'Seeded', ?3)",
            params![amount, kind, date],
        )
        .unwrap();
    }
    conn
}

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn summary_for(conn: &Connection, args: &[&str]) -> (String, moneyplanner::models::Totals) {
    let mut argv = vec!["moneyplanner", "summary"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    match matches.subcommand() {
        Some(("summary", m)) => summary::compute(conn, m).unwrap(),
        _ => panic!("no summary subcommand"),
    }
}

#[test]
fn summary_by_month_and_all_time() {
    let conn = setup();
    let (label, jan) = summary_for(&conn, &["--month", "2024-01"]);
    assert_eq!(label, "2024-01");
    assert_eq!(jan.total_income, Decimal::from(100));
    assert_eq!(jan.total_expenses, Decimal::from(70));
    assert_eq!(jan.net_balance, Decimal::from(30));

    let (_, all) = summary_for(&conn, &[]);
    assert_eq!(all.total_income, Decimal::from(350));
    assert_eq!(all.net_balance, Decimal::from(280));

    let (_, range) = summary_for(&conn, &["--from", "2024-01-06", "--to", "2024-01-31"]);
    assert_eq!(range.total_expenses, Decimal::from(30));
    assert_eq!(range.total_income, Decimal::ZERO);
}

#[test]
fn daily_series_from_store() {
    let conn = setup();
    let buckets = reports::daily_buckets(&conn, 3, day(2024, 1, 6)).unwrap();
    let keys: Vec<String> = buckets.iter().map(|b| b.period_key()).collect();
    assert_eq!(keys, vec!["2024-01-04", "2024-01-05", "2024-01-06"]);
    assert_eq!(buckets[1].income_total, Decimal::from(100));
    assert_eq!(buckets[1].expense_total, Decimal::from(40));
    assert_eq!(buckets[2].expense_total, Decimal::from(30));
}

#[test]
fn monthly_series_from_store() {
    let conn = setup();
    let current = YearMonth::new(2024, 2).unwrap();
    let buckets = reports::monthly_buckets(&conn, 3, current).unwrap();
    let keys: Vec<String> = buckets.iter().map(|b| b.period_key()).collect();
    assert_eq!(keys, vec!["2023-12", "2024-01", "2024-02"]);
    assert_eq!(buckets[0].income_total, Decimal::from(250));
    assert_eq!(buckets[1].net(), Decimal::from(30));
    assert_eq!(buckets[2].net(), Decimal::ZERO);
}

#[test]
fn export_month_to_directory() {
    let conn = setup();
    let dir = tempdir().unwrap();
    let now = start_of_day(day(2024, 2, 1));
    let done = exporter::export(
        &conn,
        Scope::Month(YearMonth::new(2024, 1).unwrap()),
        ExportFormat::Csv,
        Some(dir.path().to_path_buf()),
        now,
    )
    .unwrap()
    .unwrap();
    assert_eq!(done.file_name, "monthly_report_202401.csv");

    let contents = std::fs::read_to_string(&done.path).unwrap();
    // header plus the three January rows, newest first
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 4);
    assert!(lines[1].starts_with("06/01/2024,"));
    assert!(lines[3].ends_with(",100,70,30"));
}

#[test]
fn export_of_empty_scope_writes_nothing() {
    let conn = setup();
    let dir = tempdir().unwrap();
    let done = exporter::export(
        &conn,
        Scope::Month(YearMonth::new(2022, 6).unwrap()),
        ExportFormat::Text,
        Some(dir.path().to_path_buf()),
        start_of_day(day(2024, 2, 1)),
    )
    .unwrap();
    assert!(done.is_none());
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn export_all_uses_configured_directory() {
    let conn = setup();
    let dir = tempdir().unwrap();
    moneyplanner::settings::set(
        &conn,
        moneyplanner::settings::EXPORT_DIR,
        dir.path().to_str().unwrap(),
    )
    .unwrap();
    let done = exporter::export(
        &conn,
        Scope::All,
        ExportFormat::Text,
        None,
        start_of_day(day(2024, 2, 1)),
    )
    .unwrap()
    .unwrap();
    assert_eq!(done.file_name, "all_transactions_20240201.txt");
    assert!(done.path.starts_with(dir.path()));
    let text = std::fs::read_to_string(&done.path).unwrap();
    assert!(text.contains("Net Balance: ₹280.00"));
}
