// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate::{bucket_by_day, bucket_by_month, window_len};
use crate::models::{Bucket, DailyBucket, DateRange, MonthlyBucket, YearMonth};
use crate::settings;
use crate::store::{SqliteStore, TransactionStore};
use crate::utils::{fmt_money, maybe_print_json, pretty_table};
use anyhow::{Context, Result};
use chrono::{Days, Local, Months, NaiveDate};
use rusqlite::Connection;
use std::fmt::Display;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("daily", sub)) => daily(conn, sub)?,
        Some(("monthly", sub)) => monthly(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn daily(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let days = match sub.get_one::<i64>("days") {
        Some(n) => window_len(*n, "days")?,
        None => settings::daily_window(conn)?,
    };
    let data = daily_buckets(conn, days, Local::now().date_naive())?;
    print_buckets(conn, sub, "Day", &data)
}

fn monthly(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let months = match sub.get_one::<i64>("months") {
        Some(n) => window_len(*n, "months")?,
        None => settings::monthly_window(conn)?,
    };
    let current = YearMonth::from_date(Local::now().date_naive());
    let data = monthly_buckets(conn, months, current)?;
    print_buckets(conn, sub, "Month", &data)
}

/// Day-by-day totals for the `days` days ending at `today`.
pub fn daily_buckets(conn: &Connection, days: u32, today: NaiveDate) -> Result<Vec<DailyBucket>> {
    let first = today
        .checked_sub_days(Days::new(u64::from(days.saturating_sub(1))))
        .with_context(|| format!("Day window {} reaches before the calendar start", days))?;
    let txs = SqliteStore::new(conn).get_between(&DateRange::from_days(first, today)?)?;
    Ok(bucket_by_day(&txs, days, today)?)
}

/// Month-by-month totals for the `months` months ending at `current`.
pub fn monthly_buckets(
    conn: &Connection,
    months: u32,
    current: YearMonth,
) -> Result<Vec<MonthlyBucket>> {
    let first = current
        .first_day()
        .checked_sub_months(Months::new(months.saturating_sub(1)))
        .with_context(|| format!("Month window {} reaches before the calendar start", months))?;
    let txs =
        SqliteStore::new(conn).get_between(&DateRange::from_days(first, current.last_day())?)?;
    Ok(bucket_by_month(&txs, months, current)?)
}

fn print_buckets<P: Display + serde::Serialize>(
    conn: &Connection,
    sub: &clap::ArgMatches,
    label: &str,
    data: &[Bucket<P>],
) -> Result<()> {
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        return Ok(());
    }
    let symbol = settings::currency_symbol(conn)?;
    let rows = data
        .iter()
        .map(|b| {
            vec![
                b.period_key(),
                fmt_money(&b.income_total, &symbol),
                fmt_money(&b.expense_total, &symbol),
                fmt_money(&b.net(), &symbol),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&[label, "Income", "Expenses", "Net"], rows)
    );
    Ok(())
}
