// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate::{summarize, summarize_all};
use crate::models::{DateRange, Totals};
use crate::settings;
use crate::store::{SqliteStore, TransactionStore};
use crate::utils::{fmt_money, maybe_print_json, parse_date, parse_month, pretty_table};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    let (label, totals) = compute(conn, m)?;
    if !maybe_print_json(m.get_flag("json"), m.get_flag("jsonl"), &totals)? {
        let symbol = settings::currency_symbol(conn)?;
        println!(
            "{}",
            pretty_table(
                &["Period", "Income", "Expenses", "Balance"],
                vec![vec![
                    label,
                    fmt_money(&totals.total_income, &symbol),
                    fmt_money(&totals.total_expenses, &symbol),
                    fmt_money(&totals.net_balance, &symbol),
                ]],
            )
        );
    }
    Ok(())
}

/// Dashboard totals for a month, a day range, or everything recorded.
pub fn compute(conn: &Connection, m: &clap::ArgMatches) -> Result<(String, Totals)> {
    let store = SqliteStore::new(conn);
    let range = if let Some(month) = m.get_one::<String>("month") {
        let month = parse_month(month)?;
        Some((month.to_string(), month.range()))
    } else if let (Some(from), Some(to)) = (m.get_one::<String>("from"), m.get_one::<String>("to"))
    {
        let range = DateRange::from_days(parse_date(from)?, parse_date(to)?)?;
        Some((format!("{} .. {}", from.trim(), to.trim()), range))
    } else {
        None
    };

    Ok(match range {
        Some((label, range)) => {
            let txs = store.get_between(&range)?;
            (label, summarize(&txs, &range))
        }
        None => ("All time".to_string(), summarize_all(&store.get_all()?)),
    })
}
