// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::StorageError;
use crate::models::{DateRange, StoredTransaction, Transaction, TransactionType};
use crate::settings;
use crate::store::{SqliteStore, TransactionStore};
use crate::utils::{
    fmt_money, maybe_print_json, parse_date, parse_decimal, parse_timestamp, pretty_table,
};
use anyhow::Result;
use chrono::{Local, NaiveDate};
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            add(conn, sub)?;
        }
        Some(("list", sub)) => list(conn, sub)?,
        Some(("edit", sub)) => {
            edit(conn, sub)?;
        }
        Some(("rm", sub)) => remove(conn, sub)?,
        Some(("reset", sub)) => reset(conn, sub)?,
        _ => {}
    }
    Ok(())
}

pub fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<StoredTransaction> {
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    let kind: TransactionType = sub.get_one::<String>("type").unwrap().parse()?;
    let category = sub.get_one::<String>("category").unwrap();
    let description = sub.get_one::<String>("description").unwrap();
    let date = match sub.get_one::<String>("date") {
        Some(s) => parse_timestamp(s)?,
        None => Local::now().naive_local(),
    };

    let tx = Transaction::new(amount, kind, category.as_str(), description.as_str(), date)?;
    let stored = SqliteStore::new(conn).insert(&tx)?;
    let symbol = settings::currency_symbol(conn)?;
    println!(
        "Recorded {} {} on {} for '{}' (id {})",
        kind,
        fmt_money(&tx.amount(), &symbol),
        tx.date().format("%d/%m/%Y %H:%M"),
        tx.description(),
        stored.id
    );
    Ok(stored)
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(conn, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let symbol = settings::currency_symbol(conn)?;
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|s| {
                let t = &s.transaction;
                vec![
                    s.id.to_string(),
                    t.date().format("%d/%m/%Y %H:%M").to_string(),
                    t.kind().to_string(),
                    t.category().to_string(),
                    t.description().to_string(),
                    fmt_money(&t.amount(), &symbol),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["ID", "Date", "Type", "Category", "Description", "Amount"],
                rows,
            )
        );
    }
    Ok(())
}

/// Transactions matching the `list` filters, newest first.
pub fn query_rows(conn: &Connection, sub: &clap::ArgMatches) -> Result<Vec<StoredTransaction>> {
    let store = SqliteStore::new(conn);
    let from = sub.get_one::<String>("from").map(|s| parse_date(s)).transpose()?;
    let to = sub.get_one::<String>("to").map(|s| parse_date(s)).transpose()?;
    let kind = sub
        .get_one::<String>("type")
        .map(|s| s.parse::<TransactionType>())
        .transpose()?;

    let mut data = match (from, to, kind) {
        (None, None, Some(k)) => store.get_by_type(k)?,
        (None, None, None) => store.get_all()?,
        (Some(from), Some(to), _) => store.get_between(&DateRange::from_days(from, to)?)?,
        (from, to, _) => {
            // Open-ended bounds fall outside the stored text layout, filter in memory.
            let range = DateRange::from_days(
                from.unwrap_or(NaiveDate::MIN),
                to.unwrap_or(NaiveDate::MAX),
            )?;
            let mut all = store.get_all()?;
            all.retain(|s| range.contains(s.transaction.date()));
            all
        }
    };
    if let Some(k) = kind {
        data.retain(|s| s.transaction.kind() == k);
    }
    if let Some(limit) = sub.get_one::<usize>("limit") {
        data.truncate(*limit);
    }
    Ok(data)
}

pub fn edit(conn: &Connection, sub: &clap::ArgMatches) -> Result<StoredTransaction> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let store = SqliteStore::new(conn);
    let current = store.get(id)?.ok_or(StorageError::NotFound(id))?.transaction;

    let amount = match sub.get_one::<String>("amount") {
        Some(s) => parse_decimal(s)?,
        None => current.amount(),
    };
    let kind = match sub.get_one::<String>("type") {
        Some(s) => s.parse::<TransactionType>()?,
        None => current.kind(),
    };
    let date = match sub.get_one::<String>("date") {
        Some(s) => parse_timestamp(s)?,
        None => current.date(),
    };
    let category = sub
        .get_one::<String>("category")
        .map(String::as_str)
        .unwrap_or(current.category());
    let description = sub
        .get_one::<String>("description")
        .map(String::as_str)
        .unwrap_or(current.description());

    let updated = Transaction::new(amount, kind, category, description, date)?;
    let stored = store.update(id, &updated)?;
    println!("Updated transaction {}", id);
    Ok(stored)
}

fn remove(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    SqliteStore::new(conn).delete(id)?;
    println!("Removed transaction {}", id);
    Ok(())
}

fn reset(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    if !sub.get_flag("yes") {
        println!("This deletes every transaction and cannot be undone; re-run with --yes");
        return Ok(());
    }
    let removed = SqliteStore::new(conn).delete_all()?;
    println!("All transactions have been reset ({} removed)", removed);
    Ok(())
}
