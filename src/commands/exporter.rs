// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::PlannerError;
use crate::export::{ExportFormat, Exported, PageBudget, documents_dir, export_report};
use crate::report::{Scope, build_report};
use crate::settings;
use crate::store::{SqliteStore, TransactionStore};
use crate::utils::parse_month;
use anyhow::Result;
use chrono::{Local, NaiveDateTime};
use rusqlite::Connection;
use std::path::PathBuf;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    let scope = match m.get_one::<String>("month") {
        Some(s) => Scope::Month(parse_month(s)?),
        None => Scope::All,
    };
    let format: ExportFormat = m.get_one::<String>("format").unwrap().parse()?;
    let out_dir = m.get_one::<String>("out-dir").map(|s| PathBuf::from(s.trim()));

    match export(conn, scope, format, out_dir, Local::now().naive_local())? {
        Some(done) => println!(
            "Exported {} ({} page(s)) to {}",
            done.file_name,
            done.pages,
            done.path.display()
        ),
        None => println!("No transactions to export"),
    }
    Ok(())
}

/// Builds and writes the report for `scope`. `Ok(None)` when the scope has
/// no transactions.
pub fn export(
    conn: &Connection,
    scope: Scope,
    format: ExportFormat,
    out_dir: Option<PathBuf>,
    now: NaiveDateTime,
) -> Result<Option<Exported>> {
    let store = SqliteStore::new(conn);
    let txs = match scope {
        Scope::All => store.get_all()?,
        Scope::Month(month) => store.get_between(&month.range())?,
    };
    let report = match build_report(&txs, scope, now) {
        Ok(r) => r,
        Err(PlannerError::EmptyInput { .. }) => return Ok(None),
        Err(e) => return Err(e.into()),
    };

    let dir = match out_dir {
        Some(d) => d,
        None => documents_dir(settings::export_dir(conn)?)?,
    };
    let sink = format.sink(&settings::currency_symbol(conn)?);
    let done = export_report(&report, sink.as_ref(), &PageBudget::default(), &dir)?;
    Ok(Some(done))
}
