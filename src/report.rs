// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Tabular report with running totals, independent of any output format.

use crate::error::{PlannerError, PlannerResult};
use crate::models::{Totals, Transaction, TransactionType, YearMonth};
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;
use tracing::info;

/// Which transactions a report covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    All,
    Month(YearMonth),
}

impl Scope {
    pub fn includes(&self, tx: &Transaction) -> bool {
        match self {
            Scope::All => true,
            Scope::Month(m) => m.range().contains(tx.date()),
        }
    }

    pub fn title(&self) -> String {
        match self {
            Scope::All => "All Transactions Report".to_string(),
            Scope::Month(m) => format!("Monthly Transaction Report ({})", m),
        }
    }

    /// Output file name without extension.
    pub fn file_stem(&self, generated_at: NaiveDateTime) -> String {
        match self {
            Scope::All => format!("all_transactions_{}", generated_at.format("%Y%m%d")),
            Scope::Month(m) => format!("monthly_report_{}", m.compact()),
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::All => f.write_str("all transactions"),
            Scope::Month(m) => write!(f, "{}", m),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportRow {
    /// `dd/mm/yyyy`
    pub date: String,
    pub description: String,
    pub category: String,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub amount: Decimal,
    #[serde(flatten)]
    pub running: Totals,
}

impl ReportRow {
    pub fn signed_amount(&self) -> Decimal {
        match self.kind {
            TransactionType::Income => self.amount,
            TransactionType::Expense => -self.amount,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub title: String,
    pub generated_at: NaiveDateTime,
    #[serde(skip)]
    pub scope: Scope,
    pub file_stem: String,
    pub rows: Vec<ReportRow>,
    pub footer: Totals,
}

impl Report {
    pub fn rows(&self) -> impl Iterator<Item = &ReportRow> {
        self.rows.iter()
    }
}

/// Lazily turns transactions into report rows, carrying totals forward.
pub struct RunningRows<I> {
    inner: I,
    totals: Totals,
}

pub fn running_rows<'a, I>(transactions: I) -> RunningRows<I::IntoIter>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    RunningRows {
        inner: transactions.into_iter(),
        totals: Totals::default(),
    }
}

impl<I> RunningRows<I> {
    /// Totals over the rows yielded so far.
    pub fn totals(&self) -> Totals {
        self.totals
    }
}

impl<'a, I> Iterator for RunningRows<I>
where
    I: Iterator<Item = &'a Transaction>,
{
    type Item = ReportRow;

    fn next(&mut self) -> Option<ReportRow> {
        let tx = self.inner.next()?;
        self.totals.record(tx);
        Some(ReportRow {
            date: tx.date().format("%d/%m/%Y").to_string(),
            description: tx.description().to_string(),
            category: tx.category().to_string(),
            kind: tx.kind(),
            amount: tx.amount(),
            running: self.totals,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

/// Builds the report for `scope`, keeping the snapshot's order.
pub fn build_report<T: AsRef<Transaction>>(
    transactions: &[T],
    scope: Scope,
    generated_at: NaiveDateTime,
) -> PlannerResult<Report> {
    let mut rows_iter = running_rows(
        transactions
            .iter()
            .map(AsRef::as_ref)
            .filter(|tx| scope.includes(tx)),
    );
    let rows: Vec<ReportRow> = rows_iter.by_ref().collect();
    if rows.is_empty() {
        return Err(PlannerError::EmptyInput {
            scope: scope.to_string(),
        });
    }
    let footer = rows_iter.totals();
    info!(%scope, rows = rows.len(), "Built report");
    Ok(Report {
        title: scope.title(),
        generated_at,
        scope,
        file_stem: scope.file_stem(generated_at),
        rows,
        footer,
    })
}
