// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Balance totals and time-bucketed series over a transaction snapshot.
//!
//! Everything here is a pure function of its arguments. The "current" day or
//! month is always passed in, so the same snapshot yields the same output.

use crate::error::{PlannerError, PlannerResult};
use crate::models::{
    Bucket, DailyBucket, DateRange, MonthlyBucket, Totals, Transaction, YearMonth,
};
use chrono::{Duration, NaiveDate};
use std::collections::BTreeMap;

/// Totals over the transactions dated inside `range` (inclusive).
pub fn summarize<T: AsRef<Transaction>>(transactions: &[T], range: &DateRange) -> Totals {
    let mut totals = Totals::default();
    for tx in transactions.iter().map(AsRef::as_ref) {
        if range.contains(tx.date()) {
            totals.record(tx);
        }
    }
    totals
}

/// Totals over the whole snapshot.
pub fn summarize_all<T: AsRef<Transaction>>(transactions: &[T]) -> Totals {
    let mut totals = Totals::default();
    for tx in transactions {
        totals.record(tx.as_ref());
    }
    totals
}

/// One bucket per calendar day in `[today - window_days + 1, today]`, oldest first.
pub fn bucket_by_day<T: AsRef<Transaction>>(
    transactions: &[T],
    window_days: u32,
    today: NaiveDate,
) -> PlannerResult<Vec<DailyBucket>> {
    if window_days == 0 {
        return Err(PlannerError::invalid("Day window must be at least 1"));
    }
    let first = today
        .checked_sub_signed(Duration::days(i64::from(window_days) - 1))
        .ok_or_else(|| PlannerError::invalid(format!("Day window {} out of range", window_days)))?;

    let mut map: BTreeMap<NaiveDate, DailyBucket> = first
        .iter_days()
        .take(window_days as usize)
        .map(|d| (d, Bucket::empty(d)))
        .collect();

    for tx in transactions.iter().map(AsRef::as_ref) {
        if let Some(bucket) = map.get_mut(&tx.day()) {
            bucket.add(tx);
        }
    }
    Ok(map.into_values().collect())
}

/// One bucket per calendar month for the `month_count` months ending at
/// `current`, oldest first.
pub fn bucket_by_month<T: AsRef<Transaction>>(
    transactions: &[T],
    month_count: u32,
    current: YearMonth,
) -> PlannerResult<Vec<MonthlyBucket>> {
    if month_count == 0 {
        return Err(PlannerError::invalid("Month count must be at least 1"));
    }
    let mut map: BTreeMap<YearMonth, MonthlyBucket> = BTreeMap::new();
    let mut month = current;
    for _ in 0..month_count {
        map.insert(month, Bucket::empty(month));
        month = match month.pred() {
            Some(prev) => prev,
            None => break,
        };
    }
    if map.len() != month_count as usize {
        return Err(PlannerError::invalid(format!(
            "Month count {} out of range",
            month_count
        )));
    }

    for tx in transactions.iter().map(AsRef::as_ref) {
        if let Some(bucket) = map.get_mut(&YearMonth::from_date(tx.day())) {
            bucket.add(tx);
        }
    }
    Ok(map.into_values().collect())
}

/// Converts a host-supplied count (which may be negative) into a window size.
pub fn window_len(n: i64, what: &str) -> PlannerResult<u32> {
    match u32::try_from(n) {
        Ok(v) if v > 0 => Ok(v),
        _ => Err(PlannerError::invalid(format!(
            "{} must be a positive number, got {}",
            what, n
        ))),
    }
}
