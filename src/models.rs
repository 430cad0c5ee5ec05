// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::{PlannerError, PlannerResult};
use chrono::{Datelike, Duration, Months, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Persisted timestamp layout. Fixed width for years in [`YEAR_RANGE`], so
/// text ordering matches time ordering.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Years a transaction may fall in.
pub const YEAR_RANGE: std::ops::RangeInclusive<i32> = 0..=9999;

const MILLIS_PER_DAY: i64 = 86_400_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "INCOME",
            TransactionType::Expense => "EXPENSE",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("income") {
            Ok(TransactionType::Income)
        } else if s.eq_ignore_ascii_case("expense") {
            Ok(TransactionType::Expense)
        } else {
            Err(PlannerError::invalid(format!(
                "Unknown transaction type '{}', expected income|expense",
                s
            )))
        }
    }
}

/// A single money movement. Only constructible through [`Transaction::new`],
/// so every value carries a positive amount and non-blank labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transaction {
    amount: Decimal,
    #[serde(rename = "type")]
    kind: TransactionType,
    category: String,
    description: String,
    date: NaiveDateTime,
}

impl Transaction {
    pub fn new(
        amount: Decimal,
        kind: TransactionType,
        category: impl Into<String>,
        description: impl Into<String>,
        date: NaiveDateTime,
    ) -> PlannerResult<Self> {
        if amount <= Decimal::ZERO {
            return Err(PlannerError::invalid(format!(
                "Amount must be positive, got {}",
                amount
            )));
        }
        let category = category.into().trim().to_string();
        if category.is_empty() {
            return Err(PlannerError::invalid("Category must not be empty"));
        }
        let description = description.into().trim().to_string();
        if description.is_empty() {
            return Err(PlannerError::invalid("Description must not be empty"));
        }
        if !YEAR_RANGE.contains(&date.year()) {
            return Err(PlannerError::invalid(format!(
                "Year {} is out of range",
                date.year()
            )));
        }
        Ok(Self {
            amount,
            kind,
            category,
            description,
            date: truncate_to_millis(date),
        })
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn kind(&self) -> TransactionType {
        self.kind
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn date(&self) -> NaiveDateTime {
        self.date
    }

    /// Calendar day the transaction is bucketed under.
    pub fn day(&self) -> NaiveDate {
        self.date.date()
    }
}

impl AsRef<Transaction> for Transaction {
    fn as_ref(&self) -> &Transaction {
        self
    }
}

fn truncate_to_millis(ts: NaiveDateTime) -> NaiveDateTime {
    let nanos = ts.nanosecond() / 1_000_000 * 1_000_000;
    ts.with_nanosecond(nanos).unwrap_or(ts)
}

/// A transaction together with its store-assigned key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoredTransaction {
    pub id: i64,
    #[serde(flatten)]
    pub transaction: Transaction,
}

impl AsRef<Transaction> for StoredTransaction {
    fn as_ref(&self) -> &Transaction {
        &self.transaction
    }
}

/// Closed timestamp interval `[start, end]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl DateRange {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> PlannerResult<Self> {
        if start > end {
            return Err(PlannerError::invalid(format!(
                "Interval start {} is after end {}",
                start, end
            )));
        }
        Ok(Self { start, end })
    }

    /// From `start` 00:00:00.000 through `end` 23:59:59.999.
    pub fn from_days(start: NaiveDate, end: NaiveDate) -> PlannerResult<Self> {
        Self::new(start_of_day(start), end_of_day(end))
    }

    pub fn day(day: NaiveDate) -> Self {
        Self {
            start: start_of_day(day),
            end: end_of_day(day),
        }
    }

    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    pub fn end(&self) -> NaiveDateTime {
        self.end
    }

    pub fn contains(&self, ts: NaiveDateTime) -> bool {
        self.start <= ts && ts <= self.end
    }
}

pub fn start_of_day(day: NaiveDate) -> NaiveDateTime {
    day.and_time(NaiveTime::MIN)
}

pub fn end_of_day(day: NaiveDate) -> NaiveDateTime {
    start_of_day(day) + Duration::milliseconds(MILLIS_PER_DAY - 1)
}

/// A calendar month, stored as its first day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth(NaiveDate);

impl YearMonth {
    pub fn new(year: i32, month: u32) -> PlannerResult<Self> {
        NaiveDate::from_ymd_opt(year, month, 1)
            .map(YearMonth)
            .ok_or_else(|| PlannerError::invalid(format!("Invalid month {}-{}", year, month)))
    }

    pub fn from_date(date: NaiveDate) -> Self {
        YearMonth(date.with_day(1).unwrap_or(date))
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn first_day(&self) -> NaiveDate {
        self.0
    }

    pub fn last_day(&self) -> NaiveDate {
        self.0
            .checked_add_months(Months::new(1))
            .and_then(|d| d.pred_opt())
            .unwrap_or(NaiveDate::MAX)
    }

    pub fn pred(&self) -> Option<Self> {
        self.0.checked_sub_months(Months::new(1)).map(YearMonth)
    }

    /// Every instant of the month, first day 00:00 through last day 23:59:59.999.
    pub fn range(&self) -> DateRange {
        DateRange {
            start: start_of_day(self.first_day()),
            end: end_of_day(self.last_day()),
        }
    }

    /// `YYYYMM`, as used in report file names.
    pub fn compact(&self) -> String {
        format!("{:04}{:02}", self.year(), self.month())
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}

impl FromStr for YearMonth {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        NaiveDate::parse_from_str(&format!("{}-01", s), "%Y-%m-%d")
            .map(YearMonth)
            .map_err(|_| PlannerError::invalid(format!("Invalid month '{}', expected YYYY-MM", s)))
    }
}

impl Serialize for YearMonth {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Income and expense totals for one period slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Bucket<P> {
    #[serde(rename = "period_key")]
    pub period: P,
    pub income_total: Decimal,
    pub expense_total: Decimal,
}

impl<P: fmt::Display> Bucket<P> {
    pub fn empty(period: P) -> Self {
        Self {
            period,
            income_total: Decimal::ZERO,
            expense_total: Decimal::ZERO,
        }
    }

    /// `YYYY-MM-DD` for days, `YYYY-MM` for months.
    pub fn period_key(&self) -> String {
        self.period.to_string()
    }

    pub fn net(&self) -> Decimal {
        self.income_total - self.expense_total
    }

    pub(crate) fn add(&mut self, tx: &Transaction) {
        match tx.kind() {
            TransactionType::Income => self.income_total += tx.amount(),
            TransactionType::Expense => self.expense_total += tx.amount(),
        }
    }
}

pub type DailyBucket = Bucket<NaiveDate>;
pub type MonthlyBucket = Bucket<YearMonth>;

/// Income/expense totals and their difference.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Totals {
    pub total_income: Decimal,
    pub total_expenses: Decimal,
    pub net_balance: Decimal,
}

impl Totals {
    pub fn record(&mut self, tx: &Transaction) {
        match tx.kind() {
            TransactionType::Income => self.total_income += tx.amount(),
            TransactionType::Expense => self.total_expenses += tx.amount(),
        }
        self.net_balance = self.total_income - self.total_expenses;
    }
}
