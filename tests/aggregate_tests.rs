// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use moneyplanner::aggregate::{bucket_by_day, bucket_by_month, summarize, summarize_all, window_len};
use moneyplanner::models::{DateRange, Transaction, TransactionType, YearMonth};
use rust_decimal::Decimal;

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn tx(amount: i64, kind: TransactionType, date: NaiveDate, hour: u32) -> Transaction {
    Transaction::new(
        Decimal::from(amount),
        kind,
        "General",
        "Entry",
        date.and_hms_opt(hour, 0, 0).unwrap(),
    )
    .unwrap()
}

fn january() -> Vec<Transaction> {
    vec![
        tx(100, TransactionType::Income, day(2024, 1, 5), 9),
        tx(40, TransactionType::Expense, day(2024, 1, 5), 18),
        tx(30, TransactionType::Expense, day(2024, 1, 6), 12),
    ]
}

#[test]
fn summarize_whole_month() {
    let range = YearMonth::new(2024, 1).unwrap().range();
    let totals = summarize(&january(), &range);
    assert_eq!(totals.total_income, Decimal::from(100));
    assert_eq!(totals.total_expenses, Decimal::from(70));
    assert_eq!(totals.net_balance, Decimal::from(30));
}

#[test]
fn summarize_empty_is_zero() {
    let range = DateRange::from_days(day(2024, 1, 1), day(2024, 1, 31)).unwrap();
    let none: Vec<Transaction> = Vec::new();
    let totals = summarize(&none, &range);
    assert_eq!(totals.total_income, Decimal::ZERO);
    assert_eq!(totals.total_expenses, Decimal::ZERO);
    assert_eq!(totals.net_balance, Decimal::ZERO);

    let february = YearMonth::new(2024, 2).unwrap().range();
    assert_eq!(summarize(&january(), &february).net_balance, Decimal::ZERO);
}

#[test]
fn summarize_bounds_are_inclusive_to_the_millisecond() {
    let start = day(2024, 1, 5).and_hms_opt(0, 0, 0).unwrap();
    let last = day(2024, 1, 6).and_hms_milli_opt(23, 59, 59, 999).unwrap();
    let txs = vec![
        Transaction::new(Decimal::from(5), TransactionType::Income, "c", "d", start).unwrap(),
        Transaction::new(Decimal::from(7), TransactionType::Income, "c", "d", last).unwrap(),
    ];
    let range = DateRange::from_days(day(2024, 1, 5), day(2024, 1, 6)).unwrap();
    assert_eq!(summarize(&txs, &range).total_income, Decimal::from(12));

    let only_fifth = DateRange::day(day(2024, 1, 5));
    assert_eq!(summarize(&txs, &only_fifth).total_income, Decimal::from(5));
}

#[test]
fn summarize_balance_matches_totals() {
    let txs = january();
    let range = DateRange::from_days(day(2024, 1, 6), day(2024, 1, 6)).unwrap();
    let totals = summarize(&txs, &range);
    assert_eq!(totals.net_balance, totals.total_income - totals.total_expenses);
    assert!(totals.total_income >= Decimal::ZERO);
    assert_eq!(totals.net_balance, Decimal::from(-30));

    let all = summarize_all(&txs);
    assert_eq!(all.net_balance, Decimal::from(30));
}

#[test]
fn reversed_interval_is_invalid() {
    let err = DateRange::from_days(day(2024, 2, 1), day(2024, 1, 1)).unwrap_err();
    assert!(err.is_invalid_argument());
}

#[test]
fn daily_buckets_scenario() {
    let buckets = bucket_by_day(&january(), 3, day(2024, 1, 6)).unwrap();
    let keys: Vec<String> = buckets.iter().map(|b| b.period_key()).collect();
    assert_eq!(keys, vec!["2024-01-04", "2024-01-05", "2024-01-06"]);

    assert_eq!(buckets[0].income_total, Decimal::ZERO);
    assert_eq!(buckets[0].expense_total, Decimal::ZERO);
    assert_eq!(buckets[1].income_total, Decimal::from(100));
    assert_eq!(buckets[1].expense_total, Decimal::from(40));
    assert_eq!(buckets[2].income_total, Decimal::ZERO);
    assert_eq!(buckets[2].expense_total, Decimal::from(30));
}

#[test]
fn daily_buckets_always_fill_the_window() {
    let none: Vec<Transaction> = Vec::new();
    let today = day(2024, 3, 2);
    let buckets = bucket_by_day(&none, 7, today).unwrap();
    assert_eq!(buckets.len(), 7);
    assert_eq!(buckets[0].period, day(2024, 2, 25));
    assert_eq!(buckets[6].period, today);
    for pair in buckets.windows(2) {
        assert_eq!(pair[0].period.succ_opt().unwrap(), pair[1].period);
    }
}

#[test]
fn daily_buckets_combine_same_day_and_skip_outside() {
    let today = day(2024, 1, 10);
    let txs = vec![
        tx(10, TransactionType::Expense, day(2024, 1, 9), 8),
        tx(15, TransactionType::Expense, day(2024, 1, 9), 20),
        tx(500, TransactionType::Income, day(2023, 12, 1), 8),
        tx(70, TransactionType::Income, day(2024, 1, 11), 8),
    ];
    let buckets = bucket_by_day(&txs, 2, today).unwrap();
    assert_eq!(buckets[0].expense_total, Decimal::from(25));
    assert_eq!(buckets[0].net(), Decimal::from(-25));
    let income: Decimal = buckets.iter().map(|b| b.income_total).sum();
    assert_eq!(income, Decimal::ZERO);
}

#[test]
fn daily_buckets_conserve_window_totals() {
    let today = day(2024, 1, 6);
    let mut txs = january();
    txs.push(tx(999, TransactionType::Income, day(2023, 12, 31), 10));
    let buckets = bucket_by_day(&txs, 7, today).unwrap();

    let window = DateRange::from_days(day(2023, 12, 31), today).unwrap();
    let totals = summarize(&txs, &window);
    let income: Decimal = buckets.iter().map(|b| b.income_total).sum();
    let expense: Decimal = buckets.iter().map(|b| b.expense_total).sum();
    assert_eq!(income, totals.total_income);
    assert_eq!(expense, totals.total_expenses);
}

#[test]
fn zero_window_is_invalid() {
    let none: Vec<Transaction> = Vec::new();
    assert!(bucket_by_day(&none, 0, day(2024, 1, 1)).unwrap_err().is_invalid_argument());
    let month = YearMonth::new(2024, 1).unwrap();
    assert!(bucket_by_month(&none, 0, month).unwrap_err().is_invalid_argument());
    assert!(window_len(-3, "days").unwrap_err().is_invalid_argument());
    assert_eq!(window_len(7, "days").unwrap(), 7);
}

#[test]
fn monthly_buckets_roll_over_year_end() {
    let txs = vec![
        tx(200, TransactionType::Income, day(2023, 11, 30), 23),
        tx(50, TransactionType::Expense, day(2024, 1, 1), 0),
        tx(80, TransactionType::Expense, day(2024, 2, 29), 12),
        tx(1, TransactionType::Expense, day(2023, 10, 31), 12),
    ];
    let current = YearMonth::new(2024, 2).unwrap();
    let buckets = bucket_by_month(&txs, 4, current).unwrap();
    let keys: Vec<String> = buckets.iter().map(|b| b.period_key()).collect();
    assert_eq!(keys, vec!["2023-11", "2023-12", "2024-01", "2024-02"]);

    assert_eq!(buckets[0].income_total, Decimal::from(200));
    assert_eq!(buckets[1].income_total, Decimal::ZERO);
    assert_eq!(buckets[1].expense_total, Decimal::ZERO);
    assert_eq!(buckets[2].expense_total, Decimal::from(50));
    assert_eq!(buckets[3].expense_total, Decimal::from(80));
}

#[test]
fn year_month_parsing_and_bounds() {
    let m: YearMonth = "2024-02".parse().unwrap();
    assert_eq!(m.to_string(), "2024-02");
    assert_eq!(m.compact(), "202402");
    assert_eq!(m.last_day(), day(2024, 2, 29));
    assert_eq!(m.pred().unwrap().to_string(), "2024-01");
    assert!("2024-13".parse::<YearMonth>().is_err());
    assert!(YearMonth::new(2024, 0).is_err());
}

#[test]
fn transaction_rejects_bad_input() {
    let at = day(2024, 1, 1).and_hms_opt(0, 0, 0).unwrap();
    for amount in [Decimal::ZERO, Decimal::from(-5)] {
        let err = Transaction::new(amount, TransactionType::Income, "c", "d", at).unwrap_err();
        assert!(err.is_invalid_argument());
    }
    assert!(Transaction::new(Decimal::ONE, TransactionType::Income, "  ", "d", at).is_err());
    assert!(Transaction::new(Decimal::ONE, TransactionType::Income, "c", "", at).is_err());
    assert_eq!(
        "Expense".parse::<TransactionType>().unwrap(),
        TransactionType::Expense
    );
    assert!("transfer".parse::<TransactionType>().is_err());
}

#[test]
fn transaction_year_must_have_four_digits() {
    let far = day(10000, 1, 1).and_hms_opt(0, 0, 0).unwrap();
    let err = Transaction::new(Decimal::ONE, TransactionType::Income, "c", "d", far).unwrap_err();
    assert!(err.is_invalid_argument());

    let last = day(9999, 12, 31).and_hms_opt(23, 59, 59).unwrap();
    assert!(Transaction::new(Decimal::ONE, TransactionType::Income, "c", "d", last).is_ok());
}
