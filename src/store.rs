// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Transaction persistence.

use crate::error::StorageError;
use crate::models::{
    DateRange, StoredTransaction, TIMESTAMP_FORMAT, Transaction, TransactionType,
};
use chrono::NaiveDateTime;
use rusqlite::{Connection, Params, Row, params};
use rust_decimal::Decimal;
use tracing::debug;

/// The queries the aggregation and report layers rely on. Listings are
/// newest first, ties broken by newest id.
pub trait TransactionStore {
    fn insert(&self, tx: &Transaction) -> Result<StoredTransaction, StorageError>;
    fn update(&self, id: i64, tx: &Transaction) -> Result<StoredTransaction, StorageError>;
    fn delete(&self, id: i64) -> Result<(), StorageError>;
    /// Returns how many rows were removed.
    fn delete_all(&self) -> Result<usize, StorageError>;
    fn get(&self, id: i64) -> Result<Option<StoredTransaction>, StorageError>;
    fn get_all(&self) -> Result<Vec<StoredTransaction>, StorageError>;
    /// Both bounds inclusive.
    fn get_between(&self, range: &DateRange) -> Result<Vec<StoredTransaction>, StorageError>;
    fn get_by_type(&self, kind: TransactionType) -> Result<Vec<StoredTransaction>, StorageError>;
}

pub struct SqliteStore<'c> {
    conn: &'c Connection,
}

const SELECT: &str = "SELECT id, amount, type, category, description, date FROM transactions";

impl<'c> SqliteStore<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        Self { conn }
    }

    fn query<P: Params>(
        &self,
        filter: &str,
        params: P,
    ) -> Result<Vec<StoredTransaction>, StorageError> {
        let sql = format!("{} {} ORDER BY date DESC, id DESC", SELECT, filter);
        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params)?;
        let mut data = Vec::new();
        while let Some(r) = rows.next()? {
            data.push(from_row(r)?);
        }
        debug!(filter, rows = data.len(), "Loaded transactions");
        Ok(data)
    }
}

fn fmt_ts(ts: NaiveDateTime) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

fn from_row(r: &Row<'_>) -> Result<StoredTransaction, StorageError> {
    let id: i64 = r.get(0)?;
    let amount_s: String = r.get(1)?;
    let kind_s: String = r.get(2)?;
    let category: String = r.get(3)?;
    let description: String = r.get(4)?;
    let date_s: String = r.get(5)?;

    let corrupt = |column: &'static str, value: &str| StorageError::Corrupt {
        id,
        column,
        value: value.to_string(),
    };
    let amount = amount_s
        .parse::<Decimal>()
        .map_err(|_| corrupt("amount", &amount_s))?;
    let kind = match kind_s.as_str() {
        "INCOME" => TransactionType::Income,
        "EXPENSE" => TransactionType::Expense,
        other => return Err(corrupt("type", other)),
    };
    let date = NaiveDateTime::parse_from_str(&date_s, TIMESTAMP_FORMAT)
        .map_err(|_| corrupt("date", &date_s))?;
    if amount <= Decimal::ZERO {
        return Err(corrupt("amount", &amount_s));
    }
    let transaction = Transaction::new(amount, kind, category.as_str(), description.as_str(), date)
        .map_err(|_| {
            if category.trim().is_empty() {
                corrupt("category", &category)
            } else {
                corrupt("description", &description)
            }
        })?;
    Ok(StoredTransaction { id, transaction })
}

impl TransactionStore for SqliteStore<'_> {
    fn insert(&self, tx: &Transaction) -> Result<StoredTransaction, StorageError> {
        self.conn.execute(
            "INSERT INTO transactions(amount, type, category, description, date)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                tx.amount().to_string(),
                tx.kind().as_str(),
                tx.category(),
                tx.description(),
                fmt_ts(tx.date()),
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        debug!(id, kind = %tx.kind(), amount = %tx.amount(), "Inserted transaction");
        Ok(StoredTransaction {
            id,
            transaction: tx.clone(),
        })
    }

    fn update(&self, id: i64, tx: &Transaction) -> Result<StoredTransaction, StorageError> {
        let changed = self.conn.execute(
            "UPDATE transactions SET amount=?1, type=?2, category=?3, description=?4, date=?5
             WHERE id=?6",
            params![
                tx.amount().to_string(),
                tx.kind().as_str(),
                tx.category(),
                tx.description(),
                fmt_ts(tx.date()),
                id,
            ],
        )?;
        if changed == 0 {
            return Err(StorageError::NotFound(id));
        }
        debug!(id, "Updated transaction");
        Ok(StoredTransaction {
            id,
            transaction: tx.clone(),
        })
    }

    fn delete(&self, id: i64) -> Result<(), StorageError> {
        let changed = self
            .conn
            .execute("DELETE FROM transactions WHERE id=?1", params![id])?;
        if changed == 0 {
            return Err(StorageError::NotFound(id));
        }
        debug!(id, "Deleted transaction");
        Ok(())
    }

    fn delete_all(&self) -> Result<usize, StorageError> {
        let removed = self.conn.execute("DELETE FROM transactions", [])?;
        debug!(removed, "Deleted all transactions");
        Ok(removed)
    }

    fn get(&self, id: i64) -> Result<Option<StoredTransaction>, StorageError> {
        Ok(self.query("WHERE id=?1", params![id])?.into_iter().next())
    }

    fn get_all(&self) -> Result<Vec<StoredTransaction>, StorageError> {
        self.query("", [])
    }

    fn get_between(&self, range: &DateRange) -> Result<Vec<StoredTransaction>, StorageError> {
        self.query(
            "WHERE date BETWEEN ?1 AND ?2",
            params![fmt_ts(range.start()), fmt_ts(range.end())],
        )
    }

    fn get_by_type(&self, kind: TransactionType) -> Result<Vec<StoredTransaction>, StorageError> {
        self.query("WHERE type=?1", params![kind.as_str()])
    }
}
