// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Error types for the aggregation, report and export layers.
//!
//! Command handlers wrap these in `anyhow`; the library itself never does.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error for library operations.
#[derive(Error, Debug)]
pub enum PlannerError {
    /// Malformed call parameters (zero window, reversed interval, bad amount).
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Nothing matched the requested report scope.
    #[error("No transactions to export for {scope}")]
    EmptyInput { scope: String },

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Export(#[from] ExportError),
}

impl PlannerError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn is_empty_input(&self) -> bool {
        matches!(self, Self::EmptyInput { .. })
    }

    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }
}

/// Failures raised by the transaction store.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Storage error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Transaction {0} not found")]
    NotFound(i64),

    /// A persisted row no longer satisfies the model invariants.
    #[error("Corrupt transaction row {id}: invalid {column} '{value}'")]
    Corrupt {
        id: i64,
        column: &'static str,
        value: String,
    },
}

/// Failures raised while writing a report out.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Could not access documents directory")]
    NoDocumentsDir,

    #[error("Failed to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Write failed: {0}")]
    Write(#[from] std::io::Error),

    #[error("CSV export failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON export failed: {0}")]
    Json(#[from] serde_json::Error),
}

pub type PlannerResult<T> = Result<T, PlannerError>;
