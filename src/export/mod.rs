// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Writing a built [`Report`] out to a file.
//!
//! A sink only renders into a writer. Choosing the directory, naming the
//! file and cleaning up after a failed write happen in [`export_report`].

pub mod layout;
pub mod sinks;

pub use layout::{Page, PageBudget, TextRun, Tone, paginate};
pub use sinks::{CsvSink, JsonSink, TextSink};

use crate::error::{ExportError, PlannerError};
use crate::report::Report;
use directories::UserDirs;
use std::fmt;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tempfile::NamedTempFile;
use tracing::{info, warn};

pub trait ExportSink {
    /// File extension, without the dot.
    fn extension(&self) -> &'static str;

    /// Renders `report` into `out` and returns the number of pages produced.
    fn write(
        &self,
        report: &Report,
        budget: &PageBudget,
        out: &mut dyn Write,
    ) -> Result<usize, ExportError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputCategory {
    Documents,
}

impl fmt::Display for OutputCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputCategory::Documents => f.write_str("documents"),
        }
    }
}

/// Where a report ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exported {
    pub path: PathBuf,
    pub file_name: String,
    pub category: OutputCategory,
    pub pages: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Text,
    Csv,
    Json,
}

impl ExportFormat {
    pub fn sink(&self, symbol: &str) -> Box<dyn ExportSink> {
        match self {
            ExportFormat::Text => Box::new(TextSink::new(symbol)),
            ExportFormat::Csv => Box::new(CsvSink),
            ExportFormat::Json => Box::new(JsonSink),
        }
    }
}

impl FromStr for ExportFormat {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" | "txt" => Ok(ExportFormat::Text),
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            other => Err(PlannerError::invalid(format!(
                "Unknown format: {} (use text|csv|json)",
                other
            ))),
        }
    }
}

/// The configured directory if there is one, else the user's Documents folder.
pub fn documents_dir(configured: Option<PathBuf>) -> Result<PathBuf, ExportError> {
    if let Some(dir) = configured {
        return Ok(dir);
    }
    UserDirs::new()
        .and_then(|u| u.document_dir().map(Path::to_path_buf))
        .ok_or(ExportError::NoDocumentsDir)
}

/// Writes `report` into `dir` as `<file_stem>.<ext>`. The output goes to a
/// temporary file in `dir` first and replaces any existing file only once
/// the sink has finished, so a failed export leaves the old one intact.
pub fn export_report(
    report: &Report,
    sink: &dyn ExportSink,
    budget: &PageBudget,
    dir: &Path,
) -> Result<Exported, ExportError> {
    fs::create_dir_all(dir).map_err(|source| ExportError::Io {
        path: dir.to_path_buf(),
        source,
    })?;
    let file_name = format!("{}.{}", report.file_stem, sink.extension());
    let path = dir.join(&file_name);
    let io_err = |source| ExportError::Io {
        path: path.clone(),
        source,
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(io_err)?;
    let written = {
        let mut out = BufWriter::new(tmp.as_file_mut());
        sink.write(report, budget, &mut out)
            .and_then(|pages| out.flush().map(|_| pages).map_err(ExportError::from))
    };
    let pages = match written {
        Ok(pages) => pages,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Discarding partial export");
            return Err(match e {
                ExportError::Write(source) => io_err(source),
                other => other,
            });
        }
    };
    tmp.persist(&path).map_err(|e| io_err(e.error))?;

    info!(path = %path.display(), pages, "Exported report");
    Ok(Exported {
        path,
        file_name,
        category: OutputCategory::Documents,
        pages,
    })
}
