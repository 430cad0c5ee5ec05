// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::ExportSink;
use super::layout::{PageBudget, paginate};
use crate::error::ExportError;
use crate::report::Report;
use std::io::Write;

/// Approximate width of one monospace character, in points.
const CHAR_WIDTH: f32 = 6.0;
const FORM_FEED: char = '\u{000C}';

/// Paged plain-text document; one form feed between pages.
pub struct TextSink {
    symbol: String,
}

impl TextSink {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
        }
    }
}

impl ExportSink for TextSink {
    fn extension(&self) -> &'static str {
        "txt"
    }

    fn write(
        &self,
        report: &Report,
        budget: &PageBudget,
        out: &mut dyn Write,
    ) -> Result<usize, ExportError> {
        let pages = paginate(report, budget, &self.symbol);
        for (i, page) in pages.iter().enumerate() {
            if i > 0 {
                writeln!(out, "{}", FORM_FEED)?;
            }
            let mut line = String::new();
            let mut line_y: Option<f32> = None;
            for run in &page.runs {
                if line_y.is_some_and(|y| y != run.y) {
                    writeln!(out, "{}", line.trim_end())?;
                    line.clear();
                }
                line_y = Some(run.y);
                let col = ((run.x - budget.margin).max(0.0) / CHAR_WIDTH) as usize;
                let len = line.chars().count();
                if len < col {
                    line.extend(std::iter::repeat_n(' ', col - len));
                } else if len > 0 {
                    line.push(' ');
                }
                line.push_str(&run.text);
            }
            if line_y.is_some() {
                writeln!(out, "{}", line.trim_end())?;
            }
            writeln!(out)?;
            writeln!(out, "Page {} of {}", page.number, pages.len())?;
        }
        Ok(pages.len())
    }
}

/// One CSV record per report row, running totals included. Decimals are
/// written at full precision.
pub struct CsvSink;

impl ExportSink for CsvSink {
    fn extension(&self) -> &'static str {
        "csv"
    }

    fn write(
        &self,
        report: &Report,
        _budget: &PageBudget,
        out: &mut dyn Write,
    ) -> Result<usize, ExportError> {
        let mut wtr = csv::Writer::from_writer(out);
        wtr.write_record([
            "date",
            "description",
            "category",
            "type",
            "amount",
            "total_income",
            "total_expenses",
            "net_balance",
        ])?;
        for row in report.rows() {
            wtr.write_record([
                row.date.clone(),
                row.description.clone(),
                row.category.clone(),
                row.kind.as_str().to_string(),
                row.amount.to_string(),
                row.running.total_income.to_string(),
                row.running.total_expenses.to_string(),
                row.running.net_balance.to_string(),
            ])?;
        }
        wtr.flush()?;
        Ok(1)
    }
}

/// The whole report as pretty-printed JSON.
pub struct JsonSink;

impl ExportSink for JsonSink {
    fn extension(&self) -> &'static str {
        "json"
    }

    fn write(
        &self,
        report: &Report,
        _budget: &PageBudget,
        out: &mut dyn Write,
    ) -> Result<usize, ExportError> {
        serde_json::to_writer_pretty(&mut *out, report)?;
        writeln!(out)?;
        Ok(1)
    }
}
