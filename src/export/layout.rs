// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Places a report onto fixed-size pages as positioned text runs.
//!
//! Coordinates are in points with the origin at the top-left corner and `y`
//! growing downwards. The default budget is A4 (595 x 842) with a 50pt
//! margin.

use crate::error::{PlannerError, PlannerResult};
use crate::report::Report;
use crate::utils::fmt_money;
use crate::models::TransactionType;

const LINE: f32 = 20.0;
const TITLE_SIZE: f32 = 24.0;
const HEADER_SIZE: f32 = 14.0;
const BODY_SIZE: f32 = 12.0;
/// Distance from the top margin to the table header line.
const HEADER_OFFSET: f32 = 70.0;
/// Rough glyph width as a fraction of the font size.
const GLYPH_RATIO: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageBudget {
    pub width: f32,
    pub height: f32,
    pub margin: f32,
}

impl Default for PageBudget {
    fn default() -> Self {
        Self {
            width: 595.0,
            height: 842.0,
            margin: 50.0,
        }
    }
}

impl PageBudget {
    pub fn new(width: f32, height: f32, margin: f32) -> PlannerResult<Self> {
        let budget = Self {
            width,
            height,
            margin,
        };
        if !(width > 0.0 && height > 0.0 && margin >= 0.0) {
            return Err(PlannerError::invalid(format!(
                "Page size {}x{} with margin {} is not usable",
                width, height, margin
            )));
        }
        if budget.amount_x() <= budget.description_x() + LINE
            || budget.bottom() < budget.margin + HEADER_OFFSET + LINE
        {
            return Err(PlannerError::invalid(format!(
                "Page {}x{} with margin {} is too small for the report table",
                width, height, margin
            )));
        }
        Ok(budget)
    }

    /// Lowest baseline a line may use before a page break.
    fn bottom(&self) -> f32 {
        self.height - self.margin
    }

    fn date_x(&self) -> f32 {
        self.margin
    }

    fn description_x(&self) -> f32 {
        self.margin + 100.0
    }

    fn amount_x(&self) -> f32 {
        self.width - self.margin - 145.0
    }

    fn type_x(&self) -> f32 {
        self.width - self.margin - 45.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Plain,
    Income,
    Expense,
}

impl From<TransactionType> for Tone {
    fn from(kind: TransactionType) -> Self {
        match kind {
            TransactionType::Income => Tone::Income,
            TransactionType::Expense => Tone::Expense,
        }
    }
}

/// One piece of text at a fixed position; `y` is the baseline.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub bold: bool,
    pub tone: Tone,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub number: usize,
    pub runs: Vec<TextRun>,
}

struct Cursor<'b> {
    budget: &'b PageBudget,
    pages: Vec<Page>,
    y: f32,
}

impl<'b> Cursor<'b> {
    fn new(budget: &'b PageBudget) -> Self {
        Self {
            budget,
            pages: vec![Page {
                number: 1,
                runs: Vec::new(),
            }],
            y: budget.margin,
        }
    }

    /// Breaks to a fresh page when the current line would cross the bottom margin.
    fn ensure_room(&mut self) {
        if self.y > self.budget.bottom() {
            let number = self.pages.len() + 1;
            self.pages.push(Page {
                number,
                runs: Vec::new(),
            });
            self.y = self.budget.margin;
        }
    }

    fn put(&mut self, x: f32, size: f32, bold: bool, tone: Tone, text: impl Into<String>) {
        let y = self.y;
        if let Some(page) = self.pages.last_mut() {
            page.runs.push(TextRun {
                x,
                y,
                size,
                bold,
                tone,
                text: text.into(),
            });
        }
    }
}

fn clip(text: &str, width: f32, size: f32) -> String {
    let max = (width / (size * GLYPH_RATIO)).max(1.0) as usize;
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}

/// Lays out title, table and totals. Rows are never split; the totals block
/// may continue on a new page.
pub fn paginate(report: &Report, budget: &PageBudget, symbol: &str) -> Vec<Page> {
    let mut cur = Cursor::new(budget);

    cur.put(budget.margin, TITLE_SIZE, false, Tone::Plain, &report.title);
    cur.y += 30.0;
    cur.put(
        budget.margin,
        BODY_SIZE,
        false,
        Tone::Plain,
        format!(
            "Generated on: {}",
            report.generated_at.format("%d/%m/%Y %H:%M")
        ),
    );

    cur.y = budget.margin + HEADER_OFFSET;
    for (x, label) in [
        (budget.date_x(), "Date"),
        (budget.description_x(), "Description"),
        (budget.amount_x(), "Amount"),
        (budget.type_x(), "Type"),
    ] {
        cur.put(x, HEADER_SIZE, true, Tone::Plain, label);
    }
    cur.y += LINE;

    let description_width = budget.amount_x() - budget.description_x() - 10.0;
    for row in report.rows() {
        cur.ensure_room();
        cur.put(budget.date_x(), BODY_SIZE, false, Tone::Plain, &row.date);
        cur.put(
            budget.description_x(),
            BODY_SIZE,
            false,
            Tone::Plain,
            clip(&row.description, description_width, BODY_SIZE),
        );
        cur.put(
            budget.amount_x(),
            BODY_SIZE,
            false,
            Tone::Plain,
            fmt_money(&row.amount, symbol),
        );
        cur.put(
            budget.type_x(),
            BODY_SIZE,
            false,
            row.kind.into(),
            row.kind.as_str(),
        );
        cur.y += LINE;
    }

    cur.y += LINE;
    let footer = &report.footer;
    for line in [
        format!("Total Income: {}", fmt_money(&footer.total_income, symbol)),
        format!("Total Expenses: {}", fmt_money(&footer.total_expenses, symbol)),
        format!("Net Balance: {}", fmt_money(&footer.net_balance, symbol)),
    ] {
        cur.ensure_room();
        cur.put(budget.margin, BODY_SIZE, true, Tone::Plain, line);
        cur.y += LINE;
    }

    cur.pages
}
