#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::collections::HashMap;

use bon::Builder;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{lateness::LatePolicy, results::format_points};
use crate::{
    constants::{CSV_LINE_END, DEFAULT_GRADE_COLUMN, DEFAULT_HEADER_LINES, DEFAULT_ID_COLUMN},
    error::MergeError,
    parsers::parser,
};

/// Where things live in the grade-book export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Builder, Serialize, Deserialize)]
pub struct RosterLayout {
    /// Lines before the first data row, skipped on output unless
    /// `keep_header` is set.
    #[builder(default = DEFAULT_HEADER_LINES)]
    pub header_lines: usize,
    /// Column holding the student id.
    #[builder(default = DEFAULT_ID_COLUMN)]
    pub id_column:    usize,
    /// Column holding the grade to rewrite.
    #[builder(default = DEFAULT_GRADE_COLUMN)]
    pub grade_column: usize,
    /// Copy the header lines into the rewritten grade book.
    #[builder(default)]
    #[serde(default)]
    pub keep_header:  bool,
}

impl Default for RosterLayout {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// A grade-book export: header lines followed by CSV rows.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Roster {
    /// Header lines, as read.
    header: Vec<String>,
    /// Data rows, split into fields.
    rows:   Vec<Vec<String>>,
}

impl Roster {
    /// Creates a roster from parts.
    pub fn new(header: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { header, rows }
    }

    /// Parses a grade-book export. Blank data lines are dropped.
    pub fn parse(text: &str, layout: &RosterLayout) -> Result<Self, MergeError> {
        let mut header = Vec::new();
        let mut rows = Vec::new();

        for (index, line) in text.lines().enumerate() {
            if index < layout.header_lines {
                header.push(line.to_string());
                continue;
            }
            if line.trim().is_empty() {
                continue;
            }

            let row = parser::csv_row(line).map_err(|e| MergeError::RosterRow {
                line:   index + 1,
                reason: e.to_string(),
            })?;
            rows.push(row);
        }

        Ok(Self { header, rows })
    }

    /// Header lines.
    pub fn header(&self) -> &[String] {
        &self.header
    }

    /// Data rows.
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Renders the data rows back to CSV, every field quoted and each row
    /// ending in `\r\n`. The header is dropped.
    pub fn to_csv(&self) -> String {
        self.rows
            .iter()
            .map(|row| write_csv_row(row) + CSV_LINE_END)
            .collect()
    }

    /// Like [`Roster::to_csv`], with the header lines written first.
    pub fn to_csv_with_header(&self) -> String {
        self.header
            .iter()
            .map(|line| format!("{line}{CSV_LINE_END}"))
            .chain(std::iter::once(self.to_csv()))
            .collect()
    }

    /// Renders the roster as `layout` asks for.
    pub fn render(&self, layout: &RosterLayout) -> String {
        if layout.keep_header {
            self.to_csv_with_header()
        } else {
            self.to_csv()
        }
    }
}

/// Quotes every field, doubling embedded quotes, and joins them with commas.
pub fn write_csv_row(fields: &[String]) -> String {
    fields
        .iter()
        .map(|field| format!("\"{}\"", field.replace('"', "\"\"")))
        .join(",")
}

/// What the grade book needs to know about one merged student.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Submission {
    /// Raw points awarded, before any late penalty.
    pub awarded:      f64,
    /// Overdue bucket.
    pub overdue_days: i64,
}

impl Submission {
    /// Creates a submission summary.
    pub fn new(awarded: f64, overdue_days: i64) -> Self {
        Self {
            awarded,
            overdue_days,
        }
    }

    /// Points deducted under `policy`.
    ///
    /// The penalty is only taken off a positive total, so a zero stays zero
    /// instead of going negative.
    pub fn penalty(&self, policy: &LatePolicy) -> f64 {
        if self.awarded > 0.0 {
            policy.penalty(self.overdue_days)
        } else {
            0.0
        }
    }

    /// Final grade under `policy`.
    pub fn final_grade(&self, policy: &LatePolicy) -> f64 {
        self.awarded - self.penalty(policy)
    }
}

/// The updated roster and the ids nobody submitted for.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reconciliation {
    /// Roster with every grade column rewritten.
    pub roster:  Roster,
    /// Ids with no merged submission, in roster order.
    pub missing: Vec<String>,
}

/// Writes every student's final grade into the roster.
///
/// Ids are matched exactly as they appear in the roster. Rows with no
/// submission get `0` and are listed in [`Reconciliation::missing`].
pub fn reconcile(
    mut roster: Roster,
    submissions: &HashMap<String, Submission>,
    layout: &RosterLayout,
    policy: &LatePolicy,
) -> Result<Reconciliation, MergeError> {
    let mut missing = Vec::new();

    for (index, row) in roster.rows.iter_mut().enumerate() {
        let id = row
            .get(layout.id_column)
            .ok_or(MergeError::RosterColumn {
                row:    index,
                column: layout.id_column,
            })?
            .clone();

        let grade = match submissions.get(&id) {
            Some(submission) => format_points(submission.final_grade(policy)),
            None => {
                missing.push(id.clone());
                String::from("0")
            }
        };

        let cell = row
            .get_mut(layout.grade_column)
            .ok_or(MergeError::RosterColumn {
                row:    index,
                column: layout.grade_column,
            })?;
        debug!("{id}: {cell} -> {grade}");
        *cell = grade;
    }

    Ok(Reconciliation { roster, missing })
}
