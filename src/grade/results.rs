#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::fmt::Display;

use bon::Builder;
use serde::{Deserialize, Serialize};
use tabled::Tabled;

/// Formats points the way grade books expect them, always with a decimal
/// part (`10.0`, `7.5`).
pub fn format_points(points: f64) -> String {
    format!("{points:?}")
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Builder, Serialize, Deserialize)]
/// A struct representing a grade
pub struct Grade {
    /// The actual grade received
    #[builder(getter)]
    pub grade:  f64,
    /// The maximum grade possible
    #[builder(getter)]
    pub out_of: f64,
}

impl Grade {
    /// Creates a new grade -
    /// * `grade` - The actual grade received
    /// * `out_of` - The maximum grade possible
    pub fn new(grade: f64, out_of: f64) -> Self {
        Self { grade, out_of }
    }
}

impl std::ops::Add for Grade {
    type Output = Grade;

    fn add(self, rhs: Grade) -> Grade {
        Grade::new(self.grade + rhs.grade, self.out_of + rhs.out_of)
    }
}

impl std::iter::Sum for Grade {
    fn sum<I: Iterator<Item = Grade>>(iter: I) -> Grade {
        iter.fold(Grade::default(), |acc, g| acc + g)
    }
}

impl Display for Grade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", format_points(self.grade), format_points(self.out_of))
    }
}

#[derive(Tabled, Debug, Clone, Builder, Serialize, Deserialize)]
#[builder(on(String, into))]
/// One line of the end-of-run table, per merged student
pub struct StudentSummary {
    #[tabled(rename = "ID")]
    /// * `external_id`: roster key of the student
    #[builder(getter)]
    pub(crate) external_id: String,
    #[tabled(rename = "Student")]
    /// * `name`: `Last, First`
    #[builder(getter)]
    pub(crate) name:        String,
    #[tabled(rename = "Graders")]
    /// * `fragments`: number of grader fragments merged
    #[builder(getter)]
    pub(crate) fragments:   usize,
    #[tabled(rename = "Grade")]
    /// * `grade`: raw total before any late penalty
    #[builder(default)]
    #[builder(getter)]
    pub(crate) grade:       Grade,
    #[tabled(rename = "Days Late")]
    /// * `overdue_days`: penalty bucket, -1 when on time
    #[builder(getter)]
    pub(crate) overdue_days: i64,
    #[tabled(rename = "Penalty")]
    /// * `penalty`: points deducted in the grade book
    #[builder(getter)]
    pub(crate) penalty:     f64,
}
