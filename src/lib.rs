//! # umm-merge
//!
//! Merges the comment files written by several graders, each marking a part of
//! the same class, into one feedback file per student, and writes the totals,
//! less any late penalty, into a grade-book export.

#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

/// Settings for a merge run
pub mod config;
/// A module defining a bunch of constant values to be used throughout
pub mod constants;
/// Fatal errors raised while merging
pub mod error;
/// For all things related to grading: identities, answers, lateness,
/// merging and the grade book
pub mod grade;
/// For all parsers used
pub mod parsers;
/// Reading grader folders and writing compiled output
pub mod pipeline;

pub use config::{ConflictPolicy, MergeConfig, parse_deadline};
pub use error::MergeError;
pub use pipeline::{RunReport, print_report, run};
