#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use thiserror::Error;

/// Fatal conditions that abort a merge run.
///
/// Recoverable conditions (a folder name without an identity, a grader with no
/// fragment for a student, a roster id without a submission) are not
/// represented here; they are handled where they occur and summarised in the
/// final report.
#[derive(Error, Debug)]
pub enum MergeError {
    /// A non-blank comment line did not match the answer grammar.
    #[error("Could not parse answer line `{line}`: {reason}")]
    AnswerLine {
        /// The offending line, trimmed.
        line:   String,
        /// What the grammar expected instead.
        reason: String,
    },
    /// An answer line parsed, but claims a question worth zero points or less.
    #[error("Answer line `{line}` has a non-positive point value")]
    NonPositivePossible {
        /// The offending line, trimmed.
        line: String,
    },
    /// A timestamp file did not contain a `YYYYMMDDHHMMSSmmm` timestamp.
    #[error("Could not parse submission timestamp `{value}`")]
    Timestamp {
        /// The raw timestamp text.
        value: String,
    },
    /// A roster line could not be split into fields.
    #[error("Could not parse roster line {line}: {reason}")]
    RosterRow {
        /// 1-based line number within the roster file.
        line:   usize,
        /// What the grammar expected instead.
        reason: String,
    },
    /// A roster row is too short to hold the id or grade column.
    #[error("Roster row {row} has no column {column}")]
    RosterColumn {
        /// 0-based data row index.
        row:    usize,
        /// 0-based column index that was missing.
        column: usize,
    },
    /// Reading a comment or timestamp stream failed.
    #[error("Could not read grader fragment")]
    Read(#[from] std::io::Error),
}
