#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

/// File inside each grader's student folder holding the comment lines
pub const COMMENTS_FILE: &str = "comments.txt";

/// File beside the comments holding the `YYYYMMDDHHMMSSmmm` submission time
pub const TIMESTAMP_FILE: &str = "timestamp.txt";

/// Grade-book export read from the working directory
pub const ROSTER_FILE: &str = "grades.csv";

/// Directory compiled comments and the updated grade book are written to
pub const OUTPUT_DIR: &str = "compiled";

/// Lines before the first data row of a grade-book export
pub const DEFAULT_HEADER_LINES: usize = 3;

/// Grade-book column holding the student id
pub const DEFAULT_ID_COLUMN: usize = 0;

/// Grade-book column holding the grade
pub const DEFAULT_GRADE_COLUMN: usize = 4;

/// Line ending of rows in the rewritten grade book
pub const CSV_LINE_END: &str = "\r\n";

/// Minutes after the deadline that still count as on time
pub const DEFAULT_GRACE_MINUTES: i64 = 5;

/// Accepted formats for a deadline given on the command line
pub const DEADLINE_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
];
