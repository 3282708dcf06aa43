#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

/// Per-question scores parsed from grader comment files.
pub mod answers;
/// Student identities parsed from submission folder names.
pub mod identity;
/// Late submission buckets and the penalty schedule.
pub mod lateness;
/// Combining grader fragments into one record per student.
pub mod merge;
/// Shared grade and summary row types.
pub mod results;
/// Folding merged totals back into the grade book.
pub mod roster;

pub use answers::{AnswerSheet, QuestionKey, ScoreRecord, extract_answers, parse_answer_line};
pub use identity::{Identity, parse_identity};
pub use lateness::{
    DayCounting, LatePolicy, ON_TIME, parse_timestamp, penalty, read_submission_time,
};
pub use merge::{
    MergeStrategy, StudentRecord, keep_first, merge_answers, overwrite, render_comments, totalize,
};
pub use results::{Grade, StudentSummary};
pub use roster::{Reconciliation, Roster, RosterLayout, Submission, reconcile, write_csv_row};
