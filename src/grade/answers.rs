#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::{collections::BTreeMap, fmt::Display, io::BufRead};

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::results::{Grade, format_points};
use crate::{error::MergeError, parsers::parser};

/// Identifies a graded question, eg. `3` or `3a`.
///
/// Keys order by question number first, then by subpart, with a bare number
/// sorting before any of its lettered subparts (`3` < `3a` < `3b` < `4`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct QuestionKey {
    /// Question number.
    pub number:  u32,
    /// Optional subpart letter, as written by the grader.
    pub subpart: Option<char>,
}

impl QuestionKey {
    /// Creates a key.
    pub fn new(number: u32, subpart: Option<char>) -> Self {
        Self { number, subpart }
    }
}

impl Display for QuestionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.subpart {
            Some(letter) => write!(f, "{}{}", self.number, letter),
            None => write!(f, "{}", self.number),
        }
    }
}

impl Serialize for QuestionKey {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Points and feedback for one question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreRecord {
    /// Awarded and possible points.
    pub grade:   Grade,
    /// Everything after the score on the grader's line, leading space included.
    pub comment: String,
}

impl ScoreRecord {
    /// Creates a record.
    pub fn new(awarded: f64, possible: f64, comment: impl Into<String>) -> Self {
        Self {
            grade:   Grade::new(awarded, possible),
            comment: comment.into(),
        }
    }

    /// Points awarded.
    pub fn awarded(&self) -> f64 {
        self.grade.grade
    }

    /// Points possible.
    pub fn possible(&self) -> f64 {
        self.grade.out_of
    }
}

impl Display for ScoreRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}/{} {}",
            format_points(self.awarded()),
            format_points(self.possible()),
            self.comment
        )
    }
}

/// All answers from one fragment, or from a merged student record.
pub type AnswerSheet = BTreeMap<QuestionKey, ScoreRecord>;

/// Parses one non-blank comment line such as `Q3(a): 7.5/10 nice work`.
///
/// The line is trimmed first. A line that does not match the grammar, or that
/// gives a question zero possible points, is an error.
pub fn parse_answer_line(line: &str) -> Result<(QuestionKey, ScoreRecord), MergeError> {
    let line = line.trim();
    let (key, record) = parser::answer_line(line).map_err(|e| MergeError::AnswerLine {
        line:   line.to_string(),
        reason: e.to_string(),
    })?;

    if record.possible() <= 0.0 {
        return Err(MergeError::NonPositivePossible {
            line: line.to_string(),
        });
    }

    Ok((key, record))
}

/// Reads a whole comment fragment, skipping blank lines.
pub fn extract_answers(reader: impl BufRead) -> Result<AnswerSheet, MergeError> {
    let mut sheet = AnswerSheet::new();

    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let (key, record) = parse_answer_line(&line)?;
        if sheet.insert(key, record).is_some() {
            warn!("Question {key} appears more than once in one fragment, keeping the last");
        }
    }

    Ok(sheet)
}
