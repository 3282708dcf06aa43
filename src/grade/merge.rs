#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use serde::Serialize;

use super::{
    answers::{AnswerSheet, QuestionKey, ScoreRecord},
    identity::Identity,
    results::{Grade, StudentSummary},
};

/// Decides which score survives when two fragments grade the same question.
///
/// Fragments are folded in grader order, so `existing` always comes from an
/// earlier grader than `incoming`.
pub trait MergeStrategy {
    /// Returns the record to keep for `key`.
    fn resolve(&self, key: &QuestionKey, existing: ScoreRecord, incoming: ScoreRecord)
    -> ScoreRecord;
}

impl<F> MergeStrategy for F
where
    F: Fn(&QuestionKey, ScoreRecord, ScoreRecord) -> ScoreRecord,
{
    fn resolve(
        &self,
        key: &QuestionKey,
        existing: ScoreRecord,
        incoming: ScoreRecord,
    ) -> ScoreRecord {
        self(key, existing, incoming)
    }
}

/// The later grader wins.
pub fn overwrite(_key: &QuestionKey, _existing: ScoreRecord, incoming: ScoreRecord) -> ScoreRecord {
    incoming
}

/// The earlier grader wins.
pub fn keep_first(_key: &QuestionKey, existing: ScoreRecord, _incoming: ScoreRecord) -> ScoreRecord {
    existing
}

/// Folds fragments, in order, into one answer sheet.
pub fn merge_answers<I>(fragments: I, strategy: &impl MergeStrategy) -> AnswerSheet
where
    I: IntoIterator<Item = AnswerSheet>,
{
    let mut merged = AnswerSheet::new();

    for fragment in fragments {
        for (key, incoming) in fragment {
            let resolved = match merged.remove(&key) {
                Some(existing) => strategy.resolve(&key, existing, incoming),
                None => incoming,
            };
            merged.insert(key, resolved);
        }
    }

    merged
}

/// One line per question, in key order: `<key> - <awarded>/<possible> <comment>`.
pub fn render_comments(answers: &AnswerSheet) -> String {
    answers
        .iter()
        .map(|(key, record)| format!("{key} - {record}\n"))
        .collect()
}

/// Sums awarded and possible points independently.
pub fn totalize(answers: &AnswerSheet) -> Grade {
    answers.values().map(|record| record.grade).sum()
}

/// Everything known about one student after all graders are merged.
#[derive(Debug, Clone, Serialize)]
pub struct StudentRecord {
    /// Who the record belongs to.
    identity:      Identity,
    /// Merged answers, keyed and ordered by question.
    answers:       AnswerSheet,
    /// Number of grader fragments that contributed.
    fragments:     usize,
    /// Overdue bucket, [`super::ON_TIME`] when on time.
    overdue_days:  i64,
    /// Raw totals before any penalty.
    total:         Grade,
    /// Rendered feedback for the student.
    comment_block: String,
}

impl StudentRecord {
    /// Merges fragments with [`overwrite`], so the last grader in order wins.
    ///
    /// Returns `None` when there is no identity; no record is made up for an
    /// unparseable folder.
    pub fn merge<I>(identity: Option<Identity>, fragments: I, overdue_days: i64) -> Option<Self>
    where
        I: IntoIterator<Item = AnswerSheet>,
    {
        Self::merge_with(identity, fragments, overdue_days, &overwrite)
    }

    /// Merges fragments, resolving conflicting questions with `strategy`.
    pub fn merge_with<I>(
        identity: Option<Identity>,
        fragments: I,
        overdue_days: i64,
        strategy: &impl MergeStrategy,
    ) -> Option<Self>
    where
        I: IntoIterator<Item = AnswerSheet>,
    {
        let identity = identity?;
        let fragments: Vec<AnswerSheet> = fragments.into_iter().collect();
        let count = fragments.len();
        let answers = merge_answers(fragments, strategy);
        let total = totalize(&answers);
        let comment_block = render_comments(&answers);

        Some(Self {
            identity,
            answers,
            fragments: count,
            overdue_days,
            total,
            comment_block,
        })
    }

    /// Who the record belongs to.
    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    /// Merged answers.
    pub fn answers(&self) -> &AnswerSheet {
        &self.answers
    }

    /// Number of fragments merged.
    pub fn fragments(&self) -> usize {
        self.fragments
    }

    /// Overdue bucket.
    pub fn overdue_days(&self) -> i64 {
        self.overdue_days
    }

    /// Raw totals.
    pub fn total(&self) -> Grade {
        self.total
    }

    /// Total points awarded.
    pub fn total_awarded(&self) -> f64 {
        self.total.grade
    }

    /// Total points possible.
    pub fn total_possible(&self) -> f64 {
        self.total.out_of
    }

    /// Rendered comment block.
    pub fn comment_block(&self) -> &str {
        &self.comment_block
    }

    /// A table row for the end-of-run summary.
    pub fn summary(&self, penalty: f64) -> StudentSummary {
        StudentSummary::builder()
            .external_id(self.identity.external_id())
            .name(format!(
                "{}, {}",
                self.identity.last_name(),
                self.identity.first_name()
            ))
            .fragments(self.fragments)
            .grade(self.total)
            .overdue_days(self.overdue_days)
            .penalty(penalty)
            .build()
    }
}
