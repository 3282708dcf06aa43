#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! Settings for one merge run.

use std::path::{Path, PathBuf};

use anyhow::{Result, bail};
use bon::Builder;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::{
    constants::{COMMENTS_FILE, DEADLINE_FORMATS, OUTPUT_DIR, ROSTER_FILE, TIMESTAMP_FILE},
    grade::{LatePolicy, MergeStrategy, QuestionKey, RosterLayout, ScoreRecord, keep_first, overwrite},
};

/// Which grader's score is kept when two graders score the same question.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictPolicy {
    /// The grader listed last wins.
    #[default]
    LastGraderWins,
    /// The grader listed first wins.
    FirstGraderWins,
}

impl MergeStrategy for ConflictPolicy {
    fn resolve(
        &self,
        key: &QuestionKey,
        existing: ScoreRecord,
        incoming: ScoreRecord,
    ) -> ScoreRecord {
        match self {
            ConflictPolicy::LastGraderWins => overwrite(key, existing, incoming),
            ConflictPolicy::FirstGraderWins => keep_first(key, existing, incoming),
        }
    }
}

/// Everything a merge run needs that cannot be derived from its input.
#[derive(Debug, Clone, Builder, Serialize)]
#[builder(on(String, into), on(PathBuf, into))]
pub struct MergeConfig {
    /// Assignment label, used as the compiled comments folder name.
    assignment:     String,
    /// Grader folders, in merge order.
    graders:        Vec<String>,
    /// Deadline and penalty schedule.
    policy:         LatePolicy,
    /// Directory holding the grader folders and the grade-book export.
    #[builder(default = PathBuf::from("."))]
    root_dir:       PathBuf,
    /// Grade-book export to reconcile into.
    #[builder(default = PathBuf::from(ROSTER_FILE))]
    roster_path:    PathBuf,
    /// Where compiled comments and the updated grade book go.
    #[builder(default = PathBuf::from(OUTPUT_DIR))]
    output_dir:     PathBuf,
    /// Grade-book layout.
    #[builder(default)]
    layout:         RosterLayout,
    /// How conflicting scores are resolved.
    #[builder(default)]
    conflict:       ConflictPolicy,
    /// Name of the comments file in each student folder.
    #[builder(default = COMMENTS_FILE.to_string())]
    comments_file:  String,
    /// Name of the timestamp file in each student folder.
    #[builder(default = TIMESTAMP_FILE.to_string())]
    timestamp_file: String,
}

impl MergeConfig {
    /// Assignment label.
    pub fn assignment(&self) -> &str {
        &self.assignment
    }

    /// Grader folders, in merge order.
    pub fn graders(&self) -> &[String] {
        &self.graders
    }

    /// Deadline and penalty schedule.
    pub fn policy(&self) -> &LatePolicy {
        &self.policy
    }

    /// Directory holding the grader folders.
    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    /// Grade-book export, resolved against the root directory.
    pub fn roster_path(&self) -> PathBuf {
        self.root_dir.join(&self.roster_path)
    }

    /// Output directory, resolved against the root directory.
    pub fn output_dir(&self) -> PathBuf {
        self.root_dir.join(&self.output_dir)
    }

    /// Grade-book layout.
    pub fn layout(&self) -> &RosterLayout {
        &self.layout
    }

    /// Conflict resolution policy.
    pub fn conflict(&self) -> ConflictPolicy {
        self.conflict
    }

    /// Comments file name.
    pub fn comments_file(&self) -> &str {
        &self.comments_file
    }

    /// Timestamp file name.
    pub fn timestamp_file(&self) -> &str {
        &self.timestamp_file
    }

    /// Checks the settings that would otherwise fail halfway through a run.
    pub fn validate(&self) -> Result<()> {
        if self.graders.is_empty() {
            bail!("At least one grader folder is required");
        }
        if self.policy.full_grade() <= 0.0 {
            bail!("Full grade must be positive, got {}", self.policy.full_grade());
        }
        if self.layout.id_column == self.layout.grade_column {
            bail!("The id and grade columns of the grade book must differ");
        }
        Ok(())
    }
}

/// Parses a deadline such as `2019-01-24 05:00`.
pub fn parse_deadline(value: &str) -> Result<NaiveDateTime> {
    let value = value.trim();
    DEADLINE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .ok_or_else(|| {
            anyhow::anyhow!(
                "Could not parse deadline `{value}`, expected one of {}",
                DEADLINE_FORMATS.join(", ")
            )
        })
}
