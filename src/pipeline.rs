#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::{
    collections::HashMap,
    fs,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use colored::Colorize;
use glob::{Pattern, glob};
use serde::Serialize;
use tabled::{
    Table,
    settings::{Alignment, Modify, Panel, Style, object::Rows},
};
use tracing::{debug, info, warn};

use crate::{
    config::MergeConfig,
    constants::ROSTER_FILE,
    grade::{
        AnswerSheet, ON_TIME, Reconciliation, Roster, StudentRecord, StudentSummary, Submission,
        extract_answers, parse_identity, read_submission_time, reconcile, results::format_points,
    },
};

/// Everything a run produced, for printing or inspection.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    /// One row per merged student, in discovery order.
    pub students: Vec<StudentSummary>,
    /// Roster ids with no submission, in roster order.
    pub missing:  Vec<String>,
}

/// Lists student folder names under the first grader's directory, sorted.
pub fn discover_students(config: &MergeConfig) -> Result<Vec<String>> {
    let first = config
        .graders()
        .first()
        .context("At least one grader folder is required")?;
    let grader_dir = config.root_dir().join(first);
    if !grader_dir.is_dir() {
        bail!("Grader folder {} does not exist", grader_dir.display());
    }

    let pattern = format!("{}/*", Pattern::escape(&grader_dir.display().to_string()));
    Ok(glob(&pattern)
        .context("Could not create glob")?
        .filter_map(Result::ok)
        .filter(|path| path.is_dir())
        .filter_map(|path| path.file_name().map(|name| name.to_string_lossy().to_string()))
        .collect())
}

/// Reads one comments file into an answer sheet.
pub fn read_fragment(path: &Path) -> Result<AnswerSheet> {
    let file = fs::File::open(path).with_context(|| format!("Could not open {}", path.display()))?;
    extract_answers(BufReader::new(file)).with_context(|| format!("In {}", path.display()))
}

/// Reads one timestamp file and returns its overdue bucket.
pub fn read_overdue_days(config: &MergeConfig, path: &Path) -> Result<i64> {
    let file = fs::File::open(path).with_context(|| format!("Could not open {}", path.display()))?;
    let submitted_at =
        read_submission_time(BufReader::new(file)).with_context(|| format!("In {}", path.display()))?;
    Ok(config.policy().overdue_days(submitted_at))
}

/// Merges every grader's fragment for one student folder.
///
/// Returns `None` when the folder name is not a student identity or no
/// grader has a comments file for it.
pub fn collect_student(config: &MergeConfig, folder: &str) -> Result<Option<StudentRecord>> {
    let Some(identity) = parse_identity(folder) else {
        warn!("Skipping `{folder}`, not a `Last, First (id)` folder");
        return Ok(None);
    };

    let mut fragments = Vec::new();
    let mut overdue_days = ON_TIME;

    for grader in config.graders() {
        let student_dir = config.root_dir().join(grader).join(folder);
        let comments = student_dir.join(config.comments_file());
        if !comments.is_file() {
            debug!("{grader} has no comments for {folder}");
            continue;
        }

        fragments.push(read_fragment(&comments)?);
        overdue_days = read_overdue_days(config, &student_dir.join(config.timestamp_file()))?;
        debug!("Read {grader}'s fragment for {folder}");
    }

    if fragments.is_empty() {
        warn!("No grader has comments for `{folder}`");
        return Ok(None);
    }

    Ok(StudentRecord::merge_with(
        Some(identity),
        fragments,
        overdue_days,
        &config.conflict(),
    ))
}

/// Merges every discovered student, in discovery order.
pub fn collect_students(config: &MergeConfig) -> Result<Vec<StudentRecord>> {
    let mut records = Vec::new();
    for folder in discover_students(config)? {
        if let Some(record) = collect_student(config, &folder)? {
            info!(
                "{}: {} days overdue",
                record.identity().external_id(),
                record.overdue_days()
            );
            records.push(record);
        }
    }
    Ok(records)
}

/// Text written to a student's compiled comments file.
pub fn compiled_comments(config: &MergeConfig, record: &StudentRecord) -> String {
    let mut text = record.comment_block().to_string();
    if record.overdue_days() > 0 {
        let penalty = match config.policy().penalty(record.overdue_days()) {
            points if points > 0.0 => format_points(points),
            _ => String::from("0"),
        };
        text.push_str(&format!("Late penalty: {penalty}"));
    }
    text
}

/// Path of a student's compiled comments file.
pub fn comments_path(config: &MergeConfig, record: &StudentRecord) -> PathBuf {
    config
        .output_dir()
        .join(config.assignment())
        .join(record.identity().folder_name())
        .join(config.comments_file())
}

/// Writes a student's compiled comments, creating folders as needed.
pub fn write_comments(config: &MergeConfig, record: &StudentRecord) -> Result<PathBuf> {
    let path = comments_path(config, record);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Could not create {}", parent.display()))?;
    }
    fs::write(&path, compiled_comments(config, record))
        .with_context(|| format!("Could not write {}", path.display()))?;
    Ok(path)
}

/// Reads the grade book and writes every merged total into it.
pub fn reconcile_roster(config: &MergeConfig, records: &[StudentRecord]) -> Result<Reconciliation> {
    let path = config.roster_path();
    let text =
        fs::read_to_string(&path).with_context(|| format!("Could not read {}", path.display()))?;
    let roster = Roster::parse(&text, config.layout())
        .with_context(|| format!("In {}", path.display()))?;

    let mut submissions = HashMap::new();
    for record in records {
        let id = record.identity().external_id().to_string();
        let submission = Submission::new(record.total_awarded(), record.overdue_days());
        if submissions.insert(id.clone(), submission).is_some() {
            warn!("More than one folder belongs to {id}, keeping the last");
        }
    }

    Ok(reconcile(roster, &submissions, config.layout(), config.policy())?)
}

/// Runs the whole merge. With `dry_run` nothing is written to disk.
pub fn run(config: &MergeConfig, dry_run: bool) -> Result<RunReport> {
    config.validate()?;

    let records = collect_students(config)?;
    let reconciliation = reconcile_roster(config, &records)?;

    if !dry_run {
        for record in &records {
            let path = write_comments(config, record)?;
            debug!("Wrote {}", path.display());
        }

        let out = config.output_dir().join(ROSTER_FILE);
        if let Some(parent) = out.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Could not create {}", parent.display()))?;
        }
        fs::write(&out, reconciliation.roster.render(config.layout()))
            .with_context(|| format!("Could not write {}", out.display()))?;
        info!("Wrote {}", out.display());
    }

    let students = records
        .iter()
        .map(|record| {
            let penalty = Submission::new(record.total_awarded(), record.overdue_days())
                .penalty(config.policy());
            record.summary(penalty)
        })
        .collect();

    Ok(RunReport {
        students,
        missing: reconciliation.missing,
    })
}

/// Renders the end-of-run summary.
pub fn render_report(config: &MergeConfig, report: &RunReport) -> String {
    let mut out = Table::new(&report.students)
        .with(Panel::header(format!("{} ({} students)", config.assignment(), report.students.len())))
        .with(
            Modify::new(Rows::first())
                .with(Alignment::center())
                .with(Alignment::center_vertical()),
        )
        .with(Style::modern())
        .to_string();

    out.push('\n');
    out.push_str(&format!(
        "Found no submission for {} students:\n",
        report.missing.len()
    ));
    for id in &report.missing {
        out.push_str(&format!("    {id}\n"));
    }
    out
}

/// Prints the end-of-run summary, highlighting missing submissions.
pub fn print_report(config: &MergeConfig, report: &RunReport) {
    let rendered = render_report(config, report);
    if report.missing.is_empty() {
        println!("{rendered}");
    } else {
        println!("{}", rendered.as_str().yellow());
    }
}
