#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! # umm-merge
//! ## Introduction
//!
//! Combines the `comments.txt` files that several graders wrote for the same
//! assignment into one feedback file per student, and fills in the grade-book
//! export with each student's total minus any late penalty.
//!
//! ## Layout
//!
//! Run it from a folder holding `grades.csv` and one folder per grader, each
//! with one `Last, First (id)` folder per student containing `comments.txt`
//! and `timestamp.txt`. Output lands in `compiled/`.

use anyhow::{Context, Result};
use bpaf::*;
use chrono::NaiveDateTime;
use dotenvy::dotenv;
use tracing::{Level, metadata::LevelFilter};
use tracing_subscriber::{fmt, prelude::*, util::SubscriberInitExt};
use umm_merge::{
    ConflictPolicy, MergeConfig,
    constants::{
        DEFAULT_GRACE_MINUTES, DEFAULT_GRADE_COLUMN, DEFAULT_HEADER_LINES, DEFAULT_ID_COLUMN,
        OUTPUT_DIR, ROSTER_FILE,
    },
    grade::{DayCounting, LatePolicy, RosterLayout},
    parse_deadline, print_report, run,
};

/// Arguments shared by every subcommand.
#[derive(Debug, Clone)]
struct MergeArgs {
    /// Assignment label
    assignment:         String,
    /// Grader folders in merge order
    graders:            Vec<String>,
    /// Submission deadline
    deadline:           NaiveDateTime,
    /// Points the assignment is out of
    full_grade:         f64,
    /// Grace period in minutes
    grace_minutes:      i64,
    /// Count whole elapsed days instead of calendar dates
    elapsed_days:       bool,
    /// Keep the first grader's score on conflicts
    first_grader_wins:  bool,
    /// Folder holding the grader folders
    root:               String,
    /// Grade-book export
    roster:             String,
    /// Output folder
    out:                String,
    /// Header lines in the grade book
    header_lines:       usize,
    /// Id column in the grade book
    id_column:          usize,
    /// Grade column in the grade book
    grade_column:       usize,
    /// Copy the grade-book header into the output
    keep_header:        bool,
}

impl MergeArgs {
    /// Turns parsed arguments into a run configuration.
    fn into_config(self) -> MergeConfig {
        let policy = LatePolicy::builder()
            .deadline(self.deadline)
            .full_grade(self.full_grade)
            .grace_minutes(self.grace_minutes)
            .day_counting(if self.elapsed_days {
                DayCounting::Elapsed
            } else {
                DayCounting::CalendarDate
            })
            .build();

        let layout = RosterLayout::builder()
            .header_lines(self.header_lines)
            .id_column(self.id_column)
            .grade_column(self.grade_column)
            .keep_header(self.keep_header)
            .build();

        MergeConfig::builder()
            .assignment(self.assignment)
            .graders(self.graders)
            .policy(policy)
            .root_dir(self.root)
            .roster_path(self.roster)
            .output_dir(self.out)
            .layout(layout)
            .conflict(if self.first_grader_wins {
                ConflictPolicy::FirstGraderWins
            } else {
                ConflictPolicy::LastGraderWins
            })
            .build()
    }
}

/// Top-level CLI commands.
#[derive(Debug, Clone)]
enum Cmd {
    /// Merge comments and write the grade book
    Merge {
        /// Run settings
        args:    MergeArgs,
        /// Skip writing output
        dry_run: bool,
        /// Log every fragment read
        verbose: bool,
    },
    /// Print the resolved configuration
    Info(MergeArgs),
}

/// Parse the command line arguments and return a `Cmd` enum
fn options() -> Cmd {
    /// parses the shared merge arguments
    fn merge_args() -> impl Parser<MergeArgs> {
        let assignment = long("assignment")
            .short('a')
            .env("UMM_MERGE_ASSIGNMENT")
            .help("Assignment name, used as the compiled comments folder")
            .argument::<String>("NAME");

        let graders = long("grader")
            .short('g')
            .help("Grader folder; repeat in merge order, the last one wins conflicts by default")
            .argument::<String>("FOLDER")
            .many()
            .parse(|graders: Vec<String>| {
                if !graders.is_empty() {
                    return Ok(graders);
                }
                std::env::var("UMM_MERGE_GRADERS")
                    .map(|list| {
                        list.split(',')
                            .map(str::trim)
                            .filter(|name| !name.is_empty())
                            .map(String::from)
                            .collect::<Vec<_>>()
                    })
                    .ok()
                    .filter(|graders| !graders.is_empty())
                    .ok_or("at least one --grader (or UMM_MERGE_GRADERS) is required")
            });

        let deadline = long("deadline")
            .short('d')
            .env("UMM_MERGE_DEADLINE")
            .help("Deadline, eg. `2019-01-24 05:00`, in the timestamps' local time")
            .argument::<String>("DATETIME")
            .parse(|value| parse_deadline(&value));

        let full_grade = long("full-grade")
            .env("UMM_MERGE_FULL_GRADE")
            .help("Points the assignment is out of")
            .argument::<f64>("POINTS");

        let grace_minutes = long("grace-minutes")
            .help("Minutes after the deadline that still count as on time")
            .argument::<i64>("MINUTES")
            .fallback(DEFAULT_GRACE_MINUTES);

        let elapsed_days = long("elapsed-days")
            .help("Count whole 24 hour periods late instead of calendar days")
            .switch();

        let first_grader_wins = long("first-grader-wins")
            .help("Keep the first grader's score when two graders mark the same question")
            .switch();

        let root = long("root")
            .help("Folder holding the grader folders and the grade book")
            .argument::<String>("DIR")
            .fallback(".".to_string());

        let roster = long("roster")
            .help("Grade-book export, relative to --root")
            .argument::<String>("FILE")
            .fallback(ROSTER_FILE.to_string());

        let out = long("out")
            .help("Output folder, relative to --root")
            .argument::<String>("DIR")
            .fallback(OUTPUT_DIR.to_string());

        let header_lines = long("header-lines")
            .help("Lines before the first grade-book row")
            .argument::<usize>("N")
            .fallback(DEFAULT_HEADER_LINES);

        let id_column = long("id-column")
            .help("Grade-book column holding the student id")
            .argument::<usize>("N")
            .fallback(DEFAULT_ID_COLUMN);

        let grade_column = long("grade-column")
            .help("Grade-book column holding the grade")
            .argument::<usize>("N")
            .fallback(DEFAULT_GRADE_COLUMN);

        let keep_header = long("keep-header")
            .help("Copy the grade-book header lines into the output")
            .switch();

        construct!(MergeArgs {
            assignment,
            graders,
            deadline,
            full_grade,
            grace_minutes,
            elapsed_days,
            first_grader_wins,
            root,
            roster,
            out,
            header_lines,
            id_column,
            grade_column,
            keep_header,
        })
    }

    let dry_run = long("dry-run")
        .help("Print the summary without writing anything")
        .switch();
    let verbose = short('v')
        .long("verbose")
        .help("Log every fragment read")
        .switch();
    let args = merge_args();

    let merge = construct!(Cmd::Merge {
        args,
        dry_run,
        verbose
    })
    .to_options()
    .command("merge")
    .help("Merge grader comments and fill in the grade book");

    let info = construct!(Cmd::Info(merge_args()))
        .to_options()
        .command("info")
        .help("Prints a JSON description of the run configuration");

    let cmd = construct!([merge, info]);

    cmd.to_options()
        .descr("Merges grader comments into per-student feedback and a grade book")
        .run()
}

fn main() -> Result<()> {
    dotenv().ok();

    let cmd = options();
    let level = match &cmd {
        Cmd::Merge { verbose: true, .. } => Level::DEBUG,
        _ => Level::INFO,
    };

    let fmt = fmt::layer()
        .without_time()
        .with_file(false)
        .with_line_number(false);
    let filter_layer = LevelFilter::from_level(level);
    tracing_subscriber::registry()
        .with(fmt)
        .with(filter_layer)
        .init();

    match cmd {
        Cmd::Merge {
            args,
            dry_run,
            verbose: _,
        } => {
            let config = args.into_config();
            let report = run(&config, dry_run)
                .with_context(|| format!("Failed to merge `{}`", config.assignment()))?;
            print_report(&config, &report);
        }
        Cmd::Info(args) => {
            let config = args.into_config();
            config.validate()?;
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
    };

    Ok(())
}
