use std::collections::HashMap;

use chrono::NaiveDate;
use umm_merge::{
    MergeError,
    grade::{LatePolicy, Roster, RosterLayout, Submission, reconcile, write_csv_row},
};

const ROSTER: &str = "Assignment 1\n\
Due 2019-01-24\n\
\"ID\",\"Last\",\"First\",\"Email\",\"Grade\"\n\
W0001,Doe,Jane,jdoe@example.com,0\n\
\"W0099\",\"Smith, Jr.\",\"Bob\",\"bob@example.com\",\"\"\n\
W0002,Roe,Rick,rroe@example.com,\n\
\n";

fn policy() -> LatePolicy {
    let deadline = NaiveDate::from_ymd_opt(2019, 1, 24)
        .and_then(|d| d.and_hms_opt(5, 0, 0))
        .expect("valid deadline");
    LatePolicy::new(deadline, 90.0)
}

fn submissions() -> HashMap<String, Submission> {
    HashMap::from([
        ("W0001".to_string(), Submission::new(80.0, 3)),
        ("W0002".to_string(), Submission::new(0.0, 4)),
    ])
}

#[test]
fn parses_header_and_quoted_rows() {
    let roster = Roster::parse(ROSTER, &RosterLayout::default()).expect("parse roster");
    assert_eq!(roster.header().len(), 3);
    assert_eq!(roster.rows().len(), 3);
    assert_eq!(roster.rows()[1][1], "Smith, Jr.");
    assert_eq!(roster.rows()[2][4], "");
}

#[test]
fn late_total_is_penalised() {
    let roster = Roster::parse(ROSTER, &RosterLayout::default()).expect("parse roster");
    let result = reconcile(roster, &submissions(), &RosterLayout::default(), &policy())
        .expect("reconcile");

    assert_eq!(result.roster.rows()[0][4], "72.8");
}

#[test]
fn zero_total_is_not_penalised() {
    let roster = Roster::parse(ROSTER, &RosterLayout::default()).expect("parse roster");
    let result = reconcile(roster, &submissions(), &RosterLayout::default(), &policy())
        .expect("reconcile");

    assert_eq!(result.roster.rows()[2][4], "0.0");
    assert_eq!(Submission::new(0.0, 4).penalty(&policy()), 0.0);
}

#[test]
fn missing_ids_get_zero_and_are_reported() {
    let roster = Roster::parse(ROSTER, &RosterLayout::default()).expect("parse roster");
    let result = reconcile(roster, &submissions(), &RosterLayout::default(), &policy())
        .expect("reconcile");

    assert_eq!(result.roster.rows()[1][4], "0");
    assert_eq!(result.missing, ["W0099"]);
}

#[test]
fn ids_are_matched_verbatim() {
    let row = ["w0001", "", "", "", ""].map(String::from).to_vec();
    let roster = Roster::new(vec![], vec![row]);
    let result = reconcile(roster, &submissions(), &RosterLayout::default(), &policy())
        .expect("reconcile");
    assert_eq!(result.missing, ["w0001"]);
}

#[test]
fn short_rows_are_errors() {
    let roster = Roster::new(vec![], vec![vec!["W0001".into(), "Doe".into()]]);
    let err = reconcile(roster, &submissions(), &RosterLayout::default(), &policy())
        .expect_err("grade column missing");
    assert!(matches!(err, MergeError::RosterColumn { row: 0, column: 4 }));
}

#[test]
fn output_drops_header_and_quotes_fields() {
    let roster = Roster::parse(ROSTER, &RosterLayout::default()).expect("parse roster");
    let result = reconcile(roster, &submissions(), &RosterLayout::default(), &policy())
        .expect("reconcile");
    let csv = result.roster.to_csv();
    let lines: Vec<&str> = csv.lines().collect();

    assert_eq!(lines[0], "\"W0001\",\"Doe\",\"Jane\",\"jdoe@example.com\",\"72.8\"");
    assert_eq!(lines[1], "\"W0099\",\"Smith, Jr.\",\"Bob\",\"bob@example.com\",\"0\"");
    assert_eq!(lines.len(), 3);
}

#[test]
fn rows_end_in_crlf() {
    let roster = Roster::new(vec![], vec![vec!["W0001".into()], vec!["W0002".into()]]);
    assert_eq!(roster.to_csv(), "\"W0001\"\r\n\"W0002\"\r\n");
}

#[test]
fn header_is_written_only_when_asked() {
    let roster = Roster::parse(ROSTER, &RosterLayout::default()).expect("parse roster");

    let dropped = roster.render(&RosterLayout::default());
    assert!(dropped.starts_with("\"W0001\""), "{dropped}");

    let layout = RosterLayout::builder().keep_header(true).build();
    let kept = roster.render(&layout);
    assert!(kept.starts_with("Assignment 1\r\nDue 2019-01-24\r\n"), "{kept}");
    assert_eq!(kept.lines().nth(3), Some("\"W0001\",\"Doe\",\"Jane\",\"jdoe@example.com\",\"0\""));
}

#[test]
fn embedded_quotes_are_doubled() {
    let row = vec!["say \"hi\"".to_string(), "plain".to_string()];
    assert_eq!(write_csv_row(&row), "\"say \"\"hi\"\"\",\"plain\"");
}

#[test]
fn custom_layout_moves_columns() {
    let layout = RosterLayout::builder()
        .header_lines(0)
        .id_column(1)
        .grade_column(0)
        .build();
    let roster = Roster::parse(",W0001\n", &layout).expect("parse roster");
    let result = reconcile(roster, &submissions(), &layout, &policy()).expect("reconcile");
    assert_eq!(result.roster.rows()[0][0], "72.8");
}
