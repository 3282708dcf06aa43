use chrono::NaiveDate;
use umm_merge::{MergeConfig, grade::LatePolicy, parse_deadline};

fn deadline() -> chrono::NaiveDateTime {
    NaiveDate::from_ymd_opt(2019, 1, 24)
        .and_then(|d| d.and_hms_opt(5, 0, 0))
        .expect("valid deadline")
}

#[test]
fn deadline_formats() {
    assert_eq!(parse_deadline("2019-01-24 05:00").expect("space, minutes"), deadline());
    assert_eq!(parse_deadline("2019-01-24T05:00:00").expect("T, seconds"), deadline());
    assert!(parse_deadline("24/01/19 5:00").is_err());
}

#[test]
fn defaults_and_resolved_paths() {
    let config = MergeConfig::builder()
        .assignment("Assignment 1")
        .graders(vec!["Alice".to_string()])
        .policy(LatePolicy::new(deadline(), 90.0))
        .root_dir("/tmp/course")
        .build();

    assert_eq!(config.roster_path(), std::path::Path::new("/tmp/course/grades.csv"));
    assert_eq!(config.output_dir(), std::path::Path::new("/tmp/course/compiled"));
    assert_eq!(config.layout().header_lines, 3);
    assert_eq!(config.layout().grade_column, 4);
    assert!(!config.layout().keep_header);
    assert_eq!(config.comments_file(), "comments.txt");
    assert!(config.validate().is_ok());

    let snapshot = serde_json::to_value(&config).expect("serialize config");
    assert_eq!(snapshot["conflict"], "last_grader_wins");
    assert_eq!(snapshot["policy"]["grace_minutes"], 5);
    assert_eq!(snapshot["policy"]["day_counting"], "calendar_date");
}

#[test]
fn validation_rejects_unusable_settings() {
    let no_graders = MergeConfig::builder()
        .assignment("A1")
        .graders(vec![])
        .policy(LatePolicy::new(deadline(), 90.0))
        .build();
    assert!(no_graders.validate().is_err());

    let zero_grade = MergeConfig::builder()
        .assignment("A1")
        .graders(vec!["Alice".to_string()])
        .policy(LatePolicy::new(deadline(), 0.0))
        .build();
    assert!(zero_grade.validate().is_err());
}
