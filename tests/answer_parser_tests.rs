use std::io::Cursor;

use umm_merge::{
    MergeError,
    grade::{QuestionKey, extract_answers, parse_answer_line},
};

#[test]
fn parses_question_with_subpart() {
    let (key, record) = parse_answer_line("Q3(a): 7.5/10 nice work").expect("parse answer");
    assert_eq!(key, QuestionKey::new(3, Some('a')));
    assert_eq!(record.awarded(), 7.5);
    assert_eq!(record.possible(), 10.0);
    assert_eq!(record.comment, " nice work");
}

#[test]
fn prefix_subpart_and_spacing_are_optional() {
    let (key, record) = parse_answer_line("12:3/4").expect("parse bare answer");
    assert_eq!(key, QuestionKey::new(12, None));
    assert_eq!(record.awarded(), 3.0);
    assert_eq!(record.possible(), 4.0);
    assert_eq!(record.comment, "");

    let (key, _) = parse_answer_line("q2b : 1 / 2").expect("parse unparenthesised subpart");
    assert_eq!(key, QuestionKey::new(2, Some('b')));
}

#[test]
fn surrounding_whitespace_is_trimmed() {
    let (_, record) = parse_answer_line("  Q1: 2/2 good   \n").expect("parse padded answer");
    assert_eq!(record.comment, " good");
}

#[test]
fn malformed_lines_are_errors() {
    for line in ["Great job overall", "Q1: /10", "Q1: 5/", "Q: 5/10", "Q1 5/10"] {
        let err = parse_answer_line(line).expect_err(line);
        assert!(matches!(err, MergeError::AnswerLine { .. }), "{line}: {err}");
    }
}

#[test]
fn zero_possible_points_is_rejected() {
    let err = parse_answer_line("Q4: 0/0 skipped").expect_err("zero possible");
    assert!(matches!(err, MergeError::NonPositivePossible { .. }));
}

#[test]
fn fragment_skips_blank_lines() {
    let text = "Q1: 5/5 ok\n\n   \nQ2(a): 1.5/3 partly\nQ2(b): 3/3\n";
    let sheet = extract_answers(Cursor::new(text)).expect("parse fragment");
    assert_eq!(sheet.len(), 3);
    assert_eq!(sheet[&QuestionKey::new(2, Some('a'))].awarded(), 1.5);
    assert_eq!(sheet[&QuestionKey::new(2, Some('b'))].comment, "");
}

#[test]
fn fragment_with_bad_line_fails() {
    let text = "Q1: 5/5 ok\nsee me after class\n";
    assert!(extract_answers(Cursor::new(text)).is_err());
}

#[test]
fn keys_order_numerically_then_by_subpart() {
    let mut keys = vec![
        QuestionKey::new(10, None),
        QuestionKey::new(2, Some('b')),
        QuestionKey::new(2, None),
        QuestionKey::new(2, Some('a')),
    ];
    keys.sort();
    let rendered: Vec<String> = keys.iter().map(ToString::to_string).collect();
    assert_eq!(rendered, ["2", "2a", "2b", "10"]);
}
