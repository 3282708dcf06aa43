use umm_merge::{
    ConflictPolicy,
    grade::{
        AnswerSheet, Grade, Identity, QuestionKey, ScoreRecord, StudentRecord, merge_answers,
        overwrite, render_comments, totalize,
    },
};

fn key(n: u32) -> QuestionKey {
    QuestionKey::new(n, None)
}

fn sheet(entries: &[(QuestionKey, f64, f64, &str)]) -> AnswerSheet {
    entries
        .iter()
        .map(|(k, a, p, c)| (*k, ScoreRecord::new(*a, *p, *c)))
        .collect()
}

fn identity() -> Identity {
    Identity::new("Doe, Jane (jdoe42)", "Doe", "Jane", "jdoe42")
}

#[test]
fn single_fragment_merges_to_itself() {
    let fragment = sheet(&[(key(1), 3.0, 5.0, " ok"), (key(2), 4.0, 4.0, "")]);
    let merged = merge_answers([fragment.clone()], &overwrite);
    assert_eq!(merged, fragment);
}

#[test]
fn last_writer_wins_by_default() {
    let a = sheet(&[(key(1), 1.0, 5.0, " A")]);
    let b = sheet(&[(key(1), 4.0, 5.0, " B")]);

    let merged = merge_answers([a.clone(), b.clone()], &overwrite);
    assert_eq!(merged[&key(1)].comment, " B");

    let merged = merge_answers([b, a], &overwrite);
    assert_eq!(merged[&key(1)].comment, " A");
}

#[test]
fn strategy_decides_conflicts() {
    let a = sheet(&[(key(1), 1.0, 5.0, " A")]);
    let b = sheet(&[(key(1), 4.0, 5.0, " B"), (key(2), 2.0, 2.0, " B")]);

    let merged = merge_answers([a.clone(), b.clone()], &ConflictPolicy::FirstGraderWins);
    assert_eq!(merged[&key(1)].comment, " A");
    assert_eq!(merged[&key(2)].comment, " B");

    let highest = |_: &QuestionKey, existing: ScoreRecord, incoming: ScoreRecord| {
        if incoming.awarded() > existing.awarded() { incoming } else { existing }
    };
    let merged = merge_answers([b, a], &highest);
    assert_eq!(merged[&key(1)].awarded(), 4.0);
}

#[test]
fn comments_are_sorted_numerically() {
    let answers = sheet(&[
        (key(10), 1.0, 2.0, " ten"),
        (key(2), 7.5, 10.0, " two"),
        (QuestionKey::new(2, Some('a')), 1.0, 1.0, ""),
    ]);
    assert_eq!(
        render_comments(&answers),
        "2 - 7.5/10.0  two\n2a - 1.0/1.0 \n10 - 1.0/2.0  ten\n"
    );
}

#[test]
fn totals_sum_independently() {
    let answers = sheet(&[(key(1), 3.0, 5.0, ""), (key(2), 4.5, 10.0, "")]);
    assert_eq!(totalize(&answers), Grade::new(7.5, 15.0));
    assert_eq!(totalize(&AnswerSheet::new()), Grade::new(0.0, 0.0));
}

#[test]
fn record_without_identity_is_not_built() {
    let fragment = sheet(&[(key(1), 3.0, 5.0, "")]);
    assert!(StudentRecord::merge(None, [fragment], -1).is_none());
}

#[test]
fn record_combines_graders() {
    let first = sheet(&[(key(1), 3.0, 5.0, " first"), (key(2), 2.0, 5.0, " first")]);
    let second = sheet(&[(key(2), 5.0, 5.0, " second"), (key(3), 10.0, 10.0, "")]);

    let record =
        StudentRecord::merge(Some(identity()), [first, second], 2).expect("record is built");
    assert_eq!(record.fragments(), 2);
    assert_eq!(record.overdue_days(), 2);
    assert_eq!(record.total_awarded(), 18.0);
    assert_eq!(record.total_possible(), 20.0);
    assert_eq!(
        record.comment_block(),
        "1 - 3.0/5.0  first\n2 - 5.0/5.0  second\n3 - 10.0/10.0 \n"
    );

    let snapshot = serde_json::to_value(&record).expect("serialize record");
    assert_eq!(snapshot["answers"]["2"]["comment"], " second");
    assert_eq!(snapshot["identity"]["external_id"], "jdoe42");

    let summary = serde_json::to_value(record.summary(3.6)).expect("serialize summary");
    assert_eq!(summary["external_id"], "jdoe42");
    assert_eq!(summary["name"], "Doe, Jane");
}
