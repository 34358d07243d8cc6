//! Dashboard aggregation tests — role dispatch, bundle shapes, orderings,
//! and the seeded end-to-end scenario.

mod common;

use school_portal::models::dashboard::{self, Dashboard, StudentBundle};
use school_portal::models::user::Role;
use school_portal::models::{attendance, homework, result, student};

use common::*;

fn expect_student(bundle: Dashboard) -> StudentBundle {
    match bundle {
        Dashboard::Student(b) => b,
        other => panic!("Expected student bundle, got {other:?}"),
    }
}

#[test]
fn test_student_with_no_rows_gets_empty_bundle() {
    let (_dir, conn) = setup_test_db();

    let sid = student::create(&conn, "Empty Kid", "1B").expect("Failed to create student");

    let bundle = expect_student(
        dashboard::load(&conn, Role::Student, Some(sid)).expect("Load failed"),
    );

    assert_eq!(bundle.student.as_ref().map(|s| s.name.as_str()), Some("Empty Kid"));
    assert!(bundle.results.is_empty());
    assert!(bundle.attendance.is_empty());
    assert!(bundle.homework.is_empty());
}

#[test]
fn test_missing_student_reference_is_not_an_error() {
    let (_dir, conn) = setup_test_db();

    let bundle = expect_student(
        dashboard::load(&conn, Role::Student, Some(9999)).expect("Load failed"),
    );
    assert!(bundle.student.is_none());
    assert!(bundle.results.is_empty());
    assert!(bundle.homework.is_empty());

    let bundle = expect_student(
        dashboard::load(&conn, Role::Student, None).expect("Load failed"),
    );
    assert!(bundle.student.is_none());
}

#[test]
fn test_student_and_parent_bundles_identical() {
    let (_dir, conn) = setup_test_db_seeded();
    let sid = seeded_student_id(&conn);

    let student_bundle = match dashboard::load(&conn, Role::Student, Some(sid))
        .expect("Student load failed")
    {
        Dashboard::Student(b) => b,
        other => panic!("Expected student bundle, got {other:?}"),
    };
    let parent_bundle = match dashboard::load(&conn, Role::Parent, Some(sid))
        .expect("Parent load failed")
    {
        Dashboard::Parent(b) => b,
        other => panic!("Expected parent bundle, got {other:?}"),
    };

    assert_eq!(student_bundle, parent_bundle);
}

#[test]
fn test_homework_matches_class_label_exactly() {
    let (_dir, conn) = setup_test_db();

    let sid = student::create(&conn, "Kid A", "5A").expect("Failed to create student");
    homework::create(&conn, "5A", "Maths", "Late item", None, "2026-03-10", None)
        .expect("Insert failed");
    homework::create(&conn, "5A", "Science", "Early item", Some("Read ch. 2"), "2026-03-01", None)
        .expect("Insert failed");
    homework::create(&conn, "5B", "Maths", "Other class", None, "2026-03-02", None)
        .expect("Insert failed");

    let bundle = expect_student(
        dashboard::load(&conn, Role::Student, Some(sid)).expect("Load failed"),
    );

    // Exactly the rows whose class label equals the student's, due date ascending.
    let titles: Vec<&str> = bundle.homework.iter().map(|h| h.title.as_str()).collect();
    assert_eq!(titles, vec!["Early item", "Late item"]);
    assert!(bundle.homework.iter().all(|h| h.class == "5A"));

    // Two-step lookup must be join-equivalent to the direct class query.
    let direct = homework::find_by_class(&conn, "5A").expect("Query failed");
    assert_eq!(bundle.homework, direct);
}

#[test]
fn test_attendance_capped_at_ten_newest_first() {
    let (_dir, conn) = setup_test_db();

    let sid = student::create(&conn, "Busy Kid", "6C").expect("Failed to create student");
    for day in 1..=12 {
        attendance::create(&conn, sid, &format!("2026-01-{day:02}"), "Present")
            .expect("Insert failed");
    }

    let bundle = expect_student(
        dashboard::load(&conn, Role::Student, Some(sid)).expect("Load failed"),
    );

    assert_eq!(bundle.attendance.len(), 10);
    assert_eq!(bundle.attendance[0].date, "2026-01-12");
    assert_eq!(bundle.attendance[9].date, "2026-01-03");
}

#[test]
fn test_teacher_bundle_roster_ordering() {
    let (_dir, conn) = setup_test_db();

    student::create(&conn, "Zoe", "5A").expect("Insert failed");
    student::create(&conn, "Amy", "5B").expect("Insert failed");
    student::create(&conn, "Ben", "5A").expect("Insert failed");
    homework::create(&conn, "5B", "Maths", "Sheet", None, "2026-04-02", None)
        .expect("Insert failed");
    homework::create(&conn, "5A", "Maths", "Quiz", None, "2026-04-01", None)
        .expect("Insert failed");

    let bundle = match dashboard::load(&conn, Role::Teacher, None).expect("Load failed") {
        Dashboard::Teacher(b) => b,
        other => panic!("Expected teacher bundle, got {other:?}"),
    };

    // Students by class then name; homework across all classes by due date.
    let names: Vec<&str> = bundle.students.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["Ben", "Zoe", "Amy"]);
    let titles: Vec<&str> = bundle.homework.iter().map(|h| h.title.as_str()).collect();
    assert_eq!(titles, vec!["Quiz", "Sheet"]);
}

#[test]
fn test_admin_bundle_joins_and_orderings() {
    let (_dir, conn) = setup_test_db_seeded();

    let bundle = match dashboard::load(&conn, Role::Admin, None).expect("Load failed") {
        Dashboard::Admin(b) => b,
        other => panic!("Expected admin bundle, got {other:?}"),
    };

    assert_eq!(bundle.users.len(), 4);
    assert_eq!(bundle.students.len(), 1);

    // Results carry the joined student name, ordered by term then subject.
    let subjects: Vec<&str> = bundle.results.iter().map(|r| r.subject.as_str()).collect();
    assert_eq!(subjects, vec!["English", "Mathematics", "Science"]);
    assert!(bundle.results.iter().all(|r| r.student_name == "Alice Johnson"));

    // Attendance newest first, joined with the student name.
    assert_eq!(bundle.attendance.len(), 5);
    assert_eq!(bundle.attendance[0].date, "2026-02-01");
    assert!(bundle.attendance.iter().all(|a| a.student_name == "Alice Johnson"));

    assert_eq!(bundle.homework.len(), 3);
}

#[test]
fn test_seeded_student_dashboard_end_to_end() {
    let (_dir, conn) = setup_test_db_seeded();
    let sid = seeded_student_id(&conn);

    let bundle = expect_student(
        dashboard::load(&conn, Role::Student, Some(sid)).expect("Load failed"),
    );

    let student = bundle.student.expect("Seeded student missing");
    assert_eq!(student.name, "Alice Johnson");
    assert_eq!(student.class, "5A");

    // Exactly three Term 1 results with the seeded scores.
    assert_eq!(bundle.results.len(), 3);
    let mut scores: Vec<(String, i64, i64, String)> = bundle
        .results
        .iter()
        .map(|r| (r.subject.clone(), r.score, r.max_score, r.term.clone()))
        .collect();
    scores.sort();
    assert_eq!(
        scores,
        vec![
            ("English".to_string(), 85, 100, "Term 1".to_string()),
            ("Mathematics".to_string(), 88, 100, "Term 1".to_string()),
            ("Science".to_string(), 92, 100, "Term 1".to_string()),
        ]
    );

    // Five attendance rows, newest first, starting 2026-02-01.
    let dates: Vec<&str> = bundle.attendance.iter().map(|a| a.date.as_str()).collect();
    assert_eq!(
        dates,
        vec!["2026-02-01", "2026-01-31", "2026-01-30", "2026-01-29", "2026-01-28"]
    );

    // Three homework items ordered by due date, starting 2026-02-05.
    let due: Vec<&str> = bundle.homework.iter().map(|h| h.due_date.as_str()).collect();
    assert_eq!(due, vec!["2026-02-05", "2026-02-06", "2026-02-07"]);
}

#[test]
fn test_reseed_is_a_full_reset() {
    let (_dir, conn) = setup_test_db_seeded();

    student::create(&conn, "Stray", "9Z").expect("Insert failed");
    result::create(&conn, seeded_student_id(&conn), "Art", 50, 100, "Term 2")
        .expect("Insert failed");

    // The seeded dataset itself has homework referencing the teacher login,
    // so this must clear dependents before users with foreign keys on.
    school_portal::db::reset_and_seed(&conn).expect("Reseed failed");

    let students = student::list_all(&conn).expect("List failed");
    assert_eq!(students.len(), 1);
    let results = result::find_by_student(&conn, seeded_student_id(&conn)).expect("Query failed");
    assert_eq!(results.len(), 3);

    // Resetting an already-reset database works the same way.
    school_portal::db::reset_and_seed(&conn).expect("Second reseed failed");
    assert_eq!(student::list_all(&conn).expect("List failed").len(), 1);
}
