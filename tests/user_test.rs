//! User model tests — creation, lookup, conflict handling, role parsing.

mod common;

use school_portal::auth::password;
use school_portal::errors::AppError;
use school_portal::models::user::{self, NewUser, Role};

use common::*;

fn new_user(email: &str, role: Role, student_id: Option<i64>) -> NewUser {
    NewUser {
        name: "Test User".to_string(),
        email: email.to_string(),
        password_hash: password::hash_password("secret123").expect("Failed to hash"),
        role,
        student_id,
    }
}

#[test]
fn test_create_and_find_by_email() {
    let (_dir, conn) = setup_test_db();

    let created_id = user::create(&conn, &new_user("test@example.com", Role::Teacher, None))
        .expect("Failed to create user");
    assert!(created_id > 0);

    let found = user::find_by_email(&conn, "test@example.com")
        .expect("Query failed")
        .expect("User not found");

    assert_eq!(found.id, created_id);
    assert_eq!(found.email, "test@example.com");
    assert_eq!(found.role, Role::Teacher);
    assert_eq!(found.student_id, None);
}

#[test]
fn test_find_by_email_not_found() {
    let (_dir, conn) = setup_test_db();

    let result = user::find_by_email(&conn, "nonexistent@example.com")
        .expect("Query failed");

    assert!(result.is_none());
}

#[test]
fn test_duplicate_email_conflicts() {
    let (_dir, conn) = setup_test_db();

    let first = new_user("dup@example.com", Role::Teacher, None);
    user::create(&conn, &first).expect("First create failed");

    let second = NewUser {
        name: "Impostor".to_string(),
        ..new_user("dup@example.com", Role::Teacher, None)
    };
    let err = user::create(&conn, &second).expect_err("Second create should fail");
    assert!(matches!(err, AppError::Conflict));

    // The first identity is unmodified.
    let survivor = user::find_by_email(&conn, "dup@example.com")
        .expect("Query failed")
        .expect("User missing after conflict");
    assert_eq!(survivor.name, "Test User");

    let count = user::count(&conn).expect("Count failed");
    assert_eq!(count, 1);
}

#[test]
fn test_list_all_excludes_password_and_orders_by_role_then_name() {
    let (_dir, conn) = setup_test_db_seeded();

    let users = user::list_all(&conn).expect("List failed");
    assert_eq!(users.len(), 4);

    // Ordered by role, then name: admin, parent, student, teacher.
    let roles: Vec<Role> = users.iter().map(|u| u.role).collect();
    assert_eq!(roles, vec![Role::Admin, Role::Parent, Role::Student, Role::Teacher]);
    assert_eq!(users[0].email, SEED_ADMIN_EMAIL);
    assert_eq!(users[3].email, SEED_TEACHER_EMAIL);
}

#[test]
fn test_dangling_student_reference_is_not_a_conflict() {
    let (_dir, conn) = setup_test_db();

    // No student with id 9999 exists; the FK trips, but that is a database
    // error, not a duplicate-email conflict.
    let err = user::create(&conn, &new_user("ghost@example.com", Role::Parent, Some(9999)))
        .expect_err("Create with dangling student reference should fail");
    assert!(matches!(err, AppError::Db(_)));
}

#[test]
fn test_role_parse_round_trip() {
    for role in [Role::Student, Role::Teacher, Role::Parent, Role::Admin] {
        assert_eq!(Role::parse(role.as_str()).expect("Parse failed"), role);
    }
}

#[test]
fn test_role_parse_unknown() {
    let err = Role::parse("superuser").expect_err("Unknown role should not parse");
    assert!(matches!(err, AppError::UnknownRole(_)));
}

#[test]
fn test_admin_not_registrable() {
    assert!(Role::Student.is_registrable());
    assert!(Role::Parent.is_registrable());
    assert!(Role::Teacher.is_registrable());
    assert!(!Role::Admin.is_registrable());
}
