//! Shared test infrastructure for model layer tests.
//!
//! # Test Database Setup
//! - `setup_test_db()` - Schema only, empty tables
//! - `setup_test_db_seeded()` - Schema + the fixed demo dataset

#![allow(dead_code)]

use rusqlite::Connection;
use tempfile::TempDir;

use school_portal::db::{self, MIGRATIONS};

pub const SEED_STUDENT_EMAIL: &str = "alice@student.com";
pub const SEED_PARENT_EMAIL: &str = "parent@alice.com";
pub const SEED_TEACHER_EMAIL: &str = "teacher@school.com";
pub const SEED_ADMIN_EMAIL: &str = "admin@school.com";
pub const SEED_PASSWORD: &str = "password123";
pub const SEED_ADMIN_PASSWORD: &str = "admin123";

/// Setup a temporary SQLite database with the portal schema.
///
/// Returns a tuple of (TempDir, Connection) where TempDir must be kept
/// alive for the Connection to remain valid.
pub fn setup_test_db() -> (TempDir, Connection) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = dir.path().join("test.db");
    let conn = Connection::open(&db_path).expect("Failed to open test DB");

    conn.execute_batch("PRAGMA foreign_keys=ON; PRAGMA journal_mode=WAL;")
        .expect("Failed to set pragmas");

    conn.execute_batch(MIGRATIONS)
        .expect("Failed to run migrations");

    (dir, conn)
}

/// Schema plus the demonstration dataset: one student, four logins,
/// three results, five attendance rows, three homework items.
pub fn setup_test_db_seeded() -> (TempDir, Connection) {
    let (dir, conn) = setup_test_db();
    db::reset_and_seed(&conn).expect("Failed to seed demo dataset");
    (dir, conn)
}

pub fn seeded_student_id(conn: &Connection) -> i64 {
    conn.query_row(
        "SELECT id FROM students WHERE name = 'Alice Johnson'",
        [],
        |row| row.get(0),
    )
    .expect("Seeded student missing")
}
