use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::{Connection, params};

use crate::auth::password;
use crate::errors::AppError;

pub type DbPool = Pool<SqliteConnectionManager>;

pub const MIGRATIONS: &str = include_str!("schema.sql");

pub fn init_pool(database_url: &str) -> DbPool {
    let manager = SqliteConnectionManager::file(database_url).with_init(|conn| {
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")?;
        Ok(())
    });
    Pool::builder()
        .max_size(8)
        .build(manager)
        .expect("Failed to create DB pool")
}

pub fn run_migrations(pool: &DbPool) {
    let conn = pool.get().expect("Failed to get DB connection for migrations");
    conn.execute_batch(MIGRATIONS)
        .expect("Failed to run migrations");
    log::info!("Database migrations complete");
}

/// Clear every table (dependents before referents) and insert the fixed
/// demonstration dataset: one student, four logins, three results, five
/// attendance rows, three homework items.
pub fn reset_and_seed(conn: &Connection) -> Result<(), AppError> {
    let user_hash = password::hash_password("password123")
        .map_err(AppError::Hash)?;
    let admin_hash = password::hash_password("admin123")
        .map_err(AppError::Hash)?;

    // Dependents first: homework rows reference users, and results and
    // attendance reference students, with foreign_keys=ON.
    conn.execute("DELETE FROM results", [])?;
    conn.execute("DELETE FROM attendance", [])?;
    conn.execute("DELETE FROM homework", [])?;
    conn.execute("DELETE FROM users", [])?;
    conn.execute("DELETE FROM students", [])?;

    conn.execute(
        "INSERT INTO students (name, class) VALUES (?1, ?2)",
        params!["Alice Johnson", "5A"],
    )?;
    let alice_id = conn.last_insert_rowid();

    let logins: [(&str, &str, &str, &str, Option<i64>); 4] = [
        ("Alice Johnson", "alice@student.com", &user_hash, "student", Some(alice_id)),
        ("Alice Parent", "parent@alice.com", &user_hash, "parent", Some(alice_id)),
        ("Tom Teacher", "teacher@school.com", &user_hash, "teacher", None),
        ("Super Admin", "admin@school.com", &admin_hash, "admin", None),
    ];
    for (name, email, hash, role, student_id) in logins {
        conn.execute(
            "INSERT INTO users (name, email, password_hash, role, student_id) \
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![name, email, hash, role, student_id],
        )?;
    }

    let teacher_id: i64 = conn.query_row(
        "SELECT id FROM users WHERE role = 'teacher'",
        [],
        |row| row.get(0),
    )?;

    let results = [
        ("Mathematics", 88, 100, "Term 1"),
        ("Science", 92, 100, "Term 1"),
        ("English", 85, 100, "Term 1"),
    ];
    for (subject, score, max, term) in results {
        conn.execute(
            "INSERT INTO results (student_id, subject, score, max_score, term) \
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![alice_id, subject, score, max, term],
        )?;
    }

    let attendance = [
        ("2026-01-28", "Present"),
        ("2026-01-29", "Present"),
        ("2026-01-30", "Late"),
        ("2026-01-31", "Absent"),
        ("2026-02-01", "Present"),
    ];
    for (date, status) in attendance {
        conn.execute(
            "INSERT INTO attendance (student_id, date, status) VALUES (?1, ?2, ?3)",
            params![alice_id, date, status],
        )?;
    }

    let homework = [
        ("5A", "Mathematics", "Fractions Worksheet", "Complete page 32, questions 1-10.", "2026-02-05"),
        ("5A", "Science", "Plant Life", "Read chapter 4 and write a short summary.", "2026-02-06"),
        ("5A", "English", "Creative Writing", "Write a one-page story about your weekend.", "2026-02-07"),
    ];
    for (class, subject, title, description, due) in homework {
        conn.execute(
            "INSERT INTO homework (class, subject, title, description, due_date, created_by) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![class, subject, title, description, due, teacher_id],
        )?;
    }

    log::info!("Demo dataset seeded");
    Ok(())
}

/// Idempotent bootstrap: seed the demo dataset only when no users exist.
/// Called from main before the server starts accepting connections, gated
/// by the SEED_DEMO config flag.
pub fn seed_demo(pool: &DbPool) -> Result<(), AppError> {
    let conn = pool.get()?;
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))?;
    if count > 0 {
        log::info!("Database already has {count} users, skipping demo seed");
        return Ok(());
    }
    reset_and_seed(&conn)
}
