use rusqlite::{Connection, params};

use crate::errors::AppError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Student {
    pub id: i64,
    pub name: String,
    pub class: String,
}

fn row_to_student(row: &rusqlite::Row) -> rusqlite::Result<Student> {
    Ok(Student {
        id: row.get("id")?,
        name: row.get("name")?,
        class: row.get("class")?,
    })
}

pub fn find_by_id(conn: &Connection, id: i64) -> Result<Option<Student>, AppError> {
    let mut stmt = conn.prepare("SELECT id, name, class FROM students WHERE id = ?1")?;
    let mut rows = stmt.query_map(params![id], row_to_student)?;
    match rows.next() {
        Some(row) => Ok(Some(row?)),
        None => Ok(None),
    }
}

/// Full roster, ordered by class then name.
pub fn list_all(conn: &Connection) -> Result<Vec<Student>, AppError> {
    let mut stmt = conn.prepare("SELECT id, name, class FROM students ORDER BY class, name")?;
    let students = stmt
        .query_map([], row_to_student)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(students)
}

pub fn create(conn: &Connection, name: &str, class: &str) -> Result<i64, AppError> {
    conn.execute(
        "INSERT INTO students (name, class) VALUES (?1, ?2)",
        params![name, class],
    )?;
    Ok(conn.last_insert_rowid())
}
