use rusqlite::{Connection, params};

use crate::errors::AppError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttendanceRow {
    pub date: String,
    pub status: String,
}

/// Attendance joined with the student's name, for the admin overview.
#[derive(Debug, Clone)]
pub struct AttendanceWithStudent {
    pub id: i64,
    pub student_name: String,
    pub date: String,
    pub status: String,
}

/// Most recent rows for one student, newest first.
pub fn find_recent_by_student(
    conn: &Connection,
    student_id: i64,
    limit: i64,
) -> Result<Vec<AttendanceRow>, AppError> {
    let mut stmt = conn.prepare(
        "SELECT date, status FROM attendance WHERE student_id = ?1 \
         ORDER BY date DESC LIMIT ?2",
    )?;
    let rows = stmt
        .query_map(params![student_id, limit], |row| {
            Ok(AttendanceRow {
                date: row.get("date")?,
                status: row.get("status")?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

/// All attendance with student names, newest first.
pub fn list_with_student(conn: &Connection) -> Result<Vec<AttendanceWithStudent>, AppError> {
    let mut stmt = conn.prepare(
        "SELECT a.id, s.name AS student_name, a.date, a.status \
         FROM attendance a \
         JOIN students s ON s.id = a.student_id \
         ORDER BY a.date DESC",
    )?;
    let rows = stmt
        .query_map([], |row| {
            Ok(AttendanceWithStudent {
                id: row.get("id")?,
                student_name: row.get("student_name")?,
                date: row.get("date")?,
                status: row.get("status")?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

pub fn create(
    conn: &Connection,
    student_id: i64,
    date: &str,
    status: &str,
) -> Result<i64, AppError> {
    conn.execute(
        "INSERT INTO attendance (student_id, date, status) VALUES (?1, ?2, ?3)",
        params![student_id, date, status],
    )?;
    Ok(conn.last_insert_rowid())
}
