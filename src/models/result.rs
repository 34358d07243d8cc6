use rusqlite::{Connection, params};

use crate::errors::AppError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRow {
    pub subject: String,
    pub score: i64,
    pub max_score: i64,
    pub term: String,
}

/// Result joined with the student's name, for the admin overview.
#[derive(Debug, Clone)]
pub struct ResultWithStudent {
    pub id: i64,
    pub student_name: String,
    pub subject: String,
    pub score: i64,
    pub max_score: i64,
    pub term: String,
}

pub fn find_by_student(conn: &Connection, student_id: i64) -> Result<Vec<ResultRow>, AppError> {
    let mut stmt = conn.prepare(
        "SELECT subject, score, max_score, term FROM results WHERE student_id = ?1",
    )?;
    let results = stmt
        .query_map(params![student_id], |row| {
            Ok(ResultRow {
                subject: row.get("subject")?,
                score: row.get("score")?,
                max_score: row.get("max_score")?,
                term: row.get("term")?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(results)
}

/// All results with student names, ordered by term then subject.
pub fn list_with_student(conn: &Connection) -> Result<Vec<ResultWithStudent>, AppError> {
    let mut stmt = conn.prepare(
        "SELECT r.id, s.name AS student_name, r.subject, r.score, r.max_score, r.term \
         FROM results r \
         JOIN students s ON s.id = r.student_id \
         ORDER BY r.term, r.subject",
    )?;
    let results = stmt
        .query_map([], |row| {
            Ok(ResultWithStudent {
                id: row.get("id")?,
                student_name: row.get("student_name")?,
                subject: row.get("subject")?,
                score: row.get("score")?,
                max_score: row.get("max_score")?,
                term: row.get("term")?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(results)
}

pub fn create(
    conn: &Connection,
    student_id: i64,
    subject: &str,
    score: i64,
    max_score: i64,
    term: &str,
) -> Result<i64, AppError> {
    conn.execute(
        "INSERT INTO results (student_id, subject, score, max_score, term) \
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![student_id, subject, score, max_score, term],
    )?;
    Ok(conn.last_insert_rowid())
}
