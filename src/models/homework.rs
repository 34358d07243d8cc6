use rusqlite::{Connection, params};

use crate::errors::AppError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomeworkItem {
    pub id: i64,
    pub class: String,
    pub subject: String,
    pub title: String,
    pub description: Option<String>,
    pub due_date: String,
}

fn row_to_homework(row: &rusqlite::Row) -> rusqlite::Result<HomeworkItem> {
    Ok(HomeworkItem {
        id: row.get("id")?,
        class: row.get("class")?,
        subject: row.get("subject")?,
        title: row.get("title")?,
        description: row.get("description")?,
        due_date: row.get("due_date")?,
    })
}

/// Homework for one class label, earliest due date first. Classes are
/// denormalized strings, so this is a plain equality match.
pub fn find_by_class(conn: &Connection, class: &str) -> Result<Vec<HomeworkItem>, AppError> {
    let mut stmt = conn.prepare(
        "SELECT id, class, subject, title, description, due_date \
         FROM homework WHERE class = ?1 ORDER BY due_date ASC",
    )?;
    let items = stmt
        .query_map(params![class], row_to_homework)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(items)
}

/// Homework across all classes, earliest due date first.
pub fn list_all(conn: &Connection) -> Result<Vec<HomeworkItem>, AppError> {
    let mut stmt = conn.prepare(
        "SELECT id, class, subject, title, description, due_date \
         FROM homework ORDER BY due_date ASC",
    )?;
    let items = stmt
        .query_map([], row_to_homework)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(items)
}

pub fn create(
    conn: &Connection,
    class: &str,
    subject: &str,
    title: &str,
    description: Option<&str>,
    due_date: &str,
    created_by: Option<i64>,
) -> Result<i64, AppError> {
    conn.execute(
        "INSERT INTO homework (class, subject, title, description, due_date, created_by) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![class, subject, title, description, due_date, created_by],
    )?;
    Ok(conn.last_insert_rowid())
}
