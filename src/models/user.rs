use rusqlite::{Connection, params};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// The four account roles. Student and parent logins carry a linked
/// student id; teacher and admin carry none.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Teacher,
    Parent,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Teacher => "teacher",
            Role::Parent => "parent",
            Role::Admin => "admin",
        }
    }

    pub fn parse(s: &str) -> Result<Self, AppError> {
        match s {
            "student" => Ok(Role::Student),
            "teacher" => Ok(Role::Teacher),
            "parent" => Ok(Role::Parent),
            "admin" => Ok(Role::Admin),
            other => Err(AppError::UnknownRole(other.to_string())),
        }
    }

    /// Roles a visitor may pick on the signup form. Admin accounts are
    /// created by seeding only.
    pub fn is_registrable(&self) -> bool {
        !matches!(self, Role::Admin)
    }
}

/// Internal user row for authentication — includes the password hash.
/// Never handed to templates; see `UserDisplay`.
#[derive(Debug, Clone)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub student_id: Option<i64>,
}

/// Safe version for the admin roster — no password hash.
#[derive(Debug, Clone)]
pub struct UserDisplay {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub student_id: Option<i64>,
}

pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub student_id: Option<i64>,
}

/// Find a user by email for authentication. Exact, case-sensitive match.
pub fn find_by_email(conn: &Connection, email: &str) -> Result<Option<User>, AppError> {
    let mut stmt = conn.prepare(
        "SELECT id, name, email, password_hash, role, student_id \
         FROM users WHERE email = ?1",
    )?;
    let mut rows = stmt.query(params![email])?;
    match rows.next()? {
        Some(row) => {
            let role: String = row.get("role")?;
            Ok(Some(User {
                id: row.get("id")?,
                name: row.get("name")?,
                email: row.get("email")?,
                password_hash: row.get("password_hash")?,
                role: Role::parse(&role)?,
                student_id: row.get("student_id")?,
            }))
        }
        None => Ok(None),
    }
}

/// Insert a new user. A duplicate email trips the unique index and maps to
/// `AppError::Conflict`.
pub fn create(conn: &Connection, new: &NewUser) -> Result<i64, AppError> {
    conn.execute(
        "INSERT INTO users (name, email, password_hash, role, student_id) \
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![new.name, new.email, new.password_hash, new.role.as_str(), new.student_id],
    )?;
    Ok(conn.last_insert_rowid())
}

/// All users for the admin roster, ordered by role then name. The password
/// hash is excluded at the SQL level.
pub fn list_all(conn: &Connection) -> Result<Vec<UserDisplay>, AppError> {
    let mut stmt = conn.prepare(
        "SELECT id, name, email, role, student_id \
         FROM users ORDER BY role, name",
    )?;
    let mut rows = stmt.query([])?;
    let mut users = Vec::new();
    while let Some(row) = rows.next()? {
        let role: String = row.get("role")?;
        users.push(UserDisplay {
            id: row.get("id")?,
            name: row.get("name")?,
            email: row.get("email")?,
            role: Role::parse(&role)?,
            student_id: row.get("student_id")?,
        });
    }
    Ok(users)
}

pub fn count(conn: &Connection) -> Result<i64, AppError> {
    Ok(conn.query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))?)
}
