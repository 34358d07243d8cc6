use actix_session::Session;

use crate::errors::AppError;
use crate::models::user::{Role, User};

/// The identity claims a session carries. Exactly these four fields go into
/// session state on login; the password hash never does.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: i64,
    pub name: String,
    pub role: Role,
    pub student_id: Option<i64>,
}

pub fn log_in(session: &Session, user: &User) -> Result<(), AppError> {
    session
        .insert("user_id", user.id)
        .and_then(|_| session.insert("name", &user.name))
        .and_then(|_| session.insert("role", user.role))
        .and_then(|_| session.insert("student_id", user.student_id))
        .map_err(|e| AppError::Session(e.to_string()))
}

pub fn get_user_id(session: &Session) -> Option<i64> {
    session.get::<i64>("user_id").unwrap_or(None)
}

/// Resolve the full claim set. Fails if the session lacks a logged-in user;
/// handlers behind `require_auth` can rely on it succeeding.
pub fn current_user(session: &Session) -> Result<CurrentUser, AppError> {
    let id = get_user_id(session)
        .ok_or_else(|| AppError::Session("No user in session".to_string()))?;
    let name = session
        .get::<String>("name")
        .map_err(|e| AppError::Session(e.to_string()))?
        .unwrap_or_default();
    let role = session
        .get::<Role>("role")
        .map_err(|e| AppError::Session(e.to_string()))?
        .ok_or_else(|| AppError::Session("No role in session".to_string()))?;
    let student_id = session
        .get::<Option<i64>>("student_id")
        .map_err(|e| AppError::Session(e.to_string()))?
        .flatten();
    Ok(CurrentUser { id, name, role, student_id })
}

pub fn flash(session: &Session, message: &str) {
    let _ = session.insert("flash", message);
}

pub fn take_flash(session: &Session) -> Option<String> {
    let flash = session.get::<String>("flash").unwrap_or(None);
    if flash.is_some() {
        session.remove("flash");
    }
    flash
}

pub fn flash_success(session: &Session, message: &str) {
    let _ = session.insert("flash_success", message);
}

pub fn take_flash_success(session: &Session) -> Option<String> {
    let flash = session.get::<String>("flash_success").unwrap_or(None);
    if flash.is_some() {
        session.remove("flash_success");
    }
    flash
}
