use actix_session::Session;
use actix_web::{HttpResponse, web};
use serde::Deserialize;

use crate::auth::{password, session};
use crate::db::DbPool;
use crate::errors::{AppError, redirect, render};
use crate::models::user::{self, NewUser, Role};
use crate::templates_structs::{LoginTemplate, SignupTemplate};

const INVALID_CREDENTIALS: &str = "Invalid email or password.";
const GENERIC_FAILURE: &str = "An unexpected error occurred. Please try again.";

#[derive(Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct SignupForm {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(rename = "confirmPassword")]
    pub confirm_password: String,
    pub role: String,
    pub student_id: Option<String>,
}

pub async fn root(session: Session) -> HttpResponse {
    if session::get_user_id(&session).is_some() {
        redirect("/dashboard")
    } else {
        redirect("/login")
    }
}

pub async fn login_page(session: Session) -> Result<HttpResponse, AppError> {
    if session::get_user_id(&session).is_some() {
        return Ok(redirect("/dashboard"));
    }
    let tmpl = LoginTemplate {
        error: session::take_flash(&session),
        success: session::take_flash_success(&session),
    };
    render(tmpl)
}

pub async fn login_submit(
    pool: web::Data<DbPool>,
    session: Session,
    form: web::Form<LoginForm>,
) -> Result<HttpResponse, AppError> {
    let conn = pool.get()?;

    // A missing account and a wrong password get the same message, so the
    // form cannot be used to enumerate emails.
    let found = user::find_by_email(&conn, &form.email)?;
    let Some(u) = found else {
        session::flash(&session, INVALID_CREDENTIALS);
        return Ok(redirect("/login"));
    };

    match password::verify_password(&form.password, &u.password_hash) {
        Ok(true) => {
            session::log_in(&session, &u)?;
            Ok(redirect("/dashboard"))
        }
        Ok(false) => {
            session::flash(&session, INVALID_CREDENTIALS);
            Ok(redirect("/login"))
        }
        Err(e) => {
            log::error!("Password verification failed: {e}");
            session::flash(&session, GENERIC_FAILURE);
            Ok(redirect("/login"))
        }
    }
}

pub async fn signup_page(session: Session) -> Result<HttpResponse, AppError> {
    let tmpl = SignupTemplate {
        error: session::take_flash(&session),
    };
    render(tmpl)
}

fn validate_signup(form: &SignupForm) -> Result<(Role, Option<i64>), AppError> {
    if form.name.trim().is_empty()
        || form.email.trim().is_empty()
        || form.password.is_empty()
        || form.confirm_password.is_empty()
        || form.role.trim().is_empty()
    {
        return Err(AppError::Validation("Please fill in all required fields.".to_string()));
    }

    let Ok(role) = Role::parse(&form.role) else {
        return Err(AppError::Validation("Invalid role selected.".to_string()));
    };
    if !role.is_registrable() {
        return Err(AppError::Validation("Invalid role selected.".to_string()));
    }

    if form.password != form.confirm_password {
        return Err(AppError::Validation("Passwords do not match.".to_string()));
    }

    let student_id = form
        .student_id
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| s.parse::<i64>().ok());

    // Student and parent accounts must be linked to a student record.
    if matches!(role, Role::Student | Role::Parent) && student_id.is_none() {
        return Err(AppError::Validation(
            "Student and parent accounts need a student ID.".to_string(),
        ));
    }

    Ok((role, student_id))
}

pub async fn signup_submit(
    pool: web::Data<DbPool>,
    session: Session,
    form: web::Form<SignupForm>,
) -> Result<HttpResponse, AppError> {
    let (role, student_id) = match validate_signup(&form) {
        Ok(parsed) => parsed,
        Err(AppError::Validation(message)) => {
            session::flash(&session, &message);
            return Ok(redirect("/signup"));
        }
        Err(e) => return Err(e),
    };

    let password_hash = match password::hash_password(&form.password) {
        Ok(hash) => hash,
        Err(e) => {
            log::error!("Password hashing failed: {e}");
            session::flash(&session, "Unable to create account. Please try again.");
            return Ok(redirect("/signup"));
        }
    };

    let conn = pool.get()?;
    let new_user = NewUser {
        name: form.name.trim().to_string(),
        email: form.email.trim().to_string(),
        password_hash,
        role,
        student_id,
    };

    match user::create(&conn, &new_user) {
        Ok(_) => {
            session::flash_success(&session, "Account created successfully. Please log in.");
            Ok(redirect("/login"))
        }
        Err(AppError::Conflict) => {
            session::flash(&session, "An account with this email already exists.");
            Ok(redirect("/signup"))
        }
        Err(e) => {
            log::error!("Signup failed: {e}");
            session::flash(&session, "Unable to create account. Please try again.");
            Ok(redirect("/signup"))
        }
    }
}

pub async fn logout(session: Session) -> HttpResponse {
    session.purge();
    redirect("/login")
}
