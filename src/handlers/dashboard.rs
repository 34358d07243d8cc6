use actix_session::Session;
use actix_web::{HttpResponse, web};
use chrono::{Local, Timelike};

use crate::auth::session;
use crate::db::DbPool;
use crate::errors::{AppError, redirect, render};
use crate::models::dashboard::{self, Dashboard};
use crate::templates_structs::{
    AdminDashboardTemplate, StudentDashboardTemplate, TeacherDashboardTemplate,
};

fn time_greeting(name: &str) -> String {
    let hour = Local::now().hour();
    let period = match hour {
        5..=11 => "Good morning",
        12..=16 => "Good afternoon",
        _ => "Good evening",
    };
    format!("{}, {}", period, name)
}

pub async fn index(pool: web::Data<DbPool>, session: Session) -> Result<HttpResponse, AppError> {
    let user = session::current_user(&session)?;

    let conn = pool.get()?;
    let bundle = match dashboard::load(&conn, user.role, user.student_id) {
        Ok(bundle) => bundle,
        Err(e) => {
            log::error!("Dashboard load failed for user {}: {e}", user.id);
            session::flash(&session, "Unable to load dashboard.");
            return Ok(redirect("/login"));
        }
    };

    let greeting = time_greeting(&user.name);

    match bundle {
        Dashboard::Student(bundle) => render(StudentDashboardTemplate {
            name: user.name,
            role_label: "Student".to_string(),
            greeting,
            bundle,
        }),
        Dashboard::Parent(bundle) => render(StudentDashboardTemplate {
            name: user.name,
            role_label: "Parent".to_string(),
            greeting,
            bundle,
        }),
        Dashboard::Teacher(bundle) => render(TeacherDashboardTemplate {
            name: user.name,
            greeting,
            bundle,
        }),
        Dashboard::Admin(bundle) => render(AdminDashboardTemplate {
            name: user.name,
            greeting,
            bundle,
        }),
    }
}
