// Template context structures for Askama templates.

use askama::Template;

use crate::models::dashboard::{AdminBundle, StudentBundle, TeacherBundle};

#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub error: Option<String>,
    pub success: Option<String>,
}

#[derive(Template)]
#[template(path = "signup.html")]
pub struct SignupTemplate {
    pub error: Option<String>,
}

/// Rendered for both the student and parent roles; the two bundles are
/// structurally identical, only the heading differs.
#[derive(Template)]
#[template(path = "dashboard_student.html")]
pub struct StudentDashboardTemplate {
    pub name: String,
    pub role_label: String,
    pub greeting: String,
    pub bundle: StudentBundle,
}

#[derive(Template)]
#[template(path = "dashboard_teacher.html")]
pub struct TeacherDashboardTemplate {
    pub name: String,
    pub greeting: String,
    pub bundle: TeacherBundle,
}

#[derive(Template)]
#[template(path = "dashboard_admin.html")]
pub struct AdminDashboardTemplate {
    pub name: String,
    pub greeting: String,
    pub bundle: AdminBundle,
}
