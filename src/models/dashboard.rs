//! Role-scoped dashboard aggregation. Each role gets its own fixed query
//! set; access control here is whole-query selection keyed on role, never
//! row-level filtering of a shared dataset.

use rusqlite::Connection;

use crate::errors::AppError;
use crate::models::attendance::{self, AttendanceRow, AttendanceWithStudent};
use crate::models::homework::{self, HomeworkItem};
use crate::models::result::{self, ResultRow, ResultWithStudent};
use crate::models::student::{self, Student};
use crate::models::user::{self, Role, UserDisplay};

const RECENT_ATTENDANCE_LIMIT: i64 = 10;

/// What a student sees about themselves; a parent linked to the same
/// student gets the structurally identical bundle.
#[derive(Debug, Clone, PartialEq)]
pub struct StudentBundle {
    pub student: Option<Student>,
    pub results: Vec<ResultRow>,
    pub attendance: Vec<AttendanceRow>,
    pub homework: Vec<HomeworkItem>,
}

#[derive(Debug, Clone)]
pub struct TeacherBundle {
    pub students: Vec<Student>,
    pub homework: Vec<HomeworkItem>,
}

#[derive(Debug, Clone)]
pub struct AdminBundle {
    pub users: Vec<UserDisplay>,
    pub students: Vec<Student>,
    pub results: Vec<ResultWithStudent>,
    pub attendance: Vec<AttendanceWithStudent>,
    pub homework: Vec<HomeworkItem>,
}

/// One variant per role, each holding its own query contract.
#[derive(Debug, Clone)]
pub enum Dashboard {
    Student(StudentBundle),
    Parent(StudentBundle),
    Teacher(TeacherBundle),
    Admin(AdminBundle),
}

/// Load the bundle for one role. Sub-queries run sequentially; the first
/// failure aborts the whole load and no partial bundle escapes. A student
/// reference that resolves to no row yields an empty bundle, not an error.
pub fn load(
    conn: &Connection,
    role: Role,
    student_id: Option<i64>,
) -> Result<Dashboard, AppError> {
    match role {
        Role::Student => Ok(Dashboard::Student(student_bundle(conn, student_id)?)),
        Role::Parent => Ok(Dashboard::Parent(student_bundle(conn, student_id)?)),
        Role::Teacher => Ok(Dashboard::Teacher(TeacherBundle {
            students: student::list_all(conn)?,
            homework: homework::list_all(conn)?,
        })),
        Role::Admin => Ok(Dashboard::Admin(AdminBundle {
            users: user::list_all(conn)?,
            students: student::list_all(conn)?,
            results: result::list_with_student(conn)?,
            attendance: attendance::list_with_student(conn)?,
            homework: homework::list_all(conn)?,
        })),
    }
}

/// Shared by the student and parent variants. Homework resolution is a
/// two-step lookup: the student's class label first, then the matching
/// homework rows.
fn student_bundle(conn: &Connection, student_id: Option<i64>) -> Result<StudentBundle, AppError> {
    let Some(student_id) = student_id else {
        return Ok(StudentBundle {
            student: None,
            results: Vec::new(),
            attendance: Vec::new(),
            homework: Vec::new(),
        });
    };

    let student = student::find_by_id(conn, student_id)?;
    let results = result::find_by_student(conn, student_id)?;
    let attendance = attendance::find_recent_by_student(conn, student_id, RECENT_ATTENDANCE_LIMIT)?;
    let homework = match &student {
        Some(s) => homework::find_by_class(conn, &s.class)?,
        None => Vec::new(),
    };

    Ok(StudentBundle { student, results, attendance, homework })
}
