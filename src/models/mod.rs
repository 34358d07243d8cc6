pub mod attendance;
pub mod dashboard;
pub mod homework;
pub mod result;
pub mod student;
pub mod user;
