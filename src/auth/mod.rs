pub mod file_store;
pub mod middleware;
pub mod password;
pub mod session;
