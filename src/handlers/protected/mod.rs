// handlers/protected/mod.rs - Student record endpoints under /api/Student
pub mod student;
