pub mod core;
pub mod gpa;
pub mod grades;
