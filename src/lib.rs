pub mod classify;
pub mod config;
pub mod error;
pub mod gpa;
pub mod ipc;
pub mod normalize;
pub mod scheme;
pub mod subject;

pub use classify::{classify, Classification, GradeBand, LetterGrade, GRADE_BANDS};
pub use error::ConfigurationError;
pub use gpa::{aggregate_gpa, cgpa, sgpa, CourseResult, Semester};
pub use normalize::{normalize, AssessmentRecord, LabScore, NormalizedScore, SubjectGradeInput};
pub use scheme::CreditTier;
pub use subject::{evaluate_raw_scores, SubjectGradeResult};
