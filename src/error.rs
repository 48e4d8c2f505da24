use thiserror::Error;

/// Caller or data-integrity bugs. The engine is total everywhere else, so this
/// is the only failure it reports.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("unsupported credit tier {credits}; expected 2, 4, or 5")]
    UnsupportedCredits { credits: u32 },
    #[error("grade point {grade_point} is outside 4..=10")]
    GradePointOutOfRange { grade_point: u32 },
}

impl ConfigurationError {
    pub fn code(&self) -> &'static str {
        match self {
            ConfigurationError::UnsupportedCredits { .. } => "unsupported_credits",
            ConfigurationError::GradePointOutOfRange { .. } => "grade_point_out_of_range",
        }
    }
}
