//! Credit-weighted grade point averages.
//!
//! SGPA and CGPA are the same computation over different partitions of the
//! course list. CGPA is always taken over the flattened courses of every term,
//! never over already-rounded term GPAs.

use crate::error::ConfigurationError;
use serde::{Deserialize, Serialize};

pub const MIN_GRADE_POINT: u32 = 4;
pub const MAX_GRADE_POINT: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseResult {
    pub credits: u32,
    pub grade_point: u32,
}

impl CourseResult {
    pub fn new(credits: u32, grade_point: u32) -> Result<Self, ConfigurationError> {
        if !(MIN_GRADE_POINT..=MAX_GRADE_POINT).contains(&grade_point) {
            return Err(ConfigurationError::GradePointOutOfRange { grade_point });
        }
        Ok(Self {
            credits,
            grade_point,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Semester {
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub courses: Vec<CourseResult>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GpaSummary {
    pub gpa: f64,
    pub total_credits: u64,
    pub course_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SemesterGpa {
    pub label: Option<String>,
    pub gpa: f64,
    pub total_credits: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CumulativeGpa {
    pub gpa: f64,
    pub total_credits: u64,
    pub course_count: usize,
    pub semesters: Vec<SemesterGpa>,
}

/// Σ(credits × point) / Σ credits to two decimals, half up. `0.0` when no
/// credits contribute.
pub fn aggregate_gpa<'a, I>(courses: I) -> f64
where
    I: IntoIterator<Item = &'a CourseResult>,
{
    summarize(courses).gpa
}

pub fn summarize<'a, I>(courses: I) -> GpaSummary
where
    I: IntoIterator<Item = &'a CourseResult>,
{
    // Courses built without `CourseResult::new` carry arbitrary u32s.
    let mut weighted: u128 = 0;
    let mut total_credits: u128 = 0;
    let mut course_count: usize = 0;
    for c in courses {
        weighted = weighted.saturating_add(u128::from(c.credits) * u128::from(c.grade_point));
        total_credits = total_credits.saturating_add(u128::from(c.credits));
        course_count += 1;
    }
    GpaSummary {
        gpa: round_ratio_2dp(weighted, total_credits),
        total_credits: u64::try_from(total_credits).unwrap_or(u64::MAX),
        course_count,
    }
}

/// Term GPA.
pub fn sgpa(courses: &[CourseResult]) -> f64 {
    aggregate_gpa(courses)
}

/// Program GPA over every term's courses.
pub fn cgpa(semesters: &[Semester]) -> CumulativeGpa {
    let overall = summarize(semesters.iter().flat_map(|s| s.courses.iter()));
    let per_semester = semesters
        .iter()
        .map(|s| {
            let term = summarize(&s.courses);
            SemesterGpa {
                label: s.label.clone(),
                gpa: term.gpa,
                total_credits: term.total_credits,
            }
        })
        .collect();
    CumulativeGpa {
        gpa: overall.gpa,
        total_credits: overall.total_credits,
        course_count: overall.course_count,
        semesters: per_semester,
    }
}

// The sums are integers, so the only rounding happens here, exactly:
// floor((200·n + d) / 2d) is n/d in hundredths rounded half up.
fn round_ratio_2dp(numerator: u128, denominator: u128) -> f64 {
    if denominator == 0 {
        return 0.0;
    }
    let hundredths = numerator
        .saturating_mul(200)
        .saturating_add(denominator)
        / denominator.saturating_mul(2);
    hundredths as f64 / 100.0
}
