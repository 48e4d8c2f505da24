use crate::gpa::{cgpa, summarize, CourseResult, Semester};
use crate::ipc::error::ok;
use crate::ipc::helpers::{check_course_limit, field, HandlerErr};
use crate::ipc::types::{AppState, Request};
use serde_json::json;

/// Grade points arrive from stored documents, so each one goes through the
/// checked constructor.
fn checked(courses: &[CourseResult], offset: usize) -> Result<(), HandlerErr> {
    for (i, c) in courses.iter().enumerate() {
        if let Err(e) = CourseResult::new(c.credits, c.grade_point) {
            let kind = e.code();
            let mut h = HandlerErr::from(e);
            h.details = Some(json!({ "kind": kind, "index": offset + i }));
            return Err(h);
        }
    }
    Ok(())
}

fn handle_semester(state: &AppState, req: &Request) -> Result<serde_json::Value, HandlerErr> {
    let courses: Vec<CourseResult> =
        field::<Option<Vec<CourseResult>>>(&req.params, "courses")?.unwrap_or_default();
    check_course_limit(courses.len(), state.config.max_courses)?;
    checked(&courses, 0)?;
    Ok(json!(summarize(&courses)))
}

fn handle_cumulative(state: &AppState, req: &Request) -> Result<serde_json::Value, HandlerErr> {
    let semesters: Vec<Semester> =
        field::<Option<Vec<Semester>>>(&req.params, "semesters")?.unwrap_or_default();
    let total: usize = semesters.iter().map(|s| s.courses.len()).sum();
    check_course_limit(total, state.config.max_courses)?;
    let mut offset = 0;
    for s in &semesters {
        checked(&s.courses, offset)?;
        offset += s.courses.len();
    }
    Ok(json!(cgpa(&semesters)))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    let result = match req.method.as_str() {
        "gpa.semester" => handle_semester(state, req),
        "gpa.cumulative" => handle_cumulative(state, req),
        _ => return None,
    };
    Some(match result {
        Ok(v) => ok(&req.id, v),
        Err(e) => e.response(&req.id),
    })
}
