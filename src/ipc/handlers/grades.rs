use crate::classify::{classify, GRADE_BANDS};
use crate::ipc::error::ok;
use crate::ipc::helpers::{field, required_f64, required_u32, HandlerErr};
use crate::ipc::types::{AppState, Request};
use crate::normalize::{normalize, AssessmentRecord, LabScore, SubjectGradeInput};
use crate::scheme::{self, CreditTier};
use crate::subject::evaluate_raw_scores;
use serde::Deserialize;
use serde_json::json;
use std::collections::BTreeMap;

#[derive(Debug, Deserialize)]
struct LabParams {
    #[serde(default)]
    score: Option<f64>,
    max: f64,
}

fn handle_scheme(req: &Request) -> Result<serde_json::Value, HandlerErr> {
    let credits = required_u32(&req.params, "credits")?;
    let tier = CreditTier::try_from(credits)?;
    let lab = scheme::lab_max(tier).map(|max| json!({ "kind": scheme::LAB_KIND, "max": max }));
    Ok(json!({
        "credits": tier,
        "assessments": scheme::plan(tier),
        "lab": lab,
    }))
}

fn handle_normalize(req: &Request) -> Result<serde_json::Value, HandlerErr> {
    let credits = required_u32(&req.params, "credits")?;
    let assessments: Option<Vec<AssessmentRecord>> = field(&req.params, "assessments")?;
    let lab: Option<LabParams> = field(&req.params, "lab")?;
    // A lab block without a score is the same as no lab data yet.
    let lab = lab.and_then(|l| l.score.map(|score| LabScore { score, max: l.max }));

    let input = SubjectGradeInput::new(credits, assessments.unwrap_or_default(), lab)?;
    let normalized = normalize(&input);
    Ok(json!(normalized))
}

fn handle_classify(req: &Request) -> Result<serde_json::Value, HandlerErr> {
    let score = required_f64(&req.params, "score")?;
    Ok(json!(classify(score)))
}

fn handle_bands() -> serde_json::Value {
    json!({ "bands": GRADE_BANDS })
}

fn handle_evaluate(req: &Request) -> Result<serde_json::Value, HandlerErr> {
    let credits = required_u32(&req.params, "credits")?;
    let mut raw_scores: BTreeMap<String, f64> =
        field::<Option<BTreeMap<String, f64>>>(&req.params, "rawScores")?.unwrap_or_default();
    if let Some(v) = req.params.get("labScore").filter(|v| !v.is_null()) {
        let Some(score) = v.as_f64() else {
            return Err(HandlerErr::bad_params("params.labScore must be a number"));
        };
        raw_scores.insert(scheme::LAB_KIND.to_string(), score);
    }
    let evaluation = evaluate_raw_scores(credits, &raw_scores)?;
    Ok(json!(evaluation))
}

pub fn try_handle(_state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    let result = match req.method.as_str() {
        "grades.scheme" => handle_scheme(req),
        "grades.normalize" => handle_normalize(req),
        "grades.classify" => handle_classify(req),
        "grades.bands" => Ok(handle_bands()),
        "grades.evaluate" => handle_evaluate(req),
        _ => return None,
    };
    Some(match result {
        Ok(v) => ok(&req.id, v),
        Err(e) => e.response(&req.id),
    })
}
