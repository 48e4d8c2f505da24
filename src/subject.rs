//! Grading a subject from named raw scores against the standard scheme.
//!
//! This is the caller side of the engine: it builds the normalizer input,
//! classifies the score, and reports which planned assessments are still
//! outstanding. Persisting the result is left to whoever calls it.

use crate::classify::{classify, round_half_up, LetterGrade};
use crate::error::ConfigurationError;
use crate::gpa::CourseResult;
use crate::normalize::{
    normalize, AssessmentRecord, LabScore, NormalizedScore, PartialReason, SubjectGradeInput,
};
use crate::scheme::{self, CreditTier};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectGradeResult {
    pub final_score_100: f64,
    pub letter_grade: LetterGrade,
    pub grade_point: u8,
    pub partial: bool,
}

impl SubjectGradeResult {
    pub fn from_normalized(score: &NormalizedScore) -> Self {
        let c = classify(score.final_score_100);
        Self {
            final_score_100: score.final_score_100,
            letter_grade: c.letter_grade,
            grade_point: c.grade_point,
            partial: score.partial,
        }
    }

    pub fn course_result(&self, credits: u32) -> CourseResult {
        CourseResult {
            credits,
            grade_point: u32::from(self.grade_point),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentBreakdown {
    pub kind: String,
    pub max_raw: f64,
    pub weight_to: f64,
    pub score_raw: Option<f64>,
    pub score_weighted: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectEvaluation {
    pub credits: CreditTier,
    #[serde(flatten)]
    pub result: SubjectGradeResult,
    pub conditions: Vec<PartialReason>,
    pub missing: Vec<String>,
    pub ignored: Vec<String>,
    pub assessments: Vec<AssessmentBreakdown>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lab_percentage: Option<f64>,
}

/// Two decimals, half up, as stored next to each raw mark.
pub fn round_2dp(x: f64) -> f64 {
    round_half_up(x * 100.0) / 100.0
}

/// Grades a subject whose marks are keyed by assessment name (`ISA1`, `ESA`,
/// `LAB`, ...). Names match case-insensitively. Names outside the tier's plan
/// are reported in `ignored`, as are case variants of a name already seen;
/// planned names without a score go to `missing`.
pub fn evaluate_raw_scores(
    credits: u32,
    raw_scores: &BTreeMap<String, f64>,
) -> Result<SubjectEvaluation, ConfigurationError> {
    let tier = CreditTier::try_from(credits)?;

    // First spelling of a name wins; later case variants are reported.
    let mut by_kind: BTreeMap<String, f64> = BTreeMap::new();
    let mut ignored = Vec::new();
    for (name, score) in raw_scores {
        let kind = name.trim().to_ascii_uppercase();
        let planned = scheme::plan(tier).iter().any(|r| r.kind == kind);
        let lab = tier.has_lab() && kind == scheme::LAB_KIND;
        if !(planned || lab) || by_kind.contains_key(&kind) {
            ignored.push(name.clone());
            continue;
        }
        by_kind.insert(kind, *score);
    }

    let mut missing = Vec::new();
    let mut records = Vec::new();
    for rule in scheme::plan(tier) {
        let record = match by_kind.get(rule.kind) {
            Some(raw) => AssessmentRecord::new(rule.kind, rule.max_raw, rule.weight_to, *raw),
            None => {
                missing.push(rule.kind.to_string());
                AssessmentRecord::unset(rule.kind, rule.max_raw, rule.weight_to)
            }
        };
        records.push(record);
    }

    let lab = match scheme::lab_max(tier) {
        Some(max) => match by_kind.get(scheme::LAB_KIND) {
            Some(score) => Some(LabScore { score: *score, max }),
            None => {
                missing.push(scheme::LAB_KIND.to_string());
                None
            }
        },
        None => None,
    };

    let assessments = records
        .iter()
        .map(|r| AssessmentBreakdown {
            kind: r.kind.clone(),
            max_raw: r.max_raw,
            weight_to: r.weight_to,
            score_raw: r.score_raw,
            score_weighted: r.rescaled().map(round_2dp),
        })
        .collect();

    let input = SubjectGradeInput::new(credits, records, lab)?;
    let normalized = normalize(&input);

    Ok(SubjectEvaluation {
        credits: tier,
        result: SubjectGradeResult::from_normalized(&normalized),
        conditions: normalized.conditions.clone(),
        missing,
        ignored,
        assessments,
        lab_percentage: normalized.lab_percentage,
    })
}
