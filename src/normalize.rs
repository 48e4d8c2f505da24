//! Assessment normalization: raw marks for one subject in, a 0–100 score out.
//!
//! The function is total. Out-of-range marks are clamped, and degenerate inputs
//! (nothing recorded yet, zero weight, a missing lab score) produce a defined
//! score flagged as partial instead of an error. The only failure is an
//! unsupported credit tier, which is rejected when the input is built.

use crate::error::ConfigurationError;
use crate::scheme::CreditTier;
use serde::{Deserialize, Serialize};

pub const THEORY_SHARE: f64 = 0.80;
pub const LAB_SHARE: f64 = 0.20;

/// One graded component of a subject. `kind` is opaque to the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentRecord {
    pub kind: String,
    pub max_raw: f64,
    pub weight_to: f64,
    /// `None` while the mark has not been entered.
    #[serde(default)]
    pub score_raw: Option<f64>,
}

impl AssessmentRecord {
    pub fn new(kind: impl Into<String>, max_raw: f64, weight_to: f64, score_raw: f64) -> Self {
        Self {
            kind: kind.into(),
            max_raw,
            weight_to,
            score_raw: Some(score_raw),
        }
    }

    pub fn unset(kind: impl Into<String>, max_raw: f64, weight_to: f64) -> Self {
        Self {
            kind: kind.into(),
            max_raw,
            weight_to,
            score_raw: None,
        }
    }

    /// Raw mark rescaled onto `weight_to`. `None` when the mark is unset or the
    /// maximum is unusable.
    pub fn rescaled(&self) -> Option<f64> {
        let raw = self.score_raw?;
        if !valid_maximum(self.max_raw) {
            return None;
        }
        Some(clamp_raw(raw, self.max_raw) / self.max_raw * effective_weight(self.weight_to))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabScore {
    pub score: f64,
    pub max: f64,
}

/// Normalizer input. Lab fields only exist on the five-credit variant.
#[derive(Debug, Clone, PartialEq)]
pub enum SubjectGradeInput {
    /// Two- and four-credit subjects: a flat rescale-and-sum over every assessment.
    TwoOrFour {
        tier: CreditTier,
        assessments: Vec<AssessmentRecord>,
    },
    /// Five-credit subjects: theory blended 80/20 with a separately supplied lab score.
    Five {
        theory: Vec<AssessmentRecord>,
        lab: Option<LabScore>,
    },
}

impl SubjectGradeInput {
    /// Validates the credit tier. A lab score passed for a two- or four-credit
    /// subject is dropped.
    pub fn new(
        credits: u32,
        assessments: Vec<AssessmentRecord>,
        lab: Option<LabScore>,
    ) -> Result<Self, ConfigurationError> {
        let tier = CreditTier::try_from(credits)?;
        Ok(match tier {
            CreditTier::Five => SubjectGradeInput::Five {
                theory: assessments,
                lab,
            },
            CreditTier::Two | CreditTier::Four => SubjectGradeInput::TwoOrFour { tier, assessments },
        })
    }

    pub fn tier(&self) -> CreditTier {
        match self {
            SubjectGradeInput::TwoOrFour { tier, .. } => *tier,
            SubjectGradeInput::Five { .. } => CreditTier::Five,
        }
    }
}

/// Why a normalized score is provisional.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum PartialReason {
    NoAssessments,
    ZeroTotalWeight,
    InvalidMaximum,
    UnsetAssessment,
    MissingLabInput,
    InvalidLabMaximum,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedScore {
    pub final_score_100: f64,
    pub partial: bool,
    pub conditions: Vec<PartialReason>,
    pub theory_percentage: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lab_percentage: Option<f64>,
}

impl NormalizedScore {
    pub fn has(&self, reason: PartialReason) -> bool {
        self.conditions.contains(&reason)
    }
}

pub fn normalize(input: &SubjectGradeInput) -> NormalizedScore {
    let mut conditions = Vec::new();
    match input {
        SubjectGradeInput::TwoOrFour { assessments, .. } => {
            let pct = weighted_percentage(assessments, &mut conditions);
            finish(pct, pct, None, conditions)
        }
        SubjectGradeInput::Five { theory, lab } => {
            let theory_pct = weighted_percentage(theory, &mut conditions);
            let lab_pct = lab_percentage(lab.as_ref(), &mut conditions);
            let blended = theory_pct * THEORY_SHARE + lab_pct * LAB_SHARE;
            finish(blended, theory_pct, Some(lab_pct), conditions)
        }
    }
}

fn finish(
    score: f64,
    theory_percentage: f64,
    lab_percentage: Option<f64>,
    conditions: Vec<PartialReason>,
) -> NormalizedScore {
    NormalizedScore {
        final_score_100: clamp_0_100(score),
        partial: !conditions.is_empty(),
        conditions,
        theory_percentage,
        lab_percentage,
    }
}

/// Σ(raw/max × weight) / Σ weight × 100. Unset marks contribute 0 but keep
/// their weight.
fn weighted_percentage(assessments: &[AssessmentRecord], conditions: &mut Vec<PartialReason>) -> f64 {
    if assessments.is_empty() {
        note(conditions, PartialReason::NoAssessments);
        return 0.0;
    }
    if assessments.iter().any(|a| !valid_maximum(a.max_raw)) {
        note(conditions, PartialReason::InvalidMaximum);
        return 0.0;
    }
    let total_weight: f64 = assessments.iter().map(|a| effective_weight(a.weight_to)).sum();
    if total_weight <= 0.0 {
        note(conditions, PartialReason::ZeroTotalWeight);
        return 0.0;
    }

    let mut earned = 0.0;
    for a in assessments {
        match a.rescaled() {
            Some(points) => earned += points,
            None => note(conditions, PartialReason::UnsetAssessment),
        }
    }
    clamp_0_100(earned / total_weight * 100.0)
}

fn lab_percentage(lab: Option<&LabScore>, conditions: &mut Vec<PartialReason>) -> f64 {
    let Some(lab) = lab else {
        note(conditions, PartialReason::MissingLabInput);
        return 0.0;
    };
    if !valid_maximum(lab.max) {
        note(conditions, PartialReason::InvalidLabMaximum);
        return 0.0;
    }
    clamp_0_100(clamp_raw(lab.score, lab.max) / lab.max * 100.0)
}

fn note(conditions: &mut Vec<PartialReason>, reason: PartialReason) {
    if !conditions.contains(&reason) {
        conditions.push(reason);
    }
}

fn valid_maximum(max: f64) -> bool {
    max.is_finite() && max > 0.0
}

fn effective_weight(weight: f64) -> f64 {
    if weight.is_finite() && weight > 0.0 {
        weight
    } else {
        0.0
    }
}

/// `max` must already be finite and positive.
fn clamp_raw(raw: f64, max: f64) -> f64 {
    if raw.is_nan() {
        0.0
    } else {
        raw.clamp(0.0, max)
    }
}

pub fn clamp_0_100(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 100.0)
    }
}
