use crate::error::ConfigurationError;
use serde::Serialize;

/// Credit weight of a subject. Selects which normalization rule applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "u32")]
pub enum CreditTier {
    Two,
    Four,
    Five,
}

impl CreditTier {
    pub const ALL: [CreditTier; 3] = [CreditTier::Two, CreditTier::Four, CreditTier::Five];

    pub fn credits(self) -> u32 {
        match self {
            CreditTier::Two => 2,
            CreditTier::Four => 4,
            CreditTier::Five => 5,
        }
    }

    /// Only the five-credit tier blends a lab score into the final mark.
    pub fn has_lab(self) -> bool {
        matches!(self, CreditTier::Five)
    }
}

impl TryFrom<u32> for CreditTier {
    type Error = ConfigurationError;

    fn try_from(credits: u32) -> Result<Self, Self::Error> {
        match credits {
            2 => Ok(CreditTier::Two),
            4 => Ok(CreditTier::Four),
            5 => Ok(CreditTier::Five),
            _ => Err(ConfigurationError::UnsupportedCredits { credits }),
        }
    }
}

impl From<CreditTier> for u32 {
    fn from(tier: CreditTier) -> u32 {
        tier.credits()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentRule {
    pub kind: &'static str,
    pub max_raw: f64,
    pub weight_to: f64,
}

const fn rule(kind: &'static str, max_raw: f64, weight_to: f64) -> AssessmentRule {
    AssessmentRule {
        kind,
        max_raw,
        weight_to,
    }
}

const TWO_CREDIT_PLAN: &[AssessmentRule] = &[
    rule("ISA1", 30.0, 25.0),
    rule("ISA2", 30.0, 25.0),
    rule("ESA", 50.0, 50.0),
];

// Four- and five-credit subjects share the theory plan.
const THEORY_PLAN: &[AssessmentRule] = &[
    rule("ISA1", 40.0, 20.0),
    rule("ISA2", 40.0, 20.0),
    rule("ESA", 100.0, 50.0),
    rule("A1", 10.0, 2.5),
    rule("A2", 10.0, 2.5),
    rule("A3", 10.0, 2.5),
    rule("A4", 10.0, 2.5),
];

pub const LAB_KIND: &str = "LAB";
pub const LAB_MAX: f64 = 20.0;

/// Theory assessments recorded for a subject of the given tier, in entry order.
pub fn plan(tier: CreditTier) -> &'static [AssessmentRule] {
    match tier {
        CreditTier::Two => TWO_CREDIT_PLAN,
        CreditTier::Four | CreditTier::Five => THEORY_PLAN,
    }
}

pub fn lab_max(tier: CreditTier) -> Option<f64> {
    tier.has_lab().then_some(LAB_MAX)
}
