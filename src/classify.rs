use crate::normalize::clamp_0_100;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum LetterGrade {
    S,
    A,
    B,
    C,
    D,
    E,
    F,
}

impl LetterGrade {
    pub fn as_str(self) -> &'static str {
        match self {
            LetterGrade::S => "S",
            LetterGrade::A => "A",
            LetterGrade::B => "B",
            LetterGrade::C => "C",
            LetterGrade::D => "D",
            LetterGrade::E => "E",
            LetterGrade::F => "F",
        }
    }
}

impl fmt::Display for LetterGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeBand {
    pub lower: u8,
    pub upper: u8,
    pub letter: LetterGrade,
    pub point: u8,
}

const fn band(lower: u8, upper: u8, letter: LetterGrade, point: u8) -> GradeBand {
    GradeBand {
        lower,
        upper,
        letter,
        point,
    }
}

/// Grading policy, highest band first. Bounds are inclusive and cover 0..=100
/// with no gaps or overlaps.
pub const GRADE_BANDS: [GradeBand; 7] = [
    band(90, 100, LetterGrade::S, 10),
    band(80, 89, LetterGrade::A, 9),
    band(70, 79, LetterGrade::B, 8),
    band(60, 69, LetterGrade::C, 7),
    band(50, 59, LetterGrade::D, 6),
    band(40, 49, LetterGrade::E, 5),
    band(0, 39, LetterGrade::F, 4),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Classification {
    pub letter_grade: LetterGrade,
    pub grade_point: u8,
    pub rounded_score: u8,
}

// Marks are short decimals. Binary drift below 1e-6 is removed before the
// half check so a total of exactly 56.5 does not land on 56.49999999999999.
const SNAP: f64 = 1e6;

/// Round half up: `Int(x + 0.5)`, after snapping `x` to six decimals.
pub fn round_half_up(x: f64) -> f64 {
    let snapped = (x * SNAP).round() / SNAP;
    (snapped + 0.5).floor()
}

pub fn band_for(rounded: u8) -> GradeBand {
    GRADE_BANDS
        .iter()
        .copied()
        .find(|b| b.lower <= rounded && rounded <= b.upper)
        .unwrap_or(GRADE_BANDS[GRADE_BANDS.len() - 1])
}

pub fn classify(final_score_100: f64) -> Classification {
    let rounded = round_half_up(clamp_0_100(final_score_100)) as u8;
    let b = band_for(rounded);
    Classification {
        letter_grade: b.letter,
        grade_point: b.point,
        rounded_score: rounded,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_integer_score_hits_exactly_one_band() {
        for score in 0u8..=100 {
            let hits = GRADE_BANDS
                .iter()
                .filter(|b| b.lower <= score && score <= b.upper)
                .count();
            assert_eq!(hits, 1, "score {score} matched {hits} bands");
        }
    }

    #[test]
    fn bands_are_contiguous_and_descending() {
        assert_eq!(GRADE_BANDS[0].upper, 100);
        assert_eq!(GRADE_BANDS[GRADE_BANDS.len() - 1].lower, 0);
        for pair in GRADE_BANDS.windows(2) {
            assert_eq!(pair[1].upper + 1, pair[0].lower);
            assert_eq!(pair[1].point + 1, pair[0].point);
        }
    }

    #[test]
    fn band_edges() {
        let cases = [
            (100.0, LetterGrade::S, 10),
            (90.0, LetterGrade::S, 10),
            (89.0, LetterGrade::A, 9),
            (80.0, LetterGrade::A, 9),
            (79.0, LetterGrade::B, 8),
            (70.0, LetterGrade::B, 8),
            (69.0, LetterGrade::C, 7),
            (60.0, LetterGrade::C, 7),
            (59.0, LetterGrade::D, 6),
            (50.0, LetterGrade::D, 6),
            (49.0, LetterGrade::E, 5),
            (40.0, LetterGrade::E, 5),
            (39.0, LetterGrade::F, 4),
            (0.0, LetterGrade::F, 4),
        ];
        for (score, letter, point) in cases {
            let c = classify(score);
            assert_eq!((c.letter_grade, c.grade_point), (letter, point), "score {score}");
        }
    }

    #[test]
    fn rounds_half_up_before_banding() {
        assert_eq!(classify(89.5).letter_grade, LetterGrade::S);
        assert_eq!(classify(89.49).letter_grade, LetterGrade::A);
        assert_eq!(classify(39.5).letter_grade, LetterGrade::E);
        assert_eq!(classify(39.4).rounded_score, 39);
    }

    #[test]
    fn decimal_halves_round_up_despite_drift() {
        assert_eq!(classify(56.49999999999999).rounded_score, 57);
        assert_eq!(classify(89.49999999999999).letter_grade, LetterGrade::S);
        assert_eq!(classify(89.4999).letter_grade, LetterGrade::A);
        assert_eq!(round_half_up(0.285 * 100.0), 29.0);
    }

    #[test]
    fn clamps_out_of_range_scores() {
        assert_eq!(classify(140.0).letter_grade, LetterGrade::S);
        assert_eq!(classify(140.0).rounded_score, 100);
        assert_eq!(classify(-12.0).letter_grade, LetterGrade::F);
        assert_eq!(classify(f64::NAN).grade_point, 4);
    }

    #[test]
    fn round_half_up_matches_int_plus_half() {
        assert_eq!(round_half_up(0.0), 0.0);
        assert_eq!(round_half_up(2.5), 3.0);
        assert_eq!(round_half_up(2.49), 2.0);
        assert_eq!(round_half_up(99.5), 100.0);
    }
}
