//! Heuristic suitability scores for a security.
//!
//! Two formulas exist side by side. [`quick_score`] awards flat bonuses and is
//! shown in lists; [`detailed_score`] uses tiered thresholds and is shown on a
//! single security's detail view. They are not interchangeable and may
//! disagree on the same input.
use crate::core::security::Security;

pub const MAX_SCORE: u8 = 10;

/// Flat-bonus score in `[0, 10]`.
///
/// Each rule only contributes when its ratio is reported:
/// P/E in `(0, 20)` +2, ROE above 15% +3, debt/equity below 1 +3,
/// dividend yield above 1% +2.
pub fn quick_score(security: &Security) -> u8 {
    let mut score = 0;

    if security.pe_ratio.is_some_and(|pe| pe > 0.0 && pe < 20.0) {
        score += 2;
    }
    if security.return_on_equity.is_some_and(|roe| roe > 15.0) {
        score += 3;
    }
    if security.debt_to_equity.is_some_and(|de| de < 1.0) {
        score += 3;
    }
    if security.dividend_yield.is_some_and(|dy| dy > 1.0) {
        score += 2;
    }

    score.min(MAX_SCORE)
}

/// Tiered score in `[0, 10]`.
pub fn detailed_score(security: &Security) -> u8 {
    let pe_points = match security.pe_ratio {
        Some(pe) if pe > 0.0 && pe < 15.0 => 3,
        Some(pe) if (15.0..25.0).contains(&pe) => 2,
        Some(pe) if pe >= 25.0 => 1,
        _ => 0,
    };

    let roe_points = match security.return_on_equity {
        Some(roe) if roe > 20.0 => 3,
        Some(roe) if roe > 15.0 => 2,
        Some(roe) if roe > 10.0 => 1,
        _ => 0,
    };

    let debt_points = match security.debt_to_equity {
        Some(de) if de < 0.5 => 3,
        Some(de) if de < 1.0 => 2,
        Some(de) if de < 2.0 => 1,
        _ => 0,
    };

    let dividend_points = match security.dividend_yield {
        Some(dy) if dy > 3.0 => 2,
        Some(dy) if dy > 1.0 => 1,
        _ => 0,
    };

    (pe_points + roe_points + debt_points + dividend_points).min(MAX_SCORE)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    Strong,
    Moderate,
    Weak,
}

impl ScoreBand {
    pub fn from_score(score: u8) -> Self {
        match score {
            s if s >= 7 => ScoreBand::Strong,
            s if s >= 4 => ScoreBand::Moderate,
            _ => ScoreBand::Weak,
        }
    }

    /// Returns the verdict shown next to a score
    pub fn label(&self) -> &'static str {
        match self {
            ScoreBand::Strong => "Strong fit with value principles",
            ScoreBand::Moderate => "Moderate fit with value principles",
            ScoreBand::Weak => "Weak fit with value principles",
        }
    }
}
