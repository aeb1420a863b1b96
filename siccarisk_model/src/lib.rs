//! Thrombocytopenia risk estimation for primary Sjögren's syndrome (pSS).
//!
//! The model is a nomogram: three clinical indicators — dry mouth/eyes
//! symptoms, anti-SSA antibody level, and ProGRP concentration — are
//! converted into weighted point contributions ([`points`]), and the point
//! total is mapped to a probability through piecewise-linear interpolation
//! over a fixed anchor table ([`risk`]).
//!
//! Everything here is pure and synchronous: one [`ClinicalInput`] in, one
//! [`Evaluation`] out, no shared state between calls.

use serde::{Deserialize, Serialize};

pub mod input;
pub mod points;
pub mod risk;

pub use input::ClinicalInput;
pub use points::{compute_scores, ScoreBreakdown};
pub use risk::{score_to_risk, RiskResult, RiskStratum, RISK_ANCHORS};

/// A full evaluation of one clinical input: the point breakdown plus the
/// mapped risk.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub breakdown: ScoreBreakdown,
    pub risk: RiskResult,
}

/// Run the whole pipeline for one input.
pub fn evaluate(input: &ClinicalInput) -> Evaluation {
    let breakdown = points::compute_scores(input);
    let risk = RiskResult::from_score(breakdown.total);
    log::debug!(
        "evaluated input {input:?}: total {:.1} points, risk {:.3}",
        breakdown.total,
        risk.probability
    );
    Evaluation { breakdown, risk }
}
