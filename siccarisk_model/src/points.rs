//! Point calculator: converts the three indicators into nomogram points.

use serde::{Deserialize, Serialize};

use crate::input::{ClinicalInput, PRO_GRP_MAX};

/// Points contributed by a positive dry mouth/eyes finding.
pub const DRY_MOUTH_EYES_POINTS: f64 = 20.0;

/// AU/mL of anti-SSA per point, capped at 100 points.
pub const ANTI_SSA_PER_POINT: f64 = 3.0;

/// Per-indicator point contributions plus their total.
///
/// In-range inputs give `dry` in {0, 20} and `anti_ssa`/`pro_grp` in
/// [0, 100], so `total` lands in [0, 220].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub dry: f64,
    pub anti_ssa: f64,
    pub pro_grp: f64,
    pub total: f64,
}

/// Convert one clinical input into its point breakdown.
///
/// ProGRP levels above 65 pg/mL drive that term negative; the nomogram
/// keeps the negative contribution rather than flooring it at zero, so an
/// out-of-slider-range level lowers the total.
pub fn compute_scores(input: &ClinicalInput) -> ScoreBreakdown {
    let dry = if input.dry_mouth_eyes {
        DRY_MOUTH_EYES_POINTS
    } else {
        0.0
    };
    let anti_ssa = (input.anti_ssa / ANTI_SSA_PER_POINT).min(100.0);
    let pro_grp = ((PRO_GRP_MAX - input.pro_grp) / PRO_GRP_MAX * 100.0).min(100.0);

    ScoreBreakdown {
        dry,
        anti_ssa,
        pro_grp,
        total: dry + anti_ssa + pro_grp,
    }
}
