//! Clinical input for one evaluation.

use serde::{Deserialize, Serialize};

/// Upper slider bound for the anti-SSA antibody level, in AU/mL.
pub const ANTI_SSA_MAX: f64 = 300.0;

/// Upper slider bound for the ProGRP concentration, in pg/mL.
pub const PRO_GRP_MAX: f64 = 65.0;

/// The three predictive indicators entered on the form.
///
/// Transient: built once per evaluation and never stored. The scoring
/// functions accept any finite values; [`ClinicalInput::clamped`] applies
/// the form's slider bounds for callers that want that behavior.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClinicalInput {
    /// Whether dry mouth/eyes symptoms are present.
    pub dry_mouth_eyes: bool,
    /// Anti-SSA antibody level, AU/mL.
    pub anti_ssa: f64,
    /// Pro-gastrin-releasing peptide concentration, pg/mL.
    pub pro_grp: f64,
}

impl ClinicalInput {
    pub fn new(dry_mouth_eyes: bool, anti_ssa: f64, pro_grp: f64) -> Self {
        Self {
            dry_mouth_eyes,
            anti_ssa,
            pro_grp,
        }
    }

    /// Copy of this input with both numeric indicators clamped to the
    /// slider ranges `[0, 300]` and `[0, 65]`.
    pub fn clamped(&self) -> Self {
        Self {
            dry_mouth_eyes: self.dry_mouth_eyes,
            anti_ssa: self.anti_ssa.clamp(0.0, ANTI_SSA_MAX),
            pro_grp: self.pro_grp.clamp(0.0, PRO_GRP_MAX),
        }
    }
}

impl Default for ClinicalInput {
    /// The form's initial state: no symptoms, anti-SSA 150 AU/mL,
    /// ProGRP 30 pg/mL.
    fn default() -> Self {
        Self::new(false, 150.0, 30.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamped_restricts_to_slider_ranges() {
        let input = ClinicalInput::new(true, 450.0, -3.0);
        let clamped = input.clamped();
        assert_eq!(clamped.anti_ssa, ANTI_SSA_MAX);
        assert_eq!(clamped.pro_grp, 0.0);
        assert!(clamped.dry_mouth_eyes);
    }

    #[test]
    fn clamped_leaves_in_range_values_alone() {
        let input = ClinicalInput::new(false, 120.5, 12.0);
        assert_eq!(input.clamped(), input);
    }
}
