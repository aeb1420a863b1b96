//! Risk mapper: piecewise-linear interpolation from point total to
//! thrombocytopenia probability.

use serde::{Deserialize, Serialize};

/// The nomogram's fixed `(point total, probability)` anchors, ascending in
/// both coordinates.
pub const RISK_ANCHORS: [(f64, f64); 5] = [
    (0.0, 0.1),
    (60.0, 0.3),
    (100.0, 0.5),
    (140.0, 0.7),
    (180.0, 0.9),
];

/// Map a point total to a probability of thrombocytopenia.
///
/// Interpolates linearly between adjacent anchors. Totals outside
/// `[0, 180]` extrapolate along the nearest boundary segment, so the
/// result can leave `[0, 1]`; clamping is left to the display layer.
pub fn score_to_risk(total: f64) -> f64 {
    let last = RISK_ANCHORS.len() - 2;
    let seg = RISK_ANCHORS
        .windows(2)
        .position(|w| total <= w[1].0)
        .unwrap_or(last);
    let (s0, r0) = RISK_ANCHORS[seg];
    let (s1, r1) = RISK_ANCHORS[seg + 1];
    r0 + (total - s0) / (s1 - s0) * (r1 - r0)
}

/// The mapped probability for one evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskResult {
    /// Raw probability, unclamped.
    pub probability: f64,
}

impl RiskResult {
    pub fn from_score(total: f64) -> Self {
        Self {
            probability: score_to_risk(total),
        }
    }

    /// Probability as a percentage, still unclamped.
    pub fn percent(&self) -> f64 {
        self.probability * 100.0
    }

    /// Fill fraction for a bounded gauge, clamped to `[0, 1]`.
    pub fn gauge_fraction(&self) -> f64 {
        self.probability.clamp(0.0, 1.0)
    }

    pub fn stratum(&self) -> RiskStratum {
        RiskStratum::for_probability(self.probability)
    }
}

/// Coarse risk band for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskStratum {
    Low,
    Moderate,
    High,
}

impl RiskStratum {
    pub fn for_probability(p: f64) -> Self {
        if p >= 0.7 {
            RiskStratum::High
        } else if p >= 0.3 {
            RiskStratum::Moderate
        } else {
            RiskStratum::Low
        }
    }
}

impl std::fmt::Display for RiskStratum {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskStratum::Low => write!(f, "low"),
            RiskStratum::Moderate => write!(f, "moderate"),
            RiskStratum::High => write!(f, "high"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn exact_at_every_anchor() {
        for (score, risk) in RISK_ANCHORS {
            assert_close(score_to_risk(score), risk);
        }
    }

    #[test]
    fn linear_between_anchors() {
        assert_close(score_to_risk(30.0), 0.2);
        assert_close(score_to_risk(80.0), 0.4);
        assert_close(score_to_risk(120.0), 0.6);
    }

    #[test]
    fn extrapolates_above_the_top_anchor() {
        // last segment's slope is 0.2 / 40 points
        assert_close(score_to_risk(200.0), 1.0);
        assert_close(score_to_risk(220.0), 1.1);
    }

    #[test]
    fn extrapolates_below_the_bottom_anchor() {
        // first segment's slope is 0.2 / 60 points
        assert_close(score_to_risk(-30.0), 0.0);
        assert_close(score_to_risk(-60.0), -0.1);
    }

    #[test]
    fn gauge_fraction_is_bounded_but_percent_is_raw() {
        let over = RiskResult::from_score(220.0);
        assert_close(over.probability, 1.1);
        assert_close(over.percent(), 110.0);
        assert_close(over.gauge_fraction(), 1.0);

        let under = RiskResult::from_score(-60.0);
        assert_close(under.gauge_fraction(), 0.0);
    }

    #[test]
    fn strata_split_at_point_three_and_point_seven() {
        assert_eq!(RiskStratum::for_probability(0.1), RiskStratum::Low);
        assert_eq!(RiskStratum::for_probability(0.3), RiskStratum::Moderate);
        assert_eq!(RiskStratum::for_probability(0.69), RiskStratum::Moderate);
        assert_eq!(RiskStratum::for_probability(0.7), RiskStratum::High);
    }
}
