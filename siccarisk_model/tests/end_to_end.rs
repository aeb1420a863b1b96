use pretty_assertions::assert_eq;
use siccarisk_model::{evaluate, ClinicalInput, RiskStratum};

fn assert_close(actual: f64, expected: f64, tol: f64) {
    assert!(
        (actual - expected).abs() < tol,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn reference_case_symptomatic_midrange_labs() {
    // dry mouth/eyes present, anti-SSA 150 AU/mL, ProGRP 30 pg/mL
    let input = ClinicalInput::new(true, 150.0, 30.0);
    let eval = evaluate(&input);

    assert_close(eval.breakdown.dry, 20.0, 1e-9);
    assert_close(eval.breakdown.anti_ssa, 50.0, 1e-9);
    assert_close(eval.breakdown.pro_grp, 53.846, 1e-3);
    assert_close(eval.breakdown.total, 123.846, 1e-3);

    // total sits between the 100 and 140 point anchors (0.5 and 0.7)
    assert_close(eval.risk.probability, 0.619, 1e-3);
    assert!(eval.risk.probability > 0.5 && eval.risk.probability < 0.7);
    assert_eq!(eval.risk.stratum(), RiskStratum::Moderate);
}

#[test]
fn form_defaults_evaluate_to_moderate_risk() {
    let eval = evaluate(&ClinicalInput::default());

    // defaults differ from the reference case only by the dry finding
    let symptomatic = evaluate(&ClinicalInput::new(true, 150.0, 30.0));
    assert_close(
        symptomatic.breakdown.total - eval.breakdown.total,
        20.0,
        1e-9,
    );
    assert_eq!(eval.risk.stratum(), RiskStratum::Moderate);
}

#[test]
fn all_indicators_maxed_exceeds_certainty() {
    // 20 + 100 + 100 = 220 points, past the last anchor
    let eval = evaluate(&ClinicalInput::new(true, 300.0, 0.0));
    assert_close(eval.breakdown.total, 220.0, 1e-9);
    assert_close(eval.risk.probability, 1.1, 1e-9);
    // the numeric probability stays raw; only the gauge is bounded
    assert_close(eval.risk.gauge_fraction(), 1.0, 1e-9);
}

#[test]
fn evaluation_serializes_with_stable_field_names() {
    let eval = evaluate(&ClinicalInput::new(false, 60.0, 65.0));
    let json = serde_json::to_value(eval).unwrap();
    assert_eq!(json["breakdown"]["anti_ssa"], 20.0);
    assert_eq!(json["breakdown"]["pro_grp"], 0.0);
    assert_eq!(json["breakdown"]["total"], 20.0);
    let p = json["risk"]["probability"].as_f64().unwrap();
    assert!((p - (0.1 + 20.0 / 60.0 * 0.2)).abs() < 1e-9);
}
