use numlab::core::{SolverOutcome, sample_points, DataPoint};
use serde_json::json;

#[test]
fn reads_success_response() {
    let body = json!({
        "status": "success",
        "root": 1.41421,
        "iterations": [[0, 1.0, -1.0, 100], [1, 1.5, 0.25, 0.5], [2, 1.41667, 0.00694, 0.08333]],
        "error": null
    });
    let outcome = SolverOutcome::from_value(&body).expect("outcome");

    assert!(outcome.is_success());
    assert_eq!(outcome.root, Some(1.41421));
    assert_eq!(outcome.iterations.len(), 3);
    assert_eq!(outcome.iterations[1].iteration, 1);
    assert_eq!(outcome.iterations[1].f_x, 0.25);
    assert_eq!(
        outcome.convergence_points(),
        [
            DataPoint::new(0.0, 1.0),
            DataPoint::new(1.0, 1.5),
            DataPoint::new(2.0, 1.41667)
        ]
    );
    assert_eq!(outcome.error_points().len(), 3);
}

#[test]
fn reads_error_response_with_null_fields() {
    let body = json!({
        "status": "error",
        "root": null,
        "iterations": null,
        "error": {"code": "DERIVATIVE_ZERO", "message": "derivative is zero"}
    });
    let outcome = SolverOutcome::from_value(&body).expect("outcome");

    assert!(!outcome.is_success());
    assert!(outcome.root.is_none());
    assert!(outcome.iterations.is_empty());
    assert_eq!(outcome.error.expect("fault").code, "DERIVATIVE_ZERO");
}

#[test]
fn reads_bare_root_and_iterations() {
    let outcome = SolverOutcome::from_value(&json!({"root": 2.0, "iterations": [[0, 2.0, 0.0, 100]]}))
        .expect("outcome");
    assert!(outcome.is_success());
    assert!(outcome.status.is_none());
}

#[test]
fn malformed_rows_are_reported() {
    let err = SolverOutcome::from_value(&json!({"iterations": [[0, 1.0]]}))
        .expect_err("short row");
    assert!(matches!(err, numlab::NumlabError::InvalidData(_)));
}

#[test]
fn pairs_interpolation_samples() {
    let payload = json!({"method": "newton", "x_points": [0, 1, 2], "y_points": [1.0, 3.0]});
    let points = sample_points(&payload).expect("points");
    assert_eq!(points, [DataPoint::new(0.0, 1.0), DataPoint::new(1.0, 3.0)]);

    assert!(sample_points(&json!({"x_points": [0, "a"], "y_points": [1]})).is_err());
    assert!(sample_points(&json!({"y_points": [1]})).is_err());
}
