use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::DataPoint;
use crate::error::{NumlabError, NumlabResult};

/// One row of a solver iteration table: `[n, x, f(x), error]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "(u64, f64, f64, f64)", into = "(u64, f64, f64, f64)")]
pub struct IterationRecord {
    pub iteration: u64,
    pub x: f64,
    pub f_x: f64,
    pub error: f64,
}

impl From<(u64, f64, f64, f64)> for IterationRecord {
    fn from((iteration, x, f_x, error): (u64, f64, f64, f64)) -> Self {
        Self {
            iteration,
            x,
            f_x,
            error,
        }
    }
}

impl From<IterationRecord> for (u64, f64, f64, f64) {
    fn from(record: IterationRecord) -> Self {
        (record.iteration, record.x, record.f_x, record.error)
    }
}

/// Error object reported by the solver inside an otherwise successful response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolverFault {
    pub code: String,
    pub message: String,
}

/// Read-only view over a root-finding response.
///
/// This is a convenience for chart consumers; API clients never decode
/// through it and always hand back the raw body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolverOutcome {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub root: Option<f64>,
    #[serde(default)]
    pub iterations: Vec<IterationRecord>,
    #[serde(default)]
    pub error: Option<SolverFault>,
}

impl SolverOutcome {
    pub fn from_value(value: &Value) -> NumlabResult<Self> {
        // `iterations: null` is how error responses look.
        let mut value = value.clone();
        if let Some(iterations) = value.get_mut("iterations") {
            if iterations.is_null() {
                *iterations = Value::Array(Vec::new());
            }
        }
        serde_json::from_value(value).map_err(|e| {
            NumlabError::InvalidData(format!("failed to read solver outcome: {e}"))
        })
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.error.is_none() && self.status.as_deref() != Some("error")
    }

    /// `(iteration, x)` pairs, one per table row, in response order.
    #[must_use]
    pub fn convergence_points(&self) -> Vec<DataPoint> {
        self.iterations
            .iter()
            .map(|record| DataPoint::new(record.iteration as f64, record.x))
            .collect()
    }

    /// `(iteration, error)` pairs, skipping the non-finite rows some
    /// methods emit before the first error estimate exists.
    #[must_use]
    pub fn error_points(&self) -> Vec<DataPoint> {
        self.iterations
            .iter()
            .map(|record| DataPoint::new(record.iteration as f64, record.error))
            .filter(|point| point.is_finite())
            .collect()
    }
}

/// Pairs `x_points` with `y_points` from an interpolation request body.
///
/// Extra trailing values on the longer side are ignored.
pub fn sample_points(payload: &Value) -> NumlabResult<Vec<DataPoint>> {
    let xs = numeric_array(payload, "x_points")?;
    let ys = numeric_array(payload, "y_points")?;
    Ok(xs
        .into_iter()
        .zip(ys)
        .map(|(x, y)| DataPoint::new(x, y))
        .collect())
}

fn numeric_array(payload: &Value, field: &str) -> NumlabResult<Vec<f64>> {
    let Some(items) = payload.get(field).and_then(Value::as_array) else {
        return Err(NumlabError::InvalidData(format!(
            "`{field}` must be an array of numbers"
        )));
    };
    items
        .iter()
        .map(|item| {
            item.as_f64().ok_or_else(|| {
                NumlabError::InvalidData(format!("`{field}` contains a non-numeric value: {item}"))
            })
        })
        .collect()
}
