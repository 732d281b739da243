//! Typed request bodies matching the solver's input models.
//!
//! Views may keep building untyped `serde_json::Value` forms; these types are
//! an optional, checked way to produce the same JSON.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::Operation;
use crate::core::ExpressionSanitizer;
use crate::error::{NumlabError, NumlabResult};

/// How the solver measures the stopping error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorType {
    Absolute,
    Relative,
}

/// A typed request body bound to one backend operation.
pub trait SolverRequest: Serialize {
    const OPERATION: Operation;

    /// Returns a copy with every function expression run through `sanitizer`.
    #[must_use]
    fn sanitized(&self, sanitizer: &ExpressionSanitizer) -> Self
    where
        Self: Sized;

    fn to_json(&self) -> NumlabResult<Value> {
        serde_json::to_value(self).map_err(|e| {
            NumlabError::InvalidData(format!(
                "failed to serialize `{}` payload: {e}",
                Self::OPERATION
            ))
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixedPointRequest {
    pub initial_guess: f64,
    pub tolerance: f64,
    pub max_iterations: u32,
    pub function_expression: String,
    pub g_expression: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_type: Option<ErrorType>,
}

/// Shared shape of Newton-Raphson and multiple-roots requests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenMethodRequest {
    pub initial_guess: f64,
    pub tolerance: f64,
    pub max_iterations: u32,
    pub function_expression: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_type: Option<ErrorType>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NewtonRaphsonRequest(pub OpenMethodRequest);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MultipleRootsRequest(pub OpenMethodRequest);

/// Shared shape of the bracketing methods (false position, bisection).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BracketRequest {
    pub left_bound: f64,
    pub right_bound: f64,
    pub tolerance: f64,
    pub max_iterations: u32,
    pub function_expression: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_type: Option<ErrorType>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FalsePositionRequest(pub BracketRequest);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BisectionRequest(pub BracketRequest);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterpolationMethod {
    Newton,
    Spline,
    Vandermonde,
    Lagrange,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterpolationRequest {
    pub method: InterpolationMethod,
    pub x_points: Vec<f64>,
    pub y_points: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub degree: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SystemsMethod {
    Sor,
    GaussSeidel,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemsEquationsRequest {
    pub method: SystemsMethod,
    #[serde(rename = "matrix_A")]
    pub matrix_a: Vec<Vec<f64>>,
    pub solution_vector: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_guess: Option<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub omega: Option<f64>,
    pub tolerance: f64,
    pub max_iterations: u32,
    pub error_type: ErrorType,
}

impl SolverRequest for FixedPointRequest {
    const OPERATION: Operation = Operation::FixedPoint;

    fn sanitized(&self, sanitizer: &ExpressionSanitizer) -> Self {
        Self {
            function_expression: sanitizer.sanitize(&self.function_expression),
            g_expression: sanitizer.sanitize(&self.g_expression),
            ..self.clone()
        }
    }
}

impl OpenMethodRequest {
    fn sanitized(&self, sanitizer: &ExpressionSanitizer) -> Self {
        Self {
            function_expression: sanitizer.sanitize(&self.function_expression),
            ..self.clone()
        }
    }
}

impl BracketRequest {
    fn sanitized(&self, sanitizer: &ExpressionSanitizer) -> Self {
        Self {
            function_expression: sanitizer.sanitize(&self.function_expression),
            ..self.clone()
        }
    }
}

impl SolverRequest for NewtonRaphsonRequest {
    const OPERATION: Operation = Operation::NewtonRaphson;

    fn sanitized(&self, sanitizer: &ExpressionSanitizer) -> Self {
        Self(self.0.sanitized(sanitizer))
    }
}

impl SolverRequest for MultipleRootsRequest {
    const OPERATION: Operation = Operation::MultipleRoots;

    fn sanitized(&self, sanitizer: &ExpressionSanitizer) -> Self {
        Self(self.0.sanitized(sanitizer))
    }
}

impl SolverRequest for FalsePositionRequest {
    const OPERATION: Operation = Operation::FalsePosition;

    fn sanitized(&self, sanitizer: &ExpressionSanitizer) -> Self {
        Self(self.0.sanitized(sanitizer))
    }
}

impl SolverRequest for BisectionRequest {
    const OPERATION: Operation = Operation::Bisection;

    fn sanitized(&self, sanitizer: &ExpressionSanitizer) -> Self {
        Self(self.0.sanitized(sanitizer))
    }
}

impl SolverRequest for InterpolationRequest {
    const OPERATION: Operation = Operation::Interpolation;

    fn sanitized(&self, _sanitizer: &ExpressionSanitizer) -> Self {
        self.clone()
    }
}

impl SolverRequest for SystemsEquationsRequest {
    const OPERATION: Operation = Operation::SystemsEquations;

    fn sanitized(&self, _sanitizer: &ExpressionSanitizer) -> Self {
        self.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn systems_request_uses_backend_field_names() {
        let request = SystemsEquationsRequest {
            method: SystemsMethod::GaussSeidel,
            matrix_a: vec![vec![4.0, 1.0], vec![2.0, 3.0]],
            solution_vector: vec![1.0, 2.0],
            initial_guess: None,
            omega: None,
            tolerance: 1e-6,
            max_iterations: 50,
            error_type: ErrorType::Absolute,
        };
        let value = request.to_json().expect("json");
        assert_eq!(
            value,
            json!({
                "method": "gauss_seidel",
                "matrix_A": [[4.0, 1.0], [2.0, 3.0]],
                "solution_vector": [1.0, 2.0],
                "tolerance": 1e-6,
                "max_iterations": 50,
                "error_type": "absolute",
            })
        );
    }

    #[test]
    fn newtype_requests_serialize_flat() {
        let request = BisectionRequest(BracketRequest {
            left_bound: 0.0,
            right_bound: 2.0,
            tolerance: 1e-7,
            max_iterations: 100,
            function_expression: "x**2 - 2".to_owned(),
            error_type: Some(ErrorType::Relative),
        });
        let value = request.to_json().expect("json");
        assert_eq!(value["left_bound"], json!(0.0));
        assert_eq!(value["error_type"], json!("relative"));
        assert!(value.get("0").is_none());
    }

    #[test]
    fn sanitized_rewrites_only_expressions() {
        let request = FixedPointRequest {
            initial_guess: 1.5,
            tolerance: 1e-5,
            max_iterations: 40,
            function_expression: "x**3 - 2x".to_owned(),
            g_expression: "(2x)**(1/3)".to_owned(),
            error_type: None,
        };
        let clean = request.sanitized(&ExpressionSanitizer::default());
        assert_eq!(clean.function_expression, "x^3 - 2*x");
        assert_eq!(clean.g_expression, "(2*x)^(1/3)");
        assert_eq!(clean.initial_guess, 1.5);
        assert_eq!(clean.max_iterations, 40);
    }
}
