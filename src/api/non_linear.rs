use serde_json::Value;

use crate::api::client::post_operation;
use crate::api::{Operation, ReqwestTransport, Transport};
use crate::config::ClientConfig;
use crate::error::NumlabResult;

/// Client for the root-finding endpoints.
#[derive(Debug, Clone)]
pub struct NonLinearEquationsClient<T = ReqwestTransport> {
    config: ClientConfig,
    transport: T,
}

impl<T: Transport> NonLinearEquationsClient<T> {
    #[must_use]
    pub fn new(config: ClientConfig, transport: T) -> Self {
        Self { config, transport }
    }

    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn post_fixed_point_data(&self, payload: &Value) -> NumlabResult<Value> {
        self.post(Operation::FixedPoint, payload)
    }

    pub fn post_newton_raphson_data(&self, payload: &Value) -> NumlabResult<Value> {
        self.post(Operation::NewtonRaphson, payload)
    }

    pub fn post_multiple_roots_data(&self, payload: &Value) -> NumlabResult<Value> {
        self.post(Operation::MultipleRoots, payload)
    }

    pub fn post_false_position_data(&self, payload: &Value) -> NumlabResult<Value> {
        self.post(Operation::FalsePosition, payload)
    }

    pub fn post_bisection_data(&self, payload: &Value) -> NumlabResult<Value> {
        self.post(Operation::Bisection, payload)
    }

    fn post(&self, operation: Operation, payload: &Value) -> NumlabResult<Value> {
        post_operation(&self.transport, &self.config, operation, payload)
    }
}
