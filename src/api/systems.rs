use serde_json::Value;

use crate::api::client::post_operation;
use crate::api::{Operation, ReqwestTransport, Transport};
use crate::config::ClientConfig;
use crate::error::NumlabResult;

#[derive(Debug, Clone)]
pub struct SystemsEquationsClient<T = ReqwestTransport> {
    config: ClientConfig,
    transport: T,
}

impl<T: Transport> SystemsEquationsClient<T> {
    #[must_use]
    pub fn new(config: ClientConfig, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn post_systems_equations_data(&self, payload: &Value) -> NumlabResult<Value> {
        post_operation(
            &self.transport,
            &self.config,
            Operation::SystemsEquations,
            payload,
        )
    }
}
