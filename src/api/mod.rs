//! REST clients for the solver backend.
//!
//! One stateless client per problem domain. Each method POSTs a JSON payload
//! to `<api_url><resource>` and returns the decoded body without looking at
//! its shape. Failures are logged once and propagated.

mod client;
mod interpolation;
mod non_linear;
mod operation;
pub mod payloads;
mod systems;
mod transport;

use std::sync::Arc;

use serde_json::Value;

pub use interpolation::InterpolationClient;
pub use non_linear::NonLinearEquationsClient;
pub use operation::{ApiMode, Operation};
pub use payloads::SolverRequest;
pub use systems::SystemsEquationsClient;
pub use transport::{ReqwestTransport, Transport};

use crate::config::ClientConfig;
use crate::error::NumlabResult;

/// The three domain clients, built once at startup around one shared transport.
#[derive(Debug)]
pub struct ApiClients<T = ReqwestTransport> {
    pub non_linear: NonLinearEquationsClient<Arc<T>>,
    pub interpolation: InterpolationClient<Arc<T>>,
    pub systems: SystemsEquationsClient<Arc<T>>,
}

impl ApiClients<ReqwestTransport> {
    pub fn from_config(config: ClientConfig) -> NumlabResult<Self> {
        Ok(Self::with_transport(config, ReqwestTransport::new()?))
    }
}

impl<T: Transport> ApiClients<T> {
    #[must_use]
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        let transport = Arc::new(transport);
        Self {
            non_linear: NonLinearEquationsClient::new(config.clone(), Arc::clone(&transport)),
            interpolation: InterpolationClient::new(config.clone(), Arc::clone(&transport)),
            systems: SystemsEquationsClient::new(config, transport),
        }
    }

    /// Routes an untyped payload to the client method owning `operation`.
    pub fn submit(&self, operation: Operation, payload: &Value) -> NumlabResult<Value> {
        match operation {
            Operation::FixedPoint => self.non_linear.post_fixed_point_data(payload),
            Operation::NewtonRaphson => self.non_linear.post_newton_raphson_data(payload),
            Operation::MultipleRoots => self.non_linear.post_multiple_roots_data(payload),
            Operation::FalsePosition => self.non_linear.post_false_position_data(payload),
            Operation::Bisection => self.non_linear.post_bisection_data(payload),
            Operation::Interpolation => self.interpolation.post_interpolations_data(payload),
            Operation::SystemsEquations => self.systems.post_systems_equations_data(payload),
        }
    }

    /// Serializes a typed request and submits it to its operation.
    pub fn send<R: SolverRequest>(&self, request: &R) -> NumlabResult<Value> {
        self.submit(R::OPERATION, &request.to_json()?)
    }
}
