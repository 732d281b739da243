use serde_json::Value;
use tracing::{debug, error, warn};

use crate::api::{Operation, Transport};
use crate::config::ClientConfig;
use crate::error::{NumlabError, NumlabResult};

/// Sends one payload to one operation. Shared by every domain client.
///
/// The response body is returned untouched. A failed call is logged exactly
/// once here and then handed back to the caller.
pub(crate) fn post_operation<T: Transport + ?Sized>(
    transport: &T,
    config: &ClientConfig,
    operation: Operation,
    payload: &Value,
) -> NumlabResult<Value> {
    let resource = operation.resource_path();
    if !operation.is_available_in(config.mode) {
        warn!(resource, mode = %config.mode, "operation rejected by client mode");
        return Err(NumlabError::UnsupportedOperation {
            operation: resource,
            mode: config.mode.as_str(),
        });
    }

    let url = config.endpoint(resource);
    debug!(resource, url = %url, "posting solver payload");
    match transport.post_json(resource, &url, payload) {
        Ok(body) => {
            debug!(resource, "solver responded");
            Ok(body)
        }
        Err(err) => {
            error!(resource, error = %err, "error posting data");
            Err(err)
        }
    }
}
