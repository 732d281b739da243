use std::path::PathBuf;

use thiserror::Error;

pub type NumlabResult<T> = Result<T, NumlabError>;

#[derive(Debug, Error)]
pub enum NumlabError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("request to `{resource}` failed: {message}")]
    Transport { resource: String, message: String },

    #[error("request to `{resource}` returned status {status}: {body}")]
    HttpStatus {
        resource: String,
        status: u16,
        body: String,
    },

    #[error("response from `{resource}` is not valid json: {message}")]
    Decode { resource: String, message: String },

    #[error("operation `{operation}` is not available in {mode} mode")]
    UnsupportedOperation {
        operation: &'static str,
        mode: &'static str,
    },

    #[error("drawing context unavailable: {0}")]
    ContextUnavailable(String),

    #[error("i/o failure on `{}`: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl NumlabError {
    /// Backend resource path the error refers to, when it came from an API call.
    #[must_use]
    pub fn resource(&self) -> Option<&str> {
        match self {
            Self::Transport { resource, .. }
            | Self::HttpStatus { resource, .. }
            | Self::Decode { resource, .. } => Some(resource),
            _ => None,
        }
    }
}
