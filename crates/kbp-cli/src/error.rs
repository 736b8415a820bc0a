//! Errors surfaced by the command-line tool.

use kbp_client::ClientError;
use kbp_device::DeviceError;
use thiserror::Error;

/// Errors that end a `kbp` invocation.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config error: {0}")]
    Config(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Device(#[from] DeviceError),

    #[error(transparent)]
    Client(#[from] ClientError),
}
