use std::path::PathBuf;

use thiserror::Error;

/// Everything that can stop a scan.
///
/// Connect failures on individual probes are deliberately absent: a probe that
/// cannot connect is simply reported as closed.
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("no host/port pairs could be loaded")]
    EmptyProbeSet,

    #[error("host file '{}' could not be read: {source}", .path.display())]
    HostFileUnreadable {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("malformed port token '{token}': {reason}")]
    MalformedPortToken { token: String, reason: String },

    #[error("invalid CIDR block '{spec}': {reason}")]
    InvalidCidr { spec: String, reason: String },

    #[error("CIDR block '{spec}' holds {size} addresses, the limit is {max}")]
    CidrTooLarge { spec: String, size: u128, max: u128 },

    #[error("scan cancelled before completion")]
    Cancelled,

    #[error("scan task failed: {0}")]
    WorkerFailed(String),
}
