//! # Host Specification
//!
//! Resolves the host half of a scan. A host spec is one of, in the order the
//! checks are made:
//! * A path to an existing file listing one host per line.
//! * A CIDR block (e.g., `10.0.0.0/24`), detected by the `/`.
//! * A literal hostname or IP address.
//!
//! Hosts are returned in the order they were found and never deduplicated.

use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::ScanError;
use crate::network::range;

/// A classified host specification.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HostSpec {
    /// Nothing to scan.
    Empty,
    /// A file with one host per line.
    File { path: PathBuf },
    /// A CIDR block, enumerated address by address.
    Cidr { block: String },
    /// A single hostname or IP address.
    Literal { host: String },
}

impl HostSpec {
    /// Classifies `spec`. The file check touches the filesystem.
    pub fn detect(spec: &str) -> Self {
        let spec = spec.trim();

        if spec.is_empty() {
            return HostSpec::Empty;
        }

        if is_regular_file(spec) {
            return HostSpec::File {
                path: PathBuf::from(spec),
            };
        }

        if spec.contains('/') {
            return HostSpec::Cidr {
                block: spec.to_string(),
            };
        }

        HostSpec::Literal {
            host: spec.to_string(),
        }
    }

    /// Produces the ordered list of hosts this spec stands for.
    pub fn hosts(&self) -> Result<Vec<String>, ScanError> {
        let hosts: Vec<String> = match self {
            HostSpec::Empty => Vec::new(),
            HostSpec::File { path } => read_host_file(path)?,
            HostSpec::Cidr { block } => range::explode_cidr(block)?
                .into_iter()
                .map(|ip| ip.to_string())
                .collect(),
            HostSpec::Literal { host } => vec![host.clone()],
        };

        debug!("Host spec {:?} expanded to {} hosts", self, hosts.len());
        Ok(hosts)
    }
}

/// Expands a host spec string into its hosts.
pub fn expand(host_spec: &str) -> Result<Vec<String>, ScanError> {
    HostSpec::detect(host_spec).hosts()
}

fn is_regular_file(spec: &str) -> bool {
    fs::metadata(spec).is_ok_and(|meta| meta.is_file())
}

/// Reads one host per line, trimming surrounding spaces.
///
/// Empty lines are kept: they end up as probes that fail to resolve.
fn read_host_file(path: &Path) -> Result<Vec<String>, ScanError> {
    let unreadable = |source: std::io::Error| ScanError::HostFileUnreadable {
        path: path.to_path_buf(),
        source,
    };

    let file: File = File::open(path).map_err(unreadable)?;

    BufReader::new(file)
        .lines()
        .map(|line| line.map(|l| l.trim_matches(' ').to_string()))
        .collect::<Result<Vec<String>, _>>()
        .map_err(unreadable)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
