use std::time::Duration;

/// Number of workers used when none is given.
pub const DEFAULT_WORKERS: usize = 8;

/// Upper bound for a single connect attempt.
///
/// The operating system default can reach minutes on some platforms, which
/// makes large scans unusable.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanConfig {
    /// A hostname or IP, a CIDR block, or the path of a file listing hosts.
    pub host_spec: String,

    /// Comma-separated ports and inclusive ranges, e.g. `21-23,389,3389`.
    pub port_spec: String,

    /// Number of concurrent workers. Values below 1 are treated as 1.
    pub workers: usize,

    pub connect_timeout: Duration,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            host_spec: String::new(),
            port_spec: String::new(),
            workers: DEFAULT_WORKERS,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
        }
    }
}

impl ScanConfig {
    pub fn new(host_spec: impl Into<String>, port_spec: impl Into<String>) -> Self {
        Self {
            host_spec: host_spec.into(),
            port_spec: port_spec.into(),
            ..Self::default()
        }
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    pub fn with_connect_timeout(mut self, connect_timeout: Duration) -> Self {
        self.connect_timeout = connect_timeout;
        self
    }

    /// The worker count the engine actually runs with.
    pub fn effective_workers(&self) -> usize {
        self.workers.max(1)
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
