//! A single scan target and the connect attempt that decides its outcome.

use std::fmt;
use std::net::Ipv6Addr;
use std::time::Duration;

use async_trait::async_trait;
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::trace;

use crate::cancel::CancelSignal;

/// Decides whether `host:port` accepts TCP connections.
///
/// Implementations must fold every failure into `false`.
#[async_trait]
pub trait Prober: Send + Sync {
    async fn connect(&self, host: &str, port: u16, connect_timeout: Duration) -> bool;
}

/// Full TCP handshake through the operating system's `connect`.
///
/// Name resolution happens inside the timeout, so a slow resolver cannot
/// stall a worker longer than a slow host.
#[derive(Debug, Default, Clone, Copy)]
pub struct TcpConnectProber;

#[async_trait]
impl Prober for TcpConnectProber {
    async fn connect(&self, host: &str, port: u16, connect_timeout: Duration) -> bool {
        match timeout(connect_timeout, TcpStream::connect((host, port))).await {
            Ok(Ok(stream)) => {
                drop(stream);
                true
            }
            Ok(Err(e)) => {
                trace!("{host}:{port} connect failed: {e}");
                false
            }
            Err(_elapsed) => {
                trace!("{host}:{port} timed out after {connect_timeout:?}");
                false
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Probe {
    pub host: String,
    pub port: u16,
    open: bool,
}

impl Probe {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            open: false,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Attempts the connection and records the outcome.
    ///
    /// A cancelled scan abandons the attempt and leaves the probe closed.
    pub async fn probe(
        &mut self,
        prober: &dyn Prober,
        connect_timeout: Duration,
        cancel: &mut CancelSignal,
    ) {
        self.open = tokio::select! {
            biased;
            _ = cancel.cancelled() => false,
            open = prober.connect(&self.host, self.port, connect_timeout) => open,
        };
    }

    /// The report line for an open probe, `None` otherwise.
    pub fn report(&self) -> Option<String> {
        self.open.then(|| format!("{self} open"))
    }
}

impl fmt::Display for Probe {
    /// `host:port`, with IPv6 literals bracketed.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.host.parse::<Ipv6Addr>().is_ok() {
            write!(f, "[{}]:{}", self.host, self.port)
        } else {
            write!(f, "{}:{}", self.host, self.port)
        }
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
