//! Shared building blocks for the port scanner.
//!
//! * [`config`]: the immutable [`ScanConfig`] handed to the engine.
//! * [`error`]: the [`ScanError`] taxonomy surfaced by a scan.
//! * [`network`]: address enumeration helpers (CIDR blocks).
//! * [`spec`]: expansion of host and port specifications into scan targets.

pub mod config;
pub mod error;
pub mod network;
pub mod spec;

pub use config::ScanConfig;
pub use error::ScanError;
