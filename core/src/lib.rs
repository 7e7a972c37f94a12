//! The scan engine.
//!
//! [`scanner`] expands a [`ScanConfig`](portscan_common::ScanConfig) into
//! [`probe::Probe`]s, runs them on a fixed pool of workers and folds the open
//! ones into a text report.

pub mod cancel;
pub mod probe;
pub mod scanner;

pub use scanner::{Scanner, scan};
