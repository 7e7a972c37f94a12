//! # Port Specification
//!
//! Parses a comma-separated list of ports and inclusive ranges, e.g.
//! `21-23,389,3389`, into the ordered list of ports to probe.
//!
//! Tokens keep the order they were written in and overlaps are not removed,
//! so `80,80` probes port 80 twice.

use std::num::ParseIntError;

use tracing::debug;

use crate::error::ScanError;

/// A single element of a port spec.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PortToken {
    Single(u16),
    /// Inclusive on both ends, `start <= end`.
    Range { start: u16, end: u16 },
}

impl PortToken {
    pub fn ports(self) -> impl Iterator<Item = u16> {
        let (start, end) = match self {
            PortToken::Single(port) => (port, port),
            PortToken::Range { start, end } => (start, end),
        };
        start..=end
    }
}

/// Expands a port spec into its ports.
///
/// An empty spec yields no ports. Any malformed token rejects the whole spec.
pub fn expand(port_spec: &str) -> Result<Vec<u16>, ScanError> {
    if port_spec.trim().is_empty() {
        return Ok(Vec::new());
    }

    let mut ports: Vec<u16> = Vec::new();
    for token in port_spec.split(',') {
        ports.extend(parse_token(token)?.ports());
    }

    debug!("Port spec '{port_spec}' expanded to {} ports", ports.len());
    Ok(ports)
}

/// Parses one `port` or `start-end` token.
pub fn parse_token(token: &str) -> Result<PortToken, ScanError> {
    let token = token.trim();
    if token.is_empty() {
        return Err(malformed(token, "empty token"));
    }

    let Some((start_str, end_str)) = token.split_once('-') else {
        return Ok(PortToken::Single(parse_port(token, token)?));
    };

    let start: u16 = parse_port(start_str.trim(), token)?;
    let end: u16 = parse_port(end_str.trim(), token)?;

    if start > end {
        return Err(malformed(
            token,
            format!("range start {start} is greater than end {end}"),
        ));
    }

    Ok(PortToken::Range { start, end })
}

fn parse_port(field: &str, token: &str) -> Result<u16, ScanError> {
    // `u16::from_str` would take a leading '+'
    if !field.bytes().all(|b| b.is_ascii_digit()) {
        return Err(malformed(token, format!("invalid port '{field}': not a number")));
    }

    let port: u16 = field
        .parse()
        .map_err(|e: ParseIntError| malformed(token, format!("invalid port '{field}': {e}")))?;

    if port == 0 {
        return Err(malformed(token, "port 0 cannot be scanned"));
    }

    Ok(port)
}

fn malformed(token: &str, reason: impl Into<String>) -> ScanError {
    ScanError::MalformedPortToken {
        token: token.to_string(),
        reason: reason.into(),
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
