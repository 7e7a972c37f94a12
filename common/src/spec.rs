//! # Target Specifications
//!
//! A scan is described by two strings: a host spec and a port spec. The
//! submodules turn each of them into an ordered list, and the engine takes the
//! Cartesian product of the two.

pub mod host;
pub mod port;
