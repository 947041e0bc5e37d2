//! Support library for the netclust CLI binary.
//!
//! Exposes the command pipeline, listing and log writers so doctests and
//! integration tests can run commands without forking a subprocess.

pub mod cli;
pub mod logging;
pub mod output;
pub mod report;
