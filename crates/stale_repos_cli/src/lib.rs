//! stale-repos CLI library exports for integration testing.
//!
//! This module exposes the command implementation and configuration loader
//! so they can be exercised without spawning the binary.

pub mod commands;
pub mod config;
pub mod errors;
