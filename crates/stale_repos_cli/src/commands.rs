//! Command modules for the stale-repos CLI.
//!
//! - `run_cmd`: finds stale repositories and reports or archives them

pub mod run_cmd;
