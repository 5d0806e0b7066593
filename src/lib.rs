//! sndfw library exports for testing.
//!
//! The binary is a thin CLI over these modules; integration tests drive
//! the same pipeline with fake tools.

pub mod commands;
pub mod config;
pub mod error;
pub mod firmware;
pub mod join;
pub mod kernel;
pub mod modinfo;
pub mod preflight;
pub mod process;
pub mod report;
