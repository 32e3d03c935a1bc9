//! Command implementations for the relay CLI.

pub mod provision;
pub mod run;
