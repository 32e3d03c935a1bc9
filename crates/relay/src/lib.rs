//! relay launcher CLI library.
//!
//! The binary in this crate is the user-facing surface of relay: it
//! provisions the platform-specific engine once (driven by the host
//! dependency manager's install/update lifecycle) and delegates every
//! subsequent invocation to the installed binary, propagating arguments,
//! live output and exit status.

pub mod cli;
pub mod commands;
pub mod tracing;
