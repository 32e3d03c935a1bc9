//! Core types for the relay launcher.
//!
//! relay provisions a platform-specific prebuilt engine binary and
//! transparently delegates invocations to it. This crate carries the types
//! shared by the provisioning and execution paths: the error taxonomy, the
//! host platform model with its release support table, the explicit
//! install-root configuration, and the shell-quoting compatibility shim.

mod error;
pub mod paths;
pub mod platform;
pub mod shell;

pub use error::{Error, Result};
pub use paths::{ENGINE_BINARY, InstallRoot};
pub use platform::{Arch, Os, Platform};
