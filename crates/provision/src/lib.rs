//! Engine provisioning for the relay launcher.
//!
//! One-shot pipeline that materializes the platform-specific engine binary:
//! resolve the release asset for the running host, download its gzip tar
//! archive from the fixed latest-release endpoint, and install the contained
//! binary atomically under the configured install root.
//!
//! Provisioning either leaves a fully valid executable at the install path
//! or leaves whatever was there before untouched. Concurrent provisioning
//! runs tolerate each other through unique temporary names and a single
//! rename as the only mutation of the shared path.

mod fetch;
mod install;

pub use fetch::{RELEASE_ENDPOINT, ReleaseFetcher};
pub use install::{install_archive, provision};
