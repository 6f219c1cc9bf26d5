//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces that the core domain expects from infrastructure.
//! They contain no implementation details and use only domain types.

pub mod archive;
pub mod platform;

pub use archive::ArchivePort;
pub use platform::{PlatformError, PlatformPort, PlatformResult};

#[cfg(test)]
pub use archive::MockArchivePort;
