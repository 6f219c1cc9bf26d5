//! OS adapters for the Sine installer.
//!
//! Implements the ports defined in `sine-core`: one [`PlatformPort`]
//! implementation per target OS, and the HTTP + zip [`ArchivePipeline`].
//!
//! [`PlatformPort`]: sine_core::PlatformPort
#![deny(unsafe_code)]

pub mod archive;
pub mod platform;

pub use archive::ArchivePipeline;
pub use platform::{NativePlatform, native_platform};
