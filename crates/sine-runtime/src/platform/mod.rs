//! Platform adapter implementations.
//!
//! One `PlatformPort` implementation per target OS, chosen at compile time
//! and exposed as [`NativePlatform`]. Helpers shared by every OS (download
//! folder lookup, process liveness) live in [`common`].

mod common;
mod quote;

#[cfg(unix)]
mod posix;

#[cfg(all(unix, not(target_os = "macos")))]
mod linux;
#[cfg(target_os = "macos")]
mod macos;
#[cfg(windows)]
mod windows;

use std::sync::Arc;

use sine_core::PlatformPort;

pub use common::{default_downloads_dir, is_process_running};

#[cfg(all(unix, not(target_os = "macos")))]
pub use linux::LinuxPlatform as NativePlatform;
#[cfg(target_os = "macos")]
pub use macos::MacPlatform as NativePlatform;
#[cfg(windows)]
pub use windows::WindowsPlatform as NativePlatform;

/// The adapter for the OS this binary was built for.
pub fn native_platform() -> Arc<dyn PlatformPort> {
    Arc::new(NativePlatform::new())
}
