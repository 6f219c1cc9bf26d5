//! Path resolution and validation for browser installs and profiles.
//!
//! - Returns `PathBuf` and `PathError` for clear error handling
//! - No interactive/terminal I/O - adapters handle user prompts separately
//! - Base directories are injected through [`SpecialDirs`]

mod cache;
mod ensure;
mod error;
mod resolver;
mod validate;

pub use cache::startup_cache_dir;
pub use ensure::is_writable;
pub use error::PathError;
pub use resolver::{ResolvedInstallContext, SpecialDirs, resolve_install_path, resolve_profile_root};
pub use validate::{validate_browser_dir, validate_profile_root};
