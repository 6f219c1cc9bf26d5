//! Mapping from a profile directory to its startup cache.

use std::path::{Path, PathBuf};

use super::SpecialDirs;
use crate::catalog::OsKind;

const STARTUP_CACHE: &str = "startupCache";

/// Where the browser keeps the startup cache for `profile`.
///
/// Windows mirrors the roaming profile under `AppData\Local`, macOS under
/// `Library/Caches`, and Linux under the XDG cache root with the leading dot
/// of the profile's top-level folder dropped (`~/.mozilla/firefox/x` becomes
/// `~/.cache/mozilla/firefox/x`). Returns `None` when the profile does not
/// follow the layout.
pub fn startup_cache_dir(profile: &Path, os: OsKind, dirs: &SpecialDirs) -> Option<PathBuf> {
    let base = match os {
        OsKind::Windows => replace_segment(profile, "Roaming", "Local")?,
        OsKind::MacOs => replace_segment(profile, "Application Support", "Caches")?,
        OsKind::Linux => {
            let relative = profile.strip_prefix(dirs.home.as_ref()?).ok()?;
            let mut parts = relative.iter();
            let top = parts.next()?.to_string_lossy();
            let mut mapped = dirs.cache.as_ref()?.join(top.trim_start_matches('.'));
            mapped.extend(parts);
            mapped
        }
    };
    Some(base.join(STARTUP_CACHE))
}

/// Replace the first path segment equal to `from`. Works on the textual
/// form so either separator style is understood on any host.
fn replace_segment(path: &Path, from: &str, to: &str) -> Option<PathBuf> {
    let text = path.to_string_lossy();
    let mut out = String::with_capacity(text.len());
    let mut replaced = false;
    for piece in text.split_inclusive(['/', '\\']) {
        let segment = piece.trim_end_matches(['/', '\\']);
        if !replaced && segment == from {
            out.push_str(to);
            out.push_str(&piece[segment.len()..]);
            replaced = true;
        } else {
            out.push_str(piece);
        }
    }
    replaced.then(|| PathBuf::from(out))
}
