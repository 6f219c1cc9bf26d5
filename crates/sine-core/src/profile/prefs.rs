//! Reading and appending `user_pref` lines in a profile's `prefs.js`.

use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

use crate::config::InstallerConfig;

pub const PREFS_FILE: &str = "prefs.js";

pub const PREF_IS_COSINE: &str = "sine.is-cosine";
pub const PREF_VERSION: &str = "sine.version";
pub const PREF_LATEST_VERSION: &str = "sine.latest-version";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrefValue {
    Bool(bool),
    Str(String),
}

impl fmt::Display for PrefValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(value) => write!(f, "{value}"),
            Self::Str(value) => write!(f, "{value:?}"),
        }
    }
}

/// `user_pref("<key>", <value>);`
pub fn format_pref(key: &str, value: &PrefValue) -> String {
    format!("user_pref(\"{key}\", {value});")
}

/// The preferences recorded after configuring a profile.
pub fn install_prefs(config: &InstallerConfig) -> [(&'static str, PrefValue); 3] {
    [
        (PREF_IS_COSINE, PrefValue::Bool(config.is_cosine)),
        (PREF_VERSION, PrefValue::Str(config.engine_version.clone())),
        (
            PREF_LATEST_VERSION,
            PrefValue::Str(config.engine_version.clone()),
        ),
    ]
}

/// Append the install preferences to `<profile>/prefs.js`.
///
/// Existing lines are left alone; the browser keeps the last value it reads.
pub fn append_install_prefs(profile: &Path, config: &InstallerConfig) -> io::Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(profile.join(PREFS_FILE))?;
    for (key, value) in install_prefs(config) {
        writeln!(file, "{}", format_pref(key, &value))?;
    }
    Ok(())
}

/// Last value recorded for `key`, with string quotes removed.
///
/// A missing `prefs.js` reads as no value.
pub fn read_pref(profile: &Path, key: &str) -> io::Result<Option<String>> {
    let contents = match fs::read_to_string(profile.join(PREFS_FILE)) {
        Ok(contents) => contents,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e),
    };
    Ok(contents
        .lines()
        .filter_map(parse_pref_line)
        .filter(|(k, _)| *k == key)
        .map(|(_, v)| v.to_string())
        .next_back())
}

fn parse_pref_line(line: &str) -> Option<(&str, &str)> {
    let inner = line
        .trim()
        .strip_prefix("user_pref(")?
        .strip_suffix(");")?;
    let (key, value) = inner.split_once(',')?;
    let key = key.trim().strip_prefix('"')?.strip_suffix('"')?;
    let value = value.trim();
    let value = value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value);
    Some((key, value))
}
