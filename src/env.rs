use crate::platform::Platform;
use std::collections::HashMap;
use std::env as stdenv;
use std::ffi::{OsStr, OsString};

/// Explicit view of the environment a child process is started with.
///
/// The launcher never mutates its own process environment. It captures a copy,
/// overrides the library search variable in the copy, and hands the whole mapping
/// to the spawned interpreter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Environment {
    /// Key-value store of environment variables (e.g., PATH, PYTHONPATH).
    pub vars: HashMap<OsString, OsString>,
}

impl Environment {
    /// Capture the current process environment.
    ///
    /// Uses `std::env::vars_os()`, so variables that are not valid Unicode are kept
    /// as they are.
    pub fn capture() -> Self {
        Self {
            vars: stdenv::vars_os().collect(),
        }
    }

    /// Get the value of an environment variable.
    pub fn get_var(&self, key: impl AsRef<OsStr>) -> Option<&OsStr> {
        let key = key.as_ref();
        self.vars
            .iter()
            .find(|(k, _)| same_key(k, key))
            .map(|(_, v)| v.as_os_str())
    }

    /// Set or override an environment variable.
    pub fn set_var(&mut self, key: impl Into<OsString>, val: impl Into<OsString>) {
        let key = key.into();
        self.vars.retain(|k, _| !same_key(k, &key));
        self.vars.insert(key, val.into());
    }

    /// Append `entry` to the search-path list stored in `key`.
    ///
    /// Returns the new value, which is also stored in the environment.
    pub fn append_search_path(
        &mut self,
        key: &str,
        entry: &OsStr,
        platform: &impl Platform,
    ) -> OsString {
        let value = search_path_value(self.get_var(key), entry, platform);
        self.set_var(key, value.clone());
        value
    }
}

/// `<old><list-sep><entry>`, or just `<entry>` when the variable is not set.
///
/// A variable that is set but empty is kept as an empty leading entry, which the
/// interpreter reads as the current directory.
pub fn search_path_value(old: Option<&OsStr>, entry: &OsStr, platform: &impl Platform) -> OsString {
    let mut value = OsString::new();
    if let Some(old) = old {
        value.push(old);
        value.push(platform.path_list_separator().to_string());
    }
    value.push(entry);
    value
}

// Windows treats variable names case-insensitively.
#[cfg(windows)]
fn same_key(a: &OsStr, b: &OsStr) -> bool {
    a.eq_ignore_ascii_case(b)
}

#[cfg(not(windows))]
fn same_key(a: &OsStr, b: &OsStr) -> bool {
    a == b
}
