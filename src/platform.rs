use std::io;
use std::path::PathBuf;

/// Conventions that differ between the operating systems the launcher runs on.
///
/// Both implementations are available on every target so the path derivations can
/// be exercised for either convention. [`HostPlatform`] names the one matching the
/// target the crate is compiled for.
pub trait Platform {
    /// Separator between directory components, e.g. `/`.
    fn dir_separator(&self) -> char;

    /// Separator between entries of a search-path list, e.g. `:` in `PATH`.
    fn path_list_separator(&self) -> char;

    /// Suffix appended to executable file names, empty where none is used.
    fn exe_suffix(&self) -> &'static str;

    /// Absolute path of the running executable.
    ///
    /// The standard library queries the OS for this (`/proc/self/exe` on Linux,
    /// `GetModuleFileNameW` on Windows, `_NSGetExecutablePath` on macOS).
    fn resolve_self_path(&self) -> io::Result<PathBuf> {
        std::env::current_exe()
    }
}

/// POSIX conventions: `/`, `:` and no executable suffix.
#[derive(Debug, Clone, Copy, Default)]
pub struct Posix;

impl Platform for Posix {
    fn dir_separator(&self) -> char {
        '/'
    }

    fn path_list_separator(&self) -> char {
        ':'
    }

    fn exe_suffix(&self) -> &'static str {
        ""
    }
}

/// Windows conventions: `\`, `;` and `.exe`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Windows;

impl Platform for Windows {
    fn dir_separator(&self) -> char {
        '\\'
    }

    fn path_list_separator(&self) -> char {
        ';'
    }

    fn exe_suffix(&self) -> &'static str {
        ".exe"
    }
}

/// Platform the crate was compiled for.
#[cfg(windows)]
pub type HostPlatform = Windows;

/// Platform the crate was compiled for.
#[cfg(not(windows))]
pub type HostPlatform = Posix;
