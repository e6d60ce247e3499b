use crate::config::LauncherConfig;
use crate::paths::{self, find_command_path};
use crate::platform::{HostPlatform, Platform};
use std::ffi::OsStr;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

/// Name of the launcher stub binary built by this crate.
pub const LAUNCHER_BIN: &str = "pyalone-run";

/// Interpreter names tried on `PATH`, in order, when none is given.
const INTERPRETER_CANDIDATES: &[&str] = &["python3", "python"];

#[derive(Debug, Error)]
pub enum BundleError {
    #[error("can't create {}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("can't find {}", .0.display())]
    Missing(PathBuf),

    #[error("script {} has no file name", .0.display())]
    NoScriptName(PathBuf),

    #[error("can't copy {} to {}", from.display(), to.display())]
    Copy {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("can't make {} executable", path.display())]
    Permissions {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// A standalone distribution directory for one script.
///
/// [`Bundle::assemble`] lays out the directory so that running the renamed launcher
/// inside it finds the copied interpreter and script:
///
/// ```text
/// dist/
///   hw          launcher stub renamed after the script (hw.exe on Windows)
///   hw.py       the script
///   python      the interpreter (python.exe on Windows)
///   pylib/      extra library files
/// ```
#[derive(Debug, Clone)]
pub struct Bundle<P: Platform = HostPlatform> {
    config: LauncherConfig,
    platform: P,
    out_dir: PathBuf,
    script: PathBuf,
    launcher: PathBuf,
    interpreter: PathBuf,
    libs: Vec<PathBuf>,
}

impl Bundle {
    pub fn new(
        config: LauncherConfig,
        out_dir: impl Into<PathBuf>,
        script: impl Into<PathBuf>,
        launcher: impl Into<PathBuf>,
        interpreter: impl Into<PathBuf>,
    ) -> Self {
        Self {
            config,
            platform: HostPlatform::default(),
            out_dir: out_dir.into(),
            script: script.into(),
            launcher: launcher.into(),
            interpreter: interpreter.into(),
            libs: Vec::new(),
        }
    }
}

impl<P: Platform> Bundle<P> {
    /// Extra files copied into the library directory.
    pub fn with_libs(mut self, libs: impl IntoIterator<Item = PathBuf>) -> Self {
        self.libs.extend(libs);
        self
    }

    /// Create the distribution directory.
    ///
    /// Returns the source paths that were copied, in copy order. Missing library
    /// files are skipped with a warning; a missing script, launcher or interpreter is
    /// an error.
    pub fn assemble(&self) -> Result<Vec<PathBuf>, BundleError> {
        let stem = self
            .script
            .file_stem()
            .ok_or_else(|| BundleError::NoScriptName(self.script.clone()))?;
        for required in [&self.script, &self.launcher, &self.interpreter] {
            if !paths::is_regular_file(required) {
                return Err(BundleError::Missing(required.clone()));
            }
        }

        create_dir(&self.out_dir)?;
        let mut copied = Vec::new();

        let lib_dir = self.out_dir.join(&self.config.library_dir);
        for lib in &self.libs {
            if !paths::is_regular_file(lib) {
                warn!("can't find {}", lib.display());
                continue;
            }
            let Some(name) = lib.file_name() else {
                continue;
            };
            create_dir(&lib_dir)?;
            copy(lib, &lib_dir.join(name))?;
            copied.push(lib.clone());
        }

        // The script is named the way the launcher derives it from its own name, so a
        // dotted stem like `my.tool` pairs `my.tool` with `my.py` on POSIX.
        let launcher_name = with_suffix(stem, self.platform.exe_suffix());
        let script_name = paths::script_path(launcher_name.as_os_str(), &self.config, &self.platform);
        copy(&self.script, &self.out_dir.join(script_name))?;
        copied.push(self.script.clone());

        let launcher_dest = self.out_dir.join(launcher_name);
        copy(&self.launcher, &launcher_dest)?;
        make_executable(&launcher_dest)?;
        copied.push(self.launcher.clone());

        let interpreter_dest = self.out_dir.join(with_suffix(
            OsStr::new(&self.config.interpreter),
            self.platform.exe_suffix(),
        ));
        copy(&self.interpreter, &interpreter_dest)?;
        make_executable(&interpreter_dest)?;
        copied.push(self.interpreter.clone());

        Ok(copied)
    }
}

/// The launcher stub installed next to the running binary.
pub fn default_launcher(platform: &impl Platform) -> io::Result<PathBuf> {
    let exe = platform.resolve_self_path()?;
    let dir = exe.parent().unwrap_or_else(|| Path::new("."));
    Ok(dir.join(with_suffix(OsStr::new(LAUNCHER_BIN), platform.exe_suffix())))
}

/// First interpreter found on `search_paths` (a `PATH` value).
pub fn find_interpreter(search_paths: &OsStr, platform: &impl Platform) -> Option<PathBuf> {
    INTERPRETER_CANDIDATES.iter().find_map(|name| {
        let name = with_suffix(OsStr::new(name), platform.exe_suffix());
        find_command_path(search_paths, Path::new(&name))
    })
}

fn with_suffix(name: &OsStr, suffix: &str) -> PathBuf {
    let mut name = name.to_os_string();
    name.push(suffix);
    PathBuf::from(name)
}

fn create_dir(path: &Path) -> Result<(), BundleError> {
    fs::create_dir_all(path).map_err(|source| BundleError::CreateDir {
        path: path.to_owned(),
        source,
    })
}

fn copy(from: &Path, to: &Path) -> Result<(), BundleError> {
    info!(from = %from.display(), to = %to.display(), "copying");
    fs::copy(from, to).map_err(|source| BundleError::Copy {
        from: from.to_owned(),
        to: to.to_owned(),
        source,
    })?;
    Ok(())
}

#[cfg(unix)]
fn make_executable(path: &Path) -> Result<(), BundleError> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o755)).map_err(|source| {
        BundleError::Permissions {
            path: path.to_owned(),
            source,
        }
    })
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> Result<(), BundleError> {
    Ok(())
}
