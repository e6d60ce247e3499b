use crate::config::LauncherConfig;
use crate::env::Environment;
use crate::error::LaunchError;
use crate::paths;
use crate::platform::{HostPlatform, Platform};
use std::ffi::{OsStr, OsString};
use std::path::PathBuf;
use std::process::{Command, ExitStatus};
use tracing::{debug, info};

/// Conventional process exit code type used by this crate.
///
/// A value of 0 indicates success; any non-zero value indicates failure.
pub type ExitCode = i32;

/// Resolves the interpreter and script that belong to a launcher executable.
///
/// Example
/// ```no_run
/// use pyalone::{Launcher, env::Environment};
/// use pyalone::LauncherConfig;
/// let launcher = Launcher::new(LauncherConfig::default());
/// let self_path = launcher.resolve_self_path()?;
/// let code = launcher
///     .prepare(&self_path, Environment::capture())?
///     .run(std::env::args_os().skip(1))?;
/// std::process::exit(code);
/// # Ok::<(), pyalone::LaunchError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Launcher<P: Platform = HostPlatform> {
    config: LauncherConfig,
    platform: P,
}

impl Launcher {
    /// Launcher for the host platform.
    pub fn new(config: LauncherConfig) -> Self {
        Self::with_platform(config, HostPlatform::default())
    }
}

impl Default for Launcher {
    fn default() -> Self {
        Self::new(LauncherConfig::default())
    }
}

impl<P: Platform> Launcher<P> {
    pub fn with_platform(config: LauncherConfig, platform: P) -> Self {
        Self { config, platform }
    }

    /// Path of the running executable.
    pub fn resolve_self_path(&self) -> Result<OsString, LaunchError> {
        self.platform
            .resolve_self_path()
            .map(PathBuf::into_os_string)
            .map_err(LaunchError::SelfPath)
    }

    /// Work out what to run for a launcher living at `self_path`.
    ///
    /// The interpreter is checked first, then the script. Only when both are regular
    /// files is the library search variable extended in `env`.
    pub fn prepare(
        &self,
        self_path: impl AsRef<OsStr>,
        mut env: Environment,
    ) -> Result<Invocation, LaunchError> {
        let self_path = self_path.as_ref();
        debug!(self_path = %self_path.to_string_lossy(), "resolving launcher layout");
        let dir = paths::exe_directory(self_path, &self.platform);

        let interpreter = PathBuf::from(paths::interpreter_path(dir, &self.config, &self.platform));
        if !paths::is_regular_file(&interpreter) {
            return Err(LaunchError::MissingInterpreter(interpreter));
        }
        debug!(interpreter = %interpreter.display(), "found interpreter");

        let script = PathBuf::from(paths::script_path(self_path, &self.config, &self.platform));
        if !paths::is_regular_file(&script) {
            return Err(LaunchError::MissingScript(script));
        }
        debug!(script = %script.display(), "found script");

        // The script directory is already on the interpreter's default search path.
        let library_dir = paths::library_dir(dir, &self.config, &self.platform);
        let value = env.append_search_path(&self.config.library_var, &library_dir, &self.platform);
        debug!(var = %self.config.library_var, value = %value.to_string_lossy(), "library search path");

        Ok(Invocation {
            interpreter,
            script,
            env,
        })
    }
}

/// A validated interpreter and script pair, ready to run.
#[derive(Debug, Clone)]
pub struct Invocation {
    pub interpreter: PathBuf,
    pub script: PathBuf,
    /// Complete environment of the child process.
    pub env: Environment,
}

impl Invocation {
    /// Build the child command: `<interpreter> <script> <args...>`.
    ///
    /// Arguments are handed over as a list, so whitespace and quote characters reach
    /// the interpreter exactly as given. Standard streams are inherited.
    pub fn command<I, S>(&self, args: I) -> Command
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let mut cmd = Command::new(&self.interpreter);
        cmd.arg(&self.script)
            .args(args)
            .env_clear()
            .envs(self.env.vars.iter());
        cmd
    }

    /// Run the interpreter and wait for it, returning its exit code.
    pub fn run<I, S>(&self, args: I) -> Result<ExitCode, LaunchError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let mut cmd = self.command(args);
        info!(command = ?cmd, "starting interpreter");
        let exit_status = cmd
            .spawn()
            .and_then(|mut child| child.wait())
            .map_err(|source| LaunchError::Spawn {
                path: self.interpreter.clone(),
                source,
            })?;
        let code = exit_code(exit_status);
        info!(code, "interpreter finished");
        Ok(code)
    }
}

fn exit_code(exit_status: ExitStatus) -> ExitCode {
    match exit_status.code() {
        Some(x) => x,
        None => terminated_by_signal(exit_status),
    }
}

#[cfg(unix)]
fn terminated_by_signal(exit_status: ExitStatus) -> ExitCode {
    use std::os::unix::process::ExitStatusExt;
    if let Some(signal) = ExitStatusExt::signal(&exit_status) {
        128 + signal
    } else if ExitStatusExt::core_dumped(&exit_status) {
        255
    } else {
        1
    }
}

#[cfg(not(unix))]
fn terminated_by_signal(_exit_status: ExitStatus) -> ExitCode {
    1
}
