//! A tiny launcher stub for shipping Python programs as standalone directories.
//!
//! The launcher binary (`pyalone-run`) is copied next to a `python` interpreter and
//! renamed after a script. When started, it finds its own path, derives the sibling
//! interpreter and `<name>.py` script, extends `PYTHONPATH` with a `pylib` directory
//! and runs the interpreter with the forwarded arguments, exiting with the child's
//! status.
//!
//! The companion `pyalone` binary assembles such a directory, see [`Bundle`].
//!
//! The main entry point is [`Launcher`], which turns a self path into an
//! [`Invocation`]. The public modules [`platform`] and [`env`] expose the pieces
//! that differ between operating systems and the environment handed to the child.

pub mod bundle;
mod config;
pub mod env;
mod error;
mod launcher;
pub mod logging;
pub mod paths;
pub mod platform;

pub use bundle::{Bundle, BundleError};
pub use config::LauncherConfig;
pub use error::LaunchError;
pub use launcher::{ExitCode, Invocation, Launcher};
