use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Reasons the launcher gives up before the interpreter runs.
///
/// Every variant is fatal: the binary prints it as `error: <message>` and exits
/// with status 1. The interpreter's own exit status is never an error.
#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("{0}")]
    SelfPath(#[source] io::Error),

    #[error("can't find {}", .0.display())]
    MissingInterpreter(PathBuf),

    #[error("can't find {}", .0.display())]
    MissingScript(PathBuf),

    #[error("can't run {}: {source}", path.display())]
    Spawn {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
