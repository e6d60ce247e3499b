/// Fixed names the launcher and the bundler agree on.
///
/// [`Default`] gives the Python layout: a `python` interpreter, `.py` scripts,
/// a `pylib` library directory and the `PYTHONPATH` search variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LauncherConfig {
    /// Interpreter file name without the platform executable suffix.
    pub interpreter: String,
    /// Extension given to the script, including the leading dot.
    pub script_extension: String,
    /// Directory next to the launcher added to the library search variable.
    pub library_dir: String,
    /// Environment variable the interpreter reads its module search path from.
    pub library_var: String,
}

impl Default for LauncherConfig {
    fn default() -> Self {
        Self {
            interpreter: "python".to_string(),
            script_extension: ".py".to_string(),
            library_dir: "pylib".to_string(),
            library_var: "PYTHONPATH".to_string(),
        }
    }
}
