use pyalone::env::Environment;
use pyalone::{LaunchError, Launcher, LauncherConfig};

fn main() {
    pyalone::logging::init();

    match run() {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    }
}

fn run() -> Result<pyalone::ExitCode, LaunchError> {
    let launcher = Launcher::new(LauncherConfig::default());
    let self_path = launcher.resolve_self_path()?;
    launcher
        .prepare(&self_path, Environment::capture())?
        .run(std::env::args_os().skip(1))
}
