use anyhow::{Context, Result};
use argh::FromArgs;
use pyalone::bundle::{default_launcher, find_interpreter};
use pyalone::env::Environment;
use pyalone::platform::HostPlatform;
use pyalone::{Bundle, LauncherConfig};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(FromArgs)]
/// Assemble a standalone directory that runs a Python script through the
/// pyalone-run launcher.
struct Args {
    #[argh(option, short = 'o', default = "PathBuf::from(\"dist\")")]
    /// output directory, created when missing. Defaults to `dist`.
    out_dir: PathBuf,

    #[argh(option)]
    /// interpreter to copy. Defaults to python3 or python found on PATH.
    interpreter: Option<PathBuf>,

    #[argh(option)]
    /// launcher stub to copy. Defaults to pyalone-run next to this program.
    launcher: Option<PathBuf>,

    #[argh(option, short = 'l')]
    /// extra file to place in the library directory; may be repeated.
    lib: Vec<PathBuf>,

    #[argh(positional)]
    /// script to bundle.
    script: PathBuf,
}

fn main() -> ExitCode {
    pyalone::logging::init();

    match run(argh::from_env()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<()> {
    let platform = HostPlatform::default();

    let launcher = match args.launcher {
        Some(path) => path,
        None => default_launcher(&platform).context("can't locate the launcher stub")?,
    };
    let interpreter = match args.interpreter {
        Some(path) => path,
        None => {
            let search_paths = Environment::capture()
                .get_var("PATH")
                .map(|p| p.to_os_string())
                .unwrap_or_default();
            find_interpreter(&search_paths, &platform)
                .context("can't find a python interpreter on PATH, use --interpreter")?
        }
    };

    let copied = Bundle::new(
        LauncherConfig::default(),
        &args.out_dir,
        args.script,
        launcher,
        interpreter,
    )
    .with_libs(args.lib)
    .assemble()
    .with_context(|| format!("can't bundle into {}", args.out_dir.display()))?;

    for path in copied {
        println!("{}", path.display());
    }
    Ok(())
}
