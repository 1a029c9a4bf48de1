use std::io;
use std::process;

use color_eyre::config::HookBuilder;
use color_eyre::eyre::Result;
use log::debug;
use structopt::clap::ErrorKind;
use structopt::StructOpt;

use windisplaymode::cli::{self, Opt};
use windisplaymode::{system_backend, DisplayModeError};

/// Prints the full usage text to stderr and exits with status 1
fn usage(message: Option<&str>) -> ! {
    if let Some(message) = message {
        eprintln!("{}\n", message);
    }
    let _ = Opt::clap().write_long_help(&mut io::stderr());
    eprintln!();
    process::exit(1);
}

fn main() -> Result<()> {
    HookBuilder::default()
        .display_env_section(false)
        .display_location_section(false)
        .install()?;
    env_logger::init();

    let opt = match Opt::from_iter_safe(std::env::args_os()) {
        Ok(opt) => opt,
        Err(err) if !err.use_stderr() => err.exit(),
        // Clap already renders the help here.
        Err(err) if err.kind == ErrorKind::MissingArgumentOrSubcommand => usage(None),
        Err(err) => usage(Some(&err.message)),
    };
    debug!("{:?}", opt);

    let result = opt
        .validate()
        .and_then(|()| system_backend())
        .and_then(|backend| cli::run(&opt, backend.as_ref(), &mut io::stdout().lock()));

    match result {
        Ok(()) => Ok(()),
        Err(DisplayModeError::MissingArguments) => usage(None),
        // Output failures are unexpected and get the full report.
        Err(err @ (DisplayModeError::Io(_) | DisplayModeError::Json(_))) => Err(err.into()),
        Err(err) => {
            eprintln!("Error: {}", err);
            process::exit(1);
        }
    }
}
