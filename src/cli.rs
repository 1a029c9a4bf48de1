use std::io::Write;

use structopt::StructOpt;

use crate::{ChangeMode, DisplayBackend, DisplayModeError, DisplayModeResult, ModeController};

const EXAMPLES: &str = "EXAMPLES:
    windisplaymode set 0 1920x1080
        Change resolution of display 0 (first display) to 1920 (width) by 1080 (height) pixels
    windisplaymode set 0 1920x1080x32
        Change resolution of display 0 to 1920x1080 with 32-bit colors
    windisplaymode set 0 1920x1080@60
        Set both resolution and refresh rate (60 Hz)
    windisplaymode set 0 @144
        Change refresh rate to 144 Hz keeping the same resolution and color depth";

#[derive(StructOpt, Debug, PartialEq)]
#[structopt(
    name = "windisplaymode",
    about = "List and change display modes",
    after_help = EXAMPLES
)]
pub enum Opt {
    /// Print a list of available display modes for the specified display
    List {
        /// Zero-based display index
        display: usize,
        /// Print the listing as JSON
        #[structopt(long)]
        json: bool,
    },
    /// Change display mode
    Set {
        /// Zero-based display index
        display: usize,
        /// <width>x<height>[x<depth>][@<refresh>] or @<refresh>
        mode: String,
        /// Only check whether the display accepts the mode
        #[structopt(long, conflicts_with = "persist")]
        test: bool,
        /// Store the mode in the registry so it survives a reboot
        #[structopt(long)]
        persist: bool,
    },
    #[structopt(external_subcommand)]
    Other(Vec<String>),
}

impl Opt {
    /// Rejects unknown commands before any backend is touched
    pub fn validate(&self) -> DisplayModeResult {
        match self {
            // Fewer than two arguments is a usage error no matter what the command is.
            Opt::Other(args) if args.len() < 2 => Err(DisplayModeError::MissingArguments),
            Opt::Other(args) => Err(DisplayModeError::UnknownCommand(args[0].clone())),
            _ => Ok(()),
        }
    }
}

/// Executes the parsed command against `backend`, writing results to `out`
pub fn run<B, W>(opt: &Opt, backend: &B, out: &mut W) -> DisplayModeResult
where
    B: DisplayBackend + ?Sized,
    W: Write,
{
    opt.validate()?;
    let controller = ModeController::new(backend);

    match opt {
        Opt::List { display, json } => {
            let listing = controller.list_modes(*display)?;
            if *json {
                serde_json::to_writer_pretty(&mut *out, &listing)?;
                writeln!(out)?;
            } else {
                writeln!(out, "{}", listing)?;
            }
        }
        Opt::Set {
            display,
            mode,
            test,
            persist,
        } => {
            let change_mode = if *test {
                ChangeMode::Test
            } else if *persist {
                ChangeMode::Persist
            } else {
                ChangeMode::Dynamic
            };
            let applied = controller.set_mode(*display, mode, change_mode)?;
            if *test {
                writeln!(out, "Display {} supports {}", display, applied)?;
            } else {
                writeln!(out, "Display {} set to {}", display, applied)?;
            }
        }
        // rejected by validate
        Opt::Other(_) => {}
    }

    Ok(())
}
