mod common;

use std::process::{Command, Output};

use common::{FakeBackend, FakeDisplay};
use structopt::StructOpt;
use windisplaymode::{cli, DisplayMode, DisplayModeError};

fn windisplaymode(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_windisplaymode"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn no_arguments_prints_usage() {
    let output = windisplaymode(&[]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("USAGE"));
    assert!(stderr(&output).contains("windisplaymode set 0 @144"));
}

#[test]
fn one_argument_prints_usage() {
    for args in [&["list"][..], &["set"][..], &["toggle"][..]] {
        let output = windisplaymode(args);
        assert_eq!(output.status.code(), Some(1), "{:?}", args);
        assert!(stderr(&output).contains("USAGE"), "{:?}", args);
    }
}

#[test]
fn set_without_mode_prints_usage() {
    let output = windisplaymode(&["set", "0"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("USAGE"));
}

#[test]
fn unknown_command() {
    let output = windisplaymode(&["toggle", "0"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Unknown command: toggle"));
    assert!(output.stdout.is_empty());
}

#[test]
fn user_errors_print_a_single_plain_line() {
    let output = Command::new(env!("CARGO_BIN_EXE_windisplaymode"))
        .args(["toggle", "0"])
        .env_remove("RUST_LOG")
        .env("RUST_BACKTRACE", "1")
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stderr(&output), "Error: Unknown command: toggle\n");
}

#[test]
fn help_exits_successfully() {
    let output = windisplaymode(&["--help"]);
    assert_eq!(output.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&output.stdout).contains("EXAMPLES"));
}

#[cfg(not(windows))]
#[test]
fn list_is_unsupported_off_windows() {
    let output = windisplaymode(&["list", "0"]);
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        stderr(&output),
        "Error: Changing display modes is only supported on Windows\n"
    );
}

fn run(args: &[&str], backend: &FakeBackend) -> Result<String, DisplayModeError> {
    let args = std::iter::once("windisplaymode").chain(args.iter().copied());
    let opt = cli::Opt::from_iter_safe(args).unwrap();
    let mut out = Vec::new();
    cli::run(&opt, backend, &mut out)?;
    Ok(String::from_utf8(out).unwrap())
}

fn backend() -> FakeBackend {
    let mut display = FakeDisplay::new(0, DisplayMode::new(1920, 1080, 32, 60));
    display.modes.push(DisplayMode::new(1280, 720, 32, 60));
    display.modes.push(DisplayMode::new(1920, 1080, 32, 60));
    FakeBackend::new(vec![display])
}

#[test]
fn run_list_prints_table() {
    let output = run(&["list", "0"], &backend()).unwrap();
    assert_eq!(
        output,
        "Display:\n\tGeneric Adapter - Generic Monitor\n\n\
         Available modes:\n\t1280x720x32@60\n\t1920x1080x32@60\n\n"
    );
}

#[test]
fn run_list_prints_json() {
    let output = run(&["list", "0", "--json"], &backend()).unwrap();
    let json: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(json["display"], "Generic Adapter");
    assert_eq!(json["monitor"], "Generic Monitor");
    assert_eq!(json["modes"].as_array().unwrap().len(), 2);
    assert_eq!(json["modes"][0]["width"], 1280);
}

#[test]
fn run_set_reports_applied_mode() {
    let backend = backend();
    assert_eq!(run(&["set", "0", "@75"], &backend).unwrap(), "Display 0 set to 1920x1080x32@75\n");
    assert_eq!(
        run(&["set", "0", "1280x720", "--test"], &backend).unwrap(),
        "Display 0 supports 1280x720x32@60\n"
    );
    assert_eq!(backend.changes.borrow().len(), 2);
}

#[test]
fn run_list_missing_display() {
    let err = run(&["list", "99"], &backend()).unwrap_err();
    assert_eq!(err.to_string(), "Display not found: 99");
}
