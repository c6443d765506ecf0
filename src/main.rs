use clap::{ArgAction, CommandFactory, FromArgMatches, Parser};
use mata_nui_patcher::{PatchSet, Runner, Selection};
use std::{io, path::PathBuf, process::ExitCode};
use tracing_subscriber::filter::LevelFilter;

const LONG_VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (built ", env!("BUILD_DATE"), ")");
const ABOUT: &str = concat!("TLOMN Build 2001-10-23 Patcher\nVersion: ", env!("CARGO_PKG_VERSION"));

#[derive(Parser, Debug)]
#[command(version, long_version = LONG_VERSION, about = ABOUT)]
struct Args {
    /// Only apply listed patches
    #[arg(short, long, value_name = "ID", conflicts_with = "disabled")]
    enabled: Vec<String>,

    /// Do not apply listed patches
    #[arg(short, long, value_name = "ID")]
    disabled: Vec<String>,

    /// Log more to stderr, repeat for more detail
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// File to be patched
    file: PathBuf,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    tracing_subscriber::fmt().with_max_level(level).with_writer(io::stderr).with_target(false).without_time().init();
}

/// Text after the options: every patch, then copyright.
fn epilog(patches: &PatchSet) -> String {
    format!(
        "patches:\n{}\n\nCopyright (c) 2018 JrMasterModelBuilder\nLicensed under the Mozilla Public License, v. 2.0",
        patches.listing()
    )
}

fn patch(args: Args, patches: &PatchSet) -> mata_nui_patcher::Result<()> {
    let selection = Selection::from_lists(args.enabled, args.disabled)?;
    tracing::debug!("patching {} with {:?}", args.file.display(), selection);
    Runner::new(patches, io::stdout().lock()).run(&selection, &args.file)
}

fn main() -> ExitCode {
    let patches = match mata_nui_patcher::patches() {
        Ok(p) => p,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::FAILURE
        },
    };

    let command = Args::command().after_help(epilog(patches));
    let args = match Args::from_arg_matches(&command.get_matches()) {
        Ok(args) => args,
        Err(e) => e.exit(),
    };
    init_logging(args.verbose);

    match patch(args, patches) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            if e.is_usage() {
                eprintln!("\nFor more information, try '--help'.");
            }
            ExitCode::FAILURE
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Result<Args, clap::Error> {
        Args::try_parse_from(argv)
    }

    #[test]
    fn args_are_well_formed() {
        Args::command().debug_assert();
    }

    #[test]
    fn repeated_enabled() {
        let args = parse(&["patcher", "-e", "hvp", "--enabled", "win10", "game.exe"]).unwrap();
        assert_eq!(args.enabled, ["hvp", "win10"]);
        assert!(args.disabled.is_empty());
        assert_eq!(args.file, PathBuf::from("game.exe"));
    }

    #[test]
    fn enabled_and_disabled_conflict() {
        let err = parse(&["patcher", "-e", "hvp", "-d", "win10", "game.exe"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }

    #[test]
    fn file_is_required() {
        let err = parse(&["patcher", "-d", "hvp"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn help_lists_every_patch() {
        let patches = mata_nui_patcher::patches().unwrap();
        let help = Args::command().after_help(epilog(patches)).render_help().to_string();
        assert!(help.contains("TLOMN Build 2001-10-23 Patcher"));
        assert!(help.contains(&format!("Version: {}", env!("CARGO_PKG_VERSION"))));
        for patch in patches {
            assert!(help.contains(&format!("  {:<21} {}", patch.id, patch.description)));
        }
        let listing = help.find("patches:").unwrap();
        let copyright = help.find("Copyright (c) 2018 JrMasterModelBuilder").unwrap();
        assert!(listing < copyright);
        assert!(help.contains("Licensed under the Mozilla Public License, v. 2.0"));
    }
}
