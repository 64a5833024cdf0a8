//! # linesum
//!
//! Sum the lines of files inside given directories (recursively and/or
//! non-recursively) and/or of given files.
//!
//! ## Usage
//!
//! ```bash
//! # Files directly inside src/ (no recursion)
//! linesum --dir src
//!
//! # Everything below src/ and tests/
//! linesum --rdir src,tests
//! linesum -rd src -rd tests
//!
//! # Individual files, mixed with a directory
//! linesum -f README.md -f Cargo.toml -d docs
//!
//! # Machine-readable output, with per-file counts and diagnostics
//! linesum --rdir . --output json --per-file -v
//! ```
//!
//! Every input is checked before counting starts. A missing path, or a path
//! of the wrong kind, aborts with a non-zero exit status. Problems found
//! while counting (unreadable files, directories that cannot be entered)
//! are logged to stderr and skipped.

mod render;

use std::ffi::OsString;
use std::io::IsTerminal;
use std::process::ExitCode;
use std::time::Instant;

use clap::{Arg, ArgAction, ArgMatches, Command};
use linesumlib::{count, CountOptions, InputSpec};
use tracing::warn;
use tracing_subscriber::EnvFilter;

use render::{render, OutputMode};

/// Build the clap Command structure
fn build_command() -> Command {
    Command::new("linesum")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Sum the lines of files.")
        .long_about(
            "Sum the lines of files inside given directories (recursively and/or \
             non-recursively) and/or given files.",
        )
        .arg(
            Arg::new("rdir")
                .long("rdir")
                .visible_alias("rd")
                .action(ArgAction::Append)
                .value_delimiter(',')
                .value_name("DIR")
                .help("Recursively traverse the directory and add the line count of its files to the total"),
        )
        .arg(
            Arg::new("dir")
                .short('d')
                .long("dir")
                .action(ArgAction::Append)
                .value_delimiter(',')
                .value_name("DIR")
                .help("Non-recursively traverse the directory and add the line count of its files to the total"),
        )
        .arg(
            Arg::new("file")
                .short('f')
                .long("file")
                .action(ArgAction::Append)
                .value_delimiter(',')
                .value_name("FILE")
                .help("Add the line count of the file to the total"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_parser(["text", "json"])
                .default_value("text")
                .help("Output format"),
        )
        .arg(
            Arg::new("per-file")
                .long("per-file")
                .action(ArgAction::SetTrue)
                .help("Also report the line count of every counted file"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::Count)
                .help("Log more (-v: per-strategy summaries, -vv: every file)"),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .action(ArgAction::SetTrue)
                .conflicts_with("verbose")
                .help("Only log errors; per-item warnings are suppressed"),
        )
}

/// Rewrite the two-letter `-rd` alias to `--rdir`.
///
/// clap short flags are single characters, so `-rd` would otherwise parse
/// as `-r` followed by the value `d`.
fn normalize_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    args.into_iter()
        .map(|arg| match arg.to_str() {
            Some("-rd") => OsString::from("--rdir"),
            Some(s) if s.starts_with("-rd=") => OsString::from(format!("--rdir={}", &s[4..])),
            _ => arg,
        })
        .collect()
}

/// Extract a value list from matches
fn extract_values(matches: &ArgMatches, id: &str) -> Vec<String> {
    matches
        .get_many::<String>(id)
        .map(|v| v.cloned().collect())
        .unwrap_or_default()
}

/// Set up the stderr diagnostics subscriber
fn init_tracing(matches: &ArgMatches) {
    let level = if matches.get_flag("quiet") {
        "error"
    } else {
        match matches.get_count("verbose") {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(level))
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .without_time()
        .try_init();
}

fn run(matches: &ArgMatches) -> anyhow::Result<()> {
    let mode: OutputMode = matches
        .get_one::<String>("output")
        .map(|s| s.parse::<OutputMode>())
        .transpose()
        .map_err(anyhow::Error::msg)?
        .unwrap_or_default();

    let spec = InputSpec::new()
        .files(extract_values(matches, "file"))
        .dirs(extract_values(matches, "dir"))
        .rec_dirs(extract_values(matches, "rdir"));

    if spec.is_empty() {
        warn!("no --file, --dir or --rdir given, nothing to count");
    }

    let inputs = spec.validate()?;

    let options = CountOptions::new().keep_files(matches.get_flag("per-file"));

    let start = Instant::now();
    let tally = count(&inputs, &options);
    let elapsed = start.elapsed();

    print!("{}", render(&tally, elapsed, mode)?);
    Ok(())
}

fn main() -> ExitCode {
    let matches = build_command().get_matches_from(normalize_args(std::env::args_os()));
    init_tracing(&matches);

    match run(&matches) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> ArgMatches {
        let args = args.iter().map(OsString::from);
        build_command()
            .try_get_matches_from(normalize_args(args))
            .unwrap()
    }

    #[test]
    fn test_command_is_well_formed() {
        build_command().debug_assert();
    }

    #[test]
    fn test_rd_alias_is_rewritten() {
        let args = ["linesum", "-rd", "a", "-rd=b", "--rd", "c", "-d", "-rdx"];
        let normalized = normalize_args(args.iter().map(OsString::from));

        assert_eq!(
            normalized,
            vec!["linesum", "--rdir", "a", "--rdir=b", "--rd", "c", "-d", "-rdx"]
        );
    }

    #[test]
    fn test_comma_separated_and_repeated_values() {
        let matches = parse(&["linesum", "-f", "a.txt,b.txt", "--file", "c.txt", "-rd", "x"]);

        assert_eq!(extract_values(&matches, "file"), vec!["a.txt", "b.txt", "c.txt"]);
        assert_eq!(extract_values(&matches, "rdir"), vec!["x"]);
        assert!(extract_values(&matches, "dir").is_empty());
    }

    #[test]
    fn test_all_rdir_spellings_agree() {
        for flag in ["--rdir", "--rd", "-rd"] {
            let matches = parse(&["linesum", flag, "src"]);
            assert_eq!(extract_values(&matches, "rdir"), vec!["src"], "{flag}");
        }
    }

    #[test]
    fn test_per_file_is_opt_in() {
        assert!(!parse(&["linesum", "-o", "json"]).get_flag("per-file"));
        assert!(parse(&["linesum", "--per-file"]).get_flag("per-file"));
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        let result = build_command().try_get_matches_from(["linesum", "-q", "-v"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_positional_arguments_are_rejected() {
        let result = build_command().try_get_matches_from(["linesum", "stray"]);
        assert!(result.is_err());
    }
}
