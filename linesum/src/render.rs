//! Output rendering for the CLI.

use std::str::FromStr;
use std::time::Duration;

use linesumlib::Tally;
use serde::Serialize;

/// How the result is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// `Time taken:` and `TOTAL LINES:` lines, preceded by per-file counts
    /// when they were kept
    #[default]
    Text,
    /// One JSON object with subtotals and skips
    Json,
}

impl FromStr for OutputMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(OutputMode::Text),
            "json" => Ok(OutputMode::Json),
            other => Err(format!("unknown output mode '{other}'")),
        }
    }
}

/// Data context for JSON output
#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    total: u64,
    files_counted: u64,
    skipped_count: usize,
    elapsed_ms: f64,
    #[serde(flatten)]
    tally: &'a Tally,
}

/// Render a finished run in the requested mode.
pub fn render(tally: &Tally, elapsed: Duration, mode: OutputMode) -> serde_json::Result<String> {
    match mode {
        OutputMode::Text => Ok(render_text(tally, elapsed)),
        OutputMode::Json => render_json(tally, elapsed),
    }
}

fn render_text(tally: &Tally, elapsed: Duration) -> String {
    let mut out = String::new();
    for subtotal in [&tally.dirs, &tally.rec_dirs, &tally.files] {
        for file in &subtotal.file_counts {
            out.push_str(&format!("{:>10}  {}\n", file.lines, file.path.display()));
        }
    }
    out.push_str(&format!(
        "Time taken: {:?}\nTOTAL LINES: {}\n",
        elapsed,
        tally.total()
    ));
    out
}

fn render_json(tally: &Tally, elapsed: Duration) -> serde_json::Result<String> {
    let report = JsonReport {
        total: tally.total(),
        files_counted: tally.files_counted(),
        skipped_count: tally.skipped().count(),
        elapsed_ms: elapsed.as_secs_f64() * 1000.0,
        tally,
    };
    let mut out = serde_json::to_string_pretty(&report)?;
    out.push('\n');
    Ok(out)
}
