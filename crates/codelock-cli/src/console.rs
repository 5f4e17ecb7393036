//! Line-oriented console front end.
//!
//! Reads one code per line, feeds it to the lock and writes one line back per
//! entry: the report, or the reason the code was refused. Rendering happens
//! here; the lock itself never prints.

use std::io::Write;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::debug;

use codelock_controller::{LockController, TransitionReport};
use codelock_core::Error;

/// How reports are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// `[State] message`
    Text,
    /// One JSON object per line
    Json,
}

/// Counts of what happened during a console run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub applied: usize,
    pub invalid: usize,
}

/// Feed every non-empty input line to the lock until end of input.
pub async fn run<R, W>(
    lock: &mut LockController,
    input: R,
    output: &mut W,
    format: OutputFormat,
) -> anyhow::Result<RunSummary>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();
    let mut summary = RunSummary::default();

    while let Some(line) = lines.next_line().await? {
        // Only the line terminator is stripped; the code itself is taken verbatim
        let code = line.trim_end_matches('\r');
        if code.is_empty() {
            continue;
        }

        match lock.enter_code(code) {
            Ok(report) => {
                summary.applied += 1;
                write_report(output, &report, format)?;
            }
            Err(e @ Error::InvalidInput { .. }) => {
                summary.invalid += 1;
                write_error(output, &e, format)?;
            }
            Err(e) => return Err(e.into()),
        }
    }

    debug!(
        applied = summary.applied,
        invalid = summary.invalid,
        "End of input"
    );
    Ok(summary)
}

fn write_report<W: Write>(
    output: &mut W,
    report: &TransitionReport,
    format: OutputFormat,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => writeln!(output, "{report}")?,
        OutputFormat::Json => writeln!(output, "{}", serde_json::to_string(report)?)?,
    }
    Ok(())
}

fn write_error<W: Write>(output: &mut W, error: &Error, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => writeln!(output, "error: {error}")?,
        OutputFormat::Json => writeln!(
            output,
            "{}",
            serde_json::json!({ "error": error.to_string() })
        )?,
    }
    Ok(())
}
