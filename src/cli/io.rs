//! Output handling for CLI
//!
//! - Success: single JSON object on stdout, `{"status":"ok","data":...}`
//! - Human-readable listings: plain lines on stdout
//! - Errors go to stderr (see `main`)

use std::io::{self, Write};

use serde::Serialize;

use super::errors::CliResult;

/// Write a success response to stdout
pub fn write_response<T: Serialize>(data: &T) -> CliResult<()> {
    let stdout = io::stdout();
    write_response_to(&mut stdout.lock(), data)
}

pub(crate) fn write_response_to<W: Write, T: Serialize>(out: &mut W, data: &T) -> CliResult<()> {
    let response = serde_json::json!({
        "status": "ok",
        "data": serde_json::to_value(data)?
    });

    serde_json::to_writer(&mut *out, &response)?;
    writeln!(out)?;
    out.flush()?;

    Ok(())
}

/// Write plain lines to stdout
pub fn write_lines<I, S>(lines: I) -> CliResult<()>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for line in lines {
        writeln!(out, "{}", line.as_ref())?;
    }
    out.flush()?;

    Ok(())
}
