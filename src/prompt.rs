//! Interactive collection of the station and date range.

use anyhow::{Context, Result, bail};
use std::io::{BufRead, Write};

use crate::request::TideRequest;

/// Reinterprets a `YYYYMMDD` entry as `YYYY/MM/DD` for the user to confirm.
///
/// Splits on character positions only, so malformed input yields malformed
/// (possibly empty) parts rather than an error.
pub fn confirmation_echo(date: &str) -> String {
    let chars: Vec<char> = date.chars().collect();
    let part = |from: usize, to: usize| -> String {
        let to = to.min(chars.len());
        let from = from.min(to);
        chars[from..to].iter().collect()
    };

    format!("{}/{}/{}", part(0, 4), part(4, 6), part(6, chars.len()))
}

/// Writes `prompt` without a newline and returns the next trimmed input line.
pub fn read_line<R: BufRead, W: Write>(
    reader: &mut R,
    writer: &mut W,
    prompt: &str,
) -> Result<String> {
    write!(writer, "{prompt}")?;
    writer.flush()?;

    let mut line = String::new();
    let read = reader
        .read_line(&mut line)
        .with_context(|| format!("failed to read answer to '{}'", prompt.trim_end()))?;
    if read == 0 {
        bail!("stdin closed before '{}' was answered", prompt.trim_end());
    }

    Ok(line.trim().to_string())
}

fn read_date<R: BufRead, W: Write>(
    reader: &mut R,
    writer: &mut W,
    prompt: &str,
) -> Result<String> {
    let date = read_line(reader, writer, prompt)?;
    writeln!(writer, "Verify the entry is correct: {}", confirmation_echo(&date))?;
    Ok(date)
}

/// Prompts for station ID, start date and end date, in that order.
pub fn collect_request<R: BufRead, W: Write>(
    reader: &mut R,
    writer: &mut W,
) -> Result<TideRequest> {
    let station = read_line(reader, writer, "Enter station ID: ")?;
    let begin_date = read_date(reader, writer, "Enter start date in YYYYMMDD format: ")?;
    let end_date = read_date(reader, writer, "Enter end date in YYYYMMDD format: ")?;

    Ok(TideRequest {
        station,
        begin_date,
        end_date,
    })
}
