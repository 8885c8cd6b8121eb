//! Console formatting for warnings and findings.
//!
//! Everything here writes to a caller-supplied stream; colour is a flag,
//! not global state.

use std::io::{self, Write};

use crate::checkers::CheckFinding;

/// ANSI escape sequences
pub mod ansi {
    pub const OK_GREEN: &str = "\x1b[92m";
    pub const WARNING: &str = "\x1b[93m";
    pub const FAIL: &str = "\x1b[91m";
    pub const END: &str = "\x1b[0m";
}

/// Write `text` wrapped in `style` when colour is on.
pub fn styled<W: Write>(out: &mut W, style: &str, text: &str, color: bool) -> io::Result<()> {
    if color {
        writeln!(out, "{}{}{}", style, text, ansi::END)
    } else {
        writeln!(out, "{}", text)
    }
}

pub fn warn<W: Write>(out: &mut W, text: &str, color: bool) -> io::Result<()> {
    styled(out, ansi::WARNING, text, color)
}

pub fn fail<W: Write>(out: &mut W, text: &str, color: bool) -> io::Result<()> {
    styled(out, ansi::FAIL, text, color)
}

pub fn ok<W: Write>(out: &mut W, text: &str, color: bool) -> io::Result<()> {
    styled(out, ansi::OK_GREEN, text, color)
}

/// Report all findings for `input` as one batch under a single header.
///
/// Writes nothing when there are no findings.
pub fn report_findings<W: Write>(
    out: &mut W,
    input: &str,
    findings: &[CheckFinding],
    color: bool,
) -> io::Result<()> {
    if findings.is_empty() {
        return Ok(());
    }

    warn(
        out,
        &format!("[{}] WARNING potential spelling/grammar errors", input),
        color,
    )?;
    for finding in findings {
        let indented = finding.to_string().replace('\n', "\n  ");
        warn(out, &format!("  {}", indented), color)?;
    }
    Ok(())
}
