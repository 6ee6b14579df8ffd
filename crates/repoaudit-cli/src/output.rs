//! Shared output layer for human/JSON parity across commands.
//!
//! Every command handler receives an [`OutputMode`] and renders through
//! [`render`], so the `--json` flag behaves identically everywhere: stable
//! `serde_json` output for machines, handwritten text for humans.

use std::io::{self, Write};

use serde::Serialize;

/// Width of the separator rule used by human output.
pub const RULE_WIDTH: usize = 72;

/// The two output modes supported by the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable text.
    Human,
    /// Machine-readable JSON (one object per command).
    Json,
}

impl OutputMode {
    #[must_use]
    pub fn from_json_flag(json: bool) -> Self {
        if json {
            Self::Json
        } else {
            Self::Human
        }
    }
}

/// Write a horizontal separator used by human output.
pub fn rule(w: &mut dyn Write) -> io::Result<()> {
    writeln!(w, "{:-<width$}", "", width = RULE_WIDTH)
}

/// Write a section heading followed by a separator.
pub fn section(w: &mut dyn Write, heading: &str) -> io::Result<()> {
    writeln!(w, "{heading}")?;
    rule(w)
}

/// Render `value` to stdout: pretty JSON in JSON mode, `human_fn` otherwise.
pub fn render<T: Serialize>(
    mode: OutputMode,
    value: &T,
    human_fn: impl FnOnce(&T, &mut dyn Write) -> io::Result<()>,
) -> anyhow::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match mode {
        OutputMode::Json => {
            serde_json::to_writer_pretty(&mut out, value)?;
            writeln!(out)?;
        }
        OutputMode::Human => human_fn(value, &mut out)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_from_flag() {
        assert_eq!(OutputMode::from_json_flag(true), OutputMode::Json);
        assert_eq!(OutputMode::from_json_flag(false), OutputMode::Human);
    }

    #[test]
    fn section_writes_heading_and_rule() {
        let mut buf = Vec::new();
        section(&mut buf, "Findings").expect("write");
        let text = String::from_utf8(buf).expect("utf8");
        assert!(text.starts_with("Findings\n"));
        assert!(text.contains('-'));
    }
}
