//! Formats matches and enforces the global match cap.

use super::detector::LineMatch;
use super::error::CoreError;
use crate::config::ScanConfig;
use colored::Colorize;
use std::io::Write;

/// Reporting stops once more than this many match lines were counted.
pub const MATCH_CAP: usize = 100;

/// Characters of context shown on each side of a match.
pub const CONTEXT_WINDOW: usize = 30;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DisplayOptions {
    pub colorize: bool,
    pub show_file_names: bool,
    pub show_content: bool,
}

impl From<&ScanConfig> for DisplayOptions {
    fn from(config: &ScanConfig) -> Self {
        Self {
            colorize: config.colorize,
            show_file_names: config.show_file_names,
            show_content: config.show_content,
        }
    }
}

/// Banner printed once for every file containing the target script.
pub fn banner(path: &str, options: DisplayOptions) -> String {
    let colon = if options.show_file_names || options.show_content {
        ":"
    } else {
        ""
    };
    format!("File \"{}\" contains cyrillic chars{}", path, colon)
}

/// `<before>match<after>` with at most `CONTEXT_WINDOW` characters on each
/// side and `... ` / ` ...` where the line was cut.
pub fn excerpt(line: &str, found: &LineMatch<'_>, colorize: bool) -> String {
    let chars: Vec<char> = line.chars().collect();
    let start = found.column;
    let end = (start + found.text.chars().count()).min(chars.len());

    let before: String = chars[start.saturating_sub(CONTEXT_WINDOW)..start]
        .iter()
        .collect();
    let after: String = chars[end..(end + CONTEXT_WINDOW).min(chars.len())]
        .iter()
        .collect();

    let value = if colorize {
        found.text.on_red().to_string()
    } else {
        found.text.to_string()
    };

    format!(
        "{}{}{}{}{}",
        if start > CONTEXT_WINDOW { "... " } else { "" },
        before,
        value,
        after,
        if end + CONTEXT_WINDOW < chars.len() { " ..." } else { "" },
    )
}

/// One report line for a match; may be blank when both display flags are off.
pub fn format_match(
    path: &str,
    line: &str,
    found: &LineMatch<'_>,
    options: DisplayOptions,
) -> String {
    let mut output = String::from("  ");

    if options.show_file_names {
        output.push_str(&format!(
            "- {}:{}:{}",
            path,
            found.line_index + 1,
            found.column + 1
        ));
    }

    if options.show_content {
        output.push_str("  ");
        output.push_str(&excerpt(line, found, options.colorize));
    }

    output
}

/// Writes banners and match lines to `out`, counting every match line.
///
/// The counter lives for one scan; once it passes `MATCH_CAP` the reporter
/// reports itself as capped and the engine stops feeding it.
pub struct MatchReporter<W: Write> {
    out: W,
    options: DisplayOptions,
    match_lines: usize,
}

impl<W: Write> MatchReporter<W> {
    pub fn new(out: W, options: DisplayOptions) -> Self {
        Self {
            out,
            options,
            match_lines: 0,
        }
    }

    pub fn report_file(&mut self, path: &str) -> Result<(), CoreError> {
        writeln!(self.out, "{}", banner(path, self.options)).map_err(CoreError::Output)
    }

    /// Counts the match, then prints it unless the formatted line is blank.
    pub fn report_match(
        &mut self,
        path: &str,
        line: &str,
        found: &LineMatch<'_>,
    ) -> Result<(), CoreError> {
        self.match_lines += 1;

        let output = format_match(path, line, found, self.options);
        if !output.trim().is_empty() {
            writeln!(self.out, "{}", output).map_err(CoreError::Output)?;
        }
        Ok(())
    }

    pub fn match_lines(&self) -> usize {
        self.match_lines
    }

    pub fn is_capped(&self) -> bool {
        self.match_lines > MATCH_CAP
    }

    pub fn flush(&mut self) -> Result<(), CoreError> {
        self.out.flush().map_err(CoreError::Output)
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
