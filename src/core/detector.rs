//! Finds runs of Cyrillic text in file content.
//!
//! The alphabet is `А`-`я` (U+0410..=U+044F, which includes `Й`/`й`) plus
//! `Ё`/`ё`. A run is one or more letters, optionally chained to further
//! letter groups by whitespace, `,`, `.`, `:`, `?`, `+` or `-`.

use regex::Regex;
use std::sync::LazyLock;

static ANY_LETTER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[А-Яа-яЁё]+").unwrap());

static LETTER_RUN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[А-Яа-яЁё]+(?:[\s,.:?+\-]*[А-Яа-яЁё]+)*").unwrap()
});

/// The first run found on a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineMatch<'a> {
    /// 0-based line number.
    pub line_index: usize,
    /// 0-based column, counted in characters.
    pub column: usize,
    pub text: &'a str,
}

/// Cheap whole-file check; files failing it are skipped entirely.
pub fn contains_target_script(content: &str) -> bool {
    ANY_LETTER.is_match(content)
}

/// Returns the first run on `line`, if any.
pub fn find_in_line(line: &str, line_index: usize) -> Option<LineMatch<'_>> {
    let found = LETTER_RUN.find(line)?;
    Some(LineMatch {
        line_index,
        column: line[..found.start()].chars().count(),
        text: found.as_str(),
    })
}

/// Yields each line of `content` (split on `\n`) that holds a run, together
/// with its first match.
pub fn line_matches(content: &str) -> impl Iterator<Item = (&str, LineMatch<'_>)> {
    content
        .split('\n')
        .enumerate()
        .filter_map(|(index, line)| find_in_line(line, index).map(|found| (line, found)))
}
