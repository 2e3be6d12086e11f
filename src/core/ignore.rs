//! Translates `.gitignore` lines into glob exclusion patterns and compiles
//! pattern lists into a `GlobSet`.

use globset::{Glob, GlobBuilder, GlobSet, GlobSetBuilder};
use std::fs;
use std::path::Path;

/// Name of the ignore file read from the scan root.
pub const IGNORE_FILE_NAME: &str = ".gitignore";

/// Translates a single ignore-file line.
///
/// Blank lines and comments yield nothing. A line ending in `/` gets `**`
/// appended, any other line gets `/**`, so a bare name is always treated as
/// a directory prefix. Rooted lines (`/build`) produce one pattern with the
/// leading slash removed; everything else produces the root-level pattern
/// and a `**/`-prefixed copy for nested matches.
pub fn translate_ignore_line(line: &str) -> Vec<String> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Vec::new();
    }

    let mut updated = trimmed.to_string();
    if updated.ends_with('/') {
        updated.push_str("**");
    } else {
        updated.push_str("/**");
    }

    match updated.strip_prefix('/') {
        Some(anchored) => vec![anchored.to_string()],
        None => {
            let nested = format!("**/{}", updated);
            vec![updated, nested]
        }
    }
}

/// Translates the full text of an ignore file, in line order.
pub fn translate_ignore_file(contents: &str) -> Vec<String> {
    contents.split('\n').flat_map(translate_ignore_line).collect()
}

/// Reads `<root>/.gitignore` and translates it.
///
/// A missing or unreadable file is not an error: it is logged and treated as
/// an empty rule set. Bytes that are not valid UTF-8 are replaced rather than
/// rejected, so a legacy-encoded comment does not discard the other rules.
/// Translated rules that do not compile as globs are dropped with a warning.
pub fn read_ignore_rules(root: &Path) -> Vec<String> {
    let ignore_path = root.join(IGNORE_FILE_NAME);
    let contents = match fs::read(&ignore_path) {
        Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
        Err(e) => {
            tracing::warn!(
                "Could not read ignore file {}: {}. Continuing without its rules.",
                ignore_path.display(),
                e
            );
            return Vec::new();
        }
    };

    let rules: Vec<String> = translate_ignore_file(&contents)
        .into_iter()
        .filter(|rule| match compile_glob(rule) {
            Ok(_) => true,
            Err(e) => {
                tracing::warn!("Skipping ignore rule {:?}: {}", rule, e);
                false
            }
        })
        .collect();

    tracing::debug!(
        "Loaded {} exclusion patterns from {}",
        rules.len(),
        ignore_path.display()
    );
    rules
}

/// Compiles one pattern with glob semantics: `*` and `?` never cross a `/`.
pub fn compile_glob(pattern: &str) -> Result<Glob, globset::Error> {
    GlobBuilder::new(pattern).literal_separator(true).build()
}

/// Builds a `GlobSet` from already-translated glob patterns.
/// This is the centralized logic for include and exclude matching.
pub fn build_globset_from_patterns<I, S>(patterns: I) -> Result<GlobSet, globset::Error>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(compile_glob(pattern.as_ref())?);
    }
    builder.build()
}
