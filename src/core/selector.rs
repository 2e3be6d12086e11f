//! Turns a `ScanConfig` into the list of files to scan.

use super::enumerator::FileEnumerator;
use super::error::CoreError;
use super::ignore::read_ignore_rules;
use crate::config::ScanConfig;

/// Selection refuses to proceed past this many candidate files.
pub const MAX_CANDIDATE_FILES: usize = 5000;

/// Include pattern used when the configuration does not set one.
pub const DEFAULT_PATTERN: &str = "**";

/// Exclusions applied to every scan regardless of configuration.
const BUILTIN_EXCLUDES: &[&str] = &[
    "node_modules/**",
    "**/node_modules/**",
    "*cache*/**",
    "**/*cache*/**",
];

/// Builds the ordered exclusion list for `config`: built-ins, extensions,
/// `.gitignore` rules (when enabled), then caller patterns.
pub fn exclusion_patterns(config: &ScanConfig) -> Vec<String> {
    let mut patterns: Vec<String> = BUILTIN_EXCLUDES.iter().map(|p| p.to_string()).collect();

    patterns.extend(
        config
            .normalized_ignore_exts()
            .map(|ext| format!("**/*.{}", ext)),
    );

    if config.git_ignore {
        patterns.extend(read_ignore_rules(&config.dir));
    }

    patterns.extend(config.ignore.iter().cloned());
    patterns
}

/// Combines built-in, extension, ignore-file and caller exclusions into one
/// query against a `FileEnumerator`.
pub struct FileSelector<'a, E: FileEnumerator + ?Sized> {
    enumerator: &'a E,
}

impl<'a, E: FileEnumerator + ?Sized> FileSelector<'a, E> {
    pub fn new(enumerator: &'a E) -> Self {
        Self { enumerator }
    }

    /// Runs the enumeration and enforces the candidate ceiling.
    pub fn select(&self, config: &ScanConfig) -> Result<Vec<String>, CoreError> {
        let include = config.pattern.as_deref().unwrap_or(DEFAULT_PATTERN);
        let excludes = exclusion_patterns(config);

        tracing::debug!(
            "Selecting files under {} with {} exclusion patterns",
            config.dir.display(),
            excludes.len()
        );

        let files = self.enumerator.enumerate(&config.dir, include, &excludes)?;
        if files.len() > MAX_CANDIDATE_FILES {
            return Err(CoreError::TooManyFiles(files.len()));
        }

        tracing::info!("Selected {} candidate files", files.len());
        Ok(files)
    }
}
