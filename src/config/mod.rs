pub mod settings;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Options for a single scan. Field names serialize to the camelCase keys
/// used by config files (`showFileNames`, `ignoreExts`, ...).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct ScanConfig {
    /// Root directory to scan.
    pub dir: PathBuf,
    /// Include glob; `None` means every file (`**`).
    pub pattern: Option<String>,
    pub colorize: bool,
    pub show_file_names: bool,
    pub show_content: bool,
    /// Derive extra exclusions from `<dir>/.gitignore`.
    pub git_ignore: bool,
    /// Additional exclusion globs, applied as given.
    pub ignore: Vec<String>,
    /// Extensions (without the dot) that are never scanned.
    pub ignore_exts: Vec<String>,
    /// Exit with a failure code when anything is found.
    pub error_code_on_found: bool,
}

impl ScanConfig {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            ..Default::default()
        }
    }

    /// Extension list with leading dots stripped and blanks dropped.
    pub fn normalized_ignore_exts(&self) -> impl Iterator<Item = &str> + '_ {
        self.ignore_exts
            .iter()
            .map(|ext| ext.trim())
            .map(|ext| ext.strip_prefix('.').unwrap_or(ext))
            .filter(|ext| !ext.is_empty())
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
            pattern: None,
            colorize: false,
            show_file_names: true,
            show_content: true,
            git_ignore: false,
            ignore: Vec::new(),
            ignore_exts: Vec::new(),
            error_code_on_found: false,
        }
    }
}
