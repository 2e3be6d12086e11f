//! Orchestrates one scan: select, filter binaries, detect, report.

use super::detector::{contains_target_script, line_matches};
use super::enumerator::{FileEnumerator, GlobEnumerator};
use super::error::CoreError;
use super::reporter::{DisplayOptions, MatchReporter};
use super::selector::FileSelector;
use crate::config::ScanConfig;
use crate::utils::file_detection::is_binary;
use serde::Serialize;
use std::fs;
use std::io::Write;
use std::process::ExitCode;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ScanOutcome {
    Clean,
    MatchesFound,
}

/// What a completed scan found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanSummary {
    pub total_match_lines: usize,
    pub files_scanned: usize,
    pub binary_files_skipped: usize,
    pub files_with_matches: usize,
    /// The match cap ended the scan before every file was read.
    pub truncated: bool,
    pub outcome: ScanOutcome,
}

impl ScanSummary {
    /// Whether this result should be signalled as a failure.
    pub fn should_fail(&self, error_code_on_found: bool) -> bool {
        error_code_on_found && self.outcome == ScanOutcome::MatchesFound
    }

    pub fn exit_code(&self, error_code_on_found: bool) -> ExitCode {
        if self.should_fail(error_code_on_found) {
            ExitCode::FAILURE
        } else {
            ExitCode::SUCCESS
        }
    }
}

/// Runs scans against a `FileEnumerator`.
pub struct ScanEngine<E: FileEnumerator + 'static = GlobEnumerator> {
    enumerator: Arc<E>,
}

impl ScanEngine<GlobEnumerator> {
    pub fn new() -> Self {
        Self::with_enumerator(GlobEnumerator::new())
    }
}

impl Default for ScanEngine<GlobEnumerator> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: FileEnumerator + 'static> ScanEngine<E> {
    pub fn with_enumerator(enumerator: E) -> Self {
        Self {
            enumerator: Arc::new(enumerator),
        }
    }

    /// Resolves the candidate list on a blocking task. This is the only
    /// suspension point of a scan; the whole list arrives at once.
    pub async fn select(&self, config: &ScanConfig) -> Result<Vec<String>, CoreError> {
        let enumerator = Arc::clone(&self.enumerator);
        let config = config.clone();
        tokio::task::spawn_blocking(move || FileSelector::new(enumerator.as_ref()).select(&config))
            .await?
    }

    /// Selects files, then scans them in order, writing the report to `out`.
    ///
    /// Selection failures abort before anything is written.
    pub async fn run<W: Write>(
        &self,
        config: &ScanConfig,
        out: W,
    ) -> Result<ScanSummary, CoreError> {
        tracing::info!("Scanning {}", config.dir.display());
        let files = self.select(config).await?;
        let summary = scan_files(config, &files, out)?;

        tracing::info!(
            "Scan finished: {} match lines in {} of {} files",
            summary.total_match_lines,
            summary.files_with_matches,
            summary.files_scanned
        );
        Ok(summary)
    }
}

/// Scans `files` (relative to `config.dir`) sequentially.
///
/// A file that cannot be read aborts the scan. After every file the match
/// counter is checked; once it has passed the cap no further file is opened.
pub fn scan_files<W: Write>(
    config: &ScanConfig,
    files: &[String],
    out: W,
) -> Result<ScanSummary, CoreError> {
    let mut reporter = MatchReporter::new(out, DisplayOptions::from(config));
    let mut files_scanned = 0;
    let mut binary_files_skipped = 0;
    let mut files_with_matches = 0;
    let mut truncated = false;

    for path in files {
        let full_path = config.dir.join(path);
        let bytes = fs::read(&full_path).map_err(|e| CoreError::Io(e, full_path.clone()))?;
        files_scanned += 1;

        if is_binary(&bytes) {
            tracing::debug!("Skipping binary file {}", path);
            binary_files_skipped += 1;
            continue;
        }

        let content = String::from_utf8_lossy(&bytes);
        if !contains_target_script(&content) {
            continue;
        }

        files_with_matches += 1;
        reporter.report_file(path)?;

        for (line, found) in line_matches(&content) {
            reporter.report_match(path, line, &found)?;
            if reporter.is_capped() {
                break;
            }
        }

        if reporter.is_capped() {
            tracing::warn!("Match limit reached, stopping after {}", path);
            truncated = true;
            break;
        }
    }

    reporter.flush()?;

    let total_match_lines = reporter.match_lines();
    Ok(ScanSummary {
        total_match_lines,
        files_scanned,
        binary_files_skipped,
        files_with_matches,
        truncated,
        outcome: if total_match_lines > 0 {
            ScanOutcome::MatchesFound
        } else {
            ScanOutcome::Clean
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::reporter::MATCH_CAP;
    use crate::utils::test_helpers::{running_as_root, setup_test_logging};
    use std::path::Path;
    use tempfile::{tempdir, TempDir};

    struct FailingEnumerator;

    impl FileEnumerator for FailingEnumerator {
        fn enumerate(&self, root: &Path, _: &str, _: &[String]) -> Result<Vec<String>, CoreError> {
            Err(CoreError::NotADirectory(root.to_path_buf()))
        }
    }

    fn project(files: &[(&str, &[u8])]) -> TempDir {
        let dir = tempdir().expect("Failed to create temp dir");
        for (name, content) in files {
            let path = dir.path().join(name);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).unwrap();
            }
            fs::write(path, content).unwrap();
        }
        dir
    }

    fn scan(dir: &TempDir, files: &[&str]) -> (ScanSummary, String) {
        let config = ScanConfig::new(dir.path());
        let files: Vec<String> = files.iter().map(|f| f.to_string()).collect();
        let mut out = Vec::new();
        let summary = scan_files(&config, &files, &mut out).unwrap();
        (summary, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_binary_and_latin_files_produce_no_output() {
        setup_test_logging();
        let dir = project(&[
            ("bin.dat", &b"\0\xd0\xb4\xd0\xb0"[..]),
            ("plain.txt", &b"hello"[..]),
        ]);
        let (summary, output) = scan(&dir, &["bin.dat", "plain.txt"]);

        assert_eq!(output, "");
        assert_eq!(summary.files_scanned, 2);
        assert_eq!(summary.binary_files_skipped, 1);
        assert_eq!(summary.outcome, ScanOutcome::Clean);
        assert!(!summary.should_fail(true));
    }

    #[test]
    fn test_report_layout() {
        let dir = project(&[("a.txt", "line one\nтекст здесь\nlast: ещё".as_bytes())]);
        let (summary, output) = scan(&dir, &["a.txt"]);

        insta::assert_snapshot!(output, @r#"
File "a.txt" contains cyrillic chars:
  - a.txt:2:1  текст здесь
  - a.txt:3:7  last: ещё
"#);
        assert_eq!(summary.total_match_lines, 2);
        assert_eq!(summary.files_with_matches, 1);
        assert!(summary.should_fail(true));
        assert!(!summary.should_fail(false));
    }

    #[test]
    fn test_cap_stops_at_file_boundary() {
        let many = "да\n".repeat(MATCH_CAP + 20);
        let dir = project(&[("a.txt", many.as_bytes()), ("b.txt", "нет".as_bytes())]);
        let (summary, output) = scan(&dir, &["a.txt", "b.txt"]);

        assert!(summary.truncated);
        assert_eq!(summary.total_match_lines, MATCH_CAP + 1);
        assert_eq!(summary.files_scanned, 1);
        assert!(!output.contains("b.txt"));
        assert_eq!(output.lines().count(), 1 + MATCH_CAP + 1);
    }

    #[test]
    fn test_cap_crossed_on_last_line_of_file_still_stops() {
        let exact = "да\n".repeat(MATCH_CAP + 1);
        let dir = project(&[("a.txt", exact.as_bytes()), ("b.txt", "нет".as_bytes())]);
        let (summary, _) = scan(&dir, &["a.txt", "b.txt"]);

        assert!(summary.truncated);
        assert_eq!(summary.files_scanned, 1);
    }

    #[test]
    fn test_cap_shared_across_files() {
        let sixty = "да\n".repeat(60);
        let dir = project(&[
            ("a.txt", sixty.as_bytes()),
            ("b.txt", sixty.as_bytes()),
            ("c.txt", "нет".as_bytes()),
        ]);
        let (summary, output) = scan(&dir, &["a.txt", "b.txt", "c.txt"]);

        assert!(summary.truncated);
        assert_eq!(summary.total_match_lines, MATCH_CAP + 1);
        assert_eq!(summary.files_scanned, 2);
        assert_eq!(summary.files_with_matches, 2);
        assert!(output.contains("- b.txt:41:1  да"));
        assert!(!output.contains("b.txt:42:"));
        assert!(!output.contains("c.txt"));
    }

    #[test]
    fn test_cap_not_reached_keeps_scanning() {
        let lines = "да\n".repeat(MATCH_CAP - 1);
        let dir = project(&[("a.txt", lines.as_bytes()), ("b.txt", "нет".as_bytes())]);
        let (summary, _) = scan(&dir, &["a.txt", "b.txt"]);

        assert!(!summary.truncated);
        assert_eq!(summary.files_scanned, 2);
        assert_eq!(summary.total_match_lines, MATCH_CAP);
    }

    #[test]
    fn test_missing_candidate_aborts_scan() {
        let dir = project(&[("a.txt", "да".as_bytes())]);
        let config = ScanConfig::new(dir.path());
        let err = scan_files(&config, &["gone.txt".to_string()], Vec::new()).unwrap_err();
        assert!(matches!(err, CoreError::Io(_, ref p) if p.ends_with("gone.txt")));
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_candidate_aborts_scan() {
        use std::os::unix::fs::PermissionsExt;

        if running_as_root() {
            return;
        }

        let dir = project(&[("locked.txt", "да".as_bytes())]);
        let locked = dir.path().join("locked.txt");
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        let config = ScanConfig::new(dir.path());
        let result = scan_files(&config, &["locked.txt".to_string()], Vec::new());

        fs::set_permissions(&locked, fs::Permissions::from_mode(0o644)).unwrap();
        assert!(matches!(result, Err(CoreError::Io(..))));
    }

    #[tokio::test]
    async fn test_selection_failure_writes_nothing() {
        let engine = ScanEngine::with_enumerator(FailingEnumerator);
        let mut out = Vec::new();
        let err = engine
            .run(&ScanConfig::new("/nowhere"), &mut out)
            .await
            .unwrap_err();

        assert!(err.is_selection_failure());
        assert!(out.is_empty());
    }

    #[test]
    fn test_summary_serializes_camel_case() {
        let summary = ScanSummary {
            total_match_lines: 3,
            files_scanned: 2,
            binary_files_skipped: 0,
            files_with_matches: 1,
            truncated: false,
            outcome: ScanOutcome::MatchesFound,
        };
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["totalMatchLines"], 3);
        assert_eq!(json["outcome"], "matchesFound");
    }
}
