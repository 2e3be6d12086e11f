//! The file-enumeration capability used by the selector.
//!
//! `FileEnumerator` is the seam: given a root, one include pattern and a list
//! of exclude patterns it returns matching file paths relative to the root.
//! `GlobEnumerator` is the filesystem-backed implementation.

use super::error::CoreError;
use super::ignore::build_globset_from_patterns;
use globset::GlobSet;
use std::fs;
use std::path::Path;
use walkdir::{DirEntry, WalkDir};

/// Resolves include/exclude globs against a directory tree.
pub trait FileEnumerator: Send + Sync {
    /// Returns `/`-separated paths of files (never directories) under `root`
    /// that match `include` and none of `excludes`.
    fn enumerate(
        &self,
        root: &Path,
        include: &str,
        excludes: &[String],
    ) -> Result<Vec<String>, CoreError>;
}

/// Walks the tree with `walkdir` and filters with `globset`.
///
/// Entries whose name starts with `.` are skipped unless one of the include
/// pattern's dot-segments matches their name, the same way shell globs leave
/// dotfiles alone. Symlinked files are listed; symlinked directories are not
/// descended into.
#[derive(Debug, Default, Clone)]
pub struct GlobEnumerator;

impl GlobEnumerator {
    pub fn new() -> Self {
        Self
    }

    fn is_hidden(entry: &DirEntry) -> bool {
        entry.depth() > 0
            && entry
                .file_name()
                .to_str()
                .is_some_and(|name| name.starts_with('.'))
    }

    fn relative_path(root: &Path, entry: &DirEntry) -> Option<String> {
        let relative = entry.path().strip_prefix(root).ok()?;
        let parts: Vec<String> = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();
        Some(parts.join("/"))
    }

    /// Exclusions of the form `X/**` remove a whole directory, so the walk
    /// can skip descending into anything matching `X`.
    fn directory_prunes(excludes: &[String]) -> Result<GlobSet, globset::Error> {
        build_globset_from_patterns(
            excludes
                .iter()
                .filter_map(|pattern| pattern.strip_suffix("/**"))
                .filter(|prefix| !prefix.is_empty()),
        )
    }

    /// Segments of `include` that start with `.`; a hidden entry is only
    /// visited when its name matches one of them.
    fn dot_segments(include: &str) -> Result<GlobSet, globset::Error> {
        build_globset_from_patterns(
            include
                .split('/')
                .filter(|segment| segment.starts_with('.')),
        )
    }

    /// A regular file, or a symlink that resolves to one.
    fn is_listable_file(entry: &DirEntry) -> bool {
        if entry.file_type().is_file() {
            return true;
        }
        if !entry.path_is_symlink() {
            return false;
        }
        match fs::metadata(entry.path()) {
            Ok(metadata) => metadata.is_file(),
            Err(e) => {
                tracing::debug!("Skipping broken link {}: {}", entry.path().display(), e);
                false
            }
        }
    }
}

impl FileEnumerator for GlobEnumerator {
    fn enumerate(
        &self,
        root: &Path,
        include: &str,
        excludes: &[String],
    ) -> Result<Vec<String>, CoreError> {
        if !root.is_dir() {
            return Err(CoreError::NotADirectory(root.to_path_buf()));
        }

        let include_set = build_globset_from_patterns([include])?;
        let exclude_set = build_globset_from_patterns(excludes)?;
        let prune_set = Self::directory_prunes(excludes)?;
        let visible_dots = Self::dot_segments(include)?;

        let walker = WalkDir::new(root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| {
                if Self::is_hidden(entry) && !visible_dots.is_match(entry.file_name()) {
                    return false;
                }
                if entry.depth() > 0 && entry.file_type().is_dir() {
                    if let Some(relative) = Self::relative_path(root, entry) {
                        return !prune_set.is_match(&relative);
                    }
                }
                true
            });

        let mut files = Vec::new();
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(source) if source.depth() == 0 => {
                    return Err(CoreError::Selection {
                        root: root.to_path_buf(),
                        source,
                    });
                }
                Err(e) => {
                    tracing::warn!("Skipping unreadable entry under {}: {}", root.display(), e);
                    continue;
                }
            };

            if !Self::is_listable_file(&entry) {
                continue;
            }

            let Some(relative) = Self::relative_path(root, &entry) else {
                continue;
            };

            if include_set.is_match(&relative) && !exclude_set.is_match(&relative) {
                files.push(relative);
            }
        }

        tracing::debug!(
            "Enumerated {} files under {} matching {:?}",
            files.len(),
            root.display(),
            include
        );
        Ok(files)
    }
}
