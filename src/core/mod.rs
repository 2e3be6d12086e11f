pub mod detector;
pub mod engine;
pub mod enumerator;
pub mod error;
pub mod ignore;
pub mod reporter;
pub mod selector;

pub use detector::LineMatch;
pub use engine::{scan_files, ScanEngine, ScanOutcome, ScanSummary};
pub use enumerator::{FileEnumerator, GlobEnumerator};
pub use error::CoreError;
pub use ignore::{build_globset_from_patterns, read_ignore_rules, translate_ignore_file};
pub use reporter::{DisplayOptions, MatchReporter, MATCH_CAP};
pub use selector::{exclusion_patterns, FileSelector, MAX_CANDIDATE_FILES};
